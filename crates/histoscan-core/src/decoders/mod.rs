//! Image decoding
//!
//! Any format the `image` crate can sniff from file content is accepted.
//! The result is always expanded to 8-bit RGB.

#[cfg(test)]
mod tests;

use std::path::Path;

use image::{ImageFormat, ImageReader, RgbImage};

use crate::error::DecodeError;

/// Decoded image data
#[derive(Debug, Clone)]
pub struct DecodedImage {
    /// Image width in pixels
    pub width: u32,

    /// Image height in pixels
    pub height: u32,

    /// RGB8 pixel buffer
    pub pixels: RgbImage,

    /// Container format detected from the file content
    pub source_format: Option<ImageFormat>,

    /// Whether the source image had no color channels (gray or gray+alpha).
    /// The buffer itself is always expanded to RGB.
    pub source_is_grayscale: bool,
}

/// Decode an image from a file path
///
/// Fails with [`DecodeError`] if the file cannot be opened, its content is
/// not a recognised image, or the decoded image has a zero dimension.
pub fn decode_image<P: AsRef<Path>>(path: P) -> Result<DecodedImage, DecodeError> {
    let path = path.as_ref();

    let reader = ImageReader::open(path)
        .and_then(|r| r.with_guessed_format())
        .map_err(|source| DecodeError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    let source_format = reader.format();

    let dynamic = reader.decode().map_err(|source| DecodeError::Image {
        path: path.to_path_buf(),
        source,
    })?;

    let (width, height) = (dynamic.width(), dynamic.height());
    if width == 0 || height == 0 {
        return Err(DecodeError::Empty {
            path: path.to_path_buf(),
            width,
            height,
        });
    }

    let source_is_grayscale = !dynamic.color().has_color();
    let pixels = dynamic.into_rgb8();

    log::debug!(
        "Decoded {} ({}x{}, format {:?}, grayscale: {})",
        path.display(),
        width,
        height,
        source_format,
        source_is_grayscale
    );

    Ok(DecodedImage {
        width,
        height,
        pixels,
        source_format,
        source_is_grayscale,
    })
}

/// Resize with the pipeline's fixed interpolation policy (bilinear).
pub fn resize_to(image: &RgbImage, width: u32, height: u32) -> RgbImage {
    if image.dimensions() == (width, height) {
        return image.clone();
    }
    image::imageops::resize(image, width, height, image::imageops::FilterType::Triangle)
}

/// Expand an RGB8 buffer to interleaved `f32` values normalized to 0.0-1.0.
pub fn normalize_rgb(image: &RgbImage) -> Vec<f32> {
    image.as_raw().iter().map(|&v| v as f32 / 255.0).collect()
}
