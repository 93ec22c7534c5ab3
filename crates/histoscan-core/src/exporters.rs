//! Image exporters
//!
//! The output container follows the file extension (PNG, TIFF, JPEG, ...).
//! Encoding happens in memory first, so a codec failure never leaves a
//! truncated file behind.

use std::io::Cursor;
use std::path::Path;

use image::{ImageFormat, RgbImage};

use crate::error::EncodeError;

/// Resolve the output format from a path's extension.
pub fn output_format<P: AsRef<Path>>(path: P) -> Result<ImageFormat, EncodeError> {
    let path = path.as_ref();
    ImageFormat::from_path(path).map_err(|_| EncodeError::UnsupportedFormat {
        path: path.to_path_buf(),
    })
}

/// Encode an RGB8 image into a byte buffer in `format`.
pub fn encode_rgb8(
    image: &RgbImage,
    format: ImageFormat,
    path: &Path,
) -> Result<Vec<u8>, EncodeError> {
    let mut buffer = Cursor::new(Vec::new());
    image
        .write_to(&mut buffer, format)
        .map_err(|source| EncodeError::Image {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(buffer.into_inner())
}

/// Export an RGB8 image to `path`, format chosen by extension.
pub fn export_image<P: AsRef<Path>>(image: &RgbImage, path: P) -> Result<(), EncodeError> {
    let path = path.as_ref();
    let format = output_format(path)?;
    let bytes = encode_rgb8(image, format, path)?;

    std::fs::write(path, bytes).map_err(|source| EncodeError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    log::debug!(
        "Exported {}x{} {:?} image to {}",
        image.width(),
        image.height(),
        format,
        path.display()
    );
    Ok(())
}
