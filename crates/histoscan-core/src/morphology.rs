//! Grey-level morphology on RGB8 buffers.
//!
//! Channels are processed independently with a square structuring element.
//! Neighbours outside the image are ignored, so borders never bleed in a
//! constant value.

use image::RgbImage;

#[derive(Debug, Clone, Copy)]
enum Extreme {
    Max,
    Min,
}

impl Extreme {
    #[inline]
    fn pick(self, a: u8, b: u8) -> u8 {
        match self {
            Extreme::Max => a.max(b),
            Extreme::Min => a.min(b),
        }
    }
}

/// Dilation (per-channel local maximum) with a `kernel` x `kernel` square.
pub fn dilate(image: &RgbImage, kernel: u32) -> RgbImage {
    rank_filter(image, kernel, Extreme::Max)
}

/// Erosion (per-channel local minimum) with a `kernel` x `kernel` square.
pub fn erode(image: &RgbImage, kernel: u32) -> RgbImage {
    rank_filter(image, kernel, Extreme::Min)
}

/// Morphological closing: dilation followed by erosion.
///
/// Fills dark specks smaller than the structuring element while leaving
/// larger structures in place. A kernel of 0 or 1 returns the input.
pub fn close(image: &RgbImage, kernel: u32) -> RgbImage {
    if kernel <= 1 {
        return image.clone();
    }
    erode(&dilate(image, kernel), kernel)
}

/// A square element is separable: run a 1-D pass along rows, then columns.
fn rank_filter(image: &RgbImage, kernel: u32, extreme: Extreme) -> RgbImage {
    if kernel <= 1 {
        return image.clone();
    }
    let (width, height) = image.dimensions();
    let radius = (kernel / 2) as i64;

    let horizontal = pass(image.as_raw(), width, height, radius, extreme, true);
    let vertical = pass(&horizontal, width, height, radius, extreme, false);

    RgbImage::from_raw(width, height, vertical)
        .unwrap_or_else(|| RgbImage::new(width, height))
}

fn pass(
    src: &[u8],
    width: u32,
    height: u32,
    radius: i64,
    extreme: Extreme,
    horizontal: bool,
) -> Vec<u8> {
    let (w, h) = (width as i64, height as i64);
    let mut out = vec![0u8; src.len()];

    for y in 0..h {
        for x in 0..w {
            let dst = ((y * w + x) * 3) as usize;
            for c in 0..3 {
                let mut acc = src[dst + c];
                for offset in -radius..=radius {
                    let (nx, ny) = if horizontal {
                        (x + offset, y)
                    } else {
                        (x, y + offset)
                    };
                    if nx < 0 || ny < 0 || nx >= w || ny >= h {
                        continue;
                    }
                    let idx = ((ny * w + nx) * 3) as usize + c;
                    acc = extreme.pick(acc, src[idx]);
                }
                out[dst + c] = acc;
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn test_close_fills_isolated_dark_pixel() {
        let mut image = RgbImage::from_pixel(9, 9, Rgb([180, 120, 90]));
        image.put_pixel(4, 4, Rgb([0, 0, 0]));

        let closed = close(&image, 3);

        assert_eq!(closed.get_pixel(4, 4), &Rgb([180, 120, 90]));
    }

    #[test]
    fn test_close_keeps_uniform_image() {
        let image = RgbImage::from_pixel(5, 5, Rgb([42, 43, 44]));
        assert_eq!(close(&image, 3), image);
    }

    #[test]
    fn test_close_preserves_large_dark_region() {
        // A 5x5 dark square survives a 3x3 closing at its centre
        let mut image = RgbImage::from_pixel(11, 11, Rgb([200, 200, 200]));
        for y in 3..8 {
            for x in 3..8 {
                image.put_pixel(x, y, Rgb([10, 10, 10]));
            }
        }

        let closed = close(&image, 3);

        assert_eq!(closed.get_pixel(5, 5), &Rgb([10, 10, 10]));
        assert_eq!(closed.get_pixel(0, 0), &Rgb([200, 200, 200]));
    }

    #[test]
    fn test_dilate_and_erode_are_per_channel() {
        let mut image = RgbImage::from_pixel(3, 3, Rgb([50, 50, 50]));
        image.put_pixel(1, 1, Rgb([255, 0, 50]));

        let dilated = dilate(&image, 3);
        let eroded = erode(&image, 3);

        assert_eq!(dilated.get_pixel(0, 0), &Rgb([255, 50, 50]));
        assert_eq!(eroded.get_pixel(2, 2), &Rgb([50, 0, 50]));
    }

    #[test]
    fn test_dilate_ignores_out_of_bounds() {
        // Corner pixel only sees its in-image neighbours
        let mut image = RgbImage::from_pixel(4, 4, Rgb([10, 10, 10]));
        image.put_pixel(3, 3, Rgb([90, 90, 90]));

        let dilated = dilate(&image, 3);

        assert_eq!(dilated.get_pixel(0, 0), &Rgb([10, 10, 10]));
        assert_eq!(dilated.get_pixel(2, 2), &Rgb([90, 90, 90]));
    }

    #[test]
    fn test_unit_kernel_is_identity() {
        let mut image = RgbImage::from_pixel(3, 3, Rgb([1, 2, 3]));
        image.put_pixel(0, 0, Rgb([9, 9, 9]));
        assert_eq!(close(&image, 1), image);
        assert_eq!(dilate(&image, 0), image);
    }
}
