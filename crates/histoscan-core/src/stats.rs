//! Image statistics used by the severity scorer and the report.

use image::RgbImage;
use serde::{Deserialize, Serialize};

use crate::color::luma;

/// Whole-buffer intensity statistics over normalized (0.0-1.0) values
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntensityStatistics {
    pub mean: f64,
    /// Population standard deviation
    pub std_dev: f64,
}

/// Texture measures on the 8-bit luma image
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextureFeatures {
    /// Mean luma (0-255)
    pub mean_intensity: f64,
    /// Standard deviation of luma (0-255)
    pub std_intensity: f64,
    /// Shannon entropy of the 256-bin luma histogram, in bits
    pub entropy: f64,
    /// Contrast, measured as the luma standard deviation
    pub contrast: f64,
}

/// Mean and population standard deviation of a slice of normalized values.
///
/// Accumulates in f64. An empty slice yields zeros.
pub fn intensity_statistics(data: &[f32]) -> IntensityStatistics {
    if data.is_empty() {
        return IntensityStatistics {
            mean: 0.0,
            std_dev: 0.0,
        };
    }

    let n = data.len() as f64;
    let mean = data.iter().map(|&v| v as f64).sum::<f64>() / n;
    let variance = data
        .iter()
        .map(|&v| (v as f64 - mean).powi(2))
        .sum::<f64>()
        / n;

    IntensityStatistics {
        mean,
        std_dev: variance.sqrt(),
    }
}

/// Statistics over every channel value of an RGB8 image, normalized by 255
pub fn image_statistics(image: &RgbImage) -> IntensityStatistics {
    intensity_statistics(&crate::decoders::normalize_rgb(image))
}

/// 256-bin histogram of the luma channel
pub fn luma_histogram(image: &RgbImage) -> [u32; 256] {
    let mut bins = [0u32; 256];
    for pixel in image.pixels() {
        bins[luma(pixel.0) as usize] += 1;
    }
    bins
}

/// Shannon entropy (bits) of a histogram
pub fn histogram_entropy(bins: &[u32]) -> f64 {
    let total: u64 = bins.iter().map(|&b| b as u64).sum();
    if total == 0 {
        return 0.0;
    }
    let total = total as f64;
    bins.iter()
        .filter(|&&b| b > 0)
        .map(|&b| {
            let p = b as f64 / total;
            -p * p.log2()
        })
        .sum()
}

/// Compute texture features of an RGB8 image in a single histogram pass
pub fn texture_features(image: &RgbImage) -> TextureFeatures {
    let bins = luma_histogram(image);
    let total: u64 = bins.iter().map(|&b| b as u64).sum();

    if total == 0 {
        return TextureFeatures {
            mean_intensity: 0.0,
            std_intensity: 0.0,
            entropy: 0.0,
            contrast: 0.0,
        };
    }

    let n = total as f64;
    let mean = bins
        .iter()
        .enumerate()
        .map(|(level, &count)| level as f64 * count as f64)
        .sum::<f64>()
        / n;
    let variance = bins
        .iter()
        .enumerate()
        .map(|(level, &count)| (level as f64 - mean).powi(2) * count as f64)
        .sum::<f64>()
        / n;
    let std = variance.sqrt();

    TextureFeatures {
        mean_intensity: mean,
        std_intensity: std,
        entropy: histogram_entropy(&bins),
        contrast: std,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn test_intensity_statistics_uniform() {
        let stats = intensity_statistics(&[0.5; 300]);
        assert!((stats.mean - 0.5).abs() < 1e-9);
        assert!(stats.std_dev.abs() < 1e-9);
    }

    #[test]
    fn test_intensity_statistics_two_levels() {
        // Half zeros, half ones: mean 0.5, population std 0.5
        let mut data = vec![0.0f32; 50];
        data.extend(vec![1.0f32; 50]);
        let stats = intensity_statistics(&data);
        assert!((stats.mean - 0.5).abs() < 1e-9);
        assert!((stats.std_dev - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_intensity_statistics_empty() {
        let stats = intensity_statistics(&[]);
        assert_eq!(stats.mean, 0.0);
        assert_eq!(stats.std_dev, 0.0);
    }

    #[test]
    fn test_image_statistics_mid_gray() {
        let image = RgbImage::from_pixel(8, 8, Rgb([128, 128, 128]));
        let stats = image_statistics(&image);
        assert!((stats.mean - 128.0 / 255.0).abs() < 1e-6);
        assert!(stats.std_dev < 1e-6);
    }

    #[test]
    fn test_entropy_uniform_image_is_zero() {
        let image = RgbImage::from_pixel(10, 10, Rgb([90, 90, 90]));
        let features = texture_features(&image);
        assert!(features.entropy.abs() < 1e-12);
        assert!((features.mean_intensity - 90.0).abs() < 1e-9);
        assert!(features.contrast.abs() < 1e-12);
    }

    #[test]
    fn test_entropy_two_equal_levels_is_one_bit() {
        let mut image = RgbImage::from_pixel(10, 10, Rgb([0, 0, 0]));
        for x in 0..5 {
            for y in 0..10 {
                image.put_pixel(x, y, Rgb([255, 255, 255]));
            }
        }
        let features = texture_features(&image);
        assert!((features.entropy - 1.0).abs() < 1e-12);
        assert!((features.mean_intensity - 127.5).abs() < 1e-9);
        assert!((features.std_intensity - 127.5).abs() < 1e-9);
        assert_eq!(features.contrast, features.std_intensity);
    }

    #[test]
    fn test_histogram_entropy_empty() {
        assert_eq!(histogram_entropy(&[0; 256]), 0.0);
    }
}
