//! Tests for image decoders

use super::*;
use image::{GrayImage, Luma, Rgb};
use std::fs;
use tempfile::tempdir;

#[test]
fn test_decode_png_rgb() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("sample.png");
    RgbImage::from_pixel(12, 7, Rgb([10, 20, 30]))
        .save(&path)
        .unwrap();

    let decoded = decode_image(&path).expect("PNG should decode");

    assert_eq!(decoded.width, 12);
    assert_eq!(decoded.height, 7);
    assert_eq!(decoded.source_format, Some(ImageFormat::Png));
    assert!(!decoded.source_is_grayscale);
    assert_eq!(decoded.pixels.get_pixel(3, 3), &Rgb([10, 20, 30]));
}

#[test]
fn test_decode_grayscale_expands_to_rgb() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("gray.tiff");
    GrayImage::from_pixel(4, 4, Luma([77])).save(&path).unwrap();

    let decoded = decode_image(&path).unwrap();

    assert!(decoded.source_is_grayscale);
    assert_eq!(decoded.pixels.as_raw().len(), 4 * 4 * 3);
    assert_eq!(decoded.pixels.get_pixel(0, 0), &Rgb([77, 77, 77]));
}

#[test]
fn test_decode_ignores_misleading_extension() {
    let dir = tempdir().unwrap();
    let png_path = dir.path().join("real.png");
    RgbImage::from_pixel(2, 2, Rgb([1, 2, 3]))
        .save(&png_path)
        .unwrap();
    let renamed = dir.path().join("looks_like.jpg");
    fs::rename(&png_path, &renamed).unwrap();

    let decoded = decode_image(&renamed).unwrap();
    assert_eq!(decoded.source_format, Some(ImageFormat::Png));
}

#[test]
fn test_decode_empty_file_fails() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("empty.png");
    fs::write(&path, b"").unwrap();

    let err = decode_image(&path).unwrap_err();
    assert!(matches!(err, DecodeError::Image { .. }), "got {:?}", err);
}

#[test]
fn test_decode_garbage_bytes_fails() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("notes.png");
    fs::write(&path, b"this is not an image at all").unwrap();

    assert!(decode_image(&path).is_err());
}

#[test]
fn test_decode_missing_file_is_io_error() {
    let err = decode_image("/nonexistent/dir/slide.png").unwrap_err();
    assert!(matches!(err, DecodeError::Io { .. }));
    assert!(err.to_string().contains("/nonexistent/dir/slide.png"));
}

#[test]
fn test_resize_to_canonical() {
    let image = RgbImage::from_pixel(40, 10, Rgb([200, 100, 50]));
    let resized = resize_to(&image, 16, 16);

    assert_eq!(resized.dimensions(), (16, 16));
    // Uniform input stays uniform under bilinear filtering
    assert_eq!(resized.get_pixel(8, 8), &Rgb([200, 100, 50]));
}

#[test]
fn test_normalize_rgb_range() {
    let mut image = RgbImage::new(2, 1);
    image.put_pixel(0, 0, Rgb([0, 255, 51]));
    image.put_pixel(1, 0, Rgb([255, 0, 102]));

    let data = normalize_rgb(&image);

    assert_eq!(data.len(), 6);
    assert!((data[0] - 0.0).abs() < 1e-6);
    assert!((data[1] - 1.0).abs() < 1e-6);
    assert!((data[2] - 0.2).abs() < 1e-6);
    assert!((data[5] - 0.4).abs() < 1e-6);
}
