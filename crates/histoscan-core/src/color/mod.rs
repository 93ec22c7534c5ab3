//! Color conversions
//!
//! Provides 8-bit RGB <-> HSV conversion and BT.601 luma.

mod hsv;


pub use hsv::{hsv_to_rgb, rgb_to_hsv, Hsv, HUE_MAX};

/// BT.601 luma weights, matching the usual RGB to gray conversion.
const LUMA_WEIGHTS: [f32; 3] = [0.299, 0.587, 0.114];

/// Convert an 8-bit RGB pixel to 8-bit luma (rounded).
#[inline]
pub fn luma(rgb: [u8; 3]) -> u8 {
    let y = LUMA_WEIGHTS[0] * rgb[0] as f32
        + LUMA_WEIGHTS[1] * rgb[1] as f32
        + LUMA_WEIGHTS[2] * rgb[2] as f32;
    y.round().clamp(0.0, 255.0) as u8
}
