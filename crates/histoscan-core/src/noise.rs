//! Random sources and additive noise.
//!
//! Every random draw in the pipeline goes through a caller-supplied
//! [`rand::Rng`]. [`seeded_rng`] builds the reproducible generator used when a
//! seed is configured.

use image::RgbImage;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Generator used for seeded, reproducible runs.
pub type SeededRng = ChaCha8Rng;

/// Build the reproducible generator for `seed`.
pub fn seeded_rng(seed: u64) -> SeededRng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Mix a base seed with a job index so batch items get independent streams.
pub fn job_seed(base: u64, index: u64) -> u64 {
    base ^ index.wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

/// Derive the seed of an independent sub-stream of `seed` (SplitMix64 finalizer).
pub fn stream_seed(seed: u64, stream: u64) -> u64 {
    let mut z = seed.wrapping_add(stream.wrapping_mul(0x9E37_79B9_7F4A_7C15));
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Draw one sample from N(0, 1) using the Box-Muller transform.
pub fn standard_normal<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    // 1 - [0, 1) keeps the logarithm finite
    let u1: f64 = 1.0 - rng.random::<f64>();
    let u2: f64 = rng.random::<f64>();
    (-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos()
}

/// Add zero-mean Gaussian noise to every channel of every pixel.
///
/// Each sample is scaled by `sigma` (8-bit units) and truncated toward zero
/// before being added; the sum is clamped to 0-255. A non-positive `sigma`
/// leaves the image untouched and draws nothing from `rng`.
pub fn add_gaussian_noise<R: Rng + ?Sized>(image: &mut RgbImage, sigma: f32, rng: &mut R) {
    if sigma <= 0.0 {
        return;
    }
    let sigma = sigma as f64;
    for value in image.iter_mut() {
        let noise = (standard_normal(rng) * sigma) as i16;
        *value = (*value as i16 + noise).clamp(0, 255) as u8;
    }
}
