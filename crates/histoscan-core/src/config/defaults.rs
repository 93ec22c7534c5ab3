//! Default component settings and their validation/sanitization.

use serde::{Deserialize, Serialize};

/// Settings for the stain transform phase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformSettings {
    /// Canonical output size (width, height)
    pub canonical_size: [u32; 2],
    /// Hue shift in 8-bit hue units (half-degrees), clamped at 179
    pub hue_shift: u8,
    /// Saturation multiplier, result clamped to 255
    pub saturation_scale: f32,
    /// Standard deviation of the additive Gaussian noise, in 8-bit units
    pub noise_sigma: f32,
    /// Side of the square closing element (odd)
    pub closing_kernel: u32,
    /// Fixed noise seed; `None` draws from the thread RNG
    pub seed: Option<u64>,
}

impl Default for TransformSettings {
    fn default() -> Self {
        Self {
            canonical_size: [256, 256],
            hue_shift: 10,
            saturation_scale: 1.3,
            noise_sigma: 5.0,
            closing_kernel: 3,
            seed: None,
        }
    }
}

impl TransformSettings {
    pub(crate) fn sanitize(&mut self, warnings: &mut Vec<String>) {
        sanitize_size(&mut self.canonical_size, "transform", warnings);

        if self.hue_shift > crate::color::HUE_MAX {
            warnings.push(format!(
                "transform.hue_shift {} exceeds {}; clamping",
                self.hue_shift,
                crate::color::HUE_MAX
            ));
            self.hue_shift = crate::color::HUE_MAX;
        }
        if !self.saturation_scale.is_finite() || self.saturation_scale < 0.0 {
            warnings.push(format!(
                "transform.saturation_scale {} is invalid; using 1.3",
                self.saturation_scale
            ));
            self.saturation_scale = 1.3;
        }
        if !self.noise_sigma.is_finite() || self.noise_sigma < 0.0 {
            warnings.push(format!(
                "transform.noise_sigma {} is invalid; disabling noise",
                self.noise_sigma
            ));
            self.noise_sigma = 0.0;
        }
        if self.closing_kernel == 0 {
            self.closing_kernel = 1;
        }
        if self.closing_kernel % 2 == 0 {
            warnings.push(format!(
                "transform.closing_kernel {} is even; using {}",
                self.closing_kernel,
                self.closing_kernel + 1
            ));
            self.closing_kernel += 1;
        }
    }
}

/// Settings for the severity scoring phase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScorerSettings {
    /// Canonical analysis size (width, height)
    pub canonical_size: [u32; 2],
    /// Inclusive range the synthetic total cell count is drawn from
    pub total_cell_range: [u32; 2],
    /// Fixed seed for the synthetic draws; `None` draws from the thread RNG
    pub seed: Option<u64>,
}

impl Default for ScorerSettings {
    fn default() -> Self {
        Self {
            canonical_size: [224, 224],
            total_cell_range: [800, 1500],
            seed: None,
        }
    }
}

impl ScorerSettings {
    pub(crate) fn sanitize(&mut self, warnings: &mut Vec<String>) {
        sanitize_size(&mut self.canonical_size, "scorer", warnings);

        let [lo, hi] = self.total_cell_range;
        if lo > hi {
            warnings.push(format!(
                "scorer.total_cell_range [{}, {}] is reversed; swapping",
                lo, hi
            ));
            self.total_cell_range = [hi, lo];
        }
    }
}

fn sanitize_size(size: &mut [u32; 2], section: &str, warnings: &mut Vec<String>) {
    for (axis, value) in ["width", "height"].iter().zip(size.iter_mut()) {
        if *value == 0 {
            warnings.push(format!(
                "{}.canonical_size {} is 0; using 1",
                section, axis
            ));
            *value = 1;
        }
    }
}
