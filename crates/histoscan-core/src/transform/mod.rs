//! Stain transform
//!
//! Maps an H&E image to a synthetic IHC-looking image with a fixed chain of
//! filters: canonical resize, HSV hue/saturation shift, additive Gaussian
//! noise and one morphological closing pass.


use std::path::{Path, PathBuf};

use image::RgbImage;
use rand::{Rng, RngCore};

use crate::color::{hsv_to_rgb, rgb_to_hsv, HUE_MAX};
use crate::config::TransformSettings;
use crate::decoders::{decode_image, resize_to};
use crate::error::Result;
use crate::exporters::export_image;
use crate::{morphology, noise};

/// The stain transform component. Stateless apart from its settings.
#[derive(Debug, Clone, Default)]
pub struct StainTransform {
    settings: TransformSettings,
}

impl StainTransform {
    pub fn new(settings: TransformSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &TransformSettings {
        &self.settings
    }

    /// Canonical output size (width, height)
    pub fn canonical_size(&self) -> (u32, u32) {
        let [w, h] = self.settings.canonical_size;
        (w, h)
    }

    /// Transform `input` and write the result to `output`.
    ///
    /// Noise is drawn from a generator seeded with `settings.seed` when set,
    /// otherwise from the thread RNG. Returns the output path.
    pub fn transform<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input: P,
        output: Q,
    ) -> Result<PathBuf> {
        let mut thread_rng;
        let mut seeded;
        let rng: &mut dyn RngCore = match self.settings.seed {
            Some(seed) => {
                seeded = noise::seeded_rng(seed);
                &mut seeded
            }
            None => {
                thread_rng = rand::rng();
                &mut thread_rng
            }
        };
        self.transform_with_rng(input, output, rng)
    }

    /// Transform `input` into `output`, drawing noise from `rng`.
    ///
    /// The input is fully decoded before anything is written, so a decode
    /// failure leaves any existing `output` untouched.
    pub fn transform_with_rng<P, Q, R>(&self, input: P, output: Q, rng: &mut R) -> Result<PathBuf>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
        R: Rng + ?Sized,
    {
        let input = input.as_ref();
        let output = output.as_ref();

        log::info!("Converting {} to virtual IHC", input.display());

        let decoded = decode_image(input)?;
        let generated = self.apply(&decoded.pixels, rng);
        export_image(&generated, output)?;

        log::info!("Virtual IHC saved to {}", output.display());
        Ok(output.to_path_buf())
    }

    /// Run the in-memory filter chain on an already decoded image.
    pub fn apply<R: Rng + ?Sized>(&self, image: &RgbImage, rng: &mut R) -> RgbImage {
        let (width, height) = self.canonical_size();

        let mut working = resize_to(image, width, height);
        shift_hue_saturation(
            &mut working,
            self.settings.hue_shift,
            self.settings.saturation_scale,
        );
        noise::add_gaussian_noise(&mut working, self.settings.noise_sigma, rng);
        morphology::close(&working, self.settings.closing_kernel)
    }
}

/// Shift hue and scale saturation of every pixel in the 8-bit HSV space.
///
/// Hue is clamped at [`HUE_MAX`] rather than wrapped. Scaled saturation is
/// truncated to an integer and clamped to 255.
pub fn shift_hue_saturation(image: &mut RgbImage, hue_shift: u8, saturation_scale: f32) {
    for pixel in image.pixels_mut() {
        let [r, g, b] = pixel.0;
        let mut hsv = rgb_to_hsv(r, g, b);

        hsv.h = (hsv.h as u16 + hue_shift as u16).min(HUE_MAX as u16) as u8;
        hsv.s = (hsv.s as f32 * saturation_scale).clamp(0.0, 255.0) as u8;

        pixel.0 = hsv_to_rgb(hsv);
    }
}
