//! Severity scoring
//!
//! Rule-based stand-in for a learned classifier. Two whole-image statistics
//! (mean and standard deviation of normalized intensity) pick a status band
//! through a fixed threshold policy; the numeric values inside the band are
//! then drawn from a caller-supplied random source.
//!
//! The threshold policy ([`classify`], [`grade_for`]) is pure and
//! independent from the random draws ([`draw_result`]).

mod thresholds;

#[cfg(test)]
mod tests;

pub use thresholds::{
    classify, grade_for, StatusBand, EQUIVOCAL_BAND, EQUIVOCAL_MEAN_THRESHOLD, GRADE_2_THRESHOLD,
    GRADE_3_THRESHOLD, NEGATIVE_BAND, POSITIVE_BAND, POSITIVE_MEAN_THRESHOLD,
    POSITIVE_STD_THRESHOLD,
};

use std::path::Path;

use image::RgbImage;
use rand::{Rng, RngCore};
use serde::Serialize;

use crate::config::ScorerSettings;
use crate::decoders::{decode_image, resize_to};
use crate::error::DecodeError;
use crate::models::SeverityResult;
use crate::noise;
use crate::stats::{image_statistics, texture_features, IntensityStatistics, TextureFeatures};

/// Jitter applied to the biomarker percentage to derive the stained area.
const STAINED_AREA_JITTER: (f64, f64) = (0.8, 1.2);

/// Scoring output plus the measurements it was derived from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assessment {
    pub result: SeverityResult,
    pub statistics: IntensityStatistics,
    pub texture: TextureFeatures,
}

/// The severity scorer component. Stateless apart from its settings.
#[derive(Debug, Clone, Default)]
pub struct SeverityScorer {
    settings: ScorerSettings,
}

impl SeverityScorer {
    pub fn new(settings: ScorerSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &ScorerSettings {
        &self.settings
    }

    /// Canonical analysis size (width, height)
    pub fn canonical_size(&self) -> (u32, u32) {
        let [w, h] = self.settings.canonical_size;
        (w, h)
    }

    /// Score the image at `input`.
    ///
    /// Draws come from a generator seeded with `settings.seed` when set,
    /// otherwise from the thread RNG.
    pub fn score<P: AsRef<Path>>(&self, input: P) -> Result<SeverityResult, DecodeError> {
        self.assess(input).map(|assessment| assessment.result)
    }

    /// Score the image at `input` with an explicit random source.
    pub fn score_with_rng<P, R>(&self, input: P, rng: &mut R) -> Result<SeverityResult, DecodeError>
    where
        P: AsRef<Path>,
        R: Rng + ?Sized,
    {
        self.assess_with_rng(input, rng)
            .map(|assessment| assessment.result)
    }

    /// Like [`score`](Self::score) but also returns the measured statistics.
    pub fn assess<P: AsRef<Path>>(&self, input: P) -> Result<Assessment, DecodeError> {
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
        self.assess_with_rng(input, rng)
    }

    /// Like [`score_with_rng`](Self::score_with_rng) but also returns the
    /// measured statistics.
    pub fn assess_with_rng<P, R>(&self, input: P, rng: &mut R) -> Result<Assessment, DecodeError>
    where
        P: AsRef<Path>,
        R: Rng + ?Sized,
    {
        let input = input.as_ref();
        log::info!("Analyzing cancer severity from {}", input.display());

        let decoded = decode_image(input)?;
        let assessment = self.assess_image(&decoded.pixels, rng);

        log::info!(
            "Cancer analysis completed: HER2 {} ({})",
            assessment.result.status,
            assessment.result.grade
        );
        Ok(assessment)
    }

    /// Score an in-memory image.
    pub fn score_image<R: Rng + ?Sized>(&self, image: &RgbImage, rng: &mut R) -> SeverityResult {
        self.assess_image(image, rng).result
    }

    /// Score an in-memory image, keeping the measurements.
    pub fn assess_image<R: Rng + ?Sized>(&self, image: &RgbImage, rng: &mut R) -> Assessment {
        let (width, height) = self.canonical_size();
        let working = resize_to(image, width, height);

        let statistics = image_statistics(&working);
        let texture = texture_features(&working);
        log::debug!(
            "Scoring statistics: mean={:.4}, std={:.4}, entropy={:.3}",
            statistics.mean,
            statistics.std_dev,
            texture.entropy
        );

        let band = classify(&statistics);
        let result = draw_result(band, self.settings.total_cell_range, rng);

        Assessment {
            result,
            statistics,
            texture,
        }
    }
}

/// Draw the numeric fields of a result inside `band`.
///
/// `total_cell_range` is inclusive on both ends.
pub fn draw_result<R: Rng + ?Sized>(
    band: &StatusBand,
    total_cell_range: [u32; 2],
    rng: &mut R,
) -> SeverityResult {
    let confidence = uniform(rng, band.confidence);
    let biomarker_percentage = uniform(rng, band.biomarker_percentage);
    let grade = grade_for(biomarker_percentage);

    let [lo, hi] = total_cell_range;
    let total_cells = rng.random_range(lo.min(hi)..=hi.max(lo));
    let positive_cells = ((total_cells as f64 * (biomarker_percentage / 100.0)).floor() as u32)
        .min(total_cells);

    let stained_area = (biomarker_percentage * uniform(rng, STAINED_AREA_JITTER)).min(100.0);

    SeverityResult {
        status: band.status,
        confidence,
        grade,
        biomarker_percentage,
        intensity: band.intensity,
        positive_cells,
        total_cells,
        stained_area,
    }
}

#[inline]
fn uniform<R: Rng + ?Sized>(rng: &mut R, (lo, hi): (f64, f64)) -> f64 {
    if hi <= lo {
        return lo;
    }
    rng.random_range(lo..hi)
}
