//! Two-phase analysis pipeline
//!
//! Phase 1 runs the stain transform and writes the derived image into the
//! output directory. Phase 2 scores that file. The report is assembled from
//! both phases.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::Utc;
use rand::Rng;
use uuid::Uuid;

use crate::config::AnalysisConfig;
use crate::error::AnalysisError;
use crate::noise::stream_seed;
use crate::report::{DiagnosticReport, TechnicalContext};
use crate::scoring::{Assessment, SeverityScorer};
use crate::transform::StainTransform;

/// Suffix and extension of the derived image
const IHC_SUFFIX: &str = "_ihc.png";

/// Sub-stream of an override seed used by the scorer
const SCORER_STREAM: u64 = 1;

/// Transform and scorer wired together with a file hand-off.
#[derive(Debug, Clone, Default)]
pub struct AnalysisPipeline {
    transform: StainTransform,
    scorer: SeverityScorer,
}

impl AnalysisPipeline {
    pub fn new(transform: StainTransform, scorer: SeverityScorer) -> Self {
        Self { transform, scorer }
    }

    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self::new(
            StainTransform::new(config.transform.clone()),
            SeverityScorer::new(config.scorer.clone()),
        )
    }

    /// Override the seed of both components. `None` keeps the configured seeds.
    ///
    /// The transform uses `seed` itself and the scorer a derived sub-stream,
    /// so noise and score draws never share random words.
    pub fn with_seed(self, seed: Option<u64>) -> Self {
        let Some(seed) = seed else {
            return self;
        };
        let mut transform = self.transform.settings().clone();
        let mut scorer = self.scorer.settings().clone();
        transform.seed = Some(seed);
        scorer.seed = Some(stream_seed(seed, SCORER_STREAM));
        Self::new(StainTransform::new(transform), SeverityScorer::new(scorer))
    }

    pub fn transform(&self) -> &StainTransform {
        &self.transform
    }

    pub fn scorer(&self) -> &SeverityScorer {
        &self.scorer
    }

    /// Run both phases, each drawing from its component's configured seed
    /// (or the thread RNG when unseeded). The derived image is written to
    /// `<output_dir>/<stem>_ihc.png`.
    pub fn run<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input: P,
        output_dir: Q,
    ) -> Result<DiagnosticReport, AnalysisError> {
        let input = input.as_ref();
        self.run_to(input, ihc_output_path(input, output_dir.as_ref()))
    }

    /// Like [`run`](Self::run) but writes the derived image to an explicit
    /// `output` file. Its parent directory is created when missing.
    pub fn run_to<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input: P,
        output: Q,
    ) -> Result<DiagnosticReport, AnalysisError> {
        self.run_phases(input.as_ref(), output.as_ref(), |pipeline, src, dst| {
            let generated = pipeline
                .transform
                .transform(src, dst)
                .map_err(AnalysisError::Transform)?;
            let assessment = pipeline
                .scorer
                .assess(&generated)
                .map_err(AnalysisError::Score)?;
            Ok((generated, assessment))
        })
    }

    /// Run both phases drawing every random value from `rng`.
    pub fn run_with_rng<P, Q, R>(
        &self,
        input: P,
        output_dir: Q,
        rng: &mut R,
    ) -> Result<DiagnosticReport, AnalysisError>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
        R: Rng + ?Sized,
    {
        let input = input.as_ref();
        let output = ihc_output_path(input, output_dir.as_ref());
        self.run_phases(input, &output, |pipeline, src, dst| {
            let generated = pipeline
                .transform
                .transform_with_rng(src, dst, rng)
                .map_err(AnalysisError::Transform)?;
            let assessment = pipeline
                .scorer
                .assess_with_rng(&generated, rng)
                .map_err(AnalysisError::Score)?;
            Ok((generated, assessment))
        })
    }

    fn run_phases<F>(
        &self,
        input: &Path,
        output: &Path,
        phases: F,
    ) -> Result<DiagnosticReport, AnalysisError>
    where
        F: FnOnce(&Self, &Path, &Path) -> Result<(PathBuf, Assessment), AnalysisError>,
    {
        if let Some(output_dir) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(output_dir).map_err(|source| AnalysisError::OutputDir {
                path: output_dir.to_path_buf(),
                source,
            })?;
        }

        let session_id = Uuid::new_v4();
        let created_at = Utc::now();
        let started = Instant::now();

        log::info!(
            "Session {}: starting analysis of {}",
            session_id,
            input.display()
        );

        let (generated, assessment) = phases(self, input, output).inspect_err(|err| {
            log::error!("Session {} failed: {}", session_id, err);
        })?;

        let completed_at = Utc::now();
        let processing_seconds = started.elapsed().as_secs_f64();
        log::info!(
            "Session {}: completed in {:.2}s",
            session_id,
            processing_seconds
        );

        let context = TechnicalContext {
            processing_seconds,
            texture: assessment.texture,
            transform_size: self.transform.canonical_size(),
            scorer_size: self.scorer.canonical_size(),
        };

        Ok(DiagnosticReport::new(
            session_id,
            input.to_path_buf(),
            generated,
            created_at,
            completed_at,
            assessment.result,
            context,
        ))
    }
}

/// Path of the derived image for `input` inside `output_dir`: `<stem>_ihc.png`.
pub fn ihc_output_path(input: &Path, output_dir: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    output_dir.join(format!("{}{}", stem, IHC_SUFFIX))
}
