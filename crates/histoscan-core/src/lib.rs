//! Histoscan Core Library
//!
//! Virtual IHC generation from H&E histology images and rule-based HER2
//! severity scoring of the generated image.

pub mod color;
pub mod config;
pub mod decoders;
pub mod error;
pub mod exporters;
pub mod models;
pub mod morphology;
pub mod noise;
pub mod pipeline;
pub mod report;
pub mod scoring;
pub mod stats;
pub mod transform;

// Re-export commonly used types
pub use config::{AnalysisConfig, ScorerSettings, TransformSettings};
pub use error::{AnalysisError, DecodeError, EncodeError, PipelineError};
pub use models::{CancerGrade, Her2Status, SeverityResult, StainingIntensity};
pub use pipeline::AnalysisPipeline;
pub use report::DiagnosticReport;
pub use scoring::{Assessment, SeverityScorer};
pub use transform::StainTransform;
