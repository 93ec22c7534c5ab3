//! Error types for the analysis pipeline.

use std::path::PathBuf;

use thiserror::Error;

/// Failure to turn an input file into a usable RGB buffer.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("failed to open image {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode image {path}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("image {path} has zero dimensions ({width}x{height})")]
    Empty {
        path: PathBuf,
        width: u32,
        height: u32,
    },
}

/// Failure to persist a generated image.
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("cannot determine output format for {path}")]
    UnsupportedFormat { path: PathBuf },
    #[error("failed to encode image for {path}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("failed to write image {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Either side of a read-transform-write operation.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    Encode(#[from] EncodeError),
}

/// Error from a full two-phase analysis, tagged with the phase that failed.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("IHC generation failed: {0}")]
    Transform(#[source] PipelineError),
    #[error("severity prediction failed: {0}")]
    Score(#[source] DecodeError),
    #[error("failed to prepare output directory {path}: {source}")]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, PipelineError>;
