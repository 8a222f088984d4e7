//! Error taxonomy
//!
//! One enum per failure domain. Row-level errors (`ValidationError`,
//! `FeatureError`) never abort a batch; run-level errors (`TrainingError`)
//! leave the previously published artifact in service.

use thiserror::Error;

/// Bad input shape or range. Recovered locally by rejecting the record.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("field {field} out of range: {value}")]
    OutOfRange { field: &'static str, value: f64 },
}

/// Physically impossible derived quantity. Row-level skip with logged cause.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FeatureError {
    #[error("invalid physics: {0}")]
    InvalidPhysics(&'static str),
}

/// Fatal to a training run; the operator retries with better data.
#[derive(Debug, Error)]
pub enum TrainingError {
    #[error("no usable rows after feature selection")]
    EmptyDataset,

    #[error("no viable model: {0}")]
    NoViableModel(String),

    #[error(transparent)]
    Artifact(#[from] ArtifactError),
}

/// Surfaced to the prediction caller as a typed failure.
#[derive(Debug, Error)]
pub enum PredictError {
    #[error("model/feature schema mismatch: {0}")]
    SchemaMismatch(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Feature(#[from] FeatureError),

    #[error("no model artifact loaded")]
    NoModelLoaded,
}

/// Artifact persistence and integrity failures.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("checksum mismatch for {file}")]
    ChecksumMismatch { file: String },

    #[error("no published artifact version found")]
    NoCurrentVersion,

    #[error("artifact layout incompatible: {0}")]
    LayoutMismatch(String),
}
