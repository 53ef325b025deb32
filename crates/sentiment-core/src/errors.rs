//! Error types for serving and monitoring failures
//!
//! Each subsystem (prediction log, model artifacts, drift detection) has its own
//! error enum so callers can react to the failure they actually care about. The
//! top-level [`MonitorError`] folds all of them together for code paths that span
//! several subsystems, such as the CLI and configuration loading.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MonitorError {
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Prediction log error: {0}")]
    Store(#[from] StoreError),
    #[error("Model error: {0}")]
    Model(#[from] ModelError),
    #[error("Drift detection error: {0}")]
    Drift(#[from] DriftError),
    #[error("CSV export error: {0}")]
    Csv(#[from] csv::Error),
    #[error("I/O error: {0}")]
    IoError(String),
}

impl From<std::io::Error> for MonitorError {
    fn from(err: std::io::Error) -> Self {
        MonitorError::IoError(err.to_string())
    }
}

// Prediction log
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("I/O error while preparing database at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Prediction log connection lock was poisoned")]
    LockPoisoned,
    #[error("Corrupt prediction record {id}: {message}")]
    CorruptRecord { id: i64, message: String },
}

// Model artifacts and inference
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Model artifact not found: {}", .0.display())]
    ArtifactMissing(PathBuf),
    #[error("Invalid model artifact {}: {message}", .path.display())]
    InvalidArtifact { path: PathBuf, message: String },
    #[error("Feature dimension mismatch: vectorizer produces {vectorizer}, classifier expects {classifier}")]
    DimensionMismatch { vectorizer: usize, classifier: usize },
    #[error("Unknown class label '{0}'")]
    UnknownClass(String),
}

// Drift detection
#[derive(Error, Debug)]
pub enum DriftError {
    #[error("Not enough data for drift comparison: {0}")]
    InsufficientData(String),
    #[error("Failed to read reference data from {}: {message}", .path.display())]
    Reference { path: PathBuf, message: String },
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Prediction log error: {0}")]
    Store(#[from] StoreError),
    #[error("Failed to write drift report: {0}")]
    Report(String),
}

impl From<serde_json::Error> for DriftError {
    fn from(err: serde_json::Error) -> Self {
        DriftError::Report(err.to_string())
    }
}
