//! Core library for serving a binary sentiment classifier and monitoring it in production.
//!
//! The crate covers the whole path from a scored review to a drift verdict:
//!
//! - **Model inference**: TF-IDF vectorization and logistic regression scoring over
//!   exported artifacts
//! - **Prediction log**: append-only SQLite record of every inference
//! - **Analytics**: aggregate statistics and time/confidence breakdowns of the log
//! - **Export**: CSV dumps of the log and its statistics
//! - **Drift detection**: heuristic comparison of training reference data against
//!   logged production traffic
//! - **Configuration system**: YAML configuration with environment overrides

pub mod analytics;
pub mod config;
pub mod drift;
pub mod errors;
pub mod export;
pub mod model;
pub mod recorder;
pub mod store;

pub use analytics::PerformanceSummary;
pub use config::*;
pub use drift::{DriftLevel, DriftReport, DriftThresholds};
pub use errors::MonitorError;
pub use model::{ModelLoader, Prediction, Sentiment, SentimentModel};
pub use recorder::log_prediction;
pub use store::{NewPrediction, PredictionLog, PredictionRecord, PredictionStats};
