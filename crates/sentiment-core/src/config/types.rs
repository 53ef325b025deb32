//! Configuration type definitions for the serving and monitoring stack
//!
//! Every section is optional in YAML. A completely empty file yields a working
//! local setup: the API on port 8000, artifacts under `models/`, the prediction log
//! under `data/`, and the processed training split as drift reference.

use crate::drift::DriftThresholds;
use crate::errors::MonitorError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SentimentConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub model: ModelSettings,
    #[serde(default)]
    pub storage: StorageSettings,
    #[serde(default)]
    pub drift: DriftSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    #[serde(default = "default_true")]
    pub enable_cors: bool,
    /// Allowed origins; `None` allows any origin
    #[serde(default)]
    pub cors_origins: Option<Vec<String>>,
    #[serde(default = "default_max_text_length")]
    pub max_text_length: usize,
    #[serde(default = "default_true")]
    pub log_predictions: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelSettings {
    #[serde(default = "default_model_dir")]
    pub dir: PathBuf,
    /// Evaluation metrics written by the training pipeline, relative to the working directory
    #[serde(default = "default_metrics_path")]
    pub metrics_path: PathBuf,
    #[serde(default = "default_model_version")]
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageSettings {
    #[serde(default = "default_database_path")]
    pub database_path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriftSettings {
    #[serde(default = "default_reference_path")]
    pub reference_path: PathBuf,
    #[serde(default = "default_sample_size")]
    pub sample_size: usize,
    #[serde(default = "default_seed")]
    pub seed: u64,
    #[serde(default = "default_report_path")]
    pub report_path: PathBuf,
    #[serde(default)]
    pub thresholds: DriftThresholds,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_bind_addr() -> String {
    "0.0.0.0:8000".to_string()
}

fn default_true() -> bool {
    true
}

fn default_max_text_length() -> usize {
    5000
}

fn default_model_dir() -> PathBuf {
    PathBuf::from("models")
}

fn default_metrics_path() -> PathBuf {
    PathBuf::from("metrics.json")
}

fn default_model_version() -> String {
    "v1.0.0".to_string()
}

fn default_database_path() -> PathBuf {
    PathBuf::from("data/predictions.db")
}

fn default_reference_path() -> PathBuf {
    PathBuf::from("data/processed/train.csv")
}

fn default_sample_size() -> usize {
    1000
}

fn default_seed() -> u64 {
    42
}

fn default_report_path() -> PathBuf {
    PathBuf::from("data/drift_report.json")
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            enable_cors: true,
            cors_origins: None,
            max_text_length: default_max_text_length(),
            log_predictions: true,
        }
    }
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            dir: default_model_dir(),
            metrics_path: default_metrics_path(),
            version: default_model_version(),
        }
    }
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
        }
    }
}

impl Default for DriftSettings {
    fn default() -> Self {
        Self {
            reference_path: default_reference_path(),
            sample_size: default_sample_size(),
            seed: default_seed(),
            report_path: default_report_path(),
            thresholds: DriftThresholds::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl SentimentConfig {
    pub fn validate(&self) -> Result<(), MonitorError> {
        if self.server.bind_addr.trim().is_empty() {
            return Err(MonitorError::ConfigError("Server bind_addr cannot be empty".to_string()));
        }

        if self.server.max_text_length == 0 {
            return Err(MonitorError::ConfigError(
                "Server max_text_length must be greater than 0".to_string(),
            ));
        }

        if self.model.dir.as_os_str().is_empty() {
            return Err(MonitorError::ConfigError("Model directory cannot be empty".to_string()));
        }

        if self.storage.database_path.as_os_str().is_empty() {
            return Err(MonitorError::ConfigError("Database path cannot be empty".to_string()));
        }

        if self.drift.reference_path.as_os_str().is_empty() {
            return Err(MonitorError::ConfigError(
                "Drift reference_path cannot be empty".to_string(),
            ));
        }

        if self.drift.sample_size == 0 {
            return Err(MonitorError::ConfigError(
                "Drift sample_size must be greater than 0".to_string(),
            ));
        }

        self.drift.thresholds.validate()?;

        Ok(())
    }
}
