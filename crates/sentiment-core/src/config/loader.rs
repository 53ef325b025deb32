//! Configuration loader for YAML files and environment overrides

use crate::config::types::*;
use crate::errors::MonitorError;
use std::env;
use std::path::{Path, PathBuf};
use tokio::fs;

pub const ENV_BIND_ADDR: &str = "SENTIMENT_BIND_ADDR";
pub const ENV_MODEL_DIR: &str = "SENTIMENT_MODEL_DIR";
pub const ENV_DATABASE_PATH: &str = "SENTIMENT_DATABASE_PATH";
pub const ENV_REFERENCE_PATH: &str = "SENTIMENT_REFERENCE_PATH";

/// Configuration loader with environment resolution
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a YAML file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<SentimentConfig, MonitorError> {
        let path = path.as_ref();

        let content = fs::read_to_string(path).await.map_err(|e| {
            MonitorError::ConfigError(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;

        Self::from_str(&content)
    }

    /// Load configuration from a file if it exists, otherwise start from defaults.
    ///
    /// Environment overrides apply in both cases.
    pub async fn load_or_default<P: AsRef<Path>>(path: P) -> Result<SentimentConfig, MonitorError> {
        let path = path.as_ref();
        if fs::try_exists(path).await.unwrap_or(false) {
            log::info!("Loading configuration from file: {}", path.display());
            Self::from_file(path).await
        } else {
            log::info!(
                "Configuration file {} not found, using defaults",
                path.display()
            );
            let mut config = SentimentConfig::default();
            Self::resolve_environment(&mut config);
            config.validate()?;
            Ok(config)
        }
    }

    /// Load configuration from a YAML string
    pub fn from_str(content: &str) -> Result<SentimentConfig, MonitorError> {
        // An empty document deserializes to null, which serde_yaml refuses for a struct
        let mut config: SentimentConfig = if content.trim().is_empty() {
            SentimentConfig::default()
        } else {
            serde_yaml::from_str(content).map_err(|e| {
                MonitorError::ConfigError(format!("Failed to parse YAML config: {}", e))
            })?
        };

        Self::resolve_environment(&mut config);

        config.validate()?;

        Ok(config)
    }

    /// Apply `SENTIMENT_*` environment overrides
    fn resolve_environment(config: &mut SentimentConfig) {
        if let Some(addr) = non_empty_var(ENV_BIND_ADDR) {
            log::debug!("Overriding bind address from {}", ENV_BIND_ADDR);
            config.server.bind_addr = addr;
        }
        if let Some(dir) = non_empty_var(ENV_MODEL_DIR) {
            log::debug!("Overriding model directory from {}", ENV_MODEL_DIR);
            config.model.dir = PathBuf::from(dir);
        }
        if let Some(db) = non_empty_var(ENV_DATABASE_PATH) {
            log::debug!("Overriding database path from {}", ENV_DATABASE_PATH);
            config.storage.database_path = PathBuf::from(db);
        }
        if let Some(reference) = non_empty_var(ENV_REFERENCE_PATH) {
            log::debug!("Overriding reference data path from {}", ENV_REFERENCE_PATH);
            config.drift.reference_path = PathBuf::from(reference);
        }
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}
