//! Configuration module for the serving and monitoring stack
//!
//! Supports YAML configuration files with per-section defaults and a small set of
//! `SENTIMENT_*` environment overrides for container deployments.

pub mod loader;
pub mod types;

pub use loader::*;
pub use types::*;
