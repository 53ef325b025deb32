//! Error types for the sentiment API.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use sentiment_core::errors::{DriftError, ModelError, StoreError};
use thiserror::Error;

use crate::models::ErrorResponse;

/// Result type alias for server operations.
pub type Result<T> = std::result::Result<T, ServerError>;

/// Errors that can occur while serving requests.
#[derive(Error, Debug)]
pub enum ServerError {
    /// No model has been loaded
    #[error("Model is not loaded. Try again once the server has finished starting.")]
    ModelUnavailable,

    /// Scoring failed
    #[error("Error processing prediction: {0}")]
    Model(#[from] ModelError),

    /// Prediction log failure
    #[error("Prediction log error: {0}")]
    Store(#[from] StoreError),

    /// Drift computation failure
    #[error("Drift detection failed: {0}")]
    Drift(#[from] DriftError),

    /// Malformed request (bad JSON, bad query parameter)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Well-formed request that fails validation
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Server configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal server error
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ServerError {
    /// Create a new invalid request error.
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::InvalidRequest(msg.into())
    }

    /// Create a new invalid input error.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a new configuration error.
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new internal error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

/// Convert ServerError to HTTP status code
impl ServerError {
    pub fn status_code(&self) -> u16 {
        match self {
            ServerError::InvalidRequest(_) => 400,
            ServerError::InvalidInput(_) => 422,
            ServerError::ModelUnavailable => 503,
            ServerError::Drift(DriftError::InsufficientData(_)) => 409,
            ServerError::Model(_)
            | ServerError::Store(_)
            | ServerError::Drift(_)
            | ServerError::Config(_)
            | ServerError::Internal(_) => 500,
        }
    }

    pub fn error_type(&self) -> &'static str {
        match self {
            ServerError::ModelUnavailable => "model_unavailable",
            ServerError::Model(_) => "model_error",
            ServerError::Store(_) => "store_error",
            ServerError::Drift(DriftError::InsufficientData(_)) => "insufficient_data",
            ServerError::Drift(_) => "drift_error",
            ServerError::InvalidRequest(_) => "invalid_request",
            ServerError::InvalidInput(_) => "invalid_input",
            ServerError::Config(_) => "config_error",
            ServerError::Internal(_) => "internal_error",
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_server_error() {
            log::error!("{}", self);
        } else {
            log::warn!("{}", self);
        }
        let body = ErrorResponse {
            error: self.error_type().to_string(),
            detail: Some(self.to_string()),
            timestamp: crate::models::now_timestamp(),
        };
        (status, Json(body)).into_response()
    }
}
