//! Request and response bodies for the sentiment API.

use sentiment_core::model::{ClassProbabilities, Sentiment};
use sentiment_core::store::TIMESTAMP_FORMAT;
use serde::{Deserialize, Serialize};

/// Current local time in the same format the prediction log uses.
pub fn now_timestamp() -> String {
    chrono::Local::now()
        .naive_local()
        .format(TIMESTAMP_FORMAT)
        .to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionRequest {
    pub text: String,
}

impl PredictionRequest {
    /// Validate against `max_length` and return the trimmed text.
    pub fn validated_text(&self, max_length: usize) -> Result<&str, String> {
        let length = self.text.chars().count();
        if length > max_length {
            return Err(format!(
                "Text is too long ({} characters, maximum {})",
                length, max_length
            ));
        }
        let trimmed = self.text.trim();
        if trimmed.is_empty() {
            return Err("Text must not be empty".to_string());
        }
        Ok(trimmed)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionResponse {
    pub sentiment: Sentiment,
    pub confidence: f64,
    pub probabilities: ClassProbabilities,
    pub text_length: usize,
    pub timestamp: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub model_loaded: bool,
    pub version: String,
    pub timestamp: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default)]
    pub detail: Option<String>,
    pub timestamp: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecentQuery {
    pub n: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HistoryQuery {
    pub since: Option<String>,
}
