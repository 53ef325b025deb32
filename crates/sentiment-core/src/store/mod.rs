//! Append-only prediction log
//!
//! Every scored request is persisted so the monitoring side can compute
//! aggregate statistics and compare live traffic against training data.

pub mod sqlite;

pub use sqlite::{PredictionLog, TIMESTAMP_FORMAT};

use crate::model::{Prediction, Sentiment};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One logged inference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRecord {
    pub id: i64,
    pub timestamp: NaiveDateTime,
    pub text: String,
    pub sentiment: Sentiment,
    pub confidence: f64,
    pub prob_negative: f64,
    pub prob_positive: f64,
    pub text_length: i64,
    /// Milliseconds spent scoring the request, when measured
    pub response_time: Option<f64>,
}

/// The insertable part of a [`PredictionRecord`]; id and timestamp are assigned by the log.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPrediction {
    pub text: String,
    pub sentiment: Sentiment,
    pub confidence: f64,
    pub prob_negative: f64,
    pub prob_positive: f64,
    pub text_length: i64,
    pub response_time: Option<f64>,
}

impl NewPrediction {
    pub fn from_prediction(text: &str, prediction: &Prediction, response_time: Option<f64>) -> Self {
        Self {
            text: text.to_string(),
            sentiment: prediction.sentiment,
            confidence: prediction.confidence,
            prob_negative: prediction.probabilities.negative,
            prob_positive: prediction.probabilities.positive,
            text_length: text.chars().count() as i64,
            response_time,
        }
    }
}

/// Aggregates over the whole log. All zero when the log is empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PredictionStats {
    pub total_predictions: u64,
    pub positive_count: u64,
    pub negative_count: u64,
    pub positive_ratio: f64,
    pub negative_ratio: f64,
    pub avg_confidence: f64,
    pub avg_response_time: f64,
    pub avg_text_length: f64,
}
