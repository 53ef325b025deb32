//! Sentiment model inference over exported TF-IDF + logistic regression artifacts
//!
//! Training happens elsewhere; this module only loads the fitted parameters and
//! reproduces the scoring path: analyze text into tokens, weight them by TF-IDF,
//! and push the resulting sparse vector through a binary logistic regression.

pub mod classifier;
pub mod loader;
pub mod vectorizer;

pub use classifier::LogisticRegression;
pub use loader::{validate_model_files, ModelLoader, TrainingMetrics, MODEL_FILE, VECTORIZER_FILE};
pub use vectorizer::{SparseVector, TfidfVectorizer};

use crate::errors::ModelError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Binary sentiment label, stored and serialized as `"negative"` / `"positive"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Negative,
    Positive,
}

impl Sentiment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Negative => "negative",
            Sentiment::Positive => "positive",
        }
    }

    pub fn is_positive(&self) -> bool {
        matches!(self, Sentiment::Positive)
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sentiment {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "negative" => Ok(Sentiment::Negative),
            "positive" => Ok(Sentiment::Positive),
            other => Err(ModelError::UnknownClass(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassProbabilities {
    pub negative: f64,
    pub positive: f64,
}

/// Outcome of scoring one piece of text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub sentiment: Sentiment,
    /// Probability of the predicted class
    pub confidence: f64,
    pub probabilities: ClassProbabilities,
}

/// Descriptive metadata served by `/model/info`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelInfo {
    pub model_type: String,
    pub vectorizer_type: String,
    pub max_features: Option<usize>,
    pub test_accuracy: f64,
    pub test_f1_score: f64,
    pub test_precision: f64,
    pub test_recall: f64,
    pub trained_date: Option<String>,
    pub model_version: String,
}

/// Anything that can score review text.
///
/// The server and CLI only depend on this trait, which keeps them testable
/// without artifacts on disk.
pub trait SentimentModel: Send + Sync {
    fn predict(&self, text: &str) -> Result<Prediction, ModelError>;

    fn model_info(&self) -> ModelInfo;
}
