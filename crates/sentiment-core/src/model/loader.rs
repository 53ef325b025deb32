//! Loading and validating exported model artifacts

use super::classifier::LogisticRegression;
use super::vectorizer::TfidfVectorizer;
use super::{ModelInfo, Prediction, Sentiment, SentimentModel};
use crate::errors::ModelError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const MODEL_FILE: &str = "model.json";
pub const VECTORIZER_FILE: &str = "vectorizer.json";

/// Held-out evaluation metrics written next to the artifacts by the training pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainingMetrics {
    #[serde(default)]
    pub accuracy: f64,
    #[serde(default)]
    pub precision: f64,
    #[serde(default)]
    pub recall: f64,
    #[serde(default)]
    pub f1_score: f64,
    #[serde(default)]
    pub date: Option<String>,
}

/// A fitted vectorizer and classifier pair ready to score text.
#[derive(Debug, Clone)]
pub struct ModelLoader {
    vectorizer: TfidfVectorizer,
    classifier: LogisticRegression,
    classes: [Sentiment; 2],
    metrics: TrainingMetrics,
    version: String,
}

impl ModelLoader {
    /// Load `model.json` and `vectorizer.json` from `model_dir`, plus optional metrics.
    pub fn load(
        model_dir: impl AsRef<Path>,
        metrics_path: impl AsRef<Path>,
        version: impl Into<String>,
    ) -> Result<Self, ModelError> {
        let model_dir = model_dir.as_ref();
        let vectorizer: TfidfVectorizer = read_artifact(&model_dir.join(VECTORIZER_FILE))?;
        let classifier: LogisticRegression = read_artifact(&model_dir.join(MODEL_FILE))?;

        let metrics_path = metrics_path.as_ref();
        let metrics = if metrics_path.exists() {
            read_artifact(metrics_path)?
        } else {
            log::warn!(
                "Metrics file {} not found, reporting zeroed metrics",
                metrics_path.display()
            );
            TrainingMetrics::default()
        };

        let loader = Self::from_parts(vectorizer, classifier, metrics, version)?;
        log::info!(
            "Loaded model from {} ({} features)",
            model_dir.display(),
            loader.vectorizer.dimension()
        );
        Ok(loader)
    }

    /// Build a loader from in-memory parts, running the same consistency checks as [`load`](Self::load).
    pub fn from_parts(
        vectorizer: TfidfVectorizer,
        classifier: LogisticRegression,
        metrics: TrainingMetrics,
        version: impl Into<String>,
    ) -> Result<Self, ModelError> {
        vectorizer
            .check_consistency()
            .map_err(|message| ModelError::InvalidArtifact {
                path: PathBuf::from(VECTORIZER_FILE),
                message,
            })?;

        if vectorizer.dimension() != classifier.dimension() {
            return Err(ModelError::DimensionMismatch {
                vectorizer: vectorizer.dimension(),
                classifier: classifier.dimension(),
            });
        }

        let classes = classifier.sentiment_classes()?;

        Ok(Self {
            vectorizer,
            classifier,
            classes,
            metrics,
            version: version.into(),
        })
    }
}

impl SentimentModel for ModelLoader {
    fn predict(&self, text: &str) -> Result<Prediction, ModelError> {
        let features = self.vectorizer.transform(text);
        Ok(self.classifier.predict(self.classes, &features))
    }

    fn model_info(&self) -> ModelInfo {
        ModelInfo {
            model_type: "LogisticRegression".to_string(),
            vectorizer_type: "TfidfVectorizer".to_string(),
            max_features: self.vectorizer.max_features,
            test_accuracy: self.metrics.accuracy,
            test_f1_score: self.metrics.f1_score,
            test_precision: self.metrics.precision,
            test_recall: self.metrics.recall,
            trained_date: self.metrics.date.clone(),
            model_version: self.version.clone(),
        }
    }
}

/// Check whether both required artifacts exist in `model_dir`.
pub fn validate_model_files(model_dir: impl AsRef<Path>) -> bool {
    let model_dir = model_dir.as_ref();
    [MODEL_FILE, VECTORIZER_FILE]
        .iter()
        .all(|file| model_dir.join(file).exists())
}

fn read_artifact<T: DeserializeOwned>(path: &Path) -> Result<T, ModelError> {
    if !path.exists() {
        return Err(ModelError::ArtifactMissing(path.to_path_buf()));
    }
    let content = fs::read_to_string(path).map_err(|e| ModelError::InvalidArtifact {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    serde_json::from_str(&content).map_err(|e| ModelError::InvalidArtifact {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}
