//! Heuristic data-drift detection between training reference data and live traffic
//!
//! Drift is judged on two cheap signals that are available for both datasets
//! without re-running the model: the mean review length and the share of
//! positive labels. The score is the mean of the reference-normalized length
//! difference and the absolute positive-ratio difference, capped at 1.

pub mod detector;
pub mod reference;

pub use detector::{
    calculate_drift_score, comparison_stats, drift_status, generate_drift_report,
    ComparisonStats, DatasetSummary, DifferenceSummary, DriftReport,
};
pub use reference::{load_production_data, load_reference_data};

use crate::errors::MonitorError;
use crate::model::Sentiment;
use serde::{Deserialize, Serialize};

/// One row in either dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub text: String,
    pub sentiment: Sentiment,
    pub text_length: usize,
}

impl Observation {
    pub fn new(text: impl Into<String>, sentiment: Sentiment) -> Self {
        let text = text.into();
        let text_length = text.chars().count();
        Self {
            text,
            sentiment,
            text_length,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub rows: Vec<Observation>,
}

impl Dataset {
    pub fn new(rows: Vec<Observation>) -> Self {
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Mean text length; 0 for an empty dataset.
    pub fn text_length_mean(&self) -> f64 {
        if self.rows.is_empty() {
            return 0.0;
        }
        self.rows.iter().map(|r| r.text_length as f64).sum::<f64>() / self.rows.len() as f64
    }

    /// Sample standard deviation (n - 1 denominator); 0 with fewer than two rows.
    pub fn text_length_std(&self) -> f64 {
        let n = self.rows.len();
        if n < 2 {
            return 0.0;
        }
        let mean = self.text_length_mean();
        let variance = self
            .rows
            .iter()
            .map(|r| {
                let d = r.text_length as f64 - mean;
                d * d
            })
            .sum::<f64>()
            / (n - 1) as f64;
        variance.sqrt()
    }

    /// Share of rows labelled positive; 0 for an empty dataset.
    pub fn positive_ratio(&self) -> f64 {
        if self.rows.is_empty() {
            return 0.0;
        }
        let positives = self.rows.iter().filter(|r| r.sentiment.is_positive()).count();
        positives as f64 / self.rows.len() as f64
    }
}

impl FromIterator<Observation> for Dataset {
    fn from_iter<I: IntoIterator<Item = Observation>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Score boundaries between drift levels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DriftThresholds {
    #[serde(default = "default_low")]
    pub low: f64,
    #[serde(default = "default_moderate")]
    pub moderate: f64,
    #[serde(default = "default_high")]
    pub high: f64,
}

fn default_low() -> f64 {
    0.1
}

fn default_moderate() -> f64 {
    0.3
}

fn default_high() -> f64 {
    0.5
}

impl Default for DriftThresholds {
    fn default() -> Self {
        Self {
            low: default_low(),
            moderate: default_moderate(),
            high: default_high(),
        }
    }
}

impl DriftThresholds {
    pub fn validate(&self) -> Result<(), MonitorError> {
        let in_range = |v: f64| (0.0..=1.0).contains(&v);
        if !(in_range(self.low) && in_range(self.moderate) && in_range(self.high)) {
            return Err(MonitorError::ConfigError(
                "Drift thresholds must lie within [0, 1]".to_string(),
            ));
        }
        if !(self.low < self.moderate && self.moderate < self.high) {
            return Err(MonitorError::ConfigError(format!(
                "Drift thresholds must be strictly increasing (low {} < moderate {} < high {})",
                self.low, self.moderate, self.high
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DriftLevel {
    None,
    Low,
    Moderate,
    High,
}

impl DriftLevel {
    pub fn label(&self) -> &'static str {
        match self {
            DriftLevel::None => "NO DRIFT DETECTED",
            DriftLevel::Low => "LOW DRIFT",
            DriftLevel::Moderate => "MODERATE DRIFT",
            DriftLevel::High => "HIGH DRIFT DETECTED",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            DriftLevel::None => "green",
            DriftLevel::Low | DriftLevel::Moderate => "orange",
            DriftLevel::High => "red",
        }
    }

    pub fn recommendation(&self) -> &'static str {
        match self {
            DriftLevel::None => "No action needed; the data distribution is stable.",
            DriftLevel::Low => "Monitor closely: watch accuracy and prepare a retraining plan.",
            DriftLevel::Moderate => "Consider retraining on recent data and re-evaluating the model.",
            DriftLevel::High => "Retraining recommended: production data has moved away from training data.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset(rows: &[(usize, Sentiment)]) -> Dataset {
        rows.iter()
            .map(|(len, s)| Observation::new("x".repeat(*len), *s))
            .collect()
    }

    #[test]
    fn test_dataset_summary_statistics() {
        let ds = dataset(&[
            (2, Sentiment::Positive),
            (4, Sentiment::Negative),
            (6, Sentiment::Positive),
            (8, Sentiment::Positive),
        ]);
        assert_eq!(ds.text_length_mean(), 5.0);
        // sample variance = (9 + 1 + 1 + 9) / 3
        assert!((ds.text_length_std() - (20.0f64 / 3.0).sqrt()).abs() < 1e-12);
        assert_eq!(ds.positive_ratio(), 0.75);
    }

    #[test]
    fn test_single_row_std_is_zero() {
        let ds = dataset(&[(10, Sentiment::Negative)]);
        assert_eq!(ds.text_length_std(), 0.0);
        assert_eq!(ds.positive_ratio(), 0.0);
    }

    #[test]
    fn test_observation_counts_characters() {
        let obs = Observation::new("très bien", Sentiment::Positive);
        assert_eq!(obs.text_length, 9);
    }

    #[test]
    fn test_threshold_validation() {
        assert!(DriftThresholds::default().validate().is_ok());
        let bad = DriftThresholds {
            low: 0.3,
            moderate: 0.3,
            high: 0.5,
        };
        assert!(bad.validate().is_err());
        let out_of_range = DriftThresholds {
            low: 0.1,
            moderate: 0.3,
            high: 1.5,
        };
        assert!(out_of_range.validate().is_err());
    }

    #[test]
    fn test_level_presentation() {
        assert_eq!(DriftLevel::None.color(), "green");
        assert_eq!(DriftLevel::Moderate.color(), "orange");
        assert_eq!(DriftLevel::High.label(), "HIGH DRIFT DETECTED");
    }
}
