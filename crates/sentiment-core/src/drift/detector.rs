//! Drift scoring, status classification and comparison reports

use super::{Dataset, DriftLevel, DriftThresholds};
use crate::errors::DriftError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetSummary {
    pub count: usize,
    pub text_length_mean: f64,
    pub text_length_std: f64,
    pub positive_ratio: f64,
}

impl DatasetSummary {
    fn of(dataset: &Dataset) -> Self {
        Self {
            count: dataset.len(),
            text_length_mean: dataset.text_length_mean(),
            text_length_std: dataset.text_length_std(),
            positive_ratio: dataset.positive_ratio(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DifferenceSummary {
    /// Absolute difference of mean text lengths, in characters
    pub text_length_diff: f64,
    /// `text_length_diff` as a percentage of the reference mean
    pub text_length_diff_pct: f64,
    /// Absolute difference of positive ratios, in percentage points
    pub sentiment_diff: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonStats {
    pub reference: DatasetSummary,
    pub production: DatasetSummary,
    pub difference: DifferenceSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriftReport {
    pub generated_at: DateTime<Utc>,
    pub drift_score: f64,
    pub level: DriftLevel,
    pub status: String,
    pub color: String,
    pub recommendation: String,
    pub thresholds: DriftThresholds,
    pub stats: ComparisonStats,
}

impl DriftReport {
    /// Write the report as pretty JSON, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), DriftError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| DriftError::Report(format!("{}: {}", parent.display(), e)))?;
        }
        let body = serde_json::to_string_pretty(self)?;
        std::fs::write(path, body)
            .map_err(|e| DriftError::Report(format!("{}: {}", path.display(), e)))?;
        log::info!("Drift report saved to {}", path.display());
        Ok(())
    }
}

fn ensure_comparable(reference: &Dataset, production: &Dataset) -> Result<(), DriftError> {
    if reference.is_empty() {
        return Err(DriftError::InsufficientData(
            "reference dataset is empty".to_string(),
        ));
    }
    if production.is_empty() {
        return Err(DriftError::InsufficientData(
            "no production predictions have been logged".to_string(),
        ));
    }
    Ok(())
}

/// Length difference normalized by the reference mean.
///
/// A zero reference mean cannot be normalized; it counts as no difference when
/// production is also zero and as maximal difference otherwise.
fn normalized_length_diff(ref_mean: f64, prod_mean: f64) -> f64 {
    let diff = (ref_mean - prod_mean).abs();
    if ref_mean == 0.0 {
        if diff == 0.0 {
            0.0
        } else {
            1.0
        }
    } else {
        diff / ref_mean
    }
}

/// Heuristic drift score in [0, 1] (0 = no drift).
pub fn calculate_drift_score(reference: &Dataset, production: &Dataset) -> Result<f64, DriftError> {
    ensure_comparable(reference, production)?;

    let length_diff =
        normalized_length_diff(reference.text_length_mean(), production.text_length_mean());
    let sentiment_diff = (reference.positive_ratio() - production.positive_ratio()).abs();

    Ok(((length_diff + sentiment_diff) / 2.0).min(1.0))
}

pub fn drift_status(score: f64, thresholds: &DriftThresholds) -> DriftLevel {
    if score < thresholds.low {
        DriftLevel::None
    } else if score < thresholds.moderate {
        DriftLevel::Low
    } else if score < thresholds.high {
        DriftLevel::Moderate
    } else {
        DriftLevel::High
    }
}

pub fn comparison_stats(
    reference: &Dataset,
    production: &Dataset,
) -> Result<ComparisonStats, DriftError> {
    ensure_comparable(reference, production)?;

    let reference_summary = DatasetSummary::of(reference);
    let production_summary = DatasetSummary::of(production);

    let text_length_diff =
        (reference_summary.text_length_mean - production_summary.text_length_mean).abs();
    let text_length_diff_pct = normalized_length_diff(
        reference_summary.text_length_mean,
        production_summary.text_length_mean,
    ) * 100.0;
    let sentiment_diff =
        (reference_summary.positive_ratio - production_summary.positive_ratio).abs() * 100.0;

    Ok(ComparisonStats {
        reference: reference_summary,
        production: production_summary,
        difference: DifferenceSummary {
            text_length_diff,
            text_length_diff_pct,
            sentiment_diff,
        },
    })
}

pub fn generate_drift_report(
    reference: &Dataset,
    production: &Dataset,
    thresholds: &DriftThresholds,
) -> Result<DriftReport, DriftError> {
    let drift_score = calculate_drift_score(reference, production)?;
    let stats = comparison_stats(reference, production)?;
    let level = drift_status(drift_score, thresholds);

    log::info!(
        "Drift score {:.4} ({}) over {} reference / {} production rows",
        drift_score,
        level.label(),
        stats.reference.count,
        stats.production.count
    );

    Ok(DriftReport {
        generated_at: Utc::now(),
        drift_score,
        level,
        status: level.label().to_string(),
        color: level.color().to_string(),
        recommendation: level.recommendation().to_string(),
        thresholds: *thresholds,
        stats,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drift::Observation;
    use crate::model::Sentiment;

    fn dataset(rows: &[(usize, Sentiment)]) -> Dataset {
        rows.iter()
            .map(|(len, s)| Observation::new("a".repeat(*len), *s))
            .collect()
    }

    #[test]
    fn test_identical_datasets_have_zero_drift() {
        let ds = dataset(&[(100, Sentiment::Positive), (200, Sentiment::Negative)]);
        assert_eq!(calculate_drift_score(&ds, &ds).unwrap(), 0.0);
    }

    #[test]
    fn test_score_is_mean_of_length_and_sentiment_terms() {
        // reference: mean length 100, positive ratio 0.5
        let reference = dataset(&[(100, Sentiment::Positive), (100, Sentiment::Negative)]);
        // production: mean length 150, positive ratio 1.0
        let production = dataset(&[(150, Sentiment::Positive), (150, Sentiment::Positive)]);

        let score = calculate_drift_score(&reference, &production).unwrap();
        // length term 0.5, sentiment term 0.5
        assert!((score - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_length_term_is_normalized_by_reference() {
        let reference = dataset(&[(100, Sentiment::Positive)]);
        let production = dataset(&[(50, Sentiment::Positive)]);
        let forward = calculate_drift_score(&reference, &production).unwrap();
        let backward = calculate_drift_score(&production, &reference).unwrap();
        assert!((forward - 0.25).abs() < 1e-12);
        assert!((backward - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_score_is_capped_at_one() {
        let reference = dataset(&[(10, Sentiment::Positive)]);
        let production = dataset(&[(1000, Sentiment::Negative)]);
        assert_eq!(calculate_drift_score(&reference, &production).unwrap(), 1.0);
    }

    #[test]
    fn test_zero_length_reference() {
        let reference = dataset(&[(0, Sentiment::Positive)]);
        let same = dataset(&[(0, Sentiment::Positive)]);
        let longer = dataset(&[(5, Sentiment::Positive)]);
        assert_eq!(calculate_drift_score(&reference, &same).unwrap(), 0.0);
        assert_eq!(calculate_drift_score(&reference, &longer).unwrap(), 0.5);
    }

    #[test]
    fn test_zero_length_reference_pct_matches_score_term() {
        let reference = dataset(&[(0, Sentiment::Positive)]);
        let same = dataset(&[(0, Sentiment::Negative)]);
        let longer = dataset(&[(5, Sentiment::Positive)]);

        let stats = comparison_stats(&reference, &longer).unwrap();
        assert_eq!(stats.difference.text_length_diff, 5.0);
        assert_eq!(stats.difference.text_length_diff_pct, 100.0);

        let stats = comparison_stats(&reference, &same).unwrap();
        assert_eq!(stats.difference.text_length_diff_pct, 0.0);
    }

    #[test]
    fn test_empty_datasets_are_insufficient() {
        let ds = dataset(&[(10, Sentiment::Positive)]);
        let empty = Dataset::default();
        assert!(matches!(
            calculate_drift_score(&ds, &empty),
            Err(DriftError::InsufficientData(_))
        ));
        assert!(matches!(
            comparison_stats(&empty, &ds),
            Err(DriftError::InsufficientData(_))
        ));
    }

    #[test]
    fn test_status_boundaries() {
        let t = DriftThresholds::default();
        assert_eq!(drift_status(0.0, &t), DriftLevel::None);
        assert_eq!(drift_status(0.0999, &t), DriftLevel::None);
        assert_eq!(drift_status(0.1, &t), DriftLevel::Low);
        assert_eq!(drift_status(0.3, &t), DriftLevel::Moderate);
        assert_eq!(drift_status(0.4999, &t), DriftLevel::Moderate);
        assert_eq!(drift_status(0.5, &t), DriftLevel::High);
        assert_eq!(drift_status(1.0, &t), DriftLevel::High);
    }

    #[test]
    fn test_comparison_stats() {
        let reference = dataset(&[(80, Sentiment::Positive), (120, Sentiment::Negative)]);
        let production = dataset(&[(150, Sentiment::Positive)]);

        let stats = comparison_stats(&reference, &production).unwrap();
        assert_eq!(stats.reference.count, 2);
        assert_eq!(stats.reference.text_length_mean, 100.0);
        assert!((stats.reference.text_length_std - 800f64.sqrt()).abs() < 1e-9);
        assert_eq!(stats.production.text_length_std, 0.0);
        assert_eq!(stats.difference.text_length_diff, 50.0);
        assert_eq!(stats.difference.text_length_diff_pct, 50.0);
        assert_eq!(stats.difference.sentiment_diff, 50.0);
    }

    #[test]
    fn test_report_save_round_trip() {
        let reference = dataset(&[(100, Sentiment::Positive), (100, Sentiment::Negative)]);
        let production = dataset(&[(110, Sentiment::Positive), (90, Sentiment::Negative)]);
        let report =
            generate_drift_report(&reference, &production, &DriftThresholds::default()).unwrap();
        assert_eq!(report.level, DriftLevel::None);
        assert_eq!(report.status, "NO DRIFT DETECTED");

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reports").join("drift.json");
        report.save(&path).unwrap();

        let loaded: DriftReport =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(loaded.drift_score, report.drift_score);
        assert_eq!(loaded.level, DriftLevel::None);
        assert_eq!(loaded.stats.production.count, 2);
    }
}
