//! Performance breakdowns over the prediction log

use crate::model::Sentiment;
use crate::store::PredictionRecord;
use chrono::{NaiveDate, Timelike};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SentimentBreakdown {
    pub count: usize,
    pub avg_confidence: f64,
    pub avg_text_length: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// Min, max, mean and median of one numeric column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColumnSummary {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateCoverage {
    pub from: NaiveDate,
    pub to: NaiveDate,
    /// Whole days between the first and last prediction, plus one
    pub days: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceSummary {
    pub total: usize,
    pub daily_counts: Vec<DailyCount>,
    /// Predictions per hour of day, index 0 = 00:00-00:59
    pub hourly_distribution: Vec<usize>,
    pub positive: SentimentBreakdown,
    pub negative: SentimentBreakdown,
    pub confidence_histogram: Vec<HistogramBin>,
    pub low_confidence_threshold: f64,
    pub low_confidence_count: usize,
    pub coverage: Option<DateCoverage>,
    pub text_length_stats: Option<ColumnSummary>,
    pub confidence_stats: Option<ColumnSummary>,
    /// Only rows with a measured response time contribute
    pub response_time_stats: Option<ColumnSummary>,
}

pub const DEFAULT_HISTOGRAM_BINS: usize = 20;
pub const DEFAULT_LOW_CONFIDENCE: f64 = 0.6;

impl PerformanceSummary {
    pub fn from_records(records: &[PredictionRecord]) -> Self {
        Self::with_options(records, DEFAULT_HISTOGRAM_BINS, DEFAULT_LOW_CONFIDENCE)
    }

    pub fn with_options(records: &[PredictionRecord], bins: usize, low_confidence: f64) -> Self {
        Self {
            total: records.len(),
            daily_counts: daily_counts(records),
            hourly_distribution: hourly_distribution(records),
            positive: sentiment_breakdown(records, Sentiment::Positive),
            negative: sentiment_breakdown(records, Sentiment::Negative),
            confidence_histogram: confidence_histogram(records, bins),
            low_confidence_threshold: low_confidence,
            low_confidence_count: low_confidence_count(records, low_confidence),
            coverage: date_coverage(records),
            text_length_stats: column_summary(records.iter().map(|r| r.text_length as f64)),
            confidence_stats: column_summary(records.iter().map(|r| r.confidence)),
            response_time_stats: column_summary(records.iter().filter_map(|r| r.response_time)),
        }
    }
}

/// Prediction volume per calendar day, oldest first.
pub fn daily_counts(records: &[PredictionRecord]) -> Vec<DailyCount> {
    let mut per_day: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for record in records {
        *per_day.entry(record.timestamp.date()).or_insert(0) += 1;
    }
    per_day
        .into_iter()
        .map(|(date, count)| DailyCount { date, count })
        .collect()
}

pub fn hourly_distribution(records: &[PredictionRecord]) -> Vec<usize> {
    let mut hours = vec![0usize; 24];
    for record in records {
        hours[record.timestamp.hour() as usize] += 1;
    }
    hours
}

pub fn sentiment_breakdown(records: &[PredictionRecord], sentiment: Sentiment) -> SentimentBreakdown {
    let matching: Vec<&PredictionRecord> = records.iter().filter(|r| r.sentiment == sentiment).collect();
    if matching.is_empty() {
        return SentimentBreakdown::default();
    }
    let n = matching.len() as f64;
    SentimentBreakdown {
        count: matching.len(),
        avg_confidence: matching.iter().map(|r| r.confidence).sum::<f64>() / n,
        avg_text_length: matching.iter().map(|r| r.text_length as f64).sum::<f64>() / n,
    }
}

/// Equal-width histogram of confidences over [0, 1]; a confidence of exactly 1 lands in the last bin.
pub fn confidence_histogram(records: &[PredictionRecord], bins: usize) -> Vec<HistogramBin> {
    let bins = bins.max(1);
    let width = 1.0 / bins as f64;
    let mut counts = vec![0usize; bins];
    for record in records {
        let c = record.confidence.clamp(0.0, 1.0);
        let idx = ((c / width) as usize).min(bins - 1);
        counts[idx] += 1;
    }
    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            lower: i as f64 * width,
            upper: (i + 1) as f64 * width,
            count,
        })
        .collect()
}

pub fn low_confidence_count(records: &[PredictionRecord], threshold: f64) -> usize {
    records.iter().filter(|r| r.confidence < threshold).count()
}

/// `None` when `values` is empty. The median of an even count is the mean of the two middle values.
pub fn column_summary(values: impl IntoIterator<Item = f64>) -> Option<ColumnSummary> {
    let mut values: Vec<f64> = values.into_iter().collect();
    if values.is_empty() {
        return None;
    }
    values.sort_by(|a, b| a.total_cmp(b));
    let n = values.len();
    let median = if n % 2 == 0 {
        (values[n / 2 - 1] + values[n / 2]) / 2.0
    } else {
        values[n / 2]
    };
    Some(ColumnSummary {
        min: values[0],
        max: values[n - 1],
        mean: values.iter().sum::<f64>() / n as f64,
        median,
    })
}

pub fn date_coverage(records: &[PredictionRecord]) -> Option<DateCoverage> {
    let first = records.iter().map(|r| r.timestamp).min()?;
    let last = records.iter().map(|r| r.timestamp).max()?;
    Some(DateCoverage {
        from: first.date(),
        to: last.date(),
        days: (last - first).num_days() + 1,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn record(id: i64, ts: &str, sentiment: Sentiment, confidence: f64, len: i64) -> PredictionRecord {
        PredictionRecord {
            id,
            timestamp: NaiveDateTime::parse_from_str(ts, "%Y-%m-%d %H:%M:%S").unwrap(),
            text: "x".repeat(len as usize),
            sentiment,
            confidence,
            prob_negative: 0.0,
            prob_positive: 0.0,
            text_length: len,
            response_time: None,
        }
    }

    fn records() -> Vec<PredictionRecord> {
        vec![
            record(1, "2024-12-02 09:15:00", Sentiment::Positive, 0.95, 100),
            record(2, "2024-12-01 09:45:00", Sentiment::Negative, 0.55, 40),
            record(3, "2024-12-02 23:10:00", Sentiment::Positive, 0.75, 60),
            record(4, "2024-12-02 00:05:00", Sentiment::Negative, 1.0, 20),
        ]
    }

    #[test]
    fn test_daily_counts_sorted_oldest_first() {
        let days = daily_counts(&records());
        assert_eq!(days.len(), 2);
        assert_eq!(days[0].date, NaiveDate::from_ymd_opt(2024, 12, 1).unwrap());
        assert_eq!(days[0].count, 1);
        assert_eq!(days[1].count, 3);
    }

    #[test]
    fn test_hourly_distribution() {
        let hours = hourly_distribution(&records());
        assert_eq!(hours.len(), 24);
        assert_eq!(hours[9], 2);
        assert_eq!(hours[23], 1);
        assert_eq!(hours[0], 1);
        assert_eq!(hours.iter().sum::<usize>(), 4);
    }

    #[test]
    fn test_sentiment_breakdown() {
        let positive = sentiment_breakdown(&records(), Sentiment::Positive);
        assert_eq!(positive.count, 2);
        assert!((positive.avg_confidence - 0.85).abs() < 1e-12);
        assert_eq!(positive.avg_text_length, 80.0);

        let none = sentiment_breakdown(&[], Sentiment::Negative);
        assert_eq!(none, SentimentBreakdown::default());
    }

    #[test]
    fn test_confidence_histogram_puts_one_in_last_bin() {
        let hist = confidence_histogram(&records(), 4);
        assert_eq!(hist.len(), 4);
        let counts: Vec<_> = hist.iter().map(|b| b.count).collect();
        assert_eq!(counts, vec![0, 0, 1, 3]);
        assert_eq!(hist[3].upper, 1.0);
    }

    #[test]
    fn test_summary_low_confidence() {
        let summary = PerformanceSummary::from_records(&records());
        assert_eq!(summary.total, 4);
        assert_eq!(summary.low_confidence_count, 1);
        assert_eq!(summary.confidence_histogram.len(), DEFAULT_HISTOGRAM_BINS);
    }

    #[test]
    fn test_column_summaries() {
        let summary = PerformanceSummary::from_records(&records());
        let lengths = summary.text_length_stats.unwrap();
        assert_eq!(lengths.min, 20.0);
        assert_eq!(lengths.max, 100.0);
        assert_eq!(lengths.mean, 55.0);
        assert_eq!(lengths.median, 50.0);

        let confidence = summary.confidence_stats.unwrap();
        assert_eq!(confidence.min, 0.55);
        assert_eq!(confidence.max, 1.0);
        assert!((confidence.median - 0.85).abs() < 1e-12);

        // no row carries a response time
        assert!(summary.response_time_stats.is_none());
    }

    #[test]
    fn test_response_time_stats_skip_unmeasured_rows() {
        let mut rows = records();
        rows[0].response_time = Some(12.0);
        rows[2].response_time = Some(4.0);
        rows[3].response_time = Some(8.0);
        let stats = PerformanceSummary::from_records(&rows).response_time_stats.unwrap();
        assert_eq!(stats.min, 4.0);
        assert_eq!(stats.max, 12.0);
        assert_eq!(stats.mean, 8.0);
        assert_eq!(stats.median, 8.0);
    }

    #[test]
    fn test_date_coverage() {
        let coverage = date_coverage(&records()).unwrap();
        assert_eq!(coverage.from, NaiveDate::from_ymd_opt(2024, 12, 1).unwrap());
        assert_eq!(coverage.to, NaiveDate::from_ymd_opt(2024, 12, 2).unwrap());
        // 2024-12-01 09:45 to 2024-12-02 23:10 is one whole day
        assert_eq!(coverage.days, 2);

        let single = date_coverage(&records()[..1]).unwrap();
        assert_eq!(single.days, 1);
        assert!(date_coverage(&[]).is_none());
    }
}
