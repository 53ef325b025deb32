//! CSV export of the prediction log and its aggregate statistics

use crate::errors::MonitorError;
use crate::store::{PredictionRecord, PredictionStats, TIMESTAMP_FORMAT};
use csv::WriterBuilder;
use std::io::Write;

const PREDICTION_HEADERS: [&str; 9] = [
    "id",
    "timestamp",
    "text",
    "sentiment",
    "confidence",
    "prob_negative",
    "prob_positive",
    "text_length",
    "response_time",
];

/// Write one row per record under a header row. A missing response time is an empty field.
pub fn export_predictions<W: Write>(records: &[PredictionRecord], writer: W) -> Result<usize, MonitorError> {
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(writer);
    writer.write_record(PREDICTION_HEADERS)?;
    for record in records {
        writer.write_record([
            record.id.to_string(),
            record.timestamp.format(TIMESTAMP_FORMAT).to_string(),
            record.text.clone(),
            record.sentiment.to_string(),
            record.confidence.to_string(),
            record.prob_negative.to_string(),
            record.prob_positive.to_string(),
            record.text_length.to_string(),
            record.response_time.map(|t| t.to_string()).unwrap_or_default(),
        ])?;
    }
    writer.flush()?;
    Ok(records.len())
}

/// `(metric, value)` pairs in display form, ratios as percentages.
pub fn stats_rows(stats: &PredictionStats) -> Vec<(&'static str, String)> {
    let avg_response_time = if stats.avg_response_time > 0.0 {
        format!("{:.2}ms", stats.avg_response_time)
    } else {
        "N/A".to_string()
    };
    vec![
        ("Total Predictions", stats.total_predictions.to_string()),
        ("Positive Count", stats.positive_count.to_string()),
        ("Negative Count", stats.negative_count.to_string()),
        ("Positive Ratio", format!("{:.2}%", stats.positive_ratio * 100.0)),
        ("Negative Ratio", format!("{:.2}%", stats.negative_ratio * 100.0)),
        ("Average Confidence", format!("{:.2}%", stats.avg_confidence * 100.0)),
        ("Average Response Time", avg_response_time),
        ("Average Text Length", format!("{:.0} chars", stats.avg_text_length)),
    ]
}

/// Write the `Metric,Value` table of [`stats_rows`].
pub fn export_stats<W: Write>(stats: &PredictionStats, writer: W) -> Result<(), MonitorError> {
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(writer);
    writer.write_record(["Metric", "Value"])?;
    for (metric, value) in stats_rows(stats) {
        writer.write_record([metric, value.as_str()])?;
    }
    writer.flush()?;
    Ok(())
}
