//! Plain-text renderings of the monitoring views.

use sentiment_core::analytics::{ColumnSummary, PerformanceSummary};
use sentiment_core::drift::DriftReport;
use sentiment_core::model::Prediction;
use sentiment_core::store::{PredictionRecord, PredictionStats};
use std::fmt::Write;

const PREVIEW_CHARS: usize = 60;
const BAR_WIDTH: usize = 40;

/// Shorten `text` to `max` characters, marking the cut with "...".
pub fn preview(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let cut: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{}...", cut)
}

fn bar(count: usize, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    "#".repeat((count * BAR_WIDTH).div_ceil(max))
}

pub fn render_prediction(text: &str, prediction: &Prediction) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Text:       {}", preview(text, PREVIEW_CHARS));
    let _ = writeln!(out, "Sentiment:  {}", prediction.sentiment);
    let _ = writeln!(out, "Confidence: {:.2}%", prediction.confidence * 100.0);
    let _ = writeln!(
        out,
        "P(negative) {:.4}   P(positive) {:.4}",
        prediction.probabilities.negative, prediction.probabilities.positive
    );
    out
}

pub fn render_stats(stats: &PredictionStats) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Total predictions:  {}", stats.total_predictions);
    let _ = writeln!(
        out,
        "Positive:           {} ({:.1}%)",
        stats.positive_count,
        stats.positive_ratio * 100.0
    );
    let _ = writeln!(
        out,
        "Negative:           {} ({:.1}%)",
        stats.negative_count,
        stats.negative_ratio * 100.0
    );
    let _ = writeln!(out, "Avg confidence:     {:.2}%", stats.avg_confidence * 100.0);
    let _ = writeln!(out, "Avg response time:  {:.2} ms", stats.avg_response_time);
    let _ = writeln!(out, "Avg text length:    {:.0} chars", stats.avg_text_length);
    out
}

pub fn render_records(records: &[PredictionRecord]) -> String {
    if records.is_empty() {
        return "No predictions logged yet.\n".to_string();
    }
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<6} {:<19} {:<9} {:>10}  {}",
        "ID", "TIMESTAMP", "SENTIMENT", "CONFIDENCE", "TEXT"
    );
    for record in records {
        let _ = writeln!(
            out,
            "{:<6} {:<19} {:<9} {:>9.2}%  {}",
            record.id,
            record.timestamp.format("%Y-%m-%d %H:%M:%S"),
            record.sentiment,
            record.confidence * 100.0,
            preview(&record.text, PREVIEW_CHARS)
        );
    }
    out
}

pub fn render_performance(summary: &PerformanceSummary) -> String {
    let mut out = String::new();
    if summary.total == 0 {
        out.push_str("No predictions logged yet.\n");
        return out;
    }

    let _ = writeln!(out, "Predictions analyzed: {}", summary.total);
    if let Some(coverage) = &summary.coverage {
        let _ = writeln!(
            out,
            "Date range: {} to {} ({} days)",
            coverage.from, coverage.to, coverage.days
        );
    }

    out.push_str("\nDaily volume\n");
    let max_daily = summary.daily_counts.iter().map(|d| d.count).max().unwrap_or(0);
    for day in &summary.daily_counts {
        let _ = writeln!(out, "  {}  {:>6}  {}", day.date, day.count, bar(day.count, max_daily));
    }

    out.push_str("\nHourly distribution\n");
    let max_hourly = summary.hourly_distribution.iter().copied().max().unwrap_or(0);
    for (hour, count) in summary.hourly_distribution.iter().enumerate() {
        if *count > 0 {
            let _ = writeln!(out, "  {:02}:00  {:>6}  {}", hour, count, bar(*count, max_hourly));
        }
    }

    out.push_str("\nBy sentiment\n");
    for (label, breakdown) in [("positive", &summary.positive), ("negative", &summary.negative)] {
        let _ = writeln!(
            out,
            "  {:<9} {:>6} predictions, avg confidence {:.2}%, avg length {:.0} chars",
            label,
            breakdown.count,
            breakdown.avg_confidence * 100.0,
            breakdown.avg_text_length
        );
    }

    out.push_str("\nConfidence distribution\n");
    let max_bin = summary.confidence_histogram.iter().map(|b| b.count).max().unwrap_or(0);
    for bin in summary.confidence_histogram.iter().filter(|b| b.count > 0) {
        let _ = writeln!(
            out,
            "  {:.2}-{:.2}  {:>6}  {}",
            bin.lower,
            bin.upper,
            bin.count,
            bar(bin.count, max_bin)
        );
    }

    let _ = writeln!(
        out,
        "\nLow confidence (< {:.0}%): {} predictions",
        summary.low_confidence_threshold * 100.0,
        summary.low_confidence_count
    );

    out.push_str("\nStatistical summary\n");
    let _ = writeln!(
        out,
        "  {:<15} {:>10} {:>10} {:>10} {:>10}",
        "", "MIN", "MAX", "MEAN", "MEDIAN"
    );
    summary_row(&mut out, "text length", summary.text_length_stats, 1.0, "");
    summary_row(&mut out, "confidence", summary.confidence_stats, 100.0, "%");
    if summary.response_time_stats.is_some() {
        summary_row(&mut out, "response time", summary.response_time_stats, 1.0, "ms");
    } else {
        out.push_str("  response time   no response time data\n");
    }
    out
}

fn summary_row(out: &mut String, label: &str, column: Option<ColumnSummary>, scale: f64, unit: &str) {
    let Some(c) = column else { return };
    let cell = |v: f64| format!("{:.2}{}", v * scale, unit);
    let _ = writeln!(
        out,
        "  {:<15} {:>10} {:>10} {:>10} {:>10}",
        label,
        cell(c.min),
        cell(c.max),
        cell(c.mean),
        cell(c.median)
    );
}

pub fn render_drift(report: &DriftReport) -> String {
    let stats = &report.stats;
    let mut out = String::new();
    let _ = writeln!(out, "Drift score: {:.4}", report.drift_score);
    let _ = writeln!(out, "Status:      {}", report.status);
    let _ = writeln!(out, "Action:      {}", report.recommendation);
    let _ = writeln!(out);
    let _ = writeln!(out, "{:<22} {:>12} {:>12}", "", "REFERENCE", "PRODUCTION");
    let _ = writeln!(
        out,
        "{:<22} {:>12} {:>12}",
        "rows", stats.reference.count, stats.production.count
    );
    let _ = writeln!(
        out,
        "{:<22} {:>12.1} {:>12.1}",
        "text length (mean)", stats.reference.text_length_mean, stats.production.text_length_mean
    );
    let _ = writeln!(
        out,
        "{:<22} {:>12.1} {:>12.1}",
        "text length (std)", stats.reference.text_length_std, stats.production.text_length_std
    );
    let _ = writeln!(
        out,
        "{:<22} {:>11.1}% {:>11.1}%",
        "positive share",
        stats.reference.positive_ratio * 100.0,
        stats.production.positive_ratio * 100.0
    );
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Text length difference: {:.1} chars ({:.1}%)",
        stats.difference.text_length_diff, stats.difference.text_length_diff_pct
    );
    let _ = writeln!(
        out,
        "Sentiment difference:   {:.1} percentage points",
        stats.difference.sentiment_diff
    );
    out
}
