//! SQLite-backed prediction log

use super::{NewPrediction, PredictionRecord, PredictionStats};
use crate::errors::StoreError;
use crate::model::Sentiment;
use chrono::{Local, NaiveDate, NaiveDateTime};
use rusqlite::{params, Connection, Row};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

/// Local-time ISO-8601 with microseconds, e.g. `2024-12-08T10:30:00.123456`
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS predictions (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    timestamp DATETIME NOT NULL,
    text TEXT NOT NULL,
    sentiment TEXT NOT NULL,
    confidence REAL NOT NULL,
    prob_negative REAL NOT NULL,
    prob_positive REAL NOT NULL,
    text_length INTEGER NOT NULL,
    response_time REAL
);
CREATE INDEX IF NOT EXISTS idx_predictions_timestamp ON predictions (timestamp);
";

const SELECT_COLUMNS: &str = "SELECT id, timestamp, text, sentiment, confidence, prob_negative, \
     prob_positive, text_length, response_time FROM predictions";

/// Handle to the prediction log. Clones share one connection.
#[derive(Clone)]
pub struct PredictionLog {
    path: Option<PathBuf>,
    conn: Arc<Mutex<Connection>>,
}

impl std::fmt::Debug for PredictionLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PredictionLog")
            .field("path", &self.path)
            .finish()
    }
}

impl PredictionLog {
    /// Open (or create) the log at `path`, creating parent directories and the schema.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let conn = Connection::open(path)?;
        conn.busy_timeout(Duration::from_secs(5))?;
        // WAL lets the CLI read the log while the server is appending to it
        let mode: String =
            conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))?;
        log::debug!("Prediction log journal mode: {}", mode);
        Self::init(conn, Some(path.to_path_buf()))
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::init(Connection::open_in_memory()?, None)
    }

    fn init(conn: Connection, path: Option<PathBuf>) -> Result<Self, StoreError> {
        conn.execute_batch(SCHEMA)?;
        log::debug!(
            "Prediction log ready at {}",
            path.as_deref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| ":memory:".to_string())
        );
        Ok(Self {
            path,
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.conn.lock().map_err(|_| StoreError::LockPoisoned)
    }

    /// Append a prediction stamped with the current local time. Returns the new row id.
    pub fn insert_prediction(&self, prediction: &NewPrediction) -> Result<i64, StoreError> {
        self.insert_prediction_at(prediction, Local::now().naive_local())
    }

    /// Append a prediction with an explicit timestamp.
    pub fn insert_prediction_at(
        &self,
        prediction: &NewPrediction,
        timestamp: NaiveDateTime,
    ) -> Result<i64, StoreError> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO predictions \
             (timestamp, text, sentiment, confidence, prob_negative, prob_positive, text_length, response_time) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                timestamp.format(TIMESTAMP_FORMAT).to_string(),
                prediction.text,
                prediction.sentiment.as_str(),
                prediction.confidence,
                prediction.prob_negative,
                prediction.prob_positive,
                prediction.text_length,
                prediction.response_time,
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// All predictions, newest first, optionally capped at `limit` rows.
    ///
    /// A limit of 0 means no limit.
    pub fn all_predictions(&self, limit: Option<usize>) -> Result<Vec<PredictionRecord>, StoreError> {
        let limit = limit.filter(|&n| n > 0);
        let conn = self.conn()?;
        let order = "ORDER BY timestamp DESC, id DESC";
        let rows = match limit {
            Some(limit) => {
                let mut stmt = conn.prepare(&format!("{} {} LIMIT ?1", SELECT_COLUMNS, order))?;
                let rows = stmt
                    .query_map(params![limit as i64], RawRow::from_row)?
                    .collect::<Result<Vec<_>, _>>()?;
                rows
            }
            None => {
                let mut stmt = conn.prepare(&format!("{} {}", SELECT_COLUMNS, order))?;
                let rows = stmt
                    .query_map([], RawRow::from_row)?
                    .collect::<Result<Vec<_>, _>>()?;
                rows
            }
        };
        rows.into_iter().map(RawRow::into_record).collect()
    }

    /// The `n` most recent predictions.
    pub fn recent_predictions(&self, n: usize) -> Result<Vec<PredictionRecord>, StoreError> {
        self.all_predictions(Some(n))
    }

    /// Predictions on or after `start_date` (calendar day of the stored timestamp), newest first.
    pub fn predictions_since(
        &self,
        start_date: Option<NaiveDate>,
    ) -> Result<Vec<PredictionRecord>, StoreError> {
        let Some(start_date) = start_date else {
            return self.all_predictions(None);
        };

        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "{} WHERE DATE(timestamp) >= ?1 ORDER BY timestamp DESC, id DESC",
            SELECT_COLUMNS
        ))?;
        let rows = stmt
            .query_map(
                params![start_date.format("%Y-%m-%d").to_string()],
                RawRow::from_row,
            )?
            .collect::<Result<Vec<_>, _>>()?;
        rows.into_iter().map(RawRow::into_record).collect()
    }

    pub fn stats(&self) -> Result<PredictionStats, StoreError> {
        let conn = self.conn()?;

        let total: i64 = conn.query_row("SELECT COUNT(*) FROM predictions", [], |r| r.get(0))?;
        if total == 0 {
            return Ok(PredictionStats::default());
        }

        let mut positive_count = 0u64;
        let mut negative_count = 0u64;
        let mut stmt = conn.prepare("SELECT sentiment, COUNT(*) FROM predictions GROUP BY sentiment")?;
        let groups = stmt.query_map([], |r| Ok((r.get::<_, String>(0)?, r.get::<_, i64>(1)?)))?;
        for group in groups {
            let (sentiment, count) = group?;
            match sentiment.as_str() {
                "positive" => positive_count = count as u64,
                "negative" => negative_count = count as u64,
                other => log::warn!("Ignoring {} predictions with unknown sentiment '{}'", count, other),
            }
        }

        let (avg_confidence, avg_response_time, avg_text_length): (
            Option<f64>,
            Option<f64>,
            Option<f64>,
        ) = conn.query_row(
            "SELECT AVG(confidence), AVG(response_time), AVG(text_length) FROM predictions",
            [],
            |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?)),
        )?;

        let total_f = total as f64;
        Ok(PredictionStats {
            total_predictions: total as u64,
            positive_count,
            negative_count,
            positive_ratio: positive_count as f64 / total_f,
            negative_ratio: negative_count as f64 / total_f,
            avg_confidence: avg_confidence.unwrap_or(0.0),
            avg_response_time: avg_response_time.unwrap_or(0.0),
            avg_text_length: avg_text_length.unwrap_or(0.0),
        })
    }

    pub fn prediction_count(&self) -> Result<u64, StoreError> {
        let conn = self.conn()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM predictions", [], |r| r.get(0))?;
        Ok(count as u64)
    }

    /// Delete every logged prediction. Returns the number of rows removed.
    pub fn clear_all_predictions(&self) -> Result<usize, StoreError> {
        let conn = self.conn()?;
        let removed = conn.execute("DELETE FROM predictions", [])?;
        log::warn!("Cleared {} predictions from the log", removed);
        Ok(removed)
    }
}

struct RawRow {
    id: i64,
    timestamp: String,
    text: String,
    sentiment: String,
    confidence: f64,
    prob_negative: f64,
    prob_positive: f64,
    text_length: i64,
    response_time: Option<f64>,
}

impl RawRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            timestamp: row.get(1)?,
            text: row.get(2)?,
            sentiment: row.get(3)?,
            confidence: row.get(4)?,
            prob_negative: row.get(5)?,
            prob_positive: row.get(6)?,
            text_length: row.get(7)?,
            response_time: row.get(8)?,
        })
    }

    fn into_record(self) -> Result<PredictionRecord, StoreError> {
        let timestamp = parse_timestamp(&self.timestamp).ok_or_else(|| StoreError::CorruptRecord {
            id: self.id,
            message: format!("unparseable timestamp '{}'", self.timestamp),
        })?;
        let sentiment: Sentiment =
            self.sentiment
                .parse()
                .map_err(|_| StoreError::CorruptRecord {
                    id: self.id,
                    message: format!("unknown sentiment '{}'", self.sentiment),
                })?;

        Ok(PredictionRecord {
            id: self.id,
            timestamp,
            text: self.text,
            sentiment,
            confidence: self.confidence,
            prob_negative: self.prob_negative,
            prob_positive: self.prob_positive,
            text_length: self.text_length,
            response_time: self.response_time,
        })
    }
}

fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
}
