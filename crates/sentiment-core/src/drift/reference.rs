//! Loading the two sides of a drift comparison

use super::{Dataset, Observation};
use crate::errors::DriftError;
use crate::model::Sentiment;
use crate::store::PredictionLog;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Deserialize;
use std::path::Path;

/// A row of the processed training split.
#[derive(Debug, Deserialize)]
struct ReferenceRow {
    review_clean: String,
    sentiment: String,
}

/// Load the processed training split as reference data.
///
/// When the file holds more than `sample_size` rows, a seeded sample without
/// replacement is taken, so repeated runs compare against the same reference.
pub fn load_reference_data(
    path: impl AsRef<Path>,
    sample_size: usize,
    seed: u64,
) -> Result<Dataset, DriftError> {
    let path = path.as_ref();
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .map_err(|e| DriftError::Reference {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    let mut rows = Vec::new();
    for (line, result) in reader.deserialize::<ReferenceRow>().enumerate() {
        let row = result?;
        let sentiment: Sentiment = row.sentiment.parse().map_err(|_| DriftError::Reference {
            path: path.to_path_buf(),
            message: format!("row {}: unknown sentiment '{}'", line + 1, row.sentiment),
        })?;
        rows.push(Observation::new(row.review_clean, sentiment));
    }

    let total = rows.len();
    if total > sample_size {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut picked = rand::seq::index::sample(&mut rng, total, sample_size).into_vec();
        picked.sort_unstable();

        let mut slots: Vec<Option<Observation>> = rows.into_iter().map(Some).collect();
        rows = picked
            .into_iter()
            .filter_map(|idx| slots[idx].take())
            .collect();
    }

    log::info!(
        "Loaded {} reference rows from {} ({} available)",
        rows.len(),
        path.display(),
        total
    );
    Ok(Dataset::new(rows))
}

/// Project every logged prediction into a production dataset.
pub fn load_production_data(log: &PredictionLog) -> Result<Dataset, DriftError> {
    let records = log.all_predictions(None)?;
    Ok(records
        .into_iter()
        .map(|r| Observation {
            text_length: r.text_length.max(0) as usize,
            text: r.text,
            sentiment: r.sentiment,
        })
        .collect())
}
