//! Recording served predictions into the prediction log

use crate::errors::StoreError;
use crate::model::Prediction;
use crate::store::{NewPrediction, PredictionLog};

/// Log one served prediction. `text_length` is the character count of `text`.
///
/// Returns the id of the inserted row.
pub fn log_prediction(
    log: &PredictionLog,
    text: &str,
    prediction: &Prediction,
    response_time_ms: Option<f64>,
) -> Result<i64, StoreError> {
    let record = NewPrediction::from_prediction(text, prediction, response_time_ms);
    let id = log.insert_prediction(&record)?;
    log::debug!(
        "Logged prediction {} ({}, confidence {:.4})",
        id,
        prediction.sentiment,
        prediction.confidence
    );
    Ok(id)
}
