//! Binary logistic regression scoring

use super::vectorizer::SparseVector;
use super::{ClassProbabilities, Sentiment};
use crate::errors::ModelError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticRegression {
    /// Class labels in column order; index 1 is the class the coefficients favor.
    pub classes: Vec<String>,
    pub coef: Vec<f64>,
    pub intercept: f64,
}

impl LogisticRegression {
    pub fn dimension(&self) -> usize {
        self.coef.len()
    }

    /// Resolve the two class labels into sentiments.
    pub fn sentiment_classes(&self) -> Result<[Sentiment; 2], ModelError> {
        match self.classes.as_slice() {
            [first, second] => {
                let first: Sentiment = first.parse()?;
                let second: Sentiment = second.parse()?;
                if first == second {
                    return Err(ModelError::UnknownClass(format!(
                        "duplicate class '{}'",
                        first
                    )));
                }
                Ok([first, second])
            }
            other => Err(ModelError::UnknownClass(format!(
                "expected exactly two classes, found {}",
                other.len()
            ))),
        }
    }

    pub fn decision_function(&self, features: &SparseVector) -> f64 {
        features.dot(&self.coef) + self.intercept
    }

    /// Probability of `classes[0]` and `classes[1]`.
    pub fn predict_proba(&self, features: &SparseVector) -> [f64; 2] {
        let p = sigmoid(self.decision_function(features));
        [1.0 - p, p]
    }

    /// Score features into a [`Prediction`](super::Prediction).
    ///
    /// The second class wins only for a strictly positive decision value.
    pub fn predict(
        &self,
        classes: [Sentiment; 2],
        features: &SparseVector,
    ) -> super::Prediction {
        let z = self.decision_function(features);
        let p = sigmoid(z);
        let proba = [1.0 - p, p];
        let winner = if z > 0.0 { 1 } else { 0 };

        let (negative, positive) = if classes[0] == Sentiment::Negative {
            (proba[0], proba[1])
        } else {
            (proba[1], proba[0])
        };

        super::Prediction {
            sentiment: classes[winner],
            confidence: proba[winner],
            probabilities: ClassProbabilities { negative, positive },
        }
    }
}

fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> LogisticRegression {
        LogisticRegression {
            classes: vec!["negative".to_string(), "positive".to_string()],
            coef: vec![2.0, -3.0],
            intercept: 0.0,
        }
    }

    #[test]
    fn test_predict_proba_sums_to_one() {
        let features = SparseVector {
            entries: vec![(0, 0.6), (1, 0.8)],
        };
        let [neg, pos] = model().predict_proba(&features);
        assert!((neg + pos - 1.0).abs() < 1e-12);
        assert!(neg > pos);
    }

    #[test]
    fn test_zero_decision_picks_first_class() {
        let classes = model().sentiment_classes().unwrap();
        let prediction = model().predict(classes, &SparseVector::default());
        assert_eq!(prediction.sentiment, Sentiment::Negative);
        assert!((prediction.confidence - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_reversed_class_order_maps_probabilities() {
        let mut m = model();
        m.classes = vec!["positive".to_string(), "negative".to_string()];
        let classes = m.sentiment_classes().unwrap();
        let features = SparseVector {
            entries: vec![(0, 1.0)],
        };
        let prediction = m.predict(classes, &features);

        // z = 2, so classes[1] (negative) wins
        assert_eq!(prediction.sentiment, Sentiment::Negative);
        assert!(prediction.probabilities.negative > prediction.probabilities.positive);
        assert_eq!(prediction.confidence, prediction.probabilities.negative);
    }

    #[test]
    fn test_sigmoid_is_stable_for_large_inputs() {
        assert_eq!(sigmoid(1000.0), 1.0);
        assert_eq!(sigmoid(-1000.0), 0.0);
    }

    #[test]
    fn test_class_validation() {
        let mut m = model();
        m.classes = vec!["positive".to_string()];
        assert!(m.sentiment_classes().is_err());
        m.classes = vec!["positive".to_string(), "positive".to_string()];
        assert!(m.sentiment_classes().is_err());
    }
}
