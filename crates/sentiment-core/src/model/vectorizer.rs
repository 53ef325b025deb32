//! TF-IDF vectorization compatible with a fitted scikit-learn `TfidfVectorizer`
//!
//! Only the word analyzer with unigram features is supported. The exported
//! artifact carries the vocabulary (term to column) and the fitted idf weights;
//! everything else is the scoring-time transform.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::sync::OnceLock;

/// Word tokens of two or more characters, scikit-learn's default token pattern.
const TOKEN_PATTERN: &str = r"\b\w\w+\b";

fn token_regex() -> &'static Regex {
    static TOKEN_RE: OnceLock<Regex> = OnceLock::new();
    TOKEN_RE.get_or_init(|| Regex::new(TOKEN_PATTERN).expect("token pattern is a valid regex"))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Norm {
    #[default]
    L2,
    None,
}

/// Sparse feature vector as `(column, value)` pairs sorted by column.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SparseVector {
    pub entries: Vec<(usize, f64)>,
}

impl SparseVector {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn dot(&self, weights: &[f64]) -> f64 {
        self.entries
            .iter()
            .filter_map(|(idx, value)| weights.get(*idx).map(|w| w * value))
            .sum()
    }

    pub fn l2_norm(&self) -> f64 {
        self.entries.iter().map(|(_, v)| v * v).sum::<f64>().sqrt()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TfidfVectorizer {
    pub vocabulary: HashMap<String, usize>,
    pub idf: Vec<f64>,
    #[serde(default)]
    pub max_features: Option<usize>,
    #[serde(default = "default_lowercase")]
    pub lowercase: bool,
    #[serde(default)]
    pub sublinear_tf: bool,
    #[serde(default)]
    pub norm: Norm,
}

fn default_lowercase() -> bool {
    true
}

impl TfidfVectorizer {
    pub fn new(vocabulary: HashMap<String, usize>, idf: Vec<f64>) -> Self {
        Self {
            vocabulary,
            idf,
            max_features: None,
            lowercase: true,
            sublinear_tf: false,
            norm: Norm::L2,
        }
    }

    /// Number of feature columns.
    pub fn dimension(&self) -> usize {
        self.idf.len()
    }

    /// Check that every vocabulary column has an idf weight.
    pub fn check_consistency(&self) -> Result<(), String> {
        if let Some((term, idx)) = self
            .vocabulary
            .iter()
            .find(|(_, idx)| **idx >= self.idf.len())
        {
            return Err(format!(
                "term '{}' maps to column {} but only {} idf weights exist",
                term,
                idx,
                self.idf.len()
            ));
        }
        Ok(())
    }

    /// Split text into the tokens the vocabulary was fitted on.
    pub fn analyze(&self, text: &str) -> Vec<String> {
        let text = if self.lowercase {
            text.to_lowercase()
        } else {
            text.to_string()
        };
        token_regex()
            .find_iter(&text)
            .map(|m| m.as_str().to_string())
            .collect()
    }

    pub fn transform(&self, text: &str) -> SparseVector {
        let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
        for token in self.analyze(text) {
            if let Some(&idx) = self.vocabulary.get(&token) {
                *counts.entry(idx).or_insert(0.0) += 1.0;
            }
        }

        let mut vector = SparseVector {
            entries: counts
                .into_iter()
                .map(|(idx, tf)| {
                    let tf = if self.sublinear_tf { 1.0 + tf.ln() } else { tf };
                    let idf = self.idf.get(idx).copied().unwrap_or(0.0);
                    (idx, tf * idf)
                })
                .collect(),
        };

        if self.norm == Norm::L2 {
            let norm = vector.l2_norm();
            if norm > 0.0 {
                for (_, value) in vector.entries.iter_mut() {
                    *value /= norm;
                }
            }
        }

        vector
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vectorizer() -> TfidfVectorizer {
        let vocabulary = HashMap::from([
            ("great".to_string(), 0),
            ("movie".to_string(), 1),
            ("terrible".to_string(), 2),
        ]);
        TfidfVectorizer::new(vocabulary, vec![1.5, 1.0, 2.0])
    }

    #[test]
    fn test_analyze_lowercases_and_drops_single_characters() {
        let tokens = vectorizer().analyze("A GREAT movie, I'd say!");
        assert_eq!(tokens, vec!["great", "movie", "say"]);
    }

    #[test]
    fn test_transform_weights_and_normalizes() {
        let v = vectorizer().transform("great great movie");
        assert_eq!(v.entries.len(), 2);

        // raw weights: great = 2 * 1.5 = 3, movie = 1 * 1.0 = 1
        let norm = (3.0f64 * 3.0 + 1.0).sqrt();
        assert!((v.entries[0].1 - 3.0 / norm).abs() < 1e-12);
        assert!((v.entries[1].1 - 1.0 / norm).abs() < 1e-12);
        assert!((v.l2_norm() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_transform_unknown_text_is_empty() {
        let v = vectorizer().transform("completely unseen words");
        assert!(v.is_empty());
    }

    #[test]
    fn test_sublinear_tf() {
        let mut vec = vectorizer();
        vec.sublinear_tf = true;
        vec.norm = Norm::None;
        let v = vec.transform("great great");
        assert!((v.entries[0].1 - (1.0 + 2f64.ln()) * 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_consistency_check_flags_out_of_range_column() {
        let mut vec = vectorizer();
        vec.vocabulary.insert("plot".to_string(), 7);
        assert!(vec.check_consistency().is_err());
    }
}
