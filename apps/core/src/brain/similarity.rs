//! Text similarity scoring.
//!
//! Cosine similarity over keyword frequency vectors, and a cheaper Jaccard
//! similarity over raw token sets for the fast tier.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

use super::keywords::{KeywordExtractor, KeywordMap};
use crate::error::AppError;

/// Which similarity measure the scorer applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimilarityAlgorithm {
    /// Cosine over keyword frequencies (stop words removed)
    #[default]
    Cosine,
    /// Jaccard over normalized token sets (stop words kept)
    Jaccard,
}

impl std::str::FromStr for SimilarityAlgorithm {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cosine" => Ok(SimilarityAlgorithm::Cosine),
            "jaccard" => Ok(SimilarityAlgorithm::Jaccard),
            other => Err(AppError::Validation(format!(
                "unknown similarity algorithm '{}'",
                other
            ))),
        }
    }
}

/// Scores two texts in [0, 1]. Symmetric and deterministic.
#[derive(Debug, Clone)]
pub struct SimilarityScorer {
    algorithm: SimilarityAlgorithm,
    extractor: KeywordExtractor,
}

impl SimilarityScorer {
    pub fn new(algorithm: SimilarityAlgorithm, extractor: KeywordExtractor) -> Self {
        Self {
            algorithm,
            extractor,
        }
    }

    pub fn algorithm(&self) -> SimilarityAlgorithm {
        self.algorithm
    }

    pub fn score(&self, a: &str, b: &str) -> f64 {
        match self.algorithm {
            SimilarityAlgorithm::Cosine => {
                cosine_similarity(&self.extractor.extract(a), &self.extractor.extract(b))
            }
            SimilarityAlgorithm::Jaccard => {
                jaccard_similarity(&self.extractor.tokens(a), &self.extractor.tokens(b))
            }
        }
    }
}

/// Calculate cosine similarity between two keyword frequency maps
pub fn cosine_similarity(a: &KeywordMap, b: &KeywordMap) -> f64 {
    let all_words: BTreeSet<&String> = a.keys().chain(b.keys()).collect();
    if all_words.is_empty() {
        return 0.0;
    }

    let mut dot_product = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;

    for word in all_words {
        let freq_a = a.get(word).copied().unwrap_or(0) as f64;
        let freq_b = b.get(word).copied().unwrap_or(0) as f64;

        dot_product += freq_a * freq_b;
        norm_a += freq_a * freq_a;
        norm_b += freq_b * freq_b;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    // sqrt of the product keeps self-similarity at exactly 1.0
    (dot_product / (norm_a * norm_b).sqrt()).clamp(0.0, 1.0)
}

/// Calculate Jaccard similarity between two token lists treated as sets
pub fn jaccard_similarity(a: &[String], b: &[String]) -> f64 {
    let set_a: HashSet<&str> = a.iter().map(String::as_str).collect();
    let set_b: HashSet<&str> = b.iter().map(String::as_str).collect();

    let union = set_a.union(&set_b).count();
    if union == 0 {
        return 0.0;
    }

    let intersection = set_a.intersection(&set_b).count();
    intersection as f64 / union as f64
}
