//! Response selection with layered fallback.
//!
//! 1. responses stored for the classified intent
//! 2. responses of the most similar stored pattern, if above the threshold
//! 3. a fixed fallback sentence

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::intent::Intent;
use super::random::RandomSource;
use super::responses::ResponseBank;
use super::similarity::SimilarityScorer;

/// Reply used when nothing in the bank fits
pub const FALLBACK_RESPONSE: &str =
    "I'm sorry, I don't understand. Could you please rephrase your question?";

/// Minimum pattern similarity (exclusive) for the pattern scan to answer
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.3;

/// Where a reply came from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResponseSource {
    /// Intent table hit
    Intent,
    /// Best pattern above the similarity threshold
    Pattern { pattern: String, similarity: f64 },
    /// Nothing matched
    Fallback,
}

/// A chosen reply and its provenance
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub response: String,
    pub source: ResponseSource,
}

/// Picks one reply for a message
pub struct ResponseSelector {
    scorer: SimilarityScorer,
    threshold: f64,
    fallback: String,
    random: Arc<dyn RandomSource>,
}

impl ResponseSelector {
    pub fn new(
        scorer: SimilarityScorer,
        threshold: f64,
        fallback: impl Into<String>,
        random: Arc<dyn RandomSource>,
    ) -> Self {
        Self {
            scorer,
            threshold,
            fallback: fallback.into(),
            random,
        }
    }

    pub fn scorer(&self) -> &SimilarityScorer {
        &self.scorer
    }

    fn pick(&self, responses: &[String]) -> Option<String> {
        if responses.is_empty() {
            return None;
        }
        let index = self.random.next_index(responses.len()).min(responses.len() - 1);
        Some(responses[index].clone())
    }

    /// Find the pattern most similar to `text`. Ties keep the earliest pattern.
    fn best_pattern(&self, bank: &ResponseBank, text: &str) -> Option<(String, f64, Vec<String>)> {
        bank.with_patterns(|patterns| {
            let mut best: Option<(usize, f64)> = None;
            for (index, entry) in patterns.iter().enumerate() {
                let similarity = self.scorer.score(text, &entry.pattern);
                if best.map_or(true, |(_, score)| similarity > score) {
                    best = Some((index, similarity));
                }
            }

            best.filter(|(_, score)| *score > self.threshold)
                .map(|(index, score)| {
                    let entry = &patterns[index];
                    (entry.pattern.clone(), score, entry.responses.clone())
                })
        })
    }

    /// Select a reply for `text` classified as `intent`
    pub fn select(&self, bank: &ResponseBank, text: &str, intent: Intent) -> Selection {
        if let Some(response) = self.pick(&bank.responses_for_intent(intent)) {
            return Selection {
                response,
                source: ResponseSource::Intent,
            };
        }

        if let Some((pattern, similarity, responses)) = self.best_pattern(bank, text) {
            if let Some(response) = self.pick(&responses) {
                return Selection {
                    response,
                    source: ResponseSource::Pattern {
                        pattern,
                        similarity,
                    },
                };
            }
        }

        Selection {
            response: self.fallback.clone(),
            source: ResponseSource::Fallback,
        }
    }
}
