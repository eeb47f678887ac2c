//! Confidence estimation.
//!
//! Heuristic scores, not probabilities: a per-intent base value adjusted by
//! message length.

use serde::{Deserialize, Serialize};

use super::intent::Intent;
use super::keywords::KeywordMap;

/// Confidence for a message with no keywords (word-length model)
pub const NO_KEYWORD_CONFIDENCE: f64 = 0.3;

/// Which length heuristic to apply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceModel {
    /// Base × word-count factor, capped at 0.95
    #[default]
    WordLength,
    /// Base + character-count bonus, capped at 0.99
    CharLength,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ConfidenceEstimator {
    model: ConfidenceModel,
}

impl ConfidenceEstimator {
    pub fn new(model: ConfidenceModel) -> Self {
        Self { model }
    }

    fn base(&self, intent: Intent) -> f64 {
        match (self.model, intent) {
            (ConfidenceModel::WordLength, Intent::Greeting | Intent::Goodbye | Intent::Gratitude) => 0.9,
            (ConfidenceModel::WordLength, Intent::Help | Intent::Question) => 0.7,
            (ConfidenceModel::WordLength, Intent::Pricing | Intent::ProductInquiry) => 0.8,
            (ConfidenceModel::WordLength, Intent::General) => 0.5,
            (ConfidenceModel::CharLength, Intent::Greeting | Intent::Goodbye | Intent::Gratitude) => 0.95,
            (ConfidenceModel::CharLength, Intent::Help | Intent::Question) => 0.85,
            (ConfidenceModel::CharLength, Intent::Pricing | Intent::ProductInquiry) => 0.80,
            (ConfidenceModel::CharLength, Intent::General) => 0.70,
        }
    }

    /// Estimate confidence for the raw `message`, its keyword map and intent
    pub fn estimate(&self, message: &str, keywords: &KeywordMap, intent: Intent) -> f64 {
        let base = self.base(intent);
        match self.model {
            ConfidenceModel::WordLength => {
                if keywords.is_empty() {
                    return NO_KEYWORD_CONFIDENCE;
                }
                let word_count = message.split_whitespace().count() as f64;
                let length_factor = (word_count / 10.0).min(1.0);
                (base * (0.7 + 0.3 * length_factor)).min(0.95)
            }
            ConfidenceModel::CharLength => {
                let char_count = message.chars().count() as f64;
                let length_bonus = (char_count / 200.0).min(0.1);
                (base + length_bonus).min(0.99)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keywords(words: &[&str]) -> KeywordMap {
        words.iter().map(|w| (w.to_string(), 1)).collect()
    }

    #[test]
    fn test_no_keywords_floor() {
        let estimator = ConfidenceEstimator::new(ConfidenceModel::WordLength);
        for intent in [Intent::Greeting, Intent::Pricing, Intent::General] {
            assert_eq!(estimator.estimate("the and is", &KeywordMap::new(), intent), 0.3);
        }
    }

    #[test]
    fn test_word_length_model() {
        let estimator = ConfidenceEstimator::new(ConfidenceModel::WordLength);
        let kw = keywords(&["hello", "cost"]);

        // 6 words → factor 0.6 → 0.9 × 0.88
        let c = estimator.estimate("Hello, how much does it cost?", &kw, Intent::Greeting);
        assert!((c - 0.792).abs() < 1e-9);

        // 1 word → 0.5 × 0.73
        let c = estimator.estimate("zebra", &kw, Intent::General);
        assert!((c - 0.365).abs() < 1e-9);

        // 12 words → factor capped at 1.0
        let long = "one two three four five six seven eight nine ten eleven twelve";
        let c = estimator.estimate(long, &kw, Intent::Greeting);
        assert!((c - 0.9).abs() < 1e-9);
    }

    #[test]
    fn test_char_length_model() {
        let estimator = ConfidenceEstimator::new(ConfidenceModel::CharLength);
        let empty = KeywordMap::new();

        // 20 chars → +0.1 capped
        let c = estimator.estimate("hello hello hello!!!", &empty, Intent::Greeting);
        assert!((c - 0.99).abs() < 1e-9);

        let c = estimator.estimate("price", &empty, Intent::Pricing);
        assert!((c - 0.825).abs() < 1e-9);

        let c = estimator.estimate("", &empty, Intent::General);
        assert!((c - 0.70).abs() < 1e-9);
    }

    #[test]
    fn test_always_in_unit_range() {
        let long = "word ".repeat(500);
        for model in [ConfidenceModel::WordLength, ConfidenceModel::CharLength] {
            let estimator = ConfidenceEstimator::new(model);
            for intent in Intent::ALL {
                let c = estimator.estimate(&long, &keywords(&["word"]), intent);
                assert!((0.0..=1.0).contains(&c));
            }
        }
    }
}
