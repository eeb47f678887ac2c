//! Keyword extraction.
//!
//! Builds a token frequency map from a message by running it through the
//! normalizer, tokenizer and stop-word filter.

use std::collections::BTreeMap;

use super::normalizer::{NormalizationMode, Normalizer};
use super::stopwords::{StopWordFilter, StopWordSet};
use super::tokenizer::Tokenizer;

/// Token → occurrence count for one text. Ordered so iteration is deterministic.
pub type KeywordMap = BTreeMap<String, usize>;

/// Keyword extractor built from the text pipeline stages
#[derive(Debug, Clone)]
pub struct KeywordExtractor {
    normalizer: Normalizer,
    tokenizer: Tokenizer,
    stopwords: StopWordFilter,
    min_word_length: usize,
}

impl Default for KeywordExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl KeywordExtractor {
    /// Create a new keyword extractor with default settings
    pub fn new() -> Self {
        Self::with_config(NormalizationMode::default(), StopWordSet::default(), 1)
    }

    /// Create a keyword extractor with custom configuration
    pub fn with_config(
        mode: NormalizationMode,
        stopwords: StopWordSet,
        min_word_length: usize,
    ) -> Self {
        Self {
            normalizer: Normalizer::new(mode),
            tokenizer: Tokenizer::new(),
            stopwords: StopWordFilter::new(stopwords),
            min_word_length: min_word_length.max(1),
        }
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    /// Normalized tokens with no stop-word removal
    pub fn tokens(&self, text: &str) -> Vec<String> {
        let normalized = self.normalizer.normalize(text);
        self.tokenizer
            .tokenize(&normalized)
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Count content-bearing tokens in `text`
    pub fn extract(&self, text: &str) -> KeywordMap {
        let normalized = self.normalizer.normalize(text);
        let tokens = self.tokenizer.tokenize(&normalized);

        let mut keywords = KeywordMap::new();
        for word in self.stopwords.filter(&tokens) {
            if word.chars().count() < self.min_word_length {
                continue;
            }
            *keywords.entry(word.to_string()).or_insert(0) += 1;
        }
        keywords
    }
}
