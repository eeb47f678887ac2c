//! Stop-word filtering.
//!
//! Two fixed English word lists: the full list used by the standard tier and
//! the compact list used by the fast tier.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Stopwords for the standard tier
const STOPWORDS_STANDARD: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "by", "for", "from", "has", "he", "in", "is", "it",
    "its", "of", "on", "that", "the", "to", "was", "will", "with", "this", "but", "they", "have",
    "had", "what", "said", "each", "which", "she", "do", "how", "their", "if", "up", "out", "many",
    "then", "them", "these", "so", "some", "her", "would", "make", "like", "into", "him", "time",
    "two", "more", "go", "no", "way", "could", "my", "than", "first", "been", "call", "who", "oil",
    "sit", "now", "find", "down", "day", "did", "get", "come", "made", "may", "part",
];

/// Stopwords for the fast tier
const STOPWORDS_COMPACT: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "by", "for", "from", "has", "he", "in", "is", "it",
    "of", "on", "that", "the", "to", "was", "will", "with", "this", "but", "they", "have", "what",
    "do", "how", "if", "up", "out", "so", "her", "him", "my", "no",
];

/// Which built-in stop-word list to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopWordSet {
    #[default]
    Standard,
    Compact,
}

impl StopWordSet {
    fn words(&self) -> &'static [&'static str] {
        match self {
            StopWordSet::Standard => STOPWORDS_STANDARD,
            StopWordSet::Compact => STOPWORDS_COMPACT,
        }
    }
}

/// Removes high-frequency, low-signal tokens
#[derive(Debug, Clone)]
pub struct StopWordFilter {
    stopwords: HashSet<&'static str>,
}

impl Default for StopWordFilter {
    fn default() -> Self {
        Self::new(StopWordSet::default())
    }
}

impl StopWordFilter {
    pub fn new(set: StopWordSet) -> Self {
        Self {
            stopwords: set.words().iter().copied().collect(),
        }
    }

    /// Check if a word is a stopword (case-insensitive)
    pub fn is_stopword(&self, word: &str) -> bool {
        self.stopwords.contains(word.to_lowercase().as_str())
    }

    /// Drop stopwords and empty tokens, keeping the original order
    pub fn filter<'a>(&self, tokens: &[&'a str]) -> Vec<&'a str> {
        tokens
            .iter()
            .copied()
            .filter(|token| !token.trim().is_empty() && !self.is_stopword(token))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.stopwords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stopwords.is_empty()
    }
}
