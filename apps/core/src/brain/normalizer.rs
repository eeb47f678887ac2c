//! Text normalization.
//!
//! Lowercases input, strips punctuation and collapses whitespace so that
//! intent triggers and pattern keys can be matched with plain substring tests.

use serde::{Deserialize, Serialize};

/// Sentence-ending marks kept by the default normalization mode.
const SENTENCE_MARKS: [char; 3] = ['.', '!', '?'];

/// How aggressively punctuation is removed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NormalizationMode {
    /// Keep `.`, `!` and `?`, drop every other symbol
    #[default]
    KeepSentenceMarks,
    /// Keep only ASCII letters, digits and ASCII whitespace
    Strict,
}

/// Lowercasing, punctuation-stripping normalizer
#[derive(Debug, Clone, Copy, Default)]
pub struct Normalizer {
    mode: NormalizationMode,
}

impl Normalizer {
    pub fn new(mode: NormalizationMode) -> Self {
        Self { mode }
    }

    fn keeps(&self, c: char) -> bool {
        if c.is_ascii_alphanumeric() || c.is_ascii_whitespace() {
            return true;
        }
        match self.mode {
            NormalizationMode::KeepSentenceMarks => SENTENCE_MARKS.contains(&c),
            NormalizationMode::Strict => false,
        }
    }

    /// Normalize a message. Never fails; empty input yields an empty string.
    pub fn normalize(&self, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }

        let filtered: String = text
            .to_lowercase()
            .chars()
            .filter(|c| self.keeps(*c))
            .collect();

        filtered.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}
