//! Whitespace tokenizer over normalized text.

/// Splits normalized text into tokens on runs of whitespace.
///
/// Empty or blank input produces no tokens at all rather than a single empty
/// token, so downstream keyword counting sees zero keywords.
#[derive(Debug, Clone, Copy, Default)]
pub struct Tokenizer;

impl Tokenizer {
    pub fn new() -> Self {
        Self
    }

    pub fn tokenize<'a>(&self, normalized: &'a str) -> Vec<&'a str> {
        normalized.split_whitespace().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_on_whitespace() {
        let tokenizer = Tokenizer::new();
        assert_eq!(
            tokenizer.tokenize("how much does it cost?"),
            vec!["how", "much", "does", "it", "cost?"]
        );
    }

    #[test]
    fn test_empty_input_yields_no_tokens() {
        let tokenizer = Tokenizer::new();
        assert!(tokenizer.tokenize("").is_empty());
        assert!(tokenizer.tokenize("   ").is_empty());
    }
}
