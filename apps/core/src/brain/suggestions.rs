//! Canned prompt suggestions for partially typed messages.

use serde::{Deserialize, Serialize};

use super::intent::Intent;

/// Partial input shorter than this gets the generic starter prompts
pub const MIN_PARTIAL_CHARS: usize = 2;

/// Which suggestion lists to serve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionSet {
    #[default]
    Standard,
    Compact,
}

struct SuggestionLists {
    starters: &'static [&'static str],
    greeting: &'static [&'static str],
    help: &'static [&'static str],
    pricing: &'static [&'static str],
    other: &'static [&'static str],
}

const STANDARD: SuggestionLists = SuggestionLists {
    starters: &[
        "Hello, how can I help you?",
        "What are your services?",
        "How much does it cost?",
        "Can you help me with...",
    ],
    greeting: &[
        "Hello! How can I assist you today?",
        "Hi there! What can I help you with?",
    ],
    help: &[
        "I need help with my account",
        "Can you help me understand your services?",
        "I need technical support",
    ],
    pricing: &[
        "What are your pricing plans?",
        "How much does the premium service cost?",
        "Do you offer discounts?",
    ],
    other: &[
        "Tell me more about your products",
        "What services do you offer?",
        "How can I get started?",
    ],
};

const COMPACT: SuggestionLists = SuggestionLists {
    starters: &[
        "Hello!",
        "What services do you offer?",
        "How much does it cost?",
        "Can you help me?",
    ],
    greeting: &["Hello! How can you help?", "Hi there! What do you do?"],
    help: &["I need help with...", "Can you assist me with..."],
    pricing: &["What are your prices?", "How much do you charge?"],
    other: &["Tell me more", "What can you do?", "How does this work?"],
};

impl SuggestionSet {
    fn lists(&self) -> &'static SuggestionLists {
        match self {
            SuggestionSet::Standard => &STANDARD,
            SuggestionSet::Compact => &COMPACT,
        }
    }

    /// True when `partial` is too short to classify
    pub fn needs_starters(partial: &str) -> bool {
        partial.chars().count() < MIN_PARTIAL_CHARS
    }

    /// Generic prompts offered before the user has typed anything useful
    pub fn starters(&self) -> Vec<String> {
        to_owned_list(self.lists().starters)
    }

    /// Prompts curated for the intent of what has been typed so far
    pub fn for_intent(&self, intent: Intent) -> Vec<String> {
        let lists = self.lists();
        let chosen = match intent {
            Intent::Greeting => lists.greeting,
            Intent::Help => lists.help,
            Intent::Pricing => lists.pricing,
            _ => lists.other,
        };
        to_owned_list(chosen)
    }
}

fn to_owned_list(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starters_have_four_items() {
        assert_eq!(SuggestionSet::Standard.starters().len(), 4);
        assert_eq!(SuggestionSet::Compact.starters().len(), 4);
    }

    #[test]
    fn test_needs_starters_boundary() {
        assert!(SuggestionSet::needs_starters(""));
        assert!(SuggestionSet::needs_starters("a"));
        assert!(!SuggestionSet::needs_starters("hi"));
    }

    #[test]
    fn test_intent_lists_are_distinct() {
        let set = SuggestionSet::Standard;
        let greeting = set.for_intent(Intent::Greeting);
        let help = set.for_intent(Intent::Help);
        let pricing = set.for_intent(Intent::Pricing);
        let other = set.for_intent(Intent::Goodbye);

        assert_ne!(greeting, help);
        assert_ne!(help, pricing);
        assert_ne!(pricing, other);
        assert_eq!(other, set.for_intent(Intent::General));
    }
}
