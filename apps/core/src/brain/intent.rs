//! Intent classification using ordered trigger rules.
//!
//! Rules are evaluated top to bottom against normalized text and the first
//! rule with a matching trigger wins. No ML model required.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use crate::error::AppError;

/// Detected intent type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    /// Greeting (hello, hi, hey, good morning, etc.)
    Greeting,
    /// Farewell (bye, goodbye, see you, etc.)
    Goodbye,
    /// Help/Assistance (help, assist, support)
    Help,
    /// Question (what, how, when, where, why, ?)
    Question,
    /// Thanks (thank, thanks, appreciate)
    Gratitude,
    /// Pricing (price, cost, fee, payment)
    Pricing,
    /// Product or service inquiry
    ProductInquiry,
    /// Catch-all
    General,
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl Intent {
    pub const ALL: [Intent; 8] = [
        Intent::Greeting,
        Intent::Goodbye,
        Intent::Help,
        Intent::Question,
        Intent::Gratitude,
        Intent::Pricing,
        Intent::ProductInquiry,
        Intent::General,
    ];

    /// Returns the canonical label for the intent
    pub fn label(&self) -> &'static str {
        match self {
            Intent::Greeting => "greeting",
            Intent::Goodbye => "goodbye",
            Intent::Help => "help",
            Intent::Question => "question",
            Intent::Gratitude => "gratitude",
            Intent::Pricing => "pricing",
            Intent::ProductInquiry => "product_inquiry",
            Intent::General => "general",
        }
    }
}

impl FromStr for Intent {
    type Err = AppError;

    /// Parses a canonical label. `product` is accepted as an alias of
    /// `product_inquiry`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let label = s.trim().to_lowercase();
        if label == "product" {
            return Ok(Intent::ProductInquiry);
        }
        Intent::ALL
            .iter()
            .copied()
            .find(|intent| intent.label() == label)
            .ok_or_else(|| AppError::Validation(format!("unknown intent '{}'", s.trim())))
    }
}

/// How a trigger is compared with the normalized text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MatchKind {
    /// Trigger appears anywhere in the text
    Contains,
    /// Text starts with the trigger
    Prefix,
}

/// One classification rule
#[derive(Debug, Clone)]
struct IntentRule {
    intent: Intent,
    triggers: &'static [&'static str],
    kind: MatchKind,
}

impl IntentRule {
    const fn contains(intent: Intent, triggers: &'static [&'static str]) -> Self {
        Self {
            intent,
            triggers,
            kind: MatchKind::Contains,
        }
    }

    const fn prefix(intent: Intent, triggers: &'static [&'static str]) -> Self {
        Self {
            intent,
            triggers,
            kind: MatchKind::Prefix,
        }
    }

    fn first_match(&self, text: &str) -> Option<&'static str> {
        self.triggers.iter().copied().find(|trigger| match self.kind {
            MatchKind::Contains => text.contains(trigger),
            MatchKind::Prefix => text.starts_with(trigger),
        })
    }
}

/// Which rule table the classifier evaluates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentRuleSet {
    /// Fixed priority tiers, one rule per intent
    #[default]
    Tiered,
    /// Ordered single-keyword table plus a question-prefix rule
    Flat,
}

// Priority order is significant: "hello, what's the price" is a greeting.
static TIERED_RULES: LazyLock<Vec<IntentRule>> = LazyLock::new(|| {
    vec![
        IntentRule::contains(
            Intent::Greeting,
            &["hello", "hi", "hey", "good morning", "good afternoon"],
        ),
        IntentRule::contains(Intent::Goodbye, &["bye", "goodbye", "see you", "farewell"]),
        IntentRule::contains(Intent::Help, &["help", "assist", "support"]),
        IntentRule::contains(Intent::Question, &["what", "how", "when", "where", "why", "?"]),
        IntentRule::contains(Intent::Gratitude, &["thank", "thanks", "appreciate"]),
        IntentRule::contains(Intent::Pricing, &["price", "cost", "fee", "payment"]),
        IntentRule::contains(Intent::ProductInquiry, &["product", "service", "feature"]),
    ]
});

// Keyword rules follow the tiered priority so both tables agree on messages
// that mention several intents. Question rules come last.
static FLAT_RULES: LazyLock<Vec<IntentRule>> = LazyLock::new(|| {
    vec![
        IntentRule::contains(Intent::Greeting, &["hello"]),
        IntentRule::contains(Intent::Greeting, &["hi"]),
        IntentRule::contains(Intent::Greeting, &["hey"]),
        IntentRule::contains(Intent::Goodbye, &["bye"]),
        IntentRule::contains(Intent::Goodbye, &["goodbye"]),
        IntentRule::contains(Intent::Help, &["help"]),
        IntentRule::contains(Intent::Help, &["support"]),
        IntentRule::contains(Intent::Help, &["assist"]),
        IntentRule::contains(Intent::Gratitude, &["thanks"]),
        IntentRule::contains(Intent::Gratitude, &["thank"]),
        IntentRule::contains(Intent::Pricing, &["price"]),
        IntentRule::contains(Intent::Pricing, &["cost"]),
        IntentRule::contains(Intent::Pricing, &["fee"]),
        IntentRule::contains(Intent::ProductInquiry, &["service"]),
        IntentRule::contains(Intent::ProductInquiry, &["product"]),
        IntentRule::contains(Intent::Question, &["?"]),
        IntentRule::prefix(Intent::Question, &["what", "how", "when", "where", "why"]),
    ]
});

/// Result of intent classification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentResult {
    /// Detected intent
    pub intent: Intent,
    /// Trigger that fired, `None` for the general fallback
    pub trigger: Option<String>,
}

impl IntentResult {
    fn general() -> Self {
        Self {
            intent: Intent::General,
            trigger: None,
        }
    }
}

/// Intent classifier over a fixed rule table
#[derive(Debug, Clone, Copy)]
pub struct IntentClassifier {
    rule_set: IntentRuleSet,
}

impl Default for IntentClassifier {
    fn default() -> Self {
        Self::new(IntentRuleSet::default())
    }
}

impl IntentClassifier {
    pub fn new(rule_set: IntentRuleSet) -> Self {
        Self { rule_set }
    }

    fn rules(&self) -> &'static [IntentRule] {
        match self.rule_set {
            IntentRuleSet::Tiered => &TIERED_RULES,
            IntentRuleSet::Flat => &FLAT_RULES,
        }
    }

    /// Classify already-normalized text
    pub fn classify(&self, normalized: &str) -> IntentResult {
        if normalized.is_empty() {
            return IntentResult::general();
        }

        self.rules()
            .iter()
            .find_map(|rule| {
                rule.first_match(normalized).map(|trigger| IntentResult {
                    intent: rule.intent,
                    trigger: Some(trigger.to_string()),
                })
            })
            .unwrap_or_else(IntentResult::general)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tiered_priority() {
        let classifier = IntentClassifier::new(IntentRuleSet::Tiered);

        let result = classifier.classify("hello how much does the price come to");
        assert_eq!(result.intent, Intent::Greeting);
        assert_eq!(result.trigger.as_deref(), Some("hello"));

        // help outranks question
        assert_eq!(classifier.classify("what support do you give").intent, Intent::Help);
        // question outranks pricing
        assert_eq!(classifier.classify("what is the cost").intent, Intent::Question);
    }

    #[test]
    fn test_tiered_each_intent() {
        let classifier = IntentClassifier::new(IntentRuleSet::Tiered);

        assert_eq!(classifier.classify("good morning").intent, Intent::Greeting);
        assert_eq!(classifier.classify("see you tomorrow").intent, Intent::Goodbye);
        assert_eq!(classifier.classify("can you assist me").intent, Intent::Help);
        assert_eq!(classifier.classify("is it open?").intent, Intent::Question);
        assert_eq!(classifier.classify("i appreciate it").intent, Intent::Gratitude);
        assert_eq!(classifier.classify("is there a fee").intent, Intent::Pricing);
        assert_eq!(classifier.classify("new feature list").intent, Intent::ProductInquiry);
        assert_eq!(classifier.classify("blue sky").intent, Intent::General);
    }

    #[test]
    fn test_substring_containment() {
        let classifier = IntentClassifier::new(IntentRuleSet::Tiered);
        // "hi" inside "this" still fires the greeting rule
        assert_eq!(classifier.classify("this one").intent, Intent::Greeting);
        assert_eq!(classifier.classify("thanksgiving plans").intent, Intent::Gratitude);
    }

    #[test]
    fn test_flat_table() {
        let classifier = IntentClassifier::new(IntentRuleSet::Flat);

        assert_eq!(classifier.classify("hey").intent, Intent::Greeting);
        assert_eq!(classifier.classify("need support").intent, Intent::Help);
        assert_eq!(classifier.classify("our fee").intent, Intent::Pricing);
        assert_eq!(classifier.classify("your product").intent, Intent::ProductInquiry);
        assert_eq!(classifier.classify("thank you").intent, Intent::Gratitude);
        assert_eq!(classifier.classify("bye now").intent, Intent::Goodbye);
        assert_eq!(classifier.classify("where are you located").intent, Intent::Question);
        assert_eq!(classifier.classify("you are located where").intent, Intent::General);
    }

    #[test]
    fn test_flat_table_order() {
        let classifier = IntentClassifier::new(IntentRuleSet::Flat);
        // pricing keys are checked before product keys
        let result = classifier.classify("product cost");
        assert_eq!(result.intent, Intent::Pricing);
        assert_eq!(result.trigger.as_deref(), Some("cost"));
    }

    #[test]
    fn test_flat_table_follows_tiered_priority() {
        let classifier = IntentClassifier::new(IntentRuleSet::Flat);

        let result = classifier.classify("goodbye and thanks for the help");
        assert_eq!(result.intent, Intent::Goodbye);
        assert_eq!(result.trigger.as_deref(), Some("bye"));
        assert_eq!(classifier.classify("thanks for the price info").intent, Intent::Gratitude);
        assert_eq!(classifier.classify("need help with a fee").intent, Intent::Help);
    }

    #[test]
    fn test_empty_is_general() {
        for rule_set in [IntentRuleSet::Tiered, IntentRuleSet::Flat] {
            let result = IntentClassifier::new(rule_set).classify("");
            assert_eq!(result.intent, Intent::General);
            assert!(result.trigger.is_none());
        }
    }

    #[test]
    fn test_labels_round_trip() {
        for intent in Intent::ALL {
            assert_eq!(intent.label().parse::<Intent>().ok(), Some(intent));
        }
        assert_eq!("product".parse::<Intent>().ok(), Some(Intent::ProductInquiry));
        assert!("weather".parse::<Intent>().is_err());
        assert_eq!(Intent::ProductInquiry.to_string(), "product_inquiry");
    }
}
