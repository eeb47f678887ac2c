//! Response Bank - in-memory pattern and intent response tables.
//!
//! Both tables sit behind `parking_lot::RwLock`s. Appends happen under the
//! write guard, so a reader always sees either the old or the new list,
//! never a half-updated one.

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

use super::intent::Intent;

/// Which built-in dataset seeds the bank
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeedSet {
    /// Pattern table plus intent responses for the standard tier
    #[default]
    Standard,
    /// Short intent responses for the fast tier, no patterns
    Compact,
    /// Start with empty tables
    Empty,
}

/// A free-text pattern and its candidate responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternEntry {
    /// Lowercased lookup key
    pub pattern: String,
    /// Candidate responses, never empty once stored
    pub responses: Vec<String>,
}

const STANDARD_PATTERNS: &[(&str, &[&str])] = &[
    (
        "hello",
        &[
            "Hello! How can I help you today?",
            "Hi there! What can I do for you?",
            "Greetings! How may I assist you?",
        ],
    ),
    (
        "hi",
        &[
            "Hi! How can I help you?",
            "Hello! What can I do for you today?",
            "Hey there! How may I assist you?",
        ],
    ),
    (
        "help",
        &[
            "I'm here to help! What do you need assistance with?",
            "Sure, I'd be happy to help. What's your question?",
            "How can I assist you today?",
        ],
    ),
    (
        "support",
        &[
            "I'm here to provide support. What issue are you facing?",
            "Let me help you with that. What do you need support with?",
            "I'm ready to assist you. What's the problem?",
        ],
    ),
    (
        "what services do you offer",
        &[
            "We offer a wide range of services including AI chatbots, web development, and consulting.",
            "Our services include custom software development, AI solutions, and technical consulting.",
            "We provide AI chatbot development, web applications, and business automation solutions.",
        ],
    ),
    (
        "tell me about your products",
        &[
            "Our main products include AI-powered chatbots, custom web applications, and automation tools.",
            "We specialize in AI chatbots, business process automation, and custom software solutions.",
            "Our product portfolio includes intelligent chatbots, web platforms, and AI-driven tools.",
        ],
    ),
    (
        "how much does it cost",
        &[
            "Our pricing varies based on your specific needs. Would you like to discuss your requirements?",
            "Costs depend on the complexity and features you need. Let's talk about your project!",
            "Pricing is customized for each client. Can you tell me more about what you're looking for?",
        ],
    ),
    (
        "pricing",
        &[
            "We offer competitive pricing tailored to your needs. What type of solution are you interested in?",
            "Our pricing is flexible and depends on your requirements. Would you like a quote?",
            "Pricing varies by project scope. Let me know what you need and I can provide more details.",
        ],
    ),
    (
        "how does the chatbot work",
        &[
            "I match your message against known topics and pick the reply that fits best.",
            "Each message is normalized, classified into an intent, and answered from a curated set of replies.",
            "It works by analyzing your input, recognizing the intent, and choosing an appropriate prepared response.",
        ],
    ),
    (
        "what can you do",
        &[
            "I can answer questions, provide information about our services, help with support issues, and guide you through our offerings.",
            "I'm designed to assist with inquiries, provide product information, offer support, and help you find what you need.",
            "I can help with general questions, service information, technical support, and connecting you with the right resources.",
        ],
    ),
    (
        "goodbye",
        &[
            "Goodbye! Feel free to return if you have more questions.",
            "Thanks for chatting! Have a great day!",
            "See you later! Don't hesitate to reach out if you need help.",
        ],
    ),
    (
        "bye",
        &[
            "Bye! It was great helping you today.",
            "See you soon! Take care!",
            "Goodbye! Come back anytime you need assistance.",
        ],
    ),
    (
        "thank you",
        &[
            "You're welcome! Happy to help!",
            "My pleasure! Is there anything else I can assist you with?",
            "Glad I could help! Feel free to ask if you have more questions.",
        ],
    ),
    (
        "thanks",
        &[
            "You're welcome!",
            "Happy to help!",
            "Anytime! Let me know if you need anything else.",
        ],
    ),
];

// Question and general are answered from the pattern table.
const STANDARD_INTENTS: &[(Intent, &[&str])] = &[
    (
        Intent::Greeting,
        &[
            "Hello! How can I help you today?",
            "Hi there! What can I do for you?",
            "Greetings! How may I assist you?",
            "Welcome! How can I help you?",
        ],
    ),
    (
        Intent::Goodbye,
        &[
            "Goodbye! Have a great day!",
            "See you later! Take care!",
            "Thanks for chatting! Come back anytime.",
            "Bye! Feel free to return if you have questions.",
        ],
    ),
    (
        Intent::Help,
        &[
            "I'm here to help! What do you need assistance with?",
            "Sure, I'd be happy to help. What's your question?",
            "How can I assist you today?",
            "What can I help you with?",
        ],
    ),
    (
        Intent::Gratitude,
        &[
            "You're welcome! Happy to help!",
            "My pleasure! Anything else I can assist with?",
            "Glad I could help!",
            "You're very welcome!",
        ],
    ),
    (
        Intent::Pricing,
        &[
            "Our pricing varies based on your needs. Would you like to discuss your requirements?",
            "Costs depend on the features you need. Let's talk about your project!",
            "We offer competitive pricing. What type of solution interests you?",
            "Pricing is customized for each client. Can you tell me more about your needs?",
        ],
    ),
    (
        Intent::ProductInquiry,
        &[
            "We offer AI chatbots, web development, and consulting services. What interests you most?",
            "Our products include intelligent chatbots and custom software solutions. Would you like details?",
            "We specialize in AI solutions and web applications. What would you like to know?",
            "Our main offerings are AI chatbots and business automation tools. Any specific questions?",
        ],
    ),
];

const COMPACT_INTENTS: &[(Intent, &[&str])] = &[
    (
        Intent::Greeting,
        &["Hi! How can I help?", "Hello! What do you need?", "Hey there! How can I assist?"],
    ),
    (
        Intent::Help,
        &["I'm here to help! What do you need?", "What can I assist with?", "How can I help you?"],
    ),
    (
        Intent::Pricing,
        &[
            "Our pricing is flexible. What are you looking for?",
            "Costs vary by needs. Tell me more?",
            "Let's discuss your requirements!",
        ],
    ),
    (
        Intent::ProductInquiry,
        &[
            "We offer AI chatbots and web solutions. Interested?",
            "Our products include AI assistants. Want details?",
            "We build smart chatbots. Need one?",
        ],
    ),
    (
        Intent::Gratitude,
        &["You're welcome!", "Happy to help!", "Anytime!", "Glad I could assist!"],
    ),
    (
        Intent::Goodbye,
        &["Goodbye! Come back anytime!", "See you later!", "Bye! Have a great day!", "Take care!"],
    ),
    (
        Intent::Question,
        &[
            "Great question! Let me help.",
            "I'd be happy to answer that.",
            "Here's what I know.",
            "Good question! Let me explain.",
        ],
    ),
    (
        Intent::General,
        &[
            "I understand. How can I help?",
            "Tell me more about that.",
            "Interesting! What would you like to know?",
            "I'm here to assist!",
        ],
    ),
];

const NO_PATTERNS: &[(&str, &[&str])] = &[];
const NO_INTENTS: &[(Intent, &[&str])] = &[];

fn to_owned_list(responses: &[&str]) -> Vec<String> {
    responses.iter().map(|s| s.to_string()).collect()
}

/// Pattern → responses and intent → responses lookup tables
#[derive(Debug, Default)]
pub struct ResponseBank {
    /// Insertion-ordered so similarity scans are reproducible
    patterns: RwLock<Vec<PatternEntry>>,
    intents: RwLock<HashMap<Intent, Vec<String>>>,
}

impl ResponseBank {
    /// Create an empty bank
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a bank preloaded with one of the built-in datasets
    pub fn seeded(seed: SeedSet) -> Self {
        let (patterns, intents) = match seed {
            SeedSet::Standard => (STANDARD_PATTERNS, STANDARD_INTENTS),
            SeedSet::Compact => (NO_PATTERNS, COMPACT_INTENTS),
            SeedSet::Empty => (NO_PATTERNS, NO_INTENTS),
        };

        let bank = Self {
            patterns: RwLock::new(
                patterns
                    .iter()
                    .map(|(pattern, responses)| PatternEntry {
                        pattern: pattern.to_lowercase(),
                        responses: to_owned_list(responses),
                    })
                    .collect(),
            ),
            intents: RwLock::new(
                intents
                    .iter()
                    .map(|(intent, responses)| (*intent, to_owned_list(responses)))
                    .collect(),
            ),
        };

        debug!(
            "Response bank seeded ({:?}): {} patterns, {} intents",
            seed,
            bank.pattern_count(),
            bank.intent_count()
        );
        bank
    }

    /// Responses stored under a pattern (case-insensitive), empty if absent
    pub fn responses_for_pattern(&self, pattern: &str) -> Vec<String> {
        let key = pattern.to_lowercase();
        self.patterns
            .read()
            .iter()
            .find(|entry| entry.pattern == key)
            .map(|entry| entry.responses.clone())
            .unwrap_or_default()
    }

    /// Responses stored under an intent, empty if absent
    pub fn responses_for_intent(&self, intent: Intent) -> Vec<String> {
        self.intents.read().get(&intent).cloned().unwrap_or_default()
    }

    /// Snapshot of every pattern entry in insertion order
    pub fn all_patterns(&self) -> Vec<PatternEntry> {
        self.patterns.read().clone()
    }

    /// Run `f` over the pattern table under a single read guard
    pub fn with_patterns<R>(&self, f: impl FnOnce(&[PatternEntry]) -> R) -> R {
        let guard = self.patterns.read();
        f(&guard)
    }

    /// Append a response to a pattern, creating the entry if needed
    pub fn add_pattern(&self, pattern: &str, response: &str) {
        let key = pattern.to_lowercase();
        let mut patterns = self.patterns.write();
        match patterns.iter_mut().find(|entry| entry.pattern == key) {
            Some(entry) => entry.responses.push(response.to_string()),
            None => patterns.push(PatternEntry {
                pattern: key,
                responses: vec![response.to_string()],
            }),
        }
    }

    /// Append a response to an intent, creating the entry if needed
    pub fn add_intent_response(&self, intent: Intent, response: &str) {
        self.intents
            .write()
            .entry(intent)
            .or_default()
            .push(response.to_string());
    }

    pub fn pattern_count(&self) -> usize {
        self.patterns.read().len()
    }

    pub fn intent_count(&self) -> usize {
        self.intents.read().len()
    }
}
