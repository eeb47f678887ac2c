//! Entity tagging using regex patterns.
//!
//! Reports which kinds of structured values appear in a raw message. It does
//! not extract the values themselves.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

/// Kind of entity found in a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EntityTag {
    Email,
    Phone,
    Number,
}

impl EntityTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityTag::Email => "EMAIL",
            EntityTag::Phone => "PHONE",
            EntityTag::Number => "NUMBER",
        }
    }
}

impl fmt::Display for EntityTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// NOTE: expect() is acceptable here: the patterns are constants
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b")
        .expect("Invalid regex: email pattern")
});

static PHONE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b\d{3}-\d{3}-\d{4}\b|\(\d{3}\)\s*\d{3}-\d{4}\b")
        .expect("Invalid regex: phone pattern")
});

static NUMBER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d+\b").expect("Invalid regex: number pattern"));

/// Tag the entity kinds present in `text`, in EMAIL, PHONE, NUMBER order
pub fn extract_entities(text: &str) -> Vec<EntityTag> {
    let checks: [(EntityTag, &Regex); 3] = [
        (EntityTag::Email, &EMAIL_PATTERN),
        (EntityTag::Phone, &PHONE_PATTERN),
        (EntityTag::Number, &NUMBER_PATTERN),
    ];

    checks
        .into_iter()
        .filter(|(_, pattern)| pattern.is_match(text))
        .map(|(tag, _)| tag)
        .collect()
}
