//! Engine configuration.
//!
//! A config starts from a tier preset, is optionally overlaid with a JSON
//! file, then with individual environment overrides, and is validated last.

use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;
use validator::Validate;

use crate::brain::cache::MAX_CACHE_CAPACITY;
use crate::brain::confidence::ConfidenceModel;
use crate::brain::intent::IntentRuleSet;
use crate::brain::normalizer::NormalizationMode;
use crate::brain::responses::SeedSet;
use crate::brain::selector::{DEFAULT_SIMILARITY_THRESHOLD, FALLBACK_RESPONSE};
use crate::brain::similarity::SimilarityAlgorithm;
use crate::brain::stopwords::StopWordSet;
use crate::brain::suggestions::SuggestionSet;
use crate::error::AppError;

pub const ENV_TIER: &str = "REPLYDESK_TIER";
pub const ENV_CONFIG_FILE: &str = "REPLYDESK_CONFIG";
pub const ENV_SEED: &str = "REPLYDESK_SEED";
pub const ENV_CACHE_CAPACITY: &str = "REPLYDESK_CACHE_CAPACITY";
pub const ENV_SIMILARITY: &str = "REPLYDESK_SIMILARITY";
pub const ENV_SIMILARITY_THRESHOLD: &str = "REPLYDESK_SIMILARITY_THRESHOLD";

/// Fast tier cache size
pub const FAST_CACHE_CAPACITY: usize = 1024;

/// Performance tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    #[default]
    Standard,
    Fast,
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tier::Standard => write!(f, "standard"),
            Tier::Fast => write!(f, "fast"),
        }
    }
}

impl FromStr for Tier {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "standard" => Ok(Tier::Standard),
            "fast" => Ok(Tier::Fast),
            other => Err(AppError::Config(format!("unknown tier '{}'", other))),
        }
    }
}

/// Every knob of the reply pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct EngineConfig {
    pub tier: Tier,
    pub normalization: NormalizationMode,
    pub stop_words: StopWordSet,
    /// Keywords shorter than this many characters are dropped
    pub min_keyword_length: usize,
    pub intent_rules: IntentRuleSet,
    pub similarity: SimilarityAlgorithm,
    /// Exclusive lower bound a pattern must beat to be used
    #[validate(range(min = 0.0, max = 1.0))]
    pub similarity_threshold: f64,
    pub confidence: ConfidenceModel,
    pub seed_set: SeedSet,
    pub suggestions: SuggestionSet,
    /// Zero disables the analysis cache
    #[validate(range(max = MAX_CACHE_CAPACITY))]
    pub cache_capacity: usize,
    /// Seeds the random source for reproducible replies
    #[serde(default)]
    pub seed: Option<u64>,
    #[validate(length(min = 1))]
    pub fallback_response: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::standard()
    }
}

impl EngineConfig {
    /// Full pattern table, tiered rules, cosine similarity, no cache
    pub fn standard() -> Self {
        Self {
            tier: Tier::Standard,
            normalization: NormalizationMode::KeepSentenceMarks,
            stop_words: StopWordSet::Standard,
            min_keyword_length: 1,
            intent_rules: IntentRuleSet::Tiered,
            similarity: SimilarityAlgorithm::Cosine,
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            confidence: ConfidenceModel::WordLength,
            seed_set: SeedSet::Standard,
            suggestions: SuggestionSet::Standard,
            cache_capacity: 0,
            seed: None,
            fallback_response: FALLBACK_RESPONSE.to_string(),
        }
    }

    /// Short intent replies, flat rules, jaccard similarity, LRU cache
    pub fn fast() -> Self {
        Self {
            tier: Tier::Fast,
            normalization: NormalizationMode::Strict,
            stop_words: StopWordSet::Compact,
            min_keyword_length: 3,
            intent_rules: IntentRuleSet::Flat,
            similarity: SimilarityAlgorithm::Jaccard,
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            confidence: ConfidenceModel::CharLength,
            seed_set: SeedSet::Compact,
            suggestions: SuggestionSet::Compact,
            cache_capacity: FAST_CACHE_CAPACITY,
            seed: None,
            fallback_response: FALLBACK_RESPONSE.to_string(),
        }
    }

    pub fn for_tier(tier: Tier) -> Self {
        match tier {
            Tier::Standard => Self::standard(),
            Tier::Fast => Self::fast(),
        }
    }

    /// Run the validator rules
    pub fn validated(self) -> Result<Self, AppError> {
        // range checks let NaN through
        if !self.similarity_threshold.is_finite() {
            return Err(AppError::Validation(format!(
                "similarity_threshold must be a finite number, got {}",
                self.similarity_threshold
            )));
        }
        self.validate()?;
        Ok(self)
    }

    /// Overlay a JSON object onto this config. Keys absent from the JSON keep
    /// their current value.
    pub fn merge_json(self, json: &str) -> Result<Self, AppError> {
        let overlay: serde_json::Value = serde_json::from_str(json)?;
        let serde_json::Value::Object(overlay) = overlay else {
            return Err(AppError::Config("config file must hold a JSON object".to_string()));
        };

        let mut base = serde_json::to_value(self)?;
        if let serde_json::Value::Object(fields) = &mut base {
            fields.extend(overlay);
        }
        Ok(serde_json::from_value(base)?)
    }

    /// Overlay `json` onto a preset. `tier` picks the preset when given,
    /// otherwise the JSON `tier` key does (standard when absent).
    fn from_json_overlay(json: &str, tier: Option<Tier>) -> Result<Self, AppError> {
        let tier = match tier {
            Some(tier) => tier,
            None => match serde_json::from_str::<serde_json::Value>(json)?.get("tier") {
                Some(value) => serde_json::from_value(value.clone())?,
                None => Tier::default(),
            },
        };
        let mut config = Self::for_tier(tier).merge_json(json)?;
        config.tier = tier;
        Ok(config)
    }

    /// Load a JSON file on top of the preset named by its `tier` key
    /// (standard when absent)
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        debug!("Loading engine config from {}", path.display());
        Self::from_json_overlay(&content, None)?.validated()
    }

    /// Build a config from `REPLYDESK_*` environment variables.
    /// `REPLYDESK_TIER` wins over a `tier` key in the config file.
    pub fn from_env() -> Result<Self, AppError> {
        let tier: Option<Tier> = read_env(ENV_TIER).map(|value| value.parse()).transpose()?;

        let mut config = match read_env(ENV_CONFIG_FILE) {
            Some(path) => {
                debug!("Loading engine config from {}", path);
                Self::from_json_overlay(&fs::read_to_string(&path)?, tier)?
            }
            None => Self::for_tier(tier.unwrap_or_default()),
        };

        if let Some(seed) = read_env(ENV_SEED) {
            config.seed = Some(parse_env(ENV_SEED, &seed)?);
        }
        if let Some(capacity) = read_env(ENV_CACHE_CAPACITY) {
            config.cache_capacity = parse_env(ENV_CACHE_CAPACITY, &capacity)?;
        }
        if let Some(algorithm) = read_env(ENV_SIMILARITY) {
            config.similarity = algorithm.parse()?;
        }
        if let Some(threshold) = read_env(ENV_SIMILARITY_THRESHOLD) {
            config.similarity_threshold = parse_env(ENV_SIMILARITY_THRESHOLD, &threshold)?;
        }

        config.validated()
    }
}

fn read_env(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_env<T: FromStr>(key: &str, value: &str) -> Result<T, AppError> {
    value
        .parse()
        .map_err(|_| AppError::Config(format!("{} has an invalid value '{}'", key, value)))
}
