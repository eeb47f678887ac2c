//! Chat Engine - main orchestrator of the reply pipeline.
//!
//! Normalizes the message, classifies its intent, extracts keywords, selects a
//! response from the bank and estimates confidence. The same engine serves
//! both tiers; the [`EngineConfig`] decides which tables and heuristics run.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};
use uuid::Uuid;

use super::cache::{AnalysisCache, CachedAnalysis};
use super::confidence::ConfidenceEstimator;
use super::entities::{self, EntityTag};
use super::intent::{Intent, IntentClassifier};
use super::keywords::{KeywordExtractor, KeywordMap};
use super::random::{RandomSource, SeededRandom, ThreadRandom};
use super::responses::ResponseBank;
use super::selector::{ResponseSelector, ResponseSource};
use super::similarity::SimilarityScorer;
use super::suggestions::SuggestionSet;
use crate::config::EngineConfig;

/// Reply to one message
#[derive(Debug, Clone, Serialize)]
pub struct Reply {
    pub id: Uuid,
    pub intent: Intent,
    pub response: String,
    /// Heuristic score in [0, 1]
    pub confidence: f64,
    pub source: ResponseSource,
    pub processing_time_us: u64,
    pub timestamp: DateTime<Utc>,
}

/// Reply pipeline over a shared response bank
pub struct ChatEngine {
    config: EngineConfig,
    extractor: KeywordExtractor,
    classifier: IntentClassifier,
    confidence: ConfidenceEstimator,
    selector: ResponseSelector,
    suggestions: SuggestionSet,
    bank: Arc<ResponseBank>,
    cache: Option<AnalysisCache>,
}

impl ChatEngine {
    /// Build an engine with the random source implied by `config.seed`
    pub fn new(config: EngineConfig) -> Self {
        let random: Arc<dyn RandomSource> = match config.seed {
            Some(seed) => Arc::new(SeededRandom::new(seed)),
            None => Arc::new(ThreadRandom),
        };
        Self::with_random(config, random)
    }

    /// Build an engine with an injected random source
    pub fn with_random(config: EngineConfig, random: Arc<dyn RandomSource>) -> Self {
        let bank = Arc::new(ResponseBank::seeded(config.seed_set));
        Self::with_bank(config, bank, random)
    }

    /// Build an engine over an existing bank
    pub fn with_bank(
        config: EngineConfig,
        bank: Arc<ResponseBank>,
        random: Arc<dyn RandomSource>,
    ) -> Self {
        let extractor = KeywordExtractor::with_config(
            config.normalization,
            config.stop_words,
            config.min_keyword_length,
        );
        let selector = ResponseSelector::new(
            SimilarityScorer::new(config.similarity, extractor.clone()),
            config.similarity_threshold,
            config.fallback_response.clone(),
            random,
        );

        info!(
            "Chat engine ready: tier={}, {} patterns, {} intents, cache={}",
            config.tier,
            bank.pattern_count(),
            bank.intent_count(),
            config.cache_capacity
        );

        Self {
            classifier: IntentClassifier::new(config.intent_rules),
            confidence: ConfidenceEstimator::new(config.confidence),
            suggestions: config.suggestions,
            cache: AnalysisCache::new(config.cache_capacity),
            extractor,
            selector,
            bank,
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn bank(&self) -> &Arc<ResponseBank> {
        &self.bank
    }

    fn analyze(&self, text: &str) -> CachedAnalysis {
        let compute = || {
            let normalized = self.extractor.normalizer().normalize(text);
            let intent = self.classifier.classify(&normalized);
            CachedAnalysis { normalized, intent }
        };
        match &self.cache {
            Some(cache) => cache.get_or_insert_with(text, compute),
            None => compute(),
        }
    }

    /// Answer one message. Never fails; unknown input gets the fallback reply.
    pub fn classify(&self, text: &str) -> Reply {
        let start = Instant::now();

        // 1. Normalize and classify intent (memoized on the fast tier)
        let analysis = self.analyze(text);
        let intent = analysis.intent.intent;

        // 2. Keywords (normalization is idempotent)
        let keywords = self.extractor.extract(&analysis.normalized);

        // 3. Intent table, then pattern scan, then fallback
        let selection = self.selector.select(&self.bank, text, intent);

        // 4. Confidence from the raw message length
        let confidence = self.confidence.estimate(text, &keywords, intent);

        let reply = Reply {
            id: Uuid::new_v4(),
            intent,
            response: selection.response,
            confidence,
            source: selection.source,
            processing_time_us: start.elapsed().as_micros() as u64,
            timestamp: Utc::now(),
        };

        debug!(
            "Classified as {} (trigger={:?}, confidence={:.3}, source={:?}) in {}µs",
            reply.intent,
            analysis.intent.trigger,
            reply.confidence,
            reply.source,
            reply.processing_time_us
        );
        reply
    }

    /// Canned prompts for a partially typed message
    pub fn suggest(&self, partial: &str) -> Vec<String> {
        if SuggestionSet::needs_starters(partial) {
            return self.suggestions.starters();
        }
        let intent = self.analyze(partial).intent.intent;
        self.suggestions.for_intent(intent)
    }

    /// Entity kinds present in the raw message
    pub fn extract_entities(&self, text: &str) -> Vec<EntityTag> {
        entities::extract_entities(text)
    }

    pub fn keywords(&self, text: &str) -> KeywordMap {
        self.extractor.extract(text)
    }

    /// Similarity of two texts under the configured measure
    pub fn similarity(&self, a: &str, b: &str) -> f64 {
        self.selector.scorer().score(a, b)
    }

    /// Teach a new response for a pattern
    pub fn add_pattern(&self, pattern: &str, response: &str) {
        self.bank.add_pattern(pattern, response);
        debug!("Added response for pattern '{}'", pattern.to_lowercase());
    }

    /// Teach a new response for an intent
    pub fn add_intent_response(&self, intent: Intent, response: &str) {
        self.bank.add_intent_response(intent, response);
        debug!("Added response for intent {}", intent);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brain::cache::MAX_CACHE_CAPACITY;

    fn engine(config: EngineConfig) -> ChatEngine {
        ChatEngine::with_random(config, Arc::new(SeededRandom::new(1)))
    }

    #[test]
    fn test_greeting_reply() {
        let engine = engine(EngineConfig::standard());
        let reply = engine.classify("Hello, how much does it cost?");

        assert_eq!(reply.intent, Intent::Greeting);
        assert_eq!(reply.source, ResponseSource::Intent);
        assert!((reply.confidence - 0.792).abs() < 1e-9);
        assert!(engine
            .bank()
            .responses_for_intent(Intent::Greeting)
            .contains(&reply.response));
    }

    #[test]
    fn test_fast_tier_caches_analysis() {
        let engine = engine(EngineConfig::fast());
        let first = engine.classify("Hey there");
        let second = engine.classify("Hey there");

        assert_eq!(first.intent, Intent::Greeting);
        assert_eq!(second.intent, Intent::Greeting);
        assert_ne!(first.id, second.id);
        assert_eq!(engine.cache.as_ref().map(AnalysisCache::len), Some(1));
    }

    #[test]
    fn test_standard_tier_has_no_cache() {
        let engine = engine(EngineConfig::standard());
        assert_eq!(engine.config().cache_capacity, 0);
        assert!(engine.cache.is_none());
    }

    #[test]
    fn test_oversized_cache_is_clamped() {
        let mut config = EngineConfig::fast();
        config.cache_capacity = usize::MAX;
        let engine = engine(config);

        assert_eq!(engine.cache.as_ref().map(AnalysisCache::capacity), Some(MAX_CACHE_CAPACITY));
        assert_eq!(engine.classify("hey").intent, Intent::Greeting);
    }

    #[test]
    fn test_reply_serializes() {
        let engine = engine(EngineConfig::standard());
        let json = serde_json::to_value(engine.classify("thanks a lot")).expect("serialize");

        assert_eq!(json["intent"], "gratitude");
        assert_eq!(json["source"]["kind"], "intent");
        assert!(json["id"].is_string());
        assert!(json["timestamp"].is_string());
    }
}
