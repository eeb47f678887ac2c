//! # Brain Module
//!
//! Rule-based reply pipeline. No ML model, no network, no persistence.
//!
//! ## Components
//! - `normalizer`, `tokenizer`, `stopwords`: text preprocessing
//! - `keywords`: keyword frequency maps
//! - `similarity`: cosine / jaccard text similarity
//! - `intent`: ordered trigger rules
//! - `responses`: pattern and intent response tables
//! - `selector`: intent → pattern → fallback response choice
//! - `confidence`: length-based confidence heuristics
//! - `suggestions`, `entities`: auxiliary helpers
//! - `cache`: memoized analysis for the fast tier
//! - `engine`: main orchestrator

pub mod cache;
pub mod confidence;
pub mod engine;
pub mod entities;
pub mod intent;
pub mod keywords;
pub mod normalizer;
pub mod random;
pub mod responses;
pub mod selector;
pub mod similarity;
pub mod stopwords;
pub mod suggestions;
pub mod tokenizer;

pub use engine::{ChatEngine, Reply};
pub use entities::EntityTag;
pub use intent::{Intent, IntentClassifier, IntentResult};
pub use keywords::{KeywordExtractor, KeywordMap};
pub use random::{RandomSource, SeededRandom, ThreadRandom};
pub use responses::{PatternEntry, ResponseBank, SeedSet};
pub use selector::{ResponseSource, FALLBACK_RESPONSE};
