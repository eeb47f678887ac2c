//! Memoized front half of the pipeline for the fast tier.
//!
//! Maps a raw message to its normalized text and intent so repeated messages
//! skip normalization and rule evaluation. Response selection is never cached.

use lru::LruCache;
use parking_lot::Mutex;
use std::num::NonZeroUsize;

use super::intent::IntentResult;

/// Largest number of entries a cache will hold
pub const MAX_CACHE_CAPACITY: usize = 1 << 16;

/// Normalized text plus its classification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedAnalysis {
    pub normalized: String,
    pub intent: IntentResult,
}

/// Bounded LRU cache keyed by the raw message
#[derive(Debug)]
pub struct AnalysisCache {
    entries: Mutex<LruCache<String, CachedAnalysis>>,
}

impl AnalysisCache {
    /// `None` when `capacity` is zero, which disables caching. Larger
    /// capacities are clamped to `MAX_CACHE_CAPACITY`.
    pub fn new(capacity: usize) -> Option<Self> {
        NonZeroUsize::new(capacity.min(MAX_CACHE_CAPACITY)).map(|capacity| Self {
            entries: Mutex::new(LruCache::new(capacity)),
        })
    }

    pub fn get(&self, message: &str) -> Option<CachedAnalysis> {
        self.entries.lock().get(message).cloned()
    }

    pub fn insert(&self, message: &str, analysis: CachedAnalysis) {
        self.entries.lock().put(message.to_string(), analysis);
    }

    /// Look up `message`, computing and storing the analysis on a miss
    pub fn get_or_insert_with(
        &self,
        message: &str,
        compute: impl FnOnce() -> CachedAnalysis,
    ) -> CachedAnalysis {
        if let Some(hit) = self.get(message) {
            return hit;
        }
        // Computed outside the lock; a concurrent miss may compute twice.
        let analysis = compute();
        self.insert(message, analysis.clone());
        analysis
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.entries.lock().cap().get()
    }
}
