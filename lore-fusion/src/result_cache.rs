//! TTL cache for fused search results.
//!
//! Keyed by the verbatim query string — no case folding or whitespace
//! normalization, so "Metro" and "metro" are distinct entries. Entries
//! expire after the configured duration and the capacity is bounded, so
//! stale keys are evicted rather than accumulating.

use std::sync::Arc;
use std::time::Duration;

use moka::sync::Cache;

use lore_core::knowledge::SearchResult;

pub struct ResultCache {
    cache: Cache<String, Arc<SearchResult>>,
}

impl ResultCache {
    pub fn new(capacity: u64, ttl: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(capacity)
            .time_to_live(ttl)
            .build();
        Self { cache }
    }

    /// Fresh cached result for this exact query string, if any.
    pub fn get(&self, query: &str) -> Option<Arc<SearchResult>> {
        self.cache.get(query)
    }

    pub fn insert(&self, query: String, result: SearchResult) {
        self.cache.insert(query, Arc::new(result));
    }

    pub fn len(&self) -> u64 {
        self.cache.entry_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
