use serde::{Deserialize, Serialize};

use super::KnowledgeEntry;

/// Unified response envelope for one fused query.
///
/// Created once per query and cached by value under the verbatim query
/// string; never mutated after assembly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    /// The exact input string, also the cache key. Not normalized.
    pub query: String,
    /// Entries in rank order (descending confidence).
    pub entries: Vec<KnowledgeEntry>,
    pub total_results: usize,
    /// Names of sources that responded without error.
    pub sources_queried: Vec<String>,
    pub query_time_ms: f64,
    /// Related-search suggestions, at most 5.
    pub suggestions: Vec<String>,
}
