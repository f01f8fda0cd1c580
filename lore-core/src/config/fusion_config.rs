use serde::{Deserialize, Serialize};

use super::defaults;

/// Fusion-engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FusionConfig {
    /// Confidence at or above which a new pattern is persisted to the
    /// local repository.
    pub pattern_confidence_threshold: f64,
    /// How long a cached search result stays fresh (seconds).
    pub cache_duration_secs: u64,
    /// Maximum number of cached search results retained.
    pub cache_capacity: u64,
    /// Whether queries feed the background learning worker.
    pub auto_enhance_knowledge: bool,
    /// Bound on the learning work queue; records beyond it are dropped.
    pub learning_queue_size: usize,
    /// Ring-buffer capacity of the query log.
    pub query_log_capacity: usize,
}

impl Default for FusionConfig {
    fn default() -> Self {
        Self {
            pattern_confidence_threshold: defaults::DEFAULT_PATTERN_CONFIDENCE_THRESHOLD,
            cache_duration_secs: defaults::DEFAULT_CACHE_DURATION_SECS,
            cache_capacity: defaults::DEFAULT_CACHE_CAPACITY,
            auto_enhance_knowledge: true,
            learning_queue_size: defaults::DEFAULT_LEARNING_QUEUE_SIZE,
            query_log_capacity: defaults::DEFAULT_QUERY_LOG_CAPACITY,
        }
    }
}
