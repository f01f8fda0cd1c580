use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::defaults;

/// Local annotated-repository adapter configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LocalRepoConfig {
    /// Path to the knowledge repository checkout.
    pub repo_path: PathBuf,
    /// Whether the watch loop rebuilds the index on upstream changes.
    pub auto_update: bool,
    /// Interval between upstream polls (seconds).
    pub update_interval_secs: u64,
    /// Whether to run the background watch loop at all.
    pub watch_for_changes: bool,
    /// Relevance floor below which hits are dropped.
    pub min_relevance: f64,
    /// Sleep applied after a watch-loop error before retrying (seconds).
    pub error_backoff_secs: u64,
}

impl Default for LocalRepoConfig {
    fn default() -> Self {
        Self {
            repo_path: PathBuf::from(defaults::DEFAULT_REPO_PATH),
            auto_update: true,
            update_interval_secs: defaults::DEFAULT_UPDATE_INTERVAL_SECS,
            watch_for_changes: true,
            min_relevance: defaults::DEFAULT_MIN_RELEVANCE,
            error_backoff_secs: defaults::DEFAULT_ERROR_BACKOFF_SECS,
        }
    }
}
