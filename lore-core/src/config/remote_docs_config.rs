use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::defaults;

/// Remote reference-corpus adapter configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteDocsConfig {
    /// Base URL of the reference documentation.
    pub base_url: String,
    /// Directory for the on-disk fetch cache.
    pub cache_dir: PathBuf,
    /// How long a cached document stays fresh (seconds).
    pub cache_duration_secs: u64,
    /// Maximum in-flight HTTP requests.
    pub max_concurrent_requests: usize,
    /// Per-request timeout (seconds).
    pub request_timeout_secs: u64,
    /// Fetch attempts before giving up on a URL.
    pub retry_attempts: u32,
    /// Base delay between retries (milliseconds); grows linearly per attempt.
    pub retry_delay_ms: u64,
    /// Path to the consolidated documentation listing. When absent or
    /// unreadable the adapter falls back to its built-in index.
    pub listing_path: Option<PathBuf>,
}

impl Default for RemoteDocsConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::DEFAULT_REMOTE_BASE_URL.to_string(),
            cache_dir: PathBuf::from(defaults::DEFAULT_REMOTE_CACHE_DIR),
            cache_duration_secs: defaults::DEFAULT_REMOTE_CACHE_DURATION_SECS,
            max_concurrent_requests: defaults::DEFAULT_MAX_CONCURRENT_REQUESTS,
            request_timeout_secs: defaults::DEFAULT_REQUEST_TIMEOUT_SECS,
            retry_attempts: defaults::DEFAULT_RETRY_ATTEMPTS,
            retry_delay_ms: defaults::DEFAULT_RETRY_DELAY_MS,
            listing_path: None,
        }
    }
}
