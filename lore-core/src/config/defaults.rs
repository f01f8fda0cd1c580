//! Named default values backing the config `Default` impls.

// Fusion
pub const DEFAULT_PATTERN_CONFIDENCE_THRESHOLD: f64 = 0.8;
pub const DEFAULT_CACHE_DURATION_SECS: u64 = 300;
pub const DEFAULT_CACHE_CAPACITY: u64 = 1024;
pub const DEFAULT_LEARNING_QUEUE_SIZE: usize = 256;
pub const DEFAULT_QUERY_LOG_CAPACITY: usize = 10_000;

// Remote docs
pub const DEFAULT_REMOTE_BASE_URL: &str = "https://docs.cycling74.com/legacy/max8";
pub const DEFAULT_REMOTE_CACHE_DIR: &str = "./cache/remote-docs";
pub const DEFAULT_REMOTE_CACHE_DURATION_SECS: u64 = 3600;
pub const DEFAULT_MAX_CONCURRENT_REQUESTS: usize = 5;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_RETRY_ATTEMPTS: u32 = 3;
pub const DEFAULT_RETRY_DELAY_MS: u64 = 1000;

// Local repository
pub const DEFAULT_REPO_PATH: &str = "../";
pub const DEFAULT_UPDATE_INTERVAL_SECS: u64 = 300;
pub const DEFAULT_MIN_RELEVANCE: f64 = 0.1;
pub const DEFAULT_ERROR_BACKOFF_SECS: u64 = 60;
