/// Lore system version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Maximum number of suggestions attached to a search result.
pub const MAX_SUGGESTIONS: usize = 5;

/// Number of top-ranked entries inspected when deriving suggestions.
pub const SUGGESTION_WINDOW: usize = 5;

/// Maximum pattern-store contributions merged into a single result.
pub const MAX_PATTERN_RESULTS: usize = 10;

/// Maximum hits the local-repository adapter returns per search.
pub const MAX_REPO_RESULTS: usize = 50;

/// Maximum hits the remote-docs adapter returns per search.
pub const MAX_REMOTE_RESULTS: usize = 20;
