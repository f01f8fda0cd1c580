/// Source-adapter errors (remote corpus and local repository).
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("http request failed for {url}: {reason}")]
    Http { url: String, reason: String },

    #[error("io error at {path}: {reason}")]
    Io { path: String, reason: String },

    #[error("git operation failed: {reason}")]
    Git { reason: String },

    #[error("failed to parse {path}: {reason}")]
    Parse { path: String, reason: String },

    #[error("repository not available at {path}")]
    RepoUnavailable { path: String },

    #[error("source not initialized")]
    NotInitialized,
}

impl SourceError {
    /// Wrap an io error with the path it occurred at.
    pub fn io(path: impl Into<String>, err: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            reason: err.to_string(),
        }
    }
}
