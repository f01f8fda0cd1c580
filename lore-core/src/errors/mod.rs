//! Error types for the Lore workspace, one enum per subsystem.

mod fusion_error;
mod source_error;

pub use fusion_error::FusionError;
pub use source_error::SourceError;

/// Top-level error wrapping every subsystem error.
#[derive(Debug, thiserror::Error)]
pub enum LoreError {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Fusion(#[from] FusionError),

    #[error("config error: {reason}")]
    Config { reason: String },
}

/// Workspace-wide result alias.
pub type LoreResult<T> = Result<T, LoreError>;

/// Result alias for source-adapter operations.
pub type SourceResult<T> = Result<T, SourceError>;
