//! # lore-core
//!
//! Foundation crate for the Lore knowledge-fusion system.
//! Defines all types, traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod knowledge;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::LoreConfig;
pub use errors::{FusionError, LoreError, LoreResult, SourceError, SourceResult};
pub use knowledge::{KnowledgeEntry, KnowledgeSource, Pattern, SearchResult};
pub use models::QueryContext;
