use crate::errors::SourceResult;
use crate::knowledge::Pattern;
use crate::models::{QueryContext, RepoHit};

/// Local annotated-repository adapter.
#[allow(async_fn_in_trait)]
pub trait AnnotatedRepo: Send + Sync {
    /// Build or load the searchable index. May fail on unrecoverable setup
    /// problems; that failure propagates from engine-level initialize.
    async fn initialize(&self) -> SourceResult<()>;

    /// Search the repository index. Each hit carries a relevance in
    /// [0.0, 1.0]; at most 50 hits are returned.
    async fn search(
        &self,
        query: &str,
        context: Option<&QueryContext>,
    ) -> SourceResult<Vec<RepoHit>>;

    /// Persist a pattern as a new document. `Ok(false)` signals a
    /// non-fatal persistence failure.
    async fn add_pattern(&self, pattern: &Pattern) -> SourceResult<bool>;

    /// Stop background work and release resources.
    async fn close(&self);
}
