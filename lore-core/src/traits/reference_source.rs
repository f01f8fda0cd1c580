use crate::errors::SourceResult;
use crate::models::RawDoc;

/// Remote reference-corpus adapter.
///
/// `initialize` must complete before `search` is called. The engine wraps
/// every `search` call in failure isolation, so an error here never fails
/// a query.
#[allow(async_fn_in_trait)]
pub trait ReferenceSource: Send + Sync {
    /// Idempotent setup (HTTP client, object index).
    async fn initialize(&self) -> SourceResult<()>;

    /// Search the corpus. Empty vec on no match.
    async fn search(&self, query: &str) -> SourceResult<Vec<RawDoc>>;

    /// Release held connections. Safe to call once.
    async fn close(&self);
}
