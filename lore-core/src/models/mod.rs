//! Adapter-facing and engine-internal model types.

mod pattern_candidate;
mod query_context;
mod query_record;
mod raw_doc;
mod repo_hit;

pub use pattern_candidate::PatternCandidate;
pub use query_context::QueryContext;
pub use query_record::QueryRecord;
pub use raw_doc::{PortSpec, RawDoc};
pub use repo_hit::{RepoFileKind, RepoHit};
