use serde::{Deserialize, Serialize};

/// Caller-supplied context for relevance boosting.
///
/// Recognized keys only; anything else in an incoming payload is ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryContext {
    /// The domain the caller is currently working in (e.g. "temporal").
    pub domain: Option<String>,
    /// Catalog objects the caller used recently.
    pub recent_objects: Vec<String>,
}

impl QueryContext {
    /// A context with only a domain set.
    pub fn with_domain(domain: impl Into<String>) -> Self {
        Self {
            domain: Some(domain.into()),
            recent_objects: Vec::new(),
        }
    }
}
