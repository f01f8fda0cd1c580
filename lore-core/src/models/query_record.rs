use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One record handed to the background learning worker after a query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryRecord {
    pub query: String,
    pub result_count: usize,
    pub sources_queried: Vec<String>,
    pub query_time_ms: f64,
    pub recorded_at: DateTime<Utc>,
}

impl QueryRecord {
    /// Build a record stamped with the current time.
    pub fn new(
        query: impl Into<String>,
        result_count: usize,
        sources_queried: Vec<String>,
        query_time_ms: f64,
    ) -> Self {
        Self {
            query: query.into(),
            result_count,
            sources_queried,
            query_time_ms,
            recorded_at: Utc::now(),
        }
    }
}
