use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A discovered or recognized pattern.
///
/// Owned by the pattern store and keyed by `name`. A duplicate discovery
/// merges into the existing pattern in place: examples are appended and
/// `usage_count` is incremented.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pattern {
    pub name: String,
    pub description: String,
    pub examples: Vec<serde_json::Value>,
    pub confidence: f64,
    pub usage_count: u64,
    pub discovered_at: DateTime<Utc>,
    /// True only after the pattern was successfully persisted to the
    /// local repository.
    pub validated: bool,
    pub metadata: HashMap<String, serde_json::Value>,
}

impl Pattern {
    /// Tags recorded in the pattern's metadata, if any.
    pub fn tags(&self) -> Vec<String> {
        self.metadata
            .get("tags")
            .and_then(|v| v.as_array())
            .map(|arr| {
                arr.iter()
                    .filter_map(|t| t.as_str().map(String::from))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Merge another sighting of this pattern: append its examples and
    /// count the additional use.
    pub fn absorb(&mut self, examples: Vec<serde_json::Value>) {
        self.examples.extend(examples);
        self.usage_count += 1;
    }
}
