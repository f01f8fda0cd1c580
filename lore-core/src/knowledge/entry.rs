use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Origin of a knowledge entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum KnowledgeSource {
    /// Official remote reference corpus.
    RemoteDocs,
    /// Locally maintained annotated repository.
    LocalRepository,
    /// Previously discovered pattern from the pattern store.
    DiscoveredPattern,
}

impl KnowledgeSource {
    /// Stable name used in `SearchResult::sources_queried`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::RemoteDocs => "remote-docs",
            Self::LocalRepository => "local-repository",
            Self::DiscoveredPattern => "discovered-pattern",
        }
    }
}

impl fmt::Display for KnowledgeSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A normalized unit of knowledge from any source.
///
/// Confidence is nominally in [0.0, 1.0] but is deliberately not clamped
/// after ranking boosts; repeated boosts can push it past 1.0. Ranking
/// mutates `confidence` in place, so callers must not assume immutability
/// across the boost step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeEntry {
    pub source: KnowledgeSource,
    /// Catalog object this entry describes, when applicable.
    pub object_name: Option<String>,
    /// Pattern this entry describes, when applicable.
    pub pattern_name: Option<String>,
    pub description: String,
    /// Source-specific structured payload (reference-page details, file
    /// metadata, usage examples).
    pub content: serde_json::Value,
    pub confidence: f64,
    pub tags: Vec<String>,
    pub timestamp: DateTime<Utc>,
    pub metadata: HashMap<String, serde_json::Value>,
}

impl KnowledgeEntry {
    /// Whether any tag matches `tag` exactly.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Age of the entry in whole days relative to `now`.
    pub fn age_days(&self, now: DateTime<Utc>) -> i64 {
        (now - self.timestamp).num_days()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_names_are_stable() {
        assert_eq!(KnowledgeSource::RemoteDocs.as_str(), "remote-docs");
        assert_eq!(KnowledgeSource::LocalRepository.as_str(), "local-repository");
        assert_eq!(
            KnowledgeSource::DiscoveredPattern.as_str(),
            "discovered-pattern"
        );
    }

    #[test]
    fn age_uses_whole_days() {
        let now = Utc::now();
        let entry = KnowledgeEntry {
            source: KnowledgeSource::RemoteDocs,
            object_name: None,
            pattern_name: None,
            description: String::new(),
            content: serde_json::Value::Null,
            confidence: 1.0,
            tags: vec![],
            timestamp: now - chrono::Duration::hours(47),
            metadata: HashMap::new(),
        };
        assert_eq!(entry.age_days(now), 1);
    }
}
