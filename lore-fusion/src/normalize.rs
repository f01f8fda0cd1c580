//! Normalization of raw source results into knowledge entries.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use lore_core::knowledge::{KnowledgeEntry, KnowledgeSource, Pattern};
use lore_core::models::{RawDoc, RepoHit};

/// Fallback confidence for repository hits without a usable relevance.
const REPO_DEFAULT_CONFIDENCE: f64 = 0.9;

/// Remote reference docs are authoritative: flat confidence 1.0.
pub fn from_raw_doc(doc: RawDoc, now: DateTime<Utc>) -> KnowledgeEntry {
    let mut metadata = HashMap::new();
    if let Some(url) = doc.urls.first() {
        metadata.insert(
            "url".to_string(),
            serde_json::Value::String(url.clone()),
        );
    }
    metadata.insert(
        "category".to_string(),
        serde_json::Value::String(doc.category.clone()),
    );

    let tags = doc.tags.clone();
    let description = doc.description.clone();
    let object_name = doc.object_name.clone();
    let content = serde_json::to_value(&doc).unwrap_or(serde_json::Value::Null);

    KnowledgeEntry {
        source: KnowledgeSource::RemoteDocs,
        object_name: Some(object_name),
        pattern_name: None,
        description,
        content,
        confidence: 1.0,
        tags,
        timestamp: now,
        metadata,
    }
}

/// Repository hits carry the adapter's relevance as confidence.
pub fn from_repo_hit(hit: RepoHit, now: DateTime<Utc>) -> KnowledgeEntry {
    let confidence = if hit.relevance > 0.0 {
        hit.relevance
    } else {
        REPO_DEFAULT_CONFIDENCE
    };

    let tags = hit.tags.clone();
    let description = hit.description.clone();
    let object_name = hit.object_name.clone();
    let pattern_name = hit.pattern_name.clone();
    let metadata = hit.metadata.clone();
    let content = serde_json::to_value(&hit).unwrap_or(serde_json::Value::Null);

    KnowledgeEntry {
        source: KnowledgeSource::LocalRepository,
        object_name,
        pattern_name,
        description,
        content,
        confidence,
        tags,
        timestamp: now,
        metadata,
    }
}

/// Pattern-store hits scale the stored confidence by textual relevance
/// and keep the discovery timestamp for recency boosting.
pub fn from_pattern(pattern: &Pattern, relevance: f64) -> KnowledgeEntry {
    KnowledgeEntry {
        source: KnowledgeSource::DiscoveredPattern,
        object_name: None,
        pattern_name: Some(pattern.name.clone()),
        description: pattern.description.clone(),
        content: serde_json::json!({
            "examples": pattern.examples,
            "usage_count": pattern.usage_count,
        }),
        confidence: pattern.confidence * relevance,
        tags: pattern.tags(),
        timestamp: pattern.discovered_at,
        metadata: pattern.metadata.clone(),
    }
}

#[cfg(test)]
mod tests {
    use lore_core::models::RepoFileKind;

    use super::*;

    #[test]
    fn raw_doc_gets_flat_confidence() {
        let doc = RawDoc {
            object_name: "metro".to_string(),
            description: "Output bang messages".to_string(),
            relevance: 0.4,
            urls: vec!["https://example.test/refpages/metro".to_string()],
            ..RawDoc::default()
        };
        let entry = from_raw_doc(doc, Utc::now());
        assert_eq!(entry.confidence, 1.0);
        assert_eq!(entry.source, KnowledgeSource::RemoteDocs);
        assert_eq!(entry.object_name.as_deref(), Some("metro"));
        assert!(entry.metadata.contains_key("url"));
    }

    #[test]
    fn repo_hit_uses_relevance() {
        let hit = RepoHit {
            file_path: "notes/a.md".to_string(),
            kind: RepoFileKind::Markdown,
            name: "A".to_string(),
            description: String::new(),
            tags: vec![],
            relevance: 0.45,
            object_name: None,
            pattern_name: None,
            object_counts: HashMap::new(),
            metadata: HashMap::new(),
        };
        let entry = from_repo_hit(hit, Utc::now());
        assert_eq!(entry.confidence, 0.45);
        assert_eq!(entry.source, KnowledgeSource::LocalRepository);
    }

    #[test]
    fn pattern_confidence_scales_with_relevance() {
        let pattern = Pattern {
            name: "timing counter".to_string(),
            description: String::new(),
            examples: vec![],
            confidence: 0.8,
            usage_count: 3,
            discovered_at: Utc::now(),
            validated: true,
            metadata: HashMap::new(),
        };
        let entry = from_pattern(&pattern, 0.5);
        assert!((entry.confidence - 0.4).abs() < 1e-9);
        assert_eq!(entry.pattern_name.as_deref(), Some("timing counter"));
        assert_eq!(entry.content["usage_count"], 3);
    }
}
