//! Related-search suggestions derived from top-ranked entries.

use lore_core::constants::{MAX_SUGGESTIONS, SUGGESTION_WINDOW};
use lore_core::knowledge::KnowledgeEntry;

/// Collect suggestions from the top entries: their tags first, then their
/// object names. First-seen order, the literal query excluded, capped at
/// the suggestion limit.
pub fn suggestions(entries: &[KnowledgeEntry], query: &str) -> Vec<String> {
    let window = &entries[..entries.len().min(SUGGESTION_WINDOW)];
    let mut out: Vec<String> = Vec::new();

    let mut push = |candidate: &str| {
        if candidate != query && !out.iter().any(|s| s == candidate) {
            out.push(candidate.to_string());
        }
    };

    for entry in window {
        for tag in &entry.tags {
            push(tag);
        }
    }
    for entry in window {
        if let Some(object_name) = &entry.object_name {
            push(object_name);
        }
    }

    out.truncate(MAX_SUGGESTIONS);
    out
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use chrono::Utc;
    use lore_core::knowledge::KnowledgeSource;

    use super::*;

    fn entry(object_name: Option<&str>, tags: &[&str]) -> KnowledgeEntry {
        KnowledgeEntry {
            source: KnowledgeSource::RemoteDocs,
            object_name: object_name.map(String::from),
            pattern_name: None,
            description: String::new(),
            content: serde_json::Value::Null,
            confidence: 1.0,
            tags: tags.iter().map(|t| (*t).to_string()).collect(),
            timestamp: Utc::now(),
            metadata: HashMap::new(),
        }
    }

    #[test]
    fn tags_come_before_object_names() {
        let entries = vec![entry(Some("counter"), &["timing", "clock"])];
        assert_eq!(
            suggestions(&entries, "metro"),
            vec!["timing", "clock", "counter"]
        );
    }

    #[test]
    fn query_is_never_suggested() {
        let entries = vec![entry(Some("metro"), &["metro", "timing"])];
        let out = suggestions(&entries, "metro");
        assert!(!out.contains(&"metro".to_string()));
        assert_eq!(out, vec!["timing"]);
    }

    #[test]
    fn duplicates_collapse_first_seen() {
        let entries = vec![
            entry(Some("counter"), &["timing"]),
            entry(Some("counter"), &["timing", "count"]),
        ];
        assert_eq!(
            suggestions(&entries, "metro"),
            vec!["timing", "count", "counter"]
        );
    }

    #[test]
    fn capped_at_five() {
        let entries = vec![entry(
            Some("counter"),
            &["a", "b", "c", "d", "e", "f", "g"],
        )];
        let out = suggestions(&entries, "metro");
        assert_eq!(out.len(), 5);
        assert_eq!(out, vec!["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn only_top_five_entries_contribute() {
        let mut entries: Vec<KnowledgeEntry> = (0..6).map(|_| entry(None, &[])).collect();
        entries[5].tags = vec!["hidden".to_string()];
        assert!(suggestions(&entries, "metro").is_empty());
    }
}
