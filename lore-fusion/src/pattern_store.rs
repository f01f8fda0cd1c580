//! In-memory store of discovered patterns.
//!
//! Patterns are keyed by lowercased name, which doubles as the similarity
//! rule for duplicate discoveries: a discovery whose name matches an
//! existing pattern case-insensitively merges into it instead of creating
//! a new entity.

use dashmap::DashMap;

use lore_core::constants::MAX_PATTERN_RESULTS;
use lore_core::knowledge::Pattern;

#[derive(Default)]
pub struct PatternStore {
    patterns: DashMap<String, Pattern>,
}

impl PatternStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn key(name: &str) -> String {
        name.to_lowercase()
    }

    pub fn insert(&self, pattern: Pattern) {
        self.patterns.insert(Self::key(&pattern.name), pattern);
    }

    /// Cloned snapshot of a pattern by (case-insensitive) name.
    pub fn get(&self, name: &str) -> Option<Pattern> {
        self.patterns.get(&Self::key(name)).map(|p| p.clone())
    }

    /// Merge a duplicate discovery into the similar existing pattern.
    /// Returns the updated pattern, or `None` when no similar pattern
    /// exists.
    pub fn merge_examples(
        &self,
        name: &str,
        examples: Vec<serde_json::Value>,
    ) -> Option<Pattern> {
        let mut entry = self.patterns.get_mut(&Self::key(name))?;
        entry.absorb(examples);
        Some(entry.clone())
    }

    /// Mark a pattern as validated after successful persistence.
    pub fn set_validated(&self, name: &str) {
        if let Some(mut entry) = self.patterns.get_mut(&Self::key(name)) {
            entry.validated = true;
        }
    }

    /// Name of a stored pattern whose name or description mentions every
    /// given object class, if any.
    pub fn covers(&self, objects: &[String]) -> Option<String> {
        if objects.is_empty() {
            return None;
        }
        self.patterns.iter().find_map(|entry| {
            let pattern = entry.value();
            let text = format!(
                "{} {}",
                pattern.name.to_lowercase(),
                pattern.description.to_lowercase()
            );
            objects
                .iter()
                .all(|obj| text.contains(&obj.to_lowercase()))
                .then(|| pattern.name.clone())
        })
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Textual-relevance lookup: name match counts 0.5, description 0.3,
    /// each matching metadata tag 0.2. Matches are returned with their
    /// relevance, best-confidence first, capped at the pattern-source
    /// contribution limit.
    pub fn matches(&self, query: &str) -> Vec<(Pattern, f64)> {
        let query_lower = query.to_lowercase();
        let mut hits: Vec<(Pattern, f64)> = self
            .patterns
            .iter()
            .filter_map(|entry| {
                let pattern = entry.value();
                let mut relevance = 0.0;
                if pattern.name.to_lowercase().contains(&query_lower) {
                    relevance += 0.5;
                }
                if pattern.description.to_lowercase().contains(&query_lower) {
                    relevance += 0.3;
                }
                for tag in pattern.tags() {
                    if tag.to_lowercase().contains(&query_lower) {
                        relevance += 0.2;
                    }
                }
                (relevance > 0.0).then(|| (pattern.clone(), relevance))
            })
            .collect();

        // Order by effective confidence before capping, so truncation
        // keeps the strongest contributions.
        hits.sort_by(|a, b| {
            let ca = a.0.confidence * a.1;
            let cb = b.0.confidence * b.1;
            cb.partial_cmp(&ca).unwrap_or(std::cmp::Ordering::Equal)
        });
        hits.truncate(MAX_PATTERN_RESULTS);
        hits
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use chrono::Utc;

    use super::*;

    fn pattern(name: &str, confidence: f64) -> Pattern {
        Pattern {
            name: name.to_string(),
            description: format!("{name} description"),
            examples: vec![serde_json::json!({"n": 1})],
            confidence,
            usage_count: 1,
            discovered_at: Utc::now(),
            validated: false,
            metadata: HashMap::new(),
        }
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let store = PatternStore::new();
        store.insert(pattern("Timing Counter", 0.6));
        assert!(store.get("timing counter").is_some());
        assert!(store.get("TIMING COUNTER").is_some());
    }

    #[test]
    fn merge_appends_examples_and_counts_usage() {
        let store = PatternStore::new();
        store.insert(pattern("timing counter", 0.6));

        let merged = store
            .merge_examples("Timing Counter", vec![serde_json::json!({"n": 2})])
            .unwrap();
        assert_eq!(merged.examples.len(), 2);
        assert_eq!(merged.usage_count, 2);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn merge_misses_unknown_name() {
        let store = PatternStore::new();
        assert!(store.merge_examples("nothing", vec![]).is_none());
    }

    #[test]
    fn matches_scores_name_over_tags() {
        let store = PatternStore::new();
        store.insert(pattern("timing counter", 0.8));
        let mut tagged = pattern("other", 0.8);
        tagged
            .metadata
            .insert("tags".to_string(), serde_json::json!(["timing"]));
        store.insert(tagged);

        let hits = store.matches("timing");
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].0.name, "timing counter");
        assert!(hits[0].1 > hits[1].1);
    }

    #[test]
    fn matches_caps_contributions() {
        let store = PatternStore::new();
        for i in 0..20 {
            store.insert(pattern(&format!("timing {i}"), 0.5));
        }
        assert_eq!(store.matches("timing").len(), MAX_PATTERN_RESULTS);
    }

    #[test]
    fn covers_requires_every_object() {
        let store = PatternStore::new();
        store.insert(Pattern {
            description: "metro driving a counter".to_string(),
            ..pattern("timing counter", 0.8)
        });

        let both = vec!["metro".to_string(), "counter".to_string()];
        assert_eq!(store.covers(&both), Some("timing counter".to_string()));

        let other = vec!["metro".to_string(), "gate".to_string()];
        assert_eq!(store.covers(&other), None);
        assert_eq!(store.covers(&[]), None);
    }

    #[test]
    fn set_validated_flips_flag() {
        let store = PatternStore::new();
        store.insert(pattern("timing counter", 0.9));
        store.set_validated("timing counter");
        assert!(store.get("timing counter").unwrap().validated);
    }
}
