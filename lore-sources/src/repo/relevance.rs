//! Relevance scoring for repository index entries.

use chrono::{DateTime, Utc};

use lore_core::models::QueryContext;

use super::indexer::IndexEntry;

/// Score an entry against the query. Substring and token containment
/// only; the final score is capped at 1.0.
pub fn relevance(entry: &IndexEntry, query_lower: &str, tokens: &[String], now: DateTime<Utc>) -> f64 {
    let mut score = 0.0;

    let name = entry.name.to_lowercase();
    if name.contains(query_lower) {
        score += 0.5;
    } else if tokens.iter().any(|t| name.contains(t.as_str())) {
        score += 0.3;
    }

    let description = entry.description.to_lowercase();
    if description.contains(query_lower) {
        score += 0.3;
    } else if tokens.iter().any(|t| description.contains(t.as_str())) {
        score += 0.2;
    }

    let tags: Vec<String> = entry.tags.iter().map(|t| t.to_lowercase()).collect();
    let matching_tags = tokens
        .iter()
        .filter(|t| tags.iter().any(|tag| tag.contains(t.as_str())))
        .count();
    score += matching_tags as f64 * 0.1;

    let path = entry.file_path.to_lowercase();
    if tokens.iter().any(|t| path.contains(t.as_str())) {
        score += 0.1;
    }

    // Recently touched files get a small edge.
    let age_days = (now - entry.modified).num_days();
    if age_days < 30 {
        score *= 1.1;
    } else if age_days < 90 {
        score *= 1.05;
    }

    score.min(1.0)
}

/// Apply caller-context boosts on top of a base relevance; stays in [0, 1].
pub fn context_boost(entry: &IndexEntry, base: f64, context: &QueryContext) -> f64 {
    let mut score = base;

    if let Some(domain) = &context.domain {
        if entry.tags.iter().any(|t| t == domain) {
            score *= 1.3;
        }
    }

    if !context.recent_objects.is_empty()
        && context
            .recent_objects
            .iter()
            .any(|obj| entry.object_counts.contains_key(obj))
    {
        score *= 1.2;
    }

    score.min(1.0)
}
