//! Confidence ranking with context-sensitive boosts.
//!
//! Base order is descending confidence. When a query context is present,
//! two boosts mutate entry confidence in place — domain affinity, then
//! recency — followed by one final re-sort. Boosted confidence is
//! deliberately not clamped, so values past 1.0 are possible.

use chrono::{DateTime, Utc};

use lore_core::knowledge::KnowledgeEntry;
use lore_core::models::QueryContext;

/// Multiplier for entries tagged with the caller's temporal domain.
const DOMAIN_BOOST: f64 = 1.2;
/// Multiplier for entries younger than a week.
const FRESH_BOOST: f64 = 1.1;
/// Multiplier for entries younger than a month.
const RECENT_BOOST: f64 = 1.05;

fn sort_by_confidence(entries: &mut [KnowledgeEntry]) {
    // Stable sort: equal confidences keep their merge order.
    entries.sort_by(|a, b| {
        b.confidence
            .partial_cmp(&a.confidence)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}

/// Rank entries in place: sort, apply boosts once, re-sort.
pub fn rank(entries: &mut Vec<KnowledgeEntry>, context: Option<&QueryContext>, now: DateTime<Utc>) {
    sort_by_confidence(entries);

    let Some(context) = context else {
        return;
    };

    if context.domain.as_deref() == Some("temporal") {
        for entry in entries.iter_mut() {
            if entry.has_tag("temporal") || entry.has_tag("rhythm") {
                entry.confidence *= DOMAIN_BOOST;
            }
        }
    }

    for entry in entries.iter_mut() {
        let age_days = entry.age_days(now);
        if age_days < 7 {
            entry.confidence *= FRESH_BOOST;
        } else if age_days < 30 {
            entry.confidence *= RECENT_BOOST;
        }
    }

    sort_by_confidence(entries);
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use lore_core::knowledge::KnowledgeSource;

    use super::*;

    fn entry(confidence: f64, tags: &[&str], age_days: i64) -> KnowledgeEntry {
        KnowledgeEntry {
            source: KnowledgeSource::RemoteDocs,
            object_name: None,
            pattern_name: None,
            description: String::new(),
            content: serde_json::Value::Null,
            confidence,
            tags: tags.iter().map(|t| (*t).to_string()).collect(),
            timestamp: Utc::now() - chrono::Duration::days(age_days),
            metadata: HashMap::new(),
        }
    }

    #[test]
    fn sorted_descending_without_context() {
        let mut entries = vec![entry(0.3, &[], 0), entry(0.9, &[], 0), entry(0.6, &[], 0)];
        rank(&mut entries, None, Utc::now());
        let confidences: Vec<f64> = entries.iter().map(|e| e.confidence).collect();
        assert_eq!(confidences, vec![0.9, 0.6, 0.3]);
    }

    #[test]
    fn no_boosts_without_context() {
        let mut entries = vec![entry(0.5, &["temporal"], 0)];
        rank(&mut entries, None, Utc::now());
        assert_eq!(entries[0].confidence, 0.5);
    }

    #[test]
    fn domain_and_recency_boosts_compound() {
        let mut entries = vec![entry(0.5, &["temporal"], 0)];
        let context = QueryContext::with_domain("temporal");
        rank(&mut entries, Some(&context), Utc::now());
        assert!((entries[0].confidence - 0.66).abs() < 1e-9);
    }

    #[test]
    fn rhythm_tag_also_gets_domain_boost() {
        let mut entries = vec![entry(0.5, &["rhythm"], 40)];
        let context = QueryContext::with_domain("temporal");
        rank(&mut entries, Some(&context), Utc::now());
        assert!((entries[0].confidence - 0.6).abs() < 1e-9);
    }

    #[test]
    fn other_domains_skip_the_domain_boost() {
        let mut entries = vec![entry(0.5, &["temporal"], 40)];
        let context = QueryContext::with_domain("audio");
        rank(&mut entries, Some(&context), Utc::now());
        assert_eq!(entries[0].confidence, 0.5);
    }

    #[test]
    fn mid_age_gets_smaller_recency_boost() {
        let mut entries = vec![entry(0.5, &[], 10)];
        let context = QueryContext::with_domain("anything");
        rank(&mut entries, Some(&context), Utc::now());
        assert!((entries[0].confidence - 0.525).abs() < 1e-9);
    }

    #[test]
    fn boosts_can_reorder() {
        let mut entries = vec![
            entry(0.62, &[], 40),
            entry(0.6, &["temporal"], 0),
        ];
        let context = QueryContext::with_domain("temporal");
        rank(&mut entries, Some(&context), Utc::now());
        // 0.6 * 1.2 * 1.1 = 0.792 overtakes the unboosted 0.62.
        assert!(entries[0].has_tag("temporal"));
        assert!(entries[0].confidence >= entries[1].confidence);
    }

    #[test]
    fn boosted_confidence_is_not_clamped() {
        let mut entries = vec![entry(0.95, &["temporal"], 0)];
        let context = QueryContext::with_domain("temporal");
        rank(&mut entries, Some(&context), Utc::now());
        assert!(entries[0].confidence > 1.0);
    }
}
