//! Property tests for ranking and suggestion derivation.

use std::collections::HashMap;

use chrono::Utc;
use proptest::prelude::*;

use lore_core::knowledge::{KnowledgeEntry, KnowledgeSource};
use lore_core::models::QueryContext;
use lore_fusion::{rank, suggest};

fn arb_tags() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(
        prop::sample::select(vec![
            "temporal".to_string(),
            "rhythm".to_string(),
            "audio".to_string(),
            "timing".to_string(),
            "ui".to_string(),
        ]),
        0..3,
    )
}

fn arb_entry() -> impl Strategy<Value = KnowledgeEntry> {
    (0.0f64..=1.0, arb_tags(), 0i64..120).prop_map(|(confidence, tags, age_days)| {
        KnowledgeEntry {
            source: KnowledgeSource::RemoteDocs,
            object_name: None,
            pattern_name: None,
            description: String::new(),
            content: serde_json::Value::Null,
            confidence,
            tags,
            timestamp: Utc::now() - chrono::Duration::days(age_days),
            metadata: HashMap::new(),
        }
    })
}

fn arb_context() -> impl Strategy<Value = Option<QueryContext>> {
    prop_oneof![
        Just(None),
        Just(Some(QueryContext::with_domain("temporal"))),
        Just(Some(QueryContext::with_domain("audio"))),
    ]
}

proptest! {
    /// Ranked output is monotonically non-increasing in confidence,
    /// whatever the boosts did.
    #[test]
    fn ranking_is_monotonic(
        mut entries in prop::collection::vec(arb_entry(), 0..24),
        context in arb_context(),
    ) {
        rank::rank(&mut entries, context.as_ref(), Utc::now());
        for pair in entries.windows(2) {
            prop_assert!(pair[0].confidence >= pair[1].confidence);
        }
    }

    /// Boosts never shrink confidence and never exceed the compound
    /// maximum of one domain boost and one recency boost.
    #[test]
    fn boosts_are_bounded(
        entry in arb_entry(),
        context in arb_context(),
    ) {
        let before = entry.confidence;
        let mut entries = vec![entry];
        rank::rank(&mut entries, context.as_ref(), Utc::now());
        let after = entries[0].confidence;

        prop_assert!(after >= before - 1e-12);
        prop_assert!(after <= before * 1.2 * 1.1 + 1e-12);
    }

    /// Ranking neither adds nor removes entries.
    #[test]
    fn ranking_preserves_entry_count(
        mut entries in prop::collection::vec(arb_entry(), 0..24),
        context in arb_context(),
    ) {
        let count = entries.len();
        rank::rank(&mut entries, context.as_ref(), Utc::now());
        prop_assert_eq!(entries.len(), count);
    }

    /// Suggestions are capped at five and never echo the query.
    #[test]
    fn suggestions_capped_and_query_free(
        entries in prop::collection::vec(arb_entry(), 0..12),
        query in "[a-z]{1,8}",
    ) {
        let out = suggest::suggestions(&entries, &query);
        prop_assert!(out.len() <= 5);
        prop_assert!(!out.contains(&query));
    }
}
