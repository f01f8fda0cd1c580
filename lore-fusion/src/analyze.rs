//! Document analysis via pluggable pattern extraction.
//!
//! The engine only consumes `PatternExtractor` candidates; the shipped
//! [`AdjacencyExtractor`] recognizes known object-pair combinations in
//! patcher documents, either through explicit connections or plain
//! co-presence when no connection data exists.

use std::collections::HashMap;

use lore_core::models::PatternCandidate;
use lore_core::traits::PatternExtractor;

/// Object pairs recognized as meaningful combinations.
const KNOWN_PAIRS: &[(&str, &str, &str)] = &[
    ("metro", "counter", "Timer-driven counter pattern"),
    ("buffer~", "groove~", "Sample playback pattern"),
    ("transport", "timepoint", "Transport-synchronized timing pattern"),
];

/// Extracts adjacency-based object combinations from patcher documents.
#[derive(Debug, Default)]
pub struct AdjacencyExtractor;

impl AdjacencyExtractor {
    pub fn new() -> Self {
        Self
    }
}

/// Object class of one patcher box; generic boxes carry the class as the
/// first token of their text.
fn box_class(value: &serde_json::Value) -> Option<(String, String)> {
    let body = value.get("box").unwrap_or(value);
    let id = body.get("id").and_then(|v| v.as_str())?.to_string();
    let class = body
        .get("class")
        .or_else(|| body.get("maxclass"))
        .and_then(|v| v.as_str())?;

    let class = if class == "newobj" {
        body.get("text")
            .and_then(|v| v.as_str())
            .and_then(|t| t.split_whitespace().next())?
            .to_string()
    } else {
        class.to_string()
    };
    Some((id, class))
}

/// Connection endpoints `(source_id, destination_id)` from a patchline.
fn line_endpoints(value: &serde_json::Value) -> Option<(String, String)> {
    let body = value.get("patchline").unwrap_or(value);
    let source = body.get("source")?.get(0)?.as_str()?.to_string();
    let destination = body.get("destination")?.get(0)?.as_str()?.to_string();
    Some((source, destination))
}

impl PatternExtractor for AdjacencyExtractor {
    fn extract_patterns(&self, document: &serde_json::Value) -> Vec<PatternCandidate> {
        let Some(patcher) = document.get("patcher") else {
            return Vec::new();
        };

        let classes: HashMap<String, String> = patcher
            .get("boxes")
            .and_then(|b| b.as_array())
            .map(|boxes| boxes.iter().filter_map(box_class).collect())
            .unwrap_or_default();

        let connections: Vec<(String, String)> = patcher
            .get("lines")
            .and_then(|l| l.as_array())
            .map(|lines| lines.iter().filter_map(line_endpoints).collect())
            .unwrap_or_default();

        let connected = |a: &str, b: &str| {
            connections.iter().any(|(src, dst)| {
                classes.get(src).map(String::as_str) == Some(a)
                    && classes.get(dst).map(String::as_str) == Some(b)
            })
        };

        let mut candidates = Vec::new();
        for (a, b, description) in KNOWN_PAIRS {
            let present =
                classes.values().any(|c| c == a) && classes.values().any(|c| c == b);
            if !present {
                continue;
            }

            // A wired pair is strong evidence; bare co-presence is weaker.
            let confidence = if connections.is_empty() {
                0.6
            } else if connected(a, b) {
                0.8
            } else {
                continue;
            };

            candidates.push(PatternCandidate {
                objects: vec![(*a).to_string(), (*b).to_string()],
                description: (*description).to_string(),
                confidence,
            });
        }

        candidates
    }
}

/// Outcome of analyzing a document against the pattern store.
#[derive(Debug, Clone, Default)]
pub struct DocumentAnalysis {
    /// Candidates matching a pattern already in the store, by name.
    pub known_patterns: Vec<String>,
    /// Candidates not matching anything known: potential discoveries.
    pub novel_candidates: Vec<PatternCandidate>,
}
