//! Discovery validation and pattern construction.

use std::collections::HashMap;

use chrono::Utc;

use lore_core::errors::FusionError;
use lore_core::knowledge::Pattern;

/// A structurally valid discovery payload.
#[derive(Debug, Clone)]
pub struct Discovery {
    pub name: String,
    pub description: String,
    pub examples: Vec<serde_json::Value>,
    pub metadata: HashMap<String, serde_json::Value>,
}

/// Parse a raw discovery payload, requiring `name`, `description`, and
/// `examples`.
pub fn parse_discovery(value: &serde_json::Value) -> Result<Discovery, FusionError> {
    let map = value.as_object().ok_or(FusionError::NotAnObject)?;

    let name = map
        .get("name")
        .and_then(|v| v.as_str())
        .ok_or(FusionError::MissingField { field: "name" })?
        .to_string();
    let description = map
        .get("description")
        .and_then(|v| v.as_str())
        .ok_or(FusionError::MissingField {
            field: "description",
        })?
        .to_string();
    let examples = map
        .get("examples")
        .and_then(|v| v.as_array())
        .ok_or(FusionError::MissingField { field: "examples" })?
        .clone();

    let metadata = map
        .get("metadata")
        .and_then(|v| v.as_object())
        .map(|m| m.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
        .unwrap_or_default();

    Ok(Discovery {
        name,
        description,
        examples,
        metadata,
    })
}

/// Confidence for a fresh discovery: 0.5 base, more examples raise it.
pub fn score_confidence(example_count: usize) -> f64 {
    let mut confidence = 0.5;
    if example_count > 3 {
        confidence += 0.2;
    } else if example_count > 1 {
        confidence += 0.1;
    }
    confidence
}

/// Build a new, not-yet-validated pattern from a discovery.
pub fn build_pattern(discovery: &Discovery) -> Pattern {
    Pattern {
        name: discovery.name.clone(),
        description: discovery.description.clone(),
        confidence: score_confidence(discovery.examples.len()),
        examples: discovery.examples.clone(),
        usage_count: 1,
        discovered_at: Utc::now(),
        validated: false,
        metadata: discovery.metadata.clone(),
    }
}
