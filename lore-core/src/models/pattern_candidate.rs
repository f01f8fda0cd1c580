use serde::{Deserialize, Serialize};

/// A pattern candidate extracted from a document by a `PatternExtractor`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternCandidate {
    /// Object classes participating in the candidate.
    pub objects: Vec<String>,
    pub description: String,
    pub confidence: f64,
}
