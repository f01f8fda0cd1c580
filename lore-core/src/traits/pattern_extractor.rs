use crate::models::PatternCandidate;

/// Pluggable pattern extraction over a structured document (e.g. a
/// patcher file). Implementations are supplied by the caller; the engine
/// itself only consumes the candidates.
pub trait PatternExtractor: Send + Sync {
    fn extract_patterns(&self, document: &serde_json::Value) -> Vec<PatternCandidate>;
}
