use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// File format an indexed repository entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepoFileKind {
    Markdown,
    Patcher,
    Javascript,
    Json,
}

/// A raw hit from the local annotated repository, before normalization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepoHit {
    /// Path relative to the repository root.
    pub file_path: String,
    pub kind: RepoFileKind,
    pub name: String,
    pub description: String,
    pub tags: Vec<String>,
    /// Relevance in [0.0, 1.0], capped by the adapter.
    pub relevance: f64,
    /// Catalog object this hit is about, when the indexer identified one.
    pub object_name: Option<String>,
    /// Pattern this hit is about, when the indexer identified one.
    pub pattern_name: Option<String>,
    /// Objects appearing in a patcher file, keyed by object class.
    pub object_counts: HashMap<String, usize>,
    pub metadata: HashMap<String, serde_json::Value>,
}
