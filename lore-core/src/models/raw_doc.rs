use serde::{Deserialize, Serialize};

/// One inlet or outlet description on a reference page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortSpec {
    pub index: usize,
    pub port_type: String,
    pub description: String,
}

/// A raw hit from the remote reference corpus, before normalization.
///
/// Index-only hits carry name/description/category/tags; hits whose
/// reference page was fetched also carry inlets, outlets, and related
/// objects.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawDoc {
    pub object_name: String,
    pub description: String,
    pub category: String,
    pub tags: Vec<String>,
    /// Canonical documentation URLs for this object.
    pub urls: Vec<String>,
    /// Index-match relevance in [0.0, 1.0].
    pub relevance: f64,
    pub inlets: Vec<PortSpec>,
    pub outlets: Vec<PortSpec>,
    pub related_objects: Vec<String>,
}
