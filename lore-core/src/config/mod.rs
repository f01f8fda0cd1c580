//! Configuration for the Lore workspace.
//!
//! All sections deserialize with `#[serde(default)]`, so a partial (or empty)
//! TOML file yields a fully usable config. Unrecognized keys are ignored.

mod fusion_config;
mod local_repo_config;
mod remote_docs_config;

pub mod defaults;

pub use fusion_config::FusionConfig;
pub use local_repo_config::LocalRepoConfig;
pub use remote_docs_config::RemoteDocsConfig;

use serde::{Deserialize, Serialize};

use crate::errors::{LoreError, LoreResult};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoreConfig {
    pub fusion: FusionConfig,
    pub remote_docs: RemoteDocsConfig,
    pub local_repo: LocalRepoConfig,
}

impl LoreConfig {
    /// Parse a config from a TOML string.
    pub fn from_toml(contents: &str) -> LoreResult<Self> {
        toml::from_str(contents).map_err(|e| LoreError::Config {
            reason: e.to_string(),
        })
    }

    /// Load a config from a TOML file on disk.
    pub fn load(path: &std::path::Path) -> LoreResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| LoreError::Config {
            reason: format!("{}: {e}", path.display()),
        })?;
        Self::from_toml(&contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_yields_defaults() {
        let config = LoreConfig::from_toml("").unwrap();
        assert_eq!(config.fusion.pattern_confidence_threshold, 0.8);
        assert_eq!(config.fusion.cache_duration_secs, 300);
        assert!(config.fusion.auto_enhance_knowledge);
    }

    #[test]
    fn partial_section_fills_rest_from_defaults() {
        let config = LoreConfig::from_toml(
            r#"
            [fusion]
            pattern_confidence_threshold = 0.9
            "#,
        )
        .unwrap();
        assert_eq!(config.fusion.pattern_confidence_threshold, 0.9);
        assert_eq!(config.fusion.cache_duration_secs, 300);
    }

    #[test]
    fn unrecognized_keys_are_ignored() {
        let config = LoreConfig::from_toml(
            r#"
            [fusion]
            no_such_option = true
            "#,
        )
        .unwrap();
        assert!(config.fusion.auto_enhance_knowledge);
    }
}
