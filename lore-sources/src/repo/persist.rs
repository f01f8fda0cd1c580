//! Pattern persistence: markdown document + git commit.

use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::{info, warn};

use lore_core::errors::{SourceError, SourceResult};
use lore_core::knowledge::Pattern;

/// Render a pattern as a markdown discovery document.
pub fn render_markdown(pattern: &Pattern) -> String {
    let mut content = format!(
        "# {name}\n\n\
         ## Description\n{description}\n\n\
         ## Discovery Details\n\
         - **Discovered**: {discovered}\n\
         - **Confidence**: {confidence}\n\
         - **Usage Count**: {usage}\n\
         - **Validated**: {validated}\n\n\
         ## Examples\n",
        name = pattern.name,
        description = pattern.description,
        discovered = pattern.discovered_at.to_rfc3339(),
        confidence = pattern.confidence,
        usage = pattern.usage_count,
        validated = pattern.validated,
    );

    for (i, example) in pattern.examples.iter().enumerate() {
        let rendered =
            serde_json::to_string_pretty(example).unwrap_or_else(|_| example.to_string());
        content.push_str(&format!("\n### Example {}\n```json\n{rendered}\n```\n", i + 1));
    }

    let tags = pattern.tags();
    if !tags.is_empty() {
        content.push_str(&format!("\n## Tags\n{}\n", tags.join(", ")));
    }

    content
}

/// Write the pattern document under `discoveries/<category>/` and return
/// its path relative to the repository root.
pub fn write_pattern(repo_root: &Path, pattern: &Pattern) -> SourceResult<PathBuf> {
    let category = pattern
        .metadata
        .get("category")
        .and_then(|v| v.as_str())
        .unwrap_or("discoveries")
        .to_string();

    let stamp = Utc::now().format("%Y%m%d_%H%M%S");
    let filename = format!("{}_{stamp}.md", pattern.name.replace(' ', "_"));
    let rel_path = PathBuf::from("discoveries").join(category).join(filename);

    let full_path = repo_root.join(&rel_path);
    if let Some(parent) = full_path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| SourceError::io(parent.display().to_string(), e))?;
    }
    std::fs::write(&full_path, render_markdown(pattern))
        .map_err(|e| SourceError::io(full_path.display().to_string(), e))?;

    Ok(rel_path)
}

/// Stage and commit a newly written pattern document.
pub fn commit_pattern(repo_root: &Path, rel_path: &Path, pattern: &Pattern) -> SourceResult<()> {
    let repo = git2::Repository::open(repo_root).map_err(|e| SourceError::Git {
        reason: e.to_string(),
    })?;

    let result = (|| -> Result<(), git2::Error> {
        let mut index = repo.index()?;
        index.add_path(rel_path)?;
        index.write()?;
        let tree_id = index.write_tree()?;
        let tree = repo.find_tree(tree_id)?;

        let signature = repo
            .signature()
            .or_else(|_| git2::Signature::now("lore", "lore@localhost"))?;

        let message = format!(
            "Add discovered pattern: {}\n\nConfidence: {}\nUsage count: {}",
            pattern.name, pattern.confidence, pattern.usage_count
        );

        let parent = repo
            .head()
            .ok()
            .and_then(|head| head.peel_to_commit().ok());
        let parents: Vec<&git2::Commit> = parent.iter().collect();

        repo.commit(
            Some("HEAD"),
            &signature,
            &signature,
            &message,
            &tree,
            &parents,
        )?;
        Ok(())
    })();

    match result {
        Ok(()) => {
            info!(pattern = %pattern.name, path = %rel_path.display(), "pattern committed");
            Ok(())
        }
        Err(e) => {
            warn!(pattern = %pattern.name, error = %e, "pattern commit failed");
            Err(SourceError::Git {
                reason: e.to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn pattern() -> Pattern {
        let mut metadata = HashMap::new();
        metadata.insert("tags".to_string(), serde_json::json!(["timing"]));
        Pattern {
            name: "timing counter".to_string(),
            description: "Timer-driven counter".to_string(),
            examples: vec![serde_json::json!({"objects": ["metro", "counter"]})],
            confidence: 0.7,
            usage_count: 1,
            discovered_at: Utc::now(),
            validated: false,
            metadata,
        }
    }

    #[test]
    fn markdown_includes_examples_and_tags() {
        let md = render_markdown(&pattern());
        assert!(md.starts_with("# timing counter"));
        assert!(md.contains("### Example 1"));
        assert!(md.contains("```json"));
        assert!(md.contains("## Tags\ntiming"));
    }

    #[test]
    fn write_pattern_lands_under_discoveries() {
        let dir = tempfile::tempdir().unwrap();
        let rel = write_pattern(dir.path(), &pattern()).unwrap();
        assert!(rel.starts_with("discoveries"));
        assert!(dir.path().join(&rel).is_file());
        let name = rel.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("timing_counter_"));
    }

    #[test]
    fn commit_records_the_document() {
        let dir = tempfile::tempdir().unwrap();
        let repo = git2::Repository::init(dir.path()).unwrap();
        {
            // Seed an initial commit so HEAD exists.
            let mut config = repo.config().unwrap();
            config.set_str("user.name", "test").unwrap();
            config.set_str("user.email", "test@test").unwrap();
        }

        let p = pattern();
        let rel = write_pattern(dir.path(), &p).unwrap();
        commit_pattern(dir.path(), &rel, &p).unwrap();

        let head = repo.head().unwrap().peel_to_commit().unwrap();
        assert!(head.message().unwrap().contains("timing counter"));
    }
}
