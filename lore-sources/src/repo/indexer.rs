//! Format-specific indexing of the annotated repository.
//!
//! Walks the key directories and turns each supported file into an
//! [`IndexEntry`]: markdown notes, patcher files, JavaScript sources, and
//! JSON presets. Files that fail to parse are logged and skipped; one bad
//! file never aborts an index build.

use std::collections::HashMap;
use std::path::Path;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use lore_core::models::RepoFileKind;

/// Directories indexed inside the repository, with what they hold.
pub const KEY_DIRECTORIES: &[(&str, &str)] = &[
    ("meta-programming/json-format", "JSON format patterns"),
    ("jsui-temporal-scaffolding", "Temporal scaffolding systems"),
    ("max-reference-findings", "Object discoveries"),
    ("sample-playback", "Audio manipulation techniques"),
    ("presets", "Preset patterns and templates"),
    ("discoveries", "Persisted pattern discoveries"),
];

/// Root-level files indexed regardless of directory.
const ROOT_FILES: &[&str] = &["README.md", "DISCOVERIES.md", "PATTERNS.md"];

/// Knowledge category an entry is filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Patterns,
    Objects,
    Techniques,
    Ui,
    Temporal,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Patterns => "patterns",
            Self::Objects => "objects",
            Self::Techniques => "techniques",
            Self::Ui => "ui",
            Self::Temporal => "temporal",
        }
    }
}

/// One indexed repository file.
#[derive(Debug, Clone)]
pub struct IndexEntry {
    /// Path relative to the repository root.
    pub file_path: String,
    pub kind: RepoFileKind,
    pub name: String,
    pub description: String,
    pub tags: Vec<String>,
    pub category: Category,
    /// Object classes and counts, for patcher files.
    pub object_counts: HashMap<String, usize>,
    /// Combination patterns detected in a patcher file.
    pub patterns: Vec<String>,
    /// Function names, for JavaScript files.
    pub functions: Vec<String>,
    pub code_example_count: usize,
    /// First 500 characters of a markdown note.
    pub preview: Option<String>,
    pub modified: DateTime<Utc>,
}

/// The in-memory searchable index.
#[derive(Debug, Clone, Default)]
pub struct KnowledgeIndex {
    pub entries: Vec<IndexEntry>,
}

impl KnowledgeIndex {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Build the full index from the repository checkout.
pub fn build_index(repo_root: &Path) -> KnowledgeIndex {
    let mut index = KnowledgeIndex::default();

    for (dir, what) in KEY_DIRECTORIES {
        let full = repo_root.join(dir);
        if !full.is_dir() {
            continue;
        }
        debug!(dir, what, "indexing directory");
        for file in WalkDir::new(&full)
            .into_iter()
            .filter_map(Result::ok)
            .filter(|e| e.file_type().is_file())
        {
            if let Some(entry) = index_file(repo_root, file.path()) {
                index.entries.push(entry);
            }
        }
    }

    for name in ROOT_FILES {
        let path = repo_root.join(name);
        if path.is_file() {
            if let Some(entry) = index_file(repo_root, &path) {
                index.entries.push(entry);
            }
        }
    }

    info!(entries = index.len(), "repository index built");
    index
}

/// Index a single file by extension. `None` for unsupported or unusable
/// files.
pub fn index_file(repo_root: &Path, path: &Path) -> Option<IndexEntry> {
    let ext = path.extension()?.to_str()?.to_lowercase();
    let result = match ext.as_str() {
        "md" => index_markdown(repo_root, path),
        "maxpat" => index_patcher(repo_root, path),
        "js" => index_javascript(repo_root, path),
        "json" => index_json(repo_root, path),
        _ => return None,
    };

    match result {
        Ok(entry) => entry,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "indexing failed");
            None
        }
    }
}

fn relative(repo_root: &Path, path: &Path) -> String {
    path.strip_prefix(repo_root)
        .unwrap_or(path)
        .to_string_lossy()
        .into_owned()
}

fn modified_at(path: &Path) -> DateTime<Utc> {
    std::fs::metadata(path)
        .and_then(|m| m.modified())
        .map(DateTime::<Utc>::from)
        .unwrap_or_else(|_| Utc::now())
}

fn title_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)^#\s+(.+)$").expect("valid regex"))
}

fn paragraph_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?ms)^#\s+.+?\n\s*\n(.+?)(?:\n\s*\n|\z)").expect("valid regex")
    })
}

fn code_block_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)```(\w+)?\n(.*?)\n```").expect("valid regex"))
}

fn function_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"function\s+(\w+)\s*\(").expect("valid regex"))
}

/// Concept keywords promoted to tags when a markdown note mentions them.
const CONCEPT_TAGS: &[&str] = &["temporal", "scaffolding", "jsui", "buffer", "sample"];

fn index_markdown(repo_root: &Path, path: &Path) -> std::io::Result<Option<IndexEntry>> {
    let content = std::fs::read_to_string(path)?;
    let lower = content.to_lowercase();

    let name = title_re()
        .captures(&content)
        .map(|c| c[1].trim().to_string())
        .unwrap_or_else(|| {
            path.file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default()
        });

    let description = paragraph_re()
        .captures(&content)
        .map(|c| c[1].split_whitespace().collect::<Vec<_>>().join(" "))
        .unwrap_or_default();

    let tags: Vec<String> = CONCEPT_TAGS
        .iter()
        .filter(|t| lower.contains(**t))
        .map(|t| (*t).to_string())
        .collect();

    let file_path = relative(repo_root, path);
    let category = categorize(&file_path, &tags);

    Ok(Some(IndexEntry {
        file_path,
        kind: RepoFileKind::Markdown,
        name,
        description,
        tags,
        category,
        object_counts: HashMap::new(),
        patterns: Vec::new(),
        functions: Vec::new(),
        code_example_count: code_block_re().captures_iter(&content).count(),
        preview: Some(content.chars().take(500).collect()),
        modified: modified_at(path),
    }))
}

/// Object class of one patcher box. Boxes are either wrapped
/// (`{"box": {...}}`) or flat; generic `newobj` boxes carry the class as
/// the first token of their text.
fn box_class(value: &serde_json::Value) -> Option<String> {
    let body = value.get("box").unwrap_or(value);
    let class = body
        .get("class")
        .or_else(|| body.get("maxclass"))
        .and_then(|v| v.as_str())?;

    if class == "newobj" {
        let text = body.get("text").and_then(|v| v.as_str()).unwrap_or("");
        return text.split_whitespace().next().map(String::from);
    }
    Some(class.to_string())
}

/// Object combinations recognized as known patterns.
const COMBINATIONS: &[(&str, &str, &str)] = &[
    ("metro", "counter", "timing-counter"),
    ("buffer~", "groove~", "sample-playback"),
];

fn index_patcher(repo_root: &Path, path: &Path) -> std::io::Result<Option<IndexEntry>> {
    let content = std::fs::read_to_string(path)?;
    let parsed: serde_json::Value = match serde_json::from_str(&content) {
        Ok(v) => v,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "unparseable patcher");
            return Ok(None);
        }
    };

    let boxes = parsed
        .get("patcher")
        .and_then(|p| p.get("boxes"))
        .and_then(|b| b.as_array())
        .cloned()
        .unwrap_or_default();

    let mut object_counts: HashMap<String, usize> = HashMap::new();
    for b in &boxes {
        if let Some(class) = box_class(b) {
            *object_counts.entry(class).or_default() += 1;
        }
    }

    let mut patterns: Vec<String> = COMBINATIONS
        .iter()
        .filter(|(a, b, _)| object_counts.contains_key(*a) && object_counts.contains_key(*b))
        .map(|(_, _, name)| (*name).to_string())
        .collect();
    if object_counts.contains_key("jsui") {
        patterns.push("custom-ui".to_string());
    }

    let total: usize = object_counts.values().sum();
    let description = if patterns.is_empty() {
        format!("Patcher with {total} objects")
    } else {
        format!("Patcher demonstrating: {}", patterns.join(", "))
    };

    let mut tags = patterns.clone();
    for class in object_counts.keys().take(5) {
        if !tags.contains(class) {
            tags.push(class.clone());
        }
    }

    let category = if object_counts.contains_key("jsui") {
        Category::Ui
    } else if patterns.iter().any(|p| p == "timing-counter") {
        Category::Temporal
    } else {
        Category::Patterns
    };

    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    Ok(Some(IndexEntry {
        file_path: relative(repo_root, path),
        kind: RepoFileKind::Patcher,
        name,
        description,
        tags,
        category,
        object_counts,
        patterns,
        functions: Vec::new(),
        code_example_count: 0,
        preview: None,
        modified: modified_at(path),
    }))
}

fn index_javascript(repo_root: &Path, path: &Path) -> std::io::Result<Option<IndexEntry>> {
    let content = std::fs::read_to_string(path)?;

    let functions: Vec<String> = function_re()
        .captures_iter(&content)
        .map(|c| c[1].to_string())
        .collect();

    let (tags, description, category) = if content.contains("mgraphics") {
        (
            vec!["jsui".to_string(), "graphics".to_string()],
            "UI graphics script".to_string(),
            Category::Ui,
        )
    } else if content.contains("outlet") || content.contains("inlet") {
        (
            vec!["js".to_string(), "integration".to_string()],
            "Scripted object integration".to_string(),
            Category::Objects,
        )
    } else {
        // Plain scripts carry no catalog knowledge.
        return Ok(None);
    };

    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    Ok(Some(IndexEntry {
        file_path: relative(repo_root, path),
        kind: RepoFileKind::Javascript,
        name,
        description,
        tags,
        category,
        object_counts: HashMap::new(),
        patterns: Vec::new(),
        functions,
        code_example_count: 0,
        preview: None,
        modified: modified_at(path),
    }))
}

fn index_json(repo_root: &Path, path: &Path) -> std::io::Result<Option<IndexEntry>> {
    let content = std::fs::read_to_string(path)?;
    if serde_json::from_str::<serde_json::Value>(&content).is_err() {
        return Ok(None);
    }

    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    // Only presets are interesting among plain JSON files.
    if !name.to_lowercase().contains("preset") {
        return Ok(None);
    }

    Ok(Some(IndexEntry {
        file_path: relative(repo_root, path),
        kind: RepoFileKind::Json,
        description: format!("Preset configuration: {name}"),
        name,
        tags: vec!["preset".to_string(), "configuration".to_string()],
        category: Category::Patterns,
        object_counts: HashMap::new(),
        patterns: Vec::new(),
        functions: Vec::new(),
        code_example_count: 0,
        preview: None,
        modified: modified_at(path),
    }))
}

fn categorize(file_path: &str, tags: &[String]) -> Category {
    let lower = file_path.to_lowercase();
    if lower.contains("temporal") || lower.contains("scaffolding") {
        Category::Temporal
    } else if lower.contains("jsui") {
        Category::Ui
    } else if lower.contains("sample") || lower.contains("buffer") {
        Category::Techniques
    } else if lower.contains("meta-programming") {
        Category::Patterns
    } else if tags.iter().any(|t| t == "temporal") {
        Category::Temporal
    } else if tags.iter().any(|t| t == "jsui") {
        Category::Ui
    } else {
        Category::Patterns
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &Path, rel: &str, content: &str) -> std::path::PathBuf {
        let path = dir.join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn markdown_title_description_and_tags() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            dir.path(),
            "max-reference-findings/groove-trick.md",
            "# Groove trick\n\nA buffer playback trick using sample offsets.\n\nMore text.\n",
        );

        let entry = index_file(dir.path(), &path).unwrap();
        assert_eq!(entry.name, "Groove trick");
        assert_eq!(
            entry.description,
            "A buffer playback trick using sample offsets."
        );
        assert!(entry.tags.contains(&"buffer".to_string()));
        assert!(entry.tags.contains(&"sample".to_string()));
        assert_eq!(entry.kind, RepoFileKind::Markdown);
    }

    #[test]
    fn patcher_counts_objects_and_detects_combinations() {
        let dir = tempfile::tempdir().unwrap();
        let patcher = serde_json::json!({
            "patcher": {
                "boxes": [
                    {"box": {"maxclass": "newobj", "text": "metro 100"}},
                    {"box": {"maxclass": "newobj", "text": "counter 0 7"}},
                    {"box": {"maxclass": "toggle"}},
                ]
            }
        });
        let path = write(dir.path(), "presets/clock.maxpat", &patcher.to_string());

        let entry = index_file(dir.path(), &path).unwrap();
        assert_eq!(entry.object_counts["metro"], 1);
        assert_eq!(entry.object_counts["counter"], 1);
        assert_eq!(entry.object_counts["toggle"], 1);
        assert!(entry.patterns.contains(&"timing-counter".to_string()));
        assert_eq!(entry.category, Category::Temporal);
    }

    #[test]
    fn javascript_classified_by_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            dir.path(),
            "jsui-temporal-scaffolding/meter.js",
            "function paint() { mgraphics.rectangle(0, 0, 10, 10); }\n",
        );

        let entry = index_file(dir.path(), &path).unwrap();
        assert_eq!(entry.category, Category::Ui);
        assert_eq!(entry.functions, vec!["paint"]);
    }

    #[test]
    fn plain_javascript_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "presets/util.js", "function add(a, b) { return a + b; }\n");
        assert!(index_file(dir.path(), &path).is_none());
    }

    #[test]
    fn non_preset_json_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "presets/data.json", r#"{"a": 1}"#);
        assert!(index_file(dir.path(), &path).is_none());

        let preset = write(dir.path(), "presets/pad-preset.json", r#"{"a": 1}"#);
        let entry = index_file(dir.path(), &preset).unwrap();
        assert!(entry.tags.contains(&"preset".to_string()));
    }

    #[test]
    fn build_index_walks_key_directories_and_root_files() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "README.md", "# Repo\n\nKnowledge collection.\n");
        write(
            dir.path(),
            "max-reference-findings/note.md",
            "# Note\n\nAbout temporal things.\n",
        );
        write(dir.path(), "unrelated/skip.md", "# Skipped\n\nNot indexed.\n");

        let index = build_index(dir.path());
        assert_eq!(index.len(), 2);
        assert!(index.entries.iter().all(|e| e.name != "Skipped"));
    }
}
