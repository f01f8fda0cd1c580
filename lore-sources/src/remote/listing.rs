//! Object index built from the consolidated documentation listing.
//!
//! The listing is a markdown file collecting every reference-page link,
//! organized under `## Category` headers. It is the single source of truth
//! for what exists in the catalog; when it cannot be read, a small built-in
//! index of well-known objects keeps the adapter functional.

use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::info;

/// One indexed catalog object (or tutorial/guide document).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexedObject {
    pub description: String,
    pub category: String,
    pub tags: Vec<String>,
    pub urls: Vec<String>,
}

pub type ObjectIndex = HashMap<String, IndexedObject>;

fn refpage_link_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\[([^\]]+)\]\((https://docs\.cycling74\.com/max8/refpages/[^)]+)\)")
            .expect("valid regex")
    })
}

fn doc_link_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\[([^\]]+)\]\((https://docs\.cycling74\.com/max8/[^)]+)\)")
            .expect("valid regex")
    })
}

/// Parse the consolidated listing into an object index.
pub fn parse_listing(content: &str) -> ObjectIndex {
    let mut index = ObjectIndex::new();
    let mut current_category = "general".to_string();

    for line in content.lines() {
        let line = line.trim();

        // Category headers (## Control, ## Audio, ...). The functional
        // overview header is prose, not a category.
        if let Some(header) = line.strip_prefix("## ") {
            if !header.starts_with("A Functional") {
                current_category = header.to_lowercase().replace([' ', '-'], "_");
            }
            continue;
        }

        let mut matched_refpage = false;
        for caps in refpage_link_re().captures_iter(line) {
            matched_refpage = true;
            let name = caps[1].trim().to_string();
            let url = caps[2].to_string();

            if name == "Reference page" || name == "Technical Notes" {
                continue;
            }

            match index.get_mut(&name) {
                Some(existing) => {
                    if !existing.urls.contains(&url) {
                        existing.urls.push(url);
                    }
                }
                None => {
                    index.insert(
                        name.clone(),
                        IndexedObject {
                            description: describe(&name, &current_category),
                            category: current_category.clone(),
                            tags: derive_tags(&name, &current_category),
                            urls: vec![url],
                        },
                    );
                }
            }
        }

        if matched_refpage {
            continue;
        }

        // Tutorials, guides, and other non-refpage documentation.
        for caps in doc_link_re().captures_iter(line) {
            let name = caps[1].trim().to_string();
            let url = caps[2].to_string();
            if index.contains_key(&name) {
                continue;
            }

            let doc_type = if url.to_lowercase().contains("tutorial") {
                "tutorial"
            } else {
                "guide"
            };
            index.insert(
                name.clone(),
                IndexedObject {
                    description: format!("Catalog {doc_type}: {name}"),
                    category: format!("documentation_{doc_type}"),
                    tags: vec![doc_type.to_string(), "documentation".to_string()],
                    urls: vec![url],
                },
            );
        }
    }

    info!(objects = index.len(), "parsed consolidated listing");
    index
}

/// Description for an indexed object: a curated blurb for well-known
/// objects, a category template otherwise.
fn describe(name: &str, category: &str) -> String {
    let curated: &[(&str, &str)] = &[
        ("metro", "Output bang messages at a regular interval"),
        ("counter", "Count and output numbers"),
        ("pattrhub", "Route pattr messages between patchers"),
        ("pattr", "Store and recall parameter values"),
        ("pattrstorage", "Store and recall multiple pattr states"),
        ("transport", "Control global timing and synchronization"),
        ("jsui", "Create custom user interfaces with JavaScript"),
        ("buffer~", "Store audio samples"),
        ("cycle~", "Sinusoidal oscillator"),
        ("groove~", "Variable-rate playback of buffer~ content"),
        ("delay", "Delay messages by a specified time"),
        ("random", "Generate random numbers"),
        ("expr", "Evaluate mathematical expressions"),
        ("scale", "Map input range to output range"),
        ("route", "Route messages based on first element"),
        ("gate", "Route input to one of several outputs"),
        ("select", "Output a bang when input matches stored value"),
        ("trigger", "Output multiple values in right-to-left order"),
        ("print", "Print messages to the console"),
    ];
    if let Some((_, blurb)) = curated.iter().find(|(n, _)| *n == name) {
        return (*blurb).to_string();
    }

    match category {
        "control" => format!("Control object: {name}"),
        "data" => format!("Data manipulation object: {name}"),
        "timing" => format!("Timing and scheduling object: {name}"),
        "math" => format!("Mathematical operation object: {name}"),
        "midi" => format!("MIDI input/output object: {name}"),
        "user_interface" => format!("User interface object: {name}"),
        "audio" => format!("Audio processing object: {name}"),
        "patching" => format!("Patching and structure object: {name}"),
        "files" => format!("File handling object: {name}"),
        "lists" => format!("List processing object: {name}"),
        "messages" => format!("Message manipulation object: {name}"),
        _ => format!("Catalog object: {name}"),
    }
}

/// Tags derived from naming conventions and category.
fn derive_tags(name: &str, category: &str) -> Vec<String> {
    let mut tags = vec![category.to_string()];

    if name.ends_with('~') {
        tags.push("audio".to_string());
    }
    if name.ends_with("in") {
        tags.push("input".to_string());
    }
    if name.ends_with("out") {
        tags.push("output".to_string());
    }
    if name.contains("midi") {
        tags.push("midi".to_string());
    }
    if name.contains("pattr") {
        tags.push("preset".to_string());
    }
    if matches!(name, "metro" | "delay" | "timer" | "transport") {
        tags.push("timing".to_string());
    }
    if matches!(name, "random" | "drunk" | "urn") {
        tags.push("random".to_string());
    }
    if matches!(name, "button" | "dial" | "slider" | "toggle") {
        tags.push("ui".to_string());
    }

    tags
}

/// Built-in fallback index used when no listing is available.
pub fn default_index(base_url: &str) -> ObjectIndex {
    let seed: &[(&str, &str, &[&str])] = &[
        ("metro", "timing", &["timing", "clock", "bang"]),
        ("counter", "math", &["counting", "sequence", "number"]),
        ("transport", "timing", &["timing", "sync", "global", "tempo"]),
        ("cycle~", "audio", &["audio", "oscillator", "sine", "generator"]),
        ("buffer~", "audio", &["audio", "sample", "storage", "buffer"]),
        (
            "groove~",
            "audio",
            &["audio", "playback", "sample", "variable-speed"],
        ),
        ("jsui", "ui", &["ui", "javascript", "custom", "interface"]),
        ("dial", "ui", &["ui", "control", "input", "dial"]),
        ("expr", "math", &["math", "expression", "calculation"]),
        ("scale", "math", &["math", "mapping", "range", "scaling"]),
        ("pattr", "data", &["data", "preset", "parameter"]),
        ("pattrhub", "data", &["data", "preset", "routing"]),
    ];

    seed.iter()
        .map(|(name, category, tags)| {
            (
                (*name).to_string(),
                IndexedObject {
                    description: describe(name, category),
                    category: (*category).to_string(),
                    tags: tags.iter().map(|t| (*t).to_string()).collect(),
                    urls: vec![format!("{base_url}/refpages/{name}")],
                },
            )
        })
        .collect()
}
