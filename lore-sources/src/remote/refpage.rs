//! Reference-page markup extraction.
//!
//! The reference pages use a small, stable set of class-tagged divs, so a
//! handful of regexes is enough; there is no general HTML parsing here.
//! Port divs (`inlet`/`outlet`) carry unique class names and no nested
//! markup beyond inline tags, so they are matched over the whole page.

use std::sync::OnceLock;

use regex::Regex;

use lore_core::models::PortSpec;

/// Everything extracted from one reference page.
#[derive(Debug, Clone, Default)]
pub struct RefPage {
    pub description: String,
    pub inlets: Vec<PortSpec>,
    pub outlets: Vec<PortSpec>,
    pub related_objects: Vec<String>,
}

fn description_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?s)<div class="description"[^>]*>(.*?)</div>"#).expect("valid regex")
    })
}

fn inlet_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?s)<div class="inlet"(?:\s+data-type="([^"]*)")?[^>]*>(.*?)</div>"#)
            .expect("valid regex")
    })
}

fn outlet_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?s)<div class="outlet"(?:\s+data-type="([^"]*)")?[^>]*>(.*?)</div>"#)
            .expect("valid regex")
    })
}

fn seealso_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?s)<div class="seealso"[^>]*>(.*?)</div>"#).expect("valid regex")
    })
}

fn anchor_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)<a[^>]*>(.*?)</a>").expect("valid regex"))
}

fn tag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<[^>]+>").expect("valid regex"))
}

/// Strip markup and collapse whitespace.
fn text_of(fragment: &str) -> String {
    let stripped = tag_re().replace_all(fragment, " ");
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn extract_ports(html: &str, re: &Regex) -> Vec<PortSpec> {
    re.captures_iter(html)
        .enumerate()
        .map(|(index, caps)| PortSpec {
            index,
            port_type: caps
                .get(1)
                .map(|m| m.as_str().to_string())
                .unwrap_or_else(|| "signal".to_string()),
            description: text_of(&caps[2]),
        })
        .collect()
}

/// Parse a fetched reference page.
pub fn parse(html: &str) -> RefPage {
    let description = description_re()
        .captures(html)
        .map(|caps| text_of(&caps[1]))
        .unwrap_or_default();

    let related_objects = seealso_re()
        .captures(html)
        .map(|caps| {
            anchor_re()
                .captures_iter(&caps[1])
                .map(|a| text_of(&a[1]))
                .filter(|s| !s.is_empty())
                .collect()
        })
        .unwrap_or_default();

    RefPage {
        description,
        inlets: extract_ports(html, inlet_re()),
        outlets: extract_ports(html, outlet_re()),
        related_objects,
    }
}
