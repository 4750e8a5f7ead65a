//! Cross-links between calculator pages.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::registry::ContentRegistry;

const HREF: &str = "href=\"/";

/// Content warnings. They never stop a build: links may point into a
/// sibling registry this crate knows nothing about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type")]
pub enum Warning {
    /// Entry links to a calculator id with no entry in this registry.
    DanglingLink { from: String, to: String },
}

/// Calculator ids linked from `html` as `href="/<id>"`, in order of appearance.
pub fn cross_links(html: &str) -> Vec<&str> {
    let mut links = Vec::new();
    let mut rest = html;
    while let Some(start) = rest.find(HREF) {
        let target = &rest[start + HREF.len()..];
        let end = target.find('"').unwrap_or(target.len());
        let slug = target[..end]
            .split(['#', '?'])
            .next()
            .unwrap_or_default()
            .trim_end_matches('/');
        if !slug.is_empty() && !slug.contains('/') {
            links.push(slug);
        }
        rest = &target[end..];
    }
    links
}

pub fn check(registry: &ContentRegistry) -> Vec<Warning> {
    let mut warnings = Vec::new();
    for entry in registry.entries() {
        for target in cross_links(&entry.html) {
            if !registry.contains(target) {
                log::warn!("{} links to unknown calculator {}", entry.id, target);
                warnings.push(Warning::DanglingLink {
                    from: entry.id.clone(),
                    to: target.to_string(),
                });
            }
        }
    }
    warnings
}
