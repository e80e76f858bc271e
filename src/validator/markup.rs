//! Markup tags: paired (`<b>…</b>`), self-closing (`<heart/>`) and void
//! elements (`<br>`).
//!
//! Tags are matched by name only. Void elements may be dropped or repeated by
//! a translation but not introduced; every other tag the source uses must be
//! kept, and may not occur more often than in the source.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use super::ValidationError;

static TAG_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<(/?)([A-Za-z][A-Za-z0-9_.:-]*)(?:\s[^<>]*?)?(/?)\s*>").unwrap()
});

/// HTML elements that never have content or a closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
    Open,
    Close,
    SelfClosing,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub name: String,
    pub kind: TagKind,
}

pub fn is_void_element(name: &str) -> bool {
    VOID_ELEMENTS
        .iter()
        .any(|void| void.eq_ignore_ascii_case(name))
}

pub fn extract(msg: &str) -> Vec<Tag> {
    TAG_REGEX
        .captures_iter(msg)
        .map(|caps| {
            let kind = if !caps[1].is_empty() {
                TagKind::Close
            } else if !caps[3].is_empty() {
                TagKind::SelfClosing
            } else {
                TagKind::Open
            };
            Tag {
                name: caps[2].to_string(),
                kind,
            }
        })
        .collect()
}

/// Number of elements per tag name. Closing tags belong to their opening tag
/// and only register the name.
fn element_counts(tags: &[Tag]) -> BTreeMap<&str, usize> {
    let mut counts = BTreeMap::new();
    for tag in tags {
        let count = counts.entry(tag.name.as_str()).or_insert(0);
        if tag.kind != TagKind::Close {
            *count += 1;
        }
    }
    counts
}

/// Tag names in order of first appearance.
fn names(tags: &[Tag]) -> Vec<&str> {
    let mut names: Vec<&str> = Vec::new();
    for tag in tags {
        if !names.contains(&tag.name.as_str()) {
            names.push(&tag.name);
        }
    }
    names
}

pub fn check_missing(source: &[Tag], target: &[Tag]) -> Result<(), ValidationError> {
    let target_names = names(target);
    for name in names(source) {
        if !is_void_element(name) && !target_names.contains(&name) {
            return Err(ValidationError::TagNotFound {
                tag: name.to_string(),
            });
        }
    }
    Ok(())
}

pub fn check_unexpected(source: &[Tag], target: &[Tag]) -> Result<(), ValidationError> {
    let source_counts = element_counts(source);
    let target_counts = element_counts(target);

    for name in names(target) {
        let allowed = match source_counts.get(name) {
            None => false,
            Some(_) if is_void_element(name) => true,
            Some(&count) => target_counts.get(name).is_some_and(|&n| n <= count),
        };
        if !allowed {
            return Err(ValidationError::UnexpectedTag {
                tag: name.to_string(),
            });
        }
    }
    Ok(())
}
