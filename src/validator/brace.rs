//! Brace placeholders: `{}`, `{0}` and `{name}`.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

use super::ValidationError;

static BRACE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{([^{}]*)\}").unwrap());

/// Placeholder identities in order of first appearance; empty for `{}`.
pub fn extract(msg: &str) -> Vec<String> {
    let mut seen = BTreeSet::new();
    BRACE_REGEX
        .captures_iter(msg)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .filter(|name| seen.insert(*name))
        .map(String::from)
        .collect()
}

fn display(name: &str) -> String {
    format!("{{{}}}", name)
}

pub fn check_missing(source: &[String], target: &[String]) -> Result<(), ValidationError> {
    match source.iter().find(|name| !target.contains(name)) {
        Some(name) => Err(ValidationError::FormatNotFound {
            format: display(name),
        }),
        None => Ok(()),
    }
}

/// Repeating a placeholder the source already has is fine; only new
/// identities are rejected.
pub fn check_unexpected(source: &[String], target: &[String]) -> Result<(), ValidationError> {
    match target.iter().find(|name| !source.contains(name)) {
        Some(name) => Err(ValidationError::UnexpectedFormat {
            format: display(name),
        }),
        None => Ok(()),
    }
}
