//! Reading and writing keys and translation files.
//!
//! Both files are pretty-printed JSON arrays kept in entry order so that
//! diffs stay reviewable. Writes go through a temporary file in the target
//! directory and are renamed into place, so a reader never sees a partially
//! written file even when the source and destination are the same path.

use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::{Serialize, de::DeserializeOwned};
use tempfile::NamedTempFile;

use super::entry::{KeyEntry, TransEntry};

pub const KEYS_FILE_NAME: &str = "keys.json";

const TRANS_FILE_PREFIX: &str = "trans-";
const TRANS_FILE_SUFFIX: &str = ".json";

pub fn keys_path(dir: &Path) -> PathBuf {
    dir.join(KEYS_FILE_NAME)
}

pub fn trans_path(dir: &Path, locale: &str) -> PathBuf {
    dir.join(format!("{}{}{}", TRANS_FILE_PREFIX, locale, TRANS_FILE_SUFFIX))
}

/// Extracts the locale from a `trans-<locale>.json` path.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use l10n_tools::core::store::locale_from_trans_path;
///
/// assert_eq!(locale_from_trans_path(Path::new("cache/app/trans-ko.json")), Some("ko"));
/// assert_eq!(locale_from_trans_path(Path::new("cache/app/keys.json")), None);
/// ```
pub fn locale_from_trans_path(path: &Path) -> Option<&str> {
    path.file_name()?
        .to_str()?
        .strip_prefix(TRANS_FILE_PREFIX)?
        .strip_suffix(TRANS_FILE_SUFFIX)
        .filter(|locale| !locale.is_empty())
}

pub fn read_key_entries(path: &Path) -> Result<Vec<KeyEntry>> {
    read_json_array(path)
}

pub fn write_key_entries(path: &Path, entries: &[KeyEntry]) -> Result<()> {
    write_json_atomic(path, entries)
}

/// Read a translation file. A missing file means the locale has no
/// translations yet and yields an empty list.
pub fn read_trans_entries(path: &Path) -> Result<Vec<TransEntry>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    read_json_array(path)
}

pub fn write_trans_entries(path: &Path, entries: &[TransEntry]) -> Result<()> {
    write_json_atomic(path, entries)
}

fn read_json_array<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse JSON: {}", path.display()))
}

/// Serialize with 2-space indentation and a trailing newline, then replace
/// `path` in one rename.
fn write_json_atomic<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)
        .with_context(|| format!("Failed to create directory: {}", parent.display()))?;

    let content = serde_json::to_string_pretty(value).context("Failed to serialize JSON")?;

    let mut temp = NamedTempFile::new_in(parent)
        .with_context(|| format!("Failed to create temporary file in: {}", parent.display()))?;
    temp.write_all(content.as_bytes())
        .and_then(|_| temp.write_all(b"\n"))
        .and_then(|_| temp.as_file().sync_all())
        .with_context(|| format!("Failed to write temporary file for: {}", path.display()))?;
    temp.persist(path)
        .with_context(|| format!("Failed to write file: {}", path.display()))?;

    Ok(())
}
