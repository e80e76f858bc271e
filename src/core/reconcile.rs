//! Reconciliation of extracted keys with persisted translations.
//!
//! For each target locale the previous translation file is merged with the
//! freshly extracted keys:
//!
//! 1. Entries follow extraction order. Existing translations are carried
//!    forward; keys seen for the first time get blank messages and `new`.
//! 2. Entries whose key disappeared are kept at the tail, flagged `obsolete`.
//!    A key that comes back goes through `new` again and is clean as soon as
//!    it is fully translated.
//! 3. Empty messages are filled from the fallback locale and flagged
//!    `fallback`.
//! 4. Fully translated entries are validated against the key or the
//!    validation base locale. Failures become entry flags and diagnostics,
//!    never errors.
//!
//! Every "from" store is read before any "to" store is written, so a domain
//! can be reconciled in place.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, warn};

use super::builder::KeyCollector;
use super::collection::EntryCollection;
use super::entry::{
    Entry, FLAG_FALLBACK, FLAG_NEW, FLAG_OBSOLETE, KeyEntry, PluralQuantities, TransEntry,
};
use super::store::{read_key_entries, read_trans_entries, trans_path, write_trans_entries};
use crate::validator::{ValidationError, validate_msg};

/// What translated messages are validated against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationMode {
    /// No validation; validator flags from earlier runs are left alone.
    Skip,
    /// Validate against the key itself (gettext-style keys).
    Key,
    /// Validate against another locale's message for the same entry.
    BaseLocale(String),
}

/// Validation source for a single locale.
#[derive(Debug, Clone, Copy)]
pub enum Validation<'a> {
    Skip,
    AgainstKey,
    AgainstLocale(&'a EntryCollection<TransEntry>),
}

impl Validation<'_> {
    pub fn is_enabled(&self) -> bool {
        !matches!(self, Validation::Skip)
    }
}

/// Everything `reconcile_locale` needs to know about the locale being built.
#[derive(Debug, Clone, Copy)]
pub struct LocaleContext<'a> {
    pub locale: &'a str,
    pub plurals: &'a PluralQuantities,
    /// Entries of the fallback locale; `None` when there is no fallback or
    /// this is the fallback locale.
    pub fallback: Option<&'a EntryCollection<TransEntry>>,
    pub validation: Validation<'a>,
}

/// A translated message rejected by the validator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidMessage {
    pub context: Option<String>,
    pub key: String,
    pub quantity: String,
    pub source: String,
    pub message: String,
    pub error: ValidationError,
}

#[derive(Debug, Clone, Default)]
pub struct LocaleOutcome {
    pub entries: Vec<TransEntry>,
    pub invalid: Vec<InvalidMessage>,
}

impl LocaleOutcome {
    pub fn count_flag(&self, flag: &str) -> usize {
        self.entries.iter().filter(|e| e.has_flag(flag)).count()
    }
}

/// Merge `key_entries` into the previous translations of one locale.
pub fn reconcile_locale(
    key_entries: &[KeyEntry],
    previous: &EntryCollection<TransEntry>,
    ctx: &LocaleContext<'_>,
) -> LocaleOutcome {
    let mut result = EntryCollection::new();
    let mut invalid = Vec::new();

    for key_entry in key_entries {
        let quantities = ctx.plurals.for_entry(ctx.locale, key_entry.is_plural);
        let mut entry = match previous.find_like(key_entry) {
            Some(prev) => carry_forward(prev, &quantities, ctx.validation.is_enabled()),
            None => TransEntry::new_for(key_entry, &quantities),
        };

        if let Some(fallback) = ctx.fallback {
            fill_from_fallback(&mut entry, fallback);
        }
        if entry.has_flag(FLAG_NEW) && entry.is_translated() {
            entry.flag = None;
        }
        if let Some(problem) = validate_entry(&entry, ctx.validation) {
            entry.flag = Some(problem.error.flag().to_string());
            invalid.push(problem);
        }

        result.set(entry);
    }

    for prev in previous.iter() {
        if !result.contains(prev.context(), prev.key()) {
            let mut entry = prev.clone();
            entry.flag = Some(FLAG_OBSOLETE.to_string());
            result.set(entry);
        }
    }

    LocaleOutcome {
        entries: result.into_entries(),
        invalid,
    }
}

fn carry_forward(prev: &TransEntry, quantities: &[String], validating: bool) -> TransEntry {
    let flag = match prev.flag.as_deref() {
        Some(FLAG_OBSOLETE) => Some(FLAG_NEW.to_string()),
        Some(flag) if validating && ValidationError::is_validation_flag(flag) => None,
        _ => prev.flag.clone(),
    };
    TransEntry {
        context: prev.context.clone(),
        key: prev.key.clone(),
        messages: prev.messages.normalized(quantities),
        flag,
    }
}

fn fill_from_fallback(entry: &mut TransEntry, fallback: &EntryCollection<TransEntry>) {
    let Some(source) = fallback.find_like(&*entry) else {
        return;
    };

    let empty: Vec<String> = entry
        .messages
        .iter()
        .filter(|(_, message)| message.is_empty())
        .map(|(quantity, _)| quantity.to_string())
        .collect();

    let mut filled = false;
    for quantity in empty {
        if let Some(message) = source.messages.get(&quantity).filter(|m| !m.is_empty()) {
            entry.messages.set(quantity, message);
            filled = true;
        }
    }
    if filled {
        entry.flag = Some(FLAG_FALLBACK.to_string());
    }
}

fn validate_entry(entry: &TransEntry, validation: Validation<'_>) -> Option<InvalidMessage> {
    if !validation.is_enabled() || !entry.is_translated() {
        return None;
    }

    for (quantity, message) in entry.messages.iter() {
        let source = match validation {
            Validation::Skip => return None,
            Validation::AgainstKey => entry.key.as_str(),
            Validation::AgainstLocale(base) => {
                match base
                    .find_like(entry)
                    .and_then(|b| b.messages.get(quantity))
                    .filter(|m| !m.is_empty())
                {
                    Some(source) => source,
                    None => continue,
                }
            }
        };

        if let Err(error) = validate_msg(source, message) {
            return Some(InvalidMessage {
                context: entry.context.clone(),
                key: entry.key.clone(),
                quantity: quantity.to_string(),
                source: source.to_string(),
                message: message.to_string(),
                error,
            });
        }
    }
    None
}

// ============================================================
// Store driver
// ============================================================

#[derive(Debug, Clone)]
pub struct UpdateOptions<'a> {
    pub locales: &'a [String],
    pub fallback_locale: Option<&'a str>,
    pub validation: ValidationMode,
    pub plurals: &'a PluralQuantities,
}

/// Result of reconciling one locale.
#[derive(Debug, Clone)]
pub struct LocaleUpdate {
    pub locale: String,
    pub path: PathBuf,
    pub total: usize,
    pub new: usize,
    pub obsolete: usize,
    pub fallback: usize,
    pub invalid: Vec<InvalidMessage>,
}

/// A locale whose store could not be read or written.
#[derive(Debug, Clone)]
pub struct LocaleFailure {
    pub locale: String,
    pub path: PathBuf,
    pub error: String,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateReport {
    pub updated: Vec<LocaleUpdate>,
    pub failed: Vec<LocaleFailure>,
}

impl UpdateReport {
    pub fn invalid_count(&self) -> usize {
        self.updated.iter().map(|u| u.invalid.len()).sum()
    }

    pub fn is_clean(&self) -> bool {
        self.failed.is_empty() && self.invalid_count() == 0
    }
}

/// Read the keys file and merge entries that share an identity.
pub fn load_key_entries(keys_path: &Path) -> Result<Vec<KeyEntry>> {
    let mut collector = KeyCollector::new();
    collector
        .extend(read_key_entries(keys_path)?)
        .with_context(|| format!("Invalid key in {}", keys_path.display()))?;
    Ok(collector.into_entries())
}

/// Reconcile every locale in `options.locales`, reading translations from
/// `from_dir` and writing them to `to_dir` (which may be the same).
///
/// Fails only when the keys file cannot be loaded. Unreadable or unwritable
/// locale stores are reported per locale in [`UpdateReport::failed`].
pub fn update_trans(
    keys_path: &Path,
    from_dir: &Path,
    to_dir: &Path,
    options: &UpdateOptions<'_>,
) -> Result<UpdateReport> {
    let key_entries = load_key_entries(keys_path)
        .with_context(|| format!("Failed to load keys: {}", keys_path.display()))?;

    let base_locale = match &options.validation {
        ValidationMode::BaseLocale(locale) => Some(locale.as_str()),
        _ => None,
    };

    let mut stores: HashMap<&str, Result<EntryCollection<TransEntry>>> = HashMap::new();
    let needed = options
        .locales
        .iter()
        .map(String::as_str)
        .chain(options.fallback_locale)
        .chain(base_locale);
    for locale in needed {
        stores.entry(locale).or_insert_with(|| {
            read_trans_entries(&trans_path(from_dir, locale)).map(EntryCollection::from_entries)
        });
    }

    let mut report = UpdateReport::default();
    for locale in options.locales {
        let path = trans_path(to_dir, locale);
        match update_locale(&key_entries, locale, &stores, base_locale, options, &path) {
            Ok(update) => {
                debug!(
                    locale = %locale,
                    total = update.total,
                    new = update.new,
                    obsolete = update.obsolete,
                    fallback = update.fallback,
                    invalid = update.invalid.len(),
                    "updated translations"
                );
                for problem in &update.invalid {
                    warn!(locale = %locale, key = %problem.key, "{}", problem.error);
                }
                report.updated.push(update);
            }
            Err(err) => {
                let error = format!("{:#}", err);
                warn!(locale = %locale, path = %path.display(), "{}", error);
                report.failed.push(LocaleFailure {
                    locale: locale.clone(),
                    path,
                    error,
                });
            }
        }
    }

    Ok(report)
}

fn store<'s>(
    stores: &'s HashMap<&str, Result<EntryCollection<TransEntry>>>,
    locale: &str,
    role: &str,
) -> Result<&'s EntryCollection<TransEntry>> {
    match stores.get(locale) {
        Some(Ok(entries)) => Ok(entries),
        Some(Err(err)) => Err(anyhow::anyhow!("{:#}", err))
            .with_context(|| format!("Cannot use {} locale '{}'", role, locale)),
        None => anyhow::bail!("{} locale '{}' was not loaded", role, locale),
    }
}

fn update_locale(
    key_entries: &[KeyEntry],
    locale: &str,
    stores: &HashMap<&str, Result<EntryCollection<TransEntry>>>,
    base_locale: Option<&str>,
    options: &UpdateOptions<'_>,
    path: &Path,
) -> Result<LocaleUpdate> {
    let previous = store(stores, locale, "target")?;

    let fallback = match options.fallback_locale {
        Some(fallback) if fallback != locale => Some(store(stores, fallback, "fallback")?),
        _ => None,
    };

    let validation = match (&options.validation, base_locale) {
        (ValidationMode::Skip, _) => Validation::Skip,
        (ValidationMode::Key, _) => Validation::AgainstKey,
        (ValidationMode::BaseLocale(_), Some(base)) if base == locale => Validation::Skip,
        (ValidationMode::BaseLocale(_), Some(base)) => {
            Validation::AgainstLocale(store(stores, base, "validation base")?)
        }
        (ValidationMode::BaseLocale(_), None) => Validation::AgainstKey,
    };

    let ctx = LocaleContext {
        locale,
        plurals: options.plurals,
        fallback,
        validation,
    };
    let outcome = reconcile_locale(key_entries, previous, &ctx);
    debug!(
        locale = %locale,
        previous = previous.len(),
        current = outcome.entries.len(),
        "reconciled"
    );

    write_trans_entries(path, &outcome.entries)?;

    Ok(LocaleUpdate {
        locale: locale.to_string(),
        path: path.to_path_buf(),
        total: outcome.entries.len(),
        new: outcome.count_flag(FLAG_NEW),
        obsolete: outcome.count_flag(FLAG_OBSOLETE),
        fallback: outcome.count_flag(FLAG_FALLBACK),
        invalid: outcome.invalid,
    })
}
