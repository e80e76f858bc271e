//! Building key entries from individual source observations.

use thiserror::Error;

use super::collection::EntryCollection;
use super::entry::{KeyEntry, Reference};

/// A key or context that is not already whitespace-trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidIdentifier {
    #[error("key has leading or trailing whitespace: \"{0}\"")]
    Key(String),
    #[error("context has leading or trailing whitespace: \"{0}\"")]
    Context(String),
}

/// Rejects identifiers with surrounding whitespace instead of trimming them,
/// since a silently trimmed key would no longer match the call site.
pub fn check_identifier(context: Option<&str>, key: &str) -> Result<(), InvalidIdentifier> {
    if let Some(context) = context
        && context != context.trim()
    {
        return Err(InvalidIdentifier::Context(context.to_string()));
    }
    if key != key.trim() {
        return Err(InvalidIdentifier::Key(key.to_string()));
    }
    Ok(())
}

/// Folds observations of one `(context, key)` into a [`KeyEntry`].
///
/// Adding the same reference or comment twice is a no-op, so re-running
/// extraction over unchanged sources produces the same entry.
#[derive(Debug, Clone)]
pub struct KeyEntryBuilder {
    context: Option<String>,
    key: String,
    is_plural: bool,
    references: Vec<Reference>,
    comments: Vec<String>,
}

impl KeyEntryBuilder {
    pub fn new(
        context: Option<&str>,
        key: &str,
        is_plural: bool,
    ) -> Result<Self, InvalidIdentifier> {
        check_identifier(context, key)?;
        Ok(Self {
            context: context.map(String::from),
            key: key.to_string(),
            is_plural,
            references: Vec::new(),
            comments: Vec::new(),
        })
    }

    /// Start from an existing entry; its plural flag is kept as is.
    pub fn from_key_entry(entry: &KeyEntry) -> Self {
        Self {
            context: entry.context.clone(),
            key: entry.key.clone(),
            is_plural: entry.is_plural,
            references: entry.references.clone(),
            comments: entry.comments.clone(),
        }
    }

    pub fn add_reference(&mut self, file: &str, loc: Option<&str>) -> &mut Self {
        let exists = self
            .references
            .iter()
            .any(|r| r.file == file && r.loc.as_deref() == loc);
        if !exists {
            self.references.push(Reference::new(file, loc));
        }
        self
    }

    pub fn add_comment(&mut self, comment: &str) -> &mut Self {
        if !self.comments.iter().any(|c| c == comment) {
            self.comments.push(comment.to_string());
        }
        self
    }

    pub fn to_key_entry(&self) -> KeyEntry {
        KeyEntry {
            context: self.context.clone(),
            key: self.key.clone(),
            is_plural: self.is_plural,
            references: self.references.clone(),
            comments: self.comments.clone(),
        }
    }
}

/// Options for a single observed message.
#[derive(Debug, Clone, Default)]
pub struct MessageOptions<'a> {
    pub is_plural: bool,
    pub comment: Option<&'a str>,
    pub context: Option<&'a str>,
}

/// Identifier error annotated with where the message was observed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}: {source}", observed_at(.file, .line))]
pub struct ObservationError {
    pub file: String,
    pub line: Option<String>,
    #[source]
    pub source: InvalidIdentifier,
}

fn observed_at(file: &str, line: &Option<String>) -> String {
    match line {
        Some(line) => format!("{}:{}", file, line),
        None => file.to_string(),
    }
}

/// Collects key entries observed by an extractor, merging repeated keys.
#[derive(Debug, Clone, Default)]
pub struct KeyCollector {
    keys: EntryCollection<KeyEntry>,
}

impl KeyCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one occurrence of `key` at `file`/`line`.
    pub fn add_message(
        &mut self,
        file: &str,
        line: Option<&str>,
        key: &str,
        options: MessageOptions<'_>,
    ) -> Result<(), ObservationError> {
        let mut builder = match self.keys.find(options.context, key) {
            Some(existing) => KeyEntryBuilder::from_key_entry(existing),
            None => KeyEntryBuilder::new(options.context, key, options.is_plural).map_err(
                |source| ObservationError {
                    file: file.to_string(),
                    line: line.map(String::from),
                    source,
                },
            )?,
        };

        builder.add_reference(file, line);
        if let Some(comment) = options.comment.filter(|c| !c.is_empty()) {
            builder.add_comment(comment);
        }
        self.keys.set(builder.to_key_entry());
        Ok(())
    }

    /// Merge already built entries, combining references and comments of
    /// entries that share an identity.
    ///
    /// Entries are checked like fresh observations; an untrimmed identifier
    /// is reported at the entry's first reference.
    pub fn extend(
        &mut self,
        entries: impl IntoIterator<Item = KeyEntry>,
    ) -> Result<(), ObservationError> {
        for entry in entries {
            check_identifier(entry.context.as_deref(), &entry.key).map_err(|source| {
                let reference = entry.references.first();
                ObservationError {
                    file: reference.map_or_else(String::new, |r| r.file.clone()),
                    line: reference.and_then(|r| r.loc.clone()),
                    source,
                }
            })?;

            let merged = match self.keys.find_like(&entry) {
                Some(existing) => {
                    let mut builder = KeyEntryBuilder::from_key_entry(existing);
                    for reference in &entry.references {
                        builder.add_reference(&reference.file, reference.loc.as_deref());
                    }
                    for comment in &entry.comments {
                        builder.add_comment(comment);
                    }
                    builder.to_key_entry()
                }
                None => entry,
            };
            self.keys.set(merged);
        }
        Ok(())
    }

    pub fn find(&self, context: Option<&str>, key: &str) -> Option<&KeyEntry> {
        self.keys.find(context, key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn entries(&self) -> Vec<KeyEntry> {
        self.keys.to_entries()
    }

    pub fn into_entries(self) -> Vec<KeyEntry> {
        self.keys.into_entries()
    }
}
