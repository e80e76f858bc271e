use std::collections::HashMap;

use super::entry::Entry;

/// Ordered, uniquely keyed collection of entries.
///
/// Entries are identified by `(context, key)`. Iteration always follows
/// first-insertion order; replacing an entry keeps its position. This order is
/// what gets persisted, so it must never depend on entry content.
#[derive(Debug, Clone)]
pub struct EntryCollection<E> {
    entries: Vec<E>,
    /// Positions of entries without context, by key.
    plain: HashMap<String, usize>,
    /// Positions of entries with context, by context then key.
    contextual: HashMap<String, HashMap<String, usize>>,
}

impl<E> Default for EntryCollection<E> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            plain: HashMap::new(),
            contextual: HashMap::new(),
        }
    }
}

impl<E: Entry> EntryCollection<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a collection from entries; later duplicates replace earlier ones.
    pub fn from_entries(entries: impl IntoIterator<Item = E>) -> Self {
        let mut collection = Self::new();
        for entry in entries {
            collection.set(entry);
        }
        collection
    }

    fn position(&self, context: Option<&str>, key: &str) -> Option<usize> {
        match context {
            None => self.plain.get(key).copied(),
            Some(context) => self
                .contextual
                .get(context)
                .and_then(|keys| keys.get(key))
                .copied(),
        }
    }

    pub fn find(&self, context: Option<&str>, key: &str) -> Option<&E> {
        self.position(context, key).map(|pos| &self.entries[pos])
    }

    /// Look up the entry with the same identity as `other`.
    pub fn find_like<O: Entry + ?Sized>(&self, other: &O) -> Option<&E> {
        self.find(other.context(), other.key())
    }

    pub fn contains(&self, context: Option<&str>, key: &str) -> bool {
        self.position(context, key).is_some()
    }

    /// Insert or replace by identity.
    pub fn set(&mut self, entry: E) {
        if let Some(pos) = self.position(entry.context(), entry.key()) {
            self.entries[pos] = entry;
            return;
        }

        let pos = self.entries.len();
        match entry.context() {
            None => {
                self.plain.insert(entry.key().to_string(), pos);
            }
            Some(context) => {
                self.contextual
                    .entry(context.to_string())
                    .or_default()
                    .insert(entry.key().to_string(), pos);
            }
        }
        self.entries.push(entry);
    }

    pub fn iter(&self) -> impl Iterator<Item = &E> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_entries(self) -> Vec<E> {
        self.entries
    }
}

impl<E: Entry + Clone> EntryCollection<E> {
    pub fn to_entries(&self) -> Vec<E> {
        self.entries.clone()
    }
}

impl<E: Entry> FromIterator<E> for EntryCollection<E> {
    fn from_iter<T: IntoIterator<Item = E>>(iter: T) -> Self {
        Self::from_entries(iter)
    }
}

impl<E: Entry> Extend<E> for EntryCollection<E> {
    fn extend<T: IntoIterator<Item = E>>(&mut self, iter: T) {
        for entry in iter {
            self.set(entry);
        }
    }
}
