//! Key and translation entry types.
//!
//! A [`KeyEntry`] is the source of truth for one `(context, key)` pair found in
//! source code. A [`TransEntry`] is one locale's translation state for the same
//! identity. Both are persisted as JSON arrays (see `core::store`).

use std::collections::HashMap;
use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Quantity used for the single message of a non-plural entry.
pub const OTHER_QUANTITY: &str = "other";

/// Flag of an entry created for a key that had no prior translation.
pub const FLAG_NEW: &str = "new";
/// Flag of an entry whose key no longer appears in extraction output.
pub const FLAG_OBSOLETE: &str = "obsolete";
/// Flag of an entry whose messages were copied from the fallback locale.
pub const FLAG_FALLBACK: &str = "fallback";

/// Identity shared by key and translation entries.
pub trait Entry {
    fn context(&self) -> Option<&str>;
    fn key(&self) -> &str;

    fn same_identity<E: Entry + ?Sized>(&self, other: &E) -> bool {
        self.context() == other.context() && self.key() == other.key()
    }
}

/// Where a key was found.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Reference {
    pub file: String,
    pub loc: Option<String>,
}

impl Reference {
    pub fn new(file: impl Into<String>, loc: Option<impl Into<String>>) -> Self {
        Self {
            file: file.into(),
            loc: loc.map(Into::into),
        }
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.loc {
            Some(loc) => write!(f, "{}:{}", self.file, loc),
            None => write!(f, "{}", self.file),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyEntry {
    pub context: Option<String>,
    pub key: String,
    #[serde(default)]
    pub is_plural: bool,
    #[serde(default)]
    pub references: Vec<Reference>,
    #[serde(default)]
    pub comments: Vec<String>,
}

impl Entry for KeyEntry {
    fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }

    fn key(&self) -> &str {
        &self.key
    }
}

/// Translated messages of one entry, keyed by plural quantity.
///
/// Keeps insertion order so that files are written back in the order the
/// quantities were configured.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransMessages {
    items: Vec<(String, String)>,
}

impl TransMessages {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages with an empty string for each quantity.
    pub fn empty_for<S: AsRef<str>>(quantities: &[S]) -> Self {
        let mut messages = Self::new();
        for quantity in quantities {
            messages.set(quantity.as_ref(), "");
        }
        messages
    }

    pub fn get(&self, quantity: &str) -> Option<&str> {
        self.items
            .iter()
            .find(|(q, _)| q == quantity)
            .map(|(_, message)| message.as_str())
    }

    /// Insert or replace the message for a quantity. Replacement keeps position.
    pub fn set(&mut self, quantity: impl Into<String>, message: impl Into<String>) {
        let quantity = quantity.into();
        let message = message.into();
        match self.items.iter_mut().find(|(q, _)| *q == quantity) {
            Some((_, existing)) => *existing = message,
            None => self.items.push((quantity, message)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.items.iter().map(|(q, m)| (q.as_str(), m.as_str()))
    }

    pub fn quantities(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|(q, _)| q.as_str())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Rebuild the map with exactly the given quantities, keeping existing
    /// messages for quantities that are still present.
    pub fn normalized<S: AsRef<str>>(&self, quantities: &[S]) -> Self {
        let mut messages = Self::new();
        for quantity in quantities {
            let quantity = quantity.as_ref();
            messages.set(quantity, self.get(quantity).unwrap_or_default());
        }
        messages
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for TransMessages {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut messages = Self::new();
        for (quantity, message) in iter {
            messages.set(quantity, message);
        }
        messages
    }
}

impl Serialize for TransMessages {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.items.len()))?;
        for (quantity, message) in &self.items {
            map.serialize_entry(quantity, message)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for TransMessages {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct MessagesVisitor;

        impl<'de> Visitor<'de> for MessagesVisitor {
            type Value = TransMessages;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an object mapping plural quantities to messages")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut messages = TransMessages::new();
                while let Some((quantity, message)) = access.next_entry::<String, String>()? {
                    messages.set(quantity, message);
                }
                Ok(messages)
            }
        }

        deserializer.deserialize_map(MessagesVisitor)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransEntry {
    pub context: Option<String>,
    pub key: String,
    #[serde(default)]
    pub messages: TransMessages,
    #[serde(default)]
    pub flag: Option<String>,
}

impl TransEntry {
    /// A blank entry for a key that has never been translated.
    pub fn new_for(key_entry: &KeyEntry, quantities: &[String]) -> Self {
        Self {
            context: key_entry.context.clone(),
            key: key_entry.key.clone(),
            messages: TransMessages::empty_for(quantities),
            flag: Some(FLAG_NEW.to_string()),
        }
    }

    /// True when there is at least one quantity and none of them is empty.
    pub fn is_translated(&self) -> bool {
        !self.messages.is_empty() && self.messages.iter().all(|(_, m)| !m.is_empty())
    }

    pub fn has_flag(&self, flag: &str) -> bool {
        self.flag.as_deref() == Some(flag)
    }
}

impl Entry for TransEntry {
    fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }

    fn key(&self) -> &str {
        &self.key
    }
}

/// Plural quantity names per locale, supplied by configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluralQuantities {
    by_locale: HashMap<String, Vec<String>>,
    default: Vec<String>,
}

impl Default for PluralQuantities {
    fn default() -> Self {
        Self::new(HashMap::new())
    }
}

impl PluralQuantities {
    pub fn new(by_locale: HashMap<String, Vec<String>>) -> Self {
        Self {
            by_locale,
            default: vec!["one".to_string(), OTHER_QUANTITY.to_string()],
        }
    }

    /// Quantities used by a plural entry in this locale.
    pub fn for_locale(&self, locale: &str) -> &[String] {
        self.by_locale
            .get(locale)
            .filter(|quantities| !quantities.is_empty())
            .unwrap_or(&self.default)
    }

    /// Quantities used by an entry in this locale, depending on plurality.
    pub fn for_entry(&self, locale: &str, is_plural: bool) -> Vec<String> {
        if is_plural {
            self.for_locale(locale).to_vec()
        } else {
            vec![OTHER_QUANTITY.to_string()]
        }
    }
}
