//! Translation entry filters used by `count`, `cat` and `check`.
//!
//! A filter list is written as comma separated specs, e.g.
//! `untranslated,!obsolete`.

use std::fmt;
use std::str::FromStr;

use anyhow::{Result, bail};

use super::entry::TransEntry;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecKind {
    Total,
    Translated,
    Untranslated,
    Flag(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransEntrySpec {
    pub kind: SpecKind,
    pub negated: bool,
}

impl TransEntrySpec {
    /// Whether the entry satisfies the spec, ignoring negation.
    fn holds(&self, entry: &TransEntry) -> bool {
        match &self.kind {
            SpecKind::Total => true,
            SpecKind::Translated => entry.is_translated(),
            SpecKind::Untranslated => !entry.is_translated(),
            SpecKind::Flag(flag) => entry.has_flag(flag),
        }
    }

    pub fn matches(&self, entry: &TransEntry) -> bool {
        self.holds(entry) != self.negated
    }

    /// Parse a comma separated list. An empty list means `total`.
    pub fn parse_list(s: &str) -> Result<Vec<Self>> {
        let specs = s
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(str::parse::<Self>)
            .collect::<Result<Vec<Self>>>()?;
        if specs.is_empty() {
            return Ok(vec![Self::total()]);
        }
        Ok(specs)
    }

    pub fn total() -> Self {
        Self {
            kind: SpecKind::Total,
            negated: false,
        }
    }

    pub fn untranslated() -> Self {
        Self {
            kind: SpecKind::Untranslated,
            negated: false,
        }
    }
}

/// True when the entry matches every spec in the list.
pub fn matches_all(specs: &[TransEntrySpec], entry: &TransEntry) -> bool {
    specs.iter().all(|spec| spec.matches(entry))
}

impl FromStr for TransEntrySpec {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let (negated, name) = match s.strip_prefix('!') {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        let kind = match name {
            "" => bail!("Empty spec '{}'", s),
            "total" => SpecKind::Total,
            "translated" => SpecKind::Translated,
            "untranslated" => SpecKind::Untranslated,
            flag => SpecKind::Flag(flag.to_string()),
        };
        Ok(Self { kind, negated })
    }
}

impl fmt::Display for TransEntrySpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negated {
            f.write_str("!")?;
        }
        match &self.kind {
            SpecKind::Total => f.write_str("total"),
            SpecKind::Translated => f.write_str("translated"),
            SpecKind::Untranslated => f.write_str("untranslated"),
            SpecKind::Flag(flag) => f.write_str(flag),
        }
    }
}
