use std::fmt;
use std::str::FromStr;

use anyhow::{Context, Result, bail};

/// A translation function recognised by extractors.
///
/// Written in configuration as `name[:keyIndex[:pluralIndex]]`, for example
/// `"$t:0:2"` or `"i18n.t:1"`. A bare name means key at argument 0 and plural
/// count at argument 1; a name with only a key index is not plural.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keyword {
    pub name: String,
    pub key_arg_index: usize,
    pub plural_arg_index: Option<usize>,
}

impl Keyword {
    /// Object part of a `object.property` name.
    pub fn object_name(&self) -> Option<&str> {
        self.name.split_once('.').map(|(object, _)| object)
    }

    /// Function or property name without the object part.
    pub fn prop_name(&self) -> &str {
        self.name
            .split_once('.')
            .map_or(self.name.as_str(), |(_, prop)| prop)
    }

    pub fn is_plural(&self) -> bool {
        self.plural_arg_index.is_some()
    }
}

impl FromStr for Keyword {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut parts = s.split(':');
        let name = parts.next().unwrap_or_default().trim();
        if name.is_empty() {
            bail!("Keyword has no name: \"{}\"", s);
        }

        let parse_index = |part: &str| -> Result<usize> {
            part.trim()
                .parse::<usize>()
                .with_context(|| format!("Invalid argument index \"{}\" in keyword \"{}\"", part, s))
        };

        let keyword = match (parts.next(), parts.next()) {
            (None, _) => Keyword {
                name: name.to_string(),
                key_arg_index: 0,
                plural_arg_index: Some(1),
            },
            (Some(key), None) => Keyword {
                name: name.to_string(),
                key_arg_index: parse_index(key)?,
                plural_arg_index: None,
            },
            (Some(key), Some(plural)) => Keyword {
                name: name.to_string(),
                key_arg_index: parse_index(key)?,
                plural_arg_index: Some(parse_index(plural)?),
            },
        };

        if parts.next().is_some() {
            bail!("Too many parts in keyword \"{}\"", s);
        }
        if keyword.object_name() == Some("") || keyword.prop_name().is_empty() {
            bail!("Keyword name must be \"name\" or \"object.name\": \"{}\"", s);
        }
        if keyword.plural_arg_index == Some(keyword.key_arg_index) {
            bail!("Key and plural count share argument index in keyword \"{}\"", s);
        }
        Ok(keyword)
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.plural_arg_index {
            Some(plural) => write!(f, "{}:{}:{}", self.name, self.key_arg_index, plural),
            None => write!(f, "{}:{}", self.name, self.key_arg_index),
        }
    }
}
