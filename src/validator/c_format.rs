//! printf-style conversion specifiers (`%s`, `%.2f`, `%1$s`).

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use super::ValidationError;

/// `%%` is matched first so an escaped percent sign never starts a specifier.
static C_FORMAT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"%%|%(?:([1-9][0-9]*)\$)?([-+0#]*(?:[0-9]+|\*)?(?:\.(?:[0-9]+|\*))?(?:hh|h|ll|l|L|q|j|z|t)?[diouxXeEfFgGaAcspn@])",
    )
    .unwrap()
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CFormat {
    /// Argument index of `%N$` specifiers, as written. Kept as text so an
    /// index of any length stays distinct from an anonymous specifier.
    pub ordinal: Option<String>,
    /// Specifier text after `%` and the ordinal prefix, e.g. `.2f`.
    pub spec: String,
}

impl fmt::Display for CFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.ordinal {
            Some(n) => write!(f, "%{}${}", n, self.spec),
            None => write!(f, "%{}", self.spec),
        }
    }
}

pub fn extract(msg: &str) -> Vec<CFormat> {
    C_FORMAT_REGEX
        .captures_iter(msg)
        .filter_map(|caps| {
            let spec = caps.get(2)?;
            Some(CFormat {
                ordinal: caps.get(1).map(|n| n.as_str().to_string()),
                spec: spec.as_str().to_string(),
            })
        })
        .collect()
}

fn non_ordinal(formats: &[CFormat]) -> impl Iterator<Item = &CFormat> {
    formats.iter().filter(|f| f.ordinal.is_none())
}

/// Two or more anonymous specifiers can be reordered by a translation without
/// any way to tell, so such a source must use `%N$` specifiers.
pub fn check_ordinal_required(source: &[CFormat]) -> Result<(), ValidationError> {
    let anonymous: Vec<String> = non_ordinal(source).map(ToString::to_string).collect();
    if anonymous.len() >= 2 {
        return Err(ValidationError::NoOrdinalFormat {
            formats: anonymous.join(", "),
        });
    }
    Ok(())
}

pub fn check_missing(source: &[CFormat], target: &[CFormat]) -> Result<(), ValidationError> {
    for expected in source.iter().filter(|f| f.ordinal.is_some()) {
        if !target.contains(expected) {
            return Err(ValidationError::FormatNotFound {
                format: expected.to_string(),
            });
        }
    }

    if let Some(expected) = non_ordinal(source).next()
        && !non_ordinal(target).any(|t| t.spec == expected.spec)
    {
        return Err(ValidationError::FormatNotFound {
            format: expected.to_string(),
        });
    }
    Ok(())
}

pub fn check_unexpected(source: &[CFormat], target: &[CFormat]) -> Result<(), ValidationError> {
    let anonymous = non_ordinal(source).next();
    let mut anonymous_seen = 0;

    for format in target {
        let licensed = match format.ordinal {
            Some(_) => source.contains(format),
            None => {
                anonymous_seen += 1;
                anonymous_seen == 1 && anonymous.is_some_and(|s| s.spec == format.spec)
            }
        };
        if !licensed {
            return Err(ValidationError::UnexpectedFormat {
                format: format.to_string(),
            });
        }
    }
    Ok(())
}
