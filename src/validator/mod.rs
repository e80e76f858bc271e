//! Message format validation.
//!
//! A translation must keep every structural token of its source message:
//! printf-style specifiers, brace placeholders and markup tags. Missing a
//! token breaks argument substitution at runtime; adding one the source does
//! not have reads garbage or breaks markup nesting.
//!
//! ## Module Structure
//!
//! - `c_format`: `%s`, `%.2f`, `%1$s`
//! - `brace`: `{}`, `{0}`, `{name}`
//! - `markup`: `<b>…</b>`, `<heart/>`, `<br>`

pub mod brace;
pub mod c_format;
pub mod markup;

use thiserror::Error;

/// Why a translation is incompatible with its source message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("format {format} not found")]
    FormatNotFound { format: String },
    #[error("multiple formats without ordinal ({formats}), use ordinal formats like %1$s")]
    NoOrdinalFormat { formats: String },
    #[error("unexpected format {format}")]
    UnexpectedFormat { format: String },
    #[error("tag <{tag}> not found")]
    TagNotFound { tag: String },
    #[error("unexpected tag <{tag}>")]
    UnexpectedTag { tag: String },
}

impl ValidationError {
    /// Flags recorded on translation entries, one per error kind.
    pub const FLAGS: [&'static str; 5] = [
        "format-not-found",
        "no-ordinal-format",
        "unexpected-format",
        "tag-not-found",
        "unexpected-tag",
    ];

    pub fn flag(&self) -> &'static str {
        match self {
            ValidationError::FormatNotFound { .. } => Self::FLAGS[0],
            ValidationError::NoOrdinalFormat { .. } => Self::FLAGS[1],
            ValidationError::UnexpectedFormat { .. } => Self::FLAGS[2],
            ValidationError::TagNotFound { .. } => Self::FLAGS[3],
            ValidationError::UnexpectedTag { .. } => Self::FLAGS[4],
        }
    }

    pub fn is_validation_flag(flag: &str) -> bool {
        Self::FLAGS.contains(&flag)
    }
}

/// Structural tokens of one message.
#[derive(Debug, Clone, Default)]
struct MessageTokens {
    formats: Vec<c_format::CFormat>,
    placeholders: Vec<String>,
    tags: Vec<markup::Tag>,
}

impl MessageTokens {
    fn parse(msg: &str) -> Self {
        Self {
            formats: c_format::extract(msg),
            placeholders: brace::extract(msg),
            tags: markup::extract(msg),
        }
    }
}

/// Check that `target` is a valid translation of `source`.
///
/// Reports the first violation. A source that needs ordinal specifiers fails
/// regardless of the target; otherwise tokens missing from the target are
/// reported before surplus tokens.
pub fn validate_msg(source: &str, target: &str) -> Result<(), ValidationError> {
    let source = MessageTokens::parse(source);
    let target = MessageTokens::parse(target);

    c_format::check_ordinal_required(&source.formats)?;

    c_format::check_missing(&source.formats, &target.formats)?;
    brace::check_missing(&source.placeholders, &target.placeholders)?;
    markup::check_missing(&source.tags, &target.tags)?;

    c_format::check_unexpected(&source.formats, &target.formats)?;
    brace::check_unexpected(&source.placeholders, &target.placeholders)?;
    markup::check_unexpected(&source.tags, &target.tags)?;

    Ok(())
}
