//! Issue types reported by the translation commands.
//!
//! Each issue is self-contained with everything the reporter needs to
//! display it: where it is (translation file and entry), what is wrong, and
//! how severe it is.

use enum_dispatch::enum_dispatch;

use crate::core::reconcile::{InvalidMessage, LocaleFailure};
use crate::validator::ValidationError;

// ============================================================
// Severity and Rule
// ============================================================

/// Severity level of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// Rule identifier for each issue type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Rule {
    DomainError,
    StoreError,
    InvalidMessage,
    Untranslated,
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rule::DomainError => write!(f, "domain-error"),
            Rule::StoreError => write!(f, "store-error"),
            Rule::InvalidMessage => write!(f, "invalid-message"),
            Rule::Untranslated => write!(f, "untranslated"),
        }
    }
}

// ============================================================
// Locations
// ============================================================

/// A translation entry inside one locale's translation file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryLocation {
    pub file_path: String,
    pub domain: String,
    pub locale: String,
    pub context: Option<String>,
    pub key: String,
}

impl EntryLocation {
    pub fn new(
        file_path: impl Into<String>,
        domain: &str,
        locale: &str,
        context: Option<&str>,
        key: &str,
    ) -> Self {
        Self {
            file_path: file_path.into(),
            domain: domain.to_string(),
            locale: locale.to_string(),
            context: context.map(String::from),
            key: key.to_string(),
        }
    }
}

// ============================================================
// Issue Types
// ============================================================

/// Translated message that breaks the format of its source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidMessageIssue {
    pub location: EntryLocation,
    pub quantity: String,
    pub source: String,
    pub message: String,
    pub error: ValidationError,
}

impl InvalidMessageIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::InvalidMessage
    }

    pub fn from_invalid(file_path: &str, domain: &str, locale: &str, invalid: &InvalidMessage) -> Self {
        Self {
            location: EntryLocation::new(
                file_path,
                domain,
                locale,
                invalid.context.as_deref(),
                &invalid.key,
            ),
            quantity: invalid.quantity.clone(),
            source: invalid.source.clone(),
            message: invalid.message.clone(),
            error: invalid.error.clone(),
        }
    }
}

/// Entry with at least one empty message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UntranslatedIssue {
    pub location: EntryLocation,
    pub flag: Option<String>,
}

impl UntranslatedIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::Untranslated
    }
}

/// Translation file that could not be read or written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreErrorIssue {
    pub file_path: String,
    pub domain: String,
    pub locale: String,
    pub error: String,
}

impl StoreErrorIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::StoreError
    }

    pub fn from_failure(domain: &str, failure: &LocaleFailure) -> Self {
        Self {
            file_path: failure.path.display().to_string(),
            domain: domain.to_string(),
            locale: failure.locale.clone(),
            error: failure.error.clone(),
        }
    }
}

/// Domain that could not be reconciled at all, e.g. because its keys file
/// is missing. Other domains are still processed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainErrorIssue {
    pub file_path: String,
    pub domain: String,
    pub error: String,
}

impl DomainErrorIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::DomainError
    }
}

// ============================================================
// Issue Enum
// ============================================================

#[enum_dispatch(Report)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    InvalidMessage(InvalidMessageIssue),
    Untranslated(UntranslatedIssue),
    StoreError(StoreErrorIssue),
    DomainError(DomainErrorIssue),
}

impl Issue {
    pub fn severity(&self) -> Severity {
        match self {
            Issue::InvalidMessage(_) => InvalidMessageIssue::severity(),
            Issue::Untranslated(_) => UntranslatedIssue::severity(),
            Issue::StoreError(_) => StoreErrorIssue::severity(),
            Issue::DomainError(_) => DomainErrorIssue::severity(),
        }
    }

    pub fn rule(&self) -> Rule {
        match self {
            Issue::InvalidMessage(_) => InvalidMessageIssue::rule(),
            Issue::Untranslated(_) => UntranslatedIssue::rule(),
            Issue::StoreError(_) => StoreErrorIssue::rule(),
            Issue::DomainError(_) => DomainErrorIssue::rule(),
        }
    }
}

// ============================================================
// Report Trait (for CLI output)
// ============================================================

/// Location information for report output.
pub enum ReportLocation<'a> {
    /// An entry of a translation file.
    Entry(&'a EntryLocation),
    /// Whole file; translation files name their locale.
    File {
        path: &'a str,
        locale: Option<&'a str>,
    },
}

impl ReportLocation<'_> {
    pub fn file_path(&self) -> &str {
        match self {
            ReportLocation::Entry(loc) => &loc.file_path,
            ReportLocation::File { path, .. } => path,
        }
    }

    pub fn locale(&self) -> Option<&str> {
        match self {
            ReportLocation::Entry(loc) => Some(loc.locale.as_str()),
            ReportLocation::File { locale, .. } => *locale,
        }
    }
}

/// Trait for types that can be reported to CLI.
#[enum_dispatch]
pub trait Report {
    fn location(&self) -> ReportLocation<'_>;

    /// Primary message to display (key, error, etc.).
    fn message(&self) -> String;

    fn report_severity(&self) -> Severity;

    fn report_rule(&self) -> Rule;

    /// Optional details for the "= note:" line.
    fn details(&self) -> Option<String> {
        None
    }
}

impl Report for InvalidMessageIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Entry(&self.location)
    }

    fn message(&self) -> String {
        self.error.to_string()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(format!(
            "{} {:?} translated from {:?}",
            self.quantity, self.message, self.source
        ))
    }
}

impl Report for UntranslatedIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Entry(&self.location)
    }

    fn message(&self) -> String {
        "not translated".to_string()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        self.flag.as_ref().map(|flag| format!("flagged {}", flag))
    }
}

impl Report for StoreErrorIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::File {
            path: &self.file_path,
            locale: Some(self.locale.as_str()),
        }
    }

    fn message(&self) -> String {
        self.error.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }
}

impl Report for DomainErrorIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::File {
            path: &self.file_path,
            locale: None,
        }
    }

    fn message(&self) -> String {
        self.error.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(format!("domain {} was skipped", self.domain))
    }
}

// ============================================================
// Ordering for Issue (for sorting in reports)
// ============================================================

impl Issue {
    fn sort_key(&self) -> Option<&str> {
        match self.location() {
            ReportLocation::Entry(loc) => Some(&loc.key),
            ReportLocation::File { .. } => None,
        }
    }
}

impl Ord for Issue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // File-level problems first within a file, then entries by key.
        self.location()
            .file_path()
            .cmp(other.location().file_path())
            .then_with(|| self.sort_key().cmp(&other.sort_key()))
            .then_with(|| self.rule().cmp(&other.rule()))
            .then_with(|| self.message().cmp(&other.message()))
    }
}

impl PartialOrd for Issue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

// ============================================================
// Tests
// ============================================================
