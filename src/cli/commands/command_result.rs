use std::path::PathBuf;

use crate::core::TransEntry;
use crate::core::reconcile::LocaleUpdate;
use crate::issues::Issue;
use crate::validator::ValidationError;

#[derive(Debug)]
pub enum CommandSummary {
    Update(UpdateSummary),
    Check(CheckSummary),
    Count(Vec<DomainCount>),
    Cat(Vec<TransEntry>),
    Validate(ValidateSummary),
    Init(InitSummary),
}

#[derive(Debug, Default)]
pub struct UpdateSummary {
    /// Successfully updated locales, per domain.
    pub domains: Vec<(String, Vec<LocaleUpdate>)>,
}

impl UpdateSummary {
    pub fn locale_count(&self) -> usize {
        self.domains.iter().map(|(_, updates)| updates.len()).sum()
    }
}

#[derive(Debug, Default)]
pub struct CheckSummary {
    pub locales_checked: usize,
    pub entries_checked: usize,
}

/// Matching entry count per locale of one domain.
#[derive(Debug)]
pub struct DomainCount {
    pub domain: String,
    pub counts: Vec<(String, usize)>,
}

#[derive(Debug)]
pub struct ValidateSummary {
    pub error: Option<ValidationError>,
}

#[derive(Debug)]
pub struct InitSummary {
    pub path: PathBuf,
    /// Set when the file already existed.
    pub error: Option<String>,
}

/// Result of running an l10n command.
#[derive(Debug)]
pub struct CommandResult {
    pub summary: CommandSummary,
    pub error_count: usize,
    /// All issues found by the command, sorted.
    pub issues: Vec<Issue>,
}
