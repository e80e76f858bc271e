//! Report formatting and printing utilities.
//!
//! Issues are displayed in cargo-style format; command summaries (counts,
//! catted entries) in the plain formats scripts consume. Separate from core
//! logic so the crate can be used as a library.

use std::io::{self, Write};

use colored::Colorize;

use super::commands::{
    CheckSummary, CommandResult, CommandSummary, DomainCount, InitSummary, UpdateSummary,
    ValidateSummary,
    helper::escape_newlines,
};
use crate::core::TransEntry;
use crate::issues::{Issue, Report, ReportLocation, Severity};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Print issues in cargo-style format, followed by a problem count.
pub fn report_to<W: Write>(issues: &[Issue], writer: &mut W) {
    if issues.is_empty() {
        return;
    }

    let mut sorted = issues.to_vec();
    sorted.sort();

    for issue in &sorted {
        print_issue(issue, writer);
    }

    print_summary(&sorted, writer);
}

fn print_issue<W: Write>(issue: &Issue, writer: &mut W) {
    let loc = issue.location();

    let severity_str = match issue.report_severity() {
        Severity::Error => "error".bold().red(),
        Severity::Warning => "warning".bold().yellow(),
    };

    let _ = writeln!(
        writer,
        "{}: {}  {}",
        severity_str,
        issue.message(),
        issue.report_rule().to_string().dimmed().cyan()
    );

    match loc.locale() {
        Some(locale) => {
            let _ = writeln!(writer, "  {} {} [{}]", "-->".blue(), loc.file_path(), locale);
        }
        None => {
            let _ = writeln!(writer, "  {} {}", "-->".blue(), loc.file_path());
        }
    }

    if let ReportLocation::Entry(entry) = &loc {
        let _ = writeln!(writer, "   {}", "|".blue());
        if let Some(context) = &entry.context {
            let _ = writeln!(
                writer,
                "   {} context \"{}\"",
                "|".blue(),
                escape_newlines(context)
            );
        }
        let _ = writeln!(
            writer,
            "   {} key     \"{}\"",
            "|".blue(),
            escape_newlines(&entry.key)
        );
    }

    if let Some(details) = issue.details() {
        let _ = writeln!(writer, "   {} {} {}", "=".blue(), "note:".bold(), details);
    }

    let _ = writeln!(writer); // Empty line between issues
}

fn print_summary<W: Write>(issues: &[Issue], writer: &mut W) {
    let total_errors = issues
        .iter()
        .filter(|i| i.report_severity() == Severity::Error)
        .count();
    let total_warnings = issues
        .iter()
        .filter(|i| i.report_severity() == Severity::Warning)
        .count();
    let total_problems = total_errors + total_warnings;

    if total_problems > 0 {
        let _ = writeln!(
            writer,
            "{} {} problems ({} {}, {} {})",
            FAILURE_MARK.red(),
            total_problems,
            total_errors,
            if total_errors == 1 { "error" } else { "errors" }.red(),
            total_warnings,
            if total_warnings == 1 {
                "warning"
            } else {
                "warnings"
            }
            .yellow()
        );
    }
}

pub fn print(result: &CommandResult) {
    print_to(result, &mut io::stdout().lock());
}

pub fn print_to<W: Write>(result: &CommandResult, writer: &mut W) {
    match &result.summary {
        CommandSummary::Update(summary) => print_update(summary, &result.issues, writer),
        CommandSummary::Check(summary) => print_check(summary, &result.issues, writer),
        CommandSummary::Count(counts) => print_counts(counts, writer),
        CommandSummary::Cat(entries) => print_entries(entries, writer),
        CommandSummary::Validate(summary) => print_validate(summary, writer),
        CommandSummary::Init(summary) => print_init(summary),
    }
}

fn print_update<W: Write>(summary: &UpdateSummary, issues: &[Issue], writer: &mut W) {
    for (domain, updates) in &summary.domains {
        for update in updates {
            let _ = writeln!(
                writer,
                "{} {} {}: {} entries ({} new, {} obsolete, {} fallback)",
                "Updated".green().bold(),
                domain,
                update.locale,
                update.total,
                update.new,
                update.obsolete,
                update.fallback
            );
        }
    }

    if issues.is_empty() {
        let locales = summary.locale_count();
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!(
                "Updated {} {} - no issues found",
                locales,
                if locales == 1 { "locale" } else { "locales" }
            )
            .green()
        );
    } else {
        let _ = writeln!(writer);
        report_to(issues, writer);
    }
}

fn print_check<W: Write>(summary: &CheckSummary, issues: &[Issue], writer: &mut W) {
    if issues.is_empty() {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!(
                "Checked {} entries in {} {} - no issues found",
                summary.entries_checked,
                summary.locales_checked,
                if summary.locales_checked == 1 {
                    "locale"
                } else {
                    "locales"
                }
            )
            .green()
        );
    } else {
        report_to(issues, writer);
    }
}

/// One line per domain: `<domain>,<locale>:<count>,...`.
fn print_counts<W: Write>(counts: &[DomainCount], writer: &mut W) {
    for count in counts {
        let locales: Vec<String> = count
            .counts
            .iter()
            .map(|(locale, n)| format!("{}:{}", locale, n))
            .collect();
        let _ = writeln!(writer, "{},{}", count.domain, locales.join(","));
    }
}

/// gettext-like text blocks, one per entry, separated by blank lines.
fn print_entries<W: Write>(entries: &[TransEntry], writer: &mut W) {
    for entry in entries {
        if let Some(flag) = &entry.flag {
            let _ = writeln!(writer, "#, {}", flag);
        }
        if let Some(context) = &entry.context {
            let _ = writeln!(writer, "context \"{}\"", escape_newlines(context));
        }
        let _ = writeln!(writer, "key     \"{}\"", escape_newlines(&entry.key));
        let messages = serde_json::to_string(&entry.messages).unwrap_or_default();
        let _ = writeln!(writer, "message \"{}\"", messages);
        let _ = writeln!(writer);
    }
}

fn print_validate<W: Write>(summary: &ValidateSummary, writer: &mut W) {
    match &summary.error {
        None => {
            let _ = writeln!(writer, "{} {}", SUCCESS_MARK.green(), "valid".green());
        }
        Some(error) => {
            let _ = writeln!(
                writer,
                "{} {}  {}",
                FAILURE_MARK.red(),
                error,
                error.flag().dimmed().cyan()
            );
        }
    }
}

fn print_init(summary: &InitSummary) {
    match &summary.error {
        None => println!(
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Created {}", summary.path.display()).green()
        ),
        Some(error) => eprintln!("{} {}", "error:".bold().red(), error),
    }
}

// ============================================================
// Tests
// ============================================================
