use std::path::PathBuf;

use anyhow::{Context, Result};

use super::super::args::{GlobalArgs, UpdateCommand};
use super::{
    CommandResult, CommandSummary, UpdateSummary,
    helper::{CommandContext, finish, select_locales},
};
use crate::{
    config::DomainConfig,
    core::{UpdateOptions, UpdateReport, store::keys_path, update_trans},
    issues::{DomainErrorIssue, InvalidMessageIssue, Issue, StoreErrorIssue},
};

/// Where a domain's keys are read and its translations read and written.
pub(super) struct DomainDirs {
    pub keys: PathBuf,
    pub from: PathBuf,
    pub to: PathBuf,
}

pub fn update(global: &GlobalArgs, cmd: UpdateCommand) -> Result<CommandResult> {
    let ctx = CommandContext::new(global)?;
    let mut summary = UpdateSummary::default();
    let mut issues = Vec::new();

    for (name, domain) in ctx.domains()? {
        let dirs = DomainDirs {
            keys: ctx.domain_dir(name, domain, cmd.keys_dir.as_deref()),
            from: ctx.domain_dir(name, domain, None),
            to: ctx.domain_dir(name, domain, cmd.trans_dir.as_deref()),
        };
        let locales = select_locales(&cmd.locales, domain);

        let report = match update_domain(&ctx, name, domain, &locales, &dirs) {
            Ok(report) => report,
            Err(err) => {
                issues.push(domain_error(name, &dirs, &err));
                continue;
            }
        };
        issues.extend(report_issues(name, &report));
        summary.domains.push((name.to_string(), report.updated));
    }

    Ok(finish(CommandSummary::Update(summary), issues))
}

pub(super) fn update_domain(
    ctx: &CommandContext,
    name: &str,
    domain: &DomainConfig,
    locales: &[String],
    dirs: &DomainDirs,
) -> Result<UpdateReport> {
    let _span = tracing::info_span!("update", domain = name).entered();

    let options = UpdateOptions {
        locales,
        fallback_locale: domain.fallback_locale.as_deref(),
        validation: ctx.validation.clone(),
        plurals: &ctx.plurals,
    };
    update_trans(&keys_path(&dirs.keys), &dirs.from, &dirs.to, &options)
        .with_context(|| format!("Failed to update domain '{}'", name))
}

/// A domain whose keys could not be loaded. The remaining domains are still
/// reconciled and reported.
pub(super) fn domain_error(name: &str, dirs: &DomainDirs, err: &anyhow::Error) -> Issue {
    let error = format!("{:#}", err);
    tracing::warn!(domain = name, "{}", error);
    Issue::DomainError(DomainErrorIssue {
        file_path: keys_path(&dirs.keys).display().to_string(),
        domain: name.to_string(),
        error,
    })
}

/// Validation diagnostics and store failures as issues.
pub(super) fn report_issues(domain: &str, report: &UpdateReport) -> Vec<Issue> {
    let mut issues = Vec::new();
    for update in &report.updated {
        let path = update.path.display().to_string();
        issues.extend(update.invalid.iter().map(|invalid| {
            Issue::InvalidMessage(InvalidMessageIssue::from_invalid(
                &path,
                domain,
                &update.locale,
                invalid,
            ))
        }));
    }
    issues.extend(
        report
            .failed
            .iter()
            .map(|failure| Issue::StoreError(StoreErrorIssue::from_failure(domain, failure))),
    );
    issues
}
