use anyhow::Result;

use super::super::args::{CheckCommand, GlobalArgs};
use super::{
    CheckSummary, CommandResult, CommandSummary,
    helper::{CommandContext, finish, select_locales},
    update::{DomainDirs, domain_error, report_issues, update_domain},
};
use crate::{
    core::{
        TransEntrySpec,
        spec::matches_all,
        store::{read_trans_entries, trans_path},
    },
    issues::{EntryLocation, Issue, StoreErrorIssue, UntranslatedIssue},
};

/// Update translations in place, then report every untranslated entry
/// together with validation diagnostics.
pub fn check(global: &GlobalArgs, cmd: CheckCommand) -> Result<CommandResult> {
    let ctx = CommandContext::new(global)?;
    let specs = [TransEntrySpec::untranslated()];
    let mut summary = CheckSummary::default();
    let mut issues = Vec::new();

    for (name, domain) in ctx.domains()? {
        let dir = ctx.domain_dir(name, domain, None);
        let dirs = DomainDirs {
            keys: dir.clone(),
            from: dir.clone(),
            to: dir.clone(),
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

        for update in &report.updated {
            let path = trans_path(&dir, &update.locale);
            let entries = match read_trans_entries(&path) {
                Ok(entries) => entries,
                Err(err) => {
                    issues.push(Issue::StoreError(StoreErrorIssue {
                        file_path: path.display().to_string(),
                        domain: name.to_string(),
                        locale: update.locale.clone(),
                        error: format!("{:#}", err),
                    }));
                    continue;
                }
            };

            summary.locales_checked += 1;
            summary.entries_checked += entries.len();
            let file_path = path.display().to_string();
            issues.extend(
                entries
                    .iter()
                    .filter(|entry| matches_all(&specs, entry))
                    .map(|entry| {
                        Issue::Untranslated(UntranslatedIssue {
                            location: EntryLocation::new(
                                file_path.as_str(),
                                name,
                                &update.locale,
                                entry.context.as_deref(),
                                &entry.key,
                            ),
                            flag: entry.flag.clone(),
                        })
                    }),
            );
        }
    }

    Ok(finish(CommandSummary::Check(summary), issues))
}
