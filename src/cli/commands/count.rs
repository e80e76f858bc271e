use anyhow::Result;

use super::super::args::{CountCommand, GlobalArgs};
use super::{
    CommandResult, CommandSummary, DomainCount,
    helper::{CommandContext, finish, select_locales},
};
use crate::core::{
    TransEntrySpec,
    spec::matches_all,
    store::{read_trans_entries, trans_path},
};

pub fn count(global: &GlobalArgs, cmd: CountCommand) -> Result<CommandResult> {
    let ctx = CommandContext::new(global)?;
    let specs = TransEntrySpec::parse_list(&cmd.spec)?;
    let mut domains = Vec::new();

    for (name, domain) in ctx.domains()? {
        let dir = ctx.domain_dir(name, domain, cmd.trans_dir.as_deref());
        let mut counts = Vec::new();
        for locale in select_locales(&cmd.locales, domain) {
            let entries = read_trans_entries(&trans_path(&dir, &locale))?;
            let n = entries.iter().filter(|e| matches_all(&specs, e)).count();
            counts.push((locale, n));
        }
        domains.push(DomainCount {
            domain: name.to_string(),
            counts,
        });
    }

    Ok(finish(CommandSummary::Count(domains), Vec::new()))
}
