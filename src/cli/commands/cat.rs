use anyhow::Result;

use super::super::args::{CatCommand, GlobalArgs};
use super::{
    CommandResult, CommandSummary,
    helper::{CommandContext, finish},
};
use crate::core::{
    TransEntrySpec,
    spec::matches_all,
    store::{read_trans_entries, trans_path},
};

pub fn cat(global: &GlobalArgs, cmd: CatCommand) -> Result<CommandResult> {
    let ctx = CommandContext::new(global)?;
    let specs = TransEntrySpec::parse_list(&cmd.spec)?;
    let mut entries = Vec::new();

    for (name, domain) in ctx.domains()? {
        let dir = ctx.domain_dir(name, domain, cmd.trans_dir.as_deref());
        entries.extend(
            read_trans_entries(&trans_path(&dir, &cmd.locale))?
                .into_iter()
                .filter(|entry| matches_all(&specs, entry)),
        );
    }

    Ok(finish(CommandSummary::Cat(entries), Vec::new()))
}
