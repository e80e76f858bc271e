//! Command-line interface layer.
//!
//! Commands compute a [`commands::CommandResult`]; `report` prints it and the
//! exit status is derived from its error count.

pub mod args;
pub mod commands;
pub mod exit_status;
mod report;
mod run;

use anyhow::Result;

pub use args::{Arguments, Command, GlobalArgs};
pub use exit_status::ExitStatus;

pub fn run_cli(args: Arguments) -> Result<ExitStatus> {
    let Some(args) = args.with_command_or_help() else {
        return Ok(ExitStatus::Success);
    };

    let result = run::run(args)?;
    report::print(&result);

    Ok(ExitStatus::from_result(&result))
}
