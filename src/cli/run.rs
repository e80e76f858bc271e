//! Dispatches parsed arguments to the command handlers.

use anyhow::Result;

use super::{
    args::{Arguments, Command},
    commands::{
        CommandResult, cat::cat, check::check, count::count, init::init, update::update,
        validate::validate,
    },
};

pub fn run(Arguments { global, command }: Arguments) -> Result<CommandResult> {
    match command {
        Some(Command::Update(cmd)) => update(&global, cmd),
        Some(Command::Check(cmd)) => check(&global, cmd),
        Some(Command::Count(cmd)) => count(&global, cmd),
        Some(Command::Cat(cmd)) => cat(&global, cmd),
        Some(Command::Validate(cmd)) => Ok(validate(cmd)),
        Some(Command::Init) => init(),
        None => {
            anyhow::bail!("No command provided. Use --help to see available commands.")
        }
    }
}
