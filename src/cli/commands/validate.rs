use super::super::args::ValidateCommand;
use super::{
    CommandResult, CommandSummary, ValidateSummary,
    helper::finish,
};
use crate::validator::validate_msg;

/// Needs no config: validates one message pair against each other.
pub fn validate(cmd: ValidateCommand) -> CommandResult {
    let error = validate_msg(&cmd.source, &cmd.target).err();
    finish(CommandSummary::Validate(ValidateSummary { error }), Vec::new())
}
