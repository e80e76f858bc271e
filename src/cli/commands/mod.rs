pub mod cat;
pub mod check;
mod command_result;
pub mod count;
pub mod helper;
pub mod init;
pub mod update;
pub mod validate;

pub use command_result::*;
