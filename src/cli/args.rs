//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `update`: Reconcile extracted keys into every locale's translations
//! - `check`: Update, then report untranslated and invalid entries
//! - `count`: Count translation entries matching a spec
//! - `cat`: Print translation entries matching a spec
//! - `validate`: Validate a single translation against its source
//! - `init`: Initialize `.l10nrc.json`

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }
}

/// Options given before the command.
#[derive(Debug, Clone, Default, Args)]
pub struct GlobalArgs {
    /// Config file to use instead of searching for .l10nrc.json
    #[arg(short, long)]
    pub rcfile: Option<PathBuf>,

    /// Domains to process, all configured domains if not specified (comma separated)
    #[arg(short, long, value_delimiter = ',')]
    pub domains: Vec<String>,

    /// Skip format validation
    #[arg(short, long)]
    pub skip_validation: bool,

    /// Validate against this locale's messages instead of the keys
    #[arg(short = 'b', long)]
    pub validation_base_locale: Option<String>,

    /// Log verbosely
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Debug, Clone, Args)]
pub struct UpdateCommand {
    /// Locales to update, all configured locales if not specified (comma separated)
    #[arg(short, long, value_delimiter = ',')]
    pub locales: Vec<String>,

    /// Directory to load key files from, instead of the cache directory
    #[arg(long)]
    pub keys_dir: Option<PathBuf>,

    /// Directory to save translation files to, instead of the cache directory
    #[arg(long)]
    pub trans_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Args)]
pub struct CheckCommand {
    /// Locales to check, all configured locales if not specified (comma separated)
    #[arg(short, long, value_delimiter = ',')]
    pub locales: Vec<String>,
}

#[derive(Debug, Clone, Args)]
pub struct CountCommand {
    /// Locales to count, all configured locales if not specified (comma separated)
    #[arg(short, long, value_delimiter = ',')]
    pub locales: Vec<String>,

    /// Entries to count: total, translated, untranslated or a flag, negated with a
    /// leading '!' (comma separated)
    #[arg(short, long, default_value = "total")]
    pub spec: String,

    /// Directory to load translation files from, instead of the cache directory
    #[arg(long)]
    pub trans_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Args)]
pub struct CatCommand {
    /// Locale to print
    #[arg(short, long)]
    pub locale: String,

    /// Entries to print: total, translated, untranslated or a flag, negated with a
    /// leading '!' (comma separated)
    #[arg(short, long, default_value = "total")]
    pub spec: String,

    /// Directory to load translation files from, instead of the cache directory
    #[arg(long)]
    pub trans_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Args)]
pub struct ValidateCommand {
    /// Source message
    pub source: String,
    /// Translated message
    pub target: String,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Apply key changes to translations
    Update(UpdateCommand),
    /// Update translations and report untranslated or invalid entries
    Check(CheckCommand),
    /// Count translation entries
    Count(CountCommand),
    /// Print translation entries
    Cat(CatCommand),
    /// Validate a translated message against its source
    Validate(ValidateCommand),
    /// Initialize a new .l10nrc.json configuration file
    Init,
}
