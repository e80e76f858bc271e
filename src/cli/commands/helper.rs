use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::{CommandResult, CommandSummary};
use crate::cli::args::GlobalArgs;
use crate::config::{Config, DomainConfig, load_config};
use crate::core::{PluralQuantities, ValidationMode};
use crate::issues::{Issue, Severity};

pub fn finish(summary: CommandSummary, mut issues: Vec<Issue>) -> CommandResult {
    issues.sort();

    let mut error_count = issues
        .iter()
        .filter(|i| i.severity() == Severity::Error)
        .count();

    match &summary {
        CommandSummary::Validate(summary) if summary.error.is_some() => error_count += 1,
        CommandSummary::Init(summary) if summary.error.is_some() => error_count += 1,
        _ => {}
    }

    CommandResult {
        summary,
        error_count,
        issues,
    }
}

/// Loaded configuration plus the global command line options.
#[derive(Debug)]
pub struct CommandContext {
    pub config: Config,
    /// Directory containing the config file.
    pub root: PathBuf,
    pub domains: Vec<String>,
    pub validation: ValidationMode,
    pub plurals: PluralQuantities,
}

impl CommandContext {
    pub fn new(global: &GlobalArgs) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;
        Self::load(&cwd, global)
    }

    pub fn load(cwd: &Path, global: &GlobalArgs) -> Result<Self> {
        let loaded = load_config(cwd, global.rcfile.as_deref())?;
        tracing::debug!(path = %loaded.path.display(), "loaded config");

        let validation = loaded
            .config
            .validation
            .with_overrides(
                global.skip_validation,
                global.validation_base_locale.as_deref(),
            )
            .mode();
        let plurals = loaded.config.plural_quantities();

        Ok(Self {
            config: loaded.config,
            root: loaded.root,
            domains: global.domains.clone(),
            validation,
            plurals,
        })
    }

    /// Selected domains with their config.
    pub fn domains(&self) -> Result<Vec<(&str, &DomainConfig)>> {
        self.config.select_domains(&self.domains)
    }

    /// `<cache-dir>/<domain>`, or `<dir>/<domain>` when `dir` overrides the
    /// cache directory.
    pub fn domain_dir(&self, name: &str, domain: &DomainConfig, dir: Option<&Path>) -> PathBuf {
        let root = match dir {
            Some(dir) => dir.to_path_buf(),
            None => self.root.join(&domain.cache_dir),
        };
        DomainConfig::domain_dir(&root, name)
    }
}

/// Locales given on the command line, or all locales of the domain.
pub fn select_locales(requested: &[String], domain: &DomainConfig) -> Vec<String> {
    if requested.is_empty() {
        domain.locales.clone()
    } else {
        requested.to_vec()
    }
}

/// Keys and context are printed on one line each; newlines become `\n`.
pub fn escape_newlines(s: &str) -> String {
    s.replace('\n', "\\n")
}
