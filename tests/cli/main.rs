use std::{
    fs,
    path::{Path, PathBuf},
    process::{Command, Output},
};

use anyhow::{Context, Result};
use insta_cmd::get_cargo_bin;
use serde_json::Value;
use tempfile::TempDir;

/// Snapshot a command's output with the project directory shown as
/// `[TEMP_DIR]`.
macro_rules! assert_cli_snapshot {
    ($test:expr, $cmd:expr, @$snapshot:literal $(,)?) => {{
        let mut settings = insta::Settings::clone_current();
        settings.add_filter(
            &regex::escape(&$test.root().display().to_string()),
            "[TEMP_DIR]",
        );
        settings.bind(|| {
            insta_cmd::assert_cmd_snapshot!($cmd, @$snapshot);
        });
    }};
}

mod count;
mod init;
mod update;
mod validate;

const BIN_NAME: &str = "l10n";

/// Config with one domain `app` translated into en, ko and fr, falling back
/// to en.
pub const APP_CONFIG: &str = r#"{
  "domains": {
    "app": {
      "type": "javascript",
      "keywords": ["$t", "ngettext:0:1"],
      "tag": "app",
      "locales": ["en", "ko", "fr"],
      "fallback-locale": "en",
      "cache-dir": "cache"
    }
  },
  "plurals": {
    "en": ["one", "other"],
    "ko": ["other"],
    "fr": ["one", "many", "other"]
  }
}"#;

pub struct CliTest {
    _temp_dir: TempDir,
    project_dir: PathBuf,
}

impl CliTest {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let project_dir = temp_dir.path().canonicalize()?;
        fs::create_dir(project_dir.join(".git"))?;
        Ok(Self {
            _temp_dir: temp_dir,
            project_dir,
        })
    }

    /// A project with [`APP_CONFIG`] and the given keys file.
    pub fn with_keys(keys: &str) -> Result<Self> {
        let test = Self::new()?;
        test.write_file(".l10nrc.json", APP_CONFIG)?;
        test.write_file("cache/app/keys.json", keys)?;
        Ok(test)
    }

    pub fn write_file(&self, path: &str, content: &str) -> Result<()> {
        let file_path = self.project_dir.join(path);

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory:{}", parent.display()))?;
        }

        fs::write(&file_path, content)
            .with_context(|| format!("Failed to write file: {}", file_path.display()))?;

        Ok(())
    }

    pub fn root(&self) -> &Path {
        &self.project_dir
    }

    pub fn command(&self) -> Command {
        let mut cmd = Command::new(get_cargo_bin(BIN_NAME));
        cmd.current_dir(&self.project_dir);
        cmd.env_clear();
        cmd.env("NO_COLOR", "1"); // Disable colors for consistent test output
        cmd.env("RUST_LOG", "off"); // Keep log lines out of snapshots
        cmd
    }

    pub fn l10n(&self, args: &[&str]) -> Command {
        let mut cmd = self.command();
        cmd.args(args);
        cmd
    }

    /// Run `l10n <args>` and capture the result.
    pub fn run(&self, args: &[&str]) -> Result<RunResult> {
        let Output {
            status,
            stdout,
            stderr,
        } = self.command().args(args).output()?;
        Ok(RunResult {
            code: status.code(),
            stdout: String::from_utf8(stdout)?,
            stderr: String::from_utf8(stderr)?,
        })
    }

    pub fn read_file(&self, path: &str) -> Result<String> {
        let file_path = self.project_dir.join(path);
        fs::read_to_string(&file_path)
            .with_context(|| format!("Failed to read file: {}", file_path.display()))
    }

    pub fn read_json(&self, path: &str) -> Result<Value> {
        let content = self.read_file(path)?;
        serde_json::from_str(&content).with_context(|| format!("Invalid JSON in {}", path))
    }
}

#[derive(Debug)]
pub struct RunResult {
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

/// Keys file entry without references.
pub fn key_json(key: &str, is_plural: bool) -> String {
    format!(
        r#"{{"context":null,"key":{},"isPlural":{},"references":[],"comments":[]}}"#,
        serde_json::to_string(key).unwrap(),
        is_plural
    )
}

pub fn keys_json(keys: &[(&str, bool)]) -> String {
    let entries: Vec<String> = keys.iter().map(|(k, p)| key_json(k, *p)).collect();
    format!("[{}]", entries.join(","))
}

/// Translation file entry with a single `other` message.
pub fn trans_json(key: &str, message: &str, flag: Option<&str>) -> String {
    format!(
        r#"{{"context":null,"key":{},"messages":{{"other":{}}},"flag":{}}}"#,
        serde_json::to_string(key).unwrap(),
        serde_json::to_string(message).unwrap(),
        serde_json::to_string(&flag).unwrap()
    )
}

#[test]
fn test_help() -> Result<()> {
    let test = CliTest::new()?;
    let result = test.run(&["--help"])?;
    assert_eq!(result.code, Some(0));
    for command in ["update", "check", "count", "cat", "validate", "init"] {
        assert!(result.stdout.contains(command), "missing {}", command);
    }
    Ok(())
}

#[test]
fn test_no_command_prints_help() -> Result<()> {
    let test = CliTest::new()?;
    let result = test.run(&[])?;
    assert_eq!(result.code, Some(0));
    assert!(result.stdout.contains("Usage"));
    Ok(())
}

#[test]
fn test_missing_config_is_an_error() -> Result<()> {
    let test = CliTest::new()?;
    assert_cli_snapshot!(test, test.l10n(&["count"]), @r"
    success: false
    exit_code: 2
    ----- stdout -----

    ----- stderr -----
    Error: No .l10nrc.json found. Run 'l10n init' to create one.
    ");
    Ok(())
}

#[test]
fn test_unknown_domain_is_an_error() -> Result<()> {
    let test = CliTest::with_keys("[]")?;
    assert_cli_snapshot!(test, test.l10n(&["-d", "web", "count"]), @r"
    success: false
    exit_code: 2
    ----- stdout -----

    ----- stderr -----
    Error: No config found for domain 'web'
    ");
    Ok(())
}

#[test]
fn test_invalid_config_is_an_error() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        ".l10nrc.json",
        r#"{"domains": {"app": {"type": "javascript", "locales": [], "keywords": []}}}"#,
    )?;
    assert_cli_snapshot!(test, test.l10n(&["count"]), @r"
    success: false
    exit_code: 2
    ----- stdout -----

    ----- stderr -----
    Error: Invalid config file: [TEMP_DIR]/.l10nrc.json: Domain 'app' has no locales
    ");
    Ok(())
}
