use std::{
    collections::{BTreeMap, HashMap},
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use crate::core::{Keyword, PluralQuantities, ValidationMode};

pub const CONFIG_FILE_NAME: &str = ".l10nrc.json";

pub const DEFAULT_CACHE_DIR: &str = ".l10n-tools";

/// Contents of `.l10nrc.json`. Keys this tool does not use (compiler outputs,
/// sync targets) are ignored.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    #[serde(default)]
    pub domains: BTreeMap<String, DomainConfig>,
    #[serde(default)]
    pub validation: ValidationConfig,
    /// Plural quantity names per locale, e.g. `{"ko": ["other"]}`.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub plurals: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct DomainConfig {
    #[serde(rename = "type")]
    pub domain_type: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub tag: String,
    pub locales: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_locale: Option<String>,
    #[serde(default = "default_cache_dir")]
    pub cache_dir: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub src_dirs: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub src_patterns: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ignore_patterns: Vec<String>,
}

fn default_cache_dir() -> String {
    DEFAULT_CACHE_DIR.to_string()
}

impl DomainConfig {
    /// Extraction keywords, parsed. [`Config::validate`] has already checked
    /// them for a loaded config.
    pub fn parsed_keywords(&self) -> Result<Vec<Keyword>> {
        self.keywords
            .iter()
            .map(|keyword| {
                keyword
                    .parse::<Keyword>()
                    .with_context(|| format!("Invalid keyword \"{}\"", keyword))
            })
            .collect()
    }

    /// Directory holding `keys.json` and `trans-*.json` of a domain.
    pub fn domain_dir(cache_root: &Path, domain: &str) -> PathBuf {
        cache_root.join(domain)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ValidationConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip: Option<bool>,
    /// Locale whose messages are the validation source; the key when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_locale: Option<String>,
}

impl ValidationConfig {
    /// Apply command line overrides. A value given on the command line wins
    /// over the rc file.
    pub fn with_overrides(&self, skip: bool, base_locale: Option<&str>) -> Self {
        Self {
            skip: if skip { Some(true) } else { self.skip },
            base_locale: base_locale
                .map(String::from)
                .or_else(|| self.base_locale.clone()),
        }
    }

    pub fn mode(&self) -> ValidationMode {
        if self.skip.unwrap_or(false) {
            return ValidationMode::Skip;
        }
        match &self.base_locale {
            Some(locale) => ValidationMode::BaseLocale(locale.clone()),
            None => ValidationMode::Key,
        }
    }
}

impl Config {
    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        for (name, domain) in &self.domains {
            if name.trim().is_empty() {
                bail!("Domain name must not be empty");
            }
            if domain.locales.is_empty() {
                bail!("Domain '{}' has no locales", name);
            }
            if domain.locales.iter().any(|locale| locale.trim().is_empty()) {
                bail!("Domain '{}' has an empty locale", name);
            }
            domain
                .parsed_keywords()
                .with_context(|| format!("Invalid 'keywords' in domain '{}'", name))?;
        }
        Ok(())
    }

    pub fn domain(&self, name: &str) -> Result<&DomainConfig> {
        self.domains
            .get(name)
            .with_context(|| format!("No config found for domain '{}'", name))
    }

    /// Domain names to process: the requested ones, or all in config order.
    pub fn select_domains(&self, requested: &[String]) -> Result<Vec<(&str, &DomainConfig)>> {
        if requested.is_empty() {
            return Ok(self
                .domains
                .iter()
                .map(|(name, domain)| (name.as_str(), domain))
                .collect());
        }
        requested
            .iter()
            .map(|name| {
                self.domains
                    .get_key_value(name)
                    .map(|(name, domain)| (name.as_str(), domain))
                    .with_context(|| format!("No config found for domain '{}'", name))
            })
            .collect()
    }

    pub fn plural_quantities(&self) -> PluralQuantities {
        PluralQuantities::new(
            self.plurals
                .iter()
                .map(|(locale, quantities)| (locale.clone(), quantities.clone()))
                .collect::<HashMap<_, _>>(),
        )
    }
}

fn default_config() -> Config {
    let domain = DomainConfig {
        domain_type: "javascript".to_string(),
        keywords: vec!["$t".to_string(), "i18n.t:0".to_string()],
        tag: "app".to_string(),
        locales: vec!["en".to_string(), "ko".to_string()],
        fallback_locale: Some("en".to_string()),
        cache_dir: default_cache_dir(),
        src_dirs: vec!["src".to_string()],
        src_patterns: Vec::new(),
        ignore_patterns: Vec::new(),
    };
    Config {
        domains: BTreeMap::from([("app".to_string(), domain)]),
        validation: ValidationConfig::default(),
        plurals: BTreeMap::from([
            ("en".to_string(), vec!["one".to_string(), "other".to_string()]),
            ("ko".to_string(), vec!["other".to_string()]),
        ]),
    }
}

pub fn default_config_json() -> Result<String> {
    serde_json::to_string_pretty(&default_config()).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
#[derive(Debug)]
pub struct ConfigLoadResult {
    pub config: Config,
    pub path: PathBuf,
    /// Directory relative paths in the config are resolved against.
    pub root: PathBuf,
}

pub fn load_config_file(path: &Path) -> Result<ConfigLoadResult> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config: Config = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
    config
        .validate()
        .with_context(|| format!("Invalid config file: {}", path.display()))?;

    let root = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    Ok(ConfigLoadResult {
        config,
        path: path.to_path_buf(),
        root,
    })
}

/// Load `rcfile` if given, otherwise search upwards from `start_dir`.
/// A missing config is an error: every command needs its domains.
pub fn load_config(start_dir: &Path, rcfile: Option<&Path>) -> Result<ConfigLoadResult> {
    match rcfile {
        Some(path) => load_config_file(&start_dir.join(path)),
        None => match find_config_file(start_dir) {
            Some(path) => load_config_file(&path),
            None => bail!(
                "No {} found. Run 'l10n init' to create one.",
                CONFIG_FILE_NAME
            ),
        },
    }
}
