//! Configuration file loading for classfix.
//!
//! Discovers and loads `classfix.toml` from the working directory.
//! Merges config file settings with CLI arguments (CLI takes precedence).

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use classfix_core::{CanonicalizerKind, CanonicalizerSettings, ClassNames, RunSettings};
use fs_err as fs;
use serde::Deserialize;
use tracing::debug;

/// The config file name to search for.
pub const CONFIG_FILE_NAME: &str = "classfix.toml";

/// Top-level configuration from classfix.toml.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClassfixConfig {
    pub canonicalizer: CanonicalizerConfig,

    /// Which attributes, keys, methods and variables hold class lists.
    pub classes: ClassNames,

    pub run: RunConfig,

    pub backups: BackupsConfig,
}

/// Canonicalizer section of the config.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CanonicalizerConfig {
    pub kind: Option<CanonicalizerKind>,

    /// Program and arguments for `kind = "command"`.
    pub command: Vec<String>,

    /// How to invoke prettier (e.g. `["npx", "prettier"]`).
    pub prettier: Option<Vec<String>>,
}

/// Run section of the config.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Documents processed at once.
    pub jobs: Option<usize>,

    /// Class lists canonicalized at once within a document.
    pub canonicalize_concurrency: Option<usize>,
}

/// Backups section of the config.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BackupsConfig {
    /// Whether to copy a file aside before rewriting it.
    pub enabled: bool,

    /// Suffix for backup files.
    pub suffix: String,
}

impl Default for BackupsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            suffix: ".classfix.bak".to_string(),
        }
    }
}

/// Discover the classfix.toml config file.
///
/// Returns `None` if no config file is found in `dir`.
pub fn discover_config(dir: &Utf8Path) -> Option<Utf8PathBuf> {
    let config_path = dir.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        debug!("found config file at {}", config_path);
        Some(config_path)
    } else {
        debug!("no config file found at {}", config_path);
        None
    }
}

/// Load and parse a classfix.toml config file.
pub fn load_config(path: &Utf8Path) -> anyhow::Result<ClassfixConfig> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read config file {}", path))?;
    parse_config(&contents).with_context(|| format!("parse config file {}", path))
}

/// Parse a config file from a string.
pub fn parse_config(contents: &str) -> anyhow::Result<ClassfixConfig> {
    let config: ClassfixConfig = toml::from_str(contents).context("invalid TOML")?;
    Ok(config)
}

/// Load config from `dir`, or return default if not found.
pub fn load_or_default(dir: &Utf8Path) -> anyhow::Result<ClassfixConfig> {
    match discover_config(dir) {
        Some(path) => load_config(&path),
        None => Ok(ClassfixConfig::default()),
    }
}

/// CLI arguments that take part in merging.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub canonicalizer: Option<CanonicalizerKind>,
    pub jobs: Option<usize>,
    pub class_methods: Vec<String>,
    pub class_attributes: Vec<String>,
}

/// Builder for merging config file with CLI arguments.
pub struct ConfigMerger {
    config: ClassfixConfig,
}

impl ConfigMerger {
    /// Create a new merger from a loaded config.
    pub fn new(config: ClassfixConfig) -> Self {
        Self { config }
    }

    /// Merge with CLI arguments into run settings.
    ///
    /// Scalar flags override the file; list flags extend the file lists.
    pub fn merge_run_args(self, cli: &CliOverrides) -> RunSettings {
        let defaults = RunSettings::default();
        let file = self.config;

        let mut class_names = file.classes;
        class_names.extend(&ClassNames {
            attributes: cli.class_attributes.clone(),
            keys: vec![],
            methods: cli.class_methods.clone(),
            variables: vec![],
        });

        let canonicalizer = CanonicalizerSettings {
            kind: cli
                .canonicalizer
                .or(file.canonicalizer.kind)
                .unwrap_or_default(),
            command: file.canonicalizer.command,
            prettier: file
                .canonicalizer
                .prettier
                .unwrap_or(defaults.canonicalizer.prettier),
        };

        RunSettings {
            mode: defaults.mode,
            jobs: cli.jobs.or(file.run.jobs).unwrap_or(defaults.jobs),
            canonicalize_concurrency: file
                .run
                .canonicalize_concurrency
                .unwrap_or(defaults.canonicalize_concurrency),
            class_names,
            canonicalizer,
            backup_enabled: file.backups.enabled,
            backup_suffix: file.backups.suffix,
        }
    }
}
