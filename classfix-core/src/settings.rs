//! Clap-free settings for the class-sorting pipeline.

use classfix_types::ClassNames;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// What happens to a document once its canonical form is known.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RunMode {
    /// Print the canonical document to stdout.
    #[default]
    Print,
    /// Rewrite changed files in place.
    Write,
    /// Report files that would change.
    Check,
    /// Print a unified diff.
    Diff,
}

/// Which [`Canonicalizer`](crate::ports::Canonicalizer) to build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CanonicalizerKind {
    Alphabetical,
    #[default]
    Prettier,
    Command,
}

impl CanonicalizerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CanonicalizerKind::Alphabetical => "alphabetical",
            CanonicalizerKind::Prettier => "prettier",
            CanonicalizerKind::Command => "command",
        }
    }
}

impl fmt::Display for CanonicalizerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CanonicalizerKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "alphabetical" => Ok(CanonicalizerKind::Alphabetical),
            "prettier" => Ok(CanonicalizerKind::Prettier),
            "command" => Ok(CanonicalizerKind::Command),
            other => Err(format!(
                "unknown canonicalizer `{other}` (expected alphabetical, prettier or command)"
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalizerSettings {
    pub kind: CanonicalizerKind,

    /// Program and arguments for [`CanonicalizerKind::Command`].
    pub command: Vec<String>,

    /// How to invoke prettier; the stdin and plugin arguments are appended.
    pub prettier: Vec<String>,
}

impl Default for CanonicalizerSettings {
    fn default() -> Self {
        Self {
            kind: CanonicalizerKind::default(),
            command: Vec::new(),
            prettier: vec!["prettier".to_string()],
        }
    }
}

/// Settings for a run over one or more documents.
#[derive(Debug, Clone)]
pub struct RunSettings {
    pub mode: RunMode,

    // Concurrency
    pub jobs: usize,
    pub canonicalize_concurrency: usize,

    // Recognition
    pub class_names: ClassNames,
    pub canonicalizer: CanonicalizerSettings,

    // Backups
    pub backup_enabled: bool,
    pub backup_suffix: String,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            mode: RunMode::default(),
            jobs: std::thread::available_parallelism().map_or(4, |n| n.get()),
            canonicalize_concurrency: 16,
            class_names: ClassNames::default(),
            canonicalizer: CanonicalizerSettings::default(),
            backup_enabled: false,
            backup_suffix: ".classfix.bak".to_string(),
        }
    }
}

impl RunSettings {
    /// The suffix to back files up with, if backups are on.
    pub fn backup_suffix(&self) -> Option<&str> {
        self.backup_enabled.then_some(self.backup_suffix.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonicalizer_kind_parses_and_displays() {
        for kind in [
            CanonicalizerKind::Alphabetical,
            CanonicalizerKind::Prettier,
            CanonicalizerKind::Command,
        ] {
            assert_eq!(kind.as_str().parse::<CanonicalizerKind>(), Ok(kind));
        }
        assert!("rustfmt".parse::<CanonicalizerKind>().is_err());
    }

    #[test]
    fn backups_are_off_by_default() {
        let settings = RunSettings::default();
        assert_eq!(settings.backup_suffix(), None);
        assert!(settings.jobs >= 1);
    }
}
