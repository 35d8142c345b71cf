//! Configuration schema for continuous-scripts
//!
//! Defines the structure and defaults for the config.json file.

use super::paths;
use crate::scripts::ScriptSource;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Which backend scripts are read from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Bundle compiled into the binary
    #[default]
    Embedded,
    /// Installed directory (`scripts_dir`)
    Directory,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceKind::Embedded => f.write_str("embedded"),
            SourceKind::Directory => f.write_str("directory"),
        }
    }
}

impl FromStr for SourceKind {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "embedded" => Ok(SourceKind::Embedded),
            "directory" | "dir" => Ok(SourceKind::Directory),
            other => Err(format!(
                "unknown script source '{other}' (expected 'embedded' or 'directory')"
            )),
        }
    }
}

/// Main configuration structure for continuous-scripts
///
/// Serialized to/from `~/.config/continuous-scripts/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Config file version for migrations
    #[serde(default = "default_version")]
    pub version: u32,

    /// Script backend (default: "embedded")
    #[serde(default)]
    pub source: SourceKind,

    /// Installed scripts directory used by the "directory" source
    /// Defaults to `~/.local/share/continuous-scripts/scripts` when unset
    #[serde(default)]
    pub scripts_dir: Option<String>,
}

fn default_version() -> u32 {
    1
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: default_version(),
            source: SourceKind::default(),
            scripts_dir: None,
        }
    }
}

impl Config {
    /// Configured scripts directory, falling back to the data-dir default
    pub fn scripts_dir_path(&self) -> Option<PathBuf> {
        self.scripts_dir
            .as_deref()
            .filter(|dir| !dir.is_empty())
            .map(PathBuf::from)
            .or_else(paths::get_default_scripts_dir)
    }

    /// Resolve the script source this config selects
    ///
    /// Returns None when the directory source is selected but no directory
    /// can be determined.
    pub fn script_source(&self) -> Option<ScriptSource> {
        match self.source {
            SourceKind::Embedded => Some(ScriptSource::Embedded),
            SourceKind::Directory => self.scripts_dir_path().map(ScriptSource::Directory),
        }
    }
}
