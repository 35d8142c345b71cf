//! Configuration management
//!
//! Loads the JSONC config file (comments and trailing commas allowed),
//! applies environment overrides, and saves it back as pretty JSON.

pub mod paths;
mod schema;
mod validation;

use jsonc_parser::ParseOptions;
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

pub use schema::{Config, SourceKind};
pub use validation::{
    CURRENT_CONFIG_VERSION, ValidationError, ValidationWarning, display_validation_error,
    display_validation_warning, validate_config,
};

/// Overrides `source`
pub const ENV_SOURCE: &str = "CONTINUOUS_SCRIPTS_SOURCE";
/// Overrides `scripts_dir`
pub const ENV_SCRIPTS_DIR: &str = "CONTINUOUS_SCRIPTS_DIR";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not determine config path (is HOME set?)")]
    NoConfigPath,

    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid JSONC: {0}")]
    Parse(String),

    #[error("invalid config: {0}")]
    Schema(#[from] serde_json::Error),

    #[error("invalid value for {var}: {message}")]
    Env { var: &'static str, message: String },

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Parse config text, accepting JSONC
///
/// An empty document yields the default config.
pub fn parse_config(text: &str) -> Result<Config, ConfigError> {
    let value = jsonc_parser::parse_to_serde_value(text, &ParseOptions::default())
        .map_err(|e| ConfigError::Parse(e.to_string()))?;

    match value {
        Some(value) => Ok(serde_json::from_value(value)?),
        None => Ok(Config::default()),
    }
}

/// Load config from `path`, or defaults if the file does not exist
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        debug!("No config at {}, using defaults", path.display());
        return Ok(Config::default());
    }

    let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&text)
}

/// Load the user config (or defaults) and apply environment overrides
pub fn load_config_or_default() -> Result<Config, ConfigError> {
    let path = paths::get_config_path().ok_or(ConfigError::NoConfigPath)?;
    let mut config = load_config_from(&path)?;
    apply_env_overrides(&mut config, |var| env::var(var).ok())?;
    Ok(config)
}

/// Apply `CONTINUOUS_SCRIPTS_*` overrides using `lookup` for variable values
pub fn apply_env_overrides(
    config: &mut Config,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<(), ConfigError> {
    if let Some(value) = lookup(ENV_SOURCE) {
        config.source = value.parse::<SourceKind>().map_err(|message| ConfigError::Env {
            var: ENV_SOURCE,
            message,
        })?;
        debug!("{} overrides source: {}", ENV_SOURCE, config.source);
    }

    if let Some(value) = lookup(ENV_SCRIPTS_DIR)
        && !value.is_empty()
    {
        debug!("{} overrides scripts_dir: {}", ENV_SCRIPTS_DIR, value);
        config.scripts_dir = Some(value);
    }

    Ok(())
}

/// Save config to `path` as pretty JSON, creating parent directories
pub fn save_config_to(config: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let mut json = serde_json::to_string_pretty(config)?;
    json.push('\n');
    fs::write(path, json).map_err(|source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Save config to the user config path
pub fn save_config(config: &Config) -> Result<PathBuf, ConfigError> {
    let path = paths::get_config_path().ok_or(ConfigError::NoConfigPath)?;
    save_config_to(config, &path)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn parse_accepts_comments_and_trailing_commas() {
        let text = r#"{
            // read scripts from the installed copy
            "version": 1,
            "source": "directory",
            "scripts_dir": "/opt/continuous/scripts",
        }"#;
        let config = parse_config(text).unwrap();
        assert_eq!(config.source, SourceKind::Directory);
        assert_eq!(
            config.scripts_dir.as_deref(),
            Some("/opt/continuous/scripts")
        );
    }

    #[test]
    fn parse_empty_document_is_default() {
        assert_eq!(parse_config("").unwrap(), Config::default());
    }

    #[test]
    fn parse_rejects_syntax_errors() {
        assert!(matches!(
            parse_config(r#"{"version": }"#),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn parse_rejects_unknown_fields() {
        assert!(matches!(
            parse_config(r#"{"version": 1, "port": 80}"#),
            Err(ConfigError::Schema(_))
        ));
    }

    #[test]
    fn load_missing_file_is_default() {
        let tmp = TempDir::new().unwrap();
        let config = load_config_from(&tmp.path().join("config.json")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn save_then_load() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested").join("config.json");
        let config = Config {
            source: SourceKind::Directory,
            scripts_dir: Some("/srv/scripts".to_string()),
            ..Config::default()
        };

        save_config_to(&config, &path).unwrap();
        assert_eq!(load_config_from(&path).unwrap(), config);
    }

    #[test]
    fn env_overrides_apply() {
        let vars: HashMap<&str, &str> = HashMap::from([
            (ENV_SOURCE, "directory"),
            (ENV_SCRIPTS_DIR, "/mnt/scripts"),
        ]);
        let mut config = Config::default();
        apply_env_overrides(&mut config, |var| vars.get(var).map(|v| v.to_string())).unwrap();

        assert_eq!(config.source, SourceKind::Directory);
        assert_eq!(config.scripts_dir.as_deref(), Some("/mnt/scripts"));
    }

    #[test]
    fn env_override_rejects_unknown_source() {
        let mut config = Config::default();
        let err = apply_env_overrides(&mut config, |var| {
            (var == ENV_SOURCE).then(|| "ftp".to_string())
        })
        .unwrap_err();
        assert!(matches!(err, ConfigError::Env { var: ENV_SOURCE, .. }));
        assert_eq!(config.source, SourceKind::Embedded);
    }
}
