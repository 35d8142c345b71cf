//! Configuration validation with actionable error messages
//!
//! Validates the configuration and provides exact commands to fix issues.

use super::schema::{Config, SourceKind};
use console::style;
use std::path::Path;

/// Highest config version this build understands
pub const CURRENT_CONFIG_VERSION: u32 = 1;

/// A configuration validation error with an actionable fix command
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// The config field that has an error
    pub field: String,
    /// Description of what's wrong
    pub message: String,
    /// Exact command to fix the issue
    pub fix_command: String,
}

/// A configuration validation warning (non-fatal)
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The config field with a potential issue
    pub field: String,
    /// Description of the warning
    pub message: String,
    /// Suggested command to address the warning
    pub fix_command: String,
}

/// Validate configuration and return warnings or first error
///
/// Returns Ok(warnings) if validation passes (possibly with non-fatal warnings).
/// Returns Err(error) on the first fatal validation error encountered.
pub fn validate_config(config: &Config) -> Result<Vec<ValidationWarning>, ValidationError> {
    let mut warnings = Vec::new();

    if config.version == 0 || config.version > CURRENT_CONFIG_VERSION {
        return Err(ValidationError {
            field: "version".to_string(),
            message: format!(
                "Unsupported config version {} (expected {CURRENT_CONFIG_VERSION})",
                config.version
            ),
            fix_command: "continuous-scripts config reset".to_string(),
        });
    }

    if let Some(dir) = config.scripts_dir.as_deref() {
        if dir.is_empty() {
            return Err(ValidationError {
                field: "scripts_dir".to_string(),
                message: "scripts_dir must not be empty".to_string(),
                fix_command: "continuous-scripts config reset".to_string(),
            });
        }
        if !Path::new(dir).is_absolute() {
            return Err(ValidationError {
                field: "scripts_dir".to_string(),
                message: format!("scripts_dir must be an absolute path, got '{dir}'"),
                fix_command: "continuous-scripts --scripts-dir /absolute/path config show"
                    .to_string(),
            });
        }
    }

    if config.source == SourceKind::Directory && config.scripts_dir_path().is_none() {
        return Err(ValidationError {
            field: "scripts_dir".to_string(),
            message: "Directory source selected but no scripts directory could be determined"
                .to_string(),
            fix_command: "continuous-scripts --scripts-dir /absolute/path config show".to_string(),
        });
    }

    // Warnings (non-fatal)

    if config.source == SourceKind::Embedded && config.scripts_dir.is_some() {
        warnings.push(ValidationWarning {
            field: "scripts_dir".to_string(),
            message: "scripts_dir is ignored while source is 'embedded'".to_string(),
            fix_command: "continuous-scripts --source directory list".to_string(),
        });
    }

    if config.source == SourceKind::Directory
        && let Some(dir) = config.scripts_dir_path()
        && !dir.is_dir()
    {
        warnings.push(ValidationWarning {
            field: "scripts_dir".to_string(),
            message: format!("Scripts directory {} does not exist", dir.display()),
            fix_command: format!("continuous-scripts export {}", dir.display()),
        });
    }

    Ok(warnings)
}

/// Display a validation error with styled formatting
pub fn display_validation_error(error: &ValidationError) {
    eprintln!();
    eprintln!("{}", style("Error: Configuration error").red().bold());
    eprintln!();
    eprintln!("  {}  {}", style("Field:").dim(), error.field);
    eprintln!("  {}  {}", style("Problem:").dim(), error.message);
    eprintln!();
    eprintln!("{}:", style("To fix, run").dim());
    eprintln!("  {}", style(&error.fix_command).cyan());
    eprintln!();
}

/// Display a validation warning with styled formatting
pub fn display_validation_warning(warning: &ValidationWarning) {
    eprintln!();
    eprintln!(
        "{}",
        style("Warning: Configuration warning").yellow().bold()
    );
    eprintln!();
    eprintln!("  {}  {}", style("Field:").dim(), warning.field);
    eprintln!("  {}  {}", style("Issue:").dim(), warning.message);
    eprintln!();
    eprintln!("{}:", style("To address, run").dim());
    eprintln!("  {}", style(&warning.fix_command).cyan());
    eprintln!();
}
