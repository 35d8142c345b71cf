//! Centralized script error formatting
//!
//! This module provides consistent, actionable error messages for script
//! lookup errors across all CLI commands.

use anyhow::anyhow;
use console::style;
use continuous_scripts_core::ScriptError;

/// Format script errors with actionable guidance
///
/// Returns a styled, multi-line error message with a suggested next step.
pub fn format_script_error(e: &ScriptError) -> String {
    match e {
        ScriptError::NotFound { name } => {
            format!(
                "{}\n\n  {}\n\n  {}",
                style("Script not found").red().bold(),
                format_args!("No bundled script is named '{name}'."),
                style("  Try: continuous-scripts list").cyan(),
            )
        }
        ScriptError::InvalidName { name, reason } => {
            format!(
                "{}\n\n  {}\n  {}",
                style("Invalid script name").red().bold(),
                format_args!("'{name}': {reason}"),
                "Names are bundle-relative paths such as services/mongodb or continuousrc/python.",
            )
        }
        ScriptError::BundleMissing { root } => {
            format!(
                "{}\n\n  {}\n\n  {}\n  {}",
                style("Script bundle not found").red().bold(),
                format_args!("Nothing is installed at {}.", root.display()),
                "Install the bundled scripts there first:",
                style(format!("  continuous-scripts export {}", root.display())).cyan(),
            )
        }
        ScriptError::Unreadable { name, source } => {
            format!(
                "{}\n\n  {}\n  {}\n\n  {}",
                style("Cannot read script").red().bold(),
                format_args!("'{name}' exists but could not be read."),
                source,
                "Check the file permissions of the installed scripts.",
            )
        }
    }
}

/// Format script errors as anyhow::Error
///
/// Convenience wrapper for commands that want to return the error directly.
pub fn format_script_error_anyhow(e: &ScriptError) -> anyhow::Error {
    anyhow!("{}", format_script_error(e))
}
