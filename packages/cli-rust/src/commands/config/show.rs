//! Config show subcommand
//!
//! Displays current configuration in table or JSON format.
//! Uses serde serialization to automatically include all Config fields.

use anyhow::{Result, anyhow};
use comfy_table::{Cell, Color, Table};
use continuous_scripts_core::{Config, config};
use serde_json::Value;

/// Show current configuration
///
/// Values already include environment overrides.
pub fn cmd_config_show(config: &Config, json: bool, quiet: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(config)?);
        return Ok(());
    }

    println!("{}", build_table(config)?);

    if quiet {
        return Ok(());
    }

    println!();
    if let Some(path) = config::paths::get_config_path() {
        println!("Config file: {}", path.display());
    }
    println!("Effective source: {}", effective_source(config));

    Ok(())
}

fn build_table(config: &Config) -> Result<Table> {
    let value = serde_json::to_value(config)?;
    let obj = value
        .as_object()
        .ok_or_else(|| anyhow!("Config did not serialize to an object"))?;

    let mut table = Table::new();
    table.set_header(vec!["Key", "Value"]);

    for (key, val) in obj {
        let cell = Cell::new(format_value(val));
        let cell = if matches!(val, Value::Null) {
            cell.fg(Color::DarkGrey)
        } else {
            cell
        };
        table.add_row(vec![Cell::new(key), cell]);
    }

    Ok(table)
}

/// Format a JSON value for display
fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "(not set)".to_string(),
        Value::String(s) if s.is_empty() => "(not set)".to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn effective_source(config: &Config) -> String {
    config
        .script_source()
        .map(|source| source.to_string())
        .unwrap_or_else(|| "directory (no path could be determined)".to_string())
}
