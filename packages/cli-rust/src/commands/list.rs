//! List command implementation
//!
//! Shows every script in the active store as a table or JSON.

use crate::output::{format_script_error_anyhow, format_size};
use anyhow::Result;
use clap::Args;
use comfy_table::{Cell, Color, Table};
use continuous_scripts_core::ScriptStore;
use continuous_scripts_core::scripts::{ScriptCategory, ScriptEntry, catalog, filter_by_category};

/// Arguments for the list command
#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// Only show one category (bootstrap, service, runtime_config, setup, other)
    #[arg(long, short)]
    pub category: Option<ScriptCategory>,

    /// Output as JSON instead of table format
    #[arg(long)]
    pub json: bool,
}

/// List bundled scripts
pub fn cmd_list(args: &ListArgs, store: &dyn ScriptStore, quiet: bool) -> Result<()> {
    let mut entries = catalog(store).map_err(|e| format_script_error_anyhow(&e))?;
    if let Some(category) = args.category {
        entries = filter_by_category(entries, category);
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        if !quiet {
            println!("No scripts found in {}.", store.describe());
        }
        return Ok(());
    }

    println!("{}", build_table(&entries));
    if !quiet {
        println!();
        println!("{} scripts from {}", entries.len(), store.describe());
    }

    Ok(())
}

fn build_table(entries: &[ScriptEntry]) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Name", "Category", "Size"]);

    for entry in entries {
        table.add_row(vec![
            Cell::new(&entry.name),
            Cell::new(entry.category).fg(category_color(entry.category)),
            Cell::new(format_size(entry.size)),
        ]);
    }

    table
}

fn category_color(category: ScriptCategory) -> Color {
    match category {
        ScriptCategory::Bootstrap => Color::Green,
        ScriptCategory::Service => Color::Cyan,
        ScriptCategory::RuntimeConfig => Color::Yellow,
        ScriptCategory::Setup => Color::Magenta,
        ScriptCategory::Other => Color::Grey,
    }
}
