//! Config subcommand implementations
//!
//! Provides `continuous-scripts config` subcommands for viewing and managing
//! configuration.

mod reset;
mod show;

use anyhow::{Result, anyhow};
use clap::{Args, Subcommand};
use continuous_scripts_core::{Config, config};

pub use reset::cmd_config_reset;
pub use show::cmd_config_show;

/// Configuration command arguments
#[derive(Args)]
pub struct ConfigArgs {
    /// Output as JSON instead of table format
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Option<ConfigSubcommands>,
}

/// Configuration management subcommands
#[derive(Subcommand)]
pub enum ConfigSubcommands {
    /// Show current configuration
    Show {
        /// Output as JSON instead of table format
        #[arg(long)]
        json: bool,
    },
    /// Print the config file path
    Path,
    /// Reset configuration to defaults
    Reset {
        /// Skip confirmation prompt
        #[arg(long, short)]
        force: bool,
    },
}

/// Handle config command
///
/// Routes to the appropriate handler based on the subcommand.
/// If no subcommand is given, defaults to Show.
pub fn cmd_config(args: ConfigArgs, config: &Config, quiet: bool) -> Result<()> {
    match args.command {
        Some(ConfigSubcommands::Show { json }) => cmd_config_show(config, json, quiet),
        Some(ConfigSubcommands::Path) => cmd_config_path(),
        Some(ConfigSubcommands::Reset { force }) => cmd_config_reset(force, quiet),
        None => cmd_config_show(config, args.json, quiet),
    }
}

fn cmd_config_path() -> Result<()> {
    let path = config::paths::get_config_path()
        .ok_or_else(|| anyhow!("Could not determine config path"))?;
    println!("{}", path.display());
    Ok(())
}
