//! continuous-scripts CLI - Read, list, and install the bundled provisioning scripts
//!
//! This module contains the shared CLI implementation used by all binaries.

mod commands;
mod output;

use anyhow::{Result, anyhow};
use clap::{Parser, Subcommand, ValueEnum};
use console::style;
use continuous_scripts_core::config::{
    self, display_validation_error, display_validation_warning, validate_config,
};
use continuous_scripts_core::{
    Config, ScriptStore, SourceKind, get_version, load_config_or_default, open_store,
};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Read, list, and install the bundled provisioning scripts
#[derive(Parser)]
#[command(name = "continuous-scripts")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Read, list, and install the bundled provisioning scripts", long_about = None)]
#[command(after_help = get_banner())]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Increase verbosity level
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Where scripts are read from (overrides config and environment)
    #[arg(long, global = true, value_enum)]
    source: Option<SourceChoice>,

    /// Installed scripts directory (overrides config and environment)
    #[arg(long, global = true, value_name = "DIR")]
    scripts_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a script's contents
    Get(commands::GetArgs),
    /// List available scripts
    List(commands::ListArgs),
    /// Install the bundled scripts into a directory or archive
    Export(commands::ExportArgs),
    /// Check an installed copy against the bundle
    Verify(commands::VerifyArgs),
    /// Manage configuration
    Config(commands::ConfigArgs),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum SourceChoice {
    Embedded,
    Directory,
}

impl From<SourceChoice> for SourceKind {
    fn from(choice: SourceChoice) -> Self {
        match choice {
            SourceChoice::Embedded => SourceKind::Embedded,
            SourceChoice::Directory => SourceKind::Directory,
        }
    }
}

/// Get the ASCII banner for help display
fn get_banner() -> &'static str {
    r#"
                 _   _
  ___ ___  _ __ | |_(_)_ __  _   _  ___  _   _ ___
 / __/ _ \| '_ \| __| | '_ \| | | |/ _ \| | | / __|
| (_| (_) | | | | |_| | | | | |_| | (_) | |_| \__ \
 \___\___/|_| |_|\__|_|_| |_|\__,_|\___/ \__,_|___/
                                            scripts
"#
}

/// Default log level for a `-v` count; `RUST_LOG` takes precedence
fn default_log_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

fn init_tracing(verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_log_level(verbose)));

    // stdout carries script bytes for `get`
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Apply `--source` and `--scripts-dir` on top of the loaded config
///
/// `--scripts-dir` alone implies the directory source. A relative directory
/// is resolved against the current directory.
fn apply_cli_overrides(config: &mut Config, source: Option<SourceChoice>, dir: Option<PathBuf>) {
    if let Some(dir) = dir {
        let dir = std::path::absolute(&dir).unwrap_or(dir);
        config.scripts_dir = Some(dir.display().to_string());
        config.source = SourceKind::Directory;
    }
    if let Some(choice) = source {
        config.source = choice.into();
    }
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    // Configure color output
    if cli.no_color {
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(false);
    }

    let config_path = config::paths::get_config_path()
        .ok_or_else(|| anyhow!("Could not determine config path"))?;

    // Load config
    let mut config = match load_config_or_default() {
        Ok(config) => {
            debug!("Config loaded from {}", config_path.display());
            config
        }
        Err(e) => {
            // Display rich error for invalid config
            eprintln!("{} Configuration error", style("Error:").red().bold());
            eprintln!();
            eprintln!("  {e}");
            eprintln!();
            eprintln!("  Config file: {}", style(config_path.display()).yellow());
            eprintln!();
            eprintln!(
                "  {} Check the config file for syntax errors or unknown fields.",
                style("Tip:").cyan()
            );
            eprintln!(
                "  {} Reset it with: {}",
                style("Tip:").cyan(),
                style("continuous-scripts config reset").green()
            );
            std::process::exit(1);
        }
    };

    apply_cli_overrides(&mut config, cli.source, cli.scripts_dir.clone());

    let is_config_command = matches!(cli.command, Some(Commands::Config(_)));
    match validate_config(&config) {
        Ok(warnings) => {
            if !cli.quiet {
                for warning in &warnings {
                    display_validation_warning(warning);
                }
            }
        }
        Err(error) => {
            display_validation_error(&error);
            // Config commands must stay usable to repair the file
            if !is_config_command {
                std::process::exit(1);
            }
        }
    }

    if cli.verbose > 0 {
        let data_dir = config::paths::get_data_dir()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "unknown".to_string());
        eprintln!(
            "{} Config: {}",
            style("[info]").cyan(),
            config_path.display()
        );
        eprintln!("{} Data: {}", style("[info]").cyan(), data_dir);
    }

    let scripts_dir = config.scripts_dir_path();

    match cli.command {
        Some(Commands::Get(args)) => {
            let store = resolve_store(&config)?;
            commands::cmd_get(&args, store.as_ref(), cli.quiet)
        }
        Some(Commands::List(args)) => {
            let store = resolve_store(&config)?;
            commands::cmd_list(&args, store.as_ref(), cli.quiet)
        }
        Some(Commands::Export(args)) => {
            commands::cmd_export(&args, scripts_dir.as_deref(), cli.quiet)
        }
        Some(Commands::Verify(args)) => {
            commands::cmd_verify(&args, scripts_dir.as_deref(), cli.quiet, cli.verbose)
        }
        Some(Commands::Config(args)) => commands::cmd_config(args, &config, cli.quiet),
        None => {
            if !cli.quiet {
                print_help_hint();
            }
            Ok(())
        }
    }
}

fn resolve_store(config: &Config) -> Result<Box<dyn ScriptStore>> {
    let source = config
        .script_source()
        .ok_or_else(|| anyhow!("Directory source selected but no scripts directory is set"))?;
    debug!("Reading scripts from {source}");
    Ok(open_store(&source))
}

fn print_help_hint() {
    println!(
        "{} {}",
        style("continuous-scripts").cyan().bold(),
        style(get_version()).dim()
    );
    println!();
    println!("Run {} for available commands.", style("--help").green());
}
