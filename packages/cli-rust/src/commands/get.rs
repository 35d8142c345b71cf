//! Get command implementation
//!
//! Writes a script's raw bytes to stdout or a file, unchanged.

use crate::output::format_script_error_anyhow;
use anyhow::{Context, Result};
use clap::Args;
use console::style;
use continuous_scripts_core::ScriptStore;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

/// Arguments for the get command
#[derive(Args, Debug, Default)]
pub struct GetArgs {
    /// Script name, e.g. bootstrap.sh or services/mongodb
    pub name: String,

    /// Write to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Print a script's contents
pub fn cmd_get(args: &GetArgs, store: &dyn ScriptStore, quiet: bool) -> Result<()> {
    let bytes = store
        .get(&args.name)
        .map_err(|e| format_script_error_anyhow(&e))?;

    match &args.output {
        Some(path) => {
            fs::write(path, &bytes)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            if !quiet {
                eprintln!(
                    "{} Wrote {} to {}",
                    style("Success:").green().bold(),
                    style(&args.name).cyan(),
                    path.display()
                );
            }
        }
        None => write_stdout(&bytes)?,
    }

    Ok(())
}

fn write_stdout(bytes: &[u8]) -> Result<()> {
    let mut stdout = io::stdout().lock();
    match stdout.write_all(bytes).and_then(|()| stdout.flush()) {
        Ok(()) => Ok(()),
        // Piped into `head` and friends
        Err(err) if err.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        Err(err) => Err(err).context("Failed to write script to stdout"),
    }
}
