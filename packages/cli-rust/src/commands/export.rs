//! Export command implementation
//!
//! Installs the bundled scripts into a directory, or packs them into a
//! tar.gz archive.

use crate::output::{format_script_error_anyhow, format_size};
use anyhow::{Result, anyhow};
use clap::Args;
use console::{Term, style};
use continuous_scripts_core::EmbeddedStore;
use continuous_scripts_core::scripts::{ExportError, export_to_dir, write_bundle_archive};
use dialoguer::Confirm;
use std::path::{Path, PathBuf};

/// Arguments for the export command
#[derive(Args, Debug, Default)]
pub struct ExportArgs {
    /// Destination directory (defaults to the configured scripts directory)
    #[arg(value_name = "DIR", conflicts_with = "archive")]
    pub dest: Option<PathBuf>,

    /// Write a tar.gz archive instead of a directory tree
    #[arg(long, value_name = "FILE")]
    pub archive: Option<PathBuf>,

    /// Overwrite existing files without prompting
    #[arg(long, short)]
    pub force: bool,
}

/// Export the bundled scripts
///
/// `default_dest` is used when no destination is given.
pub fn cmd_export(args: &ExportArgs, default_dest: Option<&Path>, quiet: bool) -> Result<()> {
    let store = EmbeddedStore::new();

    if let Some(archive) = &args.archive {
        let size = match write_bundle_archive(&store, archive, args.force) {
            Err(ExportError::Exists { path }) if confirm_overwrite(&path, quiet)? => {
                write_bundle_archive(&store, archive, true)?
            }
            result => result.map_err(export_error)?,
        };
        if !quiet {
            println!(
                "{} Wrote {} ({})",
                style("Success:").green().bold(),
                archive.display(),
                format_size(size as u64)
            );
        }
        return Ok(());
    }

    let dest = args
        .dest
        .as_deref()
        .or(default_dest)
        .ok_or_else(|| anyhow!("No destination given and no scripts directory is configured"))?;

    let written = match export_to_dir(&store, dest, args.force) {
        Err(ExportError::Exists { path }) if confirm_overwrite(&path, quiet)? => {
            export_to_dir(&store, dest, true)?
        }
        result => result.map_err(export_error)?,
    };

    if !quiet {
        println!(
            "{} Exported {} scripts to {}",
            style("Success:").green().bold(),
            written.len(),
            dest.display()
        );
    }

    Ok(())
}

/// Ask before overwriting; declines when nobody is at the terminal
fn confirm_overwrite(existing: &Path, quiet: bool) -> Result<bool> {
    if quiet || !Term::stderr().is_term() {
        return Ok(false);
    }

    let confirmed = Confirm::new()
        .with_prompt(format!(
            "{} already exists. Overwrite existing scripts?",
            existing.display()
        ))
        .default(false)
        .interact()?;
    Ok(confirmed)
}

fn export_error(err: ExportError) -> anyhow::Error {
    match err {
        ExportError::Script(e) => format_script_error_anyhow(&e),
        ExportError::Exists { path } => anyhow!(
            "{} already exists.\n  Re-run with {} to overwrite.",
            path.display(),
            style("--force").green()
        ),
        other => other.into(),
    }
}
