//! Verify command implementation
//!
//! Compares an installed scripts directory with the bundled scripts.

use crate::output::format_script_error_anyhow;
use anyhow::{Result, anyhow, bail};
use clap::Args;
use console::style;
use continuous_scripts_core::scripts::{ScriptDrift, detect_script_drift, drift_warning_lines};
use continuous_scripts_core::{DirectoryStore, EmbeddedStore};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Arguments for the verify command
#[derive(Args, Debug, Default)]
pub struct VerifyArgs {
    /// Installed scripts directory (defaults to the configured scripts directory)
    #[arg(value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Output the drift report as JSON
    #[arg(long)]
    pub json: bool,
}

/// Check an installed copy for drift
///
/// Fails when the installed scripts differ from the bundle.
pub fn cmd_verify(
    args: &VerifyArgs,
    default_dir: Option<&Path>,
    quiet: bool,
    verbose: u8,
) -> Result<()> {
    let dir = args
        .dir
        .as_deref()
        .or(default_dir)
        .ok_or_else(|| anyhow!("No directory given and no scripts directory is configured"))?;

    debug!("Verifying installed scripts at {}", dir.display());
    let report = detect_script_drift(&EmbeddedStore::new(), &DirectoryStore::new(dir))
        .map_err(|e| format_script_error_anyhow(&e))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report, &dir.display().to_string(), quiet, verbose);
    }

    if report.drift_detected {
        bail!("Installed scripts at {} are out of sync", dir.display());
    }
    Ok(())
}

fn print_report(report: &ScriptDrift, location: &str, quiet: bool, verbose: u8) {
    if !report.drift_detected {
        if !quiet {
            println!(
                "{} Installed scripts at {} match the bundle",
                style("Success:").green().bold(),
                location
            );
        }
        return;
    }

    eprintln!(
        "{} {}",
        style("Warning:").yellow().bold(),
        style("Script drift detected.").yellow()
    );
    for line in render_report_lines(report, location, verbose) {
        eprintln!("  {line}");
    }
    eprintln!();
}

fn render_report_lines(report: &ScriptDrift, location: &str, verbose: u8) -> Vec<String> {
    let mut lines = drift_warning_lines(report, location);
    if verbose > 0 {
        for detail in &report.diagnostics {
            lines.push(format!("diagnostic: {detail}"));
        }
    }
    lines
}
