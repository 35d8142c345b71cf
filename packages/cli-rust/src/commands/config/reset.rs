//! Config reset subcommand
//!
//! Resets configuration to default values.

use anyhow::Result;
use console::{Term, style};
use continuous_scripts_core::{Config, save_config};
use dialoguer::Confirm;

/// Reset configuration to defaults
///
/// Prompts for confirmation unless --force is specified.
pub fn cmd_config_reset(force: bool, quiet: bool) -> Result<()> {
    if !force {
        if !Term::stderr().is_term() {
            anyhow::bail!("Refusing to reset without a terminal. Re-run with --force.");
        }

        let confirmed = Confirm::new()
            .with_prompt("Reset configuration to defaults? This cannot be undone.")
            .default(false)
            .interact()?;

        if !confirmed {
            if !quiet {
                println!("Reset cancelled.");
            }
            return Ok(());
        }
    }

    let path = save_config(&Config::default())?;

    if !quiet {
        println!(
            "{} Configuration reset to defaults ({})",
            style("Success:").green().bold(),
            path.display()
        );
    }

    Ok(())
}
