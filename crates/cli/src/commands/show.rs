//! Show command implementation.
//!
//! Responsibilities:
//! - Resolve settings and print one named setting, or all of them.
//!
//! Does NOT handle:
//! - Comparing against defaults (see `diff`).
//!
//! Invariants / Assumptions:
//! - An unknown setting name fails with `SettingsError::UnknownSetting`.

use anyhow::{Context, Result};
use site_config::LazySettings;
use tracing::info;

use crate::output::{OutputFormat, format_settings, format_value};

/// Run the show command.
pub fn run(settings: &LazySettings, name: Option<&str>, output_format: &str) -> Result<()> {
    let format = OutputFormat::from_str(output_format)?;

    let formatted = match name {
        Some(name) => {
            info!(setting = %name, "Showing setting");
            let value = settings
                .get(name)
                .with_context(|| format!("Failed to show setting {name}"))?;
            format_value(format, &value)?
        }
        None => {
            info!("Showing all settings");
            let all = super::collect_all(settings).context("Failed to resolve settings")?;
            format_settings(format, &all)?
        }
    };

    print!("{formatted}");
    Ok(())
}
