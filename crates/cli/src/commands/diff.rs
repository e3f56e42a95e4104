//! Diff command implementation.
//!
//! Responsibilities:
//! - Print the settings whose resolved value differs from the built-in
//!   default, plus settings the defaults do not define at all.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use serde_json::Value;
use site_config::{LazySettings, SettingsSource, global_defaults};
use tracing::info;

use crate::output::{OutputFormat, format_settings};

/// Run the diff command.
pub fn run(settings: &LazySettings, output_format: &str) -> Result<()> {
    let format = OutputFormat::from_str(output_format)?;

    let all = super::collect_all(settings).context("Failed to resolve settings")?;
    let changed = changed_from(all, global_defaults().as_ref());
    info!(changed = changed.len(), "Computed settings diff");

    print!("{}", format_settings(format, &changed)?);
    Ok(())
}

fn changed_from(
    all: BTreeMap<String, Value>,
    defaults: &dyn SettingsSource,
) -> BTreeMap<String, Value> {
    all.into_iter()
        .filter(|(name, value)| defaults.lookup(name).as_ref() != Some(value))
        .collect()
}
