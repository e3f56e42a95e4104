//! CLI command implementations.
//!
//! Every command reads settings through the process-wide `LazySettings`
//! handle, so resolution happens on first access inside the command.

pub mod check;
pub mod diff;
pub mod show;

use std::collections::BTreeMap;

use serde_json::Value;
use site_config::{LazySettings, SettingsError};

/// Resolve every setting name to its current value.
pub(crate) fn collect_all(settings: &LazySettings) -> Result<BTreeMap<String, Value>, SettingsError> {
    settings
        .names()?
        .into_iter()
        .map(|name| {
            let value = settings.get(&name)?;
            Ok((name, value))
        })
        .collect()
}
