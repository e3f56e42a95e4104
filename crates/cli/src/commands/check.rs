//! Check command implementation.
//!
//! Resolves settings and reports which source they came from. Any resolution
//! failure propagates so the process exits with the matching exit code.

use anyhow::{Context, Result};
use site_config::LazySettings;
use tracing::info;

/// Run the check command.
pub fn run(settings: &LazySettings) -> Result<()> {
    let source = settings.resolved().context("Settings check failed")?;
    let installed_apps: Vec<String> = settings.get_as("INSTALLED_APPS")?;
    let module = source.settings_module().unwrap_or("<manual>");
    info!(module = %module, "Settings check passed");

    println!("Settings module: {module}");
    println!("Installed apps: {}", installed_apps.len());
    for app in &installed_apps {
        println!("  {app}");
    }
    println!("Settings: {}", source.names().len());
    Ok(())
}
