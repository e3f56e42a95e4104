//! Wildcard expansion for `INSTALLED_APPS`.
//!
//! An entry such as `site.contrib.*` is replaced by one entry per app package
//! found inside `site.contrib`, in sorted order. Only directories whose name is
//! ASCII-alphanumeric and starts with a letter count as app packages.

use tracing::debug;

use super::error::SettingsError;
use super::resolver::{ModuleResolver, PackageEntry};
use crate::constants::WILDCARD_SUFFIX;

/// Expand every wildcard entry in `apps`, keeping other entries in place.
pub(crate) fn expand_installed_apps(
    apps: Vec<String>,
    resolver: &dyn ModuleResolver,
) -> Result<Vec<String>, SettingsError> {
    let mut expanded = Vec::with_capacity(apps.len());
    for app in apps {
        let Some(package) = app.strip_suffix(WILDCARD_SUFFIX) else {
            expanded.push(app);
            continue;
        };

        let entries = resolver.package_entries(package).map_err(|source| {
            SettingsError::SourceUnloadable {
                module: package.to_string(),
                source,
            }
        })?;

        let mut names: Vec<String> = entries
            .into_iter()
            .filter(is_app_package)
            .map(|entry| entry.name)
            .collect();
        names.sort();

        debug!(package = %package, count = names.len(), "Expanded installed apps wildcard");
        expanded.extend(names.into_iter().map(|name| format!("{package}.{name}")));
    }
    Ok(expanded)
}

fn is_app_package(entry: &PackageEntry) -> bool {
    entry.is_dir && is_app_name(&entry.name)
}

fn is_app_name(name: &str) -> bool {
    name.chars().next().is_some_and(|c| c.is_ascii_alphabetic())
        && name.chars().all(|c| c.is_ascii_alphanumeric())
}
