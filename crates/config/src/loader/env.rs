//! Environment variable helpers for settings resolution.
//!
//! Responsibilities:
//! - Read environment variables with empty/whitespace filtering.
//! - Read the settings source name and the resolver search path.
//!
//! Does NOT handle:
//! - Loading or parsing settings sources (see resolver.rs and builder.rs).
//! - .env file loading (handled by SettingsLoader::load_dotenv).
//!
//! Invariants:
//! - Empty or whitespace-only environment variables are treated as unset.
//! - Returned values are trimmed (leading/trailing whitespace removed).

use std::path::PathBuf;

use crate::constants::{ENVIRONMENT_VARIABLE, SEARCH_PATH_VARIABLE};

/// Read an environment variable, returning None if unset, empty, or whitespace-only.
/// Returns the trimmed value (leading/trailing whitespace removed) if present.
pub fn env_var_or_none(key: &str) -> Option<String> {
    std::env::var(key).ok().and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == s.len() {
            Some(s)
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Dotted path of the settings source named by `SITE_SETTINGS_MODULE`.
pub fn settings_module_from_env() -> Option<String> {
    env_var_or_none(ENVIRONMENT_VARIABLE)
}

/// Search roots from `SITE_SETTINGS_PATH`, or `None` if unset.
///
/// Empty entries in the list are skipped.
pub fn search_path_from_env() -> Option<Vec<PathBuf>> {
    let raw = env_var_or_none(SEARCH_PATH_VARIABLE)?;
    let roots: Vec<PathBuf> = std::env::split_paths(&raw)
        .filter(|p| !p.as_os_str().is_empty())
        .collect();
    if roots.is_empty() { None } else { Some(roots) }
}
