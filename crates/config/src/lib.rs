//! Deferred settings loading for web applications.
//!
//! This crate resolves application settings from a named settings source
//! (the dotted path in `SITE_SETTINGS_MODULE`), merges them over built-in
//! defaults, and caches the result behind a lazily resolved, process-wide
//! handle. Settings can also be configured programmatically.

pub mod constants;
mod lazy;
mod loader;
pub mod source;
pub mod types;

pub use constants::{ENVIRONMENT_VARIABLE, SEARCH_PATH_VARIABLE};
pub use lazy::{LazySettings, settings};
pub use loader::{
    FsModuleResolver, ImportError, ModuleResolver, PackageEntry, SettingsError, SettingsLoader,
    env_var_or_none, search_path_from_env, settings_module_from_env,
};
pub use source::{ManualSettings, SettingsSnapshot, SettingsSource, global_defaults};
pub use types::{Settings, SettingsOverrides};
