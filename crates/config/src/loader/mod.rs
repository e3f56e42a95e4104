//! Settings loader for named settings sources.
//!
//! Responsibilities:
//! - Resolve a dotted settings source name into a file below the search path.
//! - Merge the source's ALL-CAPS settings over the built-in defaults.
//! - Expand `INSTALLED_APPS` wildcards and export the configured time zone.
//!
//! Does NOT handle:
//! - Deferring or caching resolution (see `lazy.rs`).
//! - Programmatic configuration (see `LazySettings::configure`).
//!
//! Invariants / Assumptions:
//! - Settings from the source take precedence over defaults.
//! - `load_dotenv()` must be called explicitly to enable `.env` file loading.
//! - The `DOTENV_DISABLED` variable is checked before `dotenvy::dotenv()` is called.

mod builder;
mod env;
mod error;
mod expand;
mod resolver;
mod timezone;

#[cfg(test)]
mod tests;

pub use builder::SettingsLoader;
pub use env::{env_var_or_none, search_path_from_env, settings_module_from_env};
pub use error::{ImportError, SettingsError};
pub use resolver::{FsModuleResolver, ModuleResolver, PackageEntry};
