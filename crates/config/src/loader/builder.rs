//! Settings loader builder implementation.
//!
//! Responsibilities:
//! - Provide a builder-pattern `SettingsLoader` that turns a settings source
//!   name into a finalized `SettingsSnapshot`.
//! - Merge the source layer over the built-in defaults and expand wildcards.
//! - Export the configured time zone to the process environment.
//!
//! Does NOT handle:
//! - Locating and parsing source files (delegated to resolver.rs).
//! - Caching the result (see the `lazy` module).
//!
//! Invariants / Assumptions:
//! - Any setting present in the source wins over the default.
//! - `load_dotenv()` must be called explicitly to enable `.env` file loading.
//! - The `DOTENV_DISABLED` variable is checked before `dotenvy::dotenv()` is called.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;

use super::env::settings_module_from_env;
use super::error::SettingsError;
use super::expand::expand_installed_apps;
use super::resolver::{FsModuleResolver, ModuleResolver};
use super::timezone::{TIME_ZONE_SUPPORTED, export_time_zone};
use crate::constants::{DOTENV_DISABLED_VARIABLE, ENVIRONMENT_VARIABLE};
use crate::source::SettingsSnapshot;
use crate::types::Settings;

/// Loader that builds settings snapshots from named settings sources.
#[derive(Debug, Clone)]
pub struct SettingsLoader {
    resolver: Option<Arc<dyn ModuleResolver>>,
    search_path: Option<Vec<PathBuf>>,
    export_time_zone: bool,
}

impl Default for SettingsLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsLoader {
    /// Create a loader that resolves sources on disk using `SITE_SETTINGS_PATH`.
    pub fn new() -> Self {
        Self {
            resolver: None,
            search_path: None,
            export_time_zone: TIME_ZONE_SUPPORTED,
        }
    }

    /// Check if dotenv loading is disabled via environment variable.
    fn dotenv_disabled() -> bool {
        matches!(
            std::env::var(DOTENV_DISABLED_VARIABLE).ok().as_deref(),
            Some("true") | Some("1")
        )
    }

    /// Load environment variables from .env file if present.
    ///
    /// If `DOTENV_DISABLED` environment variable is set to "true" or "1",
    /// the .env file will not be loaded (useful for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The `.env` file exists but has invalid syntax (`SettingsError::DotenvParse`)
    /// - The `.env` file exists but cannot be read due to I/O errors (`SettingsError::DotenvIo`)
    ///
    /// Missing `.env` files are silently ignored (returns `Ok(self)`).
    pub fn load_dotenv(self) -> Result<Self, SettingsError> {
        if Self::dotenv_disabled() {
            return Ok(self);
        }

        match dotenvy::dotenv() {
            Ok(_) => Ok(self),
            Err(e) if Self::is_not_found(&e) => Ok(self),
            Err(dotenvy::Error::LineParse(_, idx)) => {
                Err(SettingsError::DotenvParse { error_index: idx })
            }
            Err(dotenvy::Error::Io(io_err)) => Err(SettingsError::DotenvIo {
                kind: io_err.kind(),
            }),
            Err(_) => Err(SettingsError::DotenvUnknown),
        }
    }

    /// Check if a dotenv error indicates the file was not found.
    fn is_not_found(err: &dotenvy::Error) -> bool {
        matches!(
            err,
            dotenvy::Error::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound
        )
    }

    /// Use a custom resolver instead of the filesystem one.
    pub fn with_resolver(mut self, resolver: Arc<dyn ModuleResolver>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    /// Search these roots instead of `SITE_SETTINGS_PATH`.
    ///
    /// Ignored when a custom resolver is set.
    pub fn with_search_path(mut self, roots: Vec<PathBuf>) -> Self {
        self.search_path = Some(roots);
        self
    }

    /// Enable or disable applying `TIME_ZONE` as the process time zone after loading.
    ///
    /// Enabling has no effect on platforms without `TZ` support. When enabled,
    /// `load` writes the process environment (see its docs).
    pub fn with_time_zone_export(mut self, enabled: bool) -> Self {
        self.export_time_zone = enabled && TIME_ZONE_SUPPORTED;
        self
    }

    /// The resolver `load` will use.
    pub fn resolver(&self) -> Arc<dyn ModuleResolver> {
        if let Some(resolver) = &self.resolver {
            return Arc::clone(resolver);
        }
        let fs = match &self.search_path {
            Some(roots) => FsModuleResolver::new(roots.clone()),
            None => FsModuleResolver::from_env(),
        };
        Arc::new(fs)
    }

    /// Load the settings source named by `SITE_SETTINGS_MODULE`.
    ///
    /// An unset, empty, or whitespace-only variable is `SourceUndefined`;
    /// surrounding whitespace is trimmed from the module name.
    pub fn load_from_env(&self) -> Result<SettingsSnapshot, SettingsError> {
        let module = settings_module_from_env().ok_or(SettingsError::SourceUndefined {
            var: ENVIRONMENT_VARIABLE,
        })?;
        self.load(&module)
    }

    /// Load the settings source `module` and merge it over the defaults.
    ///
    /// With time zone export enabled (the default on Unix), this sets `TZ` to
    /// the resolved `TIME_ZONE` and calls `tzset`. Environment mutation is not
    /// thread-safe: call this before spawning threads that read the
    /// environment, or disable export with `with_time_zone_export(false)`.
    pub fn load(&self, module: &str) -> Result<SettingsSnapshot, SettingsError> {
        let resolver = self.resolver();
        let mut layer =
            resolver
                .load_module(module)
                .map_err(|source| SettingsError::SourceUnloadable {
                    module: module.to_string(),
                    source,
                })?;

        let extra = std::mem::take(&mut layer.extra);
        let mut settings = Settings::default().merge(layer);
        settings.installed_apps = expand_installed_apps(
            std::mem::take(&mut settings.installed_apps),
            resolver.as_ref(),
        )?;

        if self.export_time_zone {
            export_time_zone(&settings.time_zone);
        }

        info!(
            module = %module,
            installed_apps = settings.installed_apps.len(),
            custom_settings = extra.len(),
            "Settings loaded"
        );

        Ok(SettingsSnapshot::new(
            settings,
            extra,
            Some(module.to_string()),
        ))
    }
}
