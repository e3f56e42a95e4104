//! Lazily resolved, process-wide settings.
//!
//! Responsibilities:
//! - Defer loading settings until the first lookup.
//! - Cache the resolved settings for the rest of the process.
//! - Offer programmatic configuration as an alternative to `SITE_SETTINGS_MODULE`.
//!
//! Does NOT handle:
//! - Reading settings sources (delegated to `SettingsLoader`).
//!
//! Invariants:
//! - Resolution happens at most once per `LazySettings`; the mutex makes the
//!   check-and-set atomic, so concurrent first lookups resolve exactly once.
//! - A failed resolution caches nothing and is retried by the next lookup.
//! - Once resolved, the wrapped settings are never replaced.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::loader::{SettingsError, SettingsLoader};
use crate::source::{ManualSettings, SettingsSource};

type Wrapped = Option<Arc<dyn SettingsSource>>;

/// Settings that are resolved on first use.
///
/// # Example
///
/// ```rust,ignore
/// use site_config::settings;
///
/// let debug: bool = settings().get_as("DEBUG")?;
/// ```
pub struct LazySettings {
    wrapped: Mutex<Wrapped>,
    loader: Option<SettingsLoader>,
}

impl Default for LazySettings {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for LazySettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LazySettings")
            .field("configured", &self.is_configured())
            .finish_non_exhaustive()
    }
}

impl LazySettings {
    /// Unresolved settings using the default filesystem loader.
    pub const fn new() -> Self {
        Self {
            wrapped: Mutex::new(None),
            loader: None,
        }
    }

    /// Unresolved settings that resolve through `loader`.
    pub fn with_loader(loader: SettingsLoader) -> Self {
        Self {
            wrapped: Mutex::new(None),
            loader: Some(loader),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Wrapped> {
        // The guarded value is only ever replaced whole, so a poisoned lock
        // still holds a consistent state.
        self.wrapped.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Resolve if needed and return the wrapped settings.
    pub fn resolved(&self) -> Result<Arc<dyn SettingsSource>, SettingsError> {
        let mut wrapped = self.lock();
        if let Some(settings) = wrapped.as_ref() {
            return Ok(Arc::clone(settings));
        }

        debug!("Resolving settings from environment");
        let snapshot = match &self.loader {
            Some(loader) => loader.load_from_env()?,
            None => SettingsLoader::new().load_from_env()?,
        };
        let settings: Arc<dyn SettingsSource> = Arc::new(snapshot);
        *wrapped = Some(Arc::clone(&settings));
        Ok(settings)
    }

    /// Value of the setting `name`, resolving settings on first use.
    pub fn get(&self, name: &str) -> Result<Value, SettingsError> {
        self.resolved()?
            .lookup(name)
            .ok_or_else(|| SettingsError::UnknownSetting(name.to_string()))
    }

    /// Value of the setting `name`, deserialized into `T`.
    pub fn get_as<T: DeserializeOwned>(&self, name: &str) -> Result<T, SettingsError> {
        let value = self.get(name)?;
        serde_json::from_value(value).map_err(|e| SettingsError::InvalidValue {
            name: name.to_string(),
            message: e.to_string(),
        })
    }

    /// Every setting name, resolving settings on first use.
    pub fn names(&self) -> Result<Vec<String>, SettingsError> {
        Ok(self.resolved()?.names())
    }

    /// Dotted path of the loaded settings source, if any.
    pub fn settings_module(&self) -> Result<Option<String>, SettingsError> {
        Ok(self.resolved()?.settings_module().map(str::to_string))
    }

    /// Configure settings programmatically instead of from `SITE_SETTINGS_MODULE`.
    ///
    /// Names not in `overrides` are looked up in `default_source`.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::AlreadyConfigured` if settings were already
    /// resolved, by either path.
    pub fn configure<I, K>(
        &self,
        default_source: Arc<dyn SettingsSource>,
        overrides: I,
    ) -> Result<(), SettingsError>
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        let mut wrapped = self.lock();
        if wrapped.is_some() {
            return Err(SettingsError::AlreadyConfigured);
        }

        let overrides: BTreeMap<String, Value> = overrides
            .into_iter()
            .map(|(name, value)| (name.into(), value))
            .collect();
        debug!(count = overrides.len(), "Settings configured manually");
        *wrapped = Some(Arc::new(ManualSettings::new(default_source, overrides)));
        Ok(())
    }

    /// Whether settings have been resolved. Never triggers resolution.
    pub fn is_configured(&self) -> bool {
        self.lock().is_some()
    }
}

/// The process-wide settings.
pub fn settings() -> &'static LazySettings {
    static SETTINGS: LazySettings = LazySettings::new();
    &SETTINGS
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::{ImportError, ModuleResolver, PackageEntry};
    use crate::source::global_defaults;
    use crate::types::SettingsOverrides;
    use serde_json::json;
    use serial_test::serial;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Resolver serving one in-memory module and counting loads.
    #[derive(Debug, Default)]
    struct CountingResolver {
        loads: AtomicUsize,
    }

    impl ModuleResolver for CountingResolver {
        fn load_module(&self, module: &str) -> Result<SettingsOverrides, ImportError> {
            self.loads.fetch_add(1, Ordering::SeqCst);
            if module != "mysite.settings" {
                return Err(ImportError::NotFound {
                    module: module.to_string(),
                    searched: Vec::new(),
                });
            }
            Ok(SettingsOverrides {
                debug: Some(true),
                installed_apps: Some(vec!["blog".to_string()]),
                ..Default::default()
            })
        }

        fn package_entries(&self, package: &str) -> Result<Vec<PackageEntry>, ImportError> {
            Err(ImportError::NotAPackage {
                package: package.to_string(),
                searched: Vec::new(),
            })
        }
    }

    fn lazy_with(resolver: Arc<CountingResolver>) -> LazySettings {
        LazySettings::with_loader(
            SettingsLoader::new()
                .with_resolver(resolver)
                .with_time_zone_export(false),
        )
    }

    fn with_module<R>(module: Option<&str>, f: impl FnOnce() -> R) -> R {
        temp_env::with_vars([("SITE_SETTINGS_MODULE", module)], f)
    }

    #[test]
    #[serial]
    fn test_get_resolves_once_and_caches() {
        let resolver = Arc::new(CountingResolver::default());
        let lazy = lazy_with(Arc::clone(&resolver));

        with_module(Some("mysite.settings"), || {
            assert!(!lazy.is_configured());
            assert_eq!(lazy.get("DEBUG").unwrap(), json!(true));
            assert!(lazy.is_configured());
            assert_eq!(lazy.get("LANGUAGE_CODE").unwrap(), json!("en-us"));
        });

        // Cached: changing the environment has no effect any more.
        with_module(Some("other.settings"), || {
            assert_eq!(lazy.get("DEBUG").unwrap(), json!(true));
            assert_eq!(
                lazy.settings_module().unwrap().as_deref(),
                Some("mysite.settings")
            );
        });
        assert_eq!(resolver.loads.load(Ordering::SeqCst), 1);
    }

    #[test]
    #[serial]
    fn test_unset_variable_fails_without_caching() {
        let resolver = Arc::new(CountingResolver::default());
        let lazy = lazy_with(Arc::clone(&resolver));

        with_module(None, || {
            let err = lazy.get("DEBUG").unwrap_err();
            assert!(matches!(err, SettingsError::SourceUndefined { .. }));
        });
        assert!(!lazy.is_configured());
        assert_eq!(resolver.loads.load(Ordering::SeqCst), 0);

        with_module(Some("mysite.settings"), || {
            assert_eq!(lazy.get("DEBUG").unwrap(), json!(true));
        });
    }

    #[test]
    #[serial]
    fn test_unloadable_source_is_retried() {
        let resolver = Arc::new(CountingResolver::default());
        let lazy = lazy_with(Arc::clone(&resolver));

        with_module(Some("missing.settings"), || {
            assert!(matches!(
                lazy.get("DEBUG"),
                Err(SettingsError::SourceUnloadable { .. })
            ));
            assert!(matches!(
                lazy.get("DEBUG"),
                Err(SettingsError::SourceUnloadable { .. })
            ));
        });
        assert!(!lazy.is_configured());
        assert_eq!(resolver.loads.load(Ordering::SeqCst), 2);
    }

    #[test]
    #[serial]
    fn test_unknown_setting() {
        let lazy = lazy_with(Arc::new(CountingResolver::default()));
        with_module(Some("mysite.settings"), || {
            assert!(matches!(
                lazy.get("NO_SUCH_SETTING"),
                Err(SettingsError::UnknownSetting(name)) if name == "NO_SUCH_SETTING"
            ));
        });
    }

    #[test]
    #[serial]
    fn test_get_as_typed() {
        let lazy = lazy_with(Arc::new(CountingResolver::default()));
        with_module(Some("mysite.settings"), || {
            let apps: Vec<String> = lazy.get_as("INSTALLED_APPS").unwrap();
            assert_eq!(apps, vec!["blog".to_string()]);

            let port: u16 = lazy.get_as("EMAIL_PORT").unwrap();
            assert_eq!(port, 25);

            assert!(matches!(
                lazy.get_as::<u16>("TIME_ZONE"),
                Err(SettingsError::InvalidValue { .. })
            ));
        });
    }

    #[test]
    #[serial]
    fn test_configure_bypasses_environment() {
        let resolver = Arc::new(CountingResolver::default());
        let lazy = lazy_with(Arc::clone(&resolver));

        lazy.configure(global_defaults(), [("DEBUG", json!(true))])
            .unwrap();
        assert!(lazy.is_configured());

        with_module(None, || {
            assert_eq!(lazy.get("DEBUG").unwrap(), json!(true));
            assert_eq!(lazy.get("TIME_ZONE").unwrap(), json!("America/Chicago"));
            assert_eq!(lazy.get("SETTINGS_MODULE").unwrap(), Value::Null);
            assert_eq!(lazy.settings_module().unwrap(), None);
        });
        assert_eq!(resolver.loads.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_configure_twice_fails() {
        let lazy = LazySettings::new();
        lazy.configure(global_defaults(), [("DEBUG", json!(true))])
            .unwrap();

        let err = lazy
            .configure(global_defaults(), Vec::<(String, Value)>::new())
            .unwrap_err();
        assert!(matches!(err, SettingsError::AlreadyConfigured));
        assert_eq!(lazy.get("DEBUG").unwrap(), json!(true));
    }

    #[test]
    #[serial]
    fn test_configure_after_resolution_fails() {
        let lazy = lazy_with(Arc::new(CountingResolver::default()));
        with_module(Some("mysite.settings"), || {
            lazy.get("DEBUG").unwrap();
        });

        let err = lazy
            .configure(global_defaults(), [("DEBUG", json!(false))])
            .unwrap_err();
        assert!(matches!(err, SettingsError::AlreadyConfigured));
    }

    #[test]
    fn test_configure_with_custom_fallback() {
        let fallback = Arc::new(ManualSettings::new(
            global_defaults(),
            BTreeMap::from([("SITE_ID".to_string(), json!(9))]),
        ));
        let lazy = LazySettings::new();
        lazy.configure(fallback, [("DEBUG", json!(true))]).unwrap();

        assert_eq!(lazy.get("SITE_ID").unwrap(), json!(9));
        assert_eq!(lazy.get("DEBUG").unwrap(), json!(true));
        assert!(lazy.names().unwrap().contains(&"SITE_ID".to_string()));
    }

    #[test]
    #[serial]
    fn test_concurrent_first_access_resolves_once() {
        let resolver = Arc::new(CountingResolver::default());
        let lazy = lazy_with(Arc::clone(&resolver));

        with_module(Some("mysite.settings"), || {
            std::thread::scope(|scope| {
                for _ in 0..8 {
                    scope.spawn(|| {
                        assert_eq!(lazy.get("DEBUG").unwrap(), json!(true));
                    });
                }
            });
        });
        assert_eq!(resolver.loads.load(Ordering::SeqCst), 1);
    }
}
