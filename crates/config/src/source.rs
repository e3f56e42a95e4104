//! Finalized settings objects and name-based lookup.
//!
//! Responsibilities:
//! - Define the `SettingsSource` trait used by the lazy proxy for lookups.
//! - Provide `SettingsSnapshot`, the result of loading a settings source.
//! - Provide `ManualSettings`, the holder built by programmatic configuration.
//! - Expose the process-wide built-in defaults (`global_defaults`).
//!
//! Does NOT handle:
//! - Reading settings sources (see `loader` module).
//! - Deciding when resolution happens (see `lazy` module).
//!
//! Invariants:
//! - Both finalized objects are immutable once constructed.
//! - `ManualSettings` consults its overrides first and its fallback second.
//! - `names()` is sorted and contains no duplicates.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::{Arc, OnceLock};

use serde_json::Value;

use crate::constants::SETTINGS_MODULE;
use crate::types::Settings;

/// Read access to a finalized set of settings.
pub trait SettingsSource: Send + Sync + fmt::Debug {
    /// Value of the setting `name`, or `None` if it is not defined.
    fn lookup(&self, name: &str) -> Option<Value>;

    /// Every setting name this source can answer for, sorted.
    fn names(&self) -> Vec<String>;

    /// Dotted path of the settings source this object was loaded from.
    fn settings_module(&self) -> Option<&str>;
}

/// Settings loaded from a source and merged over the defaults.
#[derive(Clone, PartialEq)]
pub struct SettingsSnapshot {
    settings: Settings,
    values: BTreeMap<String, Value>,
    extra: BTreeMap<String, Value>,
    settings_module: Option<String>,
}

impl SettingsSnapshot {
    /// Wrap merged settings.
    ///
    /// `extra` holds custom ALL-CAPS settings outside the schema.
    pub fn new(
        settings: Settings,
        extra: BTreeMap<String, Value>,
        settings_module: Option<String>,
    ) -> Self {
        let values = settings.to_values();
        Self {
            settings,
            values,
            extra,
            settings_module,
        }
    }

    /// The built-in defaults, not tied to any source.
    pub fn defaults() -> Self {
        Self::new(Settings::default(), BTreeMap::new(), None)
    }

    /// Typed view of the schema settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Custom settings outside the schema.
    pub fn extra(&self) -> &BTreeMap<String, Value> {
        &self.extra
    }
}

impl fmt::Debug for SettingsSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SettingsSnapshot")
            .field("settings_module", &self.settings_module)
            .field("extra", &self.extra.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

impl SettingsSource for SettingsSnapshot {
    fn lookup(&self, name: &str) -> Option<Value> {
        if name == SETTINGS_MODULE
            && let Some(module) = &self.settings_module
        {
            return Some(Value::String(module.clone()));
        }
        self.values
            .get(name)
            .or_else(|| self.extra.get(name))
            .cloned()
    }

    fn names(&self) -> Vec<String> {
        let mut names: BTreeSet<String> = self.values.keys().cloned().collect();
        names.extend(self.extra.keys().cloned());
        if self.settings_module.is_some() {
            names.insert(SETTINGS_MODULE.to_string());
        }
        names.into_iter().collect()
    }

    fn settings_module(&self) -> Option<&str> {
        self.settings_module.as_deref()
    }
}

/// Settings configured programmatically, falling back to another source.
pub struct ManualSettings {
    overrides: BTreeMap<String, Value>,
    fallback: Arc<dyn SettingsSource>,
}

impl ManualSettings {
    pub fn new(fallback: Arc<dyn SettingsSource>, overrides: BTreeMap<String, Value>) -> Self {
        Self {
            overrides,
            fallback,
        }
    }

    /// The explicitly configured values.
    pub fn overrides(&self) -> &BTreeMap<String, Value> {
        &self.overrides
    }
}

impl fmt::Debug for ManualSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Values may hold secrets; only show names.
        f.debug_struct("ManualSettings")
            .field("overrides", &self.overrides.keys().collect::<Vec<_>>())
            .field("fallback", &self.fallback)
            .finish()
    }
}

impl SettingsSource for ManualSettings {
    fn lookup(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.overrides.get(name) {
            return Some(value.clone());
        }
        // A manually configured holder has no source module.
        if name == SETTINGS_MODULE {
            return Some(Value::Null);
        }
        self.fallback.lookup(name)
    }

    fn names(&self) -> Vec<String> {
        let mut names: BTreeSet<String> = self.fallback.names().into_iter().collect();
        names.extend(self.overrides.keys().cloned());
        names.insert(SETTINGS_MODULE.to_string());
        names.into_iter().collect()
    }

    fn settings_module(&self) -> Option<&str> {
        self.overrides.get(SETTINGS_MODULE).and_then(Value::as_str)
    }
}

/// Process-wide built-in defaults, created on first use and never mutated.
pub fn global_defaults() -> Arc<dyn SettingsSource> {
    static DEFAULTS: OnceLock<Arc<SettingsSnapshot>> = OnceLock::new();
    let defaults = DEFAULTS.get_or_init(|| Arc::new(SettingsSnapshot::defaults()));
    Arc::clone(defaults) as Arc<dyn SettingsSource>
}
