//! The built-in settings schema.
//!
//! Responsibilities:
//! - Define `Settings`, the explicit set of well-known settings with their types.
//! - Provide the built-in defaults (`Settings::default()`).
//! - Merge a `SettingsOverrides` layer over a `Settings` value.
//!
//! Does NOT handle:
//! - Reading settings sources from disk (see `loader` module).
//! - Wildcard expansion of installed apps (see `loader::expand`).
//!
//! Invariants:
//! - Every field serializes under its ALL-CAPS setting name.
//! - `merge` replaces a field only when the override layer provides it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants::{
    DEFAULT_CHARSET, DEFAULT_CONTENT_TYPE, DEFAULT_EMAIL_HOST, DEFAULT_EMAIL_PORT,
    DEFAULT_EMAIL_SUBJECT_PREFIX, DEFAULT_LANGUAGE_CODE, DEFAULT_MIDDLEWARE_CLASSES,
    DEFAULT_SERVER_EMAIL, DEFAULT_SESSION_COOKIE_AGE_SECS, DEFAULT_SESSION_COOKIE_NAME,
    DEFAULT_SITE_ID, DEFAULT_TIME_ZONE,
};
use crate::types::overrides::SettingsOverrides;

/// A `(name, email)` pair used by `ADMINS` and `MANAGERS`.
pub type Contact = (String, String);

/// Well-known settings and their values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "SCREAMING_SNAKE_CASE")]
pub struct Settings {
    pub debug: bool,
    pub template_debug: bool,
    /// People who get code error notifications.
    pub admins: Vec<Contact>,
    /// People who get broken link notifications.
    pub managers: Vec<Contact>,
    /// Client addresses allowed to see debug output and internal headers.
    pub internal_ips: Vec<String>,
    pub time_zone: String,
    pub language_code: String,
    pub use_i18n: bool,
    pub site_id: u32,
    pub default_charset: String,
    pub default_content_type: String,
    /// Installed application packages; may contain `pkg.*` wildcards before loading.
    pub installed_apps: Vec<String>,
    pub template_dirs: Vec<String>,
    pub middleware_classes: Vec<String>,
    pub root_urlconf: Option<String>,
    pub secret_key: String,
    pub append_slash: bool,
    pub prepend_www: bool,
    pub database_engine: String,
    pub database_name: String,
    pub database_user: String,
    pub database_host: String,
    pub database_port: String,
    pub email_host: String,
    pub email_port: u16,
    pub server_email: String,
    pub email_subject_prefix: String,
    pub session_cookie_name: String,
    /// Session cookie age in seconds.
    pub session_cookie_age: u64,
    pub session_cookie_domain: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debug: false,
            template_debug: false,
            admins: Vec::new(),
            managers: Vec::new(),
            internal_ips: Vec::new(),
            time_zone: DEFAULT_TIME_ZONE.to_string(),
            language_code: DEFAULT_LANGUAGE_CODE.to_string(),
            use_i18n: true,
            site_id: DEFAULT_SITE_ID,
            default_charset: DEFAULT_CHARSET.to_string(),
            default_content_type: DEFAULT_CONTENT_TYPE.to_string(),
            installed_apps: Vec::new(),
            template_dirs: Vec::new(),
            middleware_classes: DEFAULT_MIDDLEWARE_CLASSES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            root_urlconf: None,
            secret_key: String::new(),
            append_slash: true,
            prepend_www: false,
            database_engine: String::new(),
            database_name: String::new(),
            database_user: String::new(),
            database_host: String::new(),
            database_port: String::new(),
            email_host: DEFAULT_EMAIL_HOST.to_string(),
            email_port: DEFAULT_EMAIL_PORT,
            server_email: DEFAULT_SERVER_EMAIL.to_string(),
            email_subject_prefix: DEFAULT_EMAIL_SUBJECT_PREFIX.to_string(),
            session_cookie_name: DEFAULT_SESSION_COOKIE_NAME.to_string(),
            session_cookie_age: DEFAULT_SESSION_COOKIE_AGE_SECS,
            session_cookie_domain: None,
        }
    }
}

impl Settings {
    /// Apply an override layer, field by field.
    ///
    /// Fields the layer leaves unset keep their current value. Custom settings
    /// in `o.extra` are not part of the schema and are ignored here.
    pub fn merge(self, o: SettingsOverrides) -> Self {
        Self {
            debug: o.debug.unwrap_or(self.debug),
            template_debug: o.template_debug.unwrap_or(self.template_debug),
            admins: o.admins.unwrap_or(self.admins),
            managers: o.managers.unwrap_or(self.managers),
            internal_ips: o.internal_ips.unwrap_or(self.internal_ips),
            time_zone: o.time_zone.unwrap_or(self.time_zone),
            language_code: o.language_code.unwrap_or(self.language_code),
            use_i18n: o.use_i18n.unwrap_or(self.use_i18n),
            site_id: o.site_id.unwrap_or(self.site_id),
            default_charset: o.default_charset.unwrap_or(self.default_charset),
            default_content_type: o.default_content_type.unwrap_or(self.default_content_type),
            installed_apps: o.installed_apps.unwrap_or(self.installed_apps),
            template_dirs: o.template_dirs.unwrap_or(self.template_dirs),
            middleware_classes: o.middleware_classes.unwrap_or(self.middleware_classes),
            root_urlconf: o.root_urlconf.or(self.root_urlconf),
            secret_key: o.secret_key.unwrap_or(self.secret_key),
            append_slash: o.append_slash.unwrap_or(self.append_slash),
            prepend_www: o.prepend_www.unwrap_or(self.prepend_www),
            database_engine: o.database_engine.unwrap_or(self.database_engine),
            database_name: o.database_name.unwrap_or(self.database_name),
            database_user: o.database_user.unwrap_or(self.database_user),
            database_host: o.database_host.unwrap_or(self.database_host),
            database_port: o.database_port.unwrap_or(self.database_port),
            email_host: o.email_host.unwrap_or(self.email_host),
            email_port: o.email_port.unwrap_or(self.email_port),
            server_email: o.server_email.unwrap_or(self.server_email),
            email_subject_prefix: o.email_subject_prefix.unwrap_or(self.email_subject_prefix),
            session_cookie_name: o.session_cookie_name.unwrap_or(self.session_cookie_name),
            session_cookie_age: o.session_cookie_age.unwrap_or(self.session_cookie_age),
            session_cookie_domain: o.session_cookie_domain.or(self.session_cookie_domain),
        }
    }

    /// Every field as a `(SETTING_NAME, value)` map.
    pub fn to_values(&self) -> BTreeMap<String, Value> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map.into_iter().collect(),
            _ => BTreeMap::new(),
        }
    }
}
