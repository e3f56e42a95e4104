//! Centralized constants for the settings system.
//!
//! This module contains environment variable names, file extensions, and the
//! default values of the built-in settings schema, so that the loader, the
//! schema, and the CLI agree on them.

// =============================================================================
// Environment Variables
// =============================================================================

/// Environment variable naming the settings source to load (a dotted path).
pub const ENVIRONMENT_VARIABLE: &str = "SITE_SETTINGS_MODULE";

/// Environment variable listing the roots searched for settings sources.
///
/// Uses the platform path-list syntax (`:` on Unix, `;` on Windows).
pub const SEARCH_PATH_VARIABLE: &str = "SITE_SETTINGS_PATH";

/// Environment variable that disables `.env` loading when set to `1` or `true`.
pub const DOTENV_DISABLED_VARIABLE: &str = "DOTENV_DISABLED";

/// Process time zone variable written after settings are loaded.
pub const TIME_ZONE_VARIABLE: &str = "TZ";

// =============================================================================
// Settings Source Resolution
// =============================================================================

/// File extensions tried, in order, when resolving a settings source.
pub const SOURCE_EXTENSIONS: &[&str] = &["json", "yaml", "yml"];

/// Suffix marking an installed-apps entry for wildcard expansion.
pub const WILDCARD_SUFFIX: &str = ".*";

/// Pseudo-setting holding the dotted path of the loaded settings source.
pub const SETTINGS_MODULE: &str = "SETTINGS_MODULE";

/// Settings that are coerced to a one-element sequence when given as a string.
pub const SEQUENCE_SETTINGS: &[&str] = &["INSTALLED_APPS", "TEMPLATE_DIRS"];

// =============================================================================
// Built-in Defaults
// =============================================================================

/// Default time zone.
pub const DEFAULT_TIME_ZONE: &str = "America/Chicago";

/// Default language code.
pub const DEFAULT_LANGUAGE_CODE: &str = "en-us";

/// Default site identifier.
pub const DEFAULT_SITE_ID: u32 = 1;

/// Default response charset.
pub const DEFAULT_CHARSET: &str = "utf-8";

/// Default response content type.
pub const DEFAULT_CONTENT_TYPE: &str = "text/html";

/// Default outgoing mail host.
pub const DEFAULT_EMAIL_HOST: &str = "localhost";

/// Default outgoing mail port.
pub const DEFAULT_EMAIL_PORT: u16 = 25;

/// Default sender address for error mails.
pub const DEFAULT_SERVER_EMAIL: &str = "root@localhost";

/// Default subject prefix for mails sent to admins and managers.
pub const DEFAULT_EMAIL_SUBJECT_PREFIX: &str = "[Site] ";

/// Default session cookie name.
pub const DEFAULT_SESSION_COOKIE_NAME: &str = "sessionid";

/// Default session cookie age in seconds (2 weeks).
pub const DEFAULT_SESSION_COOKIE_AGE_SECS: u64 = 1_209_600;

/// Middleware installed when a settings source does not list its own.
pub const DEFAULT_MIDDLEWARE_CLASSES: &[&str] = &[
    "site.middleware.common.CommonMiddleware",
    "site.contrib.sessions.middleware.SessionMiddleware",
    "site.contrib.auth.middleware.AuthenticationMiddleware",
    "site.middleware.doc.XViewMiddleware",
];
