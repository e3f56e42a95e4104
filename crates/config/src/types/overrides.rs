//! Partial settings layer read from a settings source.
//!
//! Responsibilities:
//! - Define `SettingsOverrides`, where every well-known setting is optional.
//! - Keep custom ALL-CAPS settings that the schema does not know about.
//! - Coerce a bare string into a one-element list for sequence settings.
//!
//! Does NOT handle:
//! - Locating or reading source files (see `loader::resolver`).
//! - Applying the layer to defaults (see `Settings::merge`).
//!
//! Invariants:
//! - Only ALL-CAPS keys survive `from_mapping`; every other key is dropped.
//! - `extra` never contains a key that the schema declares.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use crate::types::settings::Contact;

/// One layer of settings values; `None` means "not set by this layer".
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "SCREAMING_SNAKE_CASE")]
pub struct SettingsOverrides {
    pub debug: Option<bool>,
    pub template_debug: Option<bool>,
    pub admins: Option<Vec<Contact>>,
    pub managers: Option<Vec<Contact>>,
    pub internal_ips: Option<Vec<String>>,
    pub time_zone: Option<String>,
    pub language_code: Option<String>,
    pub use_i18n: Option<bool>,
    pub site_id: Option<u32>,
    pub default_charset: Option<String>,
    pub default_content_type: Option<String>,
    #[serde(deserialize_with = "one_or_many")]
    pub installed_apps: Option<Vec<String>>,
    #[serde(deserialize_with = "one_or_many")]
    pub template_dirs: Option<Vec<String>>,
    pub middleware_classes: Option<Vec<String>>,
    pub root_urlconf: Option<String>,
    pub secret_key: Option<String>,
    pub append_slash: Option<bool>,
    pub prepend_www: Option<bool>,
    pub database_engine: Option<String>,
    pub database_name: Option<String>,
    pub database_user: Option<String>,
    pub database_host: Option<String>,
    pub database_port: Option<String>,
    pub email_host: Option<String>,
    pub email_port: Option<u16>,
    pub server_email: Option<String>,
    pub email_subject_prefix: Option<String>,
    pub session_cookie_name: Option<String>,
    pub session_cookie_age: Option<u64>,
    pub session_cookie_domain: Option<String>,
    /// Custom settings not declared by the schema.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl SettingsOverrides {
    /// Build a layer from a parsed source mapping.
    ///
    /// Keys that are not ALL-CAPS are ignored before any typing happens, so a
    /// lowercase helper value of any shape never causes an error.
    pub fn from_mapping(mapping: Map<String, Value>) -> Result<Self, serde_json::Error> {
        let filtered: Map<String, Value> = mapping
            .into_iter()
            .filter(|(name, _)| is_setting_name(name))
            .collect();
        serde_json::from_value(Value::Object(filtered))
    }
}

/// Returns true if `name` is an ALL-CAPS setting name.
///
/// A name qualifies when it is non-empty and unchanged by uppercasing, so
/// digits and underscores are allowed and any lowercase letter disqualifies it.
pub fn is_setting_name(name: &str) -> bool {
    !name.is_empty() && name == name.to_uppercase()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

/// Accept either a list of strings or a single string (a forgotten list).
fn one_or_many<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(
        Option::<OneOrMany>::deserialize(deserializer)?.map(|value| match value {
            OneOrMany::One(single) => vec![single],
            OneOrMany::Many(many) => many,
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn mapping(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected an object, got {other}"),
        }
    }

    #[test]
    fn test_is_setting_name() {
        assert!(is_setting_name("DEBUG"));
        assert!(is_setting_name("USE_I18N"));
        assert!(is_setting_name("_PRIVATE"));
        assert!(!is_setting_name(""));
        assert!(!is_setting_name("debug"));
        assert!(!is_setting_name("Debug"));
        assert!(!is_setting_name("helper_value"));
    }

    #[test]
    fn test_bare_string_becomes_single_element_list() {
        let overrides = SettingsOverrides::from_mapping(mapping(json!({
            "INSTALLED_APPS": "blog",
            "TEMPLATE_DIRS": "/srv/templates",
        })))
        .unwrap();

        assert_eq!(overrides.installed_apps, Some(vec!["blog".to_string()]));
        assert_eq!(
            overrides.template_dirs,
            Some(vec!["/srv/templates".to_string()])
        );
    }

    #[test]
    fn test_lowercase_keys_are_ignored() {
        let overrides = SettingsOverrides::from_mapping(mapping(json!({
            "DEBUG": true,
            "debug": "not a bool",
            "helper": {"nested": [1, 2, 3]},
        })))
        .unwrap();

        assert_eq!(overrides.debug, Some(true));
        assert!(overrides.extra.is_empty());
    }

    #[test]
    fn test_custom_settings_land_in_extra() {
        let overrides = SettingsOverrides::from_mapping(mapping(json!({
            "SITE_ID": 3,
            "CACHE_BACKEND": "locmem://",
            "FEATURE_FLAGS": {"beta": true},
        })))
        .unwrap();

        assert_eq!(overrides.site_id, Some(3));
        assert_eq!(overrides.extra.len(), 2);
        assert_eq!(overrides.extra["CACHE_BACKEND"], json!("locmem://"));
        assert!(!overrides.extra.contains_key("SITE_ID"));
    }

    #[test]
    fn test_wrong_type_is_an_error() {
        let result = SettingsOverrides::from_mapping(mapping(json!({"EMAIL_PORT": "smtp"})));
        assert!(result.is_err());
    }

    #[test]
    fn test_null_leaves_setting_unset() {
        let overrides =
            SettingsOverrides::from_mapping(mapping(json!({"TIME_ZONE": null}))).unwrap();
        assert!(overrides.time_zone.is_none());
    }

    #[test]
    fn test_every_sequence_setting_accepts_bare_string() {
        for name in crate::constants::SEQUENCE_SETTINGS {
            let source = Map::from_iter([(name.to_string(), json!("only"))]);
            let layer = SettingsOverrides::from_mapping(source).unwrap();
            let values = crate::types::Settings::default().merge(layer).to_values();
            assert_eq!(values[*name], json!(["only"]), "{name} was not coerced");
        }
    }
}
