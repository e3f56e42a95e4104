//! Output formatting for CLI commands.
//!
//! Responsibilities:
//! - Render a single setting value or a set of settings as table, JSON, or YAML.
//!
//! Does NOT handle:
//! - Direct printing to stdout (returns formatted strings).
//!
//! Invariants:
//! - JSON and YAML output is always parseable, even when empty.
//! - Table output prints `No settings found.` for an empty set.
//! - Every rendered string ends with a newline.

use std::collections::BTreeMap;

use anyhow::Result;
use serde_json::Value;

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    Yaml,
}

impl OutputFormat {
    /// Parse from string.
    pub fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "yaml" | "yml" => Ok(OutputFormat::Yaml),
            _ => anyhow::bail!("Invalid output format: {}. Valid options: table, json, yaml", s),
        }
    }
}

/// Render one setting value.
pub fn format_value(format: OutputFormat, value: &Value) -> Result<String> {
    let rendered = match format {
        OutputFormat::Table => table_cell(value),
        OutputFormat::Json => serde_json::to_string_pretty(value)?,
        OutputFormat::Yaml => serde_yaml::to_string(value)?,
    };
    Ok(with_newline(rendered))
}

/// Render a set of settings keyed by name.
pub fn format_settings(format: OutputFormat, settings: &BTreeMap<String, Value>) -> Result<String> {
    let rendered = match format {
        OutputFormat::Table => {
            if settings.is_empty() {
                return Ok("No settings found.\n".to_string());
            }
            let width = settings.keys().map(String::len).max().unwrap_or(0);
            settings
                .iter()
                .map(|(name, value)| format!("{name:<width$} = {}", table_cell(value)))
                .collect::<Vec<_>>()
                .join("\n")
        }
        OutputFormat::Json => serde_json::to_string_pretty(settings)?,
        OutputFormat::Yaml => serde_yaml::to_string(settings)?,
    };
    Ok(with_newline(rendered))
}

/// Strings print bare; everything else prints as compact JSON.
fn table_cell(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn with_newline(mut s: String) -> String {
    if !s.ends_with('\n') {
        s.push('\n');
    }
    s
}
