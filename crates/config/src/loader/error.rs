//! Error types for settings loading.
//!
//! Responsibilities:
//! - Define error variants for every settings resolution failure.
//! - Define `ImportError`, the cause carried by `SettingsError::SourceUnloadable`.
//!
//! Does NOT handle:
//! - Mapping errors to process exit codes (see the CLI crate).
//!
//! Invariants:
//! - A missing or empty settings variable is always `SourceUndefined`, never an import error.
//! - Import failures keep their underlying cause reachable through `source()`.
//! - Dotenv errors NEVER include raw .env line contents to prevent secret leakage.

use std::io::ErrorKind;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while resolving or reading settings.
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Settings cannot be loaded, because environment variable {var} is undefined.")]
    SourceUndefined { var: &'static str },

    #[error(
        "Could not load settings '{module}' (Is it on the search path? Does it have syntax errors?): {source}"
    )]
    SourceUnloadable {
        module: String,
        #[source]
        source: ImportError,
    },

    #[error("Settings already configured.")]
    AlreadyConfigured,

    #[error("Setting '{0}' is not defined")]
    UnknownSetting(String),

    #[error("Invalid value for {name}: {message}")]
    InvalidValue { name: String, message: String },

    /// Failed to parse the `.env` file due to invalid syntax.
    ///
    /// SAFETY: This error only includes the byte index of the parse failure,
    /// NOT the offending line content, to prevent leaking secrets.
    #[error(
        "Failed to parse .env file at position {error_index}. Hint: set DOTENV_DISABLED=1 to skip .env loading"
    )]
    DotenvParse { error_index: usize },

    /// Failed to read the `.env` file due to an I/O error.
    #[error("Failed to read .env file: {kind}")]
    DotenvIo { kind: ErrorKind },

    /// Unknown dotenv error (future variants from dotenvy crate).
    #[error("Failed to load .env file. Hint: set DOTENV_DISABLED=1 to skip .env loading")]
    DotenvUnknown,
}

/// Errors raised while turning a dotted path into a settings source.
#[derive(Error, Debug)]
pub enum ImportError {
    #[error("'{module}' is not a valid dotted path")]
    InvalidModulePath { module: String },

    #[error("no settings source named '{module}' in {}", display_roots(.searched))]
    NotFound {
        module: String,
        searched: Vec<PathBuf>,
    },

    #[error("no package named '{package}' in {}", display_roots(.searched))]
    NotAPackage {
        package: String,
        searched: Vec<PathBuf>,
    },

    #[error("failed to read {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}")]
    ParseJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to parse {path}")]
    ParseYaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("{path} must contain a mapping of setting names to values")]
    NotAMapping { path: PathBuf },

    #[error("invalid setting in {path}: {source}")]
    InvalidSetting {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

fn display_roots(roots: &[PathBuf]) -> String {
    if roots.is_empty() {
        return "an empty search path".to_string();
    }
    let joined = roots
        .iter()
        .map(|root| root.display().to_string())
        .collect::<Vec<_>>()
        .join(", ");
    format!("[{joined}]")
}
