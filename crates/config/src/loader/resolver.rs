//! Resolution of dotted paths to settings sources and packages.
//!
//! Responsibilities:
//! - Define the `ModuleResolver` trait used by the loader.
//! - Provide `FsModuleResolver`, which maps dotted paths onto files and
//!   directories below an ordered list of search roots.
//! - Parse JSON and YAML settings sources into a `SettingsOverrides` layer.
//!
//! Does NOT handle:
//! - Merging layers over defaults (see builder.rs).
//! - Filtering package entries for wildcard expansion (see expand.rs).
//!
//! Invariants:
//! - `a.b.c` resolves to `<root>/a/b/c.{json,yaml,yml}`; first root wins, then first extension.
//! - Packages resolve to directories `<root>/a/b`.
//! - Every dotted path segment is an identifier: `[A-Za-z_][A-Za-z0-9_]*`.
//! - An empty YAML document is an empty settings source.

use std::fmt;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use super::env::search_path_from_env;
use super::error::ImportError;
use crate::constants::SOURCE_EXTENSIONS;
use crate::types::SettingsOverrides;

/// One entry found inside a package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageEntry {
    pub name: String,
    pub is_dir: bool,
}

/// Turns dotted paths into settings layers and package listings.
pub trait ModuleResolver: Send + Sync + fmt::Debug {
    /// Load the settings source named by `module`.
    fn load_module(&self, module: &str) -> Result<SettingsOverrides, ImportError>;

    /// List the entries inside the package named by `package`, in any order.
    fn package_entries(&self, package: &str) -> Result<Vec<PackageEntry>, ImportError>;
}

/// Resolver backed by directories on disk.
#[derive(Debug, Clone)]
pub struct FsModuleResolver {
    roots: Vec<PathBuf>,
}

impl FsModuleResolver {
    pub fn new(roots: Vec<PathBuf>) -> Self {
        Self { roots }
    }

    /// Use `SITE_SETTINGS_PATH`, or the current directory when unset.
    pub fn from_env() -> Self {
        Self::new(search_path_from_env().unwrap_or_else(|| vec![PathBuf::from(".")]))
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    fn find_source(&self, module: &str) -> Result<PathBuf, ImportError> {
        let relative = relative_path(module)?;
        for root in &self.roots {
            let base = root.join(&relative);
            for ext in SOURCE_EXTENSIONS {
                let candidate = base.with_extension(ext);
                if candidate.is_file() {
                    return Ok(candidate);
                }
            }
        }
        Err(ImportError::NotFound {
            module: module.to_string(),
            searched: self.roots.clone(),
        })
    }

    fn find_package(&self, package: &str) -> Result<PathBuf, ImportError> {
        let relative = relative_path(package)?;
        self.roots
            .iter()
            .map(|root| root.join(&relative))
            .find(|dir| dir.is_dir())
            .ok_or_else(|| ImportError::NotAPackage {
                package: package.to_string(),
                searched: self.roots.clone(),
            })
    }
}

impl Default for FsModuleResolver {
    fn default() -> Self {
        Self::from_env()
    }
}

impl ModuleResolver for FsModuleResolver {
    fn load_module(&self, module: &str) -> Result<SettingsOverrides, ImportError> {
        let path = self.find_source(module)?;
        debug!(module = %module, path = %path.display(), "Reading settings source");
        read_source(&path)
    }

    fn package_entries(&self, package: &str) -> Result<Vec<PackageEntry>, ImportError> {
        let dir = self.find_package(package)?;
        let read_err = |source| ImportError::Read {
            path: dir.clone(),
            source,
        };

        let mut entries = Vec::new();
        for entry in std::fs::read_dir(&dir).map_err(read_err)? {
            let entry = entry.map_err(read_err)?;
            // Names that are not valid UTF-8 can never form a dotted path.
            let Ok(name) = entry.file_name().into_string() else {
                continue;
            };
            entries.push(PackageEntry {
                name,
                is_dir: entry.path().is_dir(),
            });
        }
        Ok(entries)
    }
}

/// Check a dotted path and turn it into a relative filesystem path.
fn relative_path(dotted: &str) -> Result<PathBuf, ImportError> {
    let invalid = || ImportError::InvalidModulePath {
        module: dotted.to_string(),
    };

    let mut path = PathBuf::new();
    for segment in dotted.split('.') {
        if !is_identifier(segment) {
            return Err(invalid());
        }
        path.push(segment);
    }
    Ok(path)
}

fn is_identifier(segment: &str) -> bool {
    let mut chars = segment.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Parse a settings source file into a layer.
fn read_source(path: &Path) -> Result<SettingsOverrides, ImportError> {
    let content = std::fs::read_to_string(path).map_err(|source| ImportError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let is_json = path.extension().is_some_and(|ext| ext == "json");
    let value: Value = if is_json {
        serde_json::from_str(&content).map_err(|source| ImportError::ParseJson {
            path: path.to_path_buf(),
            source,
        })?
    } else {
        serde_yaml::from_str(&content).map_err(|source| ImportError::ParseYaml {
            path: path.to_path_buf(),
            source,
        })?
    };

    let mapping = match value {
        Value::Object(map) => map,
        Value::Null if !is_json => serde_json::Map::new(),
        _ => {
            return Err(ImportError::NotAMapping {
                path: path.to_path_buf(),
            });
        }
    };

    SettingsOverrides::from_mapping(mapping).map_err(|source| ImportError::InvalidSetting {
        path: path.to_path_buf(),
        source,
    })
}
