//! Tests for the settings loader builder.
//!
//! Responsibilities:
//! - Test merging of settings sources over defaults.
//! - Test environment-driven resolution and its error cases.
//! - Test wildcard expansion against real directory trees.
//! - Test `.env` loading and time zone export.
//!
//! Invariants:
//! - Tests use `serial_test` to prevent environment variable pollution.
//! - Tests use `global_test_lock()` for additional synchronization.
//! - Temporary directories are cleaned up automatically via `tempfile`.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::loader::SettingsLoader;


/// Returns the global test lock for environment variable isolation.
pub fn env_lock() -> &'static Mutex<()> {
    crate::test_util::global_test_lock()
}

/// Write `content` to `relative` below `root`, creating parent directories.
pub fn write_source(root: &Path, relative: &str, content: &str) -> PathBuf {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, content).unwrap();
    path
}

/// A loader searching only `root`, with time zone export disabled.
pub fn loader_for(root: &Path) -> SettingsLoader {
    SettingsLoader::new()
        .with_search_path(vec![root.to_path_buf()])
        .with_time_zone_export(false)
}
