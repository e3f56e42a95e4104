//! Shared test utilities for site-settings integration tests.
//!
//! Responsibilities:
//! - Provide a hermetic CLI command factory that prevents dotenv loading.
//! - Build small settings trees on disk for the CLI to resolve.
//!
//! Invariants / Assumptions:
//! - All integration tests using this helper will be hermetic by default.
//! - `SITE_SETTINGS_MODULE` and `SITE_SETTINGS_PATH` are cleared unless a test sets them.

use std::fs;

use assert_cmd::Command;
use tempfile::TempDir;

/// Returns a hermetic `site-settings` command for integration testing.
///
/// It ensures:
/// - `DOTENV_DISABLED=1` is set to prevent local `.env` contamination.
/// - Settings variables are cleared to ensure no leakage from the host.
pub fn site_cmd() -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("site-settings");

    // Hermeticity: prevent loading local .env
    cmd.env("DOTENV_DISABLED", "1");

    // Clear potential host leakage
    cmd.env_remove("SITE_SETTINGS_MODULE")
        .env_remove("SITE_SETTINGS_PATH")
        .env_remove("RUST_LOG");

    cmd
}

/// Returns a hermetic command that resolves `mysite.settings` below `site`.
#[allow(dead_code)]
pub fn site_cmd_for(site: &TempDir) -> Command {
    let mut cmd = site_cmd();
    cmd.env("SITE_SETTINGS_MODULE", "mysite.settings")
        .env("SITE_SETTINGS_PATH", site.path());
    cmd
}

/// A settings tree with `mysite/settings.yaml` and a `contrib` package
/// holding two apps.
#[allow(dead_code)]
pub fn site_tree() -> TempDir {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    fs::create_dir_all(root.join("mysite")).unwrap();
    fs::create_dir_all(root.join("contrib/auth")).unwrap();
    fs::create_dir_all(root.join("contrib/admin")).unwrap();
    fs::create_dir_all(root.join("contrib/_private")).unwrap();
    fs::write(root.join("contrib/README"), "not an app").unwrap();
    fs::write(
        root.join("mysite/settings.yaml"),
        "DEBUG: true\n\
         TIME_ZONE: UTC\n\
         INSTALLED_APPS:\n  - mysite.blog\n  - contrib.*\n\
         GREETING: hello\n\
         lowercase_helper: ignored\n",
    )
    .unwrap();
    temp
}
