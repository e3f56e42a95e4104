//! site-settings - inspect the settings a site resolves to.
//!
//! Responsibilities:
//! - Parse command-line arguments and environment variables.
//! - Resolve settings through the shared `site-config` library.
//! - Format and display results as table, JSON, or YAML.
//!
//! Does NOT handle:
//! - Settings resolution itself (see `crates/config`).
//!
//! Invariants:
//! - `load_dotenv()` is called BEFORE CLI parsing to allow `.env` to provide clap defaults.
//! - `--settings` and `--search-path` are written to the environment before
//!   any thread starts, so the lazy settings handle sees them.

mod args;
mod commands;
mod error;
mod output;

use std::path::PathBuf;

use anyhow::{Context, Result};
use args::{Cli, Commands};
use clap::Parser;
use error::{ExitCode, ExitCodeExt};
use site_config::{ENVIRONMENT_VARIABLE, SEARCH_PATH_VARIABLE, SettingsLoader, settings};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() {
    // Load .env file BEFORE CLI parsing so clap env defaults can read .env values
    if let Err(e) = SettingsLoader::new().load_dotenv() {
        eprintln!("Failed to load environment: {}", e);
        std::process::exit(ExitCode::GeneralError.as_i32());
    }

    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(e.exit_code().as_i32());
    }
}

fn run(cli: Cli) -> Result<()> {
    export_overrides(cli.settings.as_deref(), &cli.search_path)?;

    let settings = settings();
    match cli.command {
        Commands::Show { name } => commands::show::run(settings, name.as_deref(), &cli.output),
        Commands::Diff => commands::diff::run(settings, &cli.output),
        Commands::Check => commands::check::run(settings),
    }
}

/// Publish command-line overrides where the settings loader reads them.
fn export_overrides(module: Option<&str>, search_path: &[PathBuf]) -> Result<()> {
    let joined = if search_path.is_empty() {
        None
    } else {
        Some(std::env::join_paths(search_path).context("Invalid --search-path")?)
    };

    // SAFETY: called from main before settings are resolved and before any
    // other thread exists.
    unsafe {
        if let Some(module) = module {
            std::env::set_var(ENVIRONMENT_VARIABLE, module);
        }
        if let Some(joined) = joined {
            std::env::set_var(SEARCH_PATH_VARIABLE, joined);
        }
    }
    Ok(())
}
