//! CLI argument definitions and parsing.
//!
//! Responsibilities:
//! - Define the CLI structure using clap derive macros.
//! - Parse command-line arguments and environment variables.
//!
//! Non-responsibilities:
//! - Does not execute commands (see `commands` module).
//! - Does not resolve settings (see `site_config::settings`).

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "site-settings")]
#[command(about = "Inspect the settings a site resolves to", long_about = None)]
#[command(version)]
#[command(
    after_help = "Examples:\n  site-settings --settings mysite.settings show\n  site-settings show TIME_ZONE -o json\n  site-settings diff\n  site-settings --search-path ./conf check\n"
)]
pub struct Cli {
    /// Dotted path of the settings source (e.g., mysite.settings)
    #[arg(short, long, global = true, env = "SITE_SETTINGS_MODULE")]
    pub settings: Option<String>,

    /// Directory searched for settings sources (repeatable).
    ///
    /// Defaults to SITE_SETTINGS_PATH, or the current directory.
    #[arg(long = "search-path", global = true, value_name = "DIR")]
    pub search_path: Vec<PathBuf>,

    /// Output format (table, json, yaml)
    #[arg(short, long, global = true, default_value = "table")]
    pub output: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show one setting, or every setting
    Show {
        /// Setting name (e.g., TIME_ZONE)
        name: Option<String>,
    },
    /// Show only settings that differ from the built-in defaults
    Diff,
    /// Resolve settings and report where they came from
    Check,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_show_with_name() {
        let cli = Cli::try_parse_from(["site-settings", "show", "DEBUG", "-o", "json"]).unwrap();
        assert_eq!(cli.output, "json");
        assert!(matches!(cli.command, Commands::Show { name: Some(ref n) } if n == "DEBUG"));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "site-settings",
            "diff",
            "--settings",
            "mysite.settings",
            "--search-path",
            "/srv/a",
            "--search-path",
            "/srv/b",
        ])
        .unwrap();
        assert_eq!(cli.settings.as_deref(), Some("mysite.settings"));
        assert_eq!(
            cli.search_path,
            vec![PathBuf::from("/srv/a"), PathBuf::from("/srv/b")]
        );
        assert!(matches!(cli.command, Commands::Diff));
    }
}
