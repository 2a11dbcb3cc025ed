//! Main CLI parser and top-level argument handling.
//!
//! This module defines the root CLI structure with global options.

use std::path::PathBuf;

use clap::Parser;

use crate::commands::Commands;

/// Command-line interface for browsing an AI model marketplace catalog.
///
/// This is the top-level parser that handles global options and dispatches
/// to subcommands.
#[derive(Parser)]
#[command(name = "modelmart")]
#[command(about = "Search, filter and page through an AI model catalog")]
#[command(version)]
pub struct Cli {
    /// Catalog JSON file (defaults to a built-in sample catalog)
    #[arg(long, env = "MODELMART_CATALOG", global = true)]
    pub catalog: Option<PathBuf>,

    /// Browse settings JSON file
    #[arg(long, env = "MODELMART_SETTINGS", global = true)]
    pub settings: Option<PathBuf>,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parser_builds() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_args() {
        let cli = Cli::parse_from([
            "modelmart",
            "--verbose",
            "--catalog",
            "/tmp/catalog.json",
            "facets",
        ]);
        assert!(cli.verbose);
        assert_eq!(cli.catalog, Some(PathBuf::from("/tmp/catalog.json")));
        assert!(matches!(cli.command, Some(Commands::Facets { json: false })));
    }

    #[test]
    fn test_global_args_after_subcommand() {
        let cli = Cli::parse_from(["modelmart", "sample", "--settings", "s.json"]);
        assert_eq!(cli.settings, Some(PathBuf::from("s.json")));
    }

    #[test]
    fn test_no_subcommand() {
        let cli = Cli::parse_from(["modelmart"]);
        assert!(cli.command.is_none());
    }
}
