//! Command-line interface for callstats.
//!
//! This module provides the CLI structure for the `callstats` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::logging::Verbosity;

pub use commands::{ConfigCommand, ExportCommand, MenuCommand, SearchCommand, ShowCommand};

/// callstats - Cell phone call billing records
///
/// Loads call records from a data file, prices them by relay stations and
/// call length, and searches, edits or exports them.
#[derive(Debug, Parser)]
#[command(name = "callstats")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute (defaults to the interactive menu)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the interactive menu
    Menu(MenuCommand),

    /// Print every record in a data file
    Show(ShowCommand),

    /// Print the records and totals for one phone number
    Search(SearchCommand),

    /// Recalculate a data file and write the export file
    Export(ExportCommand),

    /// Print the relay-station tax brackets
    Rates,

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else {
            match self.verbose {
                0 => Verbosity::Normal,
                1 => Verbosity::Verbose,
                _ => Verbosity::Trace,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn cli_with(verbose: u8, quiet: bool) -> Cli {
        Cli {
            config: None,
            verbose,
            quiet,
            command: None,
        }
    }

    #[test]
    fn test_cli_name() {
        let cli = Cli::command();
        assert_eq!(cli.get_name(), "callstats");
    }

    #[test]
    fn test_cli_verify() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_verbosity_flags() {
        assert_eq!(cli_with(0, true).verbosity(), Verbosity::Quiet);
        assert_eq!(cli_with(0, false).verbosity(), Verbosity::Normal);
        assert_eq!(cli_with(1, false).verbosity(), Verbosity::Verbose);
        assert_eq!(cli_with(2, false).verbosity(), Verbosity::Trace);
    }

    #[test]
    fn test_parse_no_subcommand() {
        let cli = Cli::try_parse_from(["callstats"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_parse_menu_with_load() {
        let cli = Cli::try_parse_from(["callstats", "menu", "--load", "calls.txt"]).unwrap();
        match cli.command {
            Some(Command::Menu(cmd)) => assert_eq!(cmd.load, Some(PathBuf::from("calls.txt"))),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_search() {
        let cli = Cli::try_parse_from(["callstats", "search", "calls.txt", "555-0100"]).unwrap();
        match cli.command {
            Some(Command::Search(cmd)) => {
                assert_eq!(cmd.file, PathBuf::from("calls.txt"));
                assert_eq!(cmd.number, "555-0100");
                assert!(!cmd.json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_export_output() {
        let cli =
            Cli::try_parse_from(["callstats", "export", "calls.txt", "-o", "out.txt", "--raw"])
                .unwrap();
        match cli.command {
            Some(Command::Export(cmd)) => {
                assert_eq!(cmd.output, Some(PathBuf::from("out.txt")));
                assert!(cmd.raw);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_rates() {
        let cli = Cli::try_parse_from(["callstats", "rates"]).unwrap();
        assert!(matches!(cli.command, Some(Command::Rates)));
    }

    #[test]
    fn test_parse_with_config() {
        let cli =
            Cli::try_parse_from(["callstats", "-c", "/custom/config.toml", "rates"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/custom/config.toml")));
    }

    #[test]
    fn test_parse_with_verbose_and_quiet() {
        let cli = Cli::try_parse_from(["callstats", "-vv", "rates"]).unwrap();
        assert_eq!(cli.verbose, 2);

        let cli = Cli::try_parse_from(["callstats", "-q", "rates"]).unwrap();
        assert!(cli.quiet);
    }
}
