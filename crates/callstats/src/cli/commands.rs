//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Interactive menu arguments.
#[derive(Debug, Default, Args)]
pub struct MenuCommand {
    /// Initialize the store from this data file instead of prompting
    #[arg(short, long, value_name = "FILE")]
    pub load: Option<PathBuf>,
}

/// Show command arguments.
#[derive(Debug, Args)]
pub struct ShowCommand {
    /// Call data file to load
    pub file: PathBuf,

    /// Print records as loaded, without recalculating billing
    #[arg(long)]
    pub raw: bool,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Search command arguments.
#[derive(Debug, Args)]
pub struct SearchCommand {
    /// Call data file to load
    pub file: PathBuf,

    /// Cell phone number to look up
    pub number: String,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Export command arguments.
#[derive(Debug, Args)]
pub struct ExportCommand {
    /// Call data file to load
    pub file: PathBuf,

    /// Output file (defaults to the configured export path)
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Export records as loaded, without recalculating billing
    #[arg(long)]
    pub raw: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}
