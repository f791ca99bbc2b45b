//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Serve command arguments.
#[derive(Debug, Args)]
pub struct ServeCommand {
    /// Bind address for the HTTP API (overrides configuration)
    #[arg(short, long, value_name = "ADDR")]
    pub bind: Option<String>,
}

/// Add command arguments.
#[derive(Debug, Args)]
pub struct AddCommand {
    /// Category label for the entry
    pub category: String,

    /// The feedback message
    pub message: String,
}

/// List command arguments.
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,

    /// Maximum number of entries to print
    #[arg(short, long)]
    pub limit: Option<usize>,
}

/// Ask command arguments.
#[derive(Debug, Args)]
pub struct AskCommand {
    /// The question to answer over stored feedback
    pub question: String,
}

/// Topic command arguments.
#[derive(Debug, Args)]
pub struct TopicCommand {
    /// The topic whose frequency should be estimated
    pub topic: String,
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
