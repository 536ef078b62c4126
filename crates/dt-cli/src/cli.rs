//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Daily activity report.
///
/// Reads a computer activity log (app focus, idle, screen and power events)
/// and reports how each day was spent.
#[derive(Debug, Parser)]
#[command(name = "dt", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show time per application and state for each day.
    Report {
        /// Activity log to read. Reads stdin when omitted or `-`.
        log: Option<PathBuf>,

        /// Output as JSON.
        #[arg(long)]
        json: bool,

        /// Hide entries at or below this many minutes (overrides config).
        #[arg(long)]
        threshold_minutes: Option<u32>,
    },

    /// Print decoded log events as JSONL for debugging.
    Events {
        /// Activity log to read. Reads stdin when omitted or `-`.
        log: Option<PathBuf>,
    },
}
