//! CLI argument parsing with subcommands.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// São Paulo transit status monitor with Telegram delivery.
#[derive(Parser)]
#[command(name = "metro-alerta")]
#[command(about = "Monitors São Paulo rail line status and relays it to Telegram")]
#[command(version)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Run one check cycle and deliver the report
    Check {
        /// Restrict the check to specific line ids (repeatable)
        #[arg(long = "line", value_name = "ID")]
        lines: Vec<String>,

        /// Only notify when some line's status changed since the last run
        #[arg(long)]
        changes_only: bool,

        /// Print the report instead of delivering it
        #[arg(long)]
        dry_run: bool,
    },

    /// Run the Telegram bot for /start, /linha, /todas commands
    Bot,

    /// Show current configuration status
    Status,
}
