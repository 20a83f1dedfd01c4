//! Command line definitions.

use clap::{Parser, Subcommand};

/// ShareSync: replicates shared files to remote accounts
#[derive(Debug, Parser)]
#[command(name = "sharesync", version, about, long_about = None)]
pub struct Cli {
    /// Directory holding default.toml and environment overlays
    #[arg(short, long, default_value = "config", env = "SHARESYNC_CONFIG_DIR")]
    pub config_dir: String,

    /// Environment overlay to load on top of default.toml
    #[arg(short, long, default_value = "development", env = "SHARESYNC_ENV")]
    pub env: String,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Commands {
    /// Run the share worker on its cron schedule until interrupted
    Run,
    /// Run the share worker once and exit
    Once,
    /// Apply pending database migrations and exit
    Migrate,
}
