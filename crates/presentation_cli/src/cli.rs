//! Command-line arguments

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use domain::WidgetId;

/// Exit status of `refresh` when the cycle asks to be retried (EX_TEMPFAIL)
pub const EXIT_RETRY: u8 = 75;

/// PWS widget refresher
#[derive(Debug, Parser)]
#[command(name = "pws-widget")]
#[command(author, version, about = "Personal weather station widget refresher", long_about = None)]
pub struct Cli {
    /// Verbosity level
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file (default: ./config.toml when present)
    #[arg(short, long, global = true, env = "PWSWIDGET_CONFIG")]
    pub config: Option<PathBuf>,

    /// Keep preferences in memory only
    #[arg(long, global = true)]
    pub ephemeral: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Subcommands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run one refresh cycle
    ///
    /// Exits with status 75 when the cycle should be retried later.
    Refresh {
        /// Treat the run as a user request
        #[arg(short, long)]
        force: bool,

        /// Widget that asked for the refresh (implies --force)
        #[arg(short, long, value_name = "ID")]
        target: Option<WidgetId>,
    },

    /// Refresh on the configured cron schedule until interrupted
    Daemon,

    /// Print the stored widget data without fetching
    Show {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Store the station credentials
    Configure {
        /// Weather.com API key
        #[arg(long, env = "PWSWIDGET_API_KEY", hide_env_values = true)]
        api_key: String,

        /// Station identifier, e.g. IMADRID123
        #[arg(long)]
        station_id: String,
    },
}

/// Determine log filter level from verbosity count
pub const fn log_filter_from_verbosity(verbose: u8) -> Option<&'static str> {
    match verbose {
        0 => None,
        1 => Some("debug"),
        _ => Some("trace"),
    }
}
