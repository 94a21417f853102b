//! CLI argument definitions using clap.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

use crate::logging::LogFormat;

/// Roster: employee records from the command line
#[derive(Parser)]
#[command(name = "roster")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Log output format
    #[arg(long, global = true, default_value = "pretty")]
    pub log_format: LogFormatChoice,

    /// JSON configuration file (departments, report size)
    #[arg(long, global = true, value_name = "FILE", env = "ROSTER_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log in and run commands interactively
    Shell {
        /// User name to log in as
        #[arg(short, long, env = "ROSTER_USER", default_value = "admin")]
        user: String,

        /// Password (read from stdin when not given)
        #[arg(long, env = "ROSTER_PASSWORD", hide_env_values = true)]
        password: Option<String>,

        /// Seed the store with a sample record
        #[arg(long)]
        demo: bool,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Log in and execute a command script
    Run {
        /// Script with one session command per line
        #[arg(value_name = "SCRIPT")]
        script: PathBuf,

        /// User name to log in as
        #[arg(short, long, env = "ROSTER_USER", default_value = "admin")]
        user: String,

        /// Password
        #[arg(long, env = "ROSTER_PASSWORD", hide_env_values = true)]
        password: String,

        /// Seed the store with a sample record
        #[arg(long)]
        demo: bool,

        /// Print results as JSON
        #[arg(long)]
        json: bool,

        /// Report failing lines and continue instead of stopping
        #[arg(long)]
        keep_going: bool,
    },

    /// List the configured department picklist
    Departments {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Log format as given on the command line
#[derive(Clone, Debug, Default)]
pub enum LogFormatChoice {
    #[default]
    Pretty,
    Compact,
    Json,
}

impl std::str::FromStr for LogFormatChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(LogFormatChoice::Pretty),
            "compact" => Ok(LogFormatChoice::Compact),
            "json" => Ok(LogFormatChoice::Json),
            _ => Err(format!(
                "Unknown log format: {}. Use pretty, compact, or json.",
                s
            )),
        }
    }
}

impl std::fmt::Display for LogFormatChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogFormatChoice::Pretty => write!(f, "pretty"),
            LogFormatChoice::Compact => write!(f, "compact"),
            LogFormatChoice::Json => write!(f, "json"),
        }
    }
}

impl From<LogFormatChoice> for LogFormat {
    fn from(choice: LogFormatChoice) -> Self {
        match choice {
            LogFormatChoice::Pretty => LogFormat::Pretty,
            LogFormatChoice::Compact => LogFormat::Compact,
            LogFormatChoice::Json => LogFormat::Json,
        }
    }
}
