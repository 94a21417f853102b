//! Roster CLI - employee records from the command line.

mod cli;
mod commands;
mod logging;
mod session;

use std::path::Path;

use clap::Parser;
use cli::{Cli, Commands};
use logging::LogConfig;
use roster::RosterConfig;
use tracing::debug;

fn main() {
    let Cli {
        command,
        verbose,
        log_format,
        config,
    } = Cli::parse();

    let log_config = LogConfig::from_verbosity(verbose).with_format(log_format.into());
    if let Err(e) = logging::init_logging(&log_config) {
        eprintln!("Warning: failed to initialize logging: {}", e);
    }

    let result = load_config(config.as_deref()).and_then(|config| match command {
        Commands::Shell {
            user,
            password,
            demo,
            json,
        } => commands::shell::run(user, password, demo, json, config),

        Commands::Run {
            script,
            user,
            password,
            demo,
            json,
            keep_going,
        } => commands::run::run(script, user, password, demo, json, keep_going, config),

        Commands::Departments { json } => commands::departments::run(&config, json),
    });

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn load_config(path: Option<&Path>) -> Result<RosterConfig, Box<dyn std::error::Error>> {
    match path {
        Some(path) => {
            let config = RosterConfig::load(path)?;
            debug!(path = %path.display(), departments = config.departments.len(), "loaded config");
            Ok(config)
        }
        None => Ok(RosterConfig::default()),
    }
}
