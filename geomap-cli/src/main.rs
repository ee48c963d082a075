//! GeoMap CLI - Command-line interface
//!
//! Exercises the GeoMap tile core from the shell: projection math, tile key
//! normalisation, provider listing and single-tile fetches.

mod commands;
mod error;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use geomap::logging::{init_logging, LogConfig};

use commands::common::load_config;
use commands::config::ConfigCommands;
use commands::fetch::FetchArgs;
use commands::key::KeyArgs;
use commands::project::ProjectCommands;
use error::CliError;

#[derive(Debug, Parser)]
#[command(name = "geomap", about = "Map tile cache and projection toolkit", version)]
struct Cli {
    /// Configuration file (defaults to the user config directory)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Convert between geographic and pixel coordinates
    Project {
        #[command(subcommand)]
        command: ProjectCommands,
    },

    /// Normalise a tile address and show its URL
    Key(KeyArgs),

    /// Download one tile and save it as an image
    Fetch(FetchArgs),

    /// List available tile providers
    Providers,

    /// Inspect or create the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = load_config(cli.config.as_deref())?;

    let mut log_config = LogConfig::from(&config.logging);
    if cli.verbose {
        log_config.level = "debug".to_string();
    }
    let _log_guard = init_logging(&log_config)?;

    match cli.command {
        Commands::Project { command } => commands::project::run(command),
        Commands::Key(args) => commands::key::run(args, &config),
        Commands::Fetch(args) => commands::fetch::run(args, &config),
        Commands::Providers => commands::providers::run(&config),
        Commands::Config { command } => {
            commands::config::run(command, &config, cli.config.as_deref())
        }
    }
}
