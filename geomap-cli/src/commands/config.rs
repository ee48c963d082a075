//! Configuration CLI commands.
//!
//! Provides `config path`, `config show` and `config init`.

use std::path::Path;

use clap::Subcommand;
use geomap::config::{config_file_path, format_size, ConfigFile};

use crate::error::CliError;

/// Config subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Show the configuration file path
    Path,

    /// Print the effective settings
    Show,

    /// Write a configuration file with default settings
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Run a config subcommand.
pub fn run(
    command: ConfigCommands,
    config: &ConfigFile,
    explicit_path: Option<&Path>,
) -> Result<(), CliError> {
    let path = match explicit_path {
        Some(path) => path.to_path_buf(),
        None => config_file_path()
            .ok_or_else(|| CliError::Config("Could not determine config directory".to_string()))?,
    };

    match command {
        ConfigCommands::Path => {
            println!("{}", path.display());
        }
        ConfigCommands::Show => {
            println!("[cache]");
            println!("  memory_size      = {}", format_size(config.cache.memory_size));
            println!("[network]");
            println!("  timeout_secs     = {}", config.network.timeout_secs);
            println!("  max_concurrent   = {}", config.network.max_concurrent);
            println!("  user_agent       = {}", config.network.user_agent);
            println!("[provider]");
            println!("  default          = {}", config.provider.default);
            println!(
                "  google_api_key   = {}",
                if config.provider.google_api_key.is_some() {
                    "(set)"
                } else {
                    "(not set)"
                }
            );
            let [r, g, b, a] = config.display.empty_tile_color.0;
            println!("[display]");
            println!("  empty_tile_color = #{:02X}{:02X}{:02X}{:02X}", r, g, b, a);
            println!("[logging]");
            println!("  level            = {}", config.logging.level);
            match &config.logging.directory {
                Some(dir) => println!("  directory        = {}", dir.display()),
                None => println!("  directory        = (console only)"),
            }
        }
        ConfigCommands::Init { force } => {
            if path.exists() && !force {
                return Err(CliError::Config(format!(
                    "{} already exists (use --force to overwrite)",
                    path.display()
                )));
            }
            ConfigFile::default().save_to(&path)?;
            println!("Wrote {}", path.display());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.ini");

        run(
            ConfigCommands::Init { force: false },
            &ConfigFile::default(),
            Some(&path),
        )
        .unwrap();

        assert_eq!(ConfigFile::load_from(&path).unwrap(), ConfigFile::default());
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.ini");
        std::fs::write(&path, "[cache]\n").unwrap();

        let result = run(
            ConfigCommands::Init { force: false },
            &ConfigFile::default(),
            Some(&path),
        );
        assert!(matches!(result, Err(CliError::Config(_))));
    }
}
