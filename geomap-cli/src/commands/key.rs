//! `key` command: show how a tile address is normalised and where it is
//! fetched from.

use clap::Args;
use geomap::config::ConfigFile;
use geomap::TileKey;

use super::common::{build_registry, resolve_provider};
use crate::error::CliError;

/// Arguments of the `key` command.
#[derive(Debug, Args)]
pub struct KeyArgs {
    /// Tile column; out-of-range values wrap around the antimeridian
    #[arg(long, allow_hyphen_values = true)]
    pub x: i32,

    /// Tile row
    #[arg(long, allow_hyphen_values = true)]
    pub y: i32,

    #[arg(long, short)]
    pub zoom: u16,

    /// Provider preset name or id (defaults to the configured provider)
    #[arg(long, short)]
    pub provider: Option<String>,
}

/// Print the normalised key and its fetch URL.
pub fn run(args: KeyArgs, config: &ConfigFile) -> Result<(), CliError> {
    let registry = build_registry(config);
    let provider = resolve_provider(args.provider.as_deref(), config, &registry)?;
    let key = TileKey::new(args.x, args.y, args.zoom, provider.info().id().clone())?;

    println!("{}", key);
    match provider.tile_url(&key) {
        Some(url) => println!("url: {}", url),
        None => println!("url: (not served by {})", provider.info().display_name()),
    }
    Ok(())
}
