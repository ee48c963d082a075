//! `fetch` command: load one tile through the tile loader and save it.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use clap::Args;
use geomap::config::{format_size, ConfigFile, TileLoaderConfig};
use geomap::{TileBitmap, TileKey, TileLoader};
use tracing::info;

use super::common::{build_registry, resolve_provider};
use crate::error::CliError;

/// Arguments of the `fetch` command.
#[derive(Debug, Args)]
pub struct FetchArgs {
    /// Provider preset name or id (defaults to the configured provider)
    #[arg(long, short)]
    pub provider: Option<String>,

    #[arg(long, allow_hyphen_values = true)]
    pub x: i32,

    #[arg(long, allow_hyphen_values = true)]
    pub y: i32,

    #[arg(long, short)]
    pub zoom: u16,

    /// Output image; format follows the extension
    #[arg(long, short)]
    pub out: PathBuf,

    /// Seconds to wait for the tile
    #[arg(long, default_value_t = 30)]
    pub timeout: u64,

    /// Print loader statistics as JSON afterwards
    #[arg(long)]
    pub stats: bool,
}

/// Fetch a tile and write it to `args.out`.
pub fn run(args: FetchArgs, config: &ConfigFile) -> Result<(), CliError> {
    let registry = build_registry(config);
    let provider = resolve_provider(args.provider.as_deref(), config, &registry)?;
    let key = TileKey::new(args.x, args.y, args.zoom, provider.info().id().clone())?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let loader = TileLoader::with_http(
        TileLoaderConfig::from_config_file(config),
        registry,
        runtime.handle().clone(),
    )?;

    let started = Instant::now();
    let bitmap = runtime.block_on(wait_for_tile(
        &loader,
        &key,
        Duration::from_secs(args.timeout),
    ))?;

    bitmap.image().save(&args.out)?;
    info!(tile = %key, elapsed_ms = started.elapsed().as_millis() as u64, "Tile saved");
    println!(
        "{} -> {} ({}x{}, {})",
        key,
        args.out.display(),
        bitmap.width(),
        bitmap.height(),
        format_size(bitmap.byte_size() as u64)
    );

    if args.stats {
        println!("{}", serde_json::to_string_pretty(&loader.metrics())?);
    }

    loader.shutdown();
    Ok(())
}

/// Request `key` and wait until it is cached, its fetch fails, or `timeout`
/// passes.
async fn wait_for_tile(
    loader: &TileLoader,
    key: &TileKey,
    timeout: Duration,
) -> Result<Arc<TileBitmap>, CliError> {
    let mut loaded = loader.subscribe();
    let first = loader.get(key);
    if !first.is_placeholder() {
        return Ok(first);
    }

    let deadline = Instant::now() + timeout;
    loop {
        // Commit clears in-flight and fills the cache under one lock, so an
        // idle loader with an empty slot means the fetch failed or was declined.
        let idle = loader.in_flight_count() == 0;
        if let Some(bitmap) = loader.try_get(key) {
            return Ok(bitmap);
        }
        if idle {
            return Err(CliError::Fetch(format!(
                "{} could not be loaded (see log for details)",
                key
            )));
        }
        if Instant::now() >= deadline {
            return Err(CliError::Fetch(format!(
                "{} timed out after {}s",
                key,
                timeout.as_secs()
            )));
        }

        let _ = tokio::time::timeout(Duration::from_millis(100), loaded.recv()).await;
    }
}
