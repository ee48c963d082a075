//! Configuration
//!
//! - [`TileLoaderConfig`]: runtime settings of the tile loader, with defaults
//!   and `with_*` builders
//! - [`ConfigFile`]: user-editable INI file feeding those settings
//! - [`parse_size`] / [`format_size`]: human-readable byte sizes

mod file;
mod loader;
mod size;

pub use file::{
    config_file_path, parse_color, CacheSettings, ConfigError, ConfigFile, DisplaySettings,
    LoggingSettings, NetworkSettings, ProviderSettings,
};
pub use loader::{
    TileLoaderConfig, DEFAULT_EMPTY_TILE_COLOR, DEFAULT_MAX_CACHE_BYTES,
    DEFAULT_MAX_CONCURRENT_FETCHES, DEFAULT_NOTIFICATION_CAPACITY,
};
pub use size::{format_size, parse_size};
