//! Tile loader configuration.

use std::time::Duration;

use image::Rgba;

use super::ConfigFile;
use crate::provider::{DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT};

/// Default cache budget: 256 MiB of decoded RGBA, about a thousand 256px tiles.
pub const DEFAULT_MAX_CACHE_BYTES: u64 = 256 * 1024 * 1024;

/// Default cap on simultaneous outbound tile fetches.
pub const DEFAULT_MAX_CONCURRENT_FETCHES: usize = 16;

/// Default buffer of the loaded-notification channel.
pub const DEFAULT_NOTIFICATION_CAPACITY: usize = 256;

/// Default placeholder colour: opaque light grey.
pub const DEFAULT_EMPTY_TILE_COLOR: Rgba<u8> = Rgba([224, 224, 224, 255]);

/// Runtime settings of a [`crate::loader::TileLoader`].
#[derive(Clone, Debug)]
pub struct TileLoaderConfig {
    /// Byte budget for decoded bitmaps held in the cache.
    pub max_cache_bytes: u64,

    /// Maximum number of fetches running at once.
    pub max_concurrent_fetches: usize,

    /// Buffered notifications per subscriber before it starts lagging.
    pub notification_capacity: usize,

    /// HTTP request timeout.
    pub request_timeout: Duration,

    /// `User-Agent` header for tile requests.
    pub user_agent: String,

    /// Initial placeholder colour.
    pub empty_tile_color: Rgba<u8>,
}

impl Default for TileLoaderConfig {
    fn default() -> Self {
        Self {
            max_cache_bytes: DEFAULT_MAX_CACHE_BYTES,
            max_concurrent_fetches: DEFAULT_MAX_CONCURRENT_FETCHES,
            notification_capacity: DEFAULT_NOTIFICATION_CAPACITY,
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            empty_tile_color: DEFAULT_EMPTY_TILE_COLOR,
        }
    }
}

impl TileLoaderConfig {
    /// Build loader settings from a loaded configuration file.
    pub fn from_config_file(config: &ConfigFile) -> Self {
        Self {
            max_cache_bytes: config.cache.memory_size,
            max_concurrent_fetches: config.network.max_concurrent,
            notification_capacity: DEFAULT_NOTIFICATION_CAPACITY,
            request_timeout: Duration::from_secs(config.network.timeout_secs),
            user_agent: config.network.user_agent.clone(),
            empty_tile_color: config.display.empty_tile_color,
        }
    }

    /// Set the cache byte budget.
    pub fn with_max_cache_bytes(mut self, bytes: u64) -> Self {
        self.max_cache_bytes = bytes;
        self
    }

    /// Set the concurrent fetch cap. Zero is raised to one.
    pub fn with_max_concurrent_fetches(mut self, limit: usize) -> Self {
        self.max_concurrent_fetches = limit.max(1);
        self
    }

    /// Set the notification buffer. Zero is raised to one.
    pub fn with_notification_capacity(mut self, capacity: usize) -> Self {
        self.notification_capacity = capacity.max(1);
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_empty_tile_color(mut self, color: Rgba<u8>) -> Self {
        self.empty_tile_color = color;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TileLoaderConfig::default();
        assert_eq!(config.max_cache_bytes, 256 * 1024 * 1024);
        assert_eq!(config.max_concurrent_fetches, 16);
        assert_eq!(config.notification_capacity, 256);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.empty_tile_color, DEFAULT_EMPTY_TILE_COLOR);
    }

    #[test]
    fn test_builder() {
        let config = TileLoaderConfig::default()
            .with_max_cache_bytes(1024)
            .with_max_concurrent_fetches(0)
            .with_notification_capacity(8)
            .with_request_timeout(Duration::from_secs(5))
            .with_user_agent("test/1.0")
            .with_empty_tile_color(Rgba([0, 0, 0, 0]));

        assert_eq!(config.max_cache_bytes, 1024);
        assert_eq!(config.max_concurrent_fetches, 1);
        assert_eq!(config.notification_capacity, 8);
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.user_agent, "test/1.0");
        assert_eq!(config.empty_tile_color, Rgba([0, 0, 0, 0]));
    }

    #[test]
    fn test_from_config_file() {
        let mut file = ConfigFile::default();
        file.cache.memory_size = 4096;
        file.network.max_concurrent = 3;
        file.network.timeout_secs = 7;

        let config = TileLoaderConfig::from_config_file(&file);
        assert_eq!(config.max_cache_bytes, 4096);
        assert_eq!(config.max_concurrent_fetches, 3);
        assert_eq!(config.request_timeout, Duration::from_secs(7));
    }
}
