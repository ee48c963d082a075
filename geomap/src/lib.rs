//! GeoMap - map tile cache and Web-Mercator projection engine
//!
//! This library provides the core of a slippy-map widget: tile addressing,
//! projection between geographic and pixel coordinates, tile sources, and a
//! non-blocking loader that fetches and caches tile bitmaps in the background.
//!
//! # Modules
//!
//! - [`coord`]: Web-Mercator projection and viewport tile enumeration
//! - [`tile`]: tile keys with antimeridian wraparound, decoded bitmaps
//! - [`provider`]: tile sources, URL templates, HTTP client seam, registry
//! - [`loader`]: the tile loader service with loaded notifications
//! - [`cache`]: byte-bounded bitmap cache
//! - [`config`]: loader settings and the INI configuration file
//! - [`telemetry`]: loader counters
//! - [`logging`]: tracing subscriber setup

pub mod cache;
pub mod config;
pub mod coord;
pub mod loader;
pub mod logging;
pub mod provider;
pub mod telemetry;
pub mod tile;

pub use coord::{GeoPoint, MapProjection, PixelPoint, WebMercator, WEB_MERCATOR};
pub use loader::TileLoader;
pub use provider::{ProviderRegistry, TileProvider};
pub use tile::{ProviderId, TileBitmap, TileKey};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
