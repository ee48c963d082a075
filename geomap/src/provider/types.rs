//! Provider trait and shared types.

use thiserror::Error;

use crate::coord::{MapProjection, DEFAULT_TILE_SIZE};
use crate::tile::{ProviderId, TileKey};

/// Errors produced by providers and the HTTP layer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// Transport-level failure (connect, timeout, body read).
    #[error("HTTP error: {0}")]
    HttpError(String),

    /// The server answered with a non-success status.
    #[error("HTTP {status} from {url}")]
    HttpStatus { status: u16, url: String },

    /// Zoom level outside the provider's range.
    #[error("Unsupported zoom level: {0}")]
    UnsupportedZoom(u16),

    /// No provider registered under this id.
    #[error("Unknown provider: {0}")]
    UnknownProvider(String),

    /// A URL template is missing a required placeholder or is malformed.
    #[error("Invalid URL template: {0}")]
    InvalidTemplate(String),
}

/// Static description of a tile source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileProviderInfo {
    id: ProviderId,
    display_name: String,
}

impl TileProviderInfo {
    pub fn new(id: impl Into<ProviderId>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
        }
    }

    /// Identifier carried by every [`TileKey`] of this source.
    pub fn id(&self) -> &ProviderId {
        &self.id
    }

    /// Human-readable name.
    pub fn display_name(&self) -> &str {
        &self.display_name
    }
}

/// A source of raster map tiles.
///
/// Providers are stateless descriptions: they know how to address a tile,
/// which projection their grid follows and how large their tiles are. The
/// loader does the fetching.
pub trait TileProvider: Send + Sync {
    /// Static metadata for this source.
    fn info(&self) -> &TileProviderInfo;

    /// Projection the tile grid is laid out under.
    fn projection(&self) -> &'static dyn MapProjection;

    /// Pixel edge of one square tile.
    fn tile_size(&self) -> u32 {
        DEFAULT_TILE_SIZE
    }

    /// Minimum supported zoom level.
    fn min_zoom(&self) -> u16 {
        0
    }

    /// Maximum supported zoom level.
    fn max_zoom(&self) -> u16;

    /// Returns the fetch URL for a tile, or `None` if this source cannot
    /// serve it.
    fn tile_url(&self, key: &TileKey) -> Option<String>;

    /// Whether the zoom level is served by this provider.
    fn supports_zoom(&self, zoom: u16) -> bool {
        zoom >= self.min_zoom() && zoom <= self.max_zoom()
    }

    /// Whether the key is addressable: supported zoom, coordinates in grid.
    fn accepts(&self, key: &TileKey) -> bool {
        self.supports_zoom(key.zoom()) && key.is_in_grid()
    }
}
