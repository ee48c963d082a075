//! Tile key type.
//!
//! Provides the `TileKey` type, the canonical identity of one map tile used
//! for cache lookups, fetch de-duplication and URL construction.

use std::fmt;

use thiserror::Error;

use super::ProviderId;

/// Highest zoom level whose grid width `2^zoom` fits in an `i32`.
pub const MAX_TILE_ZOOM: u16 = 30;

/// Errors raised while constructing a tile key.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TileKeyError {
    /// The grid width `2^zoom` would overflow the coordinate type.
    #[error("Zoom level {zoom} too large (max: {max})")]
    ZoomOverflow { zoom: u16, max: u16 },
}

/// Identity of a single map tile.
///
/// Coordinates are wrapped once into the grid on construction: a negative
/// value gains `2^zoom`, a value strictly greater than `2^zoom` loses it.
/// A value exactly equal to `2^zoom` is kept as is.
///
/// # Example
///
/// ```
/// use geomap::tile::TileKey;
///
/// let key = TileKey::new(-1, 3, 3, "osm").unwrap();
/// assert_eq!(key.x(), 7);
/// assert_eq!(key.to_string(), "osm[x:7, y:3, z:3]");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TileKey {
    /// Tile column, west to east
    x: i32,
    /// Tile row, north to south
    y: i32,
    zoom: u16,
    provider: ProviderId,
}

impl TileKey {
    /// Create a new tile key, normalising `x` and `y`.
    ///
    /// # Errors
    ///
    /// Returns [`TileKeyError::ZoomOverflow`] if `zoom` exceeds [`MAX_TILE_ZOOM`].
    pub fn new(
        x: i32,
        y: i32,
        zoom: u16,
        provider: impl Into<ProviderId>,
    ) -> Result<Self, TileKeyError> {
        if zoom > MAX_TILE_ZOOM {
            return Err(TileKeyError::ZoomOverflow {
                zoom,
                max: MAX_TILE_ZOOM,
            });
        }

        let max = 1i32 << zoom;

        Ok(Self {
            x: wrap_once(x, max),
            y: wrap_once(y, max),
            zoom,
            provider: provider.into(),
        })
    }

    /// Get the tile column.
    pub fn x(&self) -> i32 {
        self.x
    }

    /// Get the tile row.
    pub fn y(&self) -> i32 {
        self.y
    }

    /// Get the zoom level.
    pub fn zoom(&self) -> u16 {
        self.zoom
    }

    /// Get the provider identifier.
    pub fn provider(&self) -> &ProviderId {
        &self.provider
    }

    /// Number of tiles along one axis at this key's zoom level.
    pub fn grid_size(&self) -> i32 {
        1i32 << self.zoom
    }

    /// Whether both coordinates lie in `[0, 2^zoom)`.
    ///
    /// Keys built from far out-of-range input, or sitting exactly on the
    /// `2^zoom` boundary, are not in the grid.
    pub fn is_in_grid(&self) -> bool {
        let max = self.grid_size();
        (0..max).contains(&self.x) && (0..max).contains(&self.y)
    }
}

fn wrap_once(value: i32, max: i32) -> i32 {
    if value < 0 {
        value.wrapping_add(max)
    } else if value > max {
        value.wrapping_sub(max)
    } else {
        value
    }
}

impl fmt::Display for TileKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}[x:{}, y:{}, z:{}]",
            self.provider, self.x, self.y, self.zoom
        )
    }
}
