//! Tile identity and raster types.
//!
//! - [`TileKey`]: wraparound-normalised address of one tile
//! - [`ProviderId`]: case-insensitive tile source identifier
//! - [`TileBitmap`]: decoded raster handed out by the loader

mod bitmap;
mod key;
mod provider_id;

pub use bitmap::TileBitmap;
pub use key::{TileKey, TileKeyError, MAX_TILE_ZOOM};
pub use provider_id::ProviderId;

#[cfg(test)]
pub(crate) use bitmap::tests::png_bytes;
