//! Decoded tile storage.
//!
//! [`TileCache`] is a size-bounded in-memory map from [`crate::tile::TileKey`]
//! to shared bitmaps. It is owned by the loader, never global.

mod memory;

pub use memory::TileCache;
