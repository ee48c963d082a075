//! In-memory tile cache with size-bounded eviction using moka.
//!
//! Entries are decoded bitmaps shared by `Arc`, weighted by their pixel
//! buffer size so the budget is expressed in bytes rather than tile count.

use std::sync::Arc;

use moka::policy::EvictionPolicy;
use moka::sync::Cache;

use crate::tile::{TileBitmap, TileKey};

/// Byte-bounded map from tile key to decoded bitmap.
///
/// Thread-safe on its own; the loader additionally serialises mutations with
/// its in-flight bookkeeping.
pub struct TileCache {
    cache: Cache<TileKey, Arc<TileBitmap>>,
    max_size_bytes: u64,
}

impl TileCache {
    /// Create a cache holding at most `max_size_bytes` of decoded pixels.
    pub fn new(max_size_bytes: u64) -> Self {
        let cache = Cache::builder()
            // moka weights are u32; a single tile never gets near that
            .weigher(|_key: &TileKey, value: &Arc<TileBitmap>| -> u32 {
                value.byte_size().min(u32::MAX as usize) as u32
            })
            .max_capacity(max_size_bytes)
            // Admit every new tile, evict the least recently used
            .eviction_policy(EvictionPolicy::lru())
            .build();

        Self {
            cache,
            max_size_bytes,
        }
    }

    pub fn get(&self, key: &TileKey) -> Option<Arc<TileBitmap>> {
        self.cache.get(key)
    }

    /// Insert or replace the bitmap for `key`.
    pub fn insert(&self, key: TileKey, bitmap: Arc<TileBitmap>) {
        self.cache.insert(key, bitmap);
    }

    pub fn contains(&self, key: &TileKey) -> bool {
        self.cache.contains_key(key)
    }

    /// Remove one entry, returning it if present.
    pub fn remove(&self, key: &TileKey) -> Option<Arc<TileBitmap>> {
        self.cache.remove(key)
    }

    /// Drop every entry.
    pub fn clear(&self) {
        self.cache.invalidate_all();
        self.cache.run_pending_tasks();
    }

    /// Number of cached tiles after pending maintenance has run.
    pub fn entry_count(&self) -> u64 {
        self.cache.run_pending_tasks();
        self.cache.entry_count()
    }

    /// Decoded bytes currently held.
    pub fn size_bytes(&self) -> u64 {
        self.cache.run_pending_tasks();
        self.cache.weighted_size()
    }

    pub fn max_size_bytes(&self) -> u64 {
        self.max_size_bytes
    }
}

impl std::fmt::Debug for TileCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TileCache")
            .field("entries", &self.cache.entry_count())
            .field("max_size_bytes", &self.max_size_bytes)
            .finish()
    }
}
