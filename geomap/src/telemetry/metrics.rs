//! Atomic loader counters.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use super::TelemetrySnapshot;

/// Lock-free counters updated by the tile loader.
#[derive(Debug)]
pub struct LoaderMetrics {
    cache_hits: AtomicU64,
    cache_misses: AtomicU64,
    /// Misses that found a fetch already running for the key
    deduplicated: AtomicU64,
    declined: AtomicU64,
    fetches_started: AtomicU64,
    fetches_failed: AtomicU64,
    decode_failures: AtomicU64,
    tiles_loaded: AtomicU64,
    bytes_loaded: AtomicU64,
    started_at: Instant,
}

impl LoaderMetrics {
    pub fn new() -> Self {
        Self {
            cache_hits: AtomicU64::new(0),
            cache_misses: AtomicU64::new(0),
            deduplicated: AtomicU64::new(0),
            declined: AtomicU64::new(0),
            fetches_started: AtomicU64::new(0),
            fetches_failed: AtomicU64::new(0),
            decode_failures: AtomicU64::new(0),
            tiles_loaded: AtomicU64::new(0),
            bytes_loaded: AtomicU64::new(0),
            started_at: Instant::now(),
        }
    }

    pub fn cache_hit(&self) {
        self.cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn cache_miss(&self) {
        self.cache_misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn deduplicated(&self) {
        self.deduplicated.fetch_add(1, Ordering::Relaxed);
    }

    /// The provider could not address the key.
    pub fn declined(&self) {
        self.declined.fetch_add(1, Ordering::Relaxed);
    }

    pub fn fetch_started(&self) {
        self.fetches_started.fetch_add(1, Ordering::Relaxed);
    }

    pub fn fetch_failed(&self) {
        self.fetches_failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn decode_failed(&self) {
        self.decode_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// A tile was committed to the cache; `bytes` is the encoded payload size.
    pub fn tile_loaded(&self, bytes: u64) {
        self.tiles_loaded.fetch_add(1, Ordering::Relaxed);
        self.bytes_loaded.fetch_add(bytes, Ordering::Relaxed);
    }

    /// Take a point-in-time copy of all counters.
    pub fn snapshot(&self) -> TelemetrySnapshot {
        let uptime = self.started_at.elapsed();
        let bytes_loaded = self.bytes_loaded.load(Ordering::Relaxed);
        let secs = uptime.as_secs_f64();

        TelemetrySnapshot {
            cache_hits: self.cache_hits.load(Ordering::Relaxed),
            cache_misses: self.cache_misses.load(Ordering::Relaxed),
            deduplicated: self.deduplicated.load(Ordering::Relaxed),
            declined: self.declined.load(Ordering::Relaxed),
            fetches_started: self.fetches_started.load(Ordering::Relaxed),
            fetches_failed: self.fetches_failed.load(Ordering::Relaxed),
            decode_failures: self.decode_failures.load(Ordering::Relaxed),
            tiles_loaded: self.tiles_loaded.load(Ordering::Relaxed),
            bytes_loaded,
            uptime_secs: uptime.as_secs(),
            bytes_per_second: if secs > 0.0 {
                bytes_loaded as f64 / secs
            } else {
                0.0
            },
        }
    }
}

impl Default for LoaderMetrics {
    fn default() -> Self {
        Self::new()
    }
}
