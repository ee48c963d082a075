//! Point-in-time view of loader counters.

use std::fmt;

use serde::Serialize;

/// Copy of [`super::LoaderMetrics`] taken at one instant.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TelemetrySnapshot {
    pub cache_hits: u64,
    pub cache_misses: u64,
    pub deduplicated: u64,
    pub declined: u64,
    pub fetches_started: u64,
    pub fetches_failed: u64,
    pub decode_failures: u64,
    pub tiles_loaded: u64,
    pub bytes_loaded: u64,
    pub uptime_secs: u64,
    pub bytes_per_second: f64,
}

impl TelemetrySnapshot {
    /// Fraction of lookups served from cache, `0.0` when nothing was looked up.
    pub fn hit_rate(&self) -> f64 {
        let total = self.cache_hits + self.cache_misses;
        if total == 0 {
            0.0
        } else {
            self.cache_hits as f64 / total as f64
        }
    }
}

impl fmt::Display for TelemetrySnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hits {} / misses {} ({:.1}% hit), loaded {}, failed {}, declined {}",
            self.cache_hits,
            self.cache_misses,
            self.hit_rate() * 100.0,
            self.tiles_loaded,
            self.fetches_failed + self.decode_failures,
            self.declined
        )
    }
}
