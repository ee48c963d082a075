//! Loader telemetry for observability.
//!
//! This module provides metrics collection and reporting for the tile loader.
//! It uses lock-free atomic counters so that the synchronous lookup path pays
//! almost nothing for instrumentation.
//!
//! # Architecture
//!
//! ```text
//! TileLoader ─────► LoaderMetrics ─────► TelemetrySnapshot ─────► Views
//!                  (atomic counters)    (point-in-time copy)     (CLI, logs)
//! ```
//!
//! # Example
//!
//! ```
//! use geomap::telemetry::LoaderMetrics;
//!
//! let metrics = LoaderMetrics::new();
//! metrics.cache_miss();
//! metrics.fetch_started();
//! metrics.tile_loaded(65_536);
//!
//! let snapshot = metrics.snapshot();
//! assert_eq!(snapshot.tiles_loaded, 1);
//! ```

mod metrics;
mod snapshot;

pub use metrics::LoaderMetrics;
pub use snapshot::TelemetrySnapshot;
