//! Coordinate value types shared by projections and viewports.

use serde::{Deserialize, Serialize};

/// Maximum latitude representable in Web Mercator (degrees).
pub const MAX_LAT: f64 = 85.05112878;

/// Minimum latitude representable in Web Mercator (degrees).
pub const MIN_LAT: f64 = -85.05112878;

/// Default pixel edge of a square raster tile.
pub const DEFAULT_TILE_SIZE: u32 = 256;

/// A geographic position.
///
/// Altitude is carried for callers that track it but is ignored by every
/// projection in this crate.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude in degrees, positive north.
    pub latitude: f64,
    /// Longitude in degrees, positive east.
    pub longitude: f64,
    /// Altitude in metres.
    pub altitude: f64,
}

impl GeoPoint {
    /// Creates a point at zero altitude.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            altitude: 0.0,
        }
    }

    /// Creates a point with an explicit altitude.
    pub fn with_altitude(latitude: f64, longitude: f64, altitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            altitude,
        }
    }
}

/// A position in global map pixel space at some zoom level.
///
/// The origin is the north-west corner of the world; `y` grows southward.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

impl PixelPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}
