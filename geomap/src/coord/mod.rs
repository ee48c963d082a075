//! Coordinate projection module
//!
//! Provides conversions between geographic coordinates (latitude/longitude)
//! and global pixel space at a given zoom level and tile size, using the
//! Web Mercator scheme shared by most raster tile sources.

mod types;
pub mod viewport;

pub use types::{GeoPoint, PixelPoint, DEFAULT_TILE_SIZE, MAX_LAT, MIN_LAT};

use std::f64::consts::PI;

/// Bidirectional mapping between geographic and pixel coordinates.
///
/// Implementations hold no mutable state and are shared by reference across
/// every provider and thread that uses them.
pub trait MapProjection: Send + Sync {
    /// Converts a global pixel position to a geographic point.
    fn pixels_to_geo(&self, pixel: PixelPoint, zoom: u16, tile_size: u32) -> GeoPoint;

    /// Converts a geographic point to a global pixel position.
    fn geo_to_pixels(&self, geo: &GeoPoint, zoom: u16, tile_size: u32) -> PixelPoint;

    /// Returns the tile indices containing the given point.
    ///
    /// Indices are floored pixel coordinates divided by the tile size and are
    /// not wrapped; feed them through [`crate::tile::TileKey::new`] for that.
    fn geo_to_tile(&self, geo: &GeoPoint, zoom: u16, tile_size: u32) -> (i32, i32) {
        let pixel = self.geo_to_pixels(geo, zoom, tile_size);
        let size = tile_size as f64;
        ((pixel.x / size).floor() as i32, (pixel.y / size).floor() as i32)
    }
}

/// Spherical Web Mercator (EPSG:3857) projection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WebMercator;

/// Process-wide Web Mercator instance.
pub static WEB_MERCATOR: WebMercator = WebMercator;

impl WebMercator {
    /// Returns the shared instance.
    #[inline]
    pub fn instance() -> &'static WebMercator {
        &WEB_MERCATOR
    }
}

/// Width (and height) of the whole world in pixels.
#[inline]
pub fn map_size(zoom: u16, tile_size: u32) -> f64 {
    tile_size as f64 * 2.0_f64.powi(zoom as i32)
}

/// Single wrap correction into `[0, size)`.
///
/// Values more than one world width out of range stay out of range.
#[inline]
fn wrap_once(value: f64, size: f64) -> f64 {
    if value < 0.0 {
        value + size
    } else if value >= size {
        value - size
    } else {
        value
    }
}

impl MapProjection for WebMercator {
    #[inline]
    fn pixels_to_geo(&self, pixel: PixelPoint, zoom: u16, tile_size: u32) -> GeoPoint {
        let size = map_size(zoom, tile_size);
        let px = wrap_once(pixel.x, size);
        let py = wrap_once(pixel.y, size);

        let longitude = px / size * 360.0 - 180.0;
        let latitude = (PI * (1.0 - 2.0 * py / size)).sinh().atan() * 180.0 / PI;

        GeoPoint::new(latitude, longitude)
    }

    #[inline]
    fn geo_to_pixels(&self, geo: &GeoPoint, zoom: u16, tile_size: u32) -> PixelPoint {
        let size = map_size(zoom, tile_size);
        let sin_lat = (geo.latitude * PI / 180.0).sin();

        let x = (geo.longitude + 180.0) / 360.0 * size;
        let y = (0.5 - ((1.0 + sin_lat) / (1.0 - sin_lat)).ln() / (4.0 * PI)) * size;

        PixelPoint::new(x, y)
    }
}
