//! Viewport tile coverage.
//!
//! Computes which tiles a renderer needs to draw a screen-sized rectangle
//! centred on a geographic point.
//!
//! ```text
//!            left                 right
//!        top ┌──────┬──────┬──────┐
//!            │ x0,y0│      │      │
//!            ├──────┼──────┼──────┤   each cell → one TileKey
//!            │      │centre│      │
//!            ├──────┼──────┼──────┤
//!     bottom │      │      │ x1,y1│
//!            └──────┴──────┴──────┘
//! ```
//!
//! Columns wrap around the antimeridian; rows outside the world are dropped.

use crate::coord::GeoPoint;
use crate::provider::TileProvider;
use crate::tile::{TileKey, TileKeyError};

/// Tile keys covering a `width_px` x `height_px` viewport centred on `center`.
///
/// Keys are produced in row-major order (north to south, west to east) and
/// are addressed to `provider`. A viewport wider than the world yields each
/// column once.
pub fn visible_tiles(
    center: &GeoPoint,
    zoom: u16,
    width_px: u32,
    height_px: u32,
    provider: &dyn TileProvider,
) -> Result<Vec<TileKey>, TileKeyError> {
    // Validates zoom before any shifting below
    TileKey::new(0, 0, zoom, provider.info().id().clone())?;

    let tile_size = provider.tile_size() as f64;
    let grid = 1i64 << zoom;
    let pixel = provider
        .projection()
        .geo_to_pixels(center, zoom, provider.tile_size());

    if !pixel.x.is_finite() || !pixel.y.is_finite() || width_px == 0 || height_px == 0 {
        return Ok(Vec::new());
    }

    let left = pixel.x - width_px as f64 / 2.0;
    let top = pixel.y - height_px as f64 / 2.0;
    let right = left + width_px as f64;
    let bottom = top + height_px as f64;

    let x0 = (left / tile_size).floor() as i64;
    let x1 = (right / tile_size).ceil() as i64 - 1;
    let y0 = ((top / tile_size).floor() as i64).max(0);
    let y1 = ((bottom / tile_size).ceil() as i64 - 1).min(grid - 1);

    let columns = (x1 - x0 + 1).min(grid);
    let mut keys = Vec::new();

    for y in y0..=y1 {
        for offset in 0..columns {
            let x = (x0 + offset).rem_euclid(grid);
            keys.push(TileKey::new(
                x as i32,
                y as i32,
                zoom,
                provider.info().id().clone(),
            )?);
        }
    }

    Ok(keys)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::UrlTemplateProvider;

    fn provider() -> UrlTemplateProvider {
        UrlTemplateProvider::builder("test", "Test", "https://t.test/{z}/{x}/{y}")
            .build()
            .unwrap()
    }

    #[test]
    fn test_single_tile_world() {
        let keys = visible_tiles(&GeoPoint::new(0.0, 0.0), 0, 256, 256, &provider()).unwrap();
        assert_eq!(keys.len(), 1);
        assert_eq!((keys[0].x(), keys[0].y()), (0, 0));
    }

    #[test]
    fn test_centre_on_tile_corner_covers_four() {
        // At zoom 1 the origin sits on the corner of all four tiles
        let keys = visible_tiles(&GeoPoint::new(0.0, 0.0), 1, 256, 256, &provider()).unwrap();
        let coords: Vec<_> = keys.iter().map(|k| (k.x(), k.y())).collect();
        assert_eq!(coords, vec![(0, 0), (1, 0), (0, 1), (1, 1)]);
    }

    #[test]
    fn test_antimeridian_wraps_columns() {
        let keys = visible_tiles(&GeoPoint::new(0.0, 180.0), 2, 256, 256, &provider()).unwrap();
        let columns: Vec<_> = keys.iter().map(|k| k.x()).collect();
        assert!(columns.contains(&3));
        assert!(columns.contains(&0));
        assert!(keys.iter().all(|k| k.is_in_grid()));
    }

    #[test]
    fn test_rows_clipped_at_poles() {
        let keys = visible_tiles(&GeoPoint::new(85.0, 0.0), 2, 256, 1024, &provider()).unwrap();
        assert!(keys.iter().all(|k| k.y() >= 0 && k.y() < 4));
    }

    #[test]
    fn test_wide_viewport_no_duplicate_columns() {
        let keys = visible_tiles(&GeoPoint::new(0.0, 0.0), 1, 4096, 256, &provider()).unwrap();
        let mut coords: Vec<_> = keys.iter().map(|k| (k.x(), k.y())).collect();
        let before = coords.len();
        coords.sort();
        coords.dedup();
        assert_eq!(before, coords.len());
    }

    #[test]
    fn test_keys_carry_provider_id() {
        let provider = provider();
        let keys = visible_tiles(&GeoPoint::new(10.0, 10.0), 5, 800, 600, &provider).unwrap();
        assert!(!keys.is_empty());
        assert!(keys.iter().all(|k| k.provider() == provider.info().id()));
    }

    #[test]
    fn test_zoom_overflow() {
        let result = visible_tiles(&GeoPoint::new(0.0, 0.0), 31, 256, 256, &provider());
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_viewport() {
        let keys = visible_tiles(&GeoPoint::new(0.0, 0.0), 3, 0, 0, &provider()).unwrap();
        assert!(keys.is_empty());
    }
}
