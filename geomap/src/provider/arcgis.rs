//! ArcGIS World Imagery provider.
//!
//! Provides access to Esri's World Imagery basemap, which offers high-resolution
//! satellite and aerial imagery with global coverage.
//!
//! # URL Pattern
//!
//! `https://server.arcgisonline.com/ArcGIS/rest/services/World_Imagery/MapServer/tile/{z}/{y}/{x}`
//!
//! - Row before column in the path
//! - No authentication required for the public tier
//!
//! # Terms of Use
//!
//! The World Imagery basemap is provided by Esri and is subject to their
//! terms of use. See: <https://www.esri.com/en-us/legal/terms/full-master-agreement>

use crate::coord::{MapProjection, WEB_MERCATOR};
use crate::provider::{TileProvider, TileProviderInfo};
use crate::tile::TileKey;

/// Base URL for ArcGIS World Imagery tiles.
const ARCGIS_BASE_URL: &str =
    "https://server.arcgisonline.com/ArcGIS/rest/services/World_Imagery/MapServer/tile";

/// Provider id used in tile keys.
pub const ARCGIS_ID: &str = "ArcGisWorldImagery";

/// Maximum zoom level supported by ArcGIS World Imagery.
/// ArcGIS provides imagery up to zoom level 19 in most areas.
const MAX_ZOOM: u16 = 19;

/// ArcGIS World Imagery satellite provider.
#[derive(Debug, Clone)]
pub struct ArcGisProvider {
    info: TileProviderInfo,
}

impl ArcGisProvider {
    pub fn new() -> Self {
        Self {
            info: TileProviderInfo::new(ARCGIS_ID, "ArcGIS World Imagery"),
        }
    }

    /// ArcGIS uses the pattern: `{base}/{z}/{y}/{x}`
    fn build_url(&self, x: i32, y: i32, zoom: u16) -> String {
        format!("{}/{}/{}/{}", ARCGIS_BASE_URL, zoom, y, x)
    }
}

impl Default for ArcGisProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl TileProvider for ArcGisProvider {
    fn info(&self) -> &TileProviderInfo {
        &self.info
    }

    fn projection(&self) -> &'static dyn MapProjection {
        &WEB_MERCATOR
    }

    fn max_zoom(&self) -> u16 {
        MAX_ZOOM
    }

    fn tile_url(&self, key: &TileKey) -> Option<String> {
        self.accepts(key)
            .then(|| self.build_url(key.x(), key.y(), key.zoom()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_info() {
        let provider = ArcGisProvider::new();
        assert_eq!(provider.info().id().as_str(), ARCGIS_ID);
        assert_eq!(provider.info().display_name(), "ArcGIS World Imagery");
    }

    #[test]
    fn test_supports_zoom() {
        let provider = ArcGisProvider::new();
        assert!(provider.supports_zoom(0));
        assert!(provider.supports_zoom(19));
        assert!(!provider.supports_zoom(20));
    }

    #[test]
    fn test_url_construction() {
        let provider = ArcGisProvider::new();
        let key = TileKey::new(200, 100, 10, ARCGIS_ID).unwrap();
        assert_eq!(
            provider.tile_url(&key).unwrap(),
            format!("{}/10/100/200", ARCGIS_BASE_URL)
        );
    }

    #[test]
    fn test_url_unsupported_zoom() {
        let provider = ArcGisProvider::new();
        let key = TileKey::new(0, 0, 20, ARCGIS_ID).unwrap();
        assert!(provider.tile_url(&key).is_none());
    }
}
