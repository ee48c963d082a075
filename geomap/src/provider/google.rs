//! Google Maps satellite imagery provider.
//!
//! Uses Google Maps Platform with an API key. Users need their own Google
//! Cloud Platform project with the Map Tiles API enabled.
//!
//! # API Endpoints
//!
//! - Map Tiles API: `https://tile.googleapis.com/v1/2dtiles/{z}/{x}/{y}?key={API_KEY}`
//! - Legacy endpoint: `https://mt{server}.googleapis.com/vt?lyrs=s&x={x}&y={y}&z={z}&key={API_KEY}`

use crate::coord::{MapProjection, WEB_MERCATOR};
use crate::provider::{TileProvider, TileProviderInfo};
use crate::tile::TileKey;

/// Provider id used in tile keys.
pub const GOOGLE_ID: &str = "GoogleSatellite";

/// Google Maps satellite imagery provider.
#[derive(Debug, Clone)]
pub struct GoogleMapsProvider {
    info: TileProviderInfo,
    api_key: String,
    use_legacy_endpoint: bool,
}

impl GoogleMapsProvider {
    /// Creates a provider using the Map Tiles API endpoint.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            info: TileProviderInfo::new(GOOGLE_ID, "Google Satellite"),
            api_key: api_key.into(),
            use_legacy_endpoint: false,
        }
    }

    /// Creates a provider using the legacy tile endpoint.
    pub fn with_legacy_endpoint(api_key: impl Into<String>) -> Self {
        Self {
            use_legacy_endpoint: true,
            ..Self::new(api_key)
        }
    }

    fn build_url(&self, x: i32, y: i32, zoom: u16) -> String {
        if self.use_legacy_endpoint {
            // Load balancing across mt0-mt3
            let server = (x + y) % 4;
            format!(
                "https://mt{}.googleapis.com/vt?lyrs=s&x={}&y={}&z={}&key={}",
                server, x, y, zoom, self.api_key
            )
        } else {
            format!(
                "https://tile.googleapis.com/v1/2dtiles/{}/{}/{}?key={}",
                zoom, x, y, self.api_key
            )
        }
    }
}

impl TileProvider for GoogleMapsProvider {
    fn info(&self) -> &TileProviderInfo {
        &self.info
    }

    fn projection(&self) -> &'static dyn MapProjection {
        &WEB_MERCATOR
    }

    fn max_zoom(&self) -> u16 {
        22
    }

    fn tile_url(&self, key: &TileKey) -> Option<String> {
        self.accepts(key)
            .then(|| self.build_url(key.x(), key.y(), key.zoom()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(x: i32, y: i32, zoom: u16) -> TileKey {
        TileKey::new(x, y, zoom, GOOGLE_ID).unwrap()
    }

    #[test]
    fn test_zoom_range() {
        let provider = GoogleMapsProvider::new("test_key");
        assert_eq!(provider.min_zoom(), 0);
        assert_eq!(provider.max_zoom(), 22);
    }

    #[test]
    fn test_modern_url_construction() {
        let provider = GoogleMapsProvider::new("test_api_key");
        assert_eq!(
            provider.tile_url(&key(200, 100, 10)).unwrap(),
            "https://tile.googleapis.com/v1/2dtiles/10/200/100?key=test_api_key"
        );
    }

    #[test]
    fn test_legacy_url_construction() {
        let provider = GoogleMapsProvider::with_legacy_endpoint("test_api_key");
        // Server should be (200 + 100) % 4 = 0
        assert_eq!(
            provider.tile_url(&key(200, 100, 10)).unwrap(),
            "https://mt0.googleapis.com/vt?lyrs=s&x=200&y=100&z=10&key=test_api_key"
        );
    }

    #[test]
    fn test_legacy_url_server_distribution() {
        let provider = GoogleMapsProvider::with_legacy_endpoint("k");
        assert!(provider.tile_url(&key(0, 0, 10)).unwrap().contains("mt0."));
        assert!(provider.tile_url(&key(1, 0, 10)).unwrap().contains("mt1."));
        assert!(provider.tile_url(&key(1, 1, 10)).unwrap().contains("mt2."));
        assert!(provider.tile_url(&key(2, 1, 10)).unwrap().contains("mt3."));
        assert!(provider.tile_url(&key(4, 0, 10)).unwrap().contains("mt0."));
    }

    #[test]
    fn test_beyond_max_zoom_declined() {
        let provider = GoogleMapsProvider::new("k");
        assert!(provider.tile_url(&key(0, 0, 23)).is_none());
    }
}
