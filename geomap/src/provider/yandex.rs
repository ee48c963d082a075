//! Yandex Maps raster providers.
//!
//! Yandex serves both satellite imagery and a rendered street map through a
//! query-string addressed tile endpoint:
//!
//! - Satellite: `https://core-sat.maps.yandex.net/tiles?l=sat&x={x}&y={y}&z={z}`
//! - Map: `https://core-renderer-tiles.maps.yandex.net/tiles?l=map&x={x}&y={y}&z={z}&lang={lang}`
//!
//! Tiles are 256px. The grid is treated as spherical Web Mercator.

use crate::coord::{MapProjection, WEB_MERCATOR};
use crate::provider::{TileProvider, TileProviderInfo};
use crate::tile::TileKey;

pub const YANDEX_SATELLITE_ID: &str = "YandexSatellite";
pub const YANDEX_MAP_ID: &str = "YandexMap";

const SATELLITE_URL: &str = "https://core-sat.maps.yandex.net/tiles?l=sat";
const MAP_URL: &str = "https://core-renderer-tiles.maps.yandex.net/tiles?l=map";

/// Which Yandex layer to request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YandexLayer {
    Satellite,
    Map,
}

/// Yandex tile provider.
#[derive(Debug, Clone)]
pub struct YandexProvider {
    info: TileProviderInfo,
    layer: YandexLayer,
    lang: String,
}

impl YandexProvider {
    /// Satellite imagery layer.
    pub fn satellite() -> Self {
        Self {
            info: TileProviderInfo::new(YANDEX_SATELLITE_ID, "Yandex Satellite"),
            layer: YandexLayer::Satellite,
            lang: String::new(),
        }
    }

    /// Street map layer labelled in the given language (e.g. `en_US`).
    pub fn map(lang: impl Into<String>) -> Self {
        Self {
            info: TileProviderInfo::new(YANDEX_MAP_ID, "Yandex Map"),
            layer: YandexLayer::Map,
            lang: lang.into(),
        }
    }

    pub fn layer(&self) -> YandexLayer {
        self.layer
    }

    fn build_url(&self, x: i32, y: i32, zoom: u16) -> String {
        match self.layer {
            YandexLayer::Satellite => format!("{}&x={}&y={}&z={}", SATELLITE_URL, x, y, zoom),
            YandexLayer::Map => format!(
                "{}&x={}&y={}&z={}&scale=1&lang={}",
                MAP_URL, x, y, zoom, self.lang
            ),
        }
    }
}

impl TileProvider for YandexProvider {
    fn info(&self) -> &TileProviderInfo {
        &self.info
    }

    fn projection(&self) -> &'static dyn MapProjection {
        &WEB_MERCATOR
    }

    fn max_zoom(&self) -> u16 {
        match self.layer {
            YandexLayer::Satellite => 19,
            YandexLayer::Map => 21,
        }
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
    fn test_satellite_url() {
        let provider = YandexProvider::satellite();
        let key = TileKey::new(5, 6, 4, YANDEX_SATELLITE_ID).unwrap();
        assert_eq!(
            provider.tile_url(&key).unwrap(),
            "https://core-sat.maps.yandex.net/tiles?l=sat&x=5&y=6&z=4"
        );
    }

    #[test]
    fn test_map_url_includes_language() {
        let provider = YandexProvider::map("en_US");
        let key = TileKey::new(1, 1, 2, YANDEX_MAP_ID).unwrap();
        let url = provider.tile_url(&key).unwrap();
        assert!(url.starts_with(MAP_URL));
        assert!(url.ends_with("&x=1&y=1&z=2&scale=1&lang=en_US"));
    }

    #[test]
    fn test_zoom_limits_per_layer() {
        assert_eq!(YandexProvider::satellite().max_zoom(), 19);
        assert_eq!(YandexProvider::map("ru_RU").max_zoom(), 21);

        let key = TileKey::new(0, 0, 20, YANDEX_SATELLITE_ID).unwrap();
        assert!(YandexProvider::satellite().tile_url(&key).is_none());
    }

    #[test]
    fn test_ids_differ() {
        assert_ne!(
            YandexProvider::satellite().info().id(),
            YandexProvider::map("ru_RU").info().id()
        );
    }
}
