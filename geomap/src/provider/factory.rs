//! Provider configuration and construction.
//!
//! [`ProviderConfig`] names a tile source and carries whatever it needs
//! (API keys, templates). [`ProviderFactory`] turns configs into shared
//! provider instances.

use std::sync::Arc;

use crate::provider::{
    ArcGisProvider, GoogleMapsProvider, ProviderError, TileProvider, UrlTemplateProvider,
    YandexProvider,
};

/// Provider id of the OpenStreetMap preset.
pub const OSM_ID: &str = "OpenStreetMap";

const OSM_TEMPLATE: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";

/// Configuration for a tile source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderConfig {
    /// Yandex satellite imagery.
    YandexSatellite,
    /// Yandex street map in the given language.
    YandexMap { lang: String },
    /// OpenStreetMap standard tiles.
    OpenStreetMap,
    /// Esri ArcGIS World Imagery.
    ArcGis,
    /// Google Map Tiles API (requires an API key).
    Google { api_key: String },
    /// Any XYZ tile server described by a URL template.
    Custom {
        id: String,
        display_name: String,
        template: String,
        servers: Vec<String>,
        max_zoom: u16,
    },
}

impl ProviderConfig {
    pub fn yandex_satellite() -> Self {
        Self::YandexSatellite
    }

    pub fn yandex_map(lang: impl Into<String>) -> Self {
        Self::YandexMap { lang: lang.into() }
    }

    pub fn osm() -> Self {
        Self::OpenStreetMap
    }

    pub fn arcgis() -> Self {
        Self::ArcGis
    }

    pub fn google(api_key: impl Into<String>) -> Self {
        Self::Google {
            api_key: api_key.into(),
        }
    }

    /// Parse a built-in preset name (case-insensitive).
    ///
    /// Presets that need extra data (Google, custom) are not reachable by
    /// name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "yandex" | "yandexsatellite" | "yandex-satellite" => Some(Self::YandexSatellite),
            "yandexmap" | "yandex-map" => Some(Self::yandex_map("en_US")),
            "osm" | "openstreetmap" => Some(Self::OpenStreetMap),
            "arcgis" | "arcgisworldimagery" => Some(Self::ArcGis),
            _ => None,
        }
    }

    /// Human-readable provider name.
    pub fn name(&self) -> &str {
        match self {
            Self::YandexSatellite => "Yandex Satellite",
            Self::YandexMap { .. } => "Yandex Map",
            Self::OpenStreetMap => "OpenStreetMap",
            Self::ArcGis => "ArcGIS World Imagery",
            Self::Google { .. } => "Google Satellite",
            Self::Custom { display_name, .. } => display_name,
        }
    }
}

/// Builds providers from configuration.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProviderFactory;

impl ProviderFactory {
    pub fn new() -> Self {
        Self
    }

    /// Create a provider for the given configuration.
    pub fn create(&self, config: &ProviderConfig) -> Result<Arc<dyn TileProvider>, ProviderError> {
        let provider: Arc<dyn TileProvider> = match config {
            ProviderConfig::YandexSatellite => Arc::new(YandexProvider::satellite()),
            ProviderConfig::YandexMap { lang } => Arc::new(YandexProvider::map(lang.clone())),
            ProviderConfig::OpenStreetMap => Arc::new(
                UrlTemplateProvider::builder(OSM_ID, "OpenStreetMap", OSM_TEMPLATE)
                    .servers(["a", "b", "c"])
                    .max_zoom(19)
                    .build()?,
            ),
            ProviderConfig::ArcGis => Arc::new(ArcGisProvider::new()),
            ProviderConfig::Google { api_key } => {
                if api_key.is_empty() {
                    return Err(ProviderError::InvalidTemplate(
                        "Google provider requires an API key".to_string(),
                    ));
                }
                Arc::new(GoogleMapsProvider::new(api_key.clone()))
            }
            ProviderConfig::Custom {
                id,
                display_name,
                template,
                servers,
                max_zoom,
            } => Arc::new(
                UrlTemplateProvider::builder(id, display_name, template.clone())
                    .servers(servers.iter().cloned())
                    .max_zoom(*max_zoom)
                    .build()?,
            ),
        };

        Ok(provider)
    }

    /// Every preset that needs no credentials.
    pub fn builtin(&self) -> Vec<Arc<dyn TileProvider>> {
        [
            ProviderConfig::YandexSatellite,
            ProviderConfig::yandex_map("en_US"),
            ProviderConfig::OpenStreetMap,
            ProviderConfig::ArcGis,
        ]
        .iter()
        .filter_map(|config| self.create(config).ok())
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tile::TileKey;

    #[test]
    fn test_from_name() {
        assert_eq!(
            ProviderConfig::from_name("Yandex"),
            Some(ProviderConfig::YandexSatellite)
        );
        assert_eq!(ProviderConfig::from_name("OSM"), Some(ProviderConfig::OpenStreetMap));
        assert_eq!(ProviderConfig::from_name("arcgis"), Some(ProviderConfig::ArcGis));
        assert_eq!(ProviderConfig::from_name("bing"), None);
    }

    #[test]
    fn test_create_osm() {
        let provider = ProviderFactory::new().create(&ProviderConfig::osm()).unwrap();
        assert_eq!(provider.info().id().as_str(), OSM_ID);
        let key = TileKey::new(0, 0, 0, OSM_ID).unwrap();
        assert_eq!(
            provider.tile_url(&key).unwrap(),
            "https://a.tile.openstreetmap.org/0/0/0.png"
        );
    }

    #[test]
    fn test_google_requires_key() {
        let result = ProviderFactory::new().create(&ProviderConfig::google(""));
        assert!(result.is_err());
        assert!(ProviderFactory::new()
            .create(&ProviderConfig::google("abc"))
            .is_ok());
    }

    #[test]
    fn test_custom_template() {
        let config = ProviderConfig::Custom {
            id: "local".to_string(),
            display_name: "Local".to_string(),
            template: "http://localhost/{z}/{x}/{y}.png".to_string(),
            servers: vec![],
            max_zoom: 12,
        };
        let provider = ProviderFactory::new().create(&config).unwrap();
        assert_eq!(provider.max_zoom(), 12);
        assert_eq!(config.name(), "Local");
    }

    #[test]
    fn test_custom_template_invalid() {
        let config = ProviderConfig::Custom {
            id: "bad".to_string(),
            display_name: "Bad".to_string(),
            template: "http://localhost/tile.png".to_string(),
            servers: vec![],
            max_zoom: 12,
        };
        assert!(matches!(
            ProviderFactory::new().create(&config),
            Err(ProviderError::InvalidTemplate(_))
        ));
    }

    #[test]
    fn test_builtin_ids_unique() {
        let providers = ProviderFactory::new().builtin();
        assert_eq!(providers.len(), 4);
        let mut ids: Vec<_> = providers
            .iter()
            .map(|p| p.info().id().normalized().to_string())
            .collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 4);
    }
}
