//! Tile provider abstraction
//!
//! This module provides the [`TileProvider`] trait describing a raster tile
//! source (metadata, projection, tile size, URL construction), built-in
//! sources (Yandex, OpenStreetMap, ArcGIS, Google), the HTTP client seam used
//! to fetch tile payloads, and a registry resolving provider ids.
//!
//! # Factory Pattern
//!
//! For centralized provider creation, use the [`ProviderFactory`]:
//!
//! ```
//! use geomap::provider::{ProviderConfig, ProviderFactory, ProviderRegistry};
//!
//! let factory = ProviderFactory::new();
//! let registry = ProviderRegistry::new();
//! registry.register(factory.create(&ProviderConfig::yandex_satellite()).unwrap());
//! assert_eq!(registry.len(), 1);
//! ```

mod arcgis;
mod factory;
mod google;
mod http;
mod registry;
mod template;
mod types;
mod yandex;

pub use arcgis::{ArcGisProvider, ARCGIS_ID};
pub use factory::{ProviderConfig, ProviderFactory, OSM_ID};
pub use google::{GoogleMapsProvider, GOOGLE_ID};
pub use http::{AsyncHttpClient, ReqwestClient, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT};
pub use registry::ProviderRegistry;
pub use template::{UrlTemplateProvider, UrlTemplateProviderBuilder};
pub use types::{ProviderError, TileProvider, TileProviderInfo};
pub use yandex::{YandexLayer, YandexProvider, YANDEX_MAP_ID, YANDEX_SATELLITE_ID};

#[cfg(test)]
pub use http::tests::MockHttpClient;
