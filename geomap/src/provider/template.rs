//! URL-template raster provider.
//!
//! Most web tile services address tiles with a URL containing the zoom,
//! column and row. This provider expands such templates:
//!
//! | Placeholder | Value                                         |
//! |-------------|-----------------------------------------------|
//! | `{x}`       | Column (0 to 2^zoom - 1, west to east)        |
//! | `{y}`       | Row (0 to 2^zoom - 1, north to south)         |
//! | `{-y}`      | TMS row, `2^zoom - 1 - y` (south to north)    |
//! | `{z}`       | Zoom level                                    |
//! | `{s}`       | Server shard, `(x + y) % servers.len()`       |
//!
//! Templates must contain `{x}`, `{z}` and one of `{y}` / `{-y}`.

use crate::coord::{MapProjection, DEFAULT_TILE_SIZE, WEB_MERCATOR};
use crate::provider::{ProviderError, TileProvider, TileProviderInfo};
use crate::tile::TileKey;

/// Raster provider driven by a URL template.
///
/// # Example
///
/// ```
/// use geomap::provider::{TileProvider, UrlTemplateProvider};
/// use geomap::tile::TileKey;
///
/// let provider = UrlTemplateProvider::builder(
///     "osm",
///     "OpenStreetMap",
///     "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png",
/// )
/// .servers(["a", "b", "c"])
/// .max_zoom(19)
/// .build()
/// .unwrap();
///
/// let key = TileKey::new(1, 2, 3, "osm").unwrap();
/// assert_eq!(
///     provider.tile_url(&key).unwrap(),
///     "https://a.tile.openstreetmap.org/3/1/2.png"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct UrlTemplateProvider {
    info: TileProviderInfo,
    template: String,
    servers: Vec<String>,
    tile_size: u32,
    min_zoom: u16,
    max_zoom: u16,
}

/// Builder for [`UrlTemplateProvider`].
#[derive(Debug, Clone)]
pub struct UrlTemplateProviderBuilder {
    info: TileProviderInfo,
    template: String,
    servers: Vec<String>,
    tile_size: u32,
    min_zoom: u16,
    max_zoom: u16,
}

impl UrlTemplateProviderBuilder {
    /// Server names substituted for `{s}`.
    pub fn servers<I, S>(mut self, servers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.servers = servers.into_iter().map(Into::into).collect();
        self
    }

    pub fn tile_size(mut self, tile_size: u32) -> Self {
        self.tile_size = tile_size;
        self
    }

    pub fn min_zoom(mut self, zoom: u16) -> Self {
        self.min_zoom = zoom;
        self
    }

    pub fn max_zoom(mut self, zoom: u16) -> Self {
        self.max_zoom = zoom;
        self
    }

    /// Validate the template and build the provider.
    pub fn build(self) -> Result<UrlTemplateProvider, ProviderError> {
        let t = &self.template;
        if !t.contains("{x}") || !t.contains("{z}") {
            return Err(ProviderError::InvalidTemplate(format!(
                "'{}' must contain {{x}} and {{z}}",
                t
            )));
        }
        if !t.contains("{y}") && !t.contains("{-y}") {
            return Err(ProviderError::InvalidTemplate(format!(
                "'{}' must contain {{y}} or {{-y}}",
                t
            )));
        }
        if t.contains("{s}") && self.servers.is_empty() {
            return Err(ProviderError::InvalidTemplate(format!(
                "'{}' uses {{s}} but no servers were given",
                t
            )));
        }
        if self.tile_size == 0 {
            return Err(ProviderError::InvalidTemplate(
                "tile size must be positive".to_string(),
            ));
        }
        if self.min_zoom > self.max_zoom {
            return Err(ProviderError::InvalidTemplate(format!(
                "min zoom {} above max zoom {}",
                self.min_zoom, self.max_zoom
            )));
        }

        Ok(UrlTemplateProvider {
            info: self.info,
            template: self.template,
            servers: self.servers,
            tile_size: self.tile_size,
            min_zoom: self.min_zoom,
            max_zoom: self.max_zoom,
        })
    }
}

impl UrlTemplateProvider {
    /// Start building a provider with zoom range 0..=19 and 256px tiles.
    pub fn builder(
        id: &str,
        display_name: &str,
        template: impl Into<String>,
    ) -> UrlTemplateProviderBuilder {
        UrlTemplateProviderBuilder {
            info: TileProviderInfo::new(id, display_name),
            template: template.into(),
            servers: Vec::new(),
            tile_size: DEFAULT_TILE_SIZE,
            min_zoom: 0,
            max_zoom: 19,
        }
    }

    /// The raw template.
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Expands the template for in-grid coordinates.
    fn build_url(&self, x: i32, y: i32, zoom: u16) -> String {
        let mut url = self.template.replace("{x}", &x.to_string());

        if url.contains("{-y}") {
            let tms_y = (1i32 << zoom) - 1 - y;
            url = url.replace("{-y}", &tms_y.to_string());
        }
        url = url
            .replace("{y}", &y.to_string())
            .replace("{z}", &zoom.to_string());

        if !self.servers.is_empty() {
            let shard = (x as usize + y as usize) % self.servers.len();
            url = url.replace("{s}", &self.servers[shard]);
        }

        url
    }
}

impl TileProvider for UrlTemplateProvider {
    fn info(&self) -> &TileProviderInfo {
        &self.info
    }

    fn projection(&self) -> &'static dyn MapProjection {
        &WEB_MERCATOR
    }

    fn tile_size(&self) -> u32 {
        self.tile_size
    }

    fn min_zoom(&self) -> u16 {
        self.min_zoom
    }

    fn max_zoom(&self) -> u16 {
        self.max_zoom
    }

    fn tile_url(&self, key: &TileKey) -> Option<String> {
        if !self.accepts(key) {
            return None;
        }
        Some(self.build_url(key.x(), key.y(), key.zoom()))
    }
}
