//! Case-insensitive provider identifier.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Identifier of a tile source.
///
/// Comparison and hashing ignore case so that `"Yandex"` and `"yandex"`
/// address the same cache entries. The original spelling is kept for display.
/// Cloning is cheap (two reference-count bumps).
#[derive(Clone)]
pub struct ProviderId {
    display: Arc<str>,
    normalized: Arc<str>,
}

impl ProviderId {
    /// Creates an identifier from any string.
    pub fn new(id: impl AsRef<str>) -> Self {
        let id = id.as_ref();
        Self {
            display: Arc::from(id),
            normalized: Arc::from(id.to_lowercase()),
        }
    }

    /// The identifier as originally spelled.
    pub fn as_str(&self) -> &str {
        &self.display
    }

    /// The lowercase form used for comparison.
    pub fn normalized(&self) -> &str {
        &self.normalized
    }
}

impl PartialEq for ProviderId {
    fn eq(&self, other: &Self) -> bool {
        self.normalized == other.normalized
    }
}

impl Eq for ProviderId {}

impl Hash for ProviderId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.normalized.hash(state);
    }
}

impl fmt::Debug for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ProviderId").field(&&*self.display).finish()
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display)
    }
}

impl From<&str> for ProviderId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ProviderId {
    fn from(id: String) -> Self {
        Self::new(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;

    fn hash_of(id: &ProviderId) -> u64 {
        let mut hasher = DefaultHasher::new();
        id.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_equality_ignores_case() {
        assert_eq!(ProviderId::new("YandexSatellite"), ProviderId::new("yandexsatellite"));
        assert_ne!(ProviderId::new("yandex"), ProviderId::new("osm"));
    }

    #[test]
    fn test_hash_ignores_case() {
        assert_eq!(
            hash_of(&ProviderId::new("OSM")),
            hash_of(&ProviderId::new("osm"))
        );
    }

    #[test]
    fn test_display_keeps_original_spelling() {
        let id = ProviderId::new("ArcGIS");
        assert_eq!(id.to_string(), "ArcGIS");
        assert_eq!(id.normalized(), "arcgis");
    }

    #[test]
    fn test_non_ascii_case_folding() {
        assert_eq!(ProviderId::new("Карта"), ProviderId::new("КАРТА"));
    }
}
