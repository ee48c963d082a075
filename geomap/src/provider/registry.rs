//! Provider lookup by id.
//!
//! Tile keys carry only a [`ProviderId`]; the registry resolves that id to
//! the provider that knows how to address the tile. Lookups are
//! case-insensitive because ids are.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use crate::provider::TileProvider;
use crate::tile::ProviderId;

/// Thread-safe map from provider id to provider.
#[derive(Default)]
pub struct ProviderRegistry {
    providers: RwLock<HashMap<ProviderId, Arc<dyn TileProvider>>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the given providers.
    pub fn with_providers<I>(providers: I) -> Self
    where
        I: IntoIterator<Item = Arc<dyn TileProvider>>,
    {
        let registry = Self::new();
        for provider in providers {
            registry.register(provider);
        }
        registry
    }

    /// Register a provider, replacing any provider with the same id.
    ///
    /// Returns the replaced provider, if any.
    pub fn register(&self, provider: Arc<dyn TileProvider>) -> Option<Arc<dyn TileProvider>> {
        let id = provider.info().id().clone();
        debug!(provider = %id, "Registering tile provider");
        self.providers.write().insert(id, provider)
    }

    /// Look up a provider by id.
    pub fn get(&self, id: &ProviderId) -> Option<Arc<dyn TileProvider>> {
        self.providers.read().get(id).cloned()
    }

    /// Remove a provider.
    pub fn unregister(&self, id: &ProviderId) -> Option<Arc<dyn TileProvider>> {
        self.providers.write().remove(id)
    }

    /// Ids of all registered providers, sorted case-insensitively.
    pub fn ids(&self) -> Vec<ProviderId> {
        let mut ids: Vec<_> = self.providers.read().keys().cloned().collect();
        ids.sort_by(|a, b| a.normalized().cmp(b.normalized()));
        ids
    }

    pub fn len(&self) -> usize {
        self.providers.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.read().is_empty()
    }
}

impl std::fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("ids", &self.ids())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::{ArcGisProvider, YandexProvider, ARCGIS_ID};

    #[test]
    fn test_register_and_get_case_insensitive() {
        let registry = ProviderRegistry::new();
        registry.register(Arc::new(ArcGisProvider::new()));

        let found = registry.get(&ProviderId::new(ARCGIS_ID.to_uppercase()));
        assert!(found.is_some());
        assert!(registry.get(&ProviderId::new("missing")).is_none());
    }

    #[test]
    fn test_register_replaces_same_id() {
        let registry = ProviderRegistry::new();
        assert!(registry.register(Arc::new(ArcGisProvider::new())).is_none());
        assert!(registry.register(Arc::new(ArcGisProvider::new())).is_some());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_with_providers_and_ids() {
        let registry = ProviderRegistry::with_providers([
            Arc::new(YandexProvider::satellite()) as Arc<dyn TileProvider>,
            Arc::new(ArcGisProvider::new()),
        ]);
        let ids: Vec<_> = registry.ids().iter().map(|id| id.to_string()).collect();
        assert_eq!(ids, vec!["ArcGisWorldImagery", "YandexSatellite"]);
    }

    #[test]
    fn test_unregister() {
        let registry = ProviderRegistry::with_providers([
            Arc::new(ArcGisProvider::new()) as Arc<dyn TileProvider>
        ]);
        assert!(registry.unregister(&ProviderId::new(ARCGIS_ID)).is_some());
        assert!(registry.is_empty());
    }
}
