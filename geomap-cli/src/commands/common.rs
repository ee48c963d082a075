//! Common types and utilities shared across CLI commands.

use std::path::Path;
use std::sync::Arc;

use geomap::config::ConfigFile;
use geomap::provider::{ProviderConfig, ProviderError, ProviderFactory, ProviderRegistry};
use geomap::tile::ProviderId;
use geomap::TileProvider;

use crate::error::CliError;

/// Load the configuration from `path`, or from the default location.
///
/// A missing default file yields defaults; a missing explicit file is an error.
pub fn load_config(path: Option<&Path>) -> Result<ConfigFile, CliError> {
    let config = match path {
        Some(path) => ConfigFile::load_from(path)?,
        None => ConfigFile::load()?,
    };
    Ok(config)
}

/// Registry with the built-in providers, plus Google when a key is configured.
pub fn build_registry(config: &ConfigFile) -> Arc<ProviderRegistry> {
    let factory = ProviderFactory::new();
    let registry = ProviderRegistry::with_providers(factory.builtin());

    if let Some(api_key) = &config.provider.google_api_key {
        match factory.create(&ProviderConfig::google(api_key.clone())) {
            Ok(provider) => {
                registry.register(provider);
            }
            Err(e) => tracing::warn!(error = %e, "Google provider not available"),
        }
    }

    Arc::new(registry)
}

/// Resolve a provider from a preset name (`osm`, `yandex`) or a provider id.
///
/// CLI takes precedence, then the configured default.
pub fn resolve_provider(
    cli_provider: Option<&str>,
    config: &ConfigFile,
    registry: &ProviderRegistry,
) -> Result<Arc<dyn TileProvider>, CliError> {
    let name = cli_provider.unwrap_or(&config.provider.default);

    let id = ProviderConfig::from_name(name)
        .and_then(|preset| ProviderFactory::new().create(&preset).ok())
        .map(|provider| provider.info().id().clone())
        .unwrap_or_else(|| ProviderId::new(name));

    registry
        .get(&id)
        .ok_or_else(|| CliError::Provider(ProviderError::UnknownProvider(name.to_string())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use geomap::provider::OSM_ID;

    #[test]
    fn test_resolve_preset_name() {
        let config = ConfigFile::default();
        let registry = build_registry(&config);

        let provider = resolve_provider(Some("osm"), &config, &registry).unwrap();
        assert_eq!(provider.info().id().as_str(), OSM_ID);
    }

    #[test]
    fn test_resolve_raw_id_case_insensitive() {
        let config = ConfigFile::default();
        let registry = build_registry(&config);

        let provider = resolve_provider(Some("arcgisworldimagery"), &config, &registry).unwrap();
        assert_eq!(provider.info().id().as_str(), "ArcGisWorldImagery");
    }

    #[test]
    fn test_resolve_falls_back_to_config_default() {
        let mut config = ConfigFile::default();
        config.provider.default = "yandex".to_string();
        let registry = build_registry(&config);

        let provider = resolve_provider(None, &config, &registry).unwrap();
        assert_eq!(provider.info().id().as_str(), "YandexSatellite");
    }

    #[test]
    fn test_unknown_provider() {
        let config = ConfigFile::default();
        let registry = build_registry(&config);

        let result = resolve_provider(Some("nowhere"), &config, &registry);
        assert!(matches!(result, Err(CliError::Provider(_))));
    }

    #[test]
    fn test_google_registered_with_key() {
        let mut config = ConfigFile::default();
        config.provider.google_api_key = Some("key".to_string());
        let registry = build_registry(&config);

        assert_eq!(registry.len(), 5);
    }

    #[test]
    fn test_load_explicit_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_config(Some(&dir.path().join("missing.ini")));
        assert!(result.is_err());
    }
}
