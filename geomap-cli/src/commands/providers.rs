//! `providers` command: list registered tile sources.

use geomap::config::ConfigFile;

use super::common::{build_registry, resolve_provider};
use crate::error::CliError;

/// Print every registered provider with its zoom range and tile size.
///
/// The configured default is marked with `*`.
pub fn run(config: &ConfigFile) -> Result<(), CliError> {
    let registry = build_registry(config);
    let default_id = resolve_provider(None, config, &registry)
        .ok()
        .map(|provider| provider.info().id().clone());

    println!("{:<22} {:<28} {:>5} {:>5}", "ID", "NAME", "ZOOM", "SIZE");
    for id in registry.ids() {
        let Some(provider) = registry.get(&id) else {
            continue;
        };
        let marker = if default_id.as_ref() == Some(&id) { " *" } else { "" };
        println!(
            "{:<22} {:<28} {:>5} {:>5}{}",
            id.as_str(),
            provider.info().display_name(),
            format!("{}-{}", provider.min_zoom(), provider.max_zoom()),
            provider.tile_size(),
            marker
        );
    }
    Ok(())
}
