//! Asynchronous tile loading.
//!
//! The [`TileLoader`] answers tile lookups synchronously and fills the
//! cache in the background:
//!
//! ```text
//! get(key) ──► ┌─────────────┐
//!              │ Cache check │──► Hit ──► cached bitmap
//!              └──────┬──────┘
//!                     │ Miss
//!                     ▼
//!              ┌─────────────┐
//!              │  In flight? │──► Yes ──► placeholder
//!              └──────┬──────┘
//!                     │ No
//!                     ▼
//!              ┌─────────────┐
//!              │ tile_url()  │──► None ──► placeholder (declined)
//!              └──────┬──────┘
//!                     │ Some(url)
//!                     ▼
//!              spawn fetch task ──► placeholder
//!
//! fetch task:  permit ──► HTTP GET ──► decode (blocking pool)
//!                     ──► cache insert ──► broadcast key
//! ```
//!
//! Failures leave no trace beyond a log line and a counter; the next `get`
//! for the key tries again.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use geomap::config::TileLoaderConfig;
//! use geomap::loader::TileLoader;
//! use geomap::provider::{ProviderFactory, ProviderRegistry};
//! use geomap::tile::TileKey;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = Arc::new(ProviderRegistry::with_providers(ProviderFactory::new().builtin()));
//! let loader = TileLoader::with_http(
//!     TileLoaderConfig::default(),
//!     registry,
//!     tokio::runtime::Handle::current(),
//! )?;
//!
//! let mut loaded = loader.subscribe();
//! let key = TileKey::new(1, 1, 2, "OpenStreetMap")?;
//! let _placeholder = loader.get(&key);
//! assert_eq!(loaded.recv().await?, key);
//! # Ok(())
//! # }
//! ```

mod error;
mod service;

pub use error::LoadError;
pub use service::TileLoader;
