//! The tile loader service.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use image::Rgba;
use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::sync::{broadcast, watch, Semaphore};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::LoadError;
use crate::cache::TileCache;
use crate::config::TileLoaderConfig;
use crate::coord::DEFAULT_TILE_SIZE;
use crate::provider::{AsyncHttpClient, ProviderError, ProviderRegistry, ReqwestClient};
use crate::telemetry::{LoaderMetrics, TelemetrySnapshot};
use crate::tile::{TileBitmap, TileKey};

/// Bookkeeping guarded by the loader lock.
///
/// Cache mutations happen while this lock is held so that "cached" and
/// "in flight" are never both true for a key.
struct LoaderState {
    in_flight: HashSet<TileKey>,
    /// Placeholder bitmaps by tile size, for the current colour.
    placeholders: HashMap<u32, Arc<TileBitmap>>,
}

struct Inner {
    registry: Arc<ProviderRegistry>,
    client: Arc<dyn AsyncHttpClient>,
    runtime: Handle,
    cache: TileCache,
    state: Mutex<LoaderState>,
    fetch_limiter: Semaphore,
    loaded_tx: broadcast::Sender<TileKey>,
    empty_color: watch::Sender<Rgba<u8>>,
    metrics: LoaderMetrics,
    shutdown: CancellationToken,
}

/// Non-blocking tile cache that fetches misses in the background.
///
/// Hold one per application and share it by `Arc`. Dropping the loader
/// shuts it down.
pub struct TileLoader {
    inner: Arc<Inner>,
}

impl TileLoader {
    /// Create a loader that spawns fetches on `runtime`.
    pub fn new(
        config: TileLoaderConfig,
        registry: Arc<ProviderRegistry>,
        client: Arc<dyn AsyncHttpClient>,
        runtime: Handle,
    ) -> Self {
        let (loaded_tx, _) = broadcast::channel(config.notification_capacity.max(1));
        let (empty_color, _) = watch::channel(config.empty_tile_color);

        info!(
            max_cache_bytes = config.max_cache_bytes,
            max_concurrent_fetches = config.max_concurrent_fetches,
            providers = registry.len(),
            "Tile loader started"
        );

        Self {
            inner: Arc::new(Inner {
                registry,
                client,
                runtime,
                cache: TileCache::new(config.max_cache_bytes),
                state: Mutex::new(LoaderState {
                    in_flight: HashSet::new(),
                    placeholders: HashMap::new(),
                }),
                fetch_limiter: Semaphore::new(config.max_concurrent_fetches.max(1)),
                loaded_tx,
                empty_color,
                metrics: LoaderMetrics::new(),
                shutdown: CancellationToken::new(),
            }),
        }
    }

    /// Create a loader fetching over HTTP with the configured timeout and
    /// user agent.
    pub fn with_http(
        config: TileLoaderConfig,
        registry: Arc<ProviderRegistry>,
        runtime: Handle,
    ) -> Result<Self, ProviderError> {
        let client = ReqwestClient::with_options(config.request_timeout, &config.user_agent)?;
        Ok(Self::new(config, registry, Arc::new(client), runtime))
    }

    /// Return the bitmap for `key`, or a placeholder while it loads.
    ///
    /// Never blocks on I/O. A miss starts a background fetch unless one is
    /// already running for the key or the provider cannot serve it.
    /// Subscribers are told when the real bitmap becomes available.
    pub fn get(&self, key: &TileKey) -> Arc<TileBitmap> {
        let inner = &self.inner;
        let mut state = inner.state.lock();

        if let Some(bitmap) = inner.cache.get(key) {
            inner.metrics.cache_hit();
            return bitmap;
        }
        inner.metrics.cache_miss();

        let provider = inner.registry.get(key.provider());
        let tile_size = provider
            .as_ref()
            .map_or(DEFAULT_TILE_SIZE, |p| p.tile_size());
        let placeholder = inner.placeholder(&mut state, tile_size);

        if inner.shutdown.is_cancelled() {
            return placeholder;
        }

        if state.in_flight.contains(key) {
            inner.metrics.deduplicated();
            return placeholder;
        }

        let Some(url) = provider.and_then(|p| p.tile_url(key)) else {
            inner.metrics.declined();
            debug!(tile = %key, "{}", LoadError::Unsupported);
            return placeholder;
        };

        state.in_flight.insert(key.clone());
        drop(state);

        debug!(tile = %key, url = %url, "Fetching tile");
        inner.spawn_fetch(key.clone(), url);
        placeholder
    }

    /// Cached bitmap for `key`, without fetching.
    pub fn try_get(&self, key: &TileKey) -> Option<Arc<TileBitmap>> {
        self.inner.cache.get(key)
    }

    /// Receive the key of every tile freshly committed to the cache.
    ///
    /// A key arrives only after `get` can return its bitmap. Receivers that
    /// fall behind see `RecvError::Lagged`.
    pub fn subscribe(&self) -> broadcast::Receiver<TileKey> {
        self.inner.loaded_tx.subscribe()
    }

    /// Current placeholder colour.
    pub fn empty_tile_color(&self) -> Rgba<u8> {
        *self.inner.empty_color.borrow()
    }

    /// Change the placeholder colour for all future placeholders.
    ///
    /// Watchers are notified only when the colour actually changes.
    pub fn set_empty_tile_color(&self, color: Rgba<u8>) {
        let mut state = self.inner.state.lock();
        let changed = self.inner.empty_color.send_if_modified(|current| {
            if *current == color {
                false
            } else {
                *current = color;
                true
            }
        });

        if changed {
            state.placeholders.clear();
            debug!(color = ?color.0, "Empty tile colour changed");
        }
    }

    /// Observe placeholder colour changes.
    pub fn watch_empty_tile_color(&self) -> watch::Receiver<Rgba<u8>> {
        self.inner.empty_color.subscribe()
    }

    /// Drop the cached bitmap for `key` and fetch it again.
    ///
    /// Until the new bitmap arrives `get` returns the placeholder.
    pub fn reload(&self, key: &TileKey) {
        {
            let _state = self.inner.state.lock();
            if self.inner.cache.remove(key).is_some() {
                debug!(tile = %key, "Reloading tile");
            }
        }
        self.get(key);
    }

    /// Number of fetches started and not yet finished.
    pub fn in_flight_count(&self) -> usize {
        self.inner.state.lock().in_flight.len()
    }

    /// Number of bitmaps in the cache.
    pub fn cached_count(&self) -> u64 {
        self.inner.cache.entry_count()
    }

    /// Decoded bytes held by the cache.
    pub fn cached_bytes(&self) -> u64 {
        self.inner.cache.size_bytes()
    }

    pub fn metrics(&self) -> TelemetrySnapshot {
        self.inner.metrics.snapshot()
    }

    /// Cancel outstanding fetches and release cached bitmaps.
    ///
    /// Fetches cancelled here never notify. Later `get` calls return
    /// placeholders without fetching. Idempotent.
    pub fn shutdown(&self) {
        let inner = &self.inner;
        if inner.shutdown.is_cancelled() {
            return;
        }
        inner.shutdown.cancel();

        let mut state = inner.state.lock();
        let pending = state.in_flight.len();
        state.in_flight.clear();
        state.placeholders.clear();
        inner.cache.clear();

        info!(pending, "Tile loader shut down");
    }

    pub fn is_shutdown(&self) -> bool {
        self.inner.shutdown.is_cancelled()
    }
}

impl Drop for TileLoader {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl std::fmt::Debug for TileLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TileLoader")
            .field("cache", &self.inner.cache)
            .field("shutdown", &self.inner.shutdown.is_cancelled())
            .finish()
    }
}

impl Inner {
    fn placeholder(&self, state: &mut LoaderState, tile_size: u32) -> Arc<TileBitmap> {
        let color = *self.empty_color.borrow();
        state
            .placeholders
            .entry(tile_size)
            .or_insert_with(|| Arc::new(TileBitmap::placeholder(tile_size, color)))
            .clone()
    }

    fn spawn_fetch(self: &Arc<Self>, key: TileKey, url: String) {
        let guard = InFlightGuard {
            inner: Arc::clone(self),
            key,
            armed: true,
        };
        self.runtime.spawn(guard.run(url));
    }

    /// Download and decode one tile, holding a fetch permit throughout.
    async fn load(&self, url: &str) -> Result<(TileBitmap, usize), LoadError> {
        let _permit = self
            .fetch_limiter
            .acquire()
            .await
            .map_err(|_| LoadError::Cancelled)?;
        self.metrics.fetch_started();

        let data = self.client.get(url).await?;
        let encoded_len = data.len();

        let bitmap = tokio::task::spawn_blocking(move || TileBitmap::decode(&data))
            .await
            .map_err(|_| LoadError::Cancelled)??;

        Ok((bitmap, encoded_len))
    }

    fn commit(&self, guard: &mut InFlightGuard, bitmap: TileBitmap, encoded_len: usize) {
        let key = guard.key.clone();
        {
            let mut state = self.state.lock();
            guard.settle(&mut state);
            if self.shutdown.is_cancelled() {
                debug!(tile = %key, "Discarding tile loaded during shutdown");
                return;
            }
            self.cache.insert(key.clone(), Arc::new(bitmap));
        }

        self.metrics.tile_loaded(encoded_len as u64);
        debug!(tile = %key, bytes = encoded_len, "Tile loaded");

        // Err only means nobody is subscribed
        let _ = self.loaded_tx.send(key);
    }

    fn abandon(&self, guard: &mut InFlightGuard, url: &str, error: LoadError) {
        guard.settle(&mut self.state.lock());
        let key = &guard.key;

        match &error {
            LoadError::Cancelled => {
                debug!(tile = %key, "Tile fetch cancelled");
                return;
            }
            LoadError::Unsupported => self.metrics.declined(),
            LoadError::Fetch(_) => self.metrics.fetch_failed(),
            LoadError::Decode(_) => self.metrics.decode_failed(),
        }
        warn!(tile = %key, url = %url, error = %error, "Tile load failed");
    }
}

/// In-flight marker of one fetch task.
///
/// Cleared on drop unless the task settled it, so a task that never runs
/// (runtime gone) or panics does not block later fetches of the key.
struct InFlightGuard {
    inner: Arc<Inner>,
    key: TileKey,
    armed: bool,
}

impl InFlightGuard {
    async fn run(mut self, url: String) {
        let inner = Arc::clone(&self.inner);
        let result = tokio::select! {
            _ = inner.shutdown.cancelled() => Err(LoadError::Cancelled),
            result = inner.load(&url) => result,
        };

        match result {
            Ok((bitmap, encoded_len)) => inner.commit(&mut self, bitmap, encoded_len),
            Err(e) => inner.abandon(&mut self, &url, e),
        }
    }

    /// Clear the marker under an already held state lock.
    fn settle(&mut self, state: &mut LoaderState) {
        state.in_flight.remove(&self.key);
        self.armed = false;
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        if self.armed {
            self.inner.state.lock().in_flight.remove(&self.key);
        }
    }
}
