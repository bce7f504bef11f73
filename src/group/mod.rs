//! Group Module
//!
//! A group is a named cache space: a local LRU cache, the loader that fills it,
//! and an optional view of peers that own keys remotely. `Group::get` runs the
//! whole read-through path:
//!
//! 1. Local cache hit → return
//! 2. Miss → coalesce with concurrent loads of the same key
//! 3. Remote owner picked → fetch from the peer, falling back to the loader on failure
//! 4. No remote owner → call the loader
//! 5. Populate the local cache and return the value to every waiter
//!
//! A loader must not call `get` on its own group for the key it is loading: the
//! nested call waits on the load that is running it and never returns.

mod getter;
pub mod registry;
mod singleflight;

use std::fmt;
use std::sync::{Arc, OnceLock};

use tracing::{debug, warn};

use crate::cache::{ByteView, GroupStats, MainCache, StatsSnapshot};
use crate::cluster::{PeerGetter, PeerPicker};
use crate::error::{CacheError, Result};
use crate::models::FetchRequest;

pub use getter::{Getter, GetterFunc};
pub use registry::{get_group, new_group};
pub use singleflight::SingleFlight;

// == Group ==
/// A named, independently sized read-through cache.
pub struct Group {
    name: String,
    getter: Box<dyn Getter>,
    main_cache: MainCache,
    peers: OnceLock<Arc<dyn PeerPicker>>,
    loader: SingleFlight<Result<ByteView>>,
    stats: GroupStats,
}

impl Group {
    // == Constructor ==
    /// Creates a group without registering it. See [`new_group`] for the
    /// registered variant.
    pub fn new(name: impl Into<String>, cache_bytes: usize, getter: impl Getter + 'static) -> Self {
        Self {
            name: name.into(),
            getter: Box::new(getter),
            main_cache: MainCache::new(cache_bytes),
            peers: OnceLock::new(),
            loader: SingleFlight::new(),
            stats: GroupStats::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    // == Register Peers ==
    /// Installs the peer picker used to route misses to their owners.
    ///
    /// May be called once; a second call is a configuration error and keeps the
    /// first picker.
    pub fn register_peers(&self, peers: Arc<dyn PeerPicker>) -> Result<()> {
        self.peers.set(peers).map_err(|_| {
            CacheError::Configuration(format!(
                "peers already registered for group {}",
                self.name
            ))
        })
    }

    // == Get ==
    /// Returns the value for `key`, loading it on a miss.
    pub async fn get(&self, key: &str) -> Result<ByteView> {
        if key.is_empty() {
            return Err(CacheError::InvalidArgument("key is required".to_string()));
        }
        self.stats.record_get();

        if let Some(view) = self.main_cache.get(key) {
            debug!(group = %self.name, key, "cache hit");
            self.stats.record_hit();
            return Ok(view);
        }
        self.load(key).await
    }

    async fn load(&self, key: &str) -> Result<ByteView> {
        self.stats.record_load();
        self.loader
            .run(key, || async {
                self.stats.record_load_deduped();
                if let Some(peer) = self.peers.get().and_then(|p| p.pick_peer(key)) {
                    match self.get_from_peer(key, peer.as_ref()).await {
                        Ok(view) => {
                            self.stats.record_peer_load();
                            return Ok(view);
                        }
                        Err(err) => {
                            self.stats.record_peer_error();
                            warn!(group = %self.name, key, error = %err, "failed to get from peer");
                        }
                    }
                }
                self.get_locally(key).await
            })
            .await
    }

    async fn get_locally(&self, key: &str) -> Result<ByteView> {
        let bytes = match self.getter.get(key).await {
            Ok(bytes) => bytes,
            Err(err) => {
                self.stats.record_local_load_err();
                return Err(err);
            }
        };
        self.stats.record_local_load();

        // The loader hands over ownership, so no one else can mutate these bytes.
        let view = ByteView::from(bytes);
        self.populate_cache(key, view.clone());
        Ok(view)
    }

    async fn get_from_peer(&self, key: &str, peer: &dyn PeerGetter) -> Result<ByteView> {
        let req = FetchRequest::new(self.name.as_str(), key);
        let bytes = peer.get(&req).await?;
        let view = ByteView::from(bytes);
        self.populate_cache(key, view.clone());
        Ok(view)
    }

    fn populate_cache(&self, key: &str, value: ByteView) {
        self.main_cache.add(key, value);
    }

    // == Stats ==
    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    /// Number of entries and total weight held in the local cache.
    pub fn cache_usage(&self) -> (usize, usize) {
        (self.main_cache.len(), self.main_cache.bytes())
    }
}

impl fmt::Debug for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Group")
            .field("name", &self.name)
            .field("main_cache", &self.main_cache)
            .field("has_peers", &self.peers.get().is_some())
            .finish()
    }
}
