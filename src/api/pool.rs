//! HTTP Peer Pool
//!
//! Knows every peer of this node and picks the owner of a key with the
//! consistent hash ring.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tracing::{debug, info};

use crate::api::HttpGetter;
use crate::cluster::{check_addr, HashRing, PeerGetter, PeerPicker};
use crate::error::{CacheError, Result};

/// Default transport root on every node.
pub const DEFAULT_BASE_PATH: &str = "/_peercache/";

/// Default virtual nodes per peer.
pub const DEFAULT_REPLICAS: usize = 50;

/// Tuning for an [`HttpPool`].
#[derive(Debug, Clone)]
pub struct PoolOptions {
    pub base_path: String,
    pub replicas: usize,
    /// Deadline for a single remote fetch
    pub timeout: Duration,
}

impl Default for PoolOptions {
    fn default() -> Self {
        Self {
            base_path: DEFAULT_BASE_PATH.to_string(),
            replicas: DEFAULT_REPLICAS,
            timeout: Duration::from_secs(10),
        }
    }
}

#[derive(Default)]
struct PoolState {
    ring: Option<HashRing>,
    getters: HashMap<String, Arc<HttpGetter>>,
}

// == HTTP Pool ==
/// Peer set of one node, reachable over HTTP.
pub struct HttpPool {
    /// This node's own `host:port`
    self_addr: String,
    opts: PoolOptions,
    client: reqwest::Client,
    state: Mutex<PoolState>,
}

impl HttpPool {
    // == Constructor ==
    pub fn new(self_addr: impl Into<String>, opts: PoolOptions) -> Result<Self> {
        let self_addr = self_addr.into();
        if !check_addr(&self_addr) {
            return Err(CacheError::Configuration(format!(
                "invalid self address: {}",
                self_addr
            )));
        }

        let client = reqwest::Client::builder()
            .timeout(opts.timeout)
            .build()
            .map_err(|e| CacheError::Configuration(format!("building http client: {}", e)))?;

        Ok(Self {
            self_addr,
            opts,
            client,
            state: Mutex::new(PoolState::default()),
        })
    }

    pub fn self_addr(&self) -> &str {
        &self.self_addr
    }

    pub fn base_path(&self) -> &str {
        &self.opts.base_path
    }

    // == Set Peers ==
    /// Replaces the peer set. Every address must pass [`check_addr`]; on any
    /// invalid address the current peer set is left untouched.
    pub fn set_peers<S: AsRef<str>>(&self, peers: &[S]) -> Result<()> {
        if let Some(bad) = peers.iter().find(|p| !check_addr((*p).as_ref())) {
            let bad: &str = bad.as_ref();
            return Err(CacheError::Configuration(format!(
                "invalid peer address: {}",
                bad
            )));
        }

        let mut ring = HashRing::new(self.opts.replicas, None);
        ring.add(peers);

        let getters = peers
            .iter()
            .map(|peer| {
                let peer: &str = peer.as_ref();
                let base_url = format!("http://{}{}", peer, self.opts.base_path);
                (
                    peer.to_string(),
                    Arc::new(HttpGetter::new(base_url, self.client.clone())),
                )
            })
            .collect();

        let mut state = self.state.lock();
        state.ring = Some(ring);
        state.getters = getters;
        info!(self_addr = %self.self_addr, peers = peers.len(), "peer set updated");
        Ok(())
    }

    /// Number of configured peers, including this node when listed.
    pub fn peer_count(&self) -> usize {
        self.state.lock().getters.len()
    }
}

impl fmt::Debug for HttpPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("HttpPool")
            .field("self_addr", &self.self_addr)
            .field("opts", &self.opts)
            .field("peers", &state.getters.len())
            .field("ring_positions", &state.ring.as_ref().map_or(0, HashRing::len))
            .finish()
    }
}

impl PeerPicker for HttpPool {
    fn pick_peer(&self, key: &str) -> Option<Arc<dyn PeerGetter>> {
        let state = self.state.lock();
        let peer = state.ring.as_ref()?.get(key)?;
        if peer == self.self_addr {
            return None;
        }
        debug!(self_addr = %self.self_addr, peer, key, "picked remote peer");
        state
            .getters
            .get(peer)
            .map(|getter| getter.clone() as Arc<dyn PeerGetter>)
    }
}
