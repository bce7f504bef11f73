//! Peer Capabilities
//!
//! Boundary between a group and whatever transport reaches other nodes.

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::Result;
use crate::models::FetchRequest;

/// Locates the peer that owns a key.
pub trait PeerPicker: Send + Sync {
    /// Returns the owning remote peer, or `None` when the key should be served locally.
    fn pick_peer(&self, key: &str) -> Option<Arc<dyn PeerGetter>>;
}

/// Fetches a value from a remote peer.
#[async_trait]
pub trait PeerGetter: Send + Sync {
    /// Returns the raw value bytes for `req`; any error makes the caller fall back
    /// to its local loader.
    async fn get(&self, req: &FetchRequest) -> Result<Bytes>;
}
