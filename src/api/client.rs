//! HTTP Peer Client
//!
//! Fetches values from another node's cache endpoint.

use async_trait::async_trait;
use bytes::Bytes;

use crate::cluster::PeerGetter;
use crate::error::{CacheError, Result};
use crate::models::FetchRequest;

/// Client for one remote peer.
///
/// `base_url` is the peer's transport root, e.g. `http://10.0.0.2:8001/_peercache/`.
#[derive(Debug, Clone)]
pub struct HttpGetter {
    base_url: String,
    client: reqwest::Client,
}

impl HttpGetter {
    /// Creates a getter sharing `client`'s connection pool and timeout.
    pub fn new(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.into(),
            client,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl PeerGetter for HttpGetter {
    async fn get(&self, req: &FetchRequest) -> Result<Bytes> {
        let url = format!("{}{}", self.base_url, req.path());

        let res = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| CacheError::RemoteFetch(format!("{}: {}", url, e)))?;

        if !res.status().is_success() {
            return Err(CacheError::RemoteFetch(format!(
                "{}: server returned {}",
                url,
                res.status()
            )));
        }

        res.bytes()
            .await
            .map_err(|e| CacheError::RemoteFetch(format!("reading response body: {}", e)))
    }
}
