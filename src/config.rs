//! Configuration Module
//!
//! Handles loading and managing node configuration from environment variables.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::api::{PoolOptions, DEFAULT_BASE_PATH, DEFAULT_REPLICAS};
use crate::error::{CacheError, Result};

/// Node configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// This node's `host:port` as listed in the peer set
    pub self_addr: String,
    /// Every node of the cluster, this one included
    pub peers: Vec<String>,
    /// Name of the cache group served by this node
    pub group_name: String,
    /// Maximum weight of the group's local cache in bytes (0 = unbounded)
    pub cache_bytes: usize,
    /// Directory backing the loader, one file per key
    pub data_dir: PathBuf,
    /// Virtual nodes per peer on the hash ring
    pub replicas: usize,
    /// Deadline for a remote fetch in seconds
    pub peer_timeout_secs: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SELF_ADDR` - This node's address (default: localhost:8001)
    /// - `PEERS` - Comma-separated peer addresses (default: SELF_ADDR)
    /// - `GROUP_NAME` - Cache group name (default: scores)
    /// - `CACHE_BYTES` - Local cache size in bytes (default: 64 MiB)
    /// - `DATA_DIR` - Loader directory (default: ./data)
    /// - `REPLICAS` - Virtual nodes per peer (default: 50)
    /// - `PEER_TIMEOUT_SECS` - Remote fetch deadline (default: 10)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let self_addr = env::var("SELF_ADDR").unwrap_or(defaults.self_addr);
        let peers = env::var("PEERS")
            .ok()
            .map(|v| parse_peers(&v))
            .filter(|peers| !peers.is_empty())
            .unwrap_or_else(|| vec![self_addr.clone()]);

        Self {
            self_addr,
            peers,
            group_name: env::var("GROUP_NAME").unwrap_or(defaults.group_name),
            cache_bytes: env::var("CACHE_BYTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.cache_bytes),
            data_dir: env::var("DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            replicas: env::var("REPLICAS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.replicas),
            peer_timeout_secs: env::var("PEER_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.peer_timeout_secs),
        }
    }

    /// Socket to listen on: all interfaces, on the port of `self_addr`.
    pub fn listen_addr(&self) -> Result<SocketAddr> {
        let port = self
            .self_addr
            .rsplit_once(':')
            .and_then(|(_, port)| port.parse::<u16>().ok())
            .ok_or_else(|| {
                CacheError::Configuration(format!("no port in self address: {}", self.self_addr))
            })?;
        Ok(SocketAddr::from(([0, 0, 0, 0], port)))
    }

    /// Peer pool tuning derived from this configuration.
    pub fn pool_options(&self) -> PoolOptions {
        PoolOptions {
            base_path: DEFAULT_BASE_PATH.to_string(),
            replicas: self.replicas,
            timeout: Duration::from_secs(self.peer_timeout_secs),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            self_addr: "localhost:8001".to_string(),
            peers: vec!["localhost:8001".to_string()],
            group_name: "scores".to_string(),
            cache_bytes: 64 << 20,
            data_dir: PathBuf::from("./data"),
            replicas: DEFAULT_REPLICAS,
            peer_timeout_secs: 10,
        }
    }
}

fn parse_peers(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(String::from)
        .collect()
}
