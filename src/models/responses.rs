//! Response DTOs for the cache node API
//!
//! Defines the structure of outgoing JSON response bodies.

use serde::Serialize;

use crate::cache::StatsSnapshot;

/// Response body for the stats endpoint (GET /stats/:group)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// The group name
    pub group: String,
    /// Request counters
    #[serde(flatten)]
    pub counters: StatsSnapshot,
    /// Entries currently held in the local cache
    pub cached_entries: usize,
    /// Weight (bytes) currently held in the local cache
    pub cached_bytes: usize,
    /// Hit rate (cache_hits / gets)
    pub hit_rate: f64,
}

impl StatsResponse {
    /// Creates a new StatsResponse from a group's counters
    pub fn new(
        group: impl Into<String>,
        counters: StatsSnapshot,
        cached_entries: usize,
        cached_bytes: usize,
    ) -> Self {
        Self {
            group: group.into(),
            hit_rate: counters.hit_rate(),
            counters,
            cached_entries,
            cached_bytes,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Address this node is known by in the peer set
    pub self_addr: String,
    /// Number of configured peers, including this node
    pub peers: usize,
}

impl HealthResponse {
    /// Creates a healthy HealthResponse
    pub fn healthy(self_addr: impl Into<String>, peers: usize) -> Self {
        Self {
            status: "healthy".to_string(),
            self_addr: self_addr.into(),
            peers,
        }
    }
}
