//! Cache Statistics Module
//!
//! Tracks per-group counters for gets, hits, and load sources.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

// == Group Stats ==
/// Lock-free counters updated on the request path of a group.
#[derive(Debug, Default)]
pub struct GroupStats {
    gets: AtomicU64,
    cache_hits: AtomicU64,
    peer_loads: AtomicU64,
    peer_errors: AtomicU64,
    loads: AtomicU64,
    loads_deduped: AtomicU64,
    local_loads: AtomicU64,
    local_load_errs: AtomicU64,
}

macro_rules! counter {
    ($($name:ident => $field:ident),* $(,)?) => {
        $(
            pub fn $name(&self) {
                self.$field.fetch_add(1, Ordering::Relaxed);
            }
        )*
    };
}

impl GroupStats {
    // == Constructor ==
    pub fn new() -> Self {
        Self::default()
    }

    counter! {
        record_get => gets,
        record_hit => cache_hits,
        record_peer_load => peer_loads,
        record_peer_error => peer_errors,
        record_load => loads,
        record_load_deduped => loads_deduped,
        record_local_load => local_loads,
        record_local_load_err => local_load_errs,
    }

    // == Snapshot ==
    /// Returns a point-in-time copy of all counters.
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            gets: self.gets.load(Ordering::Relaxed),
            cache_hits: self.cache_hits.load(Ordering::Relaxed),
            peer_loads: self.peer_loads.load(Ordering::Relaxed),
            peer_errors: self.peer_errors.load(Ordering::Relaxed),
            loads: self.loads.load(Ordering::Relaxed),
            loads_deduped: self.loads_deduped.load(Ordering::Relaxed),
            local_loads: self.local_loads.load(Ordering::Relaxed),
            local_load_errs: self.local_load_errs.load(Ordering::Relaxed),
        }
    }
}

// == Stats Snapshot ==
/// Copy of a group's counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatsSnapshot {
    /// Any `get` request, including those served by peers
    pub gets: u64,
    /// Requests answered from the local cache
    pub cache_hits: u64,
    /// Successful remote fetches
    pub peer_loads: u64,
    /// Failed remote fetches (fell back to the local loader)
    pub peer_errors: u64,
    /// Cache misses, before coalescing
    pub loads: u64,
    /// Loads actually executed after coalescing
    pub loads_deduped: u64,
    /// Successful local loader calls
    pub local_loads: u64,
    /// Failed local loader calls
    pub local_load_errs: u64,
}

impl StatsSnapshot {
    // == Hit Rate ==
    /// Calculates the local cache hit rate.
    ///
    /// Returns cache_hits / gets, or 0.0 if no requests have been made.
    pub fn hit_rate(&self) -> f64 {
        if self.gets == 0 {
            0.0
        } else {
            self.cache_hits as f64 / self.gets as f64
        }
    }
}
