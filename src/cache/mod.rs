//! Cache Module
//!
//! Byte-weighted LRU storage and the read-only value type it holds.

mod byteview;
mod lru;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use byteview::ByteView;
pub use lru::{LruCache, OnEvicted, Value};
pub use stats::{GroupStats, StatsSnapshot};
pub use store::MainCache;
