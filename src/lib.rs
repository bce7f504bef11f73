//! Peercache - A distributed read-through cache
//!
//! Each node keeps a byte-bounded LRU cache per group, routes misses to the peer
//! owning the key on a consistent hash ring, and collapses concurrent loads of the
//! same key into one.

pub mod api;
pub mod cache;
pub mod cluster;
pub mod config;
pub mod error;
pub mod group;
pub mod models;
pub mod source;

pub use api::{create_router, AppState, HttpPool};
pub use cache::ByteView;
pub use config::Config;
pub use error::{CacheError, Result};
pub use group::{get_group, new_group, Getter, GetterFunc, Group};
pub use source::DirectorySource;
