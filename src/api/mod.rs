//! API Module
//!
//! HTTP transport between nodes: the server side that answers peer fetches, the
//! client side that issues them, and the pool that decides which peer to ask.
//!
//! # Endpoints
//! - `GET /_peercache/:group/*key` - Raw value bytes (application/octet-stream)
//! - `GET /stats/:group` - Group statistics
//! - `GET /health` - Health check endpoint

pub mod client;
pub mod handlers;
pub mod pool;
pub mod routes;

pub use client::HttpGetter;
pub use handlers::*;
pub use pool::{HttpPool, PoolOptions, DEFAULT_BASE_PATH, DEFAULT_REPLICAS};
pub use routes::create_router;
