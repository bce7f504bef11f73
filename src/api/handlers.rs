//! API Handlers
//!
//! HTTP request handlers for the peer transport and node endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    Json,
};
use tracing::debug;

use crate::api::HttpPool;
use crate::error::{CacheError, Result};
use crate::group::get_group;
use crate::models::{FetchRequest, HealthResponse, StatsResponse};

/// Application state shared across all handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// This node's peer pool
    pub pool: Arc<HttpPool>,
}

impl AppState {
    /// Creates a new AppState around the node's peer pool.
    pub fn new(pool: Arc<HttpPool>) -> Self {
        Self { pool }
    }
}

/// Handler for GET /_peercache/:group/*key
///
/// Serves the raw bytes of a value to a peer.
pub async fn fetch_handler(Path(req): Path<FetchRequest>) -> Result<impl IntoResponse> {
    serve_value(&req.group, &req.key).await
}

/// Handler for GET /_peercache/:group/
///
/// A request with an empty key still reaches the group so it is rejected as an
/// invalid argument rather than an unknown route.
pub async fn fetch_empty_key_handler(Path(group): Path<String>) -> Result<impl IntoResponse> {
    serve_value(&group, "").await
}

async fn serve_value(group: &str, key: &str) -> Result<impl IntoResponse> {
    debug!(group, key, "peer fetch");

    let group = get_group(group).ok_or_else(|| CacheError::GroupNotFound(group.to_string()))?;
    let view = group.get(key).await?;

    Ok((
        [(header::CONTENT_TYPE, "application/octet-stream")],
        view.byte_slice(),
    ))
}

/// Handler for GET /stats/:group
///
/// Returns a group's counters and local cache usage.
pub async fn stats_handler(Path(name): Path<String>) -> Result<Json<StatsResponse>> {
    let group = get_group(&name).ok_or_else(|| CacheError::GroupNotFound(name.clone()))?;
    let (entries, bytes) = group.cache_usage();

    Ok(Json(StatsResponse::new(name, group.stats(), entries, bytes)))
}

/// Handler for GET /health
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse::healthy(
        state.pool.self_addr(),
        state.pool.peer_count(),
    ))
}
