//! API Routes
//!
//! Configures the Axum router for the peer transport and node endpoints.

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use super::handlers::{
    fetch_empty_key_handler, fetch_handler, health_handler, stats_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET {base_path}:group/*key` - Raw value bytes for a peer
/// - `GET {base_path}:group/` - Empty key, answered with 400
/// - `GET /stats/:group` - Group counters
/// - `GET /health` - Health check endpoint
pub fn create_router(state: AppState) -> Router {
    let base_path = state.pool.base_path();
    let fetch_route = format!("{}:group/*key", base_path);
    let empty_key_route = format!("{}:group/", base_path);

    Router::new()
        .route(&fetch_route, get(fetch_handler))
        .route(&empty_key_route, get(fetch_empty_key_handler))
        .route("/stats/:group", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{HttpPool, PoolOptions};
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use std::sync::Arc;
    use tower::util::ServiceExt;

    fn create_test_app() -> Router {
        let pool = HttpPool::new("localhost:8001", PoolOptions::default()).unwrap();
        create_router(AppState::new(Arc::new(pool)))
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_fetch_unknown_group() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/_peercache/routes-nope/key")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_fetch_missing_key_segment() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/_peercache/routes-nope")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_fetch_empty_key_is_bad_request() {
        crate::group::new_group(
            "routes-empty-key",
            0,
            crate::group::GetterFunc(|key: &str| Ok(key.as_bytes().to_vec())),
        );
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/_peercache/routes-empty-key/")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
