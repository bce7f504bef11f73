//! Error types for the cache
//!
//! Provides unified error handling using thiserror.

use std::sync::Arc;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Boxed error produced by an application loader.
pub type LoaderError = Arc<dyn std::error::Error + Send + Sync>;

// == Cache Error Enum ==
/// Unified error type for the cache.
///
/// Cloneable so a single coalesced load result can be handed to every waiter.
#[derive(Error, Debug, Clone)]
pub enum CacheError {
    /// Empty or malformed key
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The data source has no value for the key
    #[error("Key not found: {0}")]
    NotFound(String),

    /// No cache group registered under this name
    #[error("No such group: {0}")]
    GroupNotFound(String),

    /// Error returned by the application loader, surfaced unchanged
    #[error(transparent)]
    Loader(LoaderError),

    /// Transport failure while fetching from a peer
    #[error("Remote fetch failed: {0}")]
    RemoteFetch(String),

    /// Startup misconfiguration (duplicate peer registration, bad peer address)
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl CacheError {
    /// Wraps an arbitrary loader error.
    pub fn loader<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        CacheError::Loader(Arc::new(err))
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let status = match &self {
            CacheError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            CacheError::NotFound(_) | CacheError::GroupNotFound(_) => StatusCode::NOT_FOUND,
            CacheError::RemoteFetch(_) => StatusCode::BAD_GATEWAY,
            CacheError::Loader(_) | CacheError::Configuration(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the cache.
pub type Result<T> = std::result::Result<T, CacheError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loader_error_is_transparent() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk on fire");
        let err = CacheError::loader(io);
        assert_eq!(err.to_string(), "disk on fire");
    }

    #[test]
    fn test_status_codes() {
        let cases = [
            (CacheError::InvalidArgument("k".into()), StatusCode::BAD_REQUEST),
            (CacheError::NotFound("k".into()), StatusCode::NOT_FOUND),
            (CacheError::GroupNotFound("g".into()), StatusCode::NOT_FOUND),
            (CacheError::RemoteFetch("x".into()), StatusCode::BAD_GATEWAY),
            (
                CacheError::Configuration("x".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }
}
