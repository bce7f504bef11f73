//! Request DTOs for the peer transport
//!
//! Defines what one node asks of another.

use serde::Deserialize;

/// A request for one key of one group (GET /_peercache/:group/*key)
///
/// # Fields
/// - `group`: Name of the cache group
/// - `key`: The key to fetch
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FetchRequest {
    /// The cache group name
    pub group: String,
    /// The requested key
    pub key: String,
}

impl FetchRequest {
    /// Creates a new FetchRequest
    pub fn new(group: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            key: key.into(),
        }
    }

    /// Path of this request below the transport base path, with both segments
    /// percent-encoded.
    pub fn path(&self) -> String {
        format!(
            "{}/{}",
            urlencoding::encode(&self.group),
            urlencoding::encode(&self.key)
        )
    }
}
