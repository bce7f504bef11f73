//! Request and Response models for the cache node
//!
//! This module defines the DTOs (Data Transfer Objects) exchanged between
//! nodes and served on the node's JSON endpoints.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::FetchRequest;
pub use responses::{HealthResponse, StatsResponse};
