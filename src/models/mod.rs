//! Response models for the edge node's own endpoints
//!
//! Cached origin payloads are served as-is; only diagnostics and errors
//! are serialized here.

pub mod responses;

// Re-export commonly used types
pub use responses::{ErrorResponse, StatsResponse};
