//! Response DTOs for the edge node
//!
//! Defines the structure of outgoing JSON bodies.

use serde::Serialize;

use crate::cache::CacheStats;

/// Response body for the stats endpoint (GET /_edge/stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Entries physically present
    pub total_items: usize,
    /// Entries still readable
    pub active_items: usize,
    /// Entries expired but not yet swept
    pub expired_items: usize,
    /// Global TTL in seconds
    pub ttl_seconds: u64,
    /// Snapshot time in RFC 3339 format
    pub generated_at: String,
}

impl StatsResponse {
    /// Creates a new StatsResponse stamped with the current time
    pub fn new(stats: CacheStats) -> Self {
        Self {
            total_items: stats.total_entries,
            active_items: stats.active_entries,
            expired_items: stats.expired_entries,
            ttl_seconds: stats.ttl_seconds,
            generated_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
