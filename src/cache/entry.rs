//! Cache Entry Module
//!
//! Defines the structure for individual cached origin responses.

use std::time::Duration;

use bytes::Bytes;
use tokio::time::Instant;

// == Cache Entry ==
/// A cached origin response with its absolute expiration time.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// Response body as fetched from the origin
    pub payload: Bytes,
    /// Origin content type, empty if the origin sent none
    pub content_type: String,
    /// Instant at which the entry stops being readable
    pub expires_at: Instant,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new entry expiring `ttl` from now.
    pub fn new(payload: Bytes, content_type: String, ttl: Duration) -> Self {
        Self {
            payload,
            content_type,
            expires_at: Instant::now() + ttl,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// Boundary condition: an entry is expired once `now >= expires_at`, so it
    /// is readable only while the current time is strictly before expiry.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    /// Expiry check against a fixed instant, used where several entries must
    /// be judged against the same clock reading.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        now >= self.expires_at
    }

    /// Remaining time until expiry, zero once expired.
    pub fn ttl_remaining(&self) -> Duration {
        self.expires_at.saturating_duration_since(Instant::now())
    }
}
