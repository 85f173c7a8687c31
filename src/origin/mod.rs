//! Origin Module
//!
//! The capability the coordinator uses to fetch from the origin on a miss,
//! and its HTTP implementation.

mod http;

pub use http::HttpOriginFetcher;

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::Result;

/// A successful origin response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OriginResponse {
    /// Fully read response body
    pub body: Bytes,
    /// Origin `Content-Type`, empty if absent
    pub content_type: String,
}

impl OriginResponse {
    pub fn new(body: impl Into<Bytes>, content_type: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            content_type: content_type.into(),
        }
    }
}

/// Fetches a path from the origin.
///
/// Implementations fail with `EdgeError::OriginUnavailable` when the origin
/// cannot be reached and `EdgeError::OriginReadError` when the body cannot
/// be consumed.
#[async_trait]
pub trait OriginFetch: Send + Sync {
    async fn fetch(&self, path: &str) -> Result<OriginResponse>;
}
