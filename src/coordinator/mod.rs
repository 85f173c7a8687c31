//! Cache-Aside Coordinator
//!
//! Decides hit vs. miss for a request key, fetches from the origin on a miss
//! and installs successful fetches into the store.
//!
//! Concurrent misses on the same key are not coalesced: each caller fetches
//! and writes independently, and the last `set` to complete wins.

mod annotate;

pub use annotate::annotate_hit;

use std::sync::Arc;

use bytes::Bytes;
use tracing::info;

use crate::cache::CacheStore;
use crate::error::Result;
use crate::origin::OriginFetch;

/// Where a served payload came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheSource {
    Hit,
    Miss,
}

impl CacheSource {
    /// Value of the `X-Cache` response header.
    pub fn as_str(&self) -> &'static str {
        match self {
            CacheSource::Hit => "HIT",
            CacheSource::Miss => "MISS",
        }
    }
}

/// Result of handling one request key.
#[derive(Debug, Clone)]
pub struct CacheOutcome {
    pub payload: Bytes,
    pub content_type: String,
    pub source: CacheSource,
}

/// Cache-aside coordinator over a shared store.
#[derive(Debug, Clone)]
pub struct CacheAside {
    store: Arc<CacheStore>,
}

impl CacheAside {
    pub fn new(store: Arc<CacheStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<CacheStore> {
        &self.store
    }

    /// Serves `key` from the store, or from `fetch` on a miss.
    ///
    /// The store is only written after a fully successful fetch; on any
    /// error it is left exactly as it was.
    pub async fn handle(&self, key: &str, fetch: &dyn OriginFetch) -> Result<CacheOutcome> {
        if let Some(entry) = self.store.get(key).await {
            info!("Edge Server: Cache HIT for {}", key);
            return Ok(CacheOutcome {
                payload: entry.payload,
                content_type: entry.content_type,
                source: CacheSource::Hit,
            });
        }

        info!("Edge Server: Cache MISS for {}, fetching from origin", key);

        // No store lock is held here
        let response = fetch.fetch(key).await?;

        self.store
            .set(
                key.to_string(),
                response.body.clone(),
                response.content_type.clone(),
            )
            .await;

        Ok(CacheOutcome {
            payload: response.body,
            content_type: response.content_type,
            source: CacheSource::Miss,
        })
    }
}
