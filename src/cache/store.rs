//! Cache Store Module
//!
//! Concurrent key to entry map with a single global TTL. Reads check logical
//! expiry; physical removal is left to the periodic sweep.

use std::collections::HashMap;
use std::time::Duration;

use bytes::Bytes;
use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::debug;

use crate::cache::{CacheEntry, CacheStats};

// == Cache Store ==
/// TTL cache store shared between request handlers and the sweep task.
///
/// Readers share the lock; `set` and the delete phase of `sweep` take it
/// exclusively. No method holds the lock across an await on anything but
/// the lock itself.
#[derive(Debug)]
pub struct CacheStore {
    /// Key-entry storage
    entries: RwLock<HashMap<String, CacheEntry>>,
    /// TTL applied to every entry on write
    ttl: Duration,
}

impl CacheStore {
    // == Constructor ==
    /// Creates an empty store with the given TTL.
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    // == Get ==
    /// Looks up a readable entry.
    ///
    /// Returns `None` if the key is absent or its entry has expired. Expired
    /// entries are left in place for the sweep to collect.
    pub async fn get(&self, key: &str) -> Option<CacheEntry> {
        let entries = self.entries.read().await;
        let entry = entries.get(key)?;

        if entry.is_expired() {
            debug!("Cache: item {} expired, awaiting sweep", key);
            return None;
        }

        Some(entry.clone())
    }

    // == Set ==
    /// Stores a payload, replacing any existing entry for the key.
    ///
    /// The new entry expires `ttl` from now regardless of what it replaced.
    pub async fn set(&self, key: String, payload: Bytes, content_type: String) {
        let entry = CacheEntry::new(payload, content_type, self.ttl);
        let ttl_remaining = entry.ttl_remaining();

        let mut entries = self.entries.write().await;
        entries.insert(key.clone(), entry);
        drop(entries);

        debug!("Cache: stored {}, expires in {:?}", key, ttl_remaining);
    }

    // == Sweep ==
    /// Removes all entries expired at scan time.
    ///
    /// The scan runs under the shared lock; only the delete phase is
    /// exclusive. Each candidate is re-checked against its current entry so
    /// a `set` that landed between the phases survives.
    ///
    /// Returns the number of entries removed.
    pub async fn sweep(&self) -> usize {
        let now = Instant::now();

        let candidates = self.expired_keys(now).await;
        if candidates.is_empty() {
            return 0;
        }

        self.remove_expired(candidates, now).await
    }

    /// Scan phase: keys whose entries are expired at `now`.
    async fn expired_keys(&self, now: Instant) -> Vec<String> {
        let entries = self.entries.read().await;
        entries
            .iter()
            .filter(|(_, entry)| entry.is_expired_at(now))
            .map(|(key, _)| key.clone())
            .collect()
    }

    /// Delete phase: removes candidates whose current entry is still expired at `now`.
    async fn remove_expired(&self, candidates: Vec<String>, now: Instant) -> usize {
        let mut entries = self.entries.write().await;
        let mut removed = 0;
        for key in candidates {
            let still_expired = entries
                .get(&key)
                .is_some_and(|entry| entry.is_expired_at(now));
            if still_expired {
                entries.remove(&key);
                removed += 1;
                debug!("Cache: cleaned up expired item {}", key);
            }
        }

        removed
    }

    // == Stats ==
    /// Returns a population snapshot.
    pub async fn stats(&self) -> CacheStats {
        let entries = self.entries.read().await;
        let now = Instant::now();

        let mut stats = CacheStats::new(self.ttl.as_secs());
        for entry in entries.values() {
            stats.record_entry(entry.is_expired_at(now));
        }
        stats
    }

    // == Length ==
    /// Number of physically present entries, expired or not.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    // == Is Empty ==
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Raw entry regardless of expiry.
    #[cfg(test)]
    pub(crate) async fn peek(&self, key: &str) -> Option<CacheEntry> {
        self.entries.read().await.get(key).cloned()
    }
}
