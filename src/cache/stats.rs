//! Cache Statistics Module
//!
//! Point-in-time population snapshot of the store.

use serde::Serialize;

// == Cache Stats ==
/// Snapshot of the store's population.
///
/// `active_entries + expired_entries == total_entries` always holds, since
/// all three are counted in one pass against one clock reading.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Entries physically present in the map
    pub total_entries: usize,
    /// Entries still readable
    pub active_entries: usize,
    /// Entries past expiry that the sweep has not removed yet
    pub expired_entries: usize,
    /// Global TTL in seconds
    pub ttl_seconds: u64,
}

impl CacheStats {
    // == Constructor ==
    /// Creates an empty snapshot for a store with the given TTL.
    pub fn new(ttl_seconds: u64) -> Self {
        Self {
            ttl_seconds,
            ..Self::default()
        }
    }

    // == Record Entry ==
    /// Counts one present entry, active or expired.
    pub fn record_entry(&mut self, expired: bool) {
        self.total_entries += 1;
        if expired {
            self.expired_entries += 1;
        } else {
            self.active_entries += 1;
        }
    }
}
