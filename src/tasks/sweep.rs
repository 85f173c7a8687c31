//! TTL Sweep Task
//!
//! Background task that periodically removes expired cache entries until it
//! is told to stop.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::cache::CacheStore;

/// Handle to a running sweep task.
///
/// Dropping the handle also signals the task to stop.
#[derive(Debug)]
pub struct SweepTask {
    shutdown_tx: watch::Sender<bool>,
    handle: Option<JoinHandle<()>>,
}

impl SweepTask {
    /// Signals the task to stop and waits for it to exit.
    pub async fn shutdown(mut self) {
        let _ = self.shutdown_tx.send(true);

        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.await {
                warn!("Sweep task ended abnormally: {}", e);
            }
        }
        info!("Sweep task stopped");
    }

    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().map_or(true, |h| h.is_finished())
    }
}

impl Drop for SweepTask {
    fn drop(&mut self) {
        let _ = self.shutdown_tx.send(true);
    }
}

/// Spawns a background task that sweeps `store` every `interval`.
///
/// The first sweep runs one full interval after spawning.
///
/// # Panics
/// Panics if `interval` is zero.
///
/// # Example
/// ```ignore
/// let store = Arc::new(CacheStore::new(Duration::from_secs(60)));
/// let sweeper = spawn_sweep_task(store.clone(), Duration::from_secs(30));
/// // Later, during shutdown:
/// sweeper.shutdown().await;
/// ```
pub fn spawn_sweep_task(store: Arc<CacheStore>, interval: Duration) -> SweepTask {
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let handle = tokio::spawn(sweep_loop(store, interval, shutdown_rx));

    SweepTask {
        shutdown_tx,
        handle: Some(handle),
    }
}

async fn sweep_loop(
    store: Arc<CacheStore>,
    interval: Duration,
    mut shutdown_rx: watch::Receiver<bool>,
) {
    info!("Starting TTL sweep task with interval of {:?}", interval);

    let mut ticker = interval_at(Instant::now() + interval, interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let removed = store.sweep().await;
                if removed > 0 {
                    info!("Cache: cleaned up {} expired items", removed);
                } else {
                    debug!("TTL sweep: no expired entries found");
                }
            }
            changed = shutdown_rx.changed() => {
                if changed.is_err() || *shutdown_rx.borrow() {
                    debug!("Sweep task received shutdown signal");
                    return;
                }
            }
        }
    }
}
