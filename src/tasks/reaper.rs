//! Cache Reaper Task
//!
//! Background thread that periodically sweeps expired cache entries.

use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Instant;

use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::cache::CacheStore;
use crate::error::CacheError;

/// Name given to the reaper thread.
pub const REAPER_THREAD_NAME: &str = "timed-cache-reaper";

// == Reaper Handle ==
/// Owns the reaper thread and the channel used to stop it.
///
/// Dropping the handle closes the channel, which also ends the loop.
#[derive(Debug)]
pub struct ReaperHandle {
    stop_tx: Mutex<Option<Sender<()>>>,
    thread: Mutex<Option<JoinHandle<()>>>,
}

impl ReaperHandle {
    /// Signals the reaper to exit and waits for it. Safe to call repeatedly.
    pub fn stop(&self) {
        if let Some(tx) = self.stop_tx.lock().take() {
            // A send error means the thread is already gone
            let _ = tx.send(());
        }

        if let Some(handle) = self.thread.lock().take() {
            if handle.join().is_err() {
                warn!("Cache reaper thread panicked");
            }
        }
    }

    /// Returns true while the reaper thread is alive.
    pub fn is_running(&self) -> bool {
        self.thread
            .lock()
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for ReaperHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Spawns the reaper thread for `store`.
///
/// The thread alternates between waiting one interval and sweeping. The first
/// sweep happens one full interval after spawn. Ticks are scheduled at a fixed
/// rate; a sweep that overruns its period skips the missed ticks instead of
/// firing them back to back.
///
/// # Example
/// ```ignore
/// let store = Arc::new(CacheStore::new(Duration::from_secs(60)));
/// let reaper = spawn_reaper(store.clone())?;
/// // Later, during shutdown:
/// reaper.stop();
/// ```
pub fn spawn_reaper(store: Arc<CacheStore>) -> Result<ReaperHandle, CacheError> {
    let (stop_tx, stop_rx) = mpsc::channel::<()>();
    let interval = store.interval();

    let thread = thread::Builder::new()
        .name(REAPER_THREAD_NAME.to_string())
        .spawn(move || {
            info!("Starting cache reaper with interval of {:?}", interval);

            // None when the interval is too long to schedule: nothing can expire
            let mut next_tick = Instant::now().checked_add(interval);
            loop {
                let signal = match next_tick {
                    Some(tick) => stop_rx.recv_timeout(tick.saturating_duration_since(Instant::now())),
                    None => stop_rx.recv().map_err(|_| RecvTimeoutError::Disconnected),
                };
                match signal {
                    Err(RecvTimeoutError::Timeout) => {}
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }

                let removed = store.sweep();
                if removed > 0 {
                    info!("Cache sweep: removed {} expired entries", removed);
                } else {
                    debug!("Cache sweep: no expired entries found");
                }

                let now = Instant::now();
                next_tick = next_tick
                    .and_then(|tick| tick.checked_add(interval))
                    .filter(|tick| *tick > now)
                    .or_else(|| now.checked_add(interval));
            }

            info!("Cache reaper stopped");
        })
        .map_err(CacheError::ReaperSpawn)?;

    Ok(ReaperHandle {
        stop_tx: Mutex::new(Some(stop_tx)),
        thread: Mutex::new(Some(thread)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;
    use std::time::Duration;

    use crate::cache::CacheEntry;

    #[test]
    fn test_reaper_removes_expired_entries() {
        let store = Arc::new(CacheStore::new(Duration::from_millis(10)));
        let stale = Instant::now() - Duration::from_secs(1);
        store.insert_entry("expire_soon", CacheEntry::created_at(b"v".to_vec(), stale));

        let reaper = spawn_reaper(store.clone()).unwrap();

        // Wait for at least one tick
        sleep(Duration::from_millis(100));

        assert!(store.get("expire_soon").is_none(), "Expired entry should have been reaped");
        assert!(store.stats().sweeps >= 1);

        reaper.stop();
    }

    #[test]
    fn test_reaper_preserves_valid_entries() {
        let store = Arc::new(CacheStore::new(Duration::from_secs(3600)));
        store.insert("long_lived".to_string(), b"value".to_vec());

        let reaper = spawn_reaper(store.clone()).unwrap();
        sleep(Duration::from_millis(50));

        assert_eq!(store.get("long_lived"), Some(b"value".to_vec()));
        reaper.stop();
    }

    #[test]
    fn test_first_sweep_waits_one_interval() {
        let store = Arc::new(CacheStore::new(Duration::from_secs(3600)));
        let stale = Instant::now() - Duration::from_secs(7200);
        store.insert_entry("stale", CacheEntry::created_at(b"v".to_vec(), stale));

        let reaper = spawn_reaper(store.clone()).unwrap();
        sleep(Duration::from_millis(50));

        // No sweep has run yet, so the stale entry is still visible
        assert_eq!(store.stats().sweeps, 0);
        assert!(store.get("stale").is_some());
        reaper.stop();
    }

    #[test]
    fn test_reaper_can_be_stopped() {
        let store = Arc::new(CacheStore::new(Duration::from_secs(3600)));
        let reaper = spawn_reaper(store).unwrap();
        assert!(reaper.is_running());

        reaper.stop();
        assert!(!reaper.is_running(), "Reaper should be finished after stop");

        // Second stop is a no-op
        reaper.stop();
    }

    #[test]
    fn test_unschedulable_interval_keeps_reaper_alive() {
        let store = Arc::new(CacheStore::new(Duration::from_secs(u64::MAX)));
        store.insert("key".to_string(), b"value".to_vec());

        let reaper = spawn_reaper(store.clone()).unwrap();
        sleep(Duration::from_millis(100));

        assert!(reaper.is_running(), "Reaper should wait for stop instead of exiting");
        assert_eq!(store.get("key"), Some(b"value".to_vec()));

        // Still responds to stop while blocked without a deadline
        reaper.stop();
        assert!(!reaper.is_running());
    }

    #[test]
    fn test_dropping_handle_releases_store() {
        let store = Arc::new(CacheStore::new(Duration::from_secs(3600)));
        let reaper = spawn_reaper(store.clone()).unwrap();
        assert_eq!(Arc::strong_count(&store), 2);

        drop(reaper);
        assert_eq!(Arc::strong_count(&store), 1);
    }
}
