//! Timed Cache Module
//!
//! Public cache handle: a shared store plus the reaper thread bound to it.

use std::sync::Arc;
use std::time::Duration;

use crate::cache::{CacheStats, CacheStore, Result};
use crate::error::CacheError;
use crate::tasks::{spawn_reaper, ReaperHandle};

// == Timed Cache ==
/// In-memory byte cache keyed by string, with background expiry.
///
/// `interval` is both the sweep period and the maximum age an entry may reach
/// before a sweep removes it. The cache is `Send + Sync`; share it behind an
/// `Arc` to call [`add`](Self::add) and [`get`](Self::get) from many threads.
///
/// The reaper runs until [`stop`](Self::stop) is called or the cache is dropped.
#[derive(Debug)]
pub struct TimedCache {
    store: Arc<CacheStore>,
    reaper: ReaperHandle,
}

impl TimedCache {
    // == Constructor ==
    /// Creates an empty cache and starts its reaper.
    ///
    /// # Errors
    /// - [`CacheError::InvalidInterval`] if `interval` is zero
    /// - [`CacheError::ReaperSpawn`] if the reaper thread cannot be started
    pub fn new(interval: Duration) -> Result<Self> {
        if interval.is_zero() {
            return Err(CacheError::InvalidInterval(interval));
        }

        let store = Arc::new(CacheStore::new(interval));
        let reaper = spawn_reaper(store.clone())?;

        Ok(Self { store, reaper })
    }

    // == Add ==
    /// Inserts `value` under `key`, replacing any previous entry and its age.
    ///
    /// Any key is accepted, including the empty string. The in-memory store
    /// never fails; the `Result` is part of the contract so callers already
    /// propagate errors when a fallible backend is introduced.
    pub fn add(&self, key: impl Into<String>, value: impl Into<Vec<u8>>) -> Result<()> {
        self.store.insert(key.into(), value.into());
        Ok(())
    }

    // == Get ==
    /// Returns a copy of the value under `key`, or `None` if absent or reaped.
    ///
    /// Reads do not refresh the entry's age.
    pub fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.store.get(key)
    }

    // == Sweep ==
    /// Runs one reclamation pass now, returning the number of entries removed.
    pub fn sweep(&self) -> usize {
        self.store.sweep()
    }

    // == Stop ==
    /// Stops the reaper and waits for it to exit.
    ///
    /// Entries stay readable afterwards but are no longer expired.
    pub fn stop(&self) {
        self.reaper.stop();
    }

    /// Returns true while the reaper thread is running.
    pub fn is_reaping(&self) -> bool {
        self.reaper.is_running()
    }

    // == Accessors ==
    pub fn interval(&self) -> Duration {
        self.store.interval()
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        self.store.stats()
    }
}
