//! Cache Store Module
//!
//! Lock-guarded key/value storage shared between callers and the reaper.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use parking_lot::RwLock;

use crate::cache::stats::StatsCounters;
use crate::cache::{CacheEntry, CacheStats};

// == Cache Store ==
/// Entries map guarded by a single readers-writer lock.
///
/// Lookups take shared access; writes and sweeps take exclusive access for
/// their full duration.
#[derive(Debug)]
pub struct CacheStore {
    /// Key-value storage
    entries: RwLock<HashMap<String, CacheEntry>>,
    /// Maximum entry age, also the sweep period
    interval: Duration,
    /// Hit, miss and reaping counters
    stats: StatsCounters,
}

impl CacheStore {
    // == Constructor ==
    /// Creates an empty store. Callers are responsible for validating `interval`.
    pub fn new(interval: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            interval,
            stats: StatsCounters::default(),
        }
    }

    // == Insert ==
    /// Inserts or fully replaces the entry under `key`, stamping it with now.
    pub fn insert(&self, key: String, value: Vec<u8>) {
        let mut entries = self.entries.write();
        entries.insert(key, CacheEntry::new(value));
    }

    // == Get ==
    /// Returns a copy of the stored payload, if present.
    ///
    /// Age is not checked here; an entry stays visible until a sweep removes it.
    pub fn get(&self, key: &str) -> Option<Vec<u8>> {
        let entries = self.entries.read();
        match entries.get(key) {
            Some(entry) => {
                self.stats.record_hit();
                Some(entry.value.clone())
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Sweep ==
    /// Removes every entry older than the interval in one exclusive pass.
    ///
    /// Returns the number of entries removed.
    pub fn sweep(&self) -> usize {
        let removed = {
            let mut entries = self.entries.write();
            let now = Instant::now();
            let before = entries.len();
            entries.retain(|_, entry| !entry.is_expired_at(self.interval, now));
            before - entries.len()
        };

        self.stats.record_sweep(removed);
        removed
    }

    // == Accessors ==
    /// The configured interval.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Returns the current number of entries.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns true if the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Returns a snapshot of the counters.
    pub fn stats(&self) -> CacheStats {
        self.stats.snapshot(self.len())
    }

    #[cfg(test)]
    pub(crate) fn insert_entry(&self, key: &str, entry: CacheEntry) {
        self.entries.write().insert(key.to_string(), entry);
    }
}
