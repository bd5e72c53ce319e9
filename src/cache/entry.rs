//! Cache Entry Module
//!
//! Defines the structure for individual cache entries.

use std::time::{Duration, Instant};

// == Cache Entry ==
/// A single cached payload and the instant it was written.
///
/// `created_at` is set on insertion and on overwrite; reads never refresh it.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// When the entry was inserted (monotonic clock)
    pub created_at: Instant,
    /// The stored payload, owned by the entry
    pub value: Vec<u8>,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new entry stamped with the current instant.
    pub fn new(value: Vec<u8>) -> Self {
        Self::created_at(value, Instant::now())
    }

    /// Creates an entry with an explicit creation instant.
    pub fn created_at(value: Vec<u8>, created_at: Instant) -> Self {
        Self { created_at, value }
    }

    // == Age ==
    /// Time elapsed since the entry was written.
    pub fn age(&self) -> Duration {
        self.age_at(Instant::now())
    }

    /// Age of the entry as observed at `now`. Saturates at zero.
    pub fn age_at(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.created_at)
    }

    // == Is Expired ==
    /// Checks whether the entry is older than `interval` as observed at `now`.
    ///
    /// An entry whose age is exactly `interval` is still live; only a strictly
    /// greater age makes it eligible for reaping.
    pub fn is_expired_at(&self, interval: Duration, now: Instant) -> bool {
        self.age_at(now) > interval
    }

    /// Checks whether the entry is older than `interval` right now.
    pub fn is_expired(&self, interval: Duration) -> bool {
        self.is_expired_at(interval, Instant::now())
    }
}
