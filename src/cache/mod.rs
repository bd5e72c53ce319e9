//! Cache Module
//!
//! Provides a concurrency-safe in-memory cache whose entries are reaped by a
//! background thread once they outlive the configured interval.

mod entry;
mod stats;
mod store;
mod timed;

#[cfg(test)]
mod property_tests;

use crate::error::CacheError;

// Re-export public types
pub use entry::CacheEntry;
pub use stats::CacheStats;
pub use store::CacheStore;
pub use timed::TimedCache;

// == Result Type Alias ==
/// Result type for cache operations.
pub type Result<T> = std::result::Result<T, CacheError>;
