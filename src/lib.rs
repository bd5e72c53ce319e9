//! Pokedex - A command-line Pokedex backed by a timed cache
//!
//! The core is [`cache::TimedCache`]: a concurrency-safe byte cache whose
//! entries are reaped by a background thread once they outlive the cache
//! interval. The REPL and PokeAPI client consume it through `add`/`get`.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod repl;
pub mod tasks;

pub use cache::TimedCache;
pub use config::Config;
pub use error::{CacheError, PokedexError};
