//! Error types for the Pokedex
//!
//! Provides unified error handling using thiserror.

use std::time::Duration;

use thiserror::Error;

// == Cache Error Enum ==
/// Errors raised by the timed cache.
#[derive(Error, Debug)]
pub enum CacheError {
    /// The reaping interval must be strictly positive
    #[error("Invalid cache interval: {0:?}")]
    InvalidInterval(Duration),

    /// The background reaper thread could not be started
    #[error("Failed to spawn reaper thread: {0}")]
    ReaperSpawn(#[source] std::io::Error),
}

// == Pokedex Error Enum ==
/// Unified error type for the REPL and the PokeAPI client.
#[derive(Error, Debug)]
pub enum PokedexError {
    /// Cache construction or write failed
    #[error(transparent)]
    Cache(#[from] CacheError),

    /// HTTP request failed or returned a non-success status
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body could not be decoded
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Input named a command that does not exist
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    /// Command was invoked without a required argument
    #[error("usage: {command} <{argument}>")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },

    /// `mapb` on the first page
    #[error("you're on the first page")]
    NoPreviousPage,

    /// `map` past the last page
    #[error("you're on the last page")]
    NoNextPage,

    /// Reading input or writing output failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

// == Result Type Alias ==
/// Convenience Result type for the Pokedex.
pub type Result<T> = std::result::Result<T, PokedexError>;
