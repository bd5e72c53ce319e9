//! Background Tasks Module
//!
//! Contains background work that runs for the lifetime of a cache.
//!
//! # Tasks
//! - Reaper: sweeps expired cache entries once per cache interval

mod reaper;

pub use reaper::{spawn_reaper, ReaperHandle, REAPER_THREAD_NAME};
