//! API Module
//!
//! Cache-backed client for the PokeAPI REST service.
//!
//! # Endpoints used
//! - `GET /location-area/` - Paged list of location areas
//! - `GET /location-area/{name}` - Pokemon encounters in one area
//! - `GET /pokemon/{name}` - Pokemon details

pub mod client;

pub use client::{Fetched, PokeApiClient};
