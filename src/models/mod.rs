//! PokeAPI response models
//!
//! Only the fields the REPL reads are modelled; serde ignores the rest.

pub mod location;
pub mod pokemon;

// Re-export commonly used types
pub use location::{LocationArea, LocationAreaPage, PokemonEncounter};
pub use pokemon::{Pokemon, PokemonStat, PokemonType};

use serde::{Deserialize, Serialize};

/// A `{ name, url }` reference to another API resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedResource {
    pub name: String,
    pub url: String,
}
