//! REPL Commands
//!
//! Command table and the handler behind each command.

use std::collections::BTreeMap;
use std::io::Write;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::api::PokeApiClient;
use crate::error::{PokedexError, Result};
use crate::models::Pokemon;

// == Flow ==
/// What the loop should do after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

// == Command ==
/// Every command the REPL understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Help,
    Exit,
    Map,
    MapBack,
    Explore,
    Catch,
    Inspect,
    Pokedex,
}

impl Command {
    /// All commands, in the order `help` lists them.
    pub const ALL: [Command; 8] = [
        Command::Help,
        Command::Exit,
        Command::Map,
        Command::MapBack,
        Command::Explore,
        Command::Catch,
        Command::Inspect,
        Command::Pokedex,
    ];

    /// Looks up a command by the word typed at the prompt.
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|command| command.name() == name)
    }

    pub fn name(self) -> &'static str {
        match self {
            Command::Help => "help",
            Command::Exit => "exit",
            Command::Map => "map",
            Command::MapBack => "mapb",
            Command::Explore => "explore",
            Command::Catch => "catch",
            Command::Inspect => "inspect",
            Command::Pokedex => "pokedex",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Command::Help => "Displays a help message",
            Command::Exit => "Exit the Pokedex",
            Command::Map => "Displays the next 20 location areas",
            Command::MapBack => "Displays the previous 20 location areas",
            Command::Explore => "Lists the Pokemon found in a location area",
            Command::Catch => "Attempts to catch a Pokemon",
            Command::Inspect => "Displays details of a caught Pokemon",
            Command::Pokedex => "Lists every Pokemon you have caught",
        }
    }

    /// Runs the command against `state`, writing user-facing output to `out`.
    pub async fn execute<W: Write>(
        self,
        state: &mut ReplState,
        args: &[String],
        out: &mut W,
    ) -> Result<Flow> {
        match self {
            Command::Help => command_help(out),
            Command::Exit => command_exit(out),
            Command::Map => command_map(state, out).await,
            Command::MapBack => command_mapb(state, out).await,
            Command::Explore => command_explore(state, first_arg(self, "location_area", args)?, out).await,
            Command::Catch => command_catch(state, first_arg(self, "pokemon", args)?, out).await,
            Command::Inspect => command_inspect(state, first_arg(self, "pokemon", args)?, out),
            Command::Pokedex => command_pokedex(state, out),
        }
    }
}

fn first_arg<'a>(command: Command, argument: &'static str, args: &'a [String]) -> Result<&'a str> {
    args.first()
        .map(String::as_str)
        .ok_or(PokedexError::MissingArgument {
            command: command.name(),
            argument,
        })
}

// == REPL State ==
/// Session state threaded through every command.
#[derive(Debug)]
pub struct ReplState {
    client: PokeApiClient,
    /// Next page of `map`; `None` once the last page has been shown
    next_page: Option<String>,
    /// Previous page for `mapb`; `None` on the first page
    previous_page: Option<String>,
    caught: BTreeMap<String, Pokemon>,
    rng: StdRng,
}

impl ReplState {
    /// Creates a fresh session positioned before the first location page.
    pub fn new(client: PokeApiClient) -> Self {
        Self::with_rng(client, StdRng::from_entropy())
    }

    /// Creates a session with a caller-supplied random source.
    pub fn with_rng(client: PokeApiClient, rng: StdRng) -> Self {
        let next_page = Some(client.first_location_page_url());
        Self {
            client,
            next_page,
            previous_page: None,
            caught: BTreeMap::new(),
            rng,
        }
    }

    pub fn client(&self) -> &PokeApiClient {
        &self.client
    }

    /// Pokemon caught so far, keyed by name.
    pub fn caught(&self) -> &BTreeMap<String, Pokemon> {
        &self.caught
    }
}

// == Catch Simulation ==
/// Probability of catching a Pokemon with the given base experience.
///
/// Higher experience means lower odds: 45 gives roughly 0.53, 300 roughly 0.14.
pub fn catch_chance(base_experience: u32) -> f64 {
    1.0 / (1.0 + f64::from(base_experience) / 50.0)
}

/// Rolls once against [`catch_chance`].
pub fn attempt_catch<R: Rng>(base_experience: u32, rng: &mut R) -> bool {
    rng.gen::<f64>() < catch_chance(base_experience)
}

// == Handlers ==
fn command_help<W: Write>(out: &mut W) -> Result<Flow> {
    writeln!(out, "Welcome to the Pokedex!")?;
    writeln!(out, "Usage:")?;
    writeln!(out)?;
    for command in Command::ALL {
        writeln!(out, "{}: {}", command.name(), command.description())?;
    }
    Ok(Flow::Continue)
}

fn command_exit<W: Write>(out: &mut W) -> Result<Flow> {
    writeln!(out, "Closing the Pokedex... Goodbye!")?;
    Ok(Flow::Exit)
}

async fn command_map<W: Write>(state: &mut ReplState, out: &mut W) -> Result<Flow> {
    let url = state.next_page.clone().ok_or(PokedexError::NoNextPage)?;
    show_location_page(state, &url, out).await
}

async fn command_mapb<W: Write>(state: &mut ReplState, out: &mut W) -> Result<Flow> {
    let url = state.previous_page.clone().ok_or(PokedexError::NoPreviousPage)?;
    show_location_page(state, &url, out).await
}

async fn show_location_page<W: Write>(state: &mut ReplState, url: &str, out: &mut W) -> Result<Flow> {
    let fetched = state.client.location_areas(url).await?;
    if fetched.from_cache {
        writeln!(out, "Reading from cache...")?;
    }
    let page = fetched.value;

    state.next_page = page.next;
    state.previous_page = page.previous;

    for area in &page.results {
        writeln!(out, "{}", area.name)?;
    }
    Ok(Flow::Continue)
}

async fn command_explore<W: Write>(state: &mut ReplState, name: &str, out: &mut W) -> Result<Flow> {
    writeln!(out, "Exploring {}...", name)?;
    let area = state.client.location_area(name).await?;

    writeln!(out, "Found Pokemon:")?;
    for encounter in &area.pokemon_encounters {
        writeln!(out, " - {}", encounter.pokemon.name)?;
    }
    Ok(Flow::Continue)
}

async fn command_catch<W: Write>(state: &mut ReplState, name: &str, out: &mut W) -> Result<Flow> {
    let pokemon = state.client.pokemon(name).await?;
    writeln!(out, "Throwing a Pokeball at {}...", pokemon.name)?;

    let base_experience = pokemon.base_experience.unwrap_or_default();
    if attempt_catch(base_experience, &mut state.rng) {
        writeln!(out, "{} was caught!", pokemon.name)?;
        writeln!(out, "You may now inspect it with the inspect command.")?;
        state.caught.insert(pokemon.name.clone(), pokemon);
    } else {
        writeln!(out, "{} escaped!", pokemon.name)?;
    }
    Ok(Flow::Continue)
}

fn command_inspect<W: Write>(state: &ReplState, name: &str, out: &mut W) -> Result<Flow> {
    let Some(pokemon) = state.caught.get(name) else {
        writeln!(out, "You have not caught a {}!", name)?;
        return Ok(Flow::Continue);
    };

    writeln!(out, "Name: {}", pokemon.name)?;
    writeln!(out, "Height: {}", pokemon.height)?;
    writeln!(out, "Weight: {}", pokemon.weight)?;
    writeln!(out, "Stats:")?;
    for stat in &pokemon.stats {
        writeln!(out, "  -{}: {}", stat.stat.name, stat.base_stat)?;
    }
    writeln!(out, "Types:")?;
    for kind in &pokemon.types {
        writeln!(out, "  - {}", kind.kind.name)?;
    }
    Ok(Flow::Continue)
}

fn command_pokedex<W: Write>(state: &ReplState, out: &mut W) -> Result<Flow> {
    writeln!(out, "Your Pokedex:")?;
    for name in state.caught.keys() {
        writeln!(out, " - {}", name)?;
    }
    Ok(Flow::Continue)
}
