//! Pokedex - A command-line Pokedex backed by a timed cache
//!
//! Starts the REPL on stdin/stdout with one shared cache for every command.

use std::io;
use std::sync::Arc;

use anyhow::Context;
use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pokedex::api::PokeApiClient;
use pokedex::repl::{self, ReplState};
use pokedex::{Config, TimedCache};

/// Main entry point for the Pokedex.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging (stderr)
/// 2. Load configuration from environment variables
/// 3. Create the timed cache, which starts its reaper
/// 4. Build the PokeAPI client and REPL session around the cache
/// 5. Run the REPL until `exit` or end of input
/// 6. Stop the reaper
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "warn" so logs stay out of the prompt; override with RUST_LOG
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pokedex=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = Config::from_env();
    info!(
        "Configuration loaded: cache_interval={}s, api_base_url={}, request_timeout={}s",
        config.cache_interval, config.api_base_url, config.request_timeout
    );

    let cache = Arc::new(
        TimedCache::new(config.cache_interval()).context("failed to create cache")?,
    );
    let client = PokeApiClient::new(&config.api_base_url, config.request_timeout(), cache.clone())
        .context("failed to build HTTP client")?;
    let mut state = ReplState::new(client);

    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = io::stdout();
    let result = repl::run(&mut state, stdin, &mut stdout).await;

    cache.stop();
    info!("Pokedex closed, cache stats: {:?}", cache.stats());

    result.context("REPL terminated with an I/O error")
}
