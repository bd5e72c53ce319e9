//! REPL Module
//!
//! Read-evaluate-print loop that dispatches typed commands.

mod commands;

pub use commands::{attempt_catch, catch_chance, Command, Flow, ReplState};

use std::io::Write;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::debug;

use crate::error::{PokedexError, Result};

/// Prompt printed before each line of input
pub const PROMPT: &str = "Pokedex > ";

/// Lowercases `text` and splits it on whitespace.
pub fn clean_input(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_lowercase).collect()
}

/// Runs the loop until `exit` or end of input.
///
/// Command failures are reported on `output` and the loop carries on; only
/// I/O errors on the input or output streams end it early.
pub async fn run<R, W>(state: &mut ReplState, input: R, output: &mut W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();

    loop {
        write!(output, "{}", PROMPT)?;
        output.flush()?;

        let Some(line) = lines.next_line().await? else {
            debug!("End of input, leaving REPL");
            writeln!(output)?;
            return Ok(());
        };

        let words = clean_input(&line);
        let Some((name, args)) = words.split_first() else {
            continue;
        };

        let result = match Command::parse(name) {
            Some(command) => command.execute(state, args, output).await,
            None => Err(PokedexError::UnknownCommand(name.clone())),
        };

        match result {
            Ok(Flow::Continue) => {}
            Ok(Flow::Exit) => return Ok(()),
            Err(PokedexError::Io(err)) => return Err(PokedexError::Io(err)),
            Err(err) => {
                debug!("Command '{}' failed: {:?}", name, err);
                writeln!(output, "{}", err)?;
            }
        }
    }
}
