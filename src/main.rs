//! Skirmish referee: resolves simultaneous-move rounds over a line protocol.
//!
//! Reads commands from stdin and writes responses to stdout. Logs go to
//! stderr, filtered by `RUST_LOG` (default `warn`).

use std::io::{self, BufRead};

use tracing_subscriber::EnvFilter;

use skirmish::engine::Engine;
use skirmish::protocol::parser::{parse_command, Command};

/// Runs the referee loop until `quit` or end of input.
fn main() -> io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    let mut engine = Engine::new();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };

        let cmd = match parse_command(&line) {
            Some(c) => c,
            None => continue,
        };

        match cmd {
            Command::Skirmish => engine.handle_skirmish(&mut out)?,
            Command::IsReady => engine.handle_isready(&mut out)?,
            Command::SetOption { name, value } => {
                engine.set_option(&name, value.as_deref());
            }
            Command::NewGame => engine.new_game(),
            Command::Position { json } => {
                if let Err(e) = engine.set_position(&json) {
                    tracing::warn!("{e}");
                }
            }
            Command::Submit { player, literal } => {
                engine.handle_submit(player, &literal, &mut out)?;
            }
            Command::Hint { player } => engine.handle_hint(player, &mut out)?,
            Command::Board => engine.handle_board(&mut out)?,
            Command::Quit => break,
        }
    }

    Ok(())
}
