//! Referee command parser.
//!
//! Parses incoming protocol lines into structured `Command` variants that the
//! referee loop dispatches on.

use tracing::warn;

use crate::board::Player;

/// A parsed referee command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Protocol handshake.
    Skirmish,

    /// Synchronization ping; the referee replies `readyok`.
    IsReady,

    /// Set a rule option: `setoption name <id> [value <x>]`.
    SetOption { name: String, value: Option<String> },

    /// Start a fresh game from the standard opening.
    NewGame,

    /// Replace the game with a JSON snapshot.
    Position { json: String },

    /// Submit one player's batch for the current round.
    Submit { player: Player, literal: String },

    /// List the legal moves for a player.
    Hint { player: Player },

    /// Print the current game snapshot.
    Board,

    /// Terminate the referee.
    Quit,
}

/// Parses a single line of input into a `Command`.
///
/// Returns `None` for empty lines or unrecognized commands. Malformed
/// arguments for known commands also return `None` after logging a warning.
pub fn parse_command(line: &str) -> Option<Command> {
    let trimmed = line.trim();
    let tokens: Vec<&str> = trimmed.split_whitespace().collect();
    let first = *tokens.first()?;

    match first {
        "skirmish" => Some(Command::Skirmish),
        "isready" => Some(Command::IsReady),
        "quit" => Some(Command::Quit),
        "newgame" => Some(Command::NewGame),
        "board" => Some(Command::Board),

        "setoption" => parse_setoption(&tokens),
        "position" => parse_position(trimmed),
        "submit" => parse_submit(&tokens),
        "hint" => parse_player(&tokens).map(|player| Command::Hint { player }),

        other => {
            warn!(command = other, "unknown command");
            None
        }
    }
}

/// Parses `setoption name <id> [value <x>]`.
fn parse_setoption(tokens: &[&str]) -> Option<Command> {
    if tokens.len() < 3 || tokens[1] != "name" {
        warn!("malformed setoption: expected 'setoption name <id> [value <x>]'");
        return None;
    }

    let (name_parts, value_parts) = match tokens.iter().position(|&t| t == "value") {
        Some(vi) => (&tokens[2..vi], &tokens[vi + 1..]),
        None => (&tokens[2..], &tokens[tokens.len()..]),
    };
    if name_parts.is_empty() {
        warn!("malformed setoption: empty name");
        return None;
    }
    let value = (!value_parts.is_empty()).then(|| value_parts.join(" "));

    Some(Command::SetOption { name: name_parts.join(" "), value })
}

/// Parses `position <json>`. The snapshot may contain spaces.
fn parse_position(line: &str) -> Option<Command> {
    let json = line.strip_prefix("position")?.trim();
    if json.is_empty() {
        warn!("malformed position: expected 'position <game-json>'");
        return None;
    }
    Some(Command::Position { json: json.to_string() })
}

/// Parses the player number in `<cmd> <1|2> ...`.
fn parse_player(tokens: &[&str]) -> Option<Player> {
    let player = tokens
        .get(1)
        .and_then(|t| t.parse::<u8>().ok())
        .and_then(Player::from_number);
    if player.is_none() {
        warn!(command = tokens[0], "expected player number 1 or 2");
    }
    player
}

/// Parses `submit <1|2> [literals...]`. No literals means a pass.
fn parse_submit(tokens: &[&str]) -> Option<Command> {
    let player = parse_player(tokens)?;
    Some(Command::Submit { player, literal: tokens[2..].join(" ") })
}
