//! Referee protocol handling.
//!
//! Parsing and formatting for move literals, JSON board snapshots, and the
//! command parser for the referee loop.

pub mod notation;
pub mod parser;
pub mod snapshot;

pub use notation::{format_move_literal, format_moves, parse_move_literal, parse_player_move};
pub use parser::{parse_command, Command};
pub use snapshot::{encode_board, parse_board, SnapshotError};
