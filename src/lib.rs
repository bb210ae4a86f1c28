//! Skirmish engine library.
//!
//! A two-player simultaneous-move battle game on a 9x9 grid. Exposes the board
//! representation, move validation and generation, round resolution, the game
//! economy and protocol modules for use by integration tests and the referee
//! binary.

pub mod board;
pub mod engine;
pub mod game;
pub mod movegen;
pub mod protocol;
pub mod resolve;
pub mod rules;

pub use game::Game;
pub use movegen::InvalidMove;
pub use resolve::{make_move, GameStatus};
pub use rules::Rules;
