//! Move validation and generation.
//!
//! Validation turns a player's raw moves into typed actions against the
//! current board. Generation enumerates what validates and draws random
//! batches from it.

pub mod legal;
pub mod validate;

pub use legal::legal_moves;
pub use validate::{validate_move, validate_player_move, InvalidMove, Validator};

use rand::Rng;

use crate::board::{Board, Player, PlayerMove};
use crate::rules::Rules;

/// Draws a random valid batch for `player` whose cost stays within `budget`.
///
/// Keeps adding distinct-source moves with probability 12/13 per draw and
/// stops at the first draw that would break the batch or the budget.
pub fn random_player_move(
    board: &Board,
    player: Player,
    rules: &Rules,
    budget: u32,
    rng: &mut impl Rng,
) -> PlayerMove {
    let validator = Validator::new(board, rules);
    let mut candidates = legal_moves(board, player, rules);
    let mut batch = PlayerMove::pass(player);

    while !candidates.is_empty() && rng.gen_range(0..13) != 0 {
        let mv = candidates[rng.gen_range(0..candidates.len())];
        batch.moves.push(mv);
        let fits = validator
            .validate_player_move(&batch)
            .is_ok_and(|actions| actions.cost() <= budget);
        if !fits {
            batch.moves.pop();
            break;
        }
        candidates.retain(|c| c.from != mv.from);
    }

    batch
}
