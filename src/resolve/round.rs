//! Round resolution.
//!
//! `make_move` validates both players' batches against the current board,
//! then runs the phases against a copy. The input board is never written.

use tracing::{debug, info, instrument};

use crate::board::{Board, ForceBoard, PlayerAction, PlayerMove, ALL_PLAYERS};
use crate::movegen::{InvalidMove, Validator};
use crate::rules::Rules;

use super::phase;
use super::summary::RoundSummary;

/// The result of resolving one round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundOutcome {
    pub board: Board,
    /// Each player's validated actions as submitted, indexed by player.
    pub actions: [PlayerAction; 2],
    pub summary: RoundSummary,
}

/// Pairs the two batches by player. Each player must submit exactly once.
fn pair_batches<'a>(moves: &'a [PlayerMove; 2]) -> Result<[&'a PlayerMove; 2], InvalidMove> {
    let [a, b] = moves;
    if a.player == b.player {
        return Err(InvalidMove::SubmittedTwice);
    }
    Ok(if a.player.index() == 0 { [a, b] } else { [b, a] })
}

/// Resolves one round of simultaneous moves.
#[instrument(level = "debug", skip_all)]
pub fn make_move(
    board: &Board,
    moves: &[PlayerMove; 2],
    rules: &Rules,
) -> Result<RoundOutcome, InvalidMove> {
    let batches = pair_batches(moves)?;
    let validator = Validator::new(board, rules);
    let [first, second] = batches;
    let actions = [
        validator.validate_player_move(first)?,
        validator.validate_player_move(second)?,
    ];

    let mut next = board.copy();
    let mut pending = actions.clone();
    let mut force = ForceBoard::new();
    let mut summary = RoundSummary::default();

    phase::upgrade(&mut next, &mut pending);
    phase::defend(&next, &mut pending, &mut force);
    phase::clash(&mut next, &mut pending, &mut summary);
    phase::battle(&mut next, &mut pending, &mut force, &mut summary);
    phase::recall(&mut next, &mut pending, &mut summary);
    phase::recruit(&mut next, &mut pending, &mut summary);

    for player in ALL_PLAYERS {
        debug!(%player, actions = %actions[player.index()], "resolved");
    }
    info!(
        clashes = summary.clashes.len(),
        battles = summary.battles.len(),
        casualties = summary.casualties.len(),
        "round resolved"
    );

    Ok(RoundOutcome { board: next, actions, summary })
}
