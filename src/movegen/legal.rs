//! Legal move enumeration.
//!
//! Lists every single move that validates for a player, grouped by source cell
//! in cell-major order. Used for hints and to draw random batches.

use crate::board::{Board, Move, Player, Position, PositionDelta, SKILL_RANGE};
use crate::rules::Rules;

use super::validate::Validator;

/// Every move that validates for `player`, in cell-major order of the source
/// and `dx`-major order of the offset.
pub fn legal_moves(board: &Board, player: Player, rules: &Rules) -> Vec<Move> {
    let validator = Validator::new(board, rules);
    let mut moves = Vec::new();

    for from in Position::all() {
        match board.at(from) {
            Some(unit) if unit.owner == player => {
                for skill in unit.ultimate_skillset().list_skills() {
                    if let Some(to) = from.offset(skill.delta()) {
                        moves.push(Move::new(from, to));
                    }
                }
            }
            Some(_) => {}
            None if from.y() == player.spawn_row() => {
                for to in window(from) {
                    let mv = Move::new(from, to);
                    if validator.validate_move(mv, player).is_ok() {
                        moves.push(mv);
                    }
                }
            }
            None if rules.recall => {
                for (to, unit) in board.units() {
                    let mv = Move::new(from, to);
                    if unit.owner == player && validator.validate_move(mv, player).is_ok() {
                        moves.push(mv);
                    }
                }
            }
            None => {}
        }
    }

    moves
}

/// On-board cells in the 5x5 window around `center`, centre included.
fn window(center: Position) -> impl Iterator<Item = Position> {
    (-SKILL_RANGE..=SKILL_RANGE).flat_map(move |dx| {
        (-SKILL_RANGE..=SKILL_RANGE).filter_map(move |dy| center.offset(PositionDelta::new(dx, dy)))
    })
}
