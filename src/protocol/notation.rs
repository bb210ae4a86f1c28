//! Move literals.
//!
//! A batch is written as whitespace-separated four-digit groups, one per move:
//! source `x y` then destination `x y`, each digit 0-based (`4443` moves from
//! `Position(4, 4)` to `Position(4, 3)`). Records print positions 1-based, so
//! the same move shows as `55->54`.

use crate::board::{Move, Player, PlayerMove, Position};
use crate::movegen::InvalidMove;

fn digit(c: char) -> Option<i32> {
    c.to_digit(10).map(|d| d as i32)
}

/// Parses one four-digit group.
pub fn parse_move_literal(s: &str) -> Result<Move, InvalidMove> {
    let digits: Vec<i32> = s
        .chars()
        .map(digit)
        .collect::<Option<_>>()
        .ok_or(InvalidMove::MalformedLiteral)?;
    let &[fx, fy, tx, ty] = digits.as_slice() else {
        return Err(InvalidMove::MalformedLiteral);
    };
    match (Position::new(fx, fy), Position::new(tx, ty)) {
        (Some(from), Some(to)) => Ok(Move::new(from, to)),
        _ => Err(InvalidMove::MalformedLiteral),
    }
}

/// Parses a whole batch for `player`. An empty literal is a pass.
pub fn parse_player_move(player: Player, literal: &str) -> Result<PlayerMove, InvalidMove> {
    let moves = literal
        .split_whitespace()
        .map(parse_move_literal)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(PlayerMove::new(player, moves))
}

/// Writes a move back in literal form.
pub fn format_move_literal(mv: &Move) -> String {
    format!("{}{}{}{}", mv.from.x(), mv.from.y(), mv.to.x(), mv.to.y())
}

/// Writes a batch of moves in literal form.
pub fn format_moves(moves: &[Move]) -> String {
    moves.iter().map(format_move_literal).collect::<Vec<_>>().join(" ")
}
