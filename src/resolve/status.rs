//! Game-over detection.

use std::fmt;

use crate::board::{Board, Player, UnitKind};

/// Where a game stands, from player one's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing,
    Victorious,
    Defeated,
    Draw,
}

impl GameStatus {
    /// The winning player, if the game is decided.
    pub fn winner(self) -> Option<Player> {
        match self {
            GameStatus::Victorious => Some(Player::One),
            GameStatus::Defeated => Some(Player::Two),
            GameStatus::Ongoing | GameStatus::Draw => None,
        }
    }

    pub fn is_over(self) -> bool {
        self != GameStatus::Ongoing
    }

    /// The same status seen by `player`.
    pub fn for_player(self, player: Player) -> GameStatus {
        match (player, self) {
            (Player::Two, GameStatus::Victorious) => GameStatus::Defeated,
            (Player::Two, GameStatus::Defeated) => GameStatus::Victorious,
            _ => self,
        }
    }

    pub const fn tag(self) -> &'static str {
        match self {
            GameStatus::Ongoing => "ongoing",
            GameStatus::Victorious => "victorious",
            GameStatus::Defeated => "defeated",
            GameStatus::Draw => "draw",
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Decides the game by which kings are still on the board.
pub fn status(board: &Board) -> GameStatus {
    let has_king = |p| board.count_units(p, Some(UnitKind::King)) > 0;
    match (has_king(Player::One), has_king(Player::Two)) {
        (true, true) => GameStatus::Ongoing,
        (true, false) => GameStatus::Victorious,
        (false, true) => GameStatus::Defeated,
        (false, false) => GameStatus::Draw,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Position, Unit};

    fn pos(x: i32, y: i32) -> Position {
        Position::new(x, y).unwrap()
    }

    #[test]
    fn kings_decide_status() {
        let mut board = Board::standard();
        assert_eq!(status(&board), GameStatus::Ongoing);

        board.remove(pos(4, 8));
        assert_eq!(status(&board), GameStatus::Victorious);
        assert_eq!(status(&board).winner(), Some(Player::One));
        assert_eq!(status(&board).for_player(Player::Two), GameStatus::Defeated);

        board.remove(pos(4, 0));
        assert_eq!(status(&board), GameStatus::Draw);
        assert!(status(&board).is_over());

        board.put(pos(4, 4), Unit::new(UnitKind::King, Player::Two));
        assert_eq!(status(&board), GameStatus::Defeated);
    }
}
