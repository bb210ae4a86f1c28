//! The board: a 9x9 grid of optional units.
//!
//! Uses a fixed-size array indexed by `Position::index()` so a copy is a
//! single memcpy. Each round resolves against a copy of the previous board;
//! the previous board is never written to.

use super::position::{Player, Position, BOARD_SIZE_X, CELL_COUNT};
use super::unit::{Unit, UnitKind};

/// Kinds along each player's home row in the standard opening, by x.
pub const HOME_ROW_LAYOUT: [UnitKind; BOARD_SIZE_X] = [
    UnitKind::Archer,
    UnitKind::Wagon,
    UnitKind::Archer,
    UnitKind::Rider,
    UnitKind::King,
    UnitKind::Rider,
    UnitKind::Archer,
    UnitKind::Wagon,
    UnitKind::Archer,
];

/// Kinds along the row in front of the home row in the standard opening.
pub const FRONT_ROW_LAYOUT: [UnitKind; BOARD_SIZE_X] = [
    UnitKind::Barbarian,
    UnitKind::Soldier,
    UnitKind::Barbarian,
    UnitKind::Soldier,
    UnitKind::Barbarian,
    UnitKind::Soldier,
    UnitKind::Barbarian,
    UnitKind::Soldier,
    UnitKind::Barbarian,
];

/// Complete spatial state of a game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: [Option<Unit>; CELL_COUNT],
}

impl Default for Board {
    fn default() -> Self {
        Board::empty()
    }
}

impl Board {
    pub const fn empty() -> Self {
        Board { cells: [None; CELL_COUNT] }
    }

    /// The standard opening position.
    pub fn standard() -> Self {
        let mut board = Board::empty();
        for player in [Player::One, Player::Two] {
            let home = player.spawn_row() as i32;
            let front = match player {
                Player::One => home + 1,
                Player::Two => home - 1,
            };
            for (x, (home_kind, front_kind)) in
                HOME_ROW_LAYOUT.iter().zip(FRONT_ROW_LAYOUT.iter()).enumerate()
            {
                let x = x as i32;
                if let (Some(h), Some(f)) = (Position::new(x, home), Position::new(x, front)) {
                    board.put(h, Unit::new(*home_kind, player));
                    board.put(f, Unit::new(*front_kind, player));
                }
            }
        }
        board
    }

    pub fn at(&self, position: Position) -> Option<&Unit> {
        self.cells[position.index()].as_ref()
    }

    pub fn at_mut(&mut self, position: Position) -> Option<&mut Unit> {
        self.cells[position.index()].as_mut()
    }

    /// Places a unit, overwriting any occupant.
    pub fn put(&mut self, position: Position, unit: Unit) {
        self.cells[position.index()] = Some(unit);
    }

    /// Empties a cell and returns its former occupant.
    pub fn remove(&mut self, position: Position) -> Option<Unit> {
        self.cells[position.index()].take()
    }

    /// Relocates the occupant of `from` to `to`. The destination conflict must
    /// already be settled; an occupant of `to` is overwritten. Returns false if
    /// `from` was empty.
    pub fn move_unit(&mut self, from: Position, to: Position) -> bool {
        match self.remove(from) {
            Some(unit) => {
                self.put(to, unit);
                true
            }
            None => false,
        }
    }

    /// An independent duplicate, skillsets included.
    pub fn copy(&self) -> Board {
        self.clone()
    }

    /// Visits every occupied cell in cell-major order.
    pub fn iterate_units(&self, mut visit: impl FnMut(&Unit, Position)) {
        for (pos, unit) in self.units() {
            visit(unit, pos);
        }
    }

    /// Occupied cells in cell-major order.
    pub fn units(&self) -> impl Iterator<Item = (Position, &Unit)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(idx, cell)| cell.as_ref().map(|unit| (Position::from_index(idx), unit)))
    }

    /// Number of units owned by `player`, optionally of one kind only.
    pub fn count_units(&self, player: Player, kind: Option<UnitKind>) -> usize {
        self.units()
            .filter(|(_, u)| u.owner == player && kind.map_or(true, |k| u.kind == k))
            .count()
    }

    /// Positions of `player`'s units of `kind`.
    pub fn find_units(&self, player: Player, kind: UnitKind) -> Vec<Position> {
        self.units()
            .filter(|(_, u)| u.owner == player && u.kind == kind)
            .map(|(pos, _)| pos)
            .collect()
    }

    /// Cells the unit at `position` can reach with the skills it knows now.
    pub fn reachable_from(&self, position: Position) -> Vec<Position> {
        match self.at(position) {
            Some(unit) => unit
                .skillset
                .list_skills()
                .into_iter()
                .filter_map(|skill| position.offset(skill.delta()))
                .collect(),
            None => Vec::new(),
        }
    }
}
