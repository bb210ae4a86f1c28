//! Players, grid coordinates and coordinate offsets.
//!
//! Positions are 0-based internally and always lie on the 9x9 grid; the
//! constructor rejects anything else. The display form is 1-based (`54` for
//! `Position(4, 3)`), which is what move records and the protocol print.

use std::fmt;

/// Width of the board.
pub const BOARD_SIZE_X: usize = 9;
/// Height of the board.
pub const BOARD_SIZE_Y: usize = 9;
/// Number of cells on the board.
pub const CELL_COUNT: usize = BOARD_SIZE_X * BOARD_SIZE_Y;

/// One of the two sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Player {
    One,
    Two,
}

/// Both players in resolution order.
pub const ALL_PLAYERS: [Player; 2] = [Player::One, Player::Two];

impl Player {
    /// Slot of this player in per-player arrays.
    pub const fn index(self) -> usize {
        match self {
            Player::One => 0,
            Player::Two => 1,
        }
    }

    /// Protocol number (1 or 2).
    pub const fn number(self) -> u8 {
        match self {
            Player::One => 1,
            Player::Two => 2,
        }
    }

    /// Parses a protocol player number.
    pub fn from_number(n: u8) -> Option<Player> {
        match n {
            1 => Some(Player::One),
            2 => Some(Player::Two),
            _ => None,
        }
    }

    pub const fn opponent(self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// Row on which this player recruits new units.
    pub const fn spawn_row(self) -> usize {
        match self {
            Player::One => 0,
            Player::Two => BOARD_SIZE_Y - 1,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// A cell on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    x: u8,
    y: u8,
}

impl Position {
    /// Creates a position, or `None` when the coordinates are off the board.
    pub fn new(x: i32, y: i32) -> Option<Position> {
        if (0..BOARD_SIZE_X as i32).contains(&x) && (0..BOARD_SIZE_Y as i32).contains(&y) {
            Some(Position { x: x as u8, y: y as u8 })
        } else {
            None
        }
    }

    /// Position for a cell index in cell-major order (x outer, y inner).
    pub const fn from_index(idx: usize) -> Position {
        Position {
            x: (idx / BOARD_SIZE_Y) as u8,
            y: (idx % BOARD_SIZE_Y) as u8,
        }
    }

    /// Cell index in cell-major order (x outer, y inner).
    pub const fn index(self) -> usize {
        self.x as usize * BOARD_SIZE_Y + self.y as usize
    }

    pub const fn x(self) -> usize {
        self.x as usize
    }

    pub const fn y(self) -> usize {
        self.y as usize
    }

    /// Offset that leads from `self` to `to`.
    pub fn delta_to(self, to: Position) -> PositionDelta {
        PositionDelta::new(to.x as i32 - self.x as i32, to.y as i32 - self.y as i32)
    }

    /// Applies an offset, or `None` if the result leaves the board.
    pub fn offset(self, delta: PositionDelta) -> Option<Position> {
        Position::new(self.x as i32 + delta.dx, self.y as i32 + delta.dy)
    }

    /// Iterates every cell in cell-major order.
    pub fn all() -> impl Iterator<Item = Position> {
        (0..CELL_COUNT).map(Position::from_index)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.x + 1, self.y + 1)
    }
}

/// A signed offset between two cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PositionDelta {
    pub dx: i32,
    pub dy: i32,
}

impl PositionDelta {
    pub const fn new(dx: i32, dy: i32) -> Self {
        PositionDelta { dx, dy }
    }

    pub const fn is_zero(self) -> bool {
        self.dx == 0 && self.dy == 0
    }
}
