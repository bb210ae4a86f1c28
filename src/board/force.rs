//! Per-round accumulators for contested cells.
//!
//! `ForceBoard` records, per cell and per player, the single unit trying to
//! occupy the cell (the arriver) and every unit backing that player's claim
//! without moving (the reinforcers). `HeatBoard` counts how many of each
//! player's units can reach a cell with the skills they know. Both live for
//! one round only and are built from the validated actions.

use super::position::{Player, Position, CELL_COUNT};
use super::state::Board;
use super::unit::{Unit, UnitKind};

/// A unit lifted off the board on its way into a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arrival {
    pub unit: Unit,
    pub from: Position,
}

/// A unit backing a cell from where it stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reinforcer {
    pub from: Position,
    pub kind: UnitKind,
    /// True when the unit was ordered to move into the cell but another of
    /// its player's units got the arriver slot first.
    pub stalled: bool,
}

/// Forces gathered on one cell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Force {
    pub arrivers: [Option<Arrival>; 2],
    pub reinforcers: [Vec<Reinforcer>; 2],
}

impl Force {
    pub fn arriver(&self, player: Player) -> Option<&Arrival> {
        self.arrivers[player.index()].as_ref()
    }

    pub fn reinforcement(&self, player: Player) -> usize {
        self.reinforcers[player.index()].len()
    }

    pub fn is_contested(&self) -> bool {
        self.arrivers.iter().any(Option::is_some)
    }
}

/// How a battle was decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// One side had strictly more reinforcers.
    Reinforcement,
    /// Reinforcement was level and only one side arrived.
    Unopposed,
    /// Reinforcement was level and the higher-level arriver won.
    Duel,
    /// Reinforcement and levels were level; nobody takes the cell.
    Tie,
}

/// The result of weighing the forces on one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BattleOutcome {
    pub winner: Option<Player>,
    pub decision: Decision,
}

/// Arrivers and reinforcers for every cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForceBoard {
    cells: Vec<Force>,
}

impl Default for ForceBoard {
    fn default() -> Self {
        ForceBoard::new()
    }
}

impl ForceBoard {
    pub fn new() -> Self {
        ForceBoard { cells: vec![Force::default(); CELL_COUNT] }
    }

    pub fn at(&self, position: Position) -> &Force {
        &self.cells[position.index()]
    }

    pub fn reinforce(&mut self, position: Position, player: Player, reinforcer: Reinforcer) {
        self.cells[position.index()].reinforcers[player.index()].push(reinforcer);
    }

    pub fn reinforcers(&self, position: Position, player: Player) -> &[Reinforcer] {
        &self.cells[position.index()].reinforcers[player.index()]
    }

    /// Registers `player`'s arriver. A cell holds at most one per player.
    pub fn arrive(&mut self, position: Position, player: Player, arrival: Arrival) {
        let slot = &mut self.cells[position.index()].arrivers[player.index()];
        assert!(
            slot.is_none(),
            "player {player} already has an arriver at {position}"
        );
        *slot = Some(arrival);
    }

    pub fn arriver(&self, position: Position, player: Player) -> Option<&Arrival> {
        self.cells[position.index()].arriver(player)
    }

    /// Weighs the forces on a cell: reinforcement first, then arrivers.
    pub fn battle(&self, position: Position) -> BattleOutcome {
        let force = self.at(position);
        let r1 = force.reinforcement(Player::One);
        let r2 = force.reinforcement(Player::Two);

        if r1 != r2 {
            let winner = if r1 > r2 { Player::One } else { Player::Two };
            return BattleOutcome { winner: Some(winner), decision: Decision::Reinforcement };
        }

        match (force.arriver(Player::One), force.arriver(Player::Two)) {
            (Some(a1), Some(a2)) => match a1.unit.duel(&a2.unit) {
                Some(survivor) => BattleOutcome {
                    winner: Some(survivor.owner),
                    decision: Decision::Duel,
                },
                None => BattleOutcome { winner: None, decision: Decision::Tie },
            },
            (Some(_), None) => BattleOutcome {
                winner: Some(Player::One),
                decision: Decision::Unopposed,
            },
            (None, Some(_)) => BattleOutcome {
                winner: Some(Player::Two),
                decision: Decision::Unopposed,
            },
            (None, None) => BattleOutcome { winner: None, decision: Decision::Tie },
        }
    }

    /// Cells with at least one arriver, in cell-major order.
    pub fn contested(&self) -> Vec<Position> {
        Position::all().filter(|p| self.at(*p).is_contested()).collect()
    }

    /// Removes and returns the forces on a cell.
    pub fn take(&mut self, position: Position) -> Force {
        std::mem::take(&mut self.cells[position.index()])
    }
}

/// Per-cell count of units each player can bring to bear.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeatBoard {
    cells: [[u8; 2]; CELL_COUNT],
}

impl Default for HeatBoard {
    fn default() -> Self {
        HeatBoard { cells: [[0; 2]; CELL_COUNT] }
    }
}

impl HeatBoard {
    /// Heat generated by every unit's currently known skills.
    pub fn from_board(board: &Board) -> Self {
        let mut heat = HeatBoard::default();
        for (from, unit) in board.units() {
            for target in board.reachable_from(from) {
                heat.heatup(target, unit.owner);
            }
        }
        heat
    }

    pub fn heatup(&mut self, position: Position, player: Player) {
        let cell = &mut self.cells[position.index()][player.index()];
        *cell = cell.saturating_add(1);
    }

    /// How many of `player`'s units reach `position`.
    pub fn heat(&self, position: Position, player: Player) -> u8 {
        self.cells[position.index()][player.index()]
    }

    /// How many of `player`'s opponent's units reach `position`.
    pub fn hostile(&self, position: Position, player: Player) -> u8 {
        self.heat(position, player.opponent())
    }
}
