//! Board representation and game-state types.
//!
//! Contains positions, skills, units, the board itself, moves and actions,
//! and the per-round force accumulators used to settle contested cells.

pub mod force;
pub mod order;
pub mod position;
pub mod skill;
pub mod state;
pub mod unit;

pub use force::{Arrival, BattleOutcome, Decision, Force, ForceBoard, HeatBoard, Reinforcer};
pub use order::{recruit_cost, Action, ActionType, Move, PlayerAction, PlayerMove};
pub use position::{
    Player, Position, PositionDelta, ALL_PLAYERS, BOARD_SIZE_X, BOARD_SIZE_Y, CELL_COUNT,
};
pub use skill::{Skill, SkillSet, SKILL_RANGE, SKILL_SPAN};
pub use state::{Board, FRONT_ROW_LAYOUT, HOME_ROW_LAYOUT};
pub use unit::{Unit, UnitKind, ALL_UNIT_KINDS, RECRUITABLE_KINDS};
