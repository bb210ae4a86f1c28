//! Moves as submitted and actions as validated.
//!
//! A `Move` is the raw coordinate pair a player submits. Validation turns each
//! move into a typed `Action` against the board of the current round; the
//! resolver then consumes a `PlayerAction` phase by phase.

use std::fmt;

use super::position::{Player, Position};
use super::skill::Skill;
use super::unit::UnitKind;

/// A raw `(from, to)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Position,
    pub to: Position,
}

impl Move {
    pub const fn new(from: Position, to: Position) -> Self {
        Move { from, to }
    }

    /// The skill this move would use, or `None` outside the 5x5 window.
    pub fn skill(&self) -> Option<Skill> {
        Skill::new(self.from.delta_to(self.to))
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{}", self.from, self.to)
    }
}

/// One player's batch of moves for a round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerMove {
    pub player: Player,
    pub moves: Vec<Move>,
}

impl PlayerMove {
    pub fn new(player: Player, moves: Vec<Move>) -> Self {
        PlayerMove { player, moves }
    }

    /// A batch that orders nothing.
    pub fn pass(player: Player) -> Self {
        PlayerMove { player, moves: Vec::new() }
    }
}

impl fmt::Display for PlayerMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, m) in self.moves.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{m}")?;
        }
        Ok(())
    }
}

/// What a validated move does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionType {
    Upgrade,
    Defend,
    Move,
    Attack,
    Recruit,
    Recall,
}

impl ActionType {
    /// Three-letter tag used in action records.
    pub const fn tag(self) -> &'static str {
        match self {
            ActionType::Upgrade => "UPG",
            ActionType::Defend => "DEF",
            ActionType::Move => "MOV",
            ActionType::Attack => "ATK",
            ActionType::Recruit => "REC",
            ActionType::Recall => "RCL",
        }
    }
}

/// A move classified against the board it was validated on.
///
/// `unit_kind` is the acting unit's kind; for a recruit it is the kind that
/// will be recruited, for a recall the kind being recalled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Action {
    pub mv: Move,
    pub action_type: ActionType,
    pub unit_kind: UnitKind,
}

impl Action {
    pub const fn new(mv: Move, action_type: ActionType, unit_kind: UnitKind) -> Self {
        Action { mv, action_type, unit_kind }
    }

    /// Supply points this action costs.
    pub fn cost(&self) -> u32 {
        match self.action_type {
            ActionType::Move => {
                if self.mv.skill().is_some_and(|s| s.is_leap()) {
                    4
                } else {
                    3
                }
            }
            ActionType::Upgrade => 5,
            ActionType::Defend => 2,
            ActionType::Attack => 6,
            ActionType::Recall => 3,
            ActionType::Recruit => recruit_cost(self.unit_kind),
        }
    }
}

/// Supply points to recruit a unit of `kind`.
pub const fn recruit_cost(kind: UnitKind) -> u32 {
    match kind {
        UnitKind::Barbarian => 8,
        UnitKind::Archer => 10,
        UnitKind::Soldier => 12,
        UnitKind::Rider => 16,
        UnitKind::Wagon => 20,
        // Not recruitable; validation never produces these.
        _ => 0,
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.mv, self.action_type.tag())
    }
}

/// A player's validated actions for one round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerAction {
    pub player: Player,
    pub actions: Vec<Action>,
}

impl PlayerAction {
    pub fn new(player: Player, actions: Vec<Action>) -> Self {
        PlayerAction { player, actions }
    }

    /// Removes and returns every action matching `filter`, keeping the order
    /// of both halves.
    pub fn extract(&mut self, filter: impl Fn(&Action) -> bool) -> Vec<Action> {
        let (taken, kept): (Vec<Action>, Vec<Action>) =
            std::mem::take(&mut self.actions).into_iter().partition(|a| filter(a));
        self.actions = kept;
        taken
    }

    /// Removes and returns every action of one type.
    pub fn extract_type(&mut self, action_type: ActionType) -> Vec<Action> {
        self.extract(|a| a.action_type == action_type)
    }

    pub fn cost(&self) -> u32 {
        self.actions.iter().map(Action::cost).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

impl fmt::Display for PlayerAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, a) in self.actions.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{a}")?;
        }
        Ok(())
    }
}
