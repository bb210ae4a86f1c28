//! Move validation.
//!
//! Classifies raw moves into typed actions against the current board. Nothing
//! here mutates the board, so every function is safe to call speculatively.

use std::cell::OnceCell;

use tracing::trace;

use crate::board::{
    Action, ActionType, Board, HeatBoard, Move, Player, PlayerAction, PlayerMove, Position,
    UnitKind, CELL_COUNT,
};
use crate::rules::Rules;

/// Why a move or batch was refused. `Display` is the stable reason string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum InvalidMove {
    #[error("grid is empty")]
    GridIsEmpty,

    #[error("grid belongs to enemy")]
    GridBelongsToEnemy,

    #[error("not a valid skill")]
    NotAValidSkill,

    #[error("skill not available")]
    SkillNotAvailable,

    #[error("this skill recruits nothing")]
    RecruitsNothing,

    #[error("units limit exceeded")]
    UnitsLimitExceeded,

    #[error("unit moved more than once")]
    MovedMoreThanOnce,

    #[error("not enough supply")]
    NotEnoughSupply,

    #[error("recalled grid is empty")]
    RecalledGridIsEmpty,

    #[error("recalled unit is enemy")]
    RecalledUnitIsEnemy,

    #[error("recalled unit is under attack")]
    RecalledUnitUnderAttack,

    #[error("recall destination is under attack")]
    RecallDestinationUnderAttack,

    #[error("player submitted twice")]
    SubmittedTwice,

    #[error("malformed move literal")]
    MalformedLiteral,
}

/// Validates moves against one board, computing the heat map only if a
/// recall needs it.
pub struct Validator<'a> {
    board: &'a Board,
    rules: &'a Rules,
    heat: OnceCell<HeatBoard>,
}

impl<'a> Validator<'a> {
    pub fn new(board: &'a Board, rules: &'a Rules) -> Self {
        Validator { board, rules, heat: OnceCell::new() }
    }

    fn heat(&self) -> &HeatBoard {
        self.heat.get_or_init(|| HeatBoard::from_board(self.board))
    }

    /// Classifies one move for `player`.
    pub fn validate_move(&self, mv: Move, player: Player) -> Result<Action, InvalidMove> {
        let Some(unit) = self.board.at(mv.from) else {
            return self.validate_vacant(mv, player);
        };
        if unit.owner != player {
            return Err(InvalidMove::GridBelongsToEnemy);
        }
        let skill = mv.skill().ok_or(InvalidMove::NotAValidSkill)?;
        if !unit.ultimate_skillset().has(skill) {
            return Err(InvalidMove::SkillNotAvailable);
        }
        if !unit.has_skill(skill) {
            return Ok(Action::new(mv, ActionType::Upgrade, unit.kind));
        }
        let action_type = match self.board.at(mv.to) {
            None => ActionType::Move,
            Some(target) if target.owner == player => ActionType::Defend,
            Some(_) => ActionType::Attack,
        };
        Ok(Action::new(mv, action_type, unit.kind))
    }

    /// Moves out of an empty cell: recruits on the spawn row, recalls near
    /// the king.
    fn validate_vacant(&self, mv: Move, player: Player) -> Result<Action, InvalidMove> {
        if mv.from.y() == player.spawn_row() {
            if self.board.count_units(player, None) >= self.rules.max_units {
                return Err(InvalidMove::UnitsLimitExceeded);
            }
            let skill = mv.skill().ok_or(InvalidMove::NotAValidSkill)?;
            let kind = UnitKind::recruited_by(skill).ok_or(InvalidMove::RecruitsNothing)?;
            return Ok(Action::new(mv, ActionType::Recruit, kind));
        }

        if !self.rules.recall || !self.is_king_side(mv.from, player) {
            return Err(InvalidMove::GridIsEmpty);
        }
        let recalled = self.board.at(mv.to).ok_or(InvalidMove::RecalledGridIsEmpty)?;
        if recalled.owner != player {
            return Err(InvalidMove::RecalledUnitIsEnemy);
        }
        let heat = self.heat();
        if heat.hostile(mv.to, player) > 0 {
            return Err(InvalidMove::RecalledUnitUnderAttack);
        }
        if heat.hostile(mv.from, player) > 0 {
            return Err(InvalidMove::RecallDestinationUnderAttack);
        }
        Ok(Action::new(mv, ActionType::Recall, recalled.kind))
    }

    /// Whether `position` is one move away from the player's only king.
    fn is_king_side(&self, position: Position, player: Player) -> bool {
        match self.board.find_units(player, UnitKind::King).as_slice() {
            [king] => self.board.reachable_from(*king).contains(&position),
            _ => false,
        }
    }

    /// Validates a whole batch: every move, distinct sources, and the unit
    /// cap across all recruits.
    pub fn validate_player_move(&self, player_move: &PlayerMove) -> Result<PlayerAction, InvalidMove> {
        let player = player_move.player;

        let mut seen = [false; CELL_COUNT];
        for mv in &player_move.moves {
            let slot = &mut seen[mv.from.index()];
            if *slot {
                return Err(InvalidMove::MovedMoreThanOnce);
            }
            *slot = true;
        }

        let actions = player_move
            .moves
            .iter()
            .map(|mv| self.validate_move(*mv, player))
            .collect::<Result<Vec<_>, _>>()?;

        let recruits = actions
            .iter()
            .filter(|a| a.action_type == ActionType::Recruit)
            .count();
        if recruits > 0 && self.board.count_units(player, None) + recruits > self.rules.max_units {
            return Err(InvalidMove::UnitsLimitExceeded);
        }

        trace!(%player, count = actions.len(), "batch validated");
        Ok(PlayerAction::new(player, actions))
    }
}

/// Classifies one move for `player` on `board`.
pub fn validate_move(
    board: &Board,
    mv: Move,
    player: Player,
    rules: &Rules,
) -> Result<Action, InvalidMove> {
    Validator::new(board, rules).validate_move(mv, player)
}

/// Validates a batch of moves for its player on `board`.
pub fn validate_player_move(
    board: &Board,
    player_move: &PlayerMove,
    rules: &Rules,
) -> Result<PlayerAction, InvalidMove> {
    Validator::new(board, rules).validate_player_move(player_move)
}
