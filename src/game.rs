//! A game: the board plus each player's supply.
//!
//! Every action costs supply. Each round a player pays for its batch, then
//! collects a basic income, one point per wagon it had going into the round,
//! and the trophies of every opposing unit that fell.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::board::{Board, Player, PlayerAction, PlayerMove, UnitKind, ALL_PLAYERS};
use crate::movegen::{self, InvalidMove, Validator};
use crate::protocol::SnapshotError;
use crate::resolve::{make_move, status, GameStatus, RoundSummary};
use crate::rules::Rules;

/// Supply each player starts with.
pub const INITIAL_SUPPLY: u32 = 12;
/// Supply each player earns every round.
pub const BASIC_INCOME: u32 = 10;
/// Extra supply per wagon owned.
pub const WAGON_INCOME: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    pub round: u32,
    pub supply: [u32; 2],
    pub board: Board,
    #[serde(default)]
    pub rules: Rules,
    /// Actions of the round that produced this game.
    #[serde(skip)]
    pub last_actions: Option<[PlayerAction; 2]>,
    /// Summary of the round that produced this game.
    #[serde(skip)]
    pub last_summary: Option<RoundSummary>,
}

impl Game {
    pub fn new(board: Board, rules: Rules) -> Self {
        Game {
            round: 0,
            supply: [INITIAL_SUPPLY; 2],
            board,
            rules,
            last_actions: None,
            last_summary: None,
        }
    }

    /// A game at the standard opening.
    pub fn new_standard(rules: Rules) -> Self {
        Game::new(Board::standard(), rules)
    }

    pub fn supply(&self, player: Player) -> u32 {
        self.supply[player.index()]
    }

    /// Gives both players extra supply.
    pub fn replenish(&mut self, amount: u32) {
        for supply in &mut self.supply {
            *supply += amount;
        }
    }

    fn income(&self, player: Player, summary: &RoundSummary) -> u32 {
        let wagons = self.board.count_units(player, Some(UnitKind::Wagon)) as u32;
        BASIC_INCOME + wagons * WAGON_INCOME + summary.trophies(player)
    }

    /// Validates a batch and checks the player can pay for it.
    pub fn validate_player_move(&self, player_move: &PlayerMove) -> Result<PlayerAction, InvalidMove> {
        let actions = Validator::new(&self.board, &self.rules).validate_player_move(player_move)?;
        if actions.cost() > self.supply(actions.player) {
            return Err(InvalidMove::NotEnoughSupply);
        }
        Ok(actions)
    }

    /// Resolves a round and returns the game that follows it.
    pub fn proceed(&self, moves: &[PlayerMove; 2]) -> Result<Game, InvalidMove> {
        for player_move in moves {
            self.validate_player_move(player_move)?;
        }
        let outcome = make_move(&self.board, moves, &self.rules)?;

        let mut supply = self.supply;
        for player in ALL_PLAYERS {
            let cost = outcome.actions[player.index()].cost();
            supply[player.index()] = self.supply(player) - cost + self.income(player, &outcome.summary);
        }

        let next = Game {
            round: self.round + 1,
            supply,
            board: outcome.board,
            rules: self.rules,
            last_actions: Some(outcome.actions),
            last_summary: Some(outcome.summary),
        };
        info!(round = next.round, supply1 = supply[0], supply2 = supply[1], "round complete");
        Ok(next)
    }

    /// A random batch the player can afford.
    pub fn random_player_move(&self, player: Player, rng: &mut impl Rng) -> PlayerMove {
        movegen::random_player_move(&self.board, player, &self.rules, self.supply(player), rng)
    }

    /// Status from player one's point of view.
    pub fn status(&self) -> GameStatus {
        status(&self.board)
    }

    /// Encodes round, supply, rules and board as JSON.
    pub fn encode(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn decode(s: &str) -> Result<Game, SnapshotError> {
        Ok(serde_json::from_str(s)?)
    }
}

impl Default for Game {
    fn default() -> Self {
        Game::new_standard(Rules::default())
    }
}
