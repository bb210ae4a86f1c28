//! Referee state management.
//!
//! Holds the current game, the rules new games start with, and the batches
//! submitted so far this round. A round is resolved exactly once, as soon as
//! both players have submitted.

use std::io::{self, Write};

use tracing::{info, warn};

use crate::board::{Player, PlayerMove, ALL_PLAYERS};
use crate::game::Game;
use crate::movegen::{legal_moves, InvalidMove};
use crate::protocol::{format_moves, parse_player_move};
use crate::rules::{Rules, DEFAULT_MAX_UNITS};

/// Holds the mutable state of the referee between commands.
pub struct Engine {
    pub game: Game,
    pub rules: Rules,
    pending: [Option<PlayerMove>; 2],
}

impl Default for Engine {
    fn default() -> Self {
        Engine::new()
    }
}

impl Engine {
    /// Creates a referee at the standard opening under the classic rules.
    pub fn new() -> Self {
        let rules = Rules::default();
        Engine { game: Game::new_standard(rules), rules, pending: [None, None] }
    }

    /// Starts a fresh game with the current rules.
    pub fn new_game(&mut self) {
        self.game = Game::new_standard(self.rules);
        self.pending = [None, None];
    }

    /// Replaces the game with a JSON snapshot. The snapshot's rules win.
    pub fn set_position(&mut self, json: &str) -> Result<(), String> {
        match Game::decode(json) {
            Ok(game) => {
                self.rules = game.rules;
                self.game = game;
                self.pending = [None, None];
                Ok(())
            }
            Err(e) => Err(format!("failed to parse position: {e}")),
        }
    }

    /// Applies an option to the rules and to the game in progress. Batches
    /// buffered under the old rules are dropped and must be resubmitted.
    pub fn set_option(&mut self, name: &str, value: Option<&str>) {
        match self.rules.set_option(name, value) {
            Ok(()) => {
                self.game.rules = self.rules;
                if self.pending.iter().any(Option::is_some) {
                    warn!(option = name, "rules changed, buffered batches dropped");
                    self.pending = [None, None];
                }
            }
            Err(e) => warn!(error = %e, "setoption ignored"),
        }
    }

    /// Handles the handshake: writes id, options, and `skirmishok`.
    pub fn handle_skirmish<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "id name skirmish")?;
        writeln!(
            out,
            "option name MaxUnits type spin default {DEFAULT_MAX_UNITS} min 1 max 81"
        )?;
        writeln!(out, "option name Recall type check default false")?;
        writeln!(out, "skirmishok")?;
        out.flush()
    }

    /// Handles the `isready` command.
    pub fn handle_isready<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "readyok")?;
        out.flush()
    }

    /// Prints the game snapshot.
    pub fn handle_board<W: Write>(&self, out: &mut W) -> io::Result<()> {
        match self.game.encode() {
            Ok(json) => writeln!(out, "{json}")?,
            Err(e) => warn!(error = %e, "board: snapshot failed"),
        }
        out.flush()
    }

    /// Lists every legal move for `player` in literal form.
    pub fn handle_hint<W: Write>(&self, player: Player, out: &mut W) -> io::Result<()> {
        let moves = legal_moves(&self.game.board, player, &self.game.rules);
        writeln!(out, "hint {player} {}", format_moves(&moves))?;
        out.flush()
    }

    /// Buffers a batch; resolves the round once both players have submitted.
    pub fn handle_submit<W: Write>(
        &mut self,
        player: Player,
        literal: &str,
        out: &mut W,
    ) -> io::Result<()> {
        if let Err(reason) = self.buffer(player, literal) {
            warn!(%player, %reason, "submission rejected");
            writeln!(out, "rejected {player} {reason}")?;
            return out.flush();
        }
        if let [Some(_), Some(_)] = &self.pending {
            self.resolve_round(out)?;
        }
        out.flush()
    }

    fn buffer(&mut self, player: Player, literal: &str) -> Result<(), InvalidMove> {
        if self.pending[player.index()].is_some() {
            return Err(InvalidMove::SubmittedTwice);
        }
        let player_move = parse_player_move(player, literal)?;
        self.game.validate_player_move(&player_move)?;
        self.pending[player.index()] = Some(player_move);
        Ok(())
    }

    fn resolve_round<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        let [Some(first), Some(second)] = std::mem::take(&mut self.pending) else {
            return Ok(());
        };
        let next = match self.game.proceed(&[first, second]) {
            Ok(next) => next,
            Err(reason) => {
                // Both batches validated on submission, so this is a bug.
                warn!(%reason, "round failed to resolve");
                return writeln!(out, "rejected 0 {reason}");
            }
        };

        if let Some(actions) = &next.last_actions {
            for player in ALL_PLAYERS {
                writeln!(out, "actions {player} {}", actions[player.index()])?;
            }
        }
        if let Some(summary) = &next.last_summary {
            for event in summary.events() {
                writeln!(out, "event {event}")?;
            }
        }
        writeln!(out, "supply {} {}", next.supply[0], next.supply[1])?;
        writeln!(out, "status {}", next.status())?;

        info!(round = next.round, status = %next.status(), "round printed");
        self.game = next;
        Ok(())
    }
}
