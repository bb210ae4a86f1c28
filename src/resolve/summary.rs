//! What happened during a round.
//!
//! The summary is log- and UI-oriented: it records every clash and battle,
//! every unit that fell, and the recalls and recruits that went through.
//! Each report renders as a single `event` line.

use std::fmt;

use crate::board::{
    Action, Arrival, BattleOutcome, Decision, Move, Player, Position, Unit, UnitKind,
};

/// A unit destroyed this round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Casualty {
    pub kind: UnitKind,
    pub owner: Player,
    /// Cell the unit stood on before the round.
    pub position: Position,
}

impl Casualty {
    /// Supply the owner's opponent collects for this loss.
    pub fn trophy(&self) -> u32 {
        self.kind.trophy()
    }
}

impl fmt::Display for Casualty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}@{}", self.owner, self.kind.tag(), self.position)
    }
}

/// A head-on pair of attacks, player one's first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClashReport {
    pub attacks: [Action; 2],
    pub survivor: Option<Player>,
}

impl fmt::Display for ClashReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a1, a2] = &self.attacks;
        write!(
            f,
            "clash {} {} vs {} {}: ",
            a1.mv.from,
            a1.unit_kind.tag(),
            a2.mv.from,
            a2.unit_kind.tag()
        )?;
        match self.survivor {
            Some(player) => write!(f, "player {player} survives"),
            None => f.write_str("both fall"),
        }
    }
}

/// The settlement of one contested cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BattleReport {
    pub position: Position,
    pub arrivers: [Option<Arrival>; 2],
    pub reinforcement: [usize; 2],
    /// The unit that held the cell when the battle began.
    pub resident: Option<Unit>,
    pub outcome: BattleOutcome,
    /// Units whose move into the cell was turned into reinforcement; they
    /// never left their own cells.
    pub retreated: Vec<Position>,
}

impl fmt::Display for BattleReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "battle {}", self.position)?;
        for (i, arriver) in self.arrivers.iter().enumerate() {
            match arriver {
                Some(a) => write!(f, " {}:{}@{}", i + 1, a.unit.kind.tag(), a.from)?,
                None => write!(f, " {}:-", i + 1)?,
            }
        }
        write!(f, " reinforcement {}:{}", self.reinforcement[0], self.reinforcement[1])?;
        let decision = match self.outcome.decision {
            Decision::Reinforcement => "reinforcement",
            Decision::Unopposed => "unopposed",
            Decision::Duel => "duel",
            Decision::Tie => "tie",
        };
        match self.outcome.winner {
            Some(player) => write!(f, " winner {player} by {decision}")?,
            None => write!(f, " no winner ({decision})")?,
        }
        if !self.retreated.is_empty() {
            f.write_str(" retreated")?;
            for p in &self.retreated {
                write!(f, " {p}")?;
            }
        }
        Ok(())
    }
}

/// Everything a round did besides the plain moves.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoundSummary {
    pub clashes: Vec<ClashReport>,
    pub battles: Vec<BattleReport>,
    pub casualties: Vec<Casualty>,
    pub recalls: Vec<(Player, Move)>,
    pub recruits: Vec<(Player, Position, UnitKind)>,
}

impl RoundSummary {
    /// Units `player` lost this round.
    pub fn fallen(&self, player: Player) -> impl Iterator<Item = &Casualty> + '_ {
        self.casualties.iter().filter(move |c| c.owner == player)
    }

    /// Supply `player` earns from the opponent's losses.
    pub fn trophies(&self, player: Player) -> u32 {
        self.fallen(player.opponent()).map(Casualty::trophy).sum()
    }

    /// One human-readable line per reported event, clashes first.
    pub fn events(&self) -> Vec<String> {
        let mut events: Vec<String> = Vec::new();
        events.extend(self.clashes.iter().map(ToString::to_string));
        events.extend(self.battles.iter().map(ToString::to_string));
        events.extend(self.recalls.iter().map(|(p, m)| format!("recall {p} {m}")));
        events.extend(
            self.recruits
                .iter()
                .map(|(p, at, kind)| format!("recruit {p} {} at {at}", kind.tag())),
        );
        if !self.casualties.is_empty() {
            let fallen: Vec<String> = self.casualties.iter().map(ToString::to_string).collect();
            events.push(format!("fallen {}", fallen.join(" ")));
        }
        events
    }
}
