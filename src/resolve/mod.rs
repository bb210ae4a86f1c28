//! Round resolution.
//!
//! Resolves both players' simultaneous batches into the next board: upgrades,
//! defenders, head-on clashes, battles over contested cells, recalls and
//! recruits, in that order.

mod phase;
pub mod round;
pub mod status;
pub mod summary;

pub use round::{make_move, RoundOutcome};
pub use status::{status, GameStatus};
pub use summary::{BattleReport, Casualty, ClashReport, RoundSummary};
