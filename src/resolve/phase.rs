//! The resolution phases.
//!
//! Each phase extracts the actions it handles from both players' lists, so a
//! later phase never sees an action twice. Phases run in this order:
//!
//! 1. upgrade: endow or promote in place
//! 2. defend: register reinforcers
//! 3. clash: remove the losers of head-on attack pairs
//! 4. battle: lift movers into the force board and settle every contested cell
//! 5. recall: pull units back next to the king
//! 6. recruit: place new units on empty spawn cells
//!
//! Everything panicking here means validation and resolution disagree.

use tracing::debug;

use crate::board::{
    Action, ActionType, Arrival, Board, ForceBoard, Player, PlayerAction, Position, Reinforcer,
    Unit, ALL_PLAYERS, CELL_COUNT,
};

use super::summary::{BattleReport, Casualty, ClashReport, RoundSummary};

fn occupant(board: &Board, position: Position) -> Unit {
    match board.at(position) {
        Some(unit) => *unit,
        None => panic!("validated action starts from empty cell {position}"),
    }
}

/// Teaches every upgrading unit its new skill, promoting it when ready.
pub(crate) fn upgrade(board: &mut Board, actions: &mut [PlayerAction; 2]) {
    for player_action in actions.iter_mut() {
        for action in player_action.extract_type(ActionType::Upgrade) {
            let Some(skill) = action.mv.skill() else {
                panic!("upgrade {action} has no skill");
            };
            let unit = occupant(board, action.mv.from);
            if unit.is_promotion_ready() {
                let Some(promoted) = unit.get_promoted(skill) else {
                    panic!("upgrade {action} promotes nothing");
                };
                debug!(from = %action.mv.from, kind = promoted.kind.tag(), "promoted");
                board.put(action.mv.from, promoted);
            } else if let Some(unit) = board.at_mut(action.mv.from) {
                assert!(unit.endow(skill), "upgrade {action} teaches nothing");
            }
        }
    }
}

/// Registers defenders as reinforcers of their targets.
pub(crate) fn defend(board: &Board, actions: &mut [PlayerAction; 2], force: &mut ForceBoard) {
    for player_action in actions.iter_mut() {
        let player = player_action.player;
        for action in player_action.extract_type(ActionType::Defend) {
            let kind = occupant(board, action.mv.from).kind;
            force.reinforce(
                action.mv.to,
                player,
                Reinforcer { from: action.mv.from, kind, stalled: false },
            );
        }
    }
}

/// Finds head-on attack pairs, player one's action first.
fn find_clashes(actions: &[PlayerAction; 2]) -> Vec<[Action; 2]> {
    let mut attack_from: [Option<Action>; CELL_COUNT] = [None; CELL_COUNT];
    for action in &actions[Player::Two.index()].actions {
        if action.action_type == ActionType::Attack {
            attack_from[action.mv.from.index()] = Some(*action);
        }
    }

    actions[Player::One.index()]
        .actions
        .iter()
        .filter(|a| a.action_type == ActionType::Attack)
        .filter_map(|a1| {
            attack_from[a1.mv.to.index()]
                .filter(|a2| a2.mv.to == a1.mv.from)
                .map(|a2| [*a1, a2])
        })
        .collect()
}

/// Settles head-on attack pairs by duel. Only the fallen side's attacks are
/// consumed; a winner keeps its attack for the battle phase, where it queues
/// behind any earlier order of its player onto the same cell.
pub(crate) fn clash(board: &mut Board, actions: &mut [PlayerAction; 2], summary: &mut RoundSummary) {
    for pair in find_clashes(actions) {
        let units = pair.map(|a| occupant(board, a.mv.from));
        let survivor = units[0].duel(&units[1]).map(|u| u.owner);

        for player in ALL_PLAYERS {
            if survivor == Some(player) {
                continue;
            }
            let attack = pair[player.index()];
            actions[player.index()].extract(|a| *a == attack);
            if let Some(unit) = board.remove(attack.mv.from) {
                summary.casualties.push(Casualty {
                    kind: unit.kind,
                    owner: player,
                    position: attack.mv.from,
                });
            }
        }

        debug!(p1 = %pair[0], p2 = %pair[1], ?survivor, "clash");
        summary.clashes.push(ClashReport { attacks: pair, survivor });
    }
}

/// Lifts every mover into the force board, then settles each contested cell
/// once, in cell-major order.
pub(crate) fn battle(
    board: &mut Board,
    actions: &mut [PlayerAction; 2],
    force: &mut ForceBoard,
    summary: &mut RoundSummary,
) {
    for player_action in actions.iter_mut() {
        let player = player_action.player;
        let movers = player_action
            .extract(|a| matches!(a.action_type, ActionType::Move | ActionType::Attack));
        for action in movers {
            let (from, to) = (action.mv.from, action.mv.to);
            if force.arriver(to, player).is_none() {
                let Some(unit) = board.remove(from) else {
                    panic!("validated {action} starts from empty cell {from}");
                };
                force.arrive(to, player, Arrival { unit, from });
            } else {
                let kind = occupant(board, from).kind;
                force.reinforce(to, player, Reinforcer { from, kind, stalled: true });
            }
        }
    }

    for position in force.contested() {
        let outcome = force.battle(position);
        let forces = force.take(position);
        let resident = board.at(position).copied();
        let conqueror = outcome.winner.and_then(|w| forces.arrivers[w.index()]);

        for (i, arriver) in forces.arrivers.iter().enumerate() {
            let Some(arrival) = arriver else { continue };
            if outcome.winner.map(Player::index) != Some(i) {
                summary.casualties.push(Casualty {
                    kind: arrival.unit.kind,
                    owner: arrival.unit.owner,
                    position: arrival.from,
                });
            }
        }
        if let Some(arrival) = conqueror {
            if let Some(fallen) = board.remove(position) {
                summary.casualties.push(Casualty {
                    kind: fallen.kind,
                    owner: fallen.owner,
                    position,
                });
            }
            board.put(position, arrival.unit);
        }

        let retreated = forces
            .reinforcers
            .iter()
            .flatten()
            .filter(|r| r.stalled)
            .map(|r| r.from)
            .collect();
        let report = BattleReport {
            position,
            arrivers: forces.arrivers,
            reinforcement: [
                forces.reinforcement(Player::One),
                forces.reinforcement(Player::Two),
            ],
            resident,
            outcome,
            retreated,
        };
        debug!(event = %report, "battle");
        summary.battles.push(report);
    }
}

/// Moves recalled units back onto their still-empty cells.
pub(crate) fn recall(board: &mut Board, actions: &mut [PlayerAction; 2], summary: &mut RoundSummary) {
    for player_action in actions.iter_mut() {
        let player = player_action.player;
        for action in player_action.extract_type(ActionType::Recall) {
            let (cell, unit_at) = (action.mv.from, action.mv.to);
            let owned = board.at(unit_at).is_some_and(|u| u.owner == player);
            if board.at(cell).is_none() && owned {
                board.move_unit(unit_at, cell);
                summary.recalls.push((player, action.mv));
            } else {
                debug!(%player, recall = %action, "recall dropped");
            }
        }
    }
}

/// Places recruits on spawn cells that are still empty. Only recruits may
/// remain by now.
pub(crate) fn recruit(board: &mut Board, actions: &mut [PlayerAction; 2], summary: &mut RoundSummary) {
    for player_action in actions.iter_mut() {
        let player = player_action.player;
        for action in player_action.extract_type(ActionType::Recruit) {
            let from = action.mv.from;
            if board.at(from).is_some() {
                continue;
            }
            let Some(unit) = action.mv.skill().and_then(|s| Unit::create_from_skill(player, s))
            else {
                panic!("recruit {action} creates nothing");
            };
            board.put(from, unit);
            summary.recruits.push((player, from, unit.kind));
        }
        assert!(
            player_action.is_empty(),
            "unresolved actions remain: {player_action}"
        );
    }
}
