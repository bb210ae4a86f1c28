//! Round resolution scenarios.
//!
//! Each scenario builds a small board, submits both players' literals and
//! checks the resulting board, action records and summary. The randomized
//! section plays whole games from seeded batches and checks the invariants
//! that must hold after every round.

use rand::rngs::SmallRng;
use rand::SeedableRng;

use skirmish::board::{
    ActionType, Board, Player, PlayerMove, Position, PositionDelta, Skill, SkillSet, Unit, UnitKind,
};
use skirmish::protocol::{encode_board, parse_board, parse_player_move};
use skirmish::resolve::{make_move, GameStatus, RoundOutcome};
use skirmish::{Game, InvalidMove, Rules};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn pos(x: i32, y: i32) -> Position {
    Position::new(x, y).unwrap()
}

fn place(board: &mut Board, x: i32, y: i32, kind: UnitKind, owner: Player) {
    board.put(pos(x, y), Unit::new(kind, owner));
}

fn place_perfect(board: &mut Board, x: i32, y: i32, kind: UnitKind, owner: Player) {
    board.put(pos(x, y), Unit::perfect(kind, owner));
}

fn resolve_with(board: &Board, p1: &str, p2: &str, rules: &Rules) -> RoundOutcome {
    let moves = [
        parse_player_move(Player::One, p1).unwrap(),
        parse_player_move(Player::Two, p2).unwrap(),
    ];
    make_move(board, &moves, rules).unwrap()
}

fn resolve(board: &Board, p1: &str, p2: &str) -> RoundOutcome {
    resolve_with(board, p1, p2, &Rules::default())
}

fn skill(dx: i32, dy: i32) -> Skill {
    Skill::new(PositionDelta::new(dx, dy)).unwrap()
}

fn kind_at(board: &Board, x: i32, y: i32) -> Option<(UnitKind, Player)> {
    board.at(pos(x, y)).map(|u| (u.kind, u.owner))
}

/// The four-soldier board of the regression suite.
fn duel_board() -> Board {
    let mut board = Board::empty();
    place(&mut board, 4, 3, UnitKind::Soldier, Player::One);
    place(&mut board, 4, 2, UnitKind::Soldier, Player::One);
    place(&mut board, 4, 4, UnitKind::Soldier, Player::Two);
    place(&mut board, 4, 5, UnitKind::Soldier, Player::Two);
    board
}

// ===========================================================================
// Regression
// ===========================================================================

#[test]
fn regression_four_soldiers() {
    let board = duel_board();
    let outcome = resolve(&board, "4342 4252", "4443 4546");

    assert_eq!(outcome.actions[0].to_string(), "54->53(DEF),53->63(UPG)");
    assert_eq!(outcome.actions[1].to_string(), "55->54(ATK),56->57(MOV)");

    let next = &outcome.board;
    // The defended cell was (4, 2), not the attacked one.
    assert_eq!(kind_at(next, 4, 3), Some((UnitKind::Soldier, Player::Two)));
    assert_eq!(kind_at(next, 4, 6), Some((UnitKind::Soldier, Player::Two)));
    assert_eq!(kind_at(next, 4, 4), None);
    assert_eq!(kind_at(next, 4, 5), None);

    let upgraded = next.at(pos(4, 2)).unwrap();
    assert_eq!(upgraded.skillset.len(), 3);
    assert_eq!(outcome.summary.casualties.len(), 1);
    assert_eq!(outcome.summary.trophies(Player::Two), 6);

    // The input board is never written.
    assert_eq!(board, duel_board());
}

#[test]
fn regression_duplicate_source_rejected() {
    let mut board = Board::empty();
    place(&mut board, 4, 3, UnitKind::Soldier, Player::One);
    place(&mut board, 4, 4, UnitKind::Soldier, Player::Two);
    let mut game = Game::new(board, Rules::default());
    game.replenish(100);

    let batch = parse_player_move(Player::Two, "4443 4454").unwrap();
    assert_eq!(game.validate_player_move(&batch), Err(InvalidMove::MovedMoreThanOnce));
}

#[test]
fn regression_clash_winner_queues_behind_earlier_order() {
    let mut board = Board::empty();
    let mut spear_skills = SkillSet::empty();
    spear_skills.add(skill(0, 1));
    board.put(pos(4, 3), Unit::with_skillset(UnitKind::Spearman, Player::One, spear_skills));
    let mut rider = Unit::new(UnitKind::Rider, Player::One);
    assert!(rider.endow(skill(-1, -2)));
    board.put(pos(5, 6), rider);
    place(&mut board, 4, 4, UnitKind::Soldier, Player::Two);
    let mut game = Game::new(board, Rules::default());
    game.replenish(100);

    let moves = [
        parse_player_move(Player::Two, "4443").unwrap(),
        parse_player_move(Player::One, "5644 4344").unwrap(),
    ];
    let next = game.proceed(&moves).unwrap();
    let summary = next.last_summary.as_ref().unwrap();

    assert_eq!(summary.clashes[0].survivor, Some(Player::One));
    assert_eq!(summary.casualties[0].kind, UnitKind::Soldier);
    // The rider was ordered first, so it takes the cell and the spearman
    // stays home as a reinforcer.
    assert_eq!(kind_at(&next.board, 4, 3), Some((UnitKind::Spearman, Player::One)));
    assert_eq!(kind_at(&next.board, 4, 4), Some((UnitKind::Rider, Player::One)));
    assert!(next.board.at(pos(5, 6)).is_none());
}

#[test]
fn regression_move_conflict() {
    let mut board = Board::empty();
    place(&mut board, 4, 2, UnitKind::Soldier, Player::One);
    place(&mut board, 5, 2, UnitKind::Soldier, Player::One);
    place(&mut board, 6, 1, UnitKind::Rider, Player::One);
    place(&mut board, 4, 4, UnitKind::Soldier, Player::Two);
    place(&mut board, 5, 4, UnitKind::Soldier, Player::Two);

    let outcome = resolve(&board, "4243 5253 6153", "4443 5453");
    let next = &outcome.board;
    assert!(next.at(pos(4, 2)).is_none());
    assert!(next.at(pos(4, 4)).is_none());
    assert!(next.at(pos(4, 3)).is_none());
    assert!(next.at(pos(5, 2)).is_none());
    assert!(next.at(pos(5, 4)).is_none());
    // The rider queued behind the soldier and backs it from where it stands.
    assert_eq!(kind_at(next, 6, 1), Some((UnitKind::Rider, Player::One)));
    assert_eq!(kind_at(next, 5, 3), Some((UnitKind::Soldier, Player::One)));
}

#[test]
fn regression_attack_defend() {
    let mut board = Board::empty();
    place(&mut board, 4, 4, UnitKind::Soldier, Player::Two);
    place(&mut board, 5, 5, UnitKind::Rider, Player::Two);
    place(&mut board, 5, 0, UnitKind::Soldier, Player::Two);

    place(&mut board, 4, 3, UnitKind::Rider, Player::One);
    place(&mut board, 4, 2, UnitKind::Soldier, Player::One);
    place(&mut board, 5, 1, UnitKind::Rider, Player::One);
    place(&mut board, 5, 6, UnitKind::Soldier, Player::One);
    place(&mut board, 4, 5, UnitKind::Soldier, Player::One);

    let outcome = resolve(&board, "4243 5143 5655 4544 4335", "4443 5543 5051");
    let next = &outcome.board;
    let owner = |x, y| next.at(pos(x, y)).map(|u| u.owner);

    assert_eq!(owner(4, 4), Some(Player::One));
    assert_eq!(owner(5, 5), Some(Player::One));
    assert_eq!(owner(5, 0), None);

    assert_eq!(owner(4, 3), None);
    assert_eq!(owner(4, 2), Some(Player::One));
    assert_eq!(owner(5, 1), Some(Player::Two));
    assert_eq!(owner(5, 6), None);
    assert_eq!(owner(4, 5), None);

    assert_eq!(owner(3, 5), Some(Player::One));
}

// ===========================================================================
// Clashes
// ===========================================================================

#[test]
fn head_on_soldiers_annihilate() {
    let mut board = Board::empty();
    place(&mut board, 3, 3, UnitKind::Soldier, Player::One);
    place(&mut board, 3, 4, UnitKind::Soldier, Player::Two);

    let outcome = resolve(&board, "3334", "3433");
    assert_eq!(outcome.summary.clashes.len(), 1);
    assert_eq!(outcome.summary.clashes[0].survivor, None);
    assert!(outcome.board.at(pos(3, 3)).is_none());
    assert!(outcome.board.at(pos(3, 4)).is_none());
    assert_eq!(outcome.summary.casualties.len(), 2);
}

#[test]
fn clash_winner_can_still_lose_the_cell() {
    let mut board = Board::empty();
    place_perfect(&mut board, 3, 3, UnitKind::Rider, Player::One);
    place_perfect(&mut board, 4, 5, UnitKind::Knight, Player::Two);
    // Knight (3) beats rider (2) head-on, then player one's defenders hold
    // the rider's old cell.
    place_perfect(&mut board, 2, 3, UnitKind::Soldier, Player::One);
    place_perfect(&mut board, 3, 2, UnitKind::Soldier, Player::One);

    let outcome = resolve(&board, "3345 2333 3233", "4533");
    assert_eq!(outcome.summary.clashes[0].survivor, Some(Player::Two));
    assert!(outcome.board.at(pos(3, 3)).is_none());
    assert!(outcome.board.at(pos(4, 5)).is_none());
    assert_eq!(outcome.summary.casualties.len(), 2);
}

// ===========================================================================
// Battles
// ===========================================================================

#[test]
fn reinforcement_beats_level() {
    let mut board = Board::empty();
    place_perfect(&mut board, 4, 3, UnitKind::Soldier, Player::One);
    place_perfect(&mut board, 3, 4, UnitKind::Soldier, Player::One);
    place_perfect(&mut board, 5, 4, UnitKind::Soldier, Player::One);
    place_perfect(&mut board, 5, 6, UnitKind::Knight, Player::Two);

    let outcome = resolve(&board, "4344 3444 5444", "5644");
    let next = &outcome.board;
    assert_eq!(kind_at(next, 4, 4), Some((UnitKind::Soldier, Player::One)));
    assert!(next.at(pos(4, 3)).is_none());
    assert_eq!(kind_at(next, 3, 4), Some((UnitKind::Soldier, Player::One)));
    assert_eq!(kind_at(next, 5, 4), Some((UnitKind::Soldier, Player::One)));
    assert!(next.at(pos(5, 6)).is_none());

    let battle = &outcome.summary.battles[0];
    assert_eq!(battle.reinforcement, [2, 0]);
    assert_eq!(battle.retreated, vec![pos(3, 4), pos(5, 4)]);
}

#[test]
fn defenders_hold_against_stronger_attacker() {
    let mut board = Board::empty();
    place(&mut board, 4, 4, UnitKind::Wagon, Player::One);
    place(&mut board, 4, 3, UnitKind::Soldier, Player::One);
    place(&mut board, 4, 5, UnitKind::Soldier, Player::One);
    place_perfect(&mut board, 5, 6, UnitKind::Knight, Player::Two);

    let outcome = resolve(&board, "4344 4544", "5644");
    assert_eq!(outcome.actions[0].actions[0].action_type, ActionType::Defend);
    assert_eq!(outcome.actions[1].actions[0].action_type, ActionType::Attack);
    assert_eq!(kind_at(&outcome.board, 4, 4), Some((UnitKind::Wagon, Player::One)));
    assert!(outcome.board.at(pos(5, 6)).is_none());
    assert_eq!(outcome.summary.trophies(Player::One), 8);
}

#[test]
fn wagon_defends_its_own_cell() {
    let mut board = Board::empty();
    place(&mut board, 4, 4, UnitKind::Wagon, Player::One);
    place(&mut board, 4, 5, UnitKind::Soldier, Player::Two);

    let outcome = resolve(&board, "4444", "4544");
    assert_eq!(outcome.actions[0].actions[0].action_type, ActionType::Defend);
    let battle = &outcome.summary.battles[0];
    assert_eq!(battle.position, pos(4, 4));
    assert_eq!(battle.reinforcement, [1, 0]);
    assert_eq!(kind_at(&outcome.board, 4, 4), Some((UnitKind::Wagon, Player::One)));
    assert!(outcome.board.at(pos(4, 5)).is_none());
    assert_eq!(outcome.summary.trophies(Player::One), 6);
}

#[test]
fn equal_arrivers_both_fall() {
    let mut board = Board::empty();
    place(&mut board, 4, 3, UnitKind::Soldier, Player::One);
    place(&mut board, 4, 5, UnitKind::Soldier, Player::Two);

    let outcome = resolve(&board, "4344", "4544");
    assert!(outcome.board.units().next().is_none());
    assert_eq!(outcome.summary.battles[0].outcome.winner, None);
}

#[test]
fn stronger_arriver_wins_even_ground() {
    let mut board = Board::empty();
    place(&mut board, 4, 3, UnitKind::Soldier, Player::One);
    place_perfect(&mut board, 3, 6, UnitKind::Rider, Player::Two);

    let outcome = resolve(&board, "4344", "3644");
    assert_eq!(kind_at(&outcome.board, 4, 4), Some((UnitKind::Rider, Player::Two)));
    assert_eq!(outcome.board.units().count(), 1);
}

#[test]
fn defender_never_moves() {
    let mut board = Board::empty();
    place(&mut board, 4, 3, UnitKind::Soldier, Player::One);
    place(&mut board, 4, 5, UnitKind::Soldier, Player::Two);
    place(&mut board, 4, 6, UnitKind::Soldier, Player::Two);

    // The front soldier steps forward while the one behind it defends the
    // cell being vacated.
    let outcome = resolve(&board, "", "4544 4645");
    assert_eq!(outcome.actions[1].actions[1].action_type, ActionType::Defend);
    assert_eq!(kind_at(&outcome.board, 4, 4), Some((UnitKind::Soldier, Player::Two)));
    assert_eq!(kind_at(&outcome.board, 4, 6), Some((UnitKind::Soldier, Player::Two)));
    assert!(outcome.board.at(pos(4, 5)).is_none());
    assert_eq!(kind_at(&outcome.board, 4, 3), Some((UnitKind::Soldier, Player::One)));
}

// ===========================================================================
// Recruits and recalls
// ===========================================================================

#[test]
fn recruit_blocked_by_arrival() {
    let mut board = Board::empty();
    place_perfect(&mut board, 2, 1, UnitKind::Soldier, Player::Two);

    let outcome = resolve(&board, "2021 3042", "2120");
    assert_eq!(kind_at(&outcome.board, 2, 0), Some((UnitKind::Soldier, Player::Two)));
    assert_eq!(kind_at(&outcome.board, 3, 0), Some((UnitKind::Rider, Player::One)));
    assert_eq!(outcome.summary.recruits.len(), 1);
}

#[test]
fn recruits_know_only_their_skill() {
    let board = Board::empty();
    let outcome = resolve(&board, "0000 1012", "8887");
    let wagon = outcome.board.at(pos(0, 0)).unwrap();
    assert_eq!(wagon.kind, UnitKind::Wagon);
    assert_eq!(wagon.skillset.list_skills(), vec![skill(0, 0)]);

    let archer = outcome.board.at(pos(1, 0)).unwrap();
    assert_eq!(archer.kind, UnitKind::Archer);
    assert_eq!(archer.skillset.len(), 1);

    let soldier = outcome.board.at(pos(8, 8)).unwrap();
    assert_eq!((soldier.kind, soldier.owner), (UnitKind::Soldier, Player::Two));
}

#[test]
fn recruits_past_the_cap_fail() {
    let mut board = Board::empty();
    place(&mut board, 4, 4, UnitKind::Soldier, Player::One);
    let rules = Rules { max_units: 2, ..Rules::default() };
    let moves = [
        parse_player_move(Player::One, "0001 1011").unwrap(),
        PlayerMove::pass(Player::Two),
    ];
    assert_eq!(make_move(&board, &moves, &rules), Err(InvalidMove::UnitsLimitExceeded));
}

fn recall_board() -> Board {
    let mut board = Board::empty();
    place(&mut board, 4, 1, UnitKind::King, Player::One);
    place(&mut board, 2, 5, UnitKind::Soldier, Player::One);
    place(&mut board, 4, 7, UnitKind::King, Player::Two);
    place(&mut board, 6, 5, UnitKind::Soldier, Player::Two);
    board
}

#[test]
fn recall_returns_unit_next_to_king() {
    let board = recall_board();
    let outcome = resolve_with(&board, "4225", "", &Rules::advanced());

    assert_eq!(outcome.actions[0].actions[0].action_type, ActionType::Recall);
    assert_eq!(kind_at(&outcome.board, 4, 2), Some((UnitKind::Soldier, Player::One)));
    assert!(outcome.board.at(pos(2, 5)).is_none());
    assert_eq!(outcome.summary.recalls.len(), 1);
}

#[test]
fn recall_skipped_when_cell_taken() {
    let mut board = recall_board();
    place(&mut board, 4, 3, UnitKind::Soldier, Player::One);

    // The soldier on (4, 3) steps onto (4, 2) in the battle phase, so the
    // recall finds its cell occupied.
    let outcome = resolve_with(&board, "4342 4225", "", &Rules::advanced());
    assert_eq!(outcome.actions[0].actions[1].action_type, ActionType::Recall);
    assert!(outcome.board.at(pos(4, 3)).is_none());
    assert_eq!(kind_at(&outcome.board, 4, 2), Some((UnitKind::Soldier, Player::One)));
    assert_eq!(kind_at(&outcome.board, 2, 5), Some((UnitKind::Soldier, Player::One)));
    assert!(outcome.summary.recalls.is_empty());
}

#[test]
fn recall_into_heat_is_rejected() {
    let mut board = recall_board();
    place_perfect(&mut board, 5, 4, UnitKind::Rider, Player::Two);
    let moves = [
        parse_player_move(Player::One, "4225").unwrap(),
        PlayerMove::pass(Player::Two),
    ];
    assert_eq!(
        make_move(&board, &moves, &Rules::advanced()),
        Err(InvalidMove::RecallDestinationUnderAttack)
    );
}

// ===========================================================================
// Validation and pairing
// ===========================================================================

#[test]
fn duplicate_source_fails_before_mutation() {
    let board = duel_board();
    let moves = [
        parse_player_move(Player::One, "4344 4342").unwrap(),
        parse_player_move(Player::Two, "4443").unwrap(),
    ];
    assert_eq!(
        make_move(&board, &moves, &Rules::default()),
        Err(InvalidMove::MovedMoreThanOnce)
    );
    assert_eq!(board, duel_board());
}

#[test]
fn batch_order_does_not_matter() {
    let board = duel_board();
    let p1 = parse_player_move(Player::One, "4342 4252").unwrap();
    let p2 = parse_player_move(Player::Two, "4443 4546").unwrap();
    let rules = Rules::default();
    let forward = make_move(&board, &[p1.clone(), p2.clone()], &rules).unwrap();
    let backward = make_move(&board, &[p2, p1], &rules).unwrap();
    assert_eq!(forward, backward);
}

// ===========================================================================
// Randomized invariants
// ===========================================================================

#[test]
fn random_games_keep_invariants() {
    for seed in 0..20u64 {
        let mut rng = SmallRng::seed_from_u64(seed);
        let rules = if seed % 2 == 0 { Rules::default() } else { Rules::advanced() };
        let mut game = Game::new_standard(rules);

        for _ in 0..40 {
            if game.status().is_over() {
                break;
            }
            let moves = [
                game.random_player_move(Player::One, &mut rng),
                game.random_player_move(Player::Two, &mut rng),
            ];
            let next = game.proceed(&moves).unwrap();
            let summary = next.last_summary.as_ref().unwrap();

            for player in [Player::One, Player::Two] {
                let before = game.board.count_units(player, None);
                let after = next.board.count_units(player, None);
                let recruited = summary.recruits.iter().filter(|(p, _, _)| *p == player).count();
                let fallen = summary.fallen(player).count();
                assert_eq!(after + fallen, before + recruited, "seed {seed}");
                assert!(after <= rules.max_units);
            }

            // Every reachable board survives a snapshot round-trip.
            assert_eq!(parse_board(&encode_board(&next.board).unwrap()).unwrap(), next.board);

            // Swapping the submission order changes nothing.
            let swapped = make_move(&game.board, &[moves[1].clone(), moves[0].clone()], &rules)
                .unwrap();
            assert_eq!(swapped.board, next.board);

            game = next;
        }
    }
}

#[test]
fn status_after_double_king_kill() {
    let mut board = Board::empty();
    place(&mut board, 4, 4, UnitKind::King, Player::One);
    place(&mut board, 4, 6, UnitKind::King, Player::Two);
    place_perfect(&mut board, 3, 4, UnitKind::Swordsman, Player::Two);
    place_perfect(&mut board, 3, 6, UnitKind::Swordsman, Player::One);

    let outcome = resolve(&board, "3646", "3444");
    assert_eq!(skirmish::resolve::status(&outcome.board), GameStatus::Draw);
}
