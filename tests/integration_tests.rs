//! Integration tests for the rules engine.
//!
//! Scenario tests build positions by hand; property tests walk random games
//! from seeded openings and check every visited state.

use duke_mcts::movegen::generate;
use duke_mcts::rules::{
    Outcome, RuleSet, duke_safe_moves, is_checkmated, is_in_check, legal_actions,
    legal_actions_with, legal_placements, result, result_with,
};
use duke_mcts::state::{GameState, Square, apply_move, opening};
use duke_mcts::tile::{Facing, MoveKind, Side, UnitKind};

// =============================================================================
// Helper functions for setting up test positions
// =============================================================================

/// Put a unit on the board with the given facing.
fn put(state: GameState, sq: Square, side: Side, kind: UnitKind, facing: Facing) -> GameState {
    let mut s = state
        .place_starting_unit(sq, side, kind)
        .unwrap_or_else(|e| panic!("cannot place {kind} at {sq:?}: {e}"));
    if let Some(t) = s.board[sq.0][sq.1].as_mut() {
        t.facing = facing;
    }
    s
}

/// Play random legal actions from several seeded openings and collect every
/// state visited along the way (terminal ones included).
fn random_walk_states(games: u64, max_plies: usize) -> Vec<GameState> {
    let mut states = Vec::new();
    for seed in 0..games {
        let mut rng = fastrand::Rng::with_seed(1000 + seed);
        let mut state = opening(rng.usize(..6), rng.usize(..6), &mut rng).unwrap();
        for _ in 0..max_plies {
            states.push(state);
            if result(&state).is_terminal() {
                break;
            }
            let actions = legal_actions(&state, &mut rng);
            if actions.is_empty() {
                break;
            }
            state = actions[rng.usize(..actions.len())];
        }
    }
    states
}

/// Every (from, destination) pair the side to move can generate.
fn generated_moves(state: &GameState) -> Vec<(Square, (usize, usize, MoveKind))> {
    state
        .units(state.to_move)
        .flat_map(|(sq, _)| {
            generate(state, sq.0, sq.1)
                .unwrap()
                .into_iter()
                .map(move |d| (sq, d))
        })
        .collect()
}

fn sorted<T: Ord>(mut v: Vec<T>) -> Vec<T> {
    v.sort();
    v
}

// =============================================================================
// Scenario tests
// =============================================================================

#[test]
fn test_placements_clip_at_board_edge() {
    let s = put(GameState::initial(), (5, 2), Side::White, UnitKind::Duke, Facing::Up);
    assert_eq!(
        sorted(legal_placements(&s)),
        vec![(4, 2), (5, 1), (5, 3)]
    );
}

#[test]
fn test_placements_skip_occupied_squares() {
    let s = put(GameState::initial(), (5, 2), Side::White, UnitKind::Duke, Facing::Up);
    let s = put(s, (4, 2), Side::White, UnitKind::Footman, Facing::Up);
    assert_eq!(sorted(legal_placements(&s)), vec![(5, 1), (5, 3)]);
}

#[test]
fn test_footman_up_moves_orthogonally() {
    let s = put(GameState::initial(), (3, 3), Side::White, UnitKind::Footman, Facing::Up);
    let got = sorted(generate(&s, 3, 3).unwrap());
    assert_eq!(
        got,
        sorted(vec![
            (4, 3, MoveKind::Move),
            (2, 3, MoveKind::Move),
            (3, 4, MoveKind::Move),
            (3, 2, MoveKind::Move),
        ])
    );
}

#[test]
fn test_bowman_strike_gives_check() {
    // A White Bowman facing Down strikes two rows ahead of it.
    let s = put(GameState::initial(), (5, 5), Side::White, UnitKind::Duke, Facing::Up);
    let s = put(s, (3, 2), Side::White, UnitKind::Bowman, Facing::Down);
    let s = put(s, (1, 2), Side::Black, UnitKind::Duke, Facing::Up);
    assert!(generate(&s, 3, 2).unwrap().contains(&(1, 2, MoveKind::Strike)));
    assert!(is_in_check(&s, Side::Black));
    assert!(!is_in_check(&s, Side::White));

    // Out of the strike line there is no check.
    let s = put(GameState::initial(), (5, 5), Side::White, UnitKind::Duke, Facing::Up);
    let s = put(s, (3, 2), Side::White, UnitKind::Bowman, Facing::Down);
    let s = put(s, (1, 3), Side::Black, UnitKind::Duke, Facing::Down);
    assert!(!is_in_check(&s, Side::Black));
}

#[test]
fn test_cornered_black_duke_is_checkmated() {
    // Black Duke in the corner, hemmed in by its own Footmen and struck by a
    // White Bowman. The White Duke is far away and safe.
    let s = put(GameState::initial(), (5, 5), Side::White, UnitKind::Duke, Facing::Up);
    let s = put(s, (0, 0), Side::Black, UnitKind::Duke, Facing::Up);
    let s = put(s, (0, 1), Side::Black, UnitKind::Footman, Facing::Up);
    let s = put(s, (1, 0), Side::Black, UnitKind::Footman, Facing::Up);
    let s = put(s, (2, 0), Side::White, UnitKind::Bowman, Facing::Down);

    assert!(is_in_check(&s, Side::Black));
    assert!(duke_safe_moves(&s, Side::Black).is_empty());
    assert!(is_checkmated(&s, Side::Black));
    assert!(!is_checkmated(&s, Side::White));
    assert_eq!(result(&s), Outcome::WhiteWins);
    assert_eq!(result(&s).value(), 1);
}

#[test]
fn test_check_with_escape_is_not_mate() {
    // Same corner, but the Black Duke can slide away along row 0.
    let s = put(GameState::initial(), (5, 5), Side::White, UnitKind::Duke, Facing::Up);
    let s = put(s, (0, 0), Side::Black, UnitKind::Duke, Facing::Up);
    let s = put(s, (1, 0), Side::Black, UnitKind::Footman, Facing::Up);
    let s = put(s, (2, 0), Side::White, UnitKind::Bowman, Facing::Down);

    assert!(is_in_check(&s, Side::Black));
    assert!(!duke_safe_moves(&s, Side::Black).is_empty());
    assert_eq!(result(&s), Outcome::Ongoing);
}

#[test]
fn test_stalemate_is_not_a_loss() {
    // The Black Duke cannot move but nothing attacks it.
    let s = put(GameState::initial(), (5, 5), Side::White, UnitKind::Duke, Facing::Up);
    let s = put(s, (0, 0), Side::Black, UnitKind::Duke, Facing::Up);
    let s = put(s, (0, 1), Side::Black, UnitKind::Footman, Facing::Up);
    assert!(duke_safe_moves(&s, Side::Black).is_empty());
    assert!(!is_checkmated(&s, Side::Black));
    assert_eq!(result(&s), Outcome::Ongoing);
}

#[test]
fn test_duke_capture_rule_set() {
    let s = put(GameState::initial(), (5, 5), Side::White, UnitKind::Duke, Facing::Up);
    let s = put(s, (0, 0), Side::Black, UnitKind::Duke, Facing::Up);
    let s = put(s, (0, 1), Side::Black, UnitKind::Footman, Facing::Up);
    let s = put(s, (1, 0), Side::Black, UnitKind::Footman, Facing::Up);
    let s = put(s, (2, 0), Side::White, UnitKind::Bowman, Facing::Down);
    // Checkmate does not end the reduced game; only taking the Duke does.
    assert_eq!(result_with(&s, RuleSet::DukeCapture), Outcome::Ongoing);

    let mut rng = fastrand::Rng::with_seed(2);
    let taken = legal_actions_with(&s, RuleSet::DukeCapture, &mut rng)
        .into_iter()
        .find(|n| n.duke_square(Side::Black).is_none())
        .unwrap();
    assert_eq!(result_with(&taken, RuleSet::DukeCapture), Outcome::WhiteWins);
}

// =============================================================================
// Properties over random games
// =============================================================================

#[test]
fn test_ongoing_states_always_have_actions() {
    let mut rng = fastrand::Rng::with_seed(77);
    for state in random_walk_states(12, 120) {
        if result(&state) == Outcome::Ongoing {
            assert!(
                !legal_actions(&state, &mut rng).is_empty(),
                "ongoing state without actions:\n{state}"
            );
        }
    }
}

fn assert_strike_removes_target_only(state: &GameState, from: Square, target: Square) {
    let next = apply_move(state, from, target, MoveKind::Strike).unwrap();
    assert_eq!(next.tile(from), state.tile(from), "striker changed");
    assert!(next.is_empty(target));
    for row in 0..6 {
        for col in 0..6 {
            if (row, col) != target {
                assert_eq!(next.tile((row, col)), state.tile((row, col)));
            }
        }
    }
}

#[test]
fn test_champion_strike_stays_put() {
    let s = put(GameState::initial(), (5, 5), Side::White, UnitKind::Duke, Facing::Up);
    let s = put(s, (0, 0), Side::Black, UnitKind::Duke, Facing::Up);
    let s = put(s, (3, 3), Side::White, UnitKind::Champion, Facing::Down);
    let s = put(s, (3, 4), Side::Black, UnitKind::Assassin, Facing::Up);
    assert!(generate(&s, 3, 3).unwrap().contains(&(3, 4, MoveKind::Strike)));
    assert_strike_removes_target_only(&s, (3, 3), (3, 4));
}

#[test]
fn test_strike_removes_target_only() {
    for state in random_walk_states(12, 120) {
        for (from, (r, c, kind)) in generated_moves(&state) {
            if kind == MoveKind::Strike {
                assert_strike_removes_target_only(&state, from, (r, c));
            }
        }
    }
}

#[test]
fn test_slide_paths_are_empty() {
    for state in random_walk_states(12, 120) {
        for (from, (r, c, kind)) in generated_moves(&state) {
            if kind != MoveKind::Slide {
                continue;
            }
            let dr = (r as isize - from.0 as isize).signum();
            let dc = (c as isize - from.1 as isize).signum();
            let mut cur = (from.0 as isize + dr, from.1 as isize + dc);
            while cur != (r as isize, c as isize) {
                assert!(
                    state.is_empty((cur.0 as usize, cur.1 as usize)),
                    "slide from {from:?} to ({r},{c}) passes over {cur:?}"
                );
                cur = (cur.0 + dr, cur.1 + dc);
            }
        }
    }
}

#[test]
fn test_acting_unit_flips_unless_striking() {
    for state in random_walk_states(8, 80) {
        for (from, (r, c, kind)) in generated_moves(&state) {
            let before = state.tile(from).unwrap();
            let next = apply_move(&state, from, (r, c), kind).unwrap();
            if kind == MoveKind::Strike {
                assert_eq!(next.tile(from).unwrap().facing, before.facing);
            } else {
                let moved = next.tile((r, c)).unwrap();
                assert_eq!(moved.kind, before.kind);
                assert_eq!(moved.facing, before.facing.flipped());
                assert!(next.is_empty(from));
            }
            assert_eq!(next.to_move, state.to_move.opponent());
        }
    }
}

#[test]
fn test_check_matches_enemy_reach() {
    for state in random_walk_states(8, 80) {
        for side in [Side::White, Side::Black] {
            let Some(duke) = state.duke_square(side) else {
                continue;
            };
            let reached = state.units(side.opponent()).any(|(sq, _)| {
                generate(&state, sq.0, sq.1)
                    .unwrap()
                    .iter()
                    .any(|&(r, c, _)| (r, c) == duke)
            });
            assert_eq!(is_in_check(&state, side), reached);
        }
    }
}

#[test]
fn test_transitions_keep_one_duke_per_side() {
    for state in random_walk_states(8, 120) {
        for side in [Side::White, Side::Black] {
            let dukes = state.units(side).filter(|(_, t)| t.is_duke()).count();
            assert!(dukes <= 1);
        }
    }
}
