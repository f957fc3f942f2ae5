//! Check detection, Duke safety, legal actions and game outcome.
//!
//! Under the canonical [`RuleSet::Checkmate`] rules:
//! - A side is in check when any enemy unit can reach its Duke.
//! - The Duke may only move where it would not be in check afterwards.
//! - While in check, only the Duke may act. Blocking the attacker or capturing
//!   it with another unit is not allowed.
//! - A side loses when it is in check and its Duke has no safe square, or when
//!   its Duke has been captured.
//!
//! [`RuleSet::DukeCapture`] is a reduced rule set: every unit may always act,
//! and the game ends as soon as one Duke leaves the board.
//!
//! Actions are returned as the states they lead to.

use crate::error::Result;
use crate::movegen::{Destination, all_destinations, generate};
use crate::state::{GameState, Square};
use crate::tile::Side;

/// Which win condition and action filter to apply.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum RuleSet {
    /// Check, Duke safety and checkmate.
    #[default]
    Checkmate,
    /// No check rules; capturing the enemy Duke wins.
    DukeCapture,
}

/// Terminal status of a state.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
    WhiteWins,
    BlackWins,
    Ongoing,
}

impl Outcome {
    /// +1 for a White win, -1 for a Black win, 0 otherwise.
    pub fn value(self) -> i32 {
        match self {
            Outcome::WhiteWins => 1,
            Outcome::BlackWins => -1,
            Outcome::Ongoing => 0,
        }
    }

    /// The outcome in which `side` wins.
    pub fn win_for(side: Side) -> Outcome {
        match side {
            Side::White => Outcome::WhiteWins,
            Side::Black => Outcome::BlackWins,
        }
    }

    #[inline]
    pub fn is_terminal(self) -> bool {
        self != Outcome::Ongoing
    }
}

/// True iff an opposing unit can reach `side`'s Duke (Duke capture allowed).
///
/// A side without a Duke on the board is never in check.
pub fn is_in_check(state: &GameState, side: Side) -> bool {
    let Some(duke) = state.duke_square(side) else {
        return false;
    };
    all_destinations(state, side.opponent(), false).contains(&duke)
}

/// Moves of `side`'s Duke that do not leave it in check.
///
/// Each move is tried on a copy of the board, so captures of defended units
/// and lines the Duke was blocking are both accounted for.
pub fn duke_safe_moves(state: &GameState, side: Side) -> Vec<Destination> {
    let Some(duke) = state.duke_square(side) else {
        return Vec::new();
    };
    let Ok(moves) = generate(state, duke.0, duke.1) else {
        return Vec::new();
    };
    moves
        .into_iter()
        .filter(|&(r, c, kind)| !is_in_check(&state.with_move(duke, (r, c), kind), side))
        .collect()
}

/// In check with nowhere safe to go.
pub fn is_checkmated(state: &GameState, side: Side) -> bool {
    is_in_check(state, side) && duke_safe_moves(state, side).is_empty()
}

/// A side has lost if its Duke was captured or it is checkmated.
fn has_lost(state: &GameState, side: Side) -> bool {
    state.duke_square(side).is_none() || is_checkmated(state, side)
}

/// Game outcome under the canonical rules.
pub fn result(state: &GameState) -> Outcome {
    result_with(state, RuleSet::Checkmate)
}

/// Game outcome under the given rule set.
///
/// A board with no Duke at all (setup not done) is ongoing. If both sides are
/// lost at once, the side to move loses: it has no reply.
pub fn result_with(state: &GameState, rules: RuleSet) -> Outcome {
    let white_duke = state.duke_square(Side::White).is_some();
    let black_duke = state.duke_square(Side::Black).is_some();
    if !white_duke && !black_duke {
        return Outcome::Ongoing;
    }
    let (white_lost, black_lost) = match rules {
        RuleSet::DukeCapture => (!white_duke, !black_duke),
        RuleSet::Checkmate => (has_lost(state, Side::White), has_lost(state, Side::Black)),
    };
    match (white_lost, black_lost) {
        (false, false) => Outcome::Ongoing,
        (false, true) => Outcome::WhiteWins,
        (true, false) => Outcome::BlackWins,
        (true, true) => Outcome::win_for(state.to_move.opponent()),
    }
}

/// Empty squares orthogonally adjacent to the mover's Duke.
pub fn legal_placements(state: &GameState) -> Vec<Square> {
    state.placement_squares(state.to_move)
}

/// Destinations the side to move may actually use with the unit on `sq`,
/// after applying the Duke-safety and in-check restrictions.
pub fn legal_moves_from(state: &GameState, sq: Square) -> Result<Vec<Destination>> {
    legal_moves_from_with(state, sq, RuleSet::Checkmate)
}

/// [`legal_moves_from`] under the given rule set.
pub fn legal_moves_from_with(
    state: &GameState,
    sq: Square,
    rules: RuleSet,
) -> Result<Vec<Destination>> {
    let all = generate(state, sq.0, sq.1)?;
    let Some(tile) = state.tile(sq) else {
        return Ok(Vec::new());
    };
    if tile.owner != state.to_move || rules == RuleSet::DukeCapture {
        return Ok(if tile.owner == state.to_move { all } else { Vec::new() });
    }
    if tile.is_duke() {
        return Ok(duke_safe_moves(state, tile.owner));
    }
    if is_in_check(state, tile.owner) {
        return Ok(Vec::new());
    }
    Ok(all)
}

/// Every state reachable in one action by the side to move, under the
/// canonical rules. Draws the reinforcement unit (if any) with `rng`.
pub fn legal_actions(state: &GameState, rng: &mut fastrand::Rng) -> Vec<GameState> {
    legal_actions_with(state, RuleSet::Checkmate, rng)
}

/// [`legal_actions`] under the given rule set.
///
/// At most one unit is drawn from the bag per call; every open placement
/// square then yields one placement action for that unit.
pub fn legal_actions_with(
    state: &GameState,
    rules: RuleSet,
    rng: &mut fastrand::Rng,
) -> Vec<GameState> {
    let side = state.to_move;
    let in_check = rules == RuleSet::Checkmate && is_in_check(state, side);
    let mut actions = Vec::new();

    for (from, tile) in state.units(side) {
        let moves = if tile.is_duke() && rules == RuleSet::Checkmate {
            duke_safe_moves(state, side)
        } else if in_check {
            continue;
        } else {
            match generate(state, from.0, from.1) {
                Ok(m) => m,
                Err(_) => continue,
            }
        };
        actions.extend(
            moves
                .into_iter()
                .map(|(r, c, kind)| state.with_move(from, (r, c), kind)),
        );
    }

    if !in_check {
        let squares = legal_placements(state);
        if !squares.is_empty() {
            if let Some(kind) = state.bag(side).peek_random(rng) {
                actions.extend(squares.into_iter().map(|sq| state.with_placement(sq, kind)));
            }
        }
    }

    actions
}
