//! Destination generation for a single unit.
//!
//! Given a state and a square, produce every `(row, col, kind)` the unit on
//! that square can reach with its current facing. Generation is pure: it reads
//! the state and never changes it. Whether the side is allowed to use these
//! destinations (check, Duke safety) is decided in [`crate::rules`].

use crate::constants::N;
use crate::error::{DukeError, Result};
use crate::state::{GameState, Square, check_square, offset};
use crate::tile::{MoveKind, Side, Tile};

/// A generated destination: (row, col, how the unit gets there).
pub type Destination = (usize, usize, MoveKind);

/// All destinations for the unit on (`row`, `col`).
///
/// # Errors
/// - [`DukeError::InvalidSquare`] if the square is off the board
/// - [`DukeError::EmptySquare`] if nothing stands on it
pub fn generate(state: &GameState, row: usize, col: usize) -> Result<Vec<Destination>> {
    generate_with(state, row, col, false)
}

/// Like [`generate`], but with `no_duke_capture` set every destination holding
/// either side's Duke is dropped.
pub fn generate_with(
    state: &GameState,
    row: usize,
    col: usize,
    no_duke_capture: bool,
) -> Result<Vec<Destination>> {
    let from = (row, col);
    check_square(from)?;
    let tile = state.tile(from).ok_or(DukeError::EmptySquare { row, col })?;

    let mut out = Vec::with_capacity(N * 2);
    for (dr, dc, kind) in tile.moves() {
        // The first step must land on the board for any kind to apply.
        let Some(target) = offset(from, dr, dc) else {
            continue;
        };
        match kind {
            MoveKind::Move => {
                if path_clear(state, from, dr, dc) && can_land(state, &tile, target) {
                    out.push((target.0, target.1, kind));
                }
            }
            MoveKind::Jump => {
                if can_land(state, &tile, target) {
                    out.push((target.0, target.1, kind));
                }
            }
            MoveKind::Strike => {
                if holds_enemy(state, tile.owner, target) {
                    out.push((target.0, target.1, kind));
                }
            }
            MoveKind::Slide => slide(state, &tile, from, dr, dc, &mut out),
            MoveKind::JumpSlide => jump_slide(state, &tile, from, dr, dc, &mut out),
        }
    }

    if no_duke_capture {
        out.retain(|&(r, c, _)| !state.tile((r, c)).is_some_and(|t| t.is_duke()));
    }
    Ok(out)
}

/// Every destination of every unit owned by `side`, flattened.
///
/// Used by the check evaluator to find the squares `side` attacks.
pub fn all_destinations(state: &GameState, side: Side, no_duke_capture: bool) -> Vec<Square> {
    let mut out = Vec::new();
    for (sq, _) in state.units(side) {
        if let Ok(dests) = generate_with(state, sq.0, sq.1, no_duke_capture) {
            out.extend(dests.into_iter().map(|(r, c, _)| (r, c)));
        }
    }
    out
}

/// True if every square strictly between origin and `origin + (dr, dc)` is
/// empty. Each axis advances one square per step until it reaches its delta.
fn path_clear(state: &GameState, from: Square, dr: isize, dc: isize) -> bool {
    let steps = dr.abs().max(dc.abs());
    (1..steps).all(|i| {
        let r = dr.signum() * i.min(dr.abs());
        let c = dc.signum() * i.min(dc.abs());
        offset(from, r, c).is_none_or(|sq| state.is_empty(sq))
    })
}

#[inline]
fn holds_enemy(state: &GameState, side: Side, sq: Square) -> bool {
    state.tile(sq).is_some_and(|t| t.is_enemy_of(side))
}

/// Empty or enemy-held: somewhere a unit may end its move.
#[inline]
fn can_land(state: &GameState, tile: &Tile, sq: Square) -> bool {
    match state.tile(sq) {
        None => true,
        Some(t) => t.is_enemy_of(tile.owner),
    }
}

fn slide(
    state: &GameState,
    tile: &Tile,
    from: Square,
    dr: isize,
    dc: isize,
    out: &mut Vec<Destination>,
) {
    let mut cur = from;
    while let Some(sq) = offset(cur, dr, dc) {
        match state.tile(sq) {
            None => out.push((sq.0, sq.1, MoveKind::Slide)),
            Some(t) => {
                if t.is_enemy_of(tile.owner) {
                    out.push((sq.0, sq.1, MoveKind::Slide));
                }
                break;
            }
        }
        cur = sq;
    }
}

fn jump_slide(
    state: &GameState,
    tile: &Tile,
    from: Square,
    dr: isize,
    dc: isize,
    out: &mut Vec<Destination>,
) {
    let mut cur = from;
    while let Some(sq) = offset(cur, dr, dc) {
        // friendly units are passed over but never landed on
        if can_land(state, tile, sq) {
            out.push((sq.0, sq.1, MoveKind::JumpSlide));
        }
        cur = sq;
    }
}
