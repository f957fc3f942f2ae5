//! Game state representation and state transitions.
//!
//! A [`GameState`] is a small `Copy` value: the 6x6 grid, the side to move and
//! both draw bags. Transitions never mutate a state in place; they return a new
//! value, so states held by search tree nodes are never disturbed.

use std::fmt;

use crate::constants::{BLACK_HOME_ROW, N, PLACEMENT_OFFSETS, WHITE_HOME_ROW};
use crate::error::{DukeError, Result};
use crate::movegen::generate;
use crate::tile::{Facing, MoveKind, Side, Tile, UnitKind};

/// A square on the board as (row, col). Row 0 is the top (Black's side).
pub type Square = (usize, usize);

/// Offset a square by a signed delta, returning `None` when it leaves the board.
#[inline]
pub fn offset(sq: Square, dr: isize, dc: isize) -> Option<Square> {
    let r = sq.0 as isize + dr;
    let c = sq.1 as isize + dc;
    if r < 0 || c < 0 || r >= N as isize || c >= N as isize {
        None
    } else {
        Some((r as usize, c as usize))
    }
}

/// Reject squares outside the board.
#[inline]
pub fn check_square(sq: Square) -> Result<()> {
    if sq.0 >= N || sq.1 >= N {
        Err(DukeError::InvalidSquare {
            row: sq.0,
            col: sq.1,
        })
    } else {
        Ok(())
    }
}

/// Multiset of unit kinds a side has not placed yet.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Bag {
    counts: [u8; 6],
}

impl Bag {
    /// The reinforcements each side starts with: one of every non-Duke kind.
    /// The Duke and the two opening Footmen are placed during setup.
    pub fn full() -> Self {
        let mut counts = [1u8; 6];
        counts[UnitKind::Duke.index()] = 0;
        Self { counts }
    }

    pub fn empty() -> Self {
        Self { counts: [0; 6] }
    }

    /// Number of units left.
    pub fn len(&self) -> usize {
        self.counts.iter().map(|&c| c as usize).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn count(&self, kind: UnitKind) -> usize {
        self.counts[kind.index()] as usize
    }

    pub fn contains(&self, kind: UnitKind) -> bool {
        self.count(kind) > 0
    }

    /// Take one unit of `kind` out of the bag. Returns false if none is left.
    pub fn remove(&mut self, kind: UnitKind) -> bool {
        let slot = &mut self.counts[kind.index()];
        if *slot == 0 {
            return false;
        }
        *slot -= 1;
        true
    }

    /// Pick one unit uniformly at random without removing it.
    ///
    /// Returns `None` when the bag is exhausted.
    pub fn peek_random(&self, rng: &mut fastrand::Rng) -> Option<UnitKind> {
        let total = self.len();
        if total == 0 {
            return None;
        }
        let mut pick = rng.usize(..total);
        for kind in UnitKind::ALL {
            let c = self.count(kind);
            if pick < c {
                return Some(kind);
            }
            pick -= c;
        }
        None
    }
}

/// A game position.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct GameState {
    /// Board contents, indexed `[row][col]`.
    pub board: [[Option<Tile>; N]; N],
    /// Side to move.
    pub to_move: Side,
    /// Draw bags, indexed by [`Side::index`].
    pub bags: [Bag; 2],
}

impl Default for GameState {
    fn default() -> Self {
        Self::initial()
    }
}

impl GameState {
    /// Empty board, White to move, both bags full.
    pub fn initial() -> Self {
        Self {
            board: [[None; N]; N],
            to_move: Side::White,
            bags: [Bag::full(), Bag::full()],
        }
    }

    /// Occupant of a square (`None` for empty or off-board squares).
    #[inline]
    pub fn tile(&self, sq: Square) -> Option<Tile> {
        if sq.0 >= N || sq.1 >= N {
            return None;
        }
        self.board[sq.0][sq.1]
    }

    #[inline]
    pub fn is_empty(&self, sq: Square) -> bool {
        self.tile(sq).is_none()
    }

    pub fn bag(&self, side: Side) -> &Bag {
        &self.bags[side.index()]
    }

    /// Iterate over every occupied square owned by `side`.
    pub fn units(&self, side: Side) -> impl Iterator<Item = (Square, Tile)> + '_ {
        (0..N)
            .flat_map(|r| (0..N).map(move |c| (r, c)))
            .filter_map(move |sq| match self.board[sq.0][sq.1] {
                Some(t) if t.owner == side => Some((sq, t)),
                _ => None,
            })
    }

    /// Location of `side`'s Duke, if it is on the board.
    pub fn duke_square(&self, side: Side) -> Option<Square> {
        self.units(side)
            .find(|(_, t)| t.is_duke())
            .map(|(sq, _)| sq)
    }

    /// Empty, on-board squares orthogonally adjacent to `side`'s Duke.
    pub fn placement_squares(&self, side: Side) -> Vec<Square> {
        let Some(duke) = self.duke_square(side) else {
            return Vec::new();
        };
        PLACEMENT_OFFSETS
            .iter()
            .filter_map(|&(dr, dc)| offset(duke, dr, dc))
            .filter(|&sq| self.is_empty(sq))
            .collect()
    }

    /// Setup placement: puts a unit on the board without consuming the bag or
    /// passing the turn.
    pub fn place_starting_unit(&self, sq: Square, side: Side, kind: UnitKind) -> Result<GameState> {
        check_square(sq)?;
        if !self.is_empty(sq) {
            return Err(DukeError::OccupiedSquare { row: sq.0, col: sq.1 });
        }
        let mut next = *self;
        next.board[sq.0][sq.1] = Some(Tile::new(kind, side));
        Ok(next)
    }

    /// Move or strike with the unit on `from`. No legality checks.
    pub(crate) fn with_move(&self, from: Square, to: Square, kind: MoveKind) -> GameState {
        let mut next = *self;
        if let Some(tile) = self.board[from.0][from.1] {
            if kind == MoveKind::Strike {
                next.board[to.0][to.1] = None;
            } else {
                next.board[to.0][to.1] = Some(tile.flipped());
                next.board[from.0][from.1] = None;
            }
        }
        next.to_move = self.to_move.opponent();
        next
    }

    /// Place a unit drawn by the side to move. No legality checks.
    pub(crate) fn with_placement(&self, sq: Square, kind: UnitKind) -> GameState {
        let side = self.to_move;
        let mut next = *self;
        next.bags[side.index()].remove(kind);
        next.board[sq.0][sq.1] = Some(Tile::new(kind, side));
        next.to_move = side.opponent();
        next
    }
}

/// Apply a move for the side to move.
///
/// The target and move kind must be one of the destinations the move
/// generator produces for the unit on `from`.
pub fn apply_move(
    state: &GameState,
    from: Square,
    to: Square,
    kind: MoveKind,
) -> Result<GameState> {
    check_square(from)?;
    check_square(to)?;
    let tile = state.tile(from).ok_or(DukeError::EmptySquare {
        row: from.0,
        col: from.1,
    })?;
    if tile.owner != state.to_move {
        return Err(DukeError::NotYourUnit {
            row: from.0,
            col: from.1,
            side: state.to_move,
        });
    }
    let reachable = generate(state, from.0, from.1)?;
    if !reachable.contains(&(to.0, to.1, kind)) {
        return Err(DukeError::IllegalMove { row: to.0, col: to.1 });
    }
    Ok(state.with_move(from, to, kind))
}

/// Place a newly drawn unit of `kind` for the side to move on `sq`.
pub fn apply_placement(state: &GameState, sq: Square, kind: UnitKind) -> Result<GameState> {
    check_square(sq)?;
    let side = state.to_move;
    if !state.bag(side).contains(kind) {
        return Err(DukeError::NotInBag(side));
    }
    if !state.is_empty(sq) {
        return Err(DukeError::OccupiedSquare { row: sq.0, col: sq.1 });
    }
    if state.duke_square(side).is_none() {
        return Err(DukeError::NoDuke(side));
    }
    if !state.placement_squares(side).contains(&sq) {
        return Err(DukeError::IllegalPlacement { row: sq.0, col: sq.1 });
    }
    Ok(state.with_placement(sq, kind))
}

/// Standard opening: each Duke on its home row at the given column, and two
/// Footmen per side on random squares next to their Duke. White moves first.
pub fn opening(
    white_duke_col: usize,
    black_duke_col: usize,
    rng: &mut fastrand::Rng,
) -> Result<GameState> {
    let mut state = GameState::initial();
    for (side, sq) in [
        (Side::White, (WHITE_HOME_ROW, white_duke_col)),
        (Side::Black, (BLACK_HOME_ROW, black_duke_col)),
    ] {
        state = state.place_starting_unit(sq, side, UnitKind::Duke)?;
        for _ in 0..2 {
            let options = state.placement_squares(side);
            if options.is_empty() {
                return Err(DukeError::IllegalPlacement { row: sq.0, col: sq.1 });
            }
            let pick = options[rng.usize(..options.len())];
            state = state.place_starting_unit(pick, side, UnitKind::Footman)?;
        }
    }
    state.to_move = Side::White;
    Ok(state)
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "   ")?;
        for col in 0..N {
            write!(f, "  {col}   ")?;
        }
        writeln!(f)?;
        for row in 0..N {
            write!(f, "{row}  ")?;
            for col in 0..N {
                match self.board[row][col] {
                    Some(t) => {
                        let arrow = match t.facing {
                            Facing::Up => '^',
                            Facing::Down => 'v',
                        };
                        write!(f, "[{:<3}{arrow}] ", t.label())?;
                    }
                    None => write!(f, "[----] ")?,
                }
            }
            writeln!(f)?;
        }
        writeln!(f, "{} to move", self.to_move)
    }
}
