//! Unit kinds, sides, facings and the static direction tables.
//!
//! Every unit has two movesets, one per facing. The tables below are written
//! from White's point of view with row 0 at the top of the board, so "forward"
//! for White is a negative row delta. Black reads the same tables with the row
//! delta negated (see [`Tile::moves`]).

use std::fmt;

/// One of the two players.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    White,
    Black,
}

impl Side {
    /// The other side.
    #[inline]
    pub fn opponent(self) -> Side {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }

    /// Index into per-side arrays (White = 0, Black = 1).
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Side::White => 0,
            Side::Black => 1,
        }
    }

    /// Row-delta multiplier: Black mirrors the White-authored tables.
    #[inline]
    fn row_sign(self) -> isize {
        match self {
            Side::White => 1,
            Side::Black => -1,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::White => write!(f, "White"),
            Side::Black => write!(f, "Black"),
        }
    }
}

/// The six unit types.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum UnitKind {
    Duke,
    Footman,
    Assassin,
    Bowman,
    Champion,
    Dragoon,
}

impl UnitKind {
    /// All kinds, in bag index order.
    pub const ALL: [UnitKind; 6] = [
        UnitKind::Duke,
        UnitKind::Footman,
        UnitKind::Assassin,
        UnitKind::Bowman,
        UnitKind::Champion,
        UnitKind::Dragoon,
    ];

    #[inline]
    pub fn index(self) -> usize {
        match self {
            UnitKind::Duke => 0,
            UnitKind::Footman => 1,
            UnitKind::Assassin => 2,
            UnitKind::Bowman => 3,
            UnitKind::Champion => 4,
            UnitKind::Dragoon => 5,
        }
    }

    /// Short board label (without the side prefix).
    pub fn label(self) -> &'static str {
        match self {
            UnitKind::Duke => "D",
            UnitKind::Footman => "F",
            UnitKind::Assassin => "A",
            UnitKind::Bowman => "B",
            UnitKind::Champion => "C",
            UnitKind::Dragoon => "DR",
        }
    }

    /// Direction table for the given facing.
    pub fn moveset(self, facing: Facing) -> &'static [Step] {
        match (self, facing) {
            (UnitKind::Duke, Facing::Up) => DUKE_UP,
            (UnitKind::Duke, Facing::Down) => DUKE_DOWN,
            (UnitKind::Footman, Facing::Up) => FOOTMAN_UP,
            (UnitKind::Footman, Facing::Down) => FOOTMAN_DOWN,
            (UnitKind::Assassin, Facing::Up) => ASSASSIN_UP,
            (UnitKind::Assassin, Facing::Down) => ASSASSIN_DOWN,
            (UnitKind::Bowman, Facing::Up) => BOWMAN_UP,
            (UnitKind::Bowman, Facing::Down) => BOWMAN_DOWN,
            (UnitKind::Champion, Facing::Up) => CHAMPION_UP,
            (UnitKind::Champion, Facing::Down) => CHAMPION_DOWN,
            (UnitKind::Dragoon, Facing::Up) => DRAGOON_UP,
            (UnitKind::Dragoon, Facing::Down) => DRAGOON_DOWN,
        }
    }
}

impl fmt::Display for UnitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Which side of the tile is showing.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Facing {
    Up,
    Down,
}

impl Facing {
    #[inline]
    pub fn flipped(self) -> Facing {
        match self {
            Facing::Up => Facing::Down,
            Facing::Down => Facing::Up,
        }
    }
}

/// How a unit travels along one entry of its direction table.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MoveKind {
    /// Single step; blocked by anything strictly between origin and target.
    Move,
    /// Straight to the target, ignoring intervening squares.
    Jump,
    /// Slide along the direction until blocked.
    Slide,
    /// Slide that passes over every unit, stopping only at the edge.
    JumpSlide,
    /// Remove an enemy on the target without moving.
    Strike,
}

/// One entry of a direction table: (row delta, col delta, kind).
pub type Step = (isize, isize, MoveKind);

use MoveKind::{Jump, JumpSlide, Move, Slide, Strike};

const DUKE_UP: &[Step] = &[(0, -1, Slide), (0, 1, Slide)];
const DUKE_DOWN: &[Step] = &[(1, 0, Slide), (-1, 0, Slide)];

const FOOTMAN_UP: &[Step] = &[(0, 1, Move), (0, -1, Move), (1, 0, Move), (-1, 0, Move)];
const FOOTMAN_DOWN: &[Step] = &[
    (1, 1, Move),
    (-1, 1, Move),
    (-1, -1, Move),
    (1, -1, Move),
    (-2, 0, Move),
];

const ASSASSIN_UP: &[Step] = &[(-1, 0, JumpSlide), (1, -1, JumpSlide), (1, 1, JumpSlide)];
const ASSASSIN_DOWN: &[Step] = &[(1, 0, JumpSlide), (-1, -1, JumpSlide), (-1, 1, JumpSlide)];

const BOWMAN_UP: &[Step] = &[
    (-1, 0, Move),
    (0, 1, Move),
    (0, -1, Move),
    (0, -2, Jump),
    (0, 2, Jump),
    (2, 0, Jump),
];
const BOWMAN_DOWN: &[Step] = &[
    (-1, 0, Move),
    (1, 1, Move),
    (1, -1, Move),
    (-2, 0, Strike),
    (-1, 1, Strike),
    (-1, -1, Strike),
];

const CHAMPION_UP: &[Step] = &[
    (0, 1, Move),
    (0, -1, Move),
    (1, 0, Move),
    (-1, 0, Move),
    (0, 2, Jump),
    (0, -2, Jump),
    (2, 0, Jump),
    (-2, 0, Jump),
];
const CHAMPION_DOWN: &[Step] = &[
    (0, 1, Strike),
    (0, -1, Strike),
    (1, 0, Strike),
    (-1, 0, Strike),
    (0, 2, Jump),
    (0, -2, Jump),
    (2, 0, Jump),
    (-2, 0, Jump),
];

const DRAGOON_UP: &[Step] = &[
    (0, -1, Move),
    (0, 1, Move),
    (-2, 0, Strike),
    (-2, -2, Strike),
    (-2, 2, Strike),
];
const DRAGOON_DOWN: &[Step] = &[
    (-1, 0, Move),
    (-2, 0, Move),
    (-2, 1, Jump),
    (-2, -1, Jump),
    (1, -1, Slide),
    (1, 1, Slide),
];

/// A unit standing on a square.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Tile {
    pub kind: UnitKind,
    pub owner: Side,
    pub facing: Facing,
}

impl Tile {
    /// A freshly placed unit, showing its Up side.
    pub fn new(kind: UnitKind, owner: Side) -> Self {
        Self {
            kind,
            owner,
            facing: Facing::Up,
        }
    }

    /// The same unit after it has acted.
    #[inline]
    pub fn flipped(self) -> Self {
        Self {
            facing: self.facing.flipped(),
            ..self
        }
    }

    #[inline]
    pub fn is_duke(&self) -> bool {
        self.kind == UnitKind::Duke
    }

    #[inline]
    pub fn is_enemy_of(&self, side: Side) -> bool {
        self.owner != side
    }

    /// Direction table for the current facing, oriented for the owner.
    pub fn moves(&self) -> impl Iterator<Item = Step> + '_ {
        let sign = self.owner.row_sign();
        self.kind
            .moveset(self.facing)
            .iter()
            .map(move |&(dr, dc, kind)| (dr * sign, dc, kind))
    }

    /// Board label such as `WD` or `BDR`.
    pub fn label(&self) -> String {
        let prefix = match self.owner {
            Side::White => 'W',
            Side::Black => 'B',
        };
        format!("{prefix}{}", self.kind.label())
    }
}
