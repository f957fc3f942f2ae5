use thiserror::Error;

use crate::tile::Side;

/// Errors raised when a query or transition is given an invalid input.
///
/// Running out of bag units or reaching a terminal position are not errors;
/// those are reported through `Option` and [`crate::rules::Outcome`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DukeError {
    #[error("square ({row}, {col}) is off the board")]
    InvalidSquare { row: usize, col: usize },

    #[error("no unit on square ({row}, {col})")]
    EmptySquare { row: usize, col: usize },

    #[error("unit on ({row}, {col}) does not belong to {side}")]
    NotYourUnit { row: usize, col: usize, side: Side },

    #[error("unit cannot reach ({row}, {col}) that way")]
    IllegalMove { row: usize, col: usize },

    #[error("square ({row}, {col}) is already occupied")]
    OccupiedSquare { row: usize, col: usize },

    #[error("{0} has no such unit left in the bag")]
    NotInBag(Side),

    #[error("{0} has no Duke on the board")]
    NoDuke(Side),

    #[error("({row}, {col}) is not next to the Duke")]
    IllegalPlacement { row: usize, col: usize },

    #[error("no legal actions available")]
    NoLegalActions,
}

/// Convenience Result type for rules and search operations.
pub type Result<T> = std::result::Result<T, DukeError>;
