//! Constants for board geometry, search parameters and difficulty budgets.
//!
//! Runtime-tunable values live in [`crate::config::SearchConfig`]; the
//! defaults it starts from are defined here.

// =============================================================================
// Board Geometry
// =============================================================================

/// Board size (NxN).
pub const N: usize = 6;

/// Row White's Duke starts on (bottom of the board).
pub const WHITE_HOME_ROW: usize = N - 1;

/// Row Black's Duke starts on (top of the board).
pub const BLACK_HOME_ROW: usize = 0;

/// Offsets (row, col) from a Duke to the squares a new unit may be placed on.
/// Order: South, North, East, West
pub const PLACEMENT_OFFSETS: [(isize, isize); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

// =============================================================================
// MCTS Parameters
// =============================================================================

/// UCB1 exploration constant used while searching.
pub const EXPLORATION: f64 = 1.4;

/// Default number of iterations per AI move.
pub const N_ITERATIONS: usize = 500;

/// Rollouts longer than this are abandoned and scored as a draw.
pub const MAX_ROLLOUT_PLIES: usize = 400;

/// Progress report period (number of iterations between debug reports).
pub const REPORT_PERIOD: usize = 100;

// =============================================================================
// Difficulty Budgets
// =============================================================================

/// Iterations used by the easy opponent.
pub const EASY_ITERATIONS: usize = 100;

/// Iterations used by the medium opponent.
pub const MEDIUM_ITERATIONS: usize = 500;

/// Iterations used by the hard opponent.
pub const HARD_ITERATIONS: usize = 1000;
