//! Duke-MCTS: a Duke-style tile game with a Monte Carlo Tree Search opponent.
//!
//! Two players each protect a Duke on a 6x6 board. Every unit has two sides
//! with different movesets and flips after it acts. Reinforcements are drawn
//! at random from a per-side bag and placed next to the Duke.
//!
//! ## Modules
//!
//! - [`constants`] - Board dimensions and engine parameters
//! - [`tile`] - Unit kinds, facings and direction tables
//! - [`state`] - Game state, bags and transitions
//! - [`movegen`] - Destination generation for a single unit
//! - [`rules`] - Check, Duke safety, legal actions and game outcome
//! - [`playout`] - Random playouts for position evaluation
//! - [`mcts`] - Monte Carlo Tree Search with UCB1
//! - [`config`] - Search configuration and difficulty levels
//! - [`engine`] - Text protocol for human vs engine games
//!
//! ## Example
//!
//! ```
//! use duke_mcts::config::SearchConfig;
//! use duke_mcts::mcts::SearchTree;
//! use duke_mcts::state::opening;
//!
//! let mut rng = fastrand::Rng::with_seed(1);
//! let state = opening(2, 3, &mut rng).unwrap();
//!
//! // Let the engine pick White's first action
//! let mut tree = SearchTree::new(state, SearchConfig::with_iterations(50).seeded(7));
//! let next = tree.search().unwrap();
//! assert_ne!(next.to_move, state.to_move);
//! ```

pub mod config;
pub mod constants;
pub mod engine;
pub mod error;
pub mod logging;
pub mod mcts;
pub mod movegen;
pub mod playout;
pub mod rules;
pub mod state;
pub mod tile;

pub use error::{DukeError, Result};
