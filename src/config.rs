//! Search configuration.
//!
//! Defaults come from [`crate::constants`].

use crate::constants::{
    EASY_ITERATIONS, EXPLORATION, HARD_ITERATIONS, MAX_ROLLOUT_PLIES, MEDIUM_ITERATIONS,
    N_ITERATIONS,
};
use crate::rules::RuleSet;

/// How strong the AI opponent plays, expressed as an iteration budget.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn iterations(self) -> usize {
        match self {
            Difficulty::Easy => EASY_ITERATIONS,
            Difficulty::Medium => MEDIUM_ITERATIONS,
            Difficulty::Hard => HARD_ITERATIONS,
        }
    }
}

/// MCTS configuration parameters.
#[derive(Clone, Debug)]
pub struct SearchConfig {
    /// Selection/rollout/backpropagation cycles per `choose_action`.
    pub iterations: usize,

    /// UCB1 exploration constant used during search.
    /// The final move choice always uses 0 (pure exploitation).
    pub exploration: f64,

    /// Rollouts are cut off (and scored 0) after this many plies.
    pub max_rollout_plies: usize,

    /// Seed for the search RNG. `None` seeds from entropy.
    pub seed: Option<u64>,

    /// Rules used for legal actions and terminal detection.
    pub rules: RuleSet,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            iterations: N_ITERATIONS,
            exploration: EXPLORATION,
            max_rollout_plies: MAX_ROLLOUT_PLIES,
            seed: None,
            rules: RuleSet::Checkmate,
        }
    }
}

impl SearchConfig {
    /// Create a new config with the specified number of iterations.
    pub fn with_iterations(iterations: usize) -> Self {
        Self {
            iterations,
            ..Default::default()
        }
    }

    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        Self::with_iterations(difficulty.iterations())
    }

    /// Same config with a fixed RNG seed.
    pub fn seeded(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Build the RNG the search will use.
    pub fn rng(&self) -> fastrand::Rng {
        match self.seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_budgets() {
        assert_eq!(Difficulty::Easy.iterations(), 100);
        assert_eq!(Difficulty::Medium.iterations(), 500);
        assert_eq!(Difficulty::Hard.iterations(), 1000);
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let config = SearchConfig::with_iterations(10).seeded(42);
        let mut a = config.rng();
        let mut b = config.rng();
        assert_eq!(a.u64(..), b.u64(..));
        assert_eq!(config.rules, RuleSet::Checkmate);
    }
}
