//! Random playouts (rollouts).
//!
//! A rollout plays uniformly random legal actions from a state until the game
//! is decided, then reports the outcome. It is the only evaluation the search
//! uses; there is no heuristic scoring.

use log::trace;

use crate::rules::{Outcome, RuleSet, legal_actions_with, result_with};
use crate::state::GameState;

/// Play random actions from `start` until a result is reached.
///
/// Returns [`Outcome::Ongoing`] (no signal) if a non-terminal state has no
/// legal action, or if `max_plies` actions were played without a result.
pub fn rollout(
    start: &GameState,
    rules: RuleSet,
    max_plies: usize,
    rng: &mut fastrand::Rng,
) -> Outcome {
    let mut state = *start;
    let mut plies = 0;

    loop {
        let outcome = result_with(&state, rules);
        if outcome.is_terminal() {
            return outcome;
        }
        if plies >= max_plies {
            trace!("rollout cut off after {plies} plies");
            return Outcome::Ongoing;
        }

        let actions = legal_actions_with(&state, rules, rng);
        if actions.is_empty() {
            trace!("rollout stalled after {plies} plies with no legal action");
            return Outcome::Ongoing;
        }
        state = actions[rng.usize(..actions.len())];
        plies += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::opening;
    use crate::tile::{Side, UnitKind};

    #[test]
    fn test_rollout_of_terminal_state_returns_it() {
        let s = GameState::initial()
            .place_starting_unit((5, 0), Side::White, UnitKind::Duke)
            .unwrap();
        let mut rng = fastrand::Rng::with_seed(1);
        assert_eq!(rollout(&s, RuleSet::Checkmate, 10, &mut rng), Outcome::WhiteWins);
    }

    #[test]
    fn test_rollout_zero_budget_is_no_signal() {
        let mut rng = fastrand::Rng::with_seed(2);
        let s = opening(2, 3, &mut rng).unwrap();
        assert_eq!(rollout(&s, RuleSet::Checkmate, 0, &mut rng), Outcome::Ongoing);
    }

    #[test]
    fn test_rollout_is_reproducible() {
        let mut rng = fastrand::Rng::with_seed(4);
        let s = opening(1, 4, &mut rng).unwrap();
        let a = rollout(&s, RuleSet::Checkmate, 400, &mut fastrand::Rng::with_seed(99));
        let b = rollout(&s, RuleSet::Checkmate, 400, &mut fastrand::Rng::with_seed(99));
        assert_eq!(a, b);
    }
}
