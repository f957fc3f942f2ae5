//! Monte Carlo Tree Search over game states.
//!
//! This module implements plain UCT:
//! - Selection descends with UCB1 until it finds a terminal node or a node
//!   with unexpanded successors
//! - Expansion adds one successor state as a new child
//! - A uniformly random rollout scores the new node
//! - Backpropagation walks the parent links up to the root
//!
//! Nodes live in an arena (`Vec<Node>`) and refer to each other by [`NodeId`].
//! The parent link is only used to walk back up during backpropagation.

use log::{debug, info};

use crate::config::SearchConfig;
use crate::constants::REPORT_PERIOD;
use crate::error::{DukeError, Result};
use crate::playout::rollout;
use crate::rules::{Outcome, legal_actions_with, result_with};
use crate::state::GameState;
use crate::tile::Side;

/// Index into the node arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The root node is always at index 0.
    pub const ROOT: NodeId = NodeId(0);
}

/// How often each outcome was seen below a node.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Tally {
    pub white_wins: u32,
    pub black_wins: u32,
    pub no_result: u32,
}

impl Tally {
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::WhiteWins => self.white_wins += 1,
            Outcome::BlackWins => self.black_wins += 1,
            Outcome::Ongoing => self.no_result += 1,
        }
    }

    pub fn get(&self, outcome: Outcome) -> u32 {
        match outcome {
            Outcome::WhiteWins => self.white_wins,
            Outcome::BlackWins => self.black_wins,
            Outcome::Ongoing => self.no_result,
        }
    }

    /// Wins minus losses from `side`'s point of view.
    pub fn margin(&self, side: Side) -> i64 {
        let wins = self.get(Outcome::win_for(side)) as i64;
        let losses = self.get(Outcome::win_for(side.opponent())) as i64;
        wins - losses
    }
}

/// A node in the search tree.
#[derive(Clone, Debug)]
pub struct Node {
    /// The game state at this node
    pub state: GameState,
    /// Terminal status of `state`, computed once
    pub outcome: Outcome,
    /// Parent node (None for the root)
    pub parent: Option<NodeId>,
    /// Expanded children, in expansion order
    pub children: Vec<NodeId>,
    /// Number of backpropagated rollouts through this node
    pub visits: u32,
    /// Rollout outcomes seen through this node
    pub results: Tally,
    /// Successor states not yet turned into children
    pub pending: Vec<GameState>,
}

impl Node {
    /// Fully expanded: every successor has a child node.
    pub fn is_fully_expanded(&self) -> bool {
        self.pending.is_empty()
    }

    /// Mean margin for the side choosing between this node and its siblings.
    pub fn value_for(&self, side: Side) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.results.margin(side) as f64 / self.visits as f64
        }
    }
}

/// UCB1 score of `child` as seen by the side to move at its parent.
fn ucb1(child: &Node, parent_visits: u32, mover: Side, exploration: f64) -> f64 {
    if child.visits == 0 {
        return f64::INFINITY;
    }
    let visits = child.visits as f64;
    let exploit = child.results.margin(mover) as f64 / visits;
    let explore = if exploration == 0.0 {
        0.0
    } else {
        exploration * (2.0 * (parent_visits.max(1) as f64).ln() / visits).sqrt()
    };
    exploit + explore
}

/// An MCTS tree rooted at one game state.
pub struct SearchTree {
    nodes: Vec<Node>,
    config: SearchConfig,
    rng: fastrand::Rng,
}

impl SearchTree {
    /// Create a tree whose root is `state`.
    ///
    /// The root's successors are computed immediately.
    pub fn new(state: GameState, config: SearchConfig) -> Self {
        let rng = config.rng();
        let mut tree = Self {
            nodes: Vec::new(),
            config,
            rng,
        };
        let root = tree.make_node(state, None);
        tree.nodes.push(root);
        tree
    }

    fn make_node(&mut self, state: GameState, parent: Option<NodeId>) -> Node {
        let outcome = result_with(&state, self.config.rules);
        let pending = if outcome.is_terminal() {
            Vec::new()
        } else {
            legal_actions_with(&state, self.config.rules, &mut self.rng)
        };
        Node {
            state,
            outcome,
            parent,
            children: Vec::new(),
            visits: 0,
            results: Tally::default(),
            pending,
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Get a node by ID.
    ///
    /// # Panics
    /// Panics if the NodeId does not belong to this tree.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn root(&self) -> &Node {
        self.node(NodeId::ROOT)
    }

    /// Number of nodes in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Turn one pending successor of `id` into a child node (last one first).
    pub fn expand(&mut self, id: NodeId) -> Option<NodeId> {
        let state = self.nodes[id.0].pending.pop()?;
        let child = self.make_node(state, Some(id));
        let child_id = NodeId(self.nodes.len());
        self.nodes.push(child);
        self.nodes[id.0].children.push(child_id);
        Some(child_id)
    }

    /// Child of `id` with the highest UCB1 score, from the point of view of
    /// the side to move at `id`. Ties go to the earliest child.
    ///
    /// Returns `None` for a node without children.
    pub fn best_child(&self, id: NodeId, exploration: f64) -> Option<NodeId> {
        let node = self.node(id);
        let mover = node.state.to_move;
        let mut best: Option<(NodeId, f64)> = None;
        for &child_id in &node.children {
            let score = ucb1(self.node(child_id), node.visits, mover, exploration);
            if best.is_none_or(|(_, s)| score > s) {
                best = Some((child_id, score));
            }
        }
        best.map(|(child_id, _)| child_id)
    }

    /// Tree policy: walk down from the root to the node to roll out from.
    pub fn select(&mut self) -> NodeId {
        let mut id = NodeId::ROOT;
        loop {
            let node = self.node(id);
            if node.outcome.is_terminal() {
                return id;
            }
            if !node.is_fully_expanded() {
                return self.expand(id).unwrap_or(id);
            }
            match self.best_child(id, self.config.exploration) {
                Some(child) => id = child,
                // no successors at all: nothing left to explore below here
                None => return id,
            }
        }
    }

    /// Random playout from the state at `id`.
    pub fn rollout(&mut self, id: NodeId) -> Outcome {
        let state = self.nodes[id.0].state;
        rollout(&state, self.config.rules, self.config.max_rollout_plies, &mut self.rng)
    }

    /// Record `outcome` on `id` and every ancestor up to the root.
    pub fn backpropagate(&mut self, id: NodeId, outcome: Outcome) {
        let mut cur = Some(id);
        while let Some(NodeId(i)) = cur {
            let node = &mut self.nodes[i];
            node.visits += 1;
            node.results.record(outcome);
            cur = node.parent;
        }
    }

    /// Run `iterations` search cycles, then pick the root child with the best
    /// mean result for the side to move (no exploration bonus).
    ///
    /// # Errors
    /// [`DukeError::NoLegalActions`] if the root is terminal or has no
    /// successors, or if no child was ever expanded.
    pub fn choose_action(&mut self, iterations: usize) -> Result<NodeId> {
        let root = self.root();
        if root.outcome.is_terminal() || (root.pending.is_empty() && root.children.is_empty()) {
            return Err(DukeError::NoLegalActions);
        }

        for i in 0..iterations {
            let leaf = self.select();
            let outcome = self.rollout(leaf);
            self.backpropagate(leaf, outcome);

            if (i + 1) % REPORT_PERIOD == 0 {
                let root = self.root();
                debug!(
                    "iteration {} nodes={} root visits={} W={} B={} none={}",
                    i + 1,
                    self.len(),
                    root.visits,
                    root.results.white_wins,
                    root.results.black_wins,
                    root.results.no_result
                );
            }
        }

        let best = self
            .best_child(NodeId::ROOT, 0.0)
            .ok_or(DukeError::NoLegalActions)?;
        let chosen = self.node(best);
        info!(
            "{} chose among {} children after {} iterations: visits={} value={:.3}",
            self.root().state.to_move,
            self.root().children.len(),
            iterations,
            chosen.visits,
            chosen.value_for(self.root().state.to_move)
        );
        self.dump_children();
        Ok(best)
    }

    /// Run the configured number of iterations and return the chosen state.
    pub fn search(&mut self) -> Result<GameState> {
        let best = self.choose_action(self.config.iterations)?;
        Ok(self.node(best).state)
    }

    /// Log statistics for every root child.
    pub fn dump_children(&self) {
        let mover = self.root().state.to_move;
        for &id in &self.root().children {
            let child = self.node(id);
            debug!(
                "child {} v={} W={} B={} value={:.3}",
                id.0,
                child.visits,
                child.results.white_wins,
                child.results.black_wins,
                child.value_for(mover)
            );
        }
    }
}
