//! Tree construction and alpha-beta valuation
//!
//! This module implements the core search of the engine. The tree is
//! built explicitly and kept between turns:
//!
//! - `expand` grows a node to a fixed depth, scoring terminal positions
//!   exactly and depth-exhausted ones with the leaf heuristic
//! - forward pruning stops a node's expansion once enough children exist
//!   and the next candidate is quiet
//! - `alpha_beta` values the stored tree bottom-up and flags the children
//!   whose values are current
//! - `extend_leaves` deepens a re-rooted subtree by one ply
//!
//! # Example
//!
//! ```
//! use mnk::board::{Board, Mark, MnkParams, Move};
//! use mnk::search::{Searcher, Tree};
//! use mnk::SearchConfig;
//!
//! let params = MnkParams::new(3, 3, 3);
//! let mut board = Board::new(params);
//! let first = Move::new(1, 1, Mark::X);
//! board.place(first.pos, first.mark);
//!
//! let mut tree = Tree::new(first);
//! let mut searcher = Searcher::new(SearchConfig::for_testing(), Mark::O, params.k);
//! let root = tree.root();
//! searcher.expand(&mut tree, &mut board, root, 3);
//! let value = searcher.evaluate_root(&mut tree);
//! assert!(value.abs() <= 4);
//! ```

use tracing::trace;

use crate::board::{Board, Mark, Move};
use crate::config::SearchConfig;
use crate::eval::{leaf_value, Scores};

use super::node::NodeId;
use super::ranker::Candidates;
use super::tree::Tree;

/// Search statistics for diagnostics and tuning.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes added to the tree
    pub nodes_created: u64,
    /// Nodes released by re-rooting
    pub nodes_freed: u64,
    /// Depth-exhausted leaves scored by the heuristic
    pub leaves_scored: u64,
    /// Terminal positions reached
    pub terminals: u64,
    /// Alpha-beta cutoffs
    pub cutoffs: u64,
    /// Expansions stopped by forward pruning
    pub forward_prunes: u64,
}

/// Builds and values the search tree for one agent.
#[derive(Debug, Clone)]
pub struct Searcher {
    config: SearchConfig,
    agent: Mark,
    scores: Scores,
    stats: SearchStats,
}

impl Searcher {
    pub fn new(config: SearchConfig, agent: Mark, k: u16) -> Self {
        Self {
            config,
            agent,
            scores: Scores::for_target(k),
            stats: SearchStats::default(),
        }
    }

    #[inline]
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    #[inline]
    pub fn scores(&self) -> &Scores {
        &self.scores
    }

    #[inline]
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    pub fn reset_stats(&mut self) {
        self.stats = SearchStats::default();
    }

    pub(crate) fn record_freed(&mut self, freed: usize) {
        self.stats.nodes_freed += freed as u64;
    }

    /// Append a child to `parent`, counting it in the stats.
    pub fn add_child(&mut self, tree: &mut Tree, parent: NodeId, mv: Move) -> NodeId {
        self.stats.nodes_created += 1;
        tree.add_child(parent, mv)
    }

    /// Build the subtree of `node` down to `depth` plies.
    ///
    /// `board` must hold the moves of `node` and all its ancestors. It is
    /// returned in the same state.
    pub fn expand(&mut self, tree: &mut Tree, board: &mut Board, node: NodeId, depth: u8) {
        debug_assert!(tree.get(node).is_leaf());
        let mv = tree.get(node).mv;

        let state = board.exact_status(mv.pos);
        if let Some(value) = self.scores.terminal_value(state, self.agent) {
            let n = tree.get_mut(node);
            n.is_terminal = true;
            n.value = value;
            self.stats.terminals += 1;
            return;
        }

        if depth == 0 {
            tree.get_mut(node).value = leaf_value(board, mv, self.agent);
            self.stats.leaves_scored += 1;
            return;
        }

        let mover = mv.mark.opponent();
        let mut candidates = Candidates::rank(tree, node, board, mover);
        let mut generated = 0usize;

        while let Some(next) = candidates.peek().copied() {
            if generated >= self.config.min_eval && next.urgency > self.config.score_threshold {
                trace!(
                    node = node.0,
                    skipped = candidates.len(),
                    urgency = next.urgency,
                    "forward prune"
                );
                self.stats.forward_prunes += 1;
                break;
            }
            candidates.next();

            let child = self.add_child(tree, node, Move::at(next.pos, mover));

            let mut placed = board.place_guarded(next.pos, mover);
            self.expand(tree, &mut placed, child, depth - 1);
            generated += 1;
        }
    }

    /// Grow every non-terminal leaf below `node` by one ply.
    ///
    /// `board` must hold the moves of `node` and all its ancestors.
    pub fn extend_leaves(&mut self, tree: &mut Tree, board: &mut Board, node: NodeId) {
        let n = tree.get(node);
        if n.is_leaf() {
            if !n.is_terminal {
                self.expand(tree, board, node, 1);
            }
            return;
        }

        for i in 0..tree.get(node).children.len() {
            let child = tree.get(node).children[i];
            let mv = tree.get(child).mv;
            let mut placed = board.place_guarded(mv.pos, mv.mark);
            self.extend_leaves(tree, &mut placed, child);
        }
    }

    /// Minimax value of `node` with alpha-beta pruning, from the agent's
    /// perspective.
    ///
    /// Leaves return their stored value. Nodes whose children are the
    /// agent's moves maximise, the others minimise. Every child visited in
    /// this pass is flagged `prune_safe`; siblings skipped by a cutoff are not.
    pub fn alpha_beta(
        &mut self,
        tree: &mut Tree,
        node: NodeId,
        mut alpha: i32,
        mut beta: i32,
    ) -> i32 {
        let n = tree.get(node);
        if n.is_leaf() {
            return n.value;
        }

        let maximizing = n.mv.mark.opponent() == self.agent;
        let count = n.children.len();
        for i in 0..count {
            let child = tree.get(node).children[i];
            tree.get_mut(child).prune_safe = false;
        }

        let mut best = if maximizing { i32::MIN } else { i32::MAX };
        for i in 0..count {
            let child = tree.get(node).children[i];
            let value = self.alpha_beta(tree, child, alpha, beta);
            tree.get_mut(child).prune_safe = true;

            if maximizing {
                best = best.max(value);
                alpha = alpha.max(best);
            } else {
                best = best.min(value);
                beta = beta.min(best);
            }

            if beta <= alpha {
                trace!(node = node.0, visited = i + 1, of = count, "cutoff");
                self.stats.cutoffs += 1;
                break;
            }
        }

        tree.get_mut(node).value = best;
        best
    }

    /// Run alpha-beta over the whole live subtree with the full score window.
    pub fn evaluate_root(&mut self, tree: &mut Tree) -> i32 {
        let root = tree.root();
        self.alpha_beta(tree, root, self.scores.loss, self.scores.win)
    }

    /// Best child of `node` for the agent: the greatest value among children
    /// flagged `prune_safe`, earliest wins ties.
    pub fn best_child(&self, tree: &Tree, node: NodeId) -> Option<NodeId> {
        let mut best: Option<(NodeId, i32)> = None;
        for &child in &tree.get(node).children {
            let c = tree.get(child);
            if !c.prune_safe {
                continue;
            }
            if best.map_or(true, |(_, value)| c.value > value) {
                best = Some((child, c.value));
            }
        }
        best.map(|(id, _)| id)
    }
}
