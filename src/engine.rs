//! Turn-by-turn decision engine
//!
//! [`GameTree`] owns the live board and a search tree that survives
//! between turns. The game is driven by three calls:
//!
//! 1. **`generate`**: the first move of the game (by either side) builds
//!    the initial tree to `max_depth`
//! 2. **`on_opponent_move`**: re-roots to the opponent's move, reusing the
//!    subtree when it was anticipated
//! 3. **`choose_next_move`**: picks the agent's best child, re-roots to it
//!    and returns it
//!
//! After every re-root the remaining leaves are deepened by one ply and the
//! whole subtree is revalued.
//!
//! # Example
//!
//! ```
//! use mnk::{GameTree, Mark, MnkParams, Move, SearchConfig};
//!
//! let params = MnkParams::new(3, 3, 3);
//! let mut engine = GameTree::new(params, Mark::O, SearchConfig::for_testing()).unwrap();
//!
//! engine.generate(Move::new(1, 1, Mark::X)).unwrap();
//! let reply = engine.choose_next_move().unwrap();
//! assert_eq!(reply.mark, Mark::O);
//! assert_eq!(engine.history().len(), 2);
//! ```

use tracing::debug;

use crate::board::{Board, Mark, MnkParams, Move};
use crate::config::SearchConfig;
use crate::error::EngineError;
use crate::rules::GameState;
use crate::search::{NodeId, SearchStats, Searcher, Tree};

/// Persistent alpha-beta engine for one agent.
///
/// Values reported by the engine are from the agent's perspective:
/// `K + 1` is a forced win, `-(K + 1)` a forced loss.
#[derive(Debug)]
pub struct GameTree {
    params: MnkParams,
    agent: Mark,
    /// Real position, holding exactly the moves of the tree's history
    board: Board,
    /// `None` until the first move is known
    tree: Option<Tree>,
    searcher: Searcher,
}

impl GameTree {
    /// Create an engine playing `agent` on a board of `params`.
    pub fn new(params: MnkParams, agent: Mark, config: SearchConfig) -> Result<Self, EngineError> {
        if !params.is_well_formed() {
            return Err(EngineError::InvalidParams(format!(
                "rows, cols and k must be positive, got {}x{} k={}",
                params.rows, params.cols, params.k
            )));
        }
        if agent == Mark::Empty {
            return Err(EngineError::InvalidParams("agent must play X or O".into()));
        }
        config.validate()?;

        Ok(Self {
            params,
            agent,
            board: Board::new(params),
            tree: None,
            searcher: Searcher::new(config, agent, params.k),
        })
    }

    /// Create an engine with the default search configuration.
    pub fn with_defaults(params: MnkParams, agent: Mark) -> Result<Self, EngineError> {
        Self::new(params, agent, SearchConfig::default())
    }

    /// Start the game with its first move and build the initial tree.
    ///
    /// The first move is always X's. Whether it belongs to the agent or the
    /// opponent decides which call comes next.
    pub fn generate(&mut self, first: Move) -> Result<(), EngineError> {
        if self.tree.is_some() {
            return Err(EngineError::AlreadyGenerated);
        }
        if first.mark != Mark::X {
            return Err(EngineError::WrongMark {
                expected: Mark::X,
                found: first.mark,
            });
        }
        self.check_cell(first)?;

        self.board.place(first.pos, first.mark);
        let mut tree = Tree::new(first);
        let root = tree.root();
        let depth = self.searcher.config().max_depth;
        self.searcher.expand(&mut tree, &mut self.board, root, depth);
        let value = self.searcher.evaluate_root(&mut tree);

        debug!(
            first = %first.pos,
            nodes = tree.len(),
            value,
            "generated tree"
        );
        self.tree = Some(tree);
        Ok(())
    }

    /// Apply the opponent's move to the board and the tree.
    pub fn on_opponent_move(&mut self, mv: Move) -> Result<(), EngineError> {
        let opponent = self.agent.opponent();
        let tree = self.tree.as_mut().ok_or(EngineError::NotGenerated)?;
        let root = tree.get(tree.root()).mv;

        if self.board.exact_status(root.pos).is_over() {
            return Err(EngineError::GameOver);
        }
        if root.mark != self.agent {
            return Err(EngineError::OutOfTurn(opponent));
        }
        if mv.mark != opponent {
            return Err(EngineError::WrongMark {
                expected: opponent,
                found: mv.mark,
            });
        }
        if !self.params.contains(mv.pos) {
            return Err(EngineError::OutOfBounds(mv.pos));
        }
        if !self.board.is_free(mv.pos) {
            return Err(EngineError::CellOccupied(mv.pos));
        }

        match tree.find_child(tree.root(), mv.pos) {
            Some(child) => {
                let freed = tree.reroot(child);
                self.searcher.record_freed(freed);
                self.board.place(mv.pos, mv.mark);
                self.searcher.extend_leaves(tree, &mut self.board, child);
                debug!(pos = %mv.pos, freed, nodes = tree.len(), "opponent move anticipated");
            }
            None => {
                let root = tree.root();
                let child = self.searcher.add_child(tree, root, mv);
                let freed = tree.reroot(child);
                self.searcher.record_freed(freed);
                self.board.place(mv.pos, mv.mark);
                let depth = self.searcher.config().max_depth;
                self.searcher.expand(tree, &mut self.board, child, depth);
                debug!(pos = %mv.pos, freed, nodes = tree.len(), "opponent move outside tree");
            }
        }

        self.searcher.evaluate_root(tree);
        Ok(())
    }

    /// Pick, play and return the agent's best move.
    pub fn choose_next_move(&mut self) -> Result<Move, EngineError> {
        let tree = self.tree.as_mut().ok_or(EngineError::NotGenerated)?;
        let root = tree.root();
        let root_mv = tree.get(root).mv;

        if self.board.exact_status(root_mv.pos).is_over() {
            return Err(EngineError::GameOver);
        }
        if root_mv.mark == self.agent {
            return Err(EngineError::OutOfTurn(self.agent));
        }

        if tree.get(root).is_leaf() {
            self.searcher.expand(tree, &mut self.board, root, 1);
            self.searcher.evaluate_root(tree);
        }

        let best: NodeId = self
            .searcher
            .best_child(tree, root)
            .ok_or(EngineError::NoCandidates)?;
        let chosen = tree.get(best).mv;
        let value = tree.get(best).value;

        let freed = tree.reroot(best);
        self.searcher.record_freed(freed);
        self.board.place(chosen.pos, chosen.mark);
        self.searcher.extend_leaves(tree, &mut self.board, best);
        self.searcher.evaluate_root(tree);

        debug!(pos = %chosen.pos, value, freed, nodes = tree.len(), "chose move");
        Ok(chosen)
    }

    /// Reject moves outside the board or onto an occupied cell.
    fn check_cell(&self, mv: Move) -> Result<(), EngineError> {
        if !self.params.contains(mv.pos) {
            return Err(EngineError::OutOfBounds(mv.pos));
        }
        if !self.board.is_free(mv.pos) {
            return Err(EngineError::CellOccupied(mv.pos));
        }
        Ok(())
    }

    #[inline]
    pub fn agent(&self) -> Mark {
        self.agent
    }

    #[inline]
    pub fn params(&self) -> &MnkParams {
        &self.params
    }

    #[inline]
    pub fn config(&self) -> &SearchConfig {
        self.searcher.config()
    }

    /// The real position.
    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The search tree, once the first move is known.
    #[inline]
    pub fn tree(&self) -> Option<&Tree> {
        self.tree.as_ref()
    }

    #[inline]
    pub fn is_generated(&self) -> bool {
        self.tree.is_some()
    }

    /// Last move played.
    pub fn root_move(&self) -> Option<Move> {
        self.tree.as_ref().map(|tree| tree.get(tree.root()).mv)
    }

    /// Alpha-beta value of the live position.
    pub fn root_value(&self) -> Option<i32> {
        self.tree.as_ref().map(|tree| tree.get(tree.root()).value)
    }

    /// Moves played so far, first move first.
    pub fn history(&self) -> Vec<Move> {
        self.tree.as_ref().map(Tree::history).unwrap_or_default()
    }

    /// State of the real game.
    pub fn status(&self) -> GameState {
        match self.root_move() {
            Some(mv) => self.board.exact_status(mv.pos),
            None => GameState::Open,
        }
    }

    #[inline]
    pub fn stats(&self) -> &SearchStats {
        self.searcher.stats()
    }

    pub fn reset_stats(&mut self) {
        self.searcher.reset_stats();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Pos;

    fn engine(rows: u16, cols: u16, k: u16, agent: Mark, config: SearchConfig) -> GameTree {
        GameTree::new(MnkParams::new(rows, cols, k), agent, config).unwrap()
    }

    #[test]
    fn test_engine_creation() {
        let engine = GameTree::with_defaults(MnkParams::new(3, 3, 3), Mark::X).unwrap();
        assert_eq!(engine.agent(), Mark::X);
        assert_eq!(engine.config().max_depth, 6);
        assert!(!engine.is_generated());
        assert_eq!(engine.status(), GameState::Open);
        assert!(engine.history().is_empty());
        assert_eq!(engine.root_value(), None);
    }

    #[test]
    fn test_engine_rejects_bad_setup() {
        let bad = GameTree::new(MnkParams::new(0, 3, 3), Mark::X, SearchConfig::default());
        assert!(matches!(bad, Err(EngineError::InvalidParams(_))));

        let empty = GameTree::new(MnkParams::new(3, 3, 3), Mark::Empty, SearchConfig::default());
        assert!(matches!(empty, Err(EngineError::InvalidParams(_))));

        let config = SearchConfig::default().with_max_depth(0);
        let shallow = GameTree::new(MnkParams::new(3, 3, 3), Mark::X, config);
        assert!(matches!(shallow, Err(EngineError::InvalidConfig(_))));
    }

    #[test]
    fn test_calls_before_generate_fail() {
        let mut engine = engine(3, 3, 3, Mark::X, SearchConfig::for_testing());
        assert_eq!(engine.choose_next_move(), Err(EngineError::NotGenerated));
        assert_eq!(
            engine.on_opponent_move(Move::new(0, 0, Mark::O)),
            Err(EngineError::NotGenerated)
        );
    }

    #[test]
    fn test_generate_checks_first_move() {
        let mut engine = engine(3, 3, 3, Mark::X, SearchConfig::for_testing());
        assert_eq!(
            engine.generate(Move::new(1, 1, Mark::O)),
            Err(EngineError::WrongMark {
                expected: Mark::X,
                found: Mark::O
            })
        );
        assert_eq!(
            engine.generate(Move::new(3, 0, Mark::X)),
            Err(EngineError::OutOfBounds(Pos::new(3, 0)))
        );
        assert!(!engine.is_generated());

        engine.generate(Move::new(1, 1, Mark::X)).unwrap();
        assert_eq!(
            engine.generate(Move::new(0, 0, Mark::X)),
            Err(EngineError::AlreadyGenerated)
        );
    }

    #[test]
    fn test_turn_order_enforced() {
        // Agent moved first: opponent must reply before the agent moves again
        let mut engine = engine(3, 3, 3, Mark::X, SearchConfig::for_testing());
        engine.generate(Move::new(1, 1, Mark::X)).unwrap();
        assert_eq!(engine.choose_next_move(), Err(EngineError::OutOfTurn(Mark::X)));

        engine.on_opponent_move(Move::new(0, 0, Mark::O)).unwrap();
        assert_eq!(
            engine.on_opponent_move(Move::new(0, 1, Mark::O)),
            Err(EngineError::OutOfTurn(Mark::O))
        );
    }

    #[test]
    fn test_opponent_move_validation() {
        let mut engine = engine(3, 3, 3, Mark::X, SearchConfig::for_testing());
        engine.generate(Move::new(1, 1, Mark::X)).unwrap();

        assert_eq!(
            engine.on_opponent_move(Move::new(0, 0, Mark::X)),
            Err(EngineError::WrongMark {
                expected: Mark::O,
                found: Mark::X
            })
        );
        assert_eq!(
            engine.on_opponent_move(Move::new(1, 1, Mark::O)),
            Err(EngineError::CellOccupied(Pos::new(1, 1)))
        );
        assert_eq!(
            engine.on_opponent_move(Move::new(0, 5, Mark::O)),
            Err(EngineError::OutOfBounds(Pos::new(0, 5)))
        );
        // Rejected calls leave the position alone
        assert_eq!(engine.board().stone_count(), 1);
        assert_eq!(engine.history(), vec![Move::new(1, 1, Mark::X)]);
    }

    #[test]
    fn test_single_mark_wins_immediately() {
        let mut engine = engine(2, 2, 1, Mark::O, SearchConfig::for_testing());
        engine.generate(Move::new(0, 0, Mark::X)).unwrap();

        assert_eq!(engine.status(), GameState::Won(Mark::X));
        assert_eq!(engine.root_value(), Some(-2));
        assert_eq!(engine.choose_next_move(), Err(EngineError::GameOver));
    }

    #[test]
    fn test_opponent_move_after_game_over() {
        let mut engine = engine(2, 2, 1, Mark::X, SearchConfig::for_testing());
        engine.generate(Move::new(0, 0, Mark::X)).unwrap();

        assert_eq!(
            engine.on_opponent_move(Move::new(1, 1, Mark::O)),
            Err(EngineError::GameOver)
        );
        assert_eq!(engine.board().stone_count(), 1);
    }

    #[test]
    fn test_choose_reroots_and_records_history() {
        let mut engine = engine(4, 4, 3, Mark::O, SearchConfig::for_testing());
        engine.generate(Move::new(1, 1, Mark::X)).unwrap();

        let reply = engine.choose_next_move().unwrap();
        assert_eq!(reply.mark, Mark::O);
        assert_eq!(engine.root_move(), Some(reply));
        assert_eq!(engine.board().get(reply.pos), Mark::O);
        assert_eq!(engine.history(), vec![Move::new(1, 1, Mark::X), reply]);
        assert!(engine.stats().nodes_freed > 0);
    }

    #[test]
    fn test_unanticipated_opponent_move() {
        // Depth 1 with min_eval 1 keeps a single child under the root
        let config = SearchConfig::default().with_max_depth(1).with_min_eval(1);
        let mut engine = engine(5, 5, 4, Mark::X, config);
        engine.generate(Move::new(2, 2, Mark::X)).unwrap();
        let tree = engine.tree().unwrap();
        assert_eq!(tree.get(tree.root()).children.len(), 1);

        // A far corner is never among the candidates
        let far = Move::new(4, 0, Mark::O);
        engine.on_opponent_move(far).unwrap();
        assert_eq!(engine.root_move(), Some(far));
        assert_eq!(engine.history(), vec![Move::new(2, 2, Mark::X), far]);

        // Only the first move was not created by the searcher
        let stats = engine.stats();
        let live = engine.tree().unwrap().len() as u64;
        assert_eq!(stats.nodes_created - stats.nodes_freed, live - 1);

        let next = engine.choose_next_move().unwrap();
        assert_eq!(next.mark, Mark::X);
    }

    #[test]
    fn test_finds_forced_win_after_edge_reply() {
        let mut engine = engine(3, 3, 3, Mark::X, SearchConfig::exhaustive(9));
        engine.generate(Move::new(1, 1, Mark::X)).unwrap();
        engine.on_opponent_move(Move::new(0, 1, Mark::O)).unwrap();
        assert_eq!(engine.root_value(), Some(4));

        // Any opponent replies: the forced win must be carried out
        while engine.status() == GameState::Open {
            engine.choose_next_move().unwrap();
            if engine.status() != GameState::Open {
                break;
            }
            let free = engine
                .params()
                .positions()
                .find(|&pos| engine.board().is_free(pos))
                .unwrap();
            engine.on_opponent_move(Move::at(free, Mark::O)).unwrap();
            assert_eq!(engine.root_value(), Some(4));
        }
        assert_eq!(engine.status(), GameState::Won(Mark::X));
    }

    #[test]
    fn test_reset_stats() {
        let mut engine = engine(3, 3, 3, Mark::X, SearchConfig::for_testing());
        engine.generate(Move::new(1, 1, Mark::X)).unwrap();
        assert!(engine.stats().nodes_created > 0);

        engine.reset_stats();
        assert_eq!(*engine.stats(), SearchStats::default());
    }
}
