//! (M,N,K) game engine with a persistent alpha-beta tree
//!
//! A decision engine for generalised tic-tac-toe: an M×N board where the
//! first player to get K marks in a row (horizontally, vertically or
//! diagonally) wins. X always moves first.
//!
//! # Architecture
//!
//! The engine is organized into several modules:
//! - [`board`]: Board representation with bitboards and distance queries
//! - [`rules`]: Win detection and distance-to-win computation
//! - [`eval`]: Terminal scores and the leaf heuristic
//! - [`search`]: Tree arena, candidate ranking, alpha-beta
//! - [`engine`]: Turn management on top of the search
//!
//! # Quick Start
//!
//! ```
//! use mnk::{GameState, GameTree, Mark, MnkParams, Move, SearchConfig};
//!
//! let params = MnkParams::new(3, 3, 3);
//! let mut engine = GameTree::new(params, Mark::X, SearchConfig::default()).unwrap();
//!
//! // The agent opens in the centre, the opponent answers in a corner
//! engine.generate(Move::new(1, 1, Mark::X)).unwrap();
//! engine.on_opponent_move(Move::new(0, 0, Mark::O)).unwrap();
//!
//! let mv = engine.choose_next_move().unwrap();
//! println!("Agent plays {}", mv.pos);
//! assert_eq!(engine.status(), GameState::Open);
//! ```
//!
//! # Search
//!
//! The tree is built once to a fixed depth and then kept: every real move
//! re-roots it, frees the discarded branches and deepens the surviving
//! leaves by one ply. Move generation only looks at cells adjacent to
//! played ones and stops early once enough urgent candidates are in.

pub mod board;
pub mod config;
pub mod engine;
pub mod error;
pub mod eval;
pub mod rules;
pub mod search;

// Re-export commonly used types for convenience
pub use board::{Board, Mark, MnkParams, Move, Pos};
pub use config::SearchConfig;
pub use engine::GameTree;
pub use error::EngineError;
pub use rules::GameState;
