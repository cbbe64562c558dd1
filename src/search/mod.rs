//! Search module for (M,N,K) games
//!
//! Contains:
//! - Arena-allocated game tree kept alive across turns
//! - Candidate ranking by distance-to-win with forward pruning
//! - Alpha-beta valuation of the stored tree

pub mod alphabeta;
pub mod node;
pub mod ranker;
pub mod tree;

pub use alphabeta::{SearchStats, Searcher};
pub use node::{NodeId, TreeNode};
pub use ranker::{Candidate, Candidates};
pub use tree::{Tree, TreeStats};
