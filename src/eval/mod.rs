//! Evaluation module for (M,N,K) positions
//!
//! Contains:
//! - Terminal score constants derived from K
//! - Static leaf heuristic driven by the distance-to-win oracle

pub mod heuristic;
pub mod scores;

pub use heuristic::leaf_value;
pub use scores::Scores;
