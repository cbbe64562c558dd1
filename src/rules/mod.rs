//! Game rules for (M,N,K) games
//!
//! This module implements:
//! - Terminal-state detection through a just-placed cell
//! - Brute-force winner scan (ground truth for the incremental check)
//! - Distance-to-win through a cell

pub mod distance;
pub mod win;

// Re-exports for convenient access
pub use distance::moves_to_win;
pub use win::{find_winner, status_at, GameState};

/// Direction vectors for line checking (4 directions)
pub(crate) const DIRECTIONS: [(i32, i32); 4] = [
    (0, 1),  // Horizontal
    (1, 0),  // Vertical
    (1, 1),  // Diagonal SE
    (1, -1), // Diagonal SW
];
