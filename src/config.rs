//! Search configuration parameters.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Configuration for tree construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Plies built below a freshly created root.
    /// Re-rooting keeps the live subtree at this depth by extending
    /// every leaf one ply after each move.
    pub max_depth: u8,

    /// Children always generated at a node before forward pruning may
    /// stop the expansion.
    pub min_eval: usize,

    /// Once `min_eval` children exist, stop at the first candidate whose
    /// urgency exceeds this threshold.
    pub score_threshold: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: 6,
            min_eval: 5,
            score_threshold: 2,
        }
    }
}

impl SearchConfig {
    /// No forward pruning: every adjacent candidate is expanded.
    /// Only practical on small boards.
    pub fn exhaustive(max_depth: u8) -> Self {
        Self {
            max_depth,
            min_eval: usize::MAX,
            score_threshold: u32::MAX,
        }
    }

    /// Create a shallow config for testing.
    pub fn for_testing() -> Self {
        Self {
            max_depth: 3,
            ..Self::default()
        }
    }

    /// Builder pattern: set maximum depth.
    pub fn with_max_depth(mut self, depth: u8) -> Self {
        self.max_depth = depth;
        self
    }

    /// Builder pattern: set minimum children per node.
    pub fn with_min_eval(mut self, min_eval: usize) -> Self {
        self.min_eval = min_eval;
        self
    }

    /// Builder pattern: set forward-pruning threshold.
    pub fn with_score_threshold(mut self, threshold: u32) -> Self {
        self.score_threshold = threshold;
        self
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if self.max_depth == 0 {
            return Err(EngineError::InvalidConfig(
                "max_depth must be at least 1".into(),
            ));
        }
        if self.min_eval == 0 {
            return Err(EngineError::InvalidConfig(
                "min_eval must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
