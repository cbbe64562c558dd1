//! Terminal scores
//!
//! A heuristic leaf value always lies strictly inside `(-K, K)`, so the
//! terminal magnitudes `K + 1` dominate any static estimate.

use crate::board::Mark;
use crate::rules::GameState;

/// Score table for one win length, always from the agent's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scores {
    /// Agent completed a K-run
    pub win: i32,
    /// Opponent completed a K-run
    pub loss: i32,
    /// Board full without a run
    pub draw: i32,
}

impl Scores {
    pub fn for_target(k: u16) -> Self {
        let win = i32::from(k) + 1;
        Self {
            win,
            loss: -win,
            draw: 0,
        }
    }

    /// Score of a finished game. `Open` has no terminal score.
    pub fn terminal_value(&self, state: GameState, agent: Mark) -> Option<i32> {
        match state {
            GameState::Open => None,
            GameState::Won(mark) if mark == agent => Some(self.win),
            GameState::Won(_) => Some(self.loss),
            GameState::Draw => Some(self.draw),
        }
    }
}
