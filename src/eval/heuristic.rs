//! Static evaluation at depth-exhausted nodes
//!
//! The value of a leaf looks only at the cell of its own move: with that
//! mark lifted, how close is each player to a K-run through the cell?
//! The player closer to completion owns the sign.

use crate::board::{Board, Mark, Move};

/// Evaluate the leaf reached by `mv` from the agent's perspective.
///
/// Returns `K - d_agent` when the agent is strictly closer to a run
/// through `mv.pos`, otherwise `-(K - d_opponent)`. Distances are clamped
/// to K, so the result stays in `(-K, K)`.
///
/// The board is left exactly as it was found.
#[must_use]
pub fn leaf_value(board: &mut Board, mv: Move, agent: Mark) -> i32 {
    let k = u32::from(board.params().k);
    let pos = mv.pos;

    let (agent_dist, opp_dist) = {
        let mut lifted = board.lift_guarded(pos);
        lifted.refresh_distance_at(pos);
        (
            lifted.moves_to_win(pos, agent),
            lifted.moves_to_win(pos, agent.opponent()),
        )
    };

    #[allow(clippy::cast_possible_wrap)]
    let agent_score = (k - agent_dist.min(k)) as i32;
    #[allow(clippy::cast_possible_wrap)]
    let opp_score = (k - opp_dist.min(k)) as i32;

    if agent_score > opp_score {
        agent_score
    } else {
        -opp_score
    }
}
