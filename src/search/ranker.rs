//! Candidate move generation and ordering
//!
//! Only free cells next to an already played cell are considered: on a
//! large board nothing else can matter for a K-run in the near term.
//! Every played cell on the path from the node back to the first move
//! contributes its 8 neighbours.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use crate::board::{Bitboard, Board, Mark, Pos};

use super::node::NodeId;
use super::tree::Tree;

/// Neighbour offsets (8 directions)
const NEIGHBOURS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// A scored candidate cell. Lower urgency is more pressing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub pos: Pos,
    /// Fewest moves either player needs to complete a run through `pos`
    pub urgency: u32,
    /// Moves the player about to move needs through `pos`
    pub mover_distance: u32,
    /// Discovery order, last tie-break
    seq: u32,
}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.urgency, self.mover_distance, self.seq).cmp(&(
            other.urgency,
            other.mover_distance,
            other.seq,
        ))
    }
}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Candidates of one node, handed out most urgent first.
///
/// Consumed on demand; once popped a candidate is gone.
#[derive(Debug, Default)]
pub struct Candidates {
    heap: BinaryHeap<Reverse<Candidate>>,
}

impl Candidates {
    /// Collect and score the candidates for the children of `node`.
    ///
    /// `board` must hold every move on the path from `node` to the first move.
    pub fn rank(tree: &Tree, node: NodeId, board: &mut Board, mover: Mark) -> Self {
        let params = *board.params();
        let mut visited = Bitboard::new(params.cells());
        let mut heap = BinaryHeap::new();
        let mut seq = 0u32;

        for id in tree.ancestors(node) {
            let played = tree.get(id).mv.pos;
            for &(dr, dc) in &NEIGHBOURS {
                let Some(pos) = played.offset(dr, dc, &params) else {
                    continue;
                };
                let idx = params.to_index(pos);
                if visited.get(idx) || !board.is_free(pos) {
                    continue;
                }
                visited.set(idx);

                board.refresh_distance_at(pos);
                let mover_distance = board.moves_to_win(pos, mover);
                let urgency = mover_distance.min(board.moves_to_win(pos, mover.opponent()));

                heap.push(Reverse(Candidate {
                    pos,
                    urgency,
                    mover_distance,
                    seq,
                }));
                seq += 1;
            }
        }

        Self { heap }
    }

    /// Look at the most urgent candidate without consuming it.
    #[inline]
    pub fn peek(&self) -> Option<&Candidate> {
        self.heap.peek().map(|Reverse(c)| c)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

impl Iterator for Candidates {
    type Item = Candidate;

    fn next(&mut self) -> Option<Candidate> {
        self.heap.pop().map(|Reverse(c)| c)
    }
}
