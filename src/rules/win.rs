//! Win and draw detection
//!
//! A player wins with K or more of their marks in a row, horizontally,
//! vertically or on either diagonal. A full board without such a run is
//! a draw.

use serde::{Deserialize, Serialize};

use crate::board::{Board, Mark, Pos};

use super::DIRECTIONS;

/// Outcome of a position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    Open,
    Won(Mark),
    Draw,
}

impl GameState {
    #[inline]
    pub fn is_over(self) -> bool {
        self != GameState::Open
    }
}

/// Count marks equal to `mark` walking from `pos` in one direction,
/// not counting `pos` itself.
#[inline]
fn run_length(board: &Board, pos: Pos, dr: i32, dc: i32, mark: Mark) -> u32 {
    let params = board.params();
    let mut count = 0;
    let mut cur = pos;
    while let Some(next) = cur.offset(dr, dc, params) {
        if board.get(next) != mark {
            break;
        }
        count += 1;
        cur = next;
    }
    count
}

/// Fast status check at a specific position.
///
/// Only checks the 4 lines through `pos`, judged for the mark standing on
/// it. An empty `pos` is reported as `Open` unless the board is full.
pub fn status_at(board: &Board, pos: Pos) -> GameState {
    let mark = board.get(pos);
    if mark != Mark::Empty {
        let k = u32::from(board.params().k);
        for &(dr, dc) in &DIRECTIONS {
            let aligned =
                1 + run_length(board, pos, dr, dc, mark) + run_length(board, pos, -dr, -dc, mark);
            if aligned >= k {
                return GameState::Won(mark);
            }
        }
    }

    if board.is_full() {
        GameState::Draw
    } else {
        GameState::Open
    }
}

/// Scan the whole board for a K-run.
///
/// O(cells * K). Used to validate [`status_at`]; the search never calls it.
pub fn find_winner(board: &Board) -> GameState {
    let params = *board.params();
    let k = i32::from(params.k);

    for pos in params.positions() {
        let mark = board.get(pos);
        if mark == Mark::Empty {
            continue;
        }
        for &(dr, dc) in &DIRECTIONS {
            let complete = (1..k).all(|i| {
                pos.offset(dr * i, dc * i, &params)
                    .is_some_and(|p| board.get(p) == mark)
            });
            if complete {
                return GameState::Won(mark);
            }
        }
    }

    if board.is_full() {
        GameState::Draw
    } else {
        GameState::Open
    }
}
