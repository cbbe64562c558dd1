//! Distance-to-win through a single cell

use crate::board::{Board, Mark, Pos};

use super::DIRECTIONS;

/// Minimum number of additional `mark` placements that complete a K-run
/// through `pos`.
///
/// Every window of K consecutive cells containing `pos` and free of
/// opponent marks is a candidate; its cost is the number of free cells it
/// still holds. Returns `K + 1` when no window qualifies.
pub fn moves_to_win(board: &Board, pos: Pos, mark: Mark) -> u32 {
    let params = board.params();
    let k = i32::from(params.k);
    let unreachable = u32::from(params.k) + 1;
    let opponent = mark.opponent();

    let mut best = unreachable;
    for &(dr, dc) in &DIRECTIONS {
        // `shift` = how many cells of the window lie before `pos`
        'window: for shift in 0..k {
            let mut free = 0;
            for i in -shift..(k - shift) {
                let Some(cell) = pos.offset(dr * i, dc * i, params) else {
                    continue 'window;
                };
                match board.get(cell) {
                    Mark::Empty => free += 1,
                    m if m == opponent => continue 'window,
                    _ => {}
                }
            }
            best = best.min(free);
        }
    }
    best
}
