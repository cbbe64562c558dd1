//! Board occupancy with incremental distance-to-win queries

use std::ops::{Deref, DerefMut};

use super::bitboard::Bitboard;
use super::{Mark, MnkParams, Pos};
use crate::rules::{self, GameState};

/// Live board for an (M,N,K) game.
///
/// Besides occupancy, the board answers "how many more own marks complete
/// a K-run through this cell". Distances are computed on demand by
/// [`Board::refresh_distance_at`] and cached until the next mutation.
#[derive(Debug, Clone)]
pub struct Board {
    params: MnkParams,
    /// X marks bitboard
    x: Bitboard,
    /// O marks bitboard
    o: Bitboard,
    /// Cached distance per cell, indexed by [`Mark::slot`]
    distances: Vec<[u32; 2]>,
    /// Mutation epoch each cached distance was computed at
    stamps: Vec<u64>,
    epoch: u64,
}

impl Board {
    pub fn new(params: MnkParams) -> Self {
        let cells = params.cells();
        Self {
            params,
            x: Bitboard::new(cells),
            o: Bitboard::new(cells),
            distances: vec![[0; 2]; cells],
            stamps: vec![u64::MAX; cells],
            epoch: 0,
        }
    }

    #[inline]
    pub fn params(&self) -> &MnkParams {
        &self.params
    }

    /// Get mark at position
    #[inline]
    pub fn get(&self, pos: Pos) -> Mark {
        let idx = self.params.to_index(pos);
        if self.x.get(idx) {
            Mark::X
        } else if self.o.get(idx) {
            Mark::O
        } else {
            Mark::Empty
        }
    }

    /// Check if position is free
    #[inline]
    pub fn is_free(&self, pos: Pos) -> bool {
        let idx = self.params.to_index(pos);
        !self.x.get(idx) && !self.o.get(idx)
    }

    /// Place a mark on a free cell
    #[inline]
    pub fn place(&mut self, pos: Pos, mark: Mark) {
        debug_assert!(self.is_free(pos), "place on occupied cell {pos}");
        let idx = self.params.to_index(pos);
        match mark {
            Mark::X => self.x.set(idx),
            Mark::O => self.o.set(idx),
            Mark::Empty => return,
        }
        self.epoch += 1;
    }

    /// Remove a mark
    #[inline]
    pub fn remove(&mut self, pos: Pos) {
        debug_assert!(!self.is_free(pos), "remove on free cell {pos}");
        let idx = self.params.to_index(pos);
        self.x.clear(idx);
        self.o.clear(idx);
        self.epoch += 1;
    }

    /// Place a mark that is removed again when the guard drops.
    pub fn place_guarded(&mut self, pos: Pos, mark: Mark) -> CellGuard<'_> {
        self.place(pos, mark);
        CellGuard {
            board: self,
            pos,
            restore: Mark::Empty,
        }
    }

    /// Lift a mark off the board; it is put back when the guard drops.
    pub fn lift_guarded(&mut self, pos: Pos) -> CellGuard<'_> {
        let restore = self.get(pos);
        self.remove(pos);
        CellGuard {
            board: self,
            pos,
            restore,
        }
    }

    /// Marks of one player (returns None for Empty)
    #[inline]
    pub fn marks(&self, mark: Mark) -> Option<&Bitboard> {
        match mark {
            Mark::X => Some(&self.x),
            Mark::O => Some(&self.o),
            Mark::Empty => None,
        }
    }

    /// Total marks on board
    #[inline]
    pub fn stone_count(&self) -> u32 {
        self.x.count() + self.o.count()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.stone_count() as usize == self.params.cells()
    }

    #[inline]
    pub fn is_board_empty(&self) -> bool {
        self.x.is_empty() && self.o.is_empty()
    }

    /// Game state judged from the mark standing on `pos`.
    ///
    /// Only lines through `pos` are inspected, so this is exact as long as
    /// `pos` holds the most recent move of a game that was open before it.
    pub fn exact_status(&self, pos: Pos) -> GameState {
        rules::status_at(self, pos)
    }

    /// Recompute the cached distances of `pos` for both players.
    pub fn refresh_distance_at(&mut self, pos: Pos) {
        let idx = self.params.to_index(pos);
        self.distances[idx] = [
            rules::moves_to_win(self, pos, Mark::X),
            rules::moves_to_win(self, pos, Mark::O),
        ];
        self.stamps[idx] = self.epoch;
    }

    /// Cached distance of `pos` for `mark`.
    ///
    /// Must follow [`Board::refresh_distance_at`] for the same cell with no
    /// mutation in between. `K + 1` means no K-run can pass through `pos`.
    #[inline]
    pub fn moves_to_win(&self, pos: Pos, mark: Mark) -> u32 {
        let idx = self.params.to_index(pos);
        debug_assert_eq!(
            self.stamps[idx], self.epoch,
            "distance at {pos} read without refresh"
        );
        self.distances[idx][mark.slot()]
    }
}

/// Scoped cell mutation. Restores the cell to its prior content on drop,
/// including early returns and unwinding.
pub struct CellGuard<'a> {
    board: &'a mut Board,
    pos: Pos,
    restore: Mark,
}

impl Deref for CellGuard<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        self.board
    }
}

impl DerefMut for CellGuard<'_> {
    fn deref_mut(&mut self) -> &mut Board {
        self.board
    }
}

impl Drop for CellGuard<'_> {
    fn drop(&mut self) {
        match self.restore {
            Mark::Empty => self.board.remove(self.pos),
            mark => self.board.place(self.pos, mark),
        }
    }
}
