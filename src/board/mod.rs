//! Board representation for (M,N,K) games

pub mod bitboard;
pub mod board;

#[cfg(test)]
mod tests;

// Re-exports
pub use bitboard::Bitboard;
pub use board::{Board, CellGuard};

use serde::{Deserialize, Serialize};

/// Player marks. `X` always moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mark {
    Empty,
    X,
    O,
}

impl Mark {
    /// Get opponent mark
    #[inline]
    pub fn opponent(self) -> Mark {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
            Mark::Empty => Mark::Empty,
        }
    }

    /// Slot used by per-player tables (`X` = 0, `O` = 1)
    #[inline]
    pub(crate) fn slot(self) -> usize {
        match self {
            Mark::O => 1,
            _ => 0,
        }
    }
}

/// Position on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Pos {
    pub row: u16,
    pub col: u16,
}

impl Pos {
    #[inline]
    pub fn new(row: u16, col: u16) -> Self {
        Self { row, col }
    }

    /// Step by a signed offset, `None` when the result leaves the board.
    #[inline]
    pub fn offset(self, dr: i32, dc: i32, params: &MnkParams) -> Option<Pos> {
        let r = i32::from(self.row) + dr;
        let c = i32::from(self.col) + dc;
        if params.is_valid(r, c) {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            Some(Pos::new(r as u16, c as u16))
        } else {
            None
        }
    }
}

impl std::fmt::Display for Pos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// A played (or tentatively placed) cell.
///
/// Equality is by position only: the mark is implied by ply parity and
/// is carried for convenience.
#[derive(Debug, Clone, Copy, Eq, Serialize, Deserialize)]
pub struct Move {
    pub pos: Pos,
    pub mark: Mark,
}

impl Move {
    #[inline]
    pub fn new(row: u16, col: u16, mark: Mark) -> Self {
        Self {
            pos: Pos::new(row, col),
            mark,
        }
    }

    #[inline]
    pub fn at(pos: Pos, mark: Mark) -> Self {
        Self { pos, mark }
    }
}

impl PartialEq for Move {
    fn eq(&self, other: &Self) -> bool {
        self.pos == other.pos
    }
}

impl std::hash::Hash for Move {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.pos.hash(state);
    }
}

/// Board geometry and win length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MnkParams {
    /// Number of rows (M)
    pub rows: u16,
    /// Number of columns (N)
    pub cols: u16,
    /// Marks in a row needed to win (K)
    pub k: u16,
}

impl MnkParams {
    pub fn new(rows: u16, cols: u16, k: u16) -> Self {
        Self { rows, cols, k }
    }

    /// All three dimensions must be at least one.
    pub fn is_well_formed(&self) -> bool {
        self.rows > 0 && self.cols > 0 && self.k > 0
    }

    #[inline]
    pub fn cells(&self) -> usize {
        usize::from(self.rows) * usize::from(self.cols)
    }

    #[inline]
    pub fn contains(&self, pos: Pos) -> bool {
        pos.row < self.rows && pos.col < self.cols
    }

    #[inline]
    pub fn is_valid(&self, row: i32, col: i32) -> bool {
        row >= 0 && row < i32::from(self.rows) && col >= 0 && col < i32::from(self.cols)
    }

    #[inline]
    pub fn to_index(&self, pos: Pos) -> usize {
        usize::from(pos.row) * usize::from(self.cols) + usize::from(pos.col)
    }

    #[inline]
    pub fn from_index(&self, idx: usize) -> Pos {
        let cols = usize::from(self.cols);
        #[allow(clippy::cast_possible_truncation)]
        Pos::new((idx / cols) as u16, (idx % cols) as u16)
    }

    /// Iterate every cell in row-major order
    pub fn positions(self) -> impl Iterator<Item = Pos> {
        (0..self.cells()).map(move |idx| self.from_index(idx))
    }
}
