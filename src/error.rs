//! Engine errors.

use thiserror::Error;

use crate::board::{Mark, Pos};

/// Errors returned by [`crate::GameTree`] operations.
///
/// All of these are caller mistakes: the engine refuses the call and
/// leaves its state untouched.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("Invalid board parameters: {0}")]
    InvalidParams(String),

    #[error("Invalid search configuration: {0}")]
    InvalidConfig(String),

    #[error("No tree yet: generate() has not been called")]
    NotGenerated,

    #[error("Tree already generated")]
    AlreadyGenerated,

    #[error("Cell {0} is outside the board")]
    OutOfBounds(Pos),

    #[error("Cell {0} is already occupied")]
    CellOccupied(Pos),

    #[error("Expected a move by {expected:?}, got {found:?}")]
    WrongMark { expected: Mark, found: Mark },

    #[error("It is not {0:?}'s turn")]
    OutOfTurn(Mark),

    #[error("Game is already over")]
    GameOver,

    #[error("No candidate moves available")]
    NoCandidates,
}
