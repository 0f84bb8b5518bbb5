//! Error types for the oracle crate

use thiserror::Error;

/// Main error type for the oracle crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("cell ({row}, {col}) is out of bounds (rows and columns run 0-2)")]
    OutOfBounds { row: usize, col: usize },

    #[error("cell ({row}, {col}) is already occupied")]
    CellOccupied { row: usize, col: usize },

    #[error("position '{board}' has not been evaluated yet")]
    NotEvaluated { board: String },

    #[error("position '{board}' is still in progress but its children have not been built")]
    MissingChildren { board: String },

    #[error("position '{board}' is terminal; there are no moves to select from")]
    NoMoves { board: String },

    #[error("board layout too short: expected {expected} cells, got {got} in '{layout}'")]
    InvalidBoardLength {
        expected: usize,
        got: usize,
        layout: String,
    },

    #[error("invalid character '{character}' at cell {position} in '{layout}'")]
    InvalidCellCharacter {
        character: char,
        position: usize,
        layout: String,
    },
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;
