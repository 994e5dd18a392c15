//! Error types for the Minesweeper engine

use crate::Cell;
use thiserror::Error;

/// Main error type for the engine
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    #[error("cell {cell} is out of bounds for a {height}x{width} board")]
    CellOutOfBounds {
        cell: Cell,
        height: usize,
        width: usize,
    },

    #[error("invalid observation at {cell}: {reason}")]
    InvalidObservation { cell: Cell, reason: String },

    /// The knowledge base reached a state no mine layout can satisfy.
    /// Points at a board/observation mismatch upstream.
    #[error("contradictory knowledge: {0}")]
    Contradiction(String),

    #[error("no moves left: every remaining cell is opened or a known mine")]
    NoMovesLeft,

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("game already over")]
    GameOver,
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;
