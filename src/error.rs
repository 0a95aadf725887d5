//! Error types.
//!
//! Only local-contract violations are errors. Illegal moves, wrong-turn
//! selections and clicks after the game has ended are ordinary
//! [`crate::session::Transition`]s with no state change.

use crate::types::Square;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("square out of range: rank {rank}, file {file}")]
    InvalidSquare { rank: u8, file: u8 },

    #[error("invalid square notation: {0}")]
    InvalidNotation(String),

    #[error("no piece on {0}")]
    EmptySquare(Square),
}
