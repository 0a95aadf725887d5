//! Move legality oracles.
//!
//! An [`Oracle`] answers which (from, to) pairs a side may play and whether
//! the game has ended. The session works with any implementation:
//! - [`NullOracle`]: every own piece may go anywhere, games never end
//! - [`RulesOracle`]: full chess rules backed by the `chess` crate
//!
//! Oracles that need game history (castling rights, repetition, the
//! fifty-move clock) keep it themselves through [`Oracle::record`] and
//! [`Oracle::reset`].

mod null;
mod rules;

pub use null::NullOracle;
pub use rules::RulesOracle;

use crate::board::Board;
use crate::types::{Color, Kind, Move, Square};

/// Raw game-state verdict. The winner is attached later by
/// [`crate::status::classify`].
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Verdict {
    Ongoing,
    /// Side to move is mated
    Checkmate,
    Draw(DrawReason),
    /// Game over for a reason outside the usual results
    Other,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum DrawReason {
    Stalemate,
    Repetition,
    FiftyMoves,
    InsufficientMaterial,
}

/// Extra board change that accompanies a move.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Companion {
    /// Castling: the rook hops over the king
    Relocate { from: Square, to: Square },
    /// En passant: the passed pawn leaves the board
    Remove(Square),
}

pub trait Oracle {
    /// Short name for logs
    fn name(&self) -> &'static str;

    /// Every (from, to) pair `color` may play on `board`
    fn legal_moves(&self, board: &Board, color: Color) -> Vec<Move>;

    fn is_legal(&self, board: &Board, color: Color, mv: Move) -> bool {
        self.legal_moves(board, color).contains(&mv)
    }

    /// Verdict for `board` with `to_move` on turn
    fn classify(&self, board: &Board, to_move: Color) -> Verdict;

    /// Side effect of `mv` beyond moving one piece, if any
    fn companion(&self, _board: &Board, _mv: Move) -> Option<Companion> {
        None
    }

    /// Called once per committed move. `after` already includes the
    /// companion change and any promotion.
    fn record(&mut self, _after: &Board, _mv: Move, _promotion: Option<Kind>) {}

    /// Forget all history; the next board is the starting layout
    fn reset(&mut self) {}
}

impl<O: Oracle + ?Sized> Oracle for Box<O> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn legal_moves(&self, board: &Board, color: Color) -> Vec<Move> {
        (**self).legal_moves(board, color)
    }

    fn is_legal(&self, board: &Board, color: Color, mv: Move) -> bool {
        (**self).is_legal(board, color, mv)
    }

    fn classify(&self, board: &Board, to_move: Color) -> Verdict {
        (**self).classify(board, to_move)
    }

    fn companion(&self, board: &Board, mv: Move) -> Option<Companion> {
        (**self).companion(board, mv)
    }

    fn record(&mut self, after: &Board, mv: Move, promotion: Option<Kind>) {
        (**self).record(after, mv, promotion)
    }

    fn reset(&mut self) {
        (**self).reset()
    }
}
