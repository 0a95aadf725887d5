//! Permissive oracle for unvalidated play.

use super::{Oracle, Verdict};
use crate::board::Board;
use crate::types::{Color, Move, Square};

/// Any piece of the side to move may go to any square not holding one of
/// its own pieces. Games never end.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullOracle;

impl Oracle for NullOracle {
    fn name(&self) -> &'static str {
        "none"
    }

    fn legal_moves(&self, board: &Board, color: Color) -> Vec<Move> {
        board
            .pieces()
            .filter(|(_, p)| p.color == color)
            .flat_map(|(from, _)| {
                Square::all()
                    .filter(move |&to| !board.is_occupied_by(to, color))
                    .map(move |to| Move::new(from, to))
            })
            .collect()
    }

    fn is_legal(&self, board: &Board, color: Color, mv: Move) -> bool {
        board.is_occupied_by(mv.from, color) && !board.is_occupied_by(mv.to, color)
    }

    fn classify(&self, _board: &Board, _to_move: Color) -> Verdict {
        Verdict::Ongoing
    }
}
