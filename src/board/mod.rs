//! Board model.
//!
//! An immutable 8x8 grid of optional pieces. Every change produces a new
//! `Board`, so earlier snapshots stay valid for inspection.
//!
//! The board knows nothing about turns, ownership or legality; the
//! [`crate::session::Session`] layers those on top.

use crate::error::BoardError;
use crate::types::{Color, Kind, Piece, Square, BACK_RANK};
use std::fmt;

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    squares: [Option<Piece>; 64],
}

impl Board {
    /// Standard starting layout, mirrored across the midline.
    pub fn initial() -> Self {
        let mut squares = [None; 64];
        for color in Color::BOTH {
            for (file, &kind) in BACK_RANK.iter().enumerate() {
                let sq = Square::at(color.home_rank(), file as u8);
                squares[sq.index()] = Some(Piece::new(kind, color));
            }
            for file in 0..8 {
                let sq = Square::at(color.pawn_rank(), file);
                squares[sq.index()] = Some(Piece::new(Kind::Pawn, color));
            }
        }
        Board { squares }
    }

    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.squares[sq.index()]
    }

    /// Whether `sq` holds a piece of `color`
    #[inline]
    pub fn is_occupied_by(&self, sq: Square, color: Color) -> bool {
        matches!(self.piece_at(sq), Some(p) if p.color == color)
    }

    /// Move the piece on `from` to `to`, removing whatever stood on `to`.
    ///
    /// The moving piece keeps its kind. Promotion is applied separately
    /// with [`Board::with_piece`].
    pub fn with_move(&self, from: Square, to: Square) -> Result<Board, BoardError> {
        let piece = self.piece_at(from).ok_or(BoardError::EmptySquare(from))?;
        let mut next = *self;
        next.squares[from.index()] = None;
        next.squares[to.index()] = Some(piece);
        Ok(next)
    }

    /// Replace the contents of one square.
    pub(crate) fn with_piece(&self, sq: Square, piece: Option<Piece>) -> Board {
        let mut next = *self;
        next.squares[sq.index()] = piece;
        next
    }

    /// Occupied squares from a1 to h8
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| self.piece_at(sq).map(|p| (sq, p)))
    }

    /// Number of live pieces matching color and kind
    pub fn count(&self, color: Color, kind: Kind) -> usize {
        self.squares
            .iter()
            .flatten()
            .filter(|p| p.color == color && p.kind == kind)
            .count()
    }

    /// Piece placement field of a FEN string, rank 8 first.
    pub fn placement(&self) -> String {
        let mut out = String::with_capacity(72);
        for rank in (0..8).rev() {
            let mut empty = 0;
            for file in 0..8 {
                match self.piece_at(Square::at(rank, file)) {
                    Some(p) => {
                        if empty > 0 {
                            out.push((b'0' + empty) as char);
                            empty = 0;
                        }
                        out.push(p.to_char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                out.push((b'0' + empty) as char);
            }
            if rank > 0 {
                out.push('/');
            }
        }
        out
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::initial()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  +-----------------+")?;
        for rank in (0..8u8).rev() {
            write!(f, "{} |", rank + 1)?;
            for file in 0..8 {
                match self.piece_at(Square::at(rank, file)) {
                    Some(p) => write!(f, " {}", p)?,
                    None => write!(f, " .")?,
                }
            }
            writeln!(f, " |")?;
        }
        writeln!(f, "  +-----------------+")?;
        write!(f, "    a b c d e f g h")
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board({})", self.placement())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    #[test]
    fn test_initial_layout() {
        let board = Board::initial();
        assert_eq!(
            board.placement(),
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR"
        );
        assert_eq!(board.piece_at(sq("e1")), Some(Piece::new(Kind::King, Color::Light)));
        assert_eq!(board.piece_at(sq("d8")), Some(Piece::new(Kind::Queen, Color::Dark)));
        assert_eq!(board.piece_at(sq("e4")), None);
        assert_eq!(board.pieces().count(), 32);
    }

    #[test]
    fn test_initial_counts() {
        let board = Board::initial();
        for color in Color::BOTH {
            assert_eq!(board.count(color, Kind::Pawn), 8);
            assert_eq!(board.count(color, Kind::Knight), 2);
            assert_eq!(board.count(color, Kind::Bishop), 2);
            assert_eq!(board.count(color, Kind::Rook), 2);
            assert_eq!(board.count(color, Kind::Queen), 1);
            assert_eq!(board.count(color, Kind::King), 1);
        }
    }

    #[test]
    fn test_with_move_leaves_snapshot_intact() {
        let before = Board::initial();
        let after = before.with_move(sq("e2"), sq("e4")).unwrap();
        assert_eq!(before, Board::initial());
        assert_eq!(after.piece_at(sq("e2")), None);
        assert_eq!(after.piece_at(sq("e4")), Some(Piece::new(Kind::Pawn, Color::Light)));
    }

    #[test]
    fn test_with_move_captures_implicitly() {
        let board = Board::initial().with_move(sq("a1"), sq("a7")).unwrap();
        assert_eq!(board.piece_at(sq("a7")), Some(Piece::new(Kind::Rook, Color::Light)));
        assert_eq!(board.count(Color::Dark, Kind::Pawn), 7);
        assert_eq!(board.pieces().count(), 31);
    }

    #[test]
    fn test_with_move_from_empty_square() {
        let board = Board::initial();
        assert_eq!(
            board.with_move(sq("e4"), sq("e5")),
            Err(BoardError::EmptySquare(sq("e4")))
        );
    }

    #[test]
    fn test_display_grid() {
        let text = Board::initial().to_string();
        assert!(text.starts_with("  +"));
        assert!(text.contains("8 | r n b q k b n r |"));
        assert!(text.contains("1 | R N B Q K B N R |"));
    }
}
