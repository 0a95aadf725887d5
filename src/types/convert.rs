//! Conversion traits between our types and the `chess` crate's types.
//!
//! Both use A1=0, H8=63 square ordering and the same piece order, so the
//! conversions are index copies.

use super::{Color, Kind, Square};
use chess::{Color as ChessColor, File, Piece as ChessPiece, Rank, Square as ChessSquare};

/// Trait for converting our types to `chess` crate types.
pub trait ToChess {
    type Output;
    fn to_chess(self) -> Self::Output;
}

/// Trait for converting `chess` crate types back to ours.
pub trait FromChess<T> {
    fn from_chess(value: T) -> Self;
}

impl ToChess for Square {
    type Output = ChessSquare;

    #[inline]
    fn to_chess(self) -> ChessSquare {
        ChessSquare::make_square(
            Rank::from_index(self.rank() as usize),
            File::from_index(self.file() as usize),
        )
    }
}

impl FromChess<ChessSquare> for Square {
    #[inline]
    fn from_chess(sq: ChessSquare) -> Self {
        Square::at(sq.get_rank().to_index() as u8, sq.get_file().to_index() as u8)
    }
}

impl ToChess for Kind {
    type Output = ChessPiece;

    #[inline]
    fn to_chess(self) -> ChessPiece {
        match self {
            Kind::Pawn => ChessPiece::Pawn,
            Kind::Knight => ChessPiece::Knight,
            Kind::Bishop => ChessPiece::Bishop,
            Kind::Rook => ChessPiece::Rook,
            Kind::Queen => ChessPiece::Queen,
            Kind::King => ChessPiece::King,
        }
    }
}

impl FromChess<ChessPiece> for Kind {
    #[inline]
    fn from_chess(piece: ChessPiece) -> Self {
        match piece {
            ChessPiece::Pawn => Kind::Pawn,
            ChessPiece::Knight => Kind::Knight,
            ChessPiece::Bishop => Kind::Bishop,
            ChessPiece::Rook => Kind::Rook,
            ChessPiece::Queen => Kind::Queen,
            ChessPiece::King => Kind::King,
        }
    }
}

impl ToChess for Color {
    type Output = ChessColor;

    #[inline]
    fn to_chess(self) -> ChessColor {
        match self {
            Color::Light => ChessColor::White,
            Color::Dark => ChessColor::Black,
        }
    }
}

impl FromChess<ChessColor> for Color {
    #[inline]
    fn from_chess(color: ChessColor) -> Self {
        match color {
            ChessColor::White => Color::Light,
            ChessColor::Black => Color::Dark,
        }
    }
}
