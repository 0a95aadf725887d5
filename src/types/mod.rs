//! Core value types shared by the board, session and oracles.
//!
//! Pieces are plain values: two pieces with the same kind and color are
//! indistinguishable, so nothing downstream may rely on piece identity.
//!
//! # Coordinates
//! Rank 0 is light's home rank and file 0 is the a-file. Square indices run
//! `rank * 8 + file`, the same A1=0, H8=63 ordering the `chess` crate uses.

mod square;
mod convert;

pub use square::{Square, Move};
pub use convert::{ToChess, FromChess};

use std::fmt;
use std::ops::Not;

/// Side of the board.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Color {
    /// Moves first, starts on ranks 1 and 2
    Light,
    /// Starts on ranks 7 and 8
    Dark,
}

impl Color {
    pub const BOTH: [Color; 2] = [Color::Light, Color::Dark];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Color::Light => 0,
            Color::Dark => 1,
        }
    }

    /// Rank holding this side's pieces at the start
    #[inline]
    pub const fn home_rank(self) -> u8 {
        match self {
            Color::Light => 0,
            Color::Dark => 7,
        }
    }

    /// Rank holding this side's pawns at the start
    #[inline]
    pub const fn pawn_rank(self) -> u8 {
        match self {
            Color::Light => 1,
            Color::Dark => 6,
        }
    }

    /// The farthest rank, where this side's pawns promote
    #[inline]
    pub const fn promotion_rank(self) -> u8 {
        self.opponent().home_rank()
    }

    #[inline]
    pub const fn opponent(self) -> Color {
        match self {
            Color::Light => Color::Dark,
            Color::Dark => Color::Light,
        }
    }
}

impl Not for Color {
    type Output = Color;

    #[inline]
    fn not(self) -> Color {
        self.opponent()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Light => write!(f, "light"),
            Color::Dark => write!(f, "dark"),
        }
    }
}

/// Piece kind. Declaration order is the accounting order used by
/// [`crate::material`].
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum Kind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl Kind {
    pub const ALL: [Kind; 6] = [
        Kind::Pawn,
        Kind::Knight,
        Kind::Bishop,
        Kind::Rook,
        Kind::Queen,
        Kind::King,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Lowercase letter used in FEN and move notation
    pub const fn to_char(self) -> char {
        match self {
            Kind::Pawn => 'p',
            Kind::Knight => 'n',
            Kind::Bishop => 'b',
            Kind::Rook => 'r',
            Kind::Queen => 'q',
            Kind::King => 'k',
        }
    }

    pub fn from_char(c: char) -> Option<Kind> {
        match c.to_ascii_lowercase() {
            'p' => Some(Kind::Pawn),
            'n' => Some(Kind::Knight),
            'b' => Some(Kind::Bishop),
            'r' => Some(Kind::Rook),
            'q' => Some(Kind::Queen),
            'k' => Some(Kind::King),
            _ => None,
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Kind::Pawn => "pawn",
            Kind::Knight => "knight",
            Kind::Bishop => "bishop",
            Kind::Rook => "rook",
            Kind::Queen => "queen",
            Kind::King => "king",
        };
        f.write_str(name)
    }
}

/// A piece on the board.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Piece {
    pub kind: Kind,
    pub color: Color,
}

impl Piece {
    #[inline]
    pub const fn new(kind: Kind, color: Color) -> Self {
        Piece { kind, color }
    }

    /// FEN letter: uppercase for light, lowercase for dark
    pub fn to_char(self) -> char {
        let c = self.kind.to_char();
        match self.color {
            Color::Light => c.to_ascii_uppercase(),
            Color::Dark => c,
        }
    }

    pub fn from_char(c: char) -> Option<Piece> {
        let kind = Kind::from_char(c)?;
        let color = if c.is_ascii_uppercase() { Color::Light } else { Color::Dark };
        Some(Piece::new(kind, color))
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// Kind a pawn always becomes on its promotion rank. Fixed, not an option.
pub const PROMOTION_KIND: Kind = Kind::Queen;

/// Back rank layout from the a-file to the h-file
pub const BACK_RANK: [Kind; 8] = [
    Kind::Rook,
    Kind::Knight,
    Kind::Bishop,
    Kind::Queen,
    Kind::King,
    Kind::Bishop,
    Kind::Knight,
    Kind::Rook,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_flip() {
        assert_eq!(!Color::Light, Color::Dark);
        assert_eq!(!Color::Dark, Color::Light);
        assert_eq!(Color::Light.promotion_rank(), 7);
        assert_eq!(Color::Dark.promotion_rank(), 0);
    }

    #[test]
    fn test_piece_chars() {
        assert_eq!(Piece::new(Kind::Knight, Color::Light).to_char(), 'N');
        assert_eq!(Piece::new(Kind::Queen, Color::Dark).to_char(), 'q');
        assert_eq!(Piece::from_char('K'), Some(Piece::new(Kind::King, Color::Light)));
        assert_eq!(Piece::from_char('x'), None);
    }

    #[test]
    fn test_kind_order_matches_index() {
        for (i, kind) in Kind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
    }
}
