//! Square and move types.

use crate::error::BoardError;
use std::fmt;
use std::str::FromStr;

/// A board square. Always in range once constructed.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Square(u8);

impl Square {
    /// Checked constructor. Out-of-range coordinates are a caller bug and
    /// come back as [`BoardError::InvalidSquare`].
    pub fn new(rank: u8, file: u8) -> Result<Self, BoardError> {
        if rank > 7 || file > 7 {
            debug_assert!(false, "square out of range: rank {} file {}", rank, file);
            return Err(BoardError::InvalidSquare { rank, file });
        }
        Ok(Square(rank * 8 + file))
    }

    /// Constructor for coordinates already known to be in range
    #[inline]
    pub(crate) const fn at(rank: u8, file: u8) -> Self {
        Square((rank & 7) * 8 + (file & 7))
    }

    #[inline]
    pub const fn rank(self) -> u8 {
        self.0 / 8
    }

    #[inline]
    pub const fn file(self) -> u8 {
        self.0 % 8
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// All 64 squares from a1 to h8
    pub fn all() -> impl Iterator<Item = Square> {
        (0..64u8).map(Square)
    }

    /// True for the a1 colour complex (dark squares on a real board)
    #[inline]
    pub const fn is_dark_complex(self) -> bool {
        (self.rank() + self.file()) % 2 == 0
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = (b'a' + self.file()) as char;
        let rank = (b'1' + self.rank()) as char;
        write!(f, "{}{}", file, rank)
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Square({})", self)
    }
}

impl FromStr for Square {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.trim().as_bytes();
        if bytes.len() != 2 {
            return Err(BoardError::InvalidNotation(s.to_string()));
        }
        let file = bytes[0].to_ascii_lowercase();
        let rank = bytes[1];
        if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
            return Err(BoardError::InvalidNotation(s.to_string()));
        }
        Ok(Square::at(rank - b'1', file - b'a'))
    }
}

/// A (from, to) pair. Carries no promotion piece: promotion always uses
/// [`crate::types::PROMOTION_KIND`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Move {
    pub from: Square,
    pub to: Square,
}

impl Move {
    #[inline]
    pub const fn new(from: Square, to: Square) -> Self {
        Move { from, to }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}

impl FromStr for Move {
    type Err = BoardError;

    /// Parse coordinate notation such as "e2e4". A trailing promotion
    /// letter is accepted and ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if !(4..=5).contains(&s.len()) || !s.is_ascii() {
            return Err(BoardError::InvalidNotation(s.to_string()));
        }
        let from = s[0..2].parse()?;
        let to = s[2..4].parse()?;
        Ok(Move::new(from, to))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_notation() {
        let sq: Square = "e4".parse().unwrap();
        assert_eq!(sq.rank(), 3);
        assert_eq!(sq.file(), 4);
        assert_eq!(sq.to_string(), "e4");
        assert_eq!(Square::at(0, 0).to_string(), "a1");
        assert_eq!(Square::at(7, 7).index(), 63);
    }

    #[test]
    fn test_bad_notation() {
        assert!("i1".parse::<Square>().is_err());
        assert!("a9".parse::<Square>().is_err());
        assert!("e".parse::<Square>().is_err());
        assert!("e2e".parse::<Move>().is_err());
    }

    #[test]
    #[cfg(not(debug_assertions))]
    fn test_out_of_range_square() {
        assert_eq!(
            Square::new(8, 0),
            Err(BoardError::InvalidSquare { rank: 8, file: 0 })
        );
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "square out of range")]
    fn test_out_of_range_square_is_loud_in_debug() {
        let _ = Square::new(0, 8);
    }

    #[test]
    fn test_move_notation() {
        let m: Move = "e7e8q".parse().unwrap();
        assert_eq!(m.from.to_string(), "e7");
        assert_eq!(m.to.to_string(), "e8");
        assert_eq!(m.to_string(), "e7e8");
    }
}
