//! Game status classification.

use crate::oracle::Verdict;
use crate::types::Color;
use std::fmt;

/// Derived game status. Always recomputed from the board and oracle.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum Status {
    #[default]
    InProgress,
    /// Carries the winner
    Checkmate(Color),
    Draw,
    OtherTerminal,
}

impl Status {
    #[inline]
    pub const fn is_over(self) -> bool {
        !matches!(self, Status::InProgress)
    }
}

/// Combine an oracle verdict with the side to move. A mated side to move
/// means the other side, which just moved, wins.
pub fn classify(verdict: Verdict, to_move: Color) -> Status {
    match verdict {
        Verdict::Ongoing => Status::InProgress,
        Verdict::Checkmate => Status::Checkmate(!to_move),
        Verdict::Draw(_) => Status::Draw,
        Verdict::Other => Status::OtherTerminal,
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::InProgress => write!(f, "In progress"),
            Status::Checkmate(Color::Light) => write!(f, "White Wins!"),
            Status::Checkmate(Color::Dark) => write!(f, "Black Wins!"),
            Status::Draw => write!(f, "Draw!"),
            Status::OtherTerminal => write!(f, "Game Over"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::DrawReason;

    #[test]
    fn test_checkmate_winner_is_last_mover() {
        assert_eq!(classify(Verdict::Checkmate, Color::Dark), Status::Checkmate(Color::Light));
        assert_eq!(classify(Verdict::Checkmate, Color::Light), Status::Checkmate(Color::Dark));
    }

    #[test]
    fn test_non_mate_verdicts() {
        assert_eq!(classify(Verdict::Ongoing, Color::Light), Status::InProgress);
        assert_eq!(classify(Verdict::Draw(DrawReason::Stalemate), Color::Light), Status::Draw);
        assert_eq!(classify(Verdict::Other, Color::Dark), Status::OtherTerminal);
        assert!(!Status::InProgress.is_over());
        assert!(Status::Draw.is_over());
    }

    #[test]
    fn test_display() {
        assert_eq!(Status::Checkmate(Color::Dark).to_string(), "Black Wins!");
        assert_eq!(Status::Draw.to_string(), "Draw!");
        assert_eq!(Status::OtherTerminal.to_string(), "Game Over");
    }
}
