//! Full chess rules backed by the `chess` crate.
//!
//! The oracle mirrors the session's board in a `chess::Board`, which carries
//! castling rights and the en passant square. Alongside it we keep the
//! position-hash history for repetition detection and the half-move clock
//! for the fifty-move rule.
//!
//! When the session hands over a board that does not match the tracked
//! position (for example a host that rebuilt its board), the position is
//! rebuilt from piece placement with no castling or en passant rights and
//! no history.

use super::{Companion, DrawReason, Oracle, Verdict};
use crate::board::Board;
use crate::types::{Color, FromChess, Kind, Move, Square, ToChess};
use chess::{
    Board as Position, BoardStatus, ChessMove, Color as ChessColor, MoveGen, Piece as ChessPiece,
};
use std::str::FromStr;

/// Half-moves without a pawn move or capture before the game is drawn
pub const FIFTY_MOVE_PLIES: u32 = 100;

/// Occurrences of one position that draw the game
pub const REPETITION_COUNT: usize = 3;

#[derive(Clone, Debug)]
pub struct RulesOracle {
    /// Tracked position after the last recorded move
    position: Position,
    /// Hash of every position since the last reset, current one last
    history: Vec<u64>,
    /// Plies since the last pawn move or capture
    halfmove_clock: u32,
}

impl Default for RulesOracle {
    fn default() -> Self {
        Self::new()
    }
}

impl RulesOracle {
    pub fn new() -> Self {
        let position = Position::default();
        Self {
            position,
            history: vec![position.get_hash()],
            halfmove_clock: 0,
        }
    }

    /// Whether the tracked position is the one on `board` with `color` to move
    fn is_tracked(&self, board: &Board, color: Color) -> bool {
        self.position.side_to_move() == color.to_chess()
            && Square::all().all(|sq| {
                let ours = board.piece_at(sq);
                let theirs = self
                    .position
                    .piece_on(sq.to_chess())
                    .zip(self.position.color_on(sq.to_chess()));
                match (ours, theirs) {
                    (None, None) => true,
                    (Some(p), Some((kind, color))) => {
                        p.kind == Kind::from_chess(kind) && p.color == Color::from_chess(color)
                    }
                    _ => false,
                }
            })
    }

    /// Position for `board` with `color` to move, or `None` if it is not a
    /// valid chess position.
    fn position_for(&self, board: &Board, color: Color) -> Option<Position> {
        if self.is_tracked(board, color) {
            return Some(self.position);
        }
        from_placement(board, color)
    }

    fn repetitions(&self) -> usize {
        let current = self.position.get_hash();
        self.history.iter().filter(|&&h| h == current).count()
    }
}

impl Oracle for RulesOracle {
    fn name(&self) -> &'static str {
        "strict"
    }

    fn legal_moves(&self, board: &Board, color: Color) -> Vec<Move> {
        let Some(position) = self.position_for(board, color) else {
            return Vec::new();
        };
        let mut moves: Vec<Move> = MoveGen::new_legal(&position)
            .map(|m| {
                Move::new(Square::from_chess(m.get_source()), Square::from_chess(m.get_dest()))
            })
            .collect();
        // Promotions come in four flavours per (from, to)
        moves.sort_by_key(|m| (m.from, m.to));
        moves.dedup();
        moves
    }

    fn is_legal(&self, board: &Board, color: Color, mv: Move) -> bool {
        self.position_for(board, color)
            .and_then(|position| find_move(&position, mv))
            .is_some()
    }

    fn classify(&self, board: &Board, to_move: Color) -> Verdict {
        let Some(position) = self.position_for(board, to_move) else {
            return Verdict::Other;
        };
        match position.status() {
            BoardStatus::Checkmate => return Verdict::Checkmate,
            BoardStatus::Stalemate => return Verdict::Draw(DrawReason::Stalemate),
            BoardStatus::Ongoing => {}
        }
        if self.is_tracked(board, to_move) {
            if self.repetitions() >= REPETITION_COUNT {
                return Verdict::Draw(DrawReason::Repetition);
            }
            if self.halfmove_clock >= FIFTY_MOVE_PLIES {
                return Verdict::Draw(DrawReason::FiftyMoves);
            }
        }
        if insufficient_material(&position) {
            return Verdict::Draw(DrawReason::InsufficientMaterial);
        }
        Verdict::Ongoing
    }

    fn companion(&self, board: &Board, mv: Move) -> Option<Companion> {
        let piece = board.piece_at(mv.from)?;
        let file_shift = mv.to.file() as i8 - mv.from.file() as i8;
        match piece.kind {
            Kind::King if file_shift.abs() == 2 => {
                let rank = mv.from.rank();
                let (rook_from, rook_to) = if file_shift > 0 { (7, 5) } else { (0, 3) };
                Some(Companion::Relocate {
                    from: Square::at(rank, rook_from),
                    to: Square::at(rank, rook_to),
                })
            }
            Kind::Pawn if file_shift != 0 && board.piece_at(mv.to).is_none() => {
                Some(Companion::Remove(Square::at(mv.from.rank(), mv.to.file())))
            }
            _ => None,
        }
    }

    fn record(&mut self, after: &Board, mv: Move, promotion: Option<Kind>) {
        let next = Color::from_chess(!self.position.side_to_move());
        let chess_move = ChessMove::new(
            mv.from.to_chess(),
            mv.to.to_chess(),
            promotion.map(ToChess::to_chess),
        );
        if self.position.legal(chess_move) {
            let resets_clock = self.position.piece_on(chess_move.get_source())
                == Some(ChessPiece::Pawn)
                || self.position.piece_on(chess_move.get_dest()).is_some();
            self.position = self.position.make_move_new(chess_move);
            self.halfmove_clock = if resets_clock { 0 } else { self.halfmove_clock + 1 };
            self.history.push(self.position.get_hash());
            if self.is_tracked(after, next) {
                return;
            }
        }
        // Out of sync: start over from what the session shows
        self.position = from_placement(after, next).unwrap_or_default();
        self.history = vec![self.position.get_hash()];
        self.halfmove_clock = 0;
    }

    fn reset(&mut self) {
        *self = Self::new();
    }
}

/// Legal move matching (from, to), taking the queen for promotions
fn find_move(position: &Position, mv: Move) -> Option<ChessMove> {
    let (from, to) = (mv.from.to_chess(), mv.to.to_chess());
    MoveGen::new_legal(position)
        .filter(|m| m.get_source() == from && m.get_dest() == to)
        .find(|m| m.get_promotion().is_none() || m.get_promotion() == Some(ChessPiece::Queen))
}

/// Build a position from piece placement alone
fn from_placement(board: &Board, to_move: Color) -> Option<Position> {
    let side = match to_move {
        Color::Light => 'w',
        Color::Dark => 'b',
    };
    let fen = format!("{} {} - - 0 1", board.placement(), side);
    Position::from_str(&fen).ok()
}

/// Neither side can mate: K v K, K+minor v K, or K+B v K+B with both
/// bishops on the same colour complex.
fn insufficient_material(position: &Position) -> bool {
    let heavy = *position.pieces(ChessPiece::Pawn)
        | *position.pieces(ChessPiece::Rook)
        | *position.pieces(ChessPiece::Queen);
    if heavy.popcnt() > 0 {
        return false;
    }
    match position.combined().popcnt() {
        2 | 3 => true,
        4 => {
            let bishops = *position.pieces(ChessPiece::Bishop);
            let white = (bishops & *position.color_combined(ChessColor::White)).popcnt();
            let black = (bishops & *position.color_combined(ChessColor::Black)).popcnt();
            if white != 1 || black != 1 {
                return false;
            }
            let mut complexes = bishops.map(|sq| Square::from_chess(sq).is_dark_complex());
            complexes.next() == complexes.next()
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Piece;

    fn mv(s: &str) -> Move {
        s.parse().unwrap()
    }

    fn position(fen: &str) -> Position {
        Position::from_str(fen).unwrap()
    }

    /// Apply moves the way the session does, returning the board
    fn play(oracle: &mut RulesOracle, moves: &[&str]) -> Board {
        play_from(oracle, Board::initial(), moves)
    }

    fn play_from(oracle: &mut RulesOracle, mut board: Board, moves: &[&str]) -> Board {
        for m in moves {
            let m = mv(m);
            let color = board.piece_at(m.from).unwrap().color;
            assert!(oracle.is_legal(&board, color, m), "{} should be legal", m);
            let companion = oracle.companion(&board, m);
            board = board.with_move(m.from, m.to).unwrap();
            match companion {
                Some(Companion::Relocate { from, to }) => board = board.with_move(from, to).unwrap(),
                Some(Companion::Remove(sq)) => board = board.with_piece(sq, None),
                None => {}
            }
            oracle.record(&board, m, None);
        }
        board
    }

    #[test]
    fn test_initial_legal_moves() {
        let oracle = RulesOracle::new();
        let moves = oracle.legal_moves(&Board::initial(), Color::Light);
        assert_eq!(moves.len(), 20);
        assert!(moves.contains(&mv("e2e4")));
        assert!(moves.contains(&mv("g1f3")));
        assert!(!moves.contains(&mv("e2e5")));
        assert!(oracle.legal_moves(&Board::initial(), Color::Dark).len() == 20);
    }

    #[test]
    fn test_fools_mate() {
        let mut oracle = RulesOracle::new();
        let board = play(&mut oracle, &["f2f3", "e7e5", "g2g4", "d8h4"]);
        assert_eq!(oracle.classify(&board, Color::Light), Verdict::Checkmate);
        assert!(oracle.legal_moves(&board, Color::Light).is_empty());
    }

    #[test]
    fn test_castling_companion() {
        let mut oracle = RulesOracle::new();
        let board = play(&mut oracle, &["e2e4", "e7e5", "g1f3", "b8c6", "f1c4", "g8f6"]);
        assert_eq!(
            oracle.companion(&board, mv("e1g1")),
            Some(Companion::Relocate { from: "h1".parse().unwrap(), to: "f1".parse().unwrap() })
        );
    }

    #[test]
    fn test_castling_keeps_board_in_sync() {
        let mut oracle = RulesOracle::new();
        let board = play(
            &mut oracle,
            &["e2e4", "e7e5", "g1f3", "b8c6", "f1c4", "g8f6", "e1g1"],
        );
        assert_eq!(board.placement(), "r1bqkb1r/pppp1ppp/2n2n2/4p3/2B1P3/5N2/PPPP1PPP/RNBQ1RK1");
        assert!(oracle.is_tracked(&board, Color::Dark));
    }

    #[test]
    fn test_en_passant_companion() {
        let mut oracle = RulesOracle::new();
        let board = play(&mut oracle, &["e2e4", "a7a6", "e4e5", "d7d5", "e5d6"]);
        assert_eq!(board.piece_at("d5".parse().unwrap()), None);
        assert_eq!(board.count(Color::Dark, Kind::Pawn), 7);
        assert!(oracle.is_tracked(&board, Color::Dark));
    }

    #[test]
    fn test_repetition_draw() {
        let mut oracle = RulesOracle::new();
        let board = play(
            &mut oracle,
            &["g1f3", "g8f6", "f3g1", "f6g8", "g1f3", "g8f6", "f3g1", "f6g8"],
        );
        assert_eq!(board, Board::initial());
        assert_eq!(oracle.classify(&board, Color::Light), Verdict::Draw(DrawReason::Repetition));
    }

    #[test]
    fn test_fifty_move_draw() {
        let mut oracle = RulesOracle::new();
        let board = play(&mut oracle, &["g1f3", "g8f6"]);
        assert_eq!(oracle.halfmove_clock, 2);

        // Skip ahead to the last quiet plies before the limit
        oracle.halfmove_clock = FIFTY_MOVE_PLIES - 2;
        let board = play_from(&mut oracle, board, &["b1c3"]);
        assert_eq!(oracle.halfmove_clock, FIFTY_MOVE_PLIES - 1);
        assert_eq!(oracle.classify(&board, Color::Dark), Verdict::Ongoing);

        let board = play_from(&mut oracle, board, &["b8c6"]);
        assert_eq!(oracle.halfmove_clock, FIFTY_MOVE_PLIES);
        assert_eq!(oracle.classify(&board, Color::Light), Verdict::Draw(DrawReason::FiftyMoves));
    }

    #[test]
    fn test_pawn_moves_and_captures_reset_clock() {
        let mut oracle = RulesOracle::new();
        let board = play(&mut oracle, &["g1f3", "g8f6", "b1c3"]);
        assert_eq!(oracle.halfmove_clock, 3);

        let board = play_from(&mut oracle, board, &["e7e5"]);
        assert_eq!(oracle.halfmove_clock, 0);

        let board = play_from(&mut oracle, board, &["f3g1", "b8c6"]);
        assert_eq!(oracle.halfmove_clock, 2);
        oracle.halfmove_clock = FIFTY_MOVE_PLIES - 2;
        let board = play_from(&mut oracle, board, &["c3d5"]);
        assert_eq!(oracle.halfmove_clock, FIFTY_MOVE_PLIES - 1);
        // Knight takes knight on the last ply before the limit
        let board = play_from(&mut oracle, board, &["f6d5"]);
        assert_eq!(oracle.halfmove_clock, 0);
        assert_eq!(oracle.classify(&board, Color::Light), Verdict::Ongoing);
    }

    #[test]
    fn test_untracked_board_is_rebuilt() {
        let oracle = RulesOracle::new();
        // Light king and queen wander without the oracle hearing about it
        let board = Board::initial().with_move(mv("e2e4").from, mv("e2e4").to).unwrap();
        assert!(!oracle.is_tracked(&board, Color::Dark));
        assert_eq!(oracle.legal_moves(&board, Color::Dark).len(), 20);
        assert_eq!(oracle.classify(&board, Color::Dark), Verdict::Ongoing);
    }

    #[test]
    fn test_invalid_position_is_other() {
        let oracle = RulesOracle::new();
        // Light king captured: not a chess position any more
        let board = Board::initial().with_move(mv("d8e1").from, mv("d8e1").to).unwrap();
        assert_eq!(oracle.classify(&board, Color::Light), Verdict::Other);
        assert!(oracle.legal_moves(&board, Color::Light).is_empty());
    }

    #[test]
    fn test_insufficient_material() {
        assert!(insufficient_material(&position("8/8/4k3/8/8/3K4/8/8 w - - 0 1")));
        assert!(insufficient_material(&position("8/8/4k3/8/8/3KN3/8/8 w - - 0 1")));
        // Bishops on c1 and f8 share a colour complex
        assert!(insufficient_material(&position("5b2/8/4k3/8/8/3K4/8/2B5 w - - 0 1")));
        assert!(!insufficient_material(&position("2b5/8/4k3/8/8/3K4/8/2B5 w - - 0 1")));
        assert!(!insufficient_material(&position("8/8/4k3/8/8/3K4/4P3/8 w - - 0 1")));
        assert!(!insufficient_material(&Position::default()));
    }

    #[test]
    fn test_stalemate() {
        let oracle = RulesOracle::new();
        assert_eq!(
            oracle.classify(&board_from_fen_placement("7k/5Q2/6K1/8/8/8/8/8"), Color::Dark),
            Verdict::Draw(DrawReason::Stalemate)
        );
    }

    fn board_from_fen_placement(placement: &str) -> Board {
        let mut board = Board::initial();
        for sq in Square::all() {
            board = board.with_piece(sq, None);
        }
        let pos = position(&format!("{} w - - 0 1", placement));
        for sq in Square::all() {
            let occupant = (pos.piece_on(sq.to_chess()), pos.color_on(sq.to_chess()));
            if let (Some(kind), Some(color)) = occupant {
                let piece = Piece::new(Kind::from_chess(kind), Color::from_chess(color));
                board = board.with_piece(sq, Some(piece));
            }
        }
        board
    }
}
