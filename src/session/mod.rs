//! Click-to-select / click-to-move state machine.
//!
//! A [`Session`] owns one game: the board, the selection, the side to move
//! and the derived status. Each input is processed to completion before the
//! next one; all state for a move is computed first and then swapped in, so
//! a host never observes a half-applied update.
//!
//! Rejected input (empty or enemy square while idle, illegal move, clicks
//! after the game is over, an opponent move for the wrong side) is not an
//! error. It comes back as a [`Transition`] and leaves the session as it was.

use crate::board::Board;
use crate::error::BoardError;
use crate::material::{lost_material, reconciled_lost_material, LostMaterial};
use crate::opponent::Policy;
use crate::oracle::{Companion, NullOracle, Oracle, RulesOracle};
use crate::status::{self, Status};
use crate::types::{Color, Kind, Move, Piece, Square, PROMOTION_KIND};

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum Selection {
    #[default]
    Idle,
    /// Holds a piece of the side to move
    Selected(Square),
}

/// What one input did.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Transition {
    /// Nothing happened
    Ignored,
    Selected(Square),
    Deselected,
    /// Selection moved to another own piece
    Reselected(Square),
    /// The oracle refused the move; selection is kept
    Rejected(Move),
    Committed(Move),
}

impl Transition {
    /// Whether the session changed at all
    pub fn changed(self) -> bool {
        !matches!(self, Transition::Ignored | Transition::Rejected(_))
    }
}

/// Read-only view handed to the host after every event.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Snapshot {
    pub board: Board,
    pub selection: Selection,
    pub active: Color,
    pub status: Status,
    /// Plain count reconstruction
    pub lost: LostMaterial,
    /// Same, with promotions netted out
    pub reconciled: LostMaterial,
}

pub struct Session<O = Box<dyn Oracle>> {
    board: Board,
    selection: Selection,
    turn: Color,
    status: Status,
    /// Piece each promoted pawn became, in order
    promotions: Vec<Piece>,
    /// Committed plies in order
    plies: Vec<Move>,
    oracle: O,
}

impl Session<RulesOracle> {
    /// Game validated by full chess rules
    pub fn strict() -> Self {
        Self::new(RulesOracle::new())
    }
}

impl Session<NullOracle> {
    /// Game with no move validation
    pub fn unvalidated() -> Self {
        Self::new(NullOracle)
    }
}

impl<O: Oracle> Session<O> {
    pub fn new(oracle: O) -> Self {
        let mut session = Self {
            board: Board::initial(),
            selection: Selection::Idle,
            turn: Color::Light,
            status: Status::InProgress,
            promotions: Vec::new(),
            plies: Vec::new(),
            oracle,
        };
        session.reset();
        session
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn selection(&self) -> Selection {
        self.selection
    }

    #[inline]
    pub fn active_color(&self) -> Color {
        self.turn
    }

    #[inline]
    pub fn status(&self) -> Status {
        self.status
    }

    pub fn promotions(&self) -> &[Piece] {
        &self.promotions
    }

    pub fn plies(&self) -> &[Move] {
        &self.plies
    }

    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    /// Legal moves for the side to move
    pub fn legal_moves(&self) -> Vec<Move> {
        self.oracle.legal_moves(&self.board, self.turn)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            board: self.board,
            selection: self.selection,
            active: self.turn,
            status: self.status,
            lost: lost_material(&self.board),
            reconciled: reconciled_lost_material(&self.board, &self.promotions),
        }
    }

    /// Start a new game. Safe from any state.
    pub fn reset(&mut self) {
        self.board = Board::initial();
        self.selection = Selection::Idle;
        self.turn = Color::Light;
        self.status = Status::InProgress;
        self.promotions.clear();
        self.plies.clear();
        self.oracle.reset();
    }

    /// Click on raw coordinates. Out-of-range coordinates are a host bug.
    pub fn click_at(&mut self, rank: u8, file: u8) -> Result<Transition, BoardError> {
        let sq = Square::new(rank, file)?;
        Ok(self.click(sq))
    }

    pub fn click(&mut self, sq: Square) -> Transition {
        if self.status.is_over() {
            return Transition::Ignored;
        }
        let own = self.board.is_occupied_by(sq, self.turn);
        match self.selection {
            Selection::Idle if own => {
                self.selection = Selection::Selected(sq);
                Transition::Selected(sq)
            }
            Selection::Idle => Transition::Ignored,
            Selection::Selected(from) if from == sq => {
                self.selection = Selection::Idle;
                Transition::Deselected
            }
            Selection::Selected(_) if own => {
                self.selection = Selection::Selected(sq);
                Transition::Reselected(sq)
            }
            Selection::Selected(from) => self.attempt(Move::new(from, sq)),
        }
    }

    /// Play a move on behalf of `side` without going through selection.
    ///
    /// Used for injected moves such as the opponent's. Ignored once the game
    /// is over or when `side` is no longer to move.
    pub fn commit_move(&mut self, side: Color, mv: Move) -> Transition {
        if self.status.is_over() || side != self.turn {
            return Transition::Ignored;
        }
        if !self.board.is_occupied_by(mv.from, side) || self.board.is_occupied_by(mv.to, side) {
            return Transition::Rejected(mv);
        }
        self.attempt(mv)
    }

    /// Let `policy` pick a move for `side` and commit it.
    pub fn opponent_move<P: Policy + ?Sized>(&mut self, side: Color, policy: &mut P) -> Transition {
        if self.status.is_over() || side != self.turn {
            return Transition::Ignored;
        }
        let legal = self.oracle.legal_moves(&self.board, side);
        match policy.choose(&legal) {
            Some(mv) => self.commit_move(side, mv),
            None => Transition::Ignored,
        }
    }

    fn attempt(&mut self, mv: Move) -> Transition {
        if !self.oracle.is_legal(&self.board, self.turn, mv) {
            return Transition::Rejected(mv);
        }
        let (board, promoted) = match self.resolve(mv) {
            Ok(resolved) => resolved,
            Err(err) => {
                // The oracle and the board disagree about the position
                debug_assert!(false, "oracle accepted {} but the board refused it: {}", mv, err);
                return Transition::Rejected(mv);
            }
        };

        self.board = board;
        self.turn = !self.turn;
        self.selection = Selection::Idle;
        self.plies.push(mv);
        if let Some(piece) = promoted {
            self.promotions.push(piece);
        }
        self.oracle.record(&self.board, mv, promoted.map(|p| p.kind));
        let verdict = self.oracle.classify(&self.board, self.turn);
        self.status = status::classify(verdict, self.turn);
        Transition::Committed(mv)
    }

    /// Board after `mv` with companion changes and promotion applied, plus
    /// the promoted piece if any.
    fn resolve(&self, mv: Move) -> Result<(Board, Option<Piece>), BoardError> {
        let companion = self.oracle.companion(&self.board, mv);
        let mut board = self.board.with_move(mv.from, mv.to)?;
        match companion {
            Some(Companion::Relocate { from, to }) => board = board.with_move(from, to)?,
            Some(Companion::Remove(sq)) => board = board.with_piece(sq, None),
            None => {}
        }

        // The moved pawn would otherwise stay a pawn on the back rank
        let promoted = match board.piece_at(mv.to) {
            Some(p) if p.kind == Kind::Pawn && mv.to.rank() == p.color.promotion_rank() => {
                let piece = Piece::new(PROMOTION_KIND, p.color);
                board = board.with_piece(mv.to, Some(piece));
                Some(piece)
            }
            _ => None,
        };
        Ok((board, promoted))
    }
}
