//! Material accounting.
//!
//! Captured pieces are reconstructed by diffing live piece counts against
//! the starting material. There is no capture log: the result only depends
//! on per-(color, kind) counts of the board snapshot.
//!
//! Promotion breaks the plain reconstruction (the pawn shows as lost, the
//! new piece overflows its standard count and is clamped to zero lost).
//! [`lost_material`] keeps that behaviour; [`reconciled_lost_material`]
//! nets out promotions recorded by the session.

use crate::board::Board;
use crate::types::{Color, Kind, Piece};

/// Starting count of each kind for one color, indexed by `Kind::index`
pub const STANDARD: [usize; 6] = [8, 2, 2, 2, 1, 1];

/// Total starting pieces per color
pub const STANDARD_TOTAL: usize = 16;

#[inline]
pub const fn standard(kind: Kind) -> usize {
    STANDARD[kind.index()]
}

/// Live piece counts per color and kind.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Census {
    counts: [[usize; 6]; 2],
}

impl Census {
    pub fn of(board: &Board) -> Self {
        let mut counts = [[0; 6]; 2];
        for (_, piece) in board.pieces() {
            counts[piece.color.index()][piece.kind.index()] += 1;
        }
        Census { counts }
    }

    #[inline]
    pub fn current(&self, color: Color, kind: Kind) -> usize {
        self.counts[color.index()][kind.index()]
    }

    pub fn total(&self, color: Color) -> usize {
        self.counts[color.index()].iter().sum()
    }
}

/// Pieces each side no longer has on the board.
///
/// Entries are grouped by kind in `Kind::ALL` order.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct LostMaterial {
    pub light: Vec<Kind>,
    pub dark: Vec<Kind>,
}

impl LostMaterial {
    pub fn of(&self, color: Color) -> &[Kind] {
        match color {
            Color::Light => &self.light,
            Color::Dark => &self.dark,
        }
    }

    /// Number of lost entries of one kind
    pub fn count(&self, color: Color, kind: Kind) -> usize {
        self.of(color).iter().filter(|&&k| k == kind).count()
    }

    pub fn is_empty(&self) -> bool {
        self.light.is_empty() && self.dark.is_empty()
    }
}

/// Lost material by plain count comparison against the starting material.
///
/// Kinds with more live pieces than the standard count report zero lost.
pub fn lost_material(board: &Board) -> LostMaterial {
    diff(&Census::of(board), |_, kind| standard(kind))
}

/// Lost material with promotions netted out.
///
/// `promotions` lists the piece each promoted pawn became. Each one raises
/// the expected count of its kind by one and lowers the expected pawn count
/// by one, so a promoted pawn is not reported lost and a captured promoted
/// piece is.
pub fn reconciled_lost_material(board: &Board, promotions: &[Piece]) -> LostMaterial {
    diff(&Census::of(board), |color, kind| expected(color, kind, promotions))
}

/// Whether `current + lost == standard total` holds for `color` under the
/// plain reconstruction. Fails once a promoted piece overflows its kind.
pub fn is_conserved(board: &Board, color: Color) -> bool {
    let census = Census::of(board);
    let lost = lost_material(board);
    census.total(color) + lost.of(color).len() == STANDARD_TOTAL
}

/// Same check as [`is_conserved`] against the reconciled view.
pub fn is_conserved_reconciled(board: &Board, color: Color, promotions: &[Piece]) -> bool {
    let census = Census::of(board);
    let lost = reconciled_lost_material(board, promotions);
    census.total(color) + lost.of(color).len() == STANDARD_TOTAL
}

fn expected(color: Color, kind: Kind, promotions: &[Piece]) -> usize {
    let promoted = promotions.iter().filter(|p| p.color == color);
    match kind {
        Kind::Pawn => standard(kind).saturating_sub(promoted.count()),
        _ => standard(kind) + promoted.filter(|p| p.kind == kind).count(),
    }
}

fn diff(census: &Census, expected: impl Fn(Color, Kind) -> usize) -> LostMaterial {
    let mut lost = LostMaterial::default();
    for color in Color::BOTH {
        let entries = match color {
            Color::Light => &mut lost.light,
            Color::Dark => &mut lost.dark,
        };
        for kind in Kind::ALL {
            let missing = expected(color, kind).saturating_sub(census.current(color, kind));
            entries.extend(std::iter::repeat(kind).take(missing));
        }
    }
    lost
}
