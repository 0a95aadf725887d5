//! Board interaction and material accounting for a two-player chess front end.
//!
//! # Architecture
//! - `board`: immutable 8x8 board values
//! - `oracle`: move legality and game-end verdicts (null or full rules)
//! - `session`: click-to-select / click-to-move state machine
//! - `material`: captured pieces derived by counting
//! - `status`: game status from an oracle verdict
//! - `opponent`: move policies for a computer opponent
//! - `host`: line-oriented text front end

pub mod types;
pub mod error;
pub mod board;
pub mod oracle;
pub mod material;
pub mod status;
pub mod opponent;
pub mod session;
pub mod host;

pub use board::Board;
pub use error::BoardError;
pub use material::{lost_material, reconciled_lost_material, LostMaterial};
pub use oracle::{NullOracle, Oracle, RulesOracle};
pub use session::{Selection, Session, Snapshot, Transition};
pub use status::Status;
pub use types::{Color, Kind, Move, Piece, Square};
