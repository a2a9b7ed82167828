//! Move legality errors.

use super::Cell;

/// A placement the board refuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum IllegalMove {
    /// The cell already holds a mark.
    #[display("Cell {} is already occupied", _0)]
    Occupied(Cell),

    /// The index is not a board cell.
    #[display("Cell index {} is outside 0-8", _0)]
    OutOfRange(usize),

    /// A move sits in a slot other than its own cell.
    #[display("Move for {} stored in slot {}", cell, slot)]
    Misplaced {
        /// Slot holding the move.
        slot: usize,
        /// Cell the move names.
        cell: Cell,
    },
}

impl std::error::Error for IllegalMove {}
