//! Win detection logic for tic-tac-toe.

use crate::{Board, Cell, CellSet, Player};
use tracing::instrument;

/// The 8 lines of the board: rows, then columns, then diagonals.
///
/// Order matters to the opponent's tie-break when several lines qualify.
pub const WIN_PATTERNS: [[Cell; 3]; 8] = [
    // Rows
    [Cell::TopLeft, Cell::TopCenter, Cell::TopRight],
    [Cell::MiddleLeft, Cell::Center, Cell::MiddleRight],
    [Cell::BottomLeft, Cell::BottomCenter, Cell::BottomRight],
    // Columns
    [Cell::TopLeft, Cell::MiddleLeft, Cell::BottomLeft],
    [Cell::TopCenter, Cell::Center, Cell::BottomCenter],
    [Cell::TopRight, Cell::MiddleRight, Cell::BottomRight],
    // Diagonals
    [Cell::TopLeft, Cell::Center, Cell::BottomRight],
    [Cell::TopRight, Cell::Center, Cell::BottomLeft],
];

/// Checks whether `player` holds every cell of at least one line.
#[instrument(skip(board))]
pub fn has_won(board: &Board, player: Player) -> bool {
    let positions = board.positions_of(player);
    WIN_PATTERNS
        .iter()
        .any(|pattern| positions.is_superset(CellSet::of(pattern)))
}
