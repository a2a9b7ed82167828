//! Draw detection and overall outcome.

use super::win::has_won;
use crate::{Board, Outcome, Player};
use tracing::instrument;

/// A full board on which nobody has a line.
#[instrument(skip(board))]
pub fn is_draw(board: &Board) -> bool {
    board.is_full() && !has_won(board, Player::Human) && !has_won(board, Player::Opponent)
}

/// Evaluates the board.
///
/// Precedence: human win, opponent win, draw, in progress. A move that
/// fills the last cell and completes a line is a win.
#[instrument(skip(board))]
pub fn outcome(board: &Board) -> Outcome {
    if has_won(board, Player::Human) {
        Outcome::HumanWin
    } else if has_won(board, Player::Opponent) {
        Outcome::OpponentWin
    } else if board.is_full() {
        Outcome::Draw
    } else {
        Outcome::InProgress
    }
}
