//! The scripted opponent.
//!
//! Priority order, first match wins:
//!
//! 1. complete one of its own lines,
//! 2. block a line the human is about to complete,
//! 3. take the center,
//! 4. pick uniformly among the empty cells.
//!
//! Only the last rule touches the random source, so any board where one of
//! the first three applies always produces the same reply.

use crate::rules::WIN_PATTERNS;
use crate::{Board, Cell, CellSet, Player};
use rand::Rng;
use tracing::{debug, instrument};

/// Picks the opponent's next cell.
///
/// Implementations must return an empty cell. The turn sequencer only asks
/// while the game is in progress, so at least one cell is free.
pub trait OpponentStrategy: Send {
    /// Chooses a cell on `board`.
    fn select_move(&mut self, board: &Board) -> Cell;
}

/// The built-in win / block / center / random heuristic.
#[derive(Debug, Clone)]
pub struct HeuristicStrategy<R> {
    rng: R,
}

impl<R: Rng> HeuristicStrategy<R> {
    /// Creates the heuristic with its own random source.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng + Send> OpponentStrategy for HeuristicStrategy<R> {
    fn select_move(&mut self, board: &Board) -> Cell {
        select_move(board, &mut self.rng)
    }
}

/// Why the heuristic chose a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reason {
    /// Completes an opponent line.
    Win,
    /// Denies a human line.
    Block,
    /// Center was free.
    Center,
    /// Uniform pick among free cells.
    Random,
}

/// Runs the heuristic on `board`.
///
/// # Panics
///
/// When the board is full. The sequencer never asks in that state.
#[instrument(skip(board, rng))]
pub fn select_move<R: Rng + ?Sized>(board: &Board, rng: &mut R) -> Cell {
    let (cell, reason) = decide(board, rng);
    debug!(cell = %cell, ?reason, "Opponent chose cell");
    cell
}

/// Runs the heuristic and reports which rule fired.
pub fn decide<R: Rng + ?Sized>(board: &Board, rng: &mut R) -> (Cell, Reason) {
    if let Some(cell) = completing_cell(board, Player::Opponent) {
        return (cell, Reason::Win);
    }
    if let Some(cell) = completing_cell(board, Player::Human) {
        return (cell, Reason::Block);
    }
    if board.is_empty(Cell::Center) {
        return (Cell::Center, Reason::Center);
    }

    let empty = board.empty_cells();
    assert!(
        !empty.is_empty(),
        "opponent asked to move on a full board"
    );
    (empty[rng.random_range(0..empty.len())], Reason::Random)
}

/// First free cell that would complete a line for `player`.
///
/// Scans [`WIN_PATTERNS`] in order; a line qualifies when exactly one of its
/// cells is missing from `player`'s positions and that cell is empty.
#[instrument(skip(board))]
pub fn completing_cell(board: &Board, player: Player) -> Option<Cell> {
    let held = board.positions_of(player);
    WIN_PATTERNS.iter().find_map(|pattern| {
        let missing = CellSet::of(pattern).difference(held);
        if missing.len() != 1 {
            return None;
        }
        missing.iter().next().filter(|cell| board.is_empty(*cell))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::outcome;
    use crate::Outcome;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn board(human: &[usize], opponent: &[usize]) -> Board {
        let mut board = Board::new();
        for &index in human {
            board.place(Player::Human, index).unwrap();
        }
        for &index in opponent {
            board.place(Player::Opponent, index).unwrap();
        }
        board
    }

    #[test]
    fn test_win_now_completes_top_row() {
        let mut board = board(&[3, 4], &[0, 1]);
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        let cell = select_move(&board, &mut rng);
        assert_eq!(cell, Cell::TopRight);

        board.place(Player::Opponent, cell.index()).unwrap();
        assert_eq!(outcome(&board), Outcome::OpponentWin);
    }

    #[test]
    fn test_win_takes_priority_over_block() {
        // Human threatens 2, opponent can finish column 0,3,6 at 6.
        let board = board(&[4, 5, 8], &[0, 3]);
        assert_eq!(completing_cell(&board, Player::Human), Some(Cell::TopRight));

        let (cell, reason) = decide(&board, &mut ChaCha8Rng::seed_from_u64(1));
        assert_eq!(reason, Reason::Win);
        assert_eq!(cell, Cell::BottomLeft);
    }

    #[test]
    fn test_blocks_human_line() {
        let board = board(&[0, 4], &[1]);
        let (cell, reason) = decide(&board, &mut ChaCha8Rng::seed_from_u64(3));
        assert_eq!(reason, Reason::Block);
        assert_eq!(cell, Cell::BottomRight);
    }

    #[test]
    fn test_line_with_occupied_gap_is_skipped() {
        // Opponent holds 0 and 1 but the human already sits on 2.
        let board = board(&[2, 5], &[0, 1]);
        assert_eq!(completing_cell(&board, Player::Opponent), None);
        // The human column 2,5,8 is open at 8.
        assert_eq!(completing_cell(&board, Player::Human), Some(Cell::BottomRight));
    }

    #[test]
    fn test_tie_break_prefers_rows_then_columns() {
        // Human threatens row 0 at 2 and column 0 at 6.
        let board = board(&[0, 1, 3], &[4, 8]);
        assert_eq!(completing_cell(&board, Player::Human), Some(Cell::TopRight));
    }

    #[test]
    fn test_takes_center_when_free() {
        let board = board(&[0], &[]);
        let (cell, reason) = decide(&board, &mut ChaCha8Rng::seed_from_u64(9));
        assert_eq!(reason, Reason::Center);
        assert_eq!(cell, Cell::Center);
    }

    #[test]
    fn test_deterministic_rules_ignore_seed() {
        let board = board(&[3, 4], &[0, 1]);
        for seed in 0..32 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            assert_eq!(select_move(&board, &mut rng), Cell::TopRight);
        }
    }

    #[test]
    fn test_random_rule_is_uniform_over_empty_cells() {
        // No threats, center taken: only the random rule applies.
        let board = board(&[4], &[0]);
        let empty = board.empty_cells();
        assert_eq!(decide(&board, &mut ChaCha8Rng::seed_from_u64(0)).1, Reason::Random);

        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let mut counts = [0usize; 9];
        let draws = 7000;
        for _ in 0..draws {
            let cell = select_move(&board, &mut rng);
            assert!(board.is_empty(cell));
            counts[cell.index()] += 1;
        }

        let expected = draws / empty.len();
        for cell in Cell::ALL {
            if empty.contains(&cell) {
                let count = counts[cell.index()];
                assert!(
                    count > expected * 8 / 10 && count < expected * 12 / 10,
                    "cell {cell} drawn {count} times, expected about {expected}"
                );
            } else {
                assert_eq!(counts[cell.index()], 0);
            }
        }
    }

    #[test]
    fn test_same_seed_same_random_sequence() {
        let board = board(&[4], &[0]);
        let mut a = ChaCha8Rng::seed_from_u64(5);
        let mut b = ChaCha8Rng::seed_from_u64(5);
        for _ in 0..20 {
            assert_eq!(select_move(&board, &mut a), select_move(&board, &mut b));
        }
    }

    #[test]
    fn test_strategy_trait_delegates_to_heuristic() {
        let board = board(&[0, 4], &[1]);
        let mut strategy = HeuristicStrategy::new(ChaCha8Rng::seed_from_u64(11));
        assert_eq!(strategy.select_move(&board), Cell::BottomRight);
    }

    #[test]
    #[should_panic(expected = "full board")]
    fn test_full_board_is_contract_violation() {
        let board = board(&[0, 2, 3, 7, 8], &[1, 4, 5, 6]);
        let _ = select_move(&board, &mut ChaCha8Rng::seed_from_u64(0));
    }
}
