//! Core domain types for tic-tac-toe.

use super::{Cell, CellSet, IllegalMove};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Player in the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::EnumIter)]
pub enum Player {
    /// The person at the keyboard (moves first, marks `X`).
    Human,
    /// The scripted opponent (marks `O`).
    Opponent,
}

impl Player {
    /// Returns the other player.
    pub fn other(self) -> Self {
        match self {
            Player::Human => Player::Opponent,
            Player::Opponent => Player::Human,
        }
    }

    /// Board mark for this player.
    pub fn mark(self) -> char {
        match self {
            Player::Human => 'X',
            Player::Opponent => 'O',
        }
    }
}

/// A mark placed on the board. Moves are never edited once made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    player: Player,
    cell: Cell,
}

impl Move {
    /// Creates a new move.
    pub fn new(player: Player, cell: Cell) -> Self {
        Self { player, cell }
    }

    /// Who made this move.
    pub fn player(&self) -> Player {
        self.player
    }

    /// Where the mark was placed.
    pub fn cell(&self) -> Cell {
        self.cell
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?} -> {}", self.player, self.cell)
    }
}

/// 3x3 tic-tac-toe board.
///
/// Slot `i` is either empty or holds a [`Move`] whose cell index is `i`.
/// Deserialization goes through the same check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "RawBoard")]
pub struct Board {
    slots: [Option<Move>; 9],
}

#[derive(Deserialize)]
struct RawBoard {
    slots: [Option<Move>; 9],
}

impl TryFrom<RawBoard> for Board {
    type Error = IllegalMove;

    fn try_from(raw: RawBoard) -> Result<Self, Self::Error> {
        for (slot, mov) in raw.slots.iter().enumerate() {
            if let Some(mov) = mov
                && mov.cell().index() != slot
            {
                return Err(IllegalMove::Misplaced {
                    slot,
                    cell: mov.cell(),
                });
            }
        }
        Ok(Self { slots: raw.slots })
    }
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self { slots: [None; 9] }
    }

    /// Clears every slot at once.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Gets the move at the given index, if any.
    pub fn get(&self, index: usize) -> Option<Move> {
        self.slots.get(index).copied().flatten()
    }

    /// True when some move sits at `index`. Out-of-range indices are never occupied.
    pub fn is_occupied(&self, index: usize) -> bool {
        self.get(index).is_some()
    }

    /// True when `cell` holds no mark.
    pub fn is_empty(&self, cell: Cell) -> bool {
        self.slots[cell.index()].is_none()
    }

    /// Places a mark for `player` at `index`.
    ///
    /// # Errors
    ///
    /// [`IllegalMove::OutOfRange`] for indices past 8 and
    /// [`IllegalMove::Occupied`] when the cell is taken. The board is left
    /// untouched in both cases.
    #[instrument(skip(self))]
    pub fn place(&mut self, player: Player, index: usize) -> Result<Move, IllegalMove> {
        let cell = Cell::from_index(index).ok_or(IllegalMove::OutOfRange(index))?;
        let slot = &mut self.slots[index];
        if slot.is_some() {
            return Err(IllegalMove::Occupied(cell));
        }
        let mov = Move::new(player, cell);
        *slot = Some(mov);
        Ok(mov)
    }

    /// Cells held by `player`.
    pub fn positions_of(&self, player: Player) -> CellSet {
        self.moves()
            .filter(|mov| mov.player() == player)
            .map(|mov| mov.cell())
            .collect()
    }

    /// Cells with no mark, in index order.
    pub fn empty_cells(&self) -> Vec<Cell> {
        Cell::ALL
            .into_iter()
            .filter(|cell| self.is_empty(*cell))
            .collect()
    }

    /// All moves on the board, in cell order.
    pub fn moves(&self) -> impl Iterator<Item = Move> + '_ {
        self.slots.iter().flatten().copied()
    }

    /// Number of marks on the board.
    pub fn move_count(&self) -> usize {
        self.moves().count()
    }

    /// True when all 9 cells are occupied.
    pub fn is_full(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    /// Formats the board as a human-readable string.
    ///
    /// Empty cells show their 1-based number so a player can type it.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for row in 0..3 {
            for col in 0..3 {
                let index = row * 3 + col;
                let symbol = match self.slots[index] {
                    Some(mov) => mov.player().mark(),
                    None => char::from_digit(index as u32 + 1, 10).unwrap_or('?'),
                };
                result.push(symbol);
                if col < 2 {
                    result.push('|');
                }
            }
            if row < 2 {
                result.push_str("\n-+-+-\n");
            }
        }
        result
    }
}

/// Result of evaluating a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::EnumIter)]
pub enum Outcome {
    /// No line and at least one free cell.
    InProgress,
    /// The human completed a line.
    HumanWin,
    /// The opponent completed a line.
    OpponentWin,
    /// Full board, no line.
    Draw,
}

impl Outcome {
    /// True for every outcome that ends the game.
    pub fn is_terminal(self) -> bool {
        !matches!(self, Outcome::InProgress)
    }

    /// Outcome for a win by `player`.
    pub fn win_for(player: Player) -> Self {
        match player {
            Player::Human => Outcome::HumanWin,
            Player::Opponent => Outcome::OpponentWin,
        }
    }

    /// The winner, if this outcome has one.
    pub fn winner(self) -> Option<Player> {
        match self {
            Outcome::HumanWin => Some(Player::Human),
            Outcome::OpponentWin => Some(Player::Opponent),
            Outcome::InProgress | Outcome::Draw => None,
        }
    }

    /// The game-ending result, `None` while in progress.
    pub fn verdict(self) -> Option<Verdict> {
        match self {
            Outcome::InProgress => None,
            Outcome::HumanWin => Some(Verdict::HumanWin),
            Outcome::OpponentWin => Some(Verdict::OpponentWin),
            Outcome::Draw => Some(Verdict::Draw),
        }
    }
}

/// How a finished game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::EnumIter)]
pub enum Verdict {
    /// The human completed a line.
    HumanWin,
    /// The opponent completed a line.
    OpponentWin,
    /// Full board, no line.
    Draw,
}

impl From<Verdict> for Outcome {
    fn from(verdict: Verdict) -> Self {
        match verdict {
            Verdict::HumanWin => Outcome::HumanWin,
            Verdict::OpponentWin => Outcome::OpponentWin,
            Verdict::Draw => Outcome::Draw,
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Outcome::from(*self).fmt(f)
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::InProgress => write!(f, "In progress"),
            Outcome::HumanWin => write!(f, "Human wins"),
            Outcome::OpponentWin => write!(f, "Opponent wins"),
            Outcome::Draw => write!(f, "Draw"),
        }
    }
}
