//! Cells of the 3x3 grid and small sets of them.

use crate::IllegalMove;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A cell on the board, row-major:
///
/// ```text
/// 0 | 1 | 2
/// ---------
/// 3 | 4 | 5
/// ---------
/// 6 | 7 | 8
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, strum::EnumIter,
)]
pub enum Cell {
    /// Top-left (cell 0)
    TopLeft,
    /// Top-center (cell 1)
    TopCenter,
    /// Top-right (cell 2)
    TopRight,
    /// Middle-left (cell 3)
    MiddleLeft,
    /// Center (cell 4)
    Center,
    /// Middle-right (cell 5)
    MiddleRight,
    /// Bottom-left (cell 6)
    BottomLeft,
    /// Bottom-center (cell 7)
    BottomCenter,
    /// Bottom-right (cell 8)
    BottomRight,
}

impl Cell {
    /// All 9 cells in index order.
    pub const ALL: [Cell; 9] = [
        Cell::TopLeft,
        Cell::TopCenter,
        Cell::TopRight,
        Cell::MiddleLeft,
        Cell::Center,
        Cell::MiddleRight,
        Cell::BottomLeft,
        Cell::BottomCenter,
        Cell::BottomRight,
    ];

    /// Board index of this cell (0-8).
    pub fn index(self) -> usize {
        self as usize
    }

    /// Cell for a board index, `None` outside 0-8.
    #[instrument]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Cell::TopLeft => "Top-left",
            Cell::TopCenter => "Top-center",
            Cell::TopRight => "Top-right",
            Cell::MiddleLeft => "Middle-left",
            Cell::Center => "Center",
            Cell::MiddleRight => "Middle-right",
            Cell::BottomLeft => "Bottom-left",
            Cell::BottomCenter => "Bottom-center",
            Cell::BottomRight => "Bottom-right",
        }
    }

    fn bit(self) -> u16 {
        1 << self.index()
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A set of cells, stored as a 9-bit mask.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16")]
pub struct CellSet(u16);

impl TryFrom<u16> for CellSet {
    type Error = IllegalMove;

    /// Accepts masks whose bits all name cells 0-8.
    fn try_from(mask: u16) -> Result<Self, Self::Error> {
        if mask > CellSet::FULL.0 {
            let highest = 15 - mask.leading_zeros() as usize;
            return Err(IllegalMove::OutOfRange(highest));
        }
        Ok(CellSet(mask))
    }
}

impl CellSet {
    /// The empty set.
    pub const EMPTY: CellSet = CellSet(0);

    /// Every cell.
    pub const FULL: CellSet = CellSet(0x1FF);

    /// Builds a set from cells.
    pub fn of(cells: &[Cell]) -> Self {
        cells.iter().copied().collect()
    }

    /// Adds a cell.
    pub fn insert(&mut self, cell: Cell) {
        self.0 |= cell.bit();
    }

    /// Membership test.
    pub fn contains(&self, cell: Cell) -> bool {
        self.0 & cell.bit() != 0
    }

    /// Number of cells in the set.
    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// True when no cell is present.
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// True when every cell of `other` is in `self`.
    pub fn is_superset(&self, other: CellSet) -> bool {
        self.0 & other.0 == other.0
    }

    /// Cells in `self` that are not in `other`.
    pub fn difference(&self, other: CellSet) -> CellSet {
        CellSet(self.0 & !other.0)
    }

    /// Cells in ascending index order.
    pub fn iter(&self) -> impl Iterator<Item = Cell> + '_ {
        Cell::ALL.into_iter().filter(move |cell| self.contains(*cell))
    }
}

impl FromIterator<Cell> for CellSet {
    fn from_iter<I: IntoIterator<Item = Cell>>(iter: I) -> Self {
        let mut set = CellSet::EMPTY;
        for cell in iter {
            set.insert(cell);
        }
        set
    }
}
