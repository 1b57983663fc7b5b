//! Cell coordinates and movement directions shared by both engines.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies one addressable cell in a host grid.
///
/// Coordinates are unsigned, so the `>= 0` half of the bounds invariant is
/// carried by the type. The upper bounds come from the host and may change
/// between operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    pub row: usize,
    pub col: usize,
}

impl CellCoord {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Returns true if the cell lies inside a grid of the given dimensions.
    pub fn in_bounds(&self, row_count: usize, col_count: usize) -> bool {
        self.row < row_count && self.col < col_count
    }

    /// Returns the stable element id used by hosts to find the cell.
    pub fn id(&self) -> String {
        cell_id(self.row, self.col)
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<(usize, usize)> for CellCoord {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

/// Arrow-key movement direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Row-major traversal direction used by Tab and Shift+Tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabDirection {
    Next,
    Previous,
}

/// Formats the element id of a cell as `cell-{row}-{col}`.
pub fn cell_id(row: usize, col: usize) -> String {
    format!("cell-{}-{}", row, col)
}

/// Clamps `cell` into the grid, then takes one step in `direction`,
/// saturating at the edges. Returns `None` for an empty grid.
///
/// Never wraps across rows or columns.
pub fn clamped_step(cell: CellCoord, direction: Direction, row_count: usize, col_count: usize) -> Option<CellCoord> {
    if row_count == 0 || col_count == 0 {
        return None;
    }

    let row = cell.row.min(row_count - 1);
    let col = cell.col.min(col_count - 1);

    let stepped = match direction {
        Direction::Up => CellCoord::new(row.saturating_sub(1), col),
        Direction::Down => CellCoord::new((row + 1).min(row_count - 1), col),
        Direction::Left => CellCoord::new(row, col.saturating_sub(1)),
        Direction::Right => CellCoord::new(row, (col + 1).min(col_count - 1)),
    };

    Some(stepped)
}
