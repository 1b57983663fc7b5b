//! Mouse drag selection.
//!
//! A drag builds a selection from its start and end cells. Only single-column
//! vertical runs are supported: dragging into another column collapses the
//! selection to the starting cell.

use crate::cell::CellCoord;

/// Drag gesture state and the resulting selection.
///
/// Responsibilities:
/// - Tracking whether a drag is in progress
/// - Tracking the drag start and end cells
/// - Holding the last computed selection (the "preview" cells)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DragSelection {
    is_dragging: bool,
    drag_start: Option<CellCoord>,
    drag_end: Option<CellCoord>,
    preview_cells: Vec<CellCoord>,
}

impl DragSelection {
    pub fn new() -> Self {
        Self::default()
    }

    // ===== Queries =====

    pub fn is_dragging(&self) -> bool {
        self.is_dragging
    }

    pub fn start_cell(&self) -> Option<CellCoord> {
        self.drag_start
    }

    pub fn end_cell(&self) -> Option<CellCoord> {
        self.drag_end
    }

    /// The current selection, ordered top to bottom.
    pub fn preview_cells(&self) -> &[CellCoord] {
        &self.preview_cells
    }

    pub fn is_empty(&self) -> bool {
        self.preview_cells.is_empty()
    }

    pub fn len(&self) -> usize {
        self.preview_cells.len()
    }

    pub fn is_preview_cell(&self, row: usize, col: usize) -> bool {
        self.preview_cells.contains(&CellCoord::new(row, col))
    }

    // ===== Gesture =====

    /// Mouse pressed on a cell.
    pub fn drag_start(&mut self, row: usize, col: usize) {
        let cell = CellCoord::new(row, col);
        self.is_dragging = true;
        self.drag_start = Some(cell);
        self.drag_end = Some(cell);
        self.preview_cells = vec![cell];
    }

    /// Pointer moved over a cell. Ignored unless a drag is in progress.
    pub fn drag_move(&mut self, row: usize, col: usize) {
        if !self.is_dragging {
            return;
        }
        let Some(start) = self.drag_start else {
            return;
        };

        let end = CellCoord::new(row, col);
        self.drag_end = Some(end);
        self.preview_cells = selection_between(start, end);
    }

    /// Mouse released. The selection survives; call [`Self::reset`] to clear it.
    pub fn drag_end(&mut self) {
        self.is_dragging = false;
        self.drag_start = None;
        self.drag_end = None;
    }

    /// Clears the selection and any gesture in progress.
    pub fn reset(&mut self) {
        self.is_dragging = false;
        self.drag_start = None;
        self.drag_end = None;
        self.preview_cells.clear();
    }
}

/// Cells selected by a drag from `start` to `end`.
///
/// Same column: the inclusive vertical run between the two rows, top to
/// bottom. Different columns: just `start`.
pub fn selection_between(start: CellCoord, end: CellCoord) -> Vec<CellCoord> {
    if start.col != end.col {
        return vec![start];
    }

    let top = start.row.min(end.row);
    let bottom = start.row.max(end.row);
    (top..=bottom).map(|row| CellCoord::new(row, start.col)).collect()
}
