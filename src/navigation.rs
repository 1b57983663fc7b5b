//! Grid navigation engine.
//!
//! Owns the single active-cell cursor and the editing flag, and translates
//! key presses into movement and edit requests against a [`GridHost`].
//!
//! Every operation fails silently: a target that is out of range or not
//! navigable leaves the active cell where it was.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::cell::{clamped_step, CellCoord, Direction, TabDirection};
use crate::keys::{Key, KeyInput, KeyOutcome};
use crate::traits::GridHost;

/// Constructor-time configuration for [`GridNavigator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    /// Starting active cell, if any.
    pub initial_active_cell: Option<CellCoord>,
    /// Initial value of the editing flag. Grids mount in editing mode.
    pub start_editing: bool,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            initial_active_cell: None,
            start_editing: true,
        }
    }
}

/// Accessibility and focus attributes for one rendered cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellProps {
    pub id: String,
    /// Roving tab index: 0 for the active cell, -1 elsewhere.
    pub tab_index: i32,
    pub role: &'static str,
    pub aria_selected: bool,
    pub aria_readonly: bool,
}

/// Attributes for the grid container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableProps {
    pub tab_index: i32,
    pub role: &'static str,
}

/// Active-cell cursor and edit-mode state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridNavigator {
    active_cell: Option<CellCoord>,
    editing: bool,
}

impl Default for GridNavigator {
    fn default() -> Self {
        Self::new()
    }
}

impl GridNavigator {
    /// Creates a navigator with no active cell, in editing mode.
    pub fn new() -> Self {
        Self::with_config(NavigationConfig::default())
    }

    pub fn with_config(config: NavigationConfig) -> Self {
        Self {
            active_cell: config.initial_active_cell,
            editing: config.start_editing,
        }
    }

    // ===== Queries =====

    pub fn active_cell(&self) -> Option<CellCoord> {
        self.active_cell
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn is_active(&self, row: usize, col: usize) -> bool {
        self.active_cell == Some(CellCoord::new(row, col))
    }

    /// In bounds for the host's current dimensions and navigable.
    pub fn is_valid_cell<H: GridHost + ?Sized>(host: &H, cell: CellCoord) -> bool {
        cell.in_bounds(host.row_count(), host.col_count()) && host.is_cell_navigable(cell.row, cell.col)
    }

    /// Rendering attributes for the cell at `(row, col)`.
    pub fn cell_props<H: GridHost + ?Sized>(&self, row: usize, col: usize, host: &H) -> CellProps {
        let is_active = self.is_active(row, col);
        CellProps {
            id: crate::cell::cell_id(row, col),
            tab_index: if is_active { 0 } else { -1 },
            role: "gridcell",
            aria_selected: is_active,
            aria_readonly: !host.is_cell_editable(row, col),
        }
    }

    pub fn table_props(&self) -> TableProps {
        TableProps { tab_index: 0, role: "grid" }
    }

    // ===== Mutations =====

    /// Makes `cell` active if it is valid. Returns true if it was accepted.
    pub fn set_active_cell<H: GridHost + ?Sized>(&mut self, cell: CellCoord, host: &mut H) -> bool {
        if !Self::is_valid_cell(host, cell) {
            return false;
        }
        self.activate(cell, host);
        true
    }

    /// Re-fires `on_cell_activate` for the current cell, e.g. after the host
    /// rebuilt its widgets.
    pub fn refresh_activation<H: GridHost + ?Sized>(&self, host: &mut H) {
        if let Some(cell) = self.active_cell {
            host.on_cell_activate(cell.row, cell.col, &cell.id());
        }
    }

    /// Click-to-edit: selects the cell and opens it for editing.
    pub fn click_cell<H: GridHost + ?Sized>(&mut self, row: usize, col: usize, host: &mut H) {
        if self.set_active_cell(CellCoord::new(row, col), host) {
            self.editing = true;
        }
    }

    /// Host-driven blur. The next printable key on an editable cell will
    /// raise an edit request again.
    pub fn stop_editing(&mut self) {
        self.editing = false;
    }

    /// Clears the cursor, e.g. when the host switches to another data set.
    pub fn reset(&mut self) {
        self.active_cell = None;
        self.editing = false;
    }

    /// Moves one cell in `direction`, skipping non-navigable cells.
    ///
    /// Returns true if the active cell changed.
    pub fn move_active_cell<H: GridHost + ?Sized>(&mut self, direction: Direction, host: &mut H) -> bool {
        let Some(current) = self.active_cell else {
            return false;
        };

        match find_navigable_in_direction(host, current, direction) {
            Some(target) => {
                self.activate(target, host);
                true
            }
            None => false,
        }
    }

    /// Handles one key press on the grid container.
    pub fn handle_key<H: GridHost + ?Sized>(&mut self, input: &KeyInput, host: &mut H) -> KeyOutcome {
        let Some(active) = self.active_cell else {
            return KeyOutcome::Ignored;
        };

        match input.key {
            Key::ArrowUp => {
                self.move_active_cell(Direction::Up, host);
                KeyOutcome::Handled
            }
            Key::ArrowDown => {
                self.move_active_cell(Direction::Down, host);
                KeyOutcome::Handled
            }
            Key::ArrowLeft => {
                self.move_active_cell(Direction::Left, host);
                KeyOutcome::Handled
            }
            Key::ArrowRight => {
                self.move_active_cell(Direction::Right, host);
                KeyOutcome::Handled
            }
            Key::Tab => {
                self.editing = true;
                let direction = if input.modifiers.shift {
                    TabDirection::Previous
                } else {
                    TabDirection::Next
                };

                match find_next_navigable_cell(host, active, direction) {
                    Some(next) => self.activate(next, host),
                    None => {
                        // Table boundary: fall back to the cell below instead of trapping focus
                        self.step_down(active, host);
                    }
                }
                KeyOutcome::Handled
            }
            Key::Enter => {
                host.on_cell_submit(active.row, active.col);
                self.editing = true;
                self.step_down(active, host);
                KeyOutcome::Handled
            }
            Key::Escape => {
                if self.editing {
                    host.on_cell_cancel(active.row, active.col);
                    KeyOutcome::Handled
                } else {
                    KeyOutcome::Ignored
                }
            }
            Key::Space | Key::PageUp | Key::PageDown | Key::Home | Key::End => KeyOutcome::Handled,
            _ => {
                let starts_edit = !self.editing
                    && input.printable().is_some()
                    && host.is_cell_editable(active.row, active.col);

                if starts_edit {
                    self.editing = true;
                    host.on_cell_edit_request(active.row, active.col);
                    KeyOutcome::Handled
                } else {
                    KeyOutcome::Ignored
                }
            }
        }
    }

    /// Moves to the cell directly below `from` if it is valid. No wraparound.
    fn step_down<H: GridHost + ?Sized>(&mut self, from: CellCoord, host: &mut H) {
        let below = CellCoord::new(from.row + 1, from.col);
        if Self::is_valid_cell(host, below) {
            self.activate(below, host);
        }
    }

    fn activate<H: GridHost + ?Sized>(&mut self, cell: CellCoord, host: &mut H) {
        if self.active_cell == Some(cell) {
            return;
        }
        debug!("active cell {:?} -> {}", self.active_cell, cell);
        self.active_cell = Some(cell);
        host.on_cell_activate(cell.row, cell.col, &cell.id());
    }
}

/// Finds the first navigable cell reached by stepping from `from` in
/// `direction`.
///
/// Stops at the grid boundary: if the boundary cell is not navigable there is
/// no target. Never returns `from` itself.
pub fn find_navigable_in_direction<H: GridHost + ?Sized>(
    host: &H,
    from: CellCoord,
    direction: Direction,
) -> Option<CellCoord> {
    let row_count = host.row_count();
    let col_count = host.col_count();

    let mut candidate = clamped_step(from, direction, row_count, col_count)?;
    loop {
        if candidate == from {
            return None;
        }
        if host.is_cell_navigable(candidate.row, candidate.col) {
            return Some(candidate);
        }

        let next = clamped_step(candidate, direction, row_count, col_count)?;
        if next == candidate {
            return None;
        }
        candidate = next;
    }
}

/// Finds the next (or previous) navigable cell in row-major order, wrapping
/// from the end of one row to the start of the next.
///
/// Returns `None` past the last cell of the table (or before the first).
pub fn find_next_navigable_cell<H: GridHost + ?Sized>(
    host: &H,
    start: CellCoord,
    direction: TabDirection,
) -> Option<CellCoord> {
    let row_count = host.row_count();
    let col_count = host.col_count();
    if row_count == 0 || col_count == 0 {
        return None;
    }

    match direction {
        TabDirection::Next => {
            let (mut row, mut col) = (start.row, start.col + 1);
            if col >= col_count {
                col = 0;
                row += 1;
            }

            while row < row_count {
                while col < col_count {
                    if host.is_cell_navigable(row, col) {
                        return Some(CellCoord::new(row, col));
                    }
                    col += 1;
                }
                row += 1;
                col = 0;
            }
            None
        }
        TabDirection::Previous => {
            let (mut row, mut col) = if start.col == 0 {
                if start.row == 0 {
                    return None;
                }
                (start.row - 1, col_count - 1)
            } else {
                (start.row, start.col - 1)
            };

            loop {
                if row < row_count {
                    col = col.min(col_count - 1);
                    loop {
                        if host.is_cell_navigable(row, col) {
                            return Some(CellCoord::new(row, col));
                        }
                        if col == 0 {
                            break;
                        }
                        col -= 1;
                    }
                }

                if row == 0 {
                    return None;
                }
                row -= 1;
                col = col_count - 1;
            }
        }
    }
}
