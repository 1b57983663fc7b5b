//! Grid host over the editor state.
//!
//! Borrows the sheet and edit state for the duration of one engine call and
//! answers the navigation and clipboard callbacks.

use forecast_grid::{CellCoord, ClipboardHost, EditOutcome, GridHost};
use log::debug;

use crate::state::{EditState, SheetContext, SheetState};

/// Formats a figure the way cells display and copy it.
pub fn format_figure(value: f64) -> String {
    format!("{:.2}", value)
}

/// Text a cell shows right now: the edit buffer for the cell being edited,
/// else its formatted display value.
pub fn cell_text(sheet: &SheetState, edit: &EditState, row: usize, col: usize) -> String {
    match edit.cell() {
        Some(cell) if cell == CellCoord::new(row, col) => edit.buffer().to_string(),
        _ => format_figure(sheet.display_value(row, col)),
    }
}

/// Callback target for [`forecast_grid::GridNavigator`] and
/// [`forecast_grid::DragCopy`].
pub struct SheetHost<'a> {
    sheet: &'a mut SheetState,
    edit: &'a mut EditState,
}

impl<'a> SheetHost<'a> {
    pub fn new(sheet: &'a mut SheetState, edit: &'a mut EditState) -> Self {
        Self { sheet, edit }
    }

    /// Writes the edit buffer into the ledger if it changed.
    pub fn commit_buffer(&mut self) -> Option<EditOutcome> {
        let cell = self.edit.cell()?;
        if !self.edit.is_dirty() {
            return None;
        }

        let outcome = self.sheet.apply_edit(cell.row, cell.col, self.edit.buffer());
        match outcome {
            EditOutcome::Rejected => {
                debug!("rejected input {:?} at {}", self.edit.buffer(), cell);
                self.edit.restore();
            }
            _ => self.edit.mark_committed(),
        }
        Some(outcome)
    }

    /// Re-reads the active cell after its value changed underneath the buffer.
    fn reload_active(&mut self) {
        if let Some(cell) = self.edit.cell() {
            let text = format_figure(self.sheet.display_value(cell.row, cell.col));
            self.edit.reload(text);
        }
    }
}

impl GridHost for SheetHost<'_> {
    fn row_count(&self) -> usize {
        self.sheet.row_count()
    }

    fn col_count(&self) -> usize {
        self.sheet.col_count()
    }

    fn is_cell_editable(&self, row: usize, col: usize) -> bool {
        self.sheet.is_editable(row, col)
    }

    fn on_cell_activate(&mut self, row: usize, col: usize, cell_id: &str) {
        // Leaving a cell commits what was typed into it
        self.commit_buffer();

        let text = format_figure(self.sheet.display_value(row, col));
        debug!("focus {}", cell_id);
        self.edit.begin(CellCoord::new(row, col), text);
    }

    fn on_cell_edit_request(&mut self, _row: usize, _col: usize) {
        self.edit.request_edit();
    }

    fn on_cell_submit(&mut self, _row: usize, _col: usize) {
        self.commit_buffer();
    }

    fn on_cell_cancel(&mut self, _row: usize, _col: usize) {
        self.edit.restore();
        self.edit.request_cancel();
    }
}

impl ClipboardHost<SheetContext> for SheetHost<'_> {
    fn on_copy(&self, cells: &[CellCoord], context: &SheetContext) -> Vec<String> {
        cells
            .iter()
            .filter(|cell| context.key(**cell).is_some())
            .map(|cell| cell_text(self.sheet, self.edit, cell.row, cell.col))
            .collect()
    }

    /// Pairs cells and values in order; extra values or extra cells are dropped.
    fn on_paste(&mut self, cells: &[CellCoord], values: &[String], context: &SheetContext) {
        self.commit_buffer();

        let mut recorded = 0;
        for (cell, value) in cells.iter().zip(values) {
            if context.key(*cell).is_none() {
                continue;
            }
            if let EditOutcome::Recorded(_) = self.sheet.apply_edit(cell.row, cell.col, value) {
                recorded += 1;
            }
        }
        debug!("pasted {} of {} values", recorded, values.len());

        self.reload_active();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use forecast_grid::{ForecastSheet, GridNavigator, Key, KeyInput, SheetKind};

    fn fixture() -> (SheetState, EditState) {
        let mut sheet = SheetState::new();
        sheet.load(ForecastSheet::sample(SheetKind::OtherRevenue, 8, 5), None);
        (sheet, EditState::new())
    }

    #[test]
    fn test_typing_then_moving_commits() {
        let (mut sheet, mut edit) = fixture();
        let mut navigator = GridNavigator::new();
        {
            let mut host = SheetHost::new(&mut sheet, &mut edit);
            assert!(navigator.set_active_cell(CellCoord::new(4, 0), &mut host));
        }

        edit.insert_char('5');
        edit.insert_char('0');

        let mut host = SheetHost::new(&mut sheet, &mut edit);
        navigator.handle_key(&KeyInput::plain(Key::ArrowDown), &mut host);
        assert_eq!(sheet.display_value(4, 0), 50.0);
        assert_eq!(edit.cell(), Some(CellCoord::new(5, 0)));
    }

    #[test]
    fn test_escape_restores_and_requests_blur() {
        let (mut sheet, mut edit) = fixture();
        let mut navigator = GridNavigator::new();
        {
            let mut host = SheetHost::new(&mut sheet, &mut edit);
            navigator.set_active_cell(CellCoord::new(4, 1), &mut host);
        }
        let before = edit.buffer().to_string();
        edit.insert_char('1');

        let mut host = SheetHost::new(&mut sheet, &mut edit);
        navigator.handle_key(&KeyInput::plain(Key::Escape), &mut host);
        assert_eq!(edit.buffer(), before);
        assert!(edit.take_cancel_request());
        assert!(!sheet.is_overridden(4, 1));
    }

    #[test]
    fn test_paste_skips_read_only_and_reloads_active() {
        let (mut sheet, mut edit) = fixture();
        let context = sheet.context();
        let mut navigator = GridNavigator::new();
        {
            let mut host = SheetHost::new(&mut sheet, &mut edit);
            navigator.set_active_cell(CellCoord::new(3, 0), &mut host);
        }

        let cells = [CellCoord::new(2, 0), CellCoord::new(3, 0)];
        let values = vec!["11".to_string(), "22".to_string()];
        let mut host = SheetHost::new(&mut sheet, &mut edit);
        host.on_paste(&cells, &values, &context);

        assert!(!sheet.is_overridden(2, 0));
        assert_eq!(sheet.display_value(3, 0), 22.0);
        assert_eq!(edit.buffer(), "22.00");
    }

    #[test]
    fn test_copy_uses_display_text() {
        let (mut sheet, mut edit) = fixture();
        sheet.apply_edit(6, 2, "12.5");
        let context = sheet.context();

        let host = SheetHost::new(&mut sheet, &mut edit);
        let copied = host.on_copy(&[CellCoord::new(6, 2), CellCoord::new(40, 2)], &context);
        assert_eq!(copied, vec!["12.50".to_string()]);
    }
}
