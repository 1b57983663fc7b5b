//! In-place editing state for the active cell.

use forecast_grid::{CellCoord, ReplaceOnInput};

/// Text buffer of the cell being edited.
///
/// Responsibilities:
/// - Holding the text typed into the active cell
/// - Remembering the text the cell had when it was activated (for Escape)
/// - Replace-on-next-input flags set when a cell gains focus
/// - Flags raised by grid callbacks for the coordinator to act on
#[derive(Debug, Default)]
pub struct EditState {
    cell: Option<CellCoord>,
    buffer: String,
    snapshot: String,
    replace: ReplaceOnInput,
    cancel_requested: bool,
    edit_requested: bool,
    scroll_to_active: bool,
}

impl EditState {
    pub fn new() -> Self {
        Self::default()
    }

    // ===== Queries =====

    pub fn cell(&self) -> Option<CellCoord> {
        self.cell
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn is_dirty(&self) -> bool {
        self.cell.is_some() && self.buffer != self.snapshot
    }

    // ===== Buffer =====

    /// Starts editing `cell` with `text`, arming replace-on-next-input.
    pub fn begin(&mut self, cell: CellCoord, text: String) {
        self.cell = Some(cell);
        self.snapshot = text.clone();
        self.buffer = text;
        self.replace.clear();
        self.replace.arm(cell);
        self.scroll_to_active = true;
    }

    /// Reloads the buffer after the cell changed underneath it (e.g. a paste).
    pub fn reload(&mut self, text: String) {
        self.snapshot = text.clone();
        self.buffer = text;
    }

    /// Types one character. The first character after focus replaces the text.
    pub fn insert_char(&mut self, c: char) {
        let Some(cell) = self.cell else {
            return;
        };
        if self.replace.take(cell) {
            self.buffer.clear();
        }
        self.buffer.push(c);
    }

    pub fn backspace(&mut self) {
        let Some(cell) = self.cell else {
            return;
        };
        if self.replace.take(cell) {
            self.buffer.clear();
        } else {
            self.buffer.pop();
        }
    }

    pub fn clear_buffer(&mut self) {
        if let Some(cell) = self.cell {
            self.replace.take(cell);
        }
        self.buffer.clear();
    }

    /// Restores the activation-time text.
    pub fn restore(&mut self) {
        self.buffer = self.snapshot.clone();
        if let Some(cell) = self.cell {
            self.replace.arm(cell);
        }
    }

    /// Marks the buffer as committed so it is no longer dirty.
    pub fn mark_committed(&mut self) {
        self.snapshot = self.buffer.clone();
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    // ===== Callback flags =====

    pub fn request_cancel(&mut self) {
        self.cancel_requested = true;
    }

    pub fn take_cancel_request(&mut self) -> bool {
        std::mem::take(&mut self.cancel_requested)
    }

    /// An edit request replaces the text with whatever is typed next.
    pub fn request_edit(&mut self) {
        self.edit_requested = true;
        if let Some(cell) = self.cell {
            self.replace.arm(cell);
        }
    }

    pub fn take_edit_request(&mut self) -> bool {
        std::mem::take(&mut self.edit_requested)
    }

    pub fn take_scroll_request(&mut self) -> bool {
        std::mem::take(&mut self.scroll_to_active)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_char_replaces() {
        let mut edit = EditState::new();
        edit.begin(CellCoord::new(0, 0), "100.00".to_string());

        edit.insert_char('4');
        edit.insert_char('2');
        assert_eq!(edit.buffer(), "42");
        assert!(edit.is_dirty());
    }

    #[test]
    fn test_restore_returns_activation_text() {
        let mut edit = EditState::new();
        edit.begin(CellCoord::new(1, 1), "7.50".to_string());
        edit.insert_char('9');
        edit.restore();

        assert_eq!(edit.buffer(), "7.50");
        assert!(!edit.is_dirty());
    }

    #[test]
    fn test_backspace_after_focus_clears() {
        let mut edit = EditState::new();
        edit.begin(CellCoord::new(0, 0), "12.00".to_string());
        edit.backspace();
        assert_eq!(edit.buffer(), "");

        edit.insert_char('5');
        edit.insert_char('6');
        edit.backspace();
        assert_eq!(edit.buffer(), "5");
    }

    #[test]
    fn test_flags_fire_once() {
        let mut edit = EditState::new();
        edit.request_cancel();
        assert!(edit.take_cancel_request());
        assert!(!edit.take_cancel_request());

        edit.begin(CellCoord::new(0, 0), String::new());
        assert!(edit.take_scroll_request());
        assert!(!edit.take_scroll_request());
    }
}
