use crate::cell::CellCoord;
use crate::clipboard::ClipboardError;

/// Host callbacks consumed by the navigation engine.
///
/// Dimensions are queried on every operation and never cached, so a host may
/// grow or shrink its grid between calls (for example after a data reload).
pub trait GridHost {
    /// Current number of rows.
    fn row_count(&self) -> usize;

    /// Current number of columns.
    fn col_count(&self) -> usize;

    /// Cells failing this are skipped by arrow movement and Tab order.
    fn is_cell_navigable(&self, _row: usize, _col: usize) -> bool {
        true
    }

    /// Gates whether a printable keystroke starts an edit.
    fn is_cell_editable(&self, row: usize, col: usize) -> bool;

    /// Fired whenever the active cell changes.
    ///
    /// `cell_id` is the stable id from [`crate::cell::cell_id`]; hosts use it to
    /// focus and select the underlying input.
    fn on_cell_activate(&mut self, row: usize, col: usize, cell_id: &str);

    /// Fired when a printable key is typed on an active cell that is not being
    /// edited. The host enters edit mode and takes the typed character.
    fn on_cell_edit_request(&mut self, row: usize, col: usize);

    /// Fired on Enter.
    fn on_cell_submit(&mut self, _row: usize, _col: usize) {}

    /// Fired on Escape while editing.
    fn on_cell_cancel(&mut self, _row: usize, _col: usize) {}
}

/// Host callbacks consumed by the copy/paste engine.
///
/// `C` is an opaque context threaded through unchanged, typically the row and
/// column labels needed to turn a coordinate into a domain key.
pub trait ClipboardHost<C> {
    /// Serializes the given cells, one string per cell, in the same order.
    fn on_copy(&self, cells: &[CellCoord], context: &C) -> Vec<String>;

    /// Writes pasted values into the given cells.
    ///
    /// `values` may be longer or shorter than `cells`; the host decides what a
    /// mismatch means.
    fn on_paste(&mut self, cells: &[CellCoord], values: &[String], context: &C);
}

/// Read/write access to a text clipboard.
pub trait ClipboardBackend {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;

    fn read_text(&mut self) -> Result<String, ClipboardError>;
}

impl<B: ClipboardBackend + ?Sized> ClipboardBackend for &mut B {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        (**self).write_text(text)
    }

    fn read_text(&mut self) -> Result<String, ClipboardError> {
        (**self).read_text()
    }
}

impl<B: ClipboardBackend + ?Sized> ClipboardBackend for Box<B> {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        (**self).write_text(text)
    }

    fn read_text(&mut self) -> Result<String, ClipboardError> {
        (**self).read_text()
    }
}
