//! Grid interaction coordination.
//!
//! Routes pointer gestures, key presses and clipboard events to the
//! navigation and copy/paste engines and applies the host-side follow-ups
//! the engines leave to the host (typing into the buffer, blurring on Escape).

use forecast_grid::{
    determine_start_cell, ClipboardBackend, ClipboardGrid, ClipboardHost, Key, KeyInput,
    KeyOutcome,
};
use log::warn;

use crate::app::AppState;
use crate::ui::input::grid_input_handler::GridInput;

/// Coordinates grid-level interactions.
///
/// This struct is responsible for:
/// - Click-to-edit and drag selection
/// - Keyboard navigation and in-place typing
/// - Copy, fill-down paste and block paste
pub struct GridCoordinator;

impl GridCoordinator {
    // ===== Pointer =====

    /// Mouse pressed on a cell: activate it and start a new drag there.
    pub fn handle_cell_press(state: &mut AppState, row: usize, col: usize) {
        let (navigator, mut host) = state.navigator_and_host();
        navigator.click_cell(row, col, &mut host);
        state.drag_copy.drag_start(row, col);
    }

    pub fn handle_drag_move(state: &mut AppState, row: usize, col: usize) {
        state.drag_copy.drag_move(row, col);
    }

    pub fn handle_drag_release(state: &mut AppState) {
        state.drag_copy.drag_end();
    }

    // ===== Keyboard and clipboard =====

    /// Applies one frame of grid input.
    pub fn handle_inputs<B, F>(state: &mut AppState, inputs: Vec<GridInput>, mut backend_for: F)
    where
        B: ClipboardBackend,
        F: FnMut(Option<String>) -> B,
    {
        for input in inputs {
            match input {
                GridInput::Key(key) => Self::handle_key(state, &key),
                GridInput::Copy => {
                    let mut backend = backend_for(None);
                    Self::copy(state, &mut backend);
                }
                GridInput::Paste(text) => {
                    let mut backend = backend_for(Some(text));
                    Self::paste(state, &mut backend);
                }
            }
        }
    }

    /// Routes one key press to the navigator, then to the edit buffer if the
    /// navigator left it alone.
    pub fn handle_key(state: &mut AppState, input: &KeyInput) {
        let (navigator, mut host) = state.navigator_and_host();
        let outcome = navigator.handle_key(input, &mut host);

        if state.edit.take_cancel_request() {
            state.navigator.stop_editing();
        }

        match outcome {
            KeyOutcome::Handled => {
                // An edit request consumes the keystroke that triggered it
                if state.edit.take_edit_request() {
                    if let Some(c) = input.printable() {
                        state.edit.insert_char(c);
                    }
                }
            }
            KeyOutcome::Ignored => Self::type_into_buffer(state, input),
        }
    }

    fn type_into_buffer(state: &mut AppState, input: &KeyInput) {
        let Some(active) = state.navigator.active_cell() else {
            return;
        };
        if !state.navigator.is_editing() || !state.sheet.is_editable(active.row, active.col) {
            return;
        }

        match input.key {
            Key::Backspace => state.edit.backspace(),
            Key::Delete => state.edit.clear_buffer(),
            _ => {
                if let Some(c) = input.printable() {
                    state.edit.insert_char(c);
                }
            }
        }
    }

    /// Copies the drag selection. Nothing happens without a selection.
    pub fn copy<B: ClipboardBackend + ?Sized>(state: &mut AppState, backend: &mut B) {
        let (drag_copy, mut host) = state.drag_copy_and_host();
        host.commit_buffer();
        let result = drag_copy.copy(&host, backend);
        if let Err(e) = result {
            state.error_message = Some(format!("Copy failed: {}", e));
        }
    }

    /// Pastes clipboard text according to the sheet kind.
    pub fn paste<B: ClipboardBackend + ?Sized>(state: &mut AppState, backend: &mut B) {
        if state.sheet.kind().is_some_and(|kind| kind.uses_block_paste()) {
            match backend.read_text() {
                Ok(text) => Self::paste_block(state, &text),
                Err(e) => {
                    warn!("paste failed: {}", e);
                    state.error_message = Some(format!("Paste failed: {}", e));
                }
            }
            return;
        }

        let anchor = state.paste_anchor();
        let (drag_copy, mut host) = state.drag_copy_and_host();
        let result = drag_copy.paste(&mut host, backend, anchor);
        if let Err(e) = result {
            state.error_message = Some(format!("Paste failed: {}", e));
        }
    }

    /// Places tab/newline separated text as a block starting at the active
    /// cell, or the top-left selected cell when nothing is active.
    pub fn paste_block(state: &mut AppState, text: &str) {
        let Some(start) = determine_start_cell(state.navigator.active_cell(), state.drag_copy.preview_cells())
        else {
            return;
        };

        let grid = ClipboardGrid::parse(text);
        let placed = grid.targets(start, state.sheet.row_count(), state.sheet.col_count());
        let cells: Vec<_> = placed.iter().map(|(cell, _)| *cell).collect();
        let values: Vec<String> = placed.iter().map(|(_, value)| value.to_string()).collect();

        let context = state.drag_copy.context().clone();
        let mut host = state.host();
        host.on_paste(&cells, &values, &context);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use forecast_grid::{CellCoord, ForecastSheet, MemoryClipboard, SheetKind};

    fn state_with(kind: SheetKind) -> AppState {
        let mut state = AppState::new();
        state.sheet.load(ForecastSheet::sample(kind, 12, 9), None);
        state.reset_grid_state();
        state
    }

    fn press(state: &mut AppState, key: Key) {
        GridCoordinator::handle_key(state, &KeyInput::plain(key));
    }

    fn type_text(state: &mut AppState, text: &str) {
        for c in text.chars() {
            GridCoordinator::handle_key(state, &KeyInput::char(c));
        }
    }

    #[test]
    fn test_click_type_enter_records_override() {
        let mut state = state_with(SheetKind::OtherRevenue);
        GridCoordinator::handle_cell_press(&mut state, 4, 1);
        GridCoordinator::handle_drag_release(&mut state);

        type_text(&mut state, "75");
        press(&mut state, Key::Enter);

        assert_eq!(state.sheet.display_value(4, 1), 75.0);
        assert_eq!(state.navigator.active_cell(), Some(CellCoord::new(5, 1)));
    }

    #[test]
    fn test_escape_then_typing_requests_edit() {
        let mut state = state_with(SheetKind::OtherRevenue);
        GridCoordinator::handle_cell_press(&mut state, 6, 0);
        type_text(&mut state, "1");
        press(&mut state, Key::Escape);

        assert!(!state.navigator.is_editing());
        assert!(!state.edit.is_dirty());

        // Not editing: the keystroke becomes an edit request and replaces the text
        type_text(&mut state, "8");
        assert!(state.navigator.is_editing());
        assert_eq!(state.edit.buffer(), "8");
    }

    #[test]
    fn test_locked_cells_ignore_typing() {
        let mut state = state_with(SheetKind::OtherRevenue);
        GridCoordinator::handle_cell_press(&mut state, 0, 0);
        let before = state.edit.buffer().to_string();

        type_text(&mut state, "12");
        assert_eq!(state.edit.buffer(), before);
    }

    #[test]
    fn test_fill_down_paste_from_active_cell() {
        let mut state = state_with(SheetKind::OtherRevenue);
        GridCoordinator::handle_cell_press(&mut state, 10, 2);
        GridCoordinator::handle_drag_release(&mut state);

        let mut clipboard = MemoryClipboard::with_text("1\n2\n3\n4");
        GridCoordinator::paste(&mut state, &mut clipboard);

        // Single selected cell: fill down, clipped at the last period
        assert_eq!(state.sheet.display_value(10, 2), 1.0);
        assert_eq!(state.sheet.display_value(11, 2), 2.0);
        assert_eq!(state.sheet.ledger().len(), 2);
    }

    #[test]
    fn test_copy_drag_selection() {
        let mut state = state_with(SheetKind::OtherRevenue);
        GridCoordinator::handle_cell_press(&mut state, 3, 0);
        GridCoordinator::handle_drag_move(&mut state, 5, 0);
        GridCoordinator::handle_drag_release(&mut state);
        state.sheet.apply_edit(4, 0, "10");

        let mut clipboard = MemoryClipboard::new();
        GridCoordinator::copy(&mut state, &mut clipboard);

        let lines: Vec<&str> = clipboard.text().lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "10.00");
    }

    #[test]
    fn test_block_paste_clips_at_edges() {
        let mut state = state_with(SheetKind::ParkingRates);
        let last_col = state.sheet.col_count() - 1;
        GridCoordinator::handle_cell_press(&mut state, 10, last_col);

        let mut clipboard = MemoryClipboard::with_text("1\t6\n2\t8\n9\t10\n");
        GridCoordinator::paste(&mut state, &mut clipboard);

        assert_eq!(state.sheet.display_value(10, last_col), 1.0);
        assert_eq!(state.sheet.display_value(11, last_col), 2.0);
        assert_eq!(state.sheet.ledger().len(), 2);
    }

    #[test]
    fn test_handle_inputs_routes_paste_text() {
        let mut state = state_with(SheetKind::OtherRevenue);
        GridCoordinator::handle_cell_press(&mut state, 5, 0);
        GridCoordinator::handle_drag_release(&mut state);

        let inputs = vec![GridInput::Paste("42".to_string())];
        GridCoordinator::handle_inputs(&mut state, inputs, |text| {
            MemoryClipboard::with_text(text.unwrap_or_default())
        });
        assert_eq!(state.sheet.display_value(5, 0), 42.0);
    }
}
