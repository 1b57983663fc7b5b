//! Centralized application state for the forecast grid editor.
//!
//! Composes focused state components with the two grid engines. The engines
//! never hold references into the state; a [`SheetHost`] borrows the sheet and
//! edit components for the duration of each engine call.

use forecast_grid::{DragCopy, GridNavigator, PasteAnchor};

use crate::app::sheet_host::SheetHost;
use crate::state::{EditState, LayoutState, SheetContext, SheetState};

/// Main application state composed of focused state components.
pub struct AppState {
    // ===== Focused State Components =====
    /// Loaded sheet and pending overrides
    pub sheet: SheetState,

    /// Active cell text buffer
    pub edit: EditState,

    /// UI layout state
    pub layout: LayoutState,

    // ===== Engines =====
    /// Active-cell cursor and edit mode
    pub navigator: GridNavigator,

    /// Drag selection and clipboard
    pub drag_copy: DragCopy<SheetContext>,

    // ===== Top-Level State =====
    /// Current error message to display (if any)
    pub error_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    /// Creates a new application state with default values.
    pub fn new() -> Self {
        Self::with_layout(LayoutState::new())
    }

    /// Creates a new AppState with layout settings loaded from storage.
    pub fn with_layout(layout: LayoutState) -> Self {
        Self {
            sheet: SheetState::new(),
            edit: EditState::new(),
            layout,
            navigator: GridNavigator::new(),
            drag_copy: DragCopy::default(),
            error_message: None,
        }
    }

    /// Splits the state into the navigator and a host over the sheet.
    pub fn navigator_and_host(&mut self) -> (&mut GridNavigator, SheetHost<'_>) {
        (
            &mut self.navigator,
            SheetHost::new(&mut self.sheet, &mut self.edit),
        )
    }

    /// Splits the state into the copy/paste engine and a host over the sheet.
    pub fn drag_copy_and_host(&mut self) -> (&mut DragCopy<SheetContext>, SheetHost<'_>) {
        (
            &mut self.drag_copy,
            SheetHost::new(&mut self.sheet, &mut self.edit),
        )
    }

    pub fn host(&mut self) -> SheetHost<'_> {
        SheetHost::new(&mut self.sheet, &mut self.edit)
    }

    pub fn paste_anchor(&self) -> PasteAnchor {
        PasteAnchor::new(self.navigator.active_cell(), self.sheet.row_count())
    }

    // ===== High-Level Coordination Methods =====

    /// Resets the grid state when switching sheets.
    ///
    /// Clears the cursor, selection and edit buffer and refreshes the
    /// clipboard context from the current sheet.
    pub fn reset_grid_state(&mut self) {
        self.navigator.reset();
        self.drag_copy.reset();
        self.drag_copy.set_context(self.sheet.context());
        self.edit.reset();
    }
}
