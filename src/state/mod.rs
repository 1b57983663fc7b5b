//! State management modules for the forecast grid editor.
//!
//! This module contains state-only logic (no UI concerns):
//! - Sheet state (loaded sheet, file path, pending overrides)
//! - Edit state (active cell text buffer and callback flags)
//! - Layout state (column widths, row height)

mod sheet_state;
mod edit_state;
mod layout_state;

pub use sheet_state::{SheetState, SheetContext};
pub use edit_state::EditState;
pub use layout_state::LayoutState;
