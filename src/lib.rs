pub mod cell;
pub mod keys;
pub mod traits;
pub mod navigation;
pub mod drag_select;
pub mod clipboard;
pub mod overrides;
pub mod forecast;

// Export host seams
pub use traits::{GridHost, ClipboardHost, ClipboardBackend};

// Export engine types
pub use cell::{CellCoord, Direction, TabDirection, cell_id};
pub use keys::{Key, KeyInput, KeyOutcome, Modifiers, ClipboardShortcut};
pub use navigation::{
    GridNavigator, NavigationConfig, CellProps, TableProps,
    find_next_navigable_cell, find_navigable_in_direction
};
pub use drag_select::{DragSelection, selection_between};
pub use clipboard::{
    DragCopy, ClipboardError, PasteAnchor, PasteRequest, PastePlan, PendingPaste,
    MemoryClipboard, ClipboardGrid, parse_clipboard_values, resolve_paste_targets,
    determine_start_cell
};

// Export forecast edit policy
pub use overrides::{
    EditLedger, EditOutcome, ReplaceOnInput, Variance, VarianceTone,
    parse_cell_input, display_fallback, REVERT_TOLERANCE
};

// Export sheet model
pub use forecast::{ForecastSheet, SheetKind, Period, CellFigures, load_sheet, save_sheet};
