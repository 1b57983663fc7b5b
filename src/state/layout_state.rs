//! UI layout state management.
//!
//! This module encapsulates all state related to grid layout,
//! including column widths and row height.

use serde::{Deserialize, Serialize};

use forecast_grid::SheetKind;

/// State related to grid layout and sizing.
///
/// Responsibilities:
/// - Tracking the period label column width and data column width
/// - Tracking row height
/// - Remembering the last sheet kind opened
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutState {
    /// Width of the leftmost period label column
    label_width: f32,
    /// Width of every data column
    column_width: f32,
    /// Height of header and data rows
    row_height: f32,
    /// Sheet kind restored on startup when no file is given
    last_kind: SheetKind,
}

impl Default for LayoutState {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutState {
    pub const MIN_COLUMN_WIDTH: f32 = 60.0;
    pub const MAX_COLUMN_WIDTH: f32 = 400.0;

    /// Creates a new layout state with default values.
    pub fn new() -> Self {
        Self {
            label_width: 110.0,
            column_width: 140.0,
            row_height: 24.0,
            last_kind: SheetKind::OtherRevenue,
        }
    }

    /// Creates a layout state with persisted widths.
    pub fn with_widths(label_width: f32, column_width: f32) -> Self {
        let mut layout = Self::new();
        layout.set_label_width(label_width);
        layout.set_column_width(column_width);
        layout
    }

    // ===== Layout Queries =====

    pub fn label_width(&self) -> f32 {
        self.label_width
    }

    pub fn column_width(&self) -> f32 {
        self.column_width
    }

    pub fn row_height(&self) -> f32 {
        self.row_height
    }

    pub fn last_kind(&self) -> SheetKind {
        self.last_kind
    }

    // ===== Mutations =====

    pub fn set_label_width(&mut self, width: f32) {
        self.label_width = width.clamp(Self::MIN_COLUMN_WIDTH, Self::MAX_COLUMN_WIDTH);
    }

    pub fn set_column_width(&mut self, width: f32) {
        self.column_width = width.clamp(Self::MIN_COLUMN_WIDTH, Self::MAX_COLUMN_WIDTH);
    }

    pub fn set_last_kind(&mut self, kind: SheetKind) {
        self.last_kind = kind;
    }
}
