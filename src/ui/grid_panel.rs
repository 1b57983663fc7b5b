//! Forecast grid panel rendering
//!
//! Paints the sheet as a spreadsheet grid (header row, period label column,
//! data cells) and reports pointer gestures and keyboard input back to the
//! coordinator. The panel never mutates the engines itself.

use eframe::egui;
use egui::{Align2, FontId, Pos2, Rect, Sense, Stroke, StrokeKind, Vec2};
use forecast_grid::CellCoord;

use crate::app::sheet_host::cell_text;
use crate::app::AppState;
use crate::presentation::cell_style::{self, GridColors};
use crate::state::LayoutState;
use crate::ui::input::grid_input_handler::{collect_grid_input, GridInput};

/// Result of user interaction with the grid panel
pub enum GridPanelInteraction {
    /// Primary button pressed on a data cell
    CellPressed { row: usize, col: usize },
    /// Pointer moved over a data cell while a drag is in progress
    DragMoved { row: usize, col: usize },
    /// Primary button released during a drag
    DragReleased,
    /// Keyboard and clipboard input while the grid has focus
    Input(Vec<GridInput>),
}

/// Pixel layout of the grid.
#[derive(Debug, Clone, Copy)]
pub struct GridGeometry {
    pub origin: Pos2,
    pub label_width: f32,
    pub column_width: f32,
    pub row_height: f32,
    pub rows: usize,
    pub cols: usize,
}

impl GridGeometry {
    pub fn new(origin: Pos2, layout: &LayoutState, rows: usize, cols: usize) -> Self {
        Self {
            origin,
            label_width: layout.label_width(),
            column_width: layout.column_width(),
            row_height: layout.row_height(),
            rows,
            cols,
        }
    }

    /// Size including the header row and label column.
    pub fn size(&self) -> Vec2 {
        egui::vec2(
            self.label_width + self.column_width * self.cols as f32,
            self.row_height * (self.rows + 1) as f32,
        )
    }

    pub fn cell_rect(&self, row: usize, col: usize) -> Rect {
        Rect::from_min_size(
            egui::pos2(
                self.origin.x + self.label_width + self.column_width * col as f32,
                self.origin.y + self.row_height * (row + 1) as f32,
            ),
            egui::vec2(self.column_width, self.row_height),
        )
    }

    pub fn header_rect(&self, col: usize) -> Rect {
        Rect::from_min_size(
            egui::pos2(self.origin.x + self.label_width + self.column_width * col as f32, self.origin.y),
            egui::vec2(self.column_width, self.row_height),
        )
    }

    pub fn label_rect(&self, row: usize) -> Rect {
        Rect::from_min_size(
            egui::pos2(self.origin.x, self.origin.y + self.row_height * (row + 1) as f32),
            egui::vec2(self.label_width, self.row_height),
        )
    }

    /// Data cell under `pos`. Header row and label column are not cells.
    pub fn cell_at(&self, pos: Pos2) -> Option<CellCoord> {
        let x = pos.x - self.origin.x - self.label_width;
        let y = pos.y - self.origin.y - self.row_height;
        if x < 0.0 || y < 0.0 {
            return None;
        }

        let col = (x / self.column_width) as usize;
        let row = (y / self.row_height) as usize;
        let cell = CellCoord::new(row, col);
        cell.in_bounds(self.rows, self.cols).then_some(cell)
    }
}

/// Renders the grid panel
///
/// # Arguments
/// * `ui` - The egui UI context for drawing
/// * `state` - Mutable reference to application state
/// * `is_loading` - True while a sheet is being loaded in the background
///
/// # Returns
/// * Interactions of this frame, in the order they happened
pub fn render_grid_panel(ui: &mut egui::Ui, state: &mut AppState, is_loading: bool) -> Vec<GridPanelInteraction> {
    let mut interactions = Vec::new();

    let Some(sheet) = state.sheet.sheet() else {
        ui.centered_and_justified(|ui| {
            let text = if is_loading { "Loading sheet..." } else { "No sheet loaded" };
            ui.label(egui::RichText::new(text).size(20.0).weak());
        });
        return interactions;
    };
    let rows = sheet.row_count();
    let cols = sheet.col_count();

    egui::ScrollArea::both()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            let geometry = GridGeometry::new(ui.cursor().min, &state.layout, rows, cols);
            let (rect, response) = ui.allocate_exact_size(geometry.size(), Sense::click_and_drag());

            // Arrows, Tab and Escape belong to the grid while it has focus
            ui.memory_mut(|m| {
                m.set_focus_lock_filter(
                    response.id,
                    egui::EventFilter {
                        tab: true,
                        horizontal_arrows: true,
                        vertical_arrows: true,
                        escape: true,
                        ..Default::default()
                    },
                )
            });

            let pressed = response.is_pointer_button_down_on() && ui.input(|i| i.pointer.primary_pressed());
            if pressed {
                response.request_focus();
                if let Some(cell) = ui.input(|i| i.pointer.press_origin()).and_then(|p| geometry.cell_at(p)) {
                    interactions.push(GridPanelInteraction::CellPressed { row: cell.row, col: cell.col });
                }
            } else if ui.memory(|m| m.focused().is_none()) {
                response.request_focus();
            }

            if state.drag_copy.is_dragging() {
                if let Some(cell) = ui.input(|i| i.pointer.hover_pos()).and_then(|p| geometry.cell_at(p)) {
                    interactions.push(GridPanelInteraction::DragMoved { row: cell.row, col: cell.col });
                }
                if ui.input(|i| i.pointer.primary_released() || !i.pointer.primary_down()) {
                    interactions.push(GridPanelInteraction::DragReleased);
                }
            }

            if response.has_focus() {
                let input = collect_grid_input(ui.ctx());
                if !input.is_empty() {
                    interactions.push(GridPanelInteraction::Input(input));
                }
            }

            if state.edit.take_scroll_request() {
                if let Some(active) = state.navigator.active_cell() {
                    ui.scroll_to_rect(geometry.cell_rect(active.row, active.col).expand(4.0), None);
                }
            }

            paint_grid(ui, state, &geometry, rect);
        });

    interactions
}

fn paint_grid(ui: &egui::Ui, state: &AppState, geometry: &GridGeometry, rect: Rect) {
    let Some(sheet) = state.sheet.sheet() else {
        return;
    };
    let colors = GridColors::for_visuals(ui.visuals());
    let painter = ui.painter_at(rect);
    let clip = ui.clip_rect();
    let font = FontId::proportional(13.0);
    let small = FontId::proportional(10.0);
    let gridline = Stroke::new(1.0, colors.gridline);

    // Header row
    for (col, name) in sheet.columns.iter().enumerate() {
        let cell = geometry.header_rect(col);
        if !clip.intersects(cell) {
            continue;
        }
        painter.rect_filled(cell, 0.0, colors.header_fill);
        painter.rect_stroke(cell, 0.0, gridline, StrokeKind::Inside);
        painter.with_clip_rect(cell.shrink(2.0)).text(
            cell.center(),
            Align2::CENTER_CENTER,
            name,
            font.clone(),
            colors.text,
        );
    }

    // Period labels
    for (row, period) in sheet.periods.iter().enumerate() {
        let cell = geometry.label_rect(row);
        if !clip.intersects(cell) {
            continue;
        }
        painter.rect_filled(cell, 0.0, colors.header_fill);
        painter.rect_stroke(cell, 0.0, gridline, StrokeKind::Inside);
        let label = if period.locked {
            format!("🔒 {}", period.label)
        } else {
            period.label.clone()
        };
        painter.text(
            cell.left_center() + egui::vec2(6.0, 0.0),
            Align2::LEFT_CENTER,
            label,
            font.clone(),
            if period.locked { colors.text_dim } else { colors.text },
        );
    }

    // Data cells
    for row in 0..geometry.rows {
        for col in 0..geometry.cols {
            let cell = geometry.cell_rect(row, col);
            if !clip.intersects(cell) {
                continue;
            }

            let editable = state.sheet.is_editable(row, col);
            let locked = sheet.is_cell_locked(row, col);
            let fill = cell_style::cell_fill(&colors, locked, state.sheet.is_overridden(row, col));
            painter.rect_filled(cell, 0.0, fill);
            painter.rect_stroke(cell, 0.0, gridline, StrokeKind::Inside);

            let mut text = cell_text(&state.sheet, &state.edit, row, col);
            let is_active = state.navigator.is_active(row, col);
            if is_active && state.navigator.is_editing() && editable {
                text.push('|');
            }
            let text_color = if editable { colors.text } else { colors.text_dim };
            painter.with_clip_rect(cell.shrink(2.0)).text(
                cell.right_center() - egui::vec2(6.0, 0.0),
                Align2::RIGHT_CENTER,
                text,
                font.clone(),
                text_color,
            );

            if state.sheet.comparison_mode() {
                let variance = state.sheet.variance(row, col);
                if variance.percent != 0.0 {
                    painter.text(
                        cell.left_center() + egui::vec2(4.0, 0.0),
                        Align2::LEFT_CENTER,
                        format!("{:+.1}%", variance.percent),
                        small.clone(),
                        cell_style::variance_color(variance.tone()),
                    );
                }
            }

            // Drag preview border is only shown on cells a paste could change
            if state.drag_copy.is_preview_cell(row, col) && editable {
                painter.rect_stroke(cell, 0.0, Stroke::new(2.0, colors.preview_stroke), StrokeKind::Inside);
            }
            if is_active {
                painter.rect_stroke(cell, 0.0, Stroke::new(2.0, colors.active_stroke), StrokeKind::Outside);
            }
        }
    }
}

/// Renders the column width slider shown above the grid.
pub fn render_width_controls(ui: &mut egui::Ui, layout: &mut LayoutState) {
    ui.horizontal(|ui| {
        let mut width = layout.column_width();
        ui.label("Column width:");
        if ui
            .add(egui::Slider::new(&mut width, LayoutState::MIN_COLUMN_WIDTH..=LayoutState::MAX_COLUMN_WIDTH))
            .changed()
        {
            layout.set_column_width(width);
        }

        let mut label_width = layout.label_width();
        ui.label("Label width:");
        if ui
            .add(egui::Slider::new(&mut label_width, LayoutState::MIN_COLUMN_WIDTH..=LayoutState::MAX_COLUMN_WIDTH))
            .changed()
        {
            layout.set_label_width(label_width);
        }
    });
}
