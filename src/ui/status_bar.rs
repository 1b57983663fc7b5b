//! Status bar UI rendering
//!
//! Handles the bottom status bar showing the cursor, selection and pending edits.

use eframe::egui;
use egui::RichText;

use crate::app::AppState;

/// Renders the status panel at the bottom of the window
///
/// # Arguments
/// * `ui` - The egui UI context for drawing
/// * `state` - Reference to application state
/// * `is_loading` - True while a sheet is being loaded in the background
pub fn render_status_bar(ui: &mut egui::Ui, state: &AppState, is_loading: bool) {
    ui.horizontal(|ui| {
        if is_loading {
            ui.spinner();
            ui.label(RichText::new("Loading...").strong());
            return;
        }

        let Some(sheet) = state.sheet.sheet() else {
            ui.label(RichText::new("No sheet loaded").strong());
            return;
        };

        let source = state
            .sheet
            .file_path()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "sample".to_string());
        ui.label(RichText::new(format!("{} | {}", sheet.title, source)).strong());

        ui.label(RichText::new("|").strong());
        match state.navigator.active_cell() {
            Some(cell) => {
                let period = sheet.periods.get(cell.row).map_or("?", |p| p.label.as_str());
                let column = sheet.columns.get(cell.col).map_or("?", String::as_str);
                let mode = if state.navigator.is_editing() { "editing" } else { "ready" };
                ui.label(format!("{} | {} / {} | {}", cell.id(), period, column, mode));
            }
            None => {
                ui.label("No active cell");
            }
        }

        let selected = state.drag_copy.selection().len();
        if selected > 0 {
            ui.label(RichText::new("|").strong());
            ui.label(format!("{} selected", selected));
        }

        let pending = state.sheet.ledger().len();
        if pending > 0 {
            ui.label(RichText::new("|").strong());
            ui.label(
                RichText::new(format!("{} unsaved edit{}", pending, if pending == 1 { "" } else { "s" }))
                    .strong()
                    .color(egui::Color32::YELLOW),
            );
        }
    });
}
