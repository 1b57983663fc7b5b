//! Header panel UI rendering
//!
//! Handles the top bar with file controls, sample sheets and edit controls.

use eframe::egui;
use egui::Color32;
use forecast_grid::SheetKind;
use std::path::PathBuf;

use crate::app::AppState;
use crate::ui::grid_panel::render_width_controls;

/// Result of user interaction with the header panel
pub enum HeaderInteraction {
    /// User picked a sheet file to open
    OpenFileRequested(PathBuf),
    /// User picked where to save the sheet
    SaveRequested(PathBuf),
    /// User asked for a generated sample sheet
    SampleRequested(SheetKind),
    /// User toggled comparison (read-only) mode
    ComparisonToggled(bool),
    /// User dropped all pending overrides
    DiscardEditsRequested,
}

fn sheet_dialog() -> rfd::FileDialog {
    let mut dialog = rfd::FileDialog::new().add_filter("Forecast Sheets", &["json"]);
    if let Ok(cwd) = std::env::current_dir() {
        dialog = dialog.set_directory(cwd);
    }
    dialog
}

/// Renders the application header
///
/// # Arguments
/// * `ui` - The egui UI context for drawing
/// * `state` - Mutable reference to application state
///
/// # Returns
/// * `Option<HeaderInteraction>` - User interaction result
pub fn render_header(ui: &mut egui::Ui, state: &mut AppState) -> Option<HeaderInteraction> {
    let mut interaction = None;

    ui.horizontal(|ui| {
        if ui.button("📁 Open Sheet").clicked() {
            if let Some(path) = sheet_dialog().pick_file() {
                interaction = Some(HeaderInteraction::OpenFileRequested(path));
            }
        }

        let has_sheet = state.sheet.sheet().is_some();
        if ui.add_enabled(has_sheet, egui::Button::new("💾 Save")).clicked() {
            let target = match state.sheet.file_path() {
                Some(path) => Some(path.to_path_buf()),
                None => sheet_dialog().set_file_name("forecast.json").save_file(),
            };
            if let Some(path) = target {
                interaction = Some(HeaderInteraction::SaveRequested(path));
            }
        }

        ui.separator();

        for kind in SheetKind::ALL {
            if ui.button(format!("🔮 Sample {}", kind.label())).clicked() {
                interaction = Some(HeaderInteraction::SampleRequested(kind));
            }
        }

        if has_sheet {
            ui.separator();

            let mut comparison = state.sheet.comparison_mode();
            let response = ui.checkbox(&mut comparison, "Compare to budget");
            if response.changed() {
                interaction = Some(HeaderInteraction::ComparisonToggled(comparison));
            }
            response.on_hover_text("Show variance against budget; cells are read-only");

            let pending = state.sheet.ledger().has_unsaved_changes();
            if ui.add_enabled(pending, egui::Button::new("↺ Discard Edits")).clicked() {
                interaction = Some(HeaderInteraction::DiscardEditsRequested);
            }
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            render_width_controls(ui, &mut state.layout);
        });
    });

    if let Some(err) = &state.error_message {
        ui.colored_label(Color32::RED, err);
    }

    interaction
}
