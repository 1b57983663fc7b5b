//! Panel orchestration and layout management.
//!
//! Coordinates the header, grid and status panels and collects their
//! interactions for the application to handle.

use crate::app::AppState;
use crate::io::AsyncLoader;
use crate::ui::{grid_panel, header, status_bar};

/// Result of panel interactions that need to be handled by the coordinators.
pub enum PanelInteraction {
    Header(header::HeaderInteraction),
    Grid(grid_panel::GridPanelInteraction),
}

/// Manages the layout and rendering of all UI panels.
pub struct PanelManager;

impl PanelManager {
    /// Renders all panels in the application window.
    ///
    /// This is the main entry point for rendering the entire UI, called from
    /// the eframe::App::update() implementation.
    pub fn render_all_panels(
        ctx: &egui::Context,
        state: &mut AppState,
        loader: &AsyncLoader,
    ) -> Vec<PanelInteraction> {
        let mut interactions = Vec::new();

        // Header panel at the top
        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            if let Some(header_interaction) = header::render_header(ui, state) {
                interactions.push(PanelInteraction::Header(header_interaction));
            }
        });

        // Status panel at the very bottom
        egui::TopBottomPanel::bottom("status_panel").show(ctx, |ui| {
            status_bar::render_status_bar(ui, state, loader.is_loading());
        });

        let grid_frame = egui::Frame::default()
            .inner_margin(egui::Margin::same(4))
            .fill(ctx.style().visuals.panel_fill);

        egui::CentralPanel::default()
            .frame(grid_frame)
            .show(ctx, |ui| {
                let grid_interactions = grid_panel::render_grid_panel(ui, state, loader.is_loading());
                interactions.extend(grid_interactions.into_iter().map(PanelInteraction::Grid));
            });

        interactions
    }
}
