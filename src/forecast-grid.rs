//! Forecast Grid Editor
//!
//! Spreadsheet-style editor for forecast sheets built with egui. The editor
//! features:
//! - Keyboard navigation with a single active cell (arrows, Tab, Enter, Escape)
//! - Click-to-edit and in-place typing with replace-on-first-keystroke
//! - Drag selection down a column with copy, fill-down paste and block paste
//! - Pending overrides that revert when set back to the original figure
//! - Asynchronous sheet loading and persistent layout preferences
//!
//! The application is built with a modular architecture:
//! - `app/` - Application state, coordinators and the grid host
//! - `state/` - Sheet, edit and layout state
//! - `presentation/` - Cell colors (separated from grid state)
//! - `io/` - Async sheet loading and the egui clipboard backend
//! - `ui/` - UI panel rendering and input translation

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use eframe::egui;
use std::path::PathBuf;

mod app;
mod io;
mod presentation;
mod state;
mod ui;

use app::{AppState, ApplicationCoordinator, GridCoordinator, SettingsCoordinator};
use io::{AsyncLoader, EguiClipboard};
use ui::grid_panel::GridPanelInteraction;
use ui::header::HeaderInteraction;
use ui::panel_manager::{PanelInteraction, PanelManager};

/// Seed for sample sheets opened from the header.
const SAMPLE_SEED: u64 = 42;

/// Main application entry point that initializes and launches the editor GUI.
fn main() -> eframe::Result {
    env_logger::init();

    // Parse command-line arguments to check for initial file to load
    let initial_file = std::env::args().nth(1).map(PathBuf::from);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_title("Forecast Grid"),
        ..Default::default()
    };

    eframe::run_native(
        "Forecast Grid",
        options,
        Box::new(move |cc| Ok(Box::new(ForecastGridApp::new(cc, initial_file)))),
    )
}

/// The forecast grid editor application.
///
/// Delegates most functionality to coordinators:
/// - `ApplicationCoordinator` handles opening, saving and error handling
/// - `GridCoordinator` routes grid gestures and keys to the engines
/// - `PanelManager` handles UI panel layout and rendering
struct ForecastGridApp {
    /// Centralized application state
    state: AppState,
    /// Asynchronous sheet loader
    loader: AsyncLoader,
    /// Optional file to load on first frame
    pending_file_load: Option<PathBuf>,
}

impl ForecastGridApp {
    /// Creates the editor with layout settings loaded from persistent storage.
    ///
    /// Without an initial file, a sample sheet of the last used kind is shown.
    fn new(cc: &eframe::CreationContext, initial_file: Option<PathBuf>) -> Self {
        let layout = SettingsCoordinator::load_layout(cc.storage);
        let last_kind = layout.last_kind();
        let mut state = AppState::with_layout(layout);

        if initial_file.is_none() {
            ApplicationCoordinator::open_sample(&mut state, last_kind, SAMPLE_SEED);
        }

        Self {
            state,
            loader: AsyncLoader::new(),
            pending_file_load: initial_file,
        }
    }

    /// Handles panel interactions by delegating to the coordinators.
    fn handle_panel_interaction(&mut self, interaction: PanelInteraction, ctx: &egui::Context) {
        match interaction {
            PanelInteraction::Header(HeaderInteraction::OpenFileRequested(path)) => {
                ApplicationCoordinator::open_file(&mut self.state, &mut self.loader, path, ctx);
            }
            PanelInteraction::Header(HeaderInteraction::SaveRequested(path)) => {
                ApplicationCoordinator::save(&mut self.state, path);
            }
            PanelInteraction::Header(HeaderInteraction::SampleRequested(kind)) => {
                ApplicationCoordinator::open_sample(&mut self.state, kind, SAMPLE_SEED);
            }
            PanelInteraction::Header(HeaderInteraction::ComparisonToggled(enabled)) => {
                ApplicationCoordinator::set_comparison_mode(&mut self.state, enabled);
            }
            PanelInteraction::Header(HeaderInteraction::DiscardEditsRequested) => {
                ApplicationCoordinator::discard_edits(&mut self.state);
            }
            PanelInteraction::Grid(GridPanelInteraction::CellPressed { row, col }) => {
                GridCoordinator::handle_cell_press(&mut self.state, row, col);
            }
            PanelInteraction::Grid(GridPanelInteraction::DragMoved { row, col }) => {
                GridCoordinator::handle_drag_move(&mut self.state, row, col);
            }
            PanelInteraction::Grid(GridPanelInteraction::DragReleased) => {
                GridCoordinator::handle_drag_release(&mut self.state);
            }
            PanelInteraction::Grid(GridPanelInteraction::Input(inputs)) => {
                GridCoordinator::handle_inputs(&mut self.state, inputs, |pasted| match pasted {
                    Some(text) => EguiClipboard::with_pasted(ctx, text),
                    None => EguiClipboard::new(ctx),
                });
            }
        }
    }
}

impl eframe::App for ForecastGridApp {
    /// Called when the app is being shut down - ensures preferences are saved.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        SettingsCoordinator::save_layout(storage, &self.state.layout);
    }

    /// Main update loop.
    ///
    /// 1. Check for async loading completion
    /// 2. Load initial file if specified via command line
    /// 3. Render all panels via PanelManager
    /// 4. Handle panel interactions in order
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ApplicationCoordinator::check_loading_completion(&mut self.state, &mut self.loader);

        // Load initial file if specified via command line (only on first frame)
        if let Some(path) = self.pending_file_load.take() {
            ApplicationCoordinator::open_file(&mut self.state, &mut self.loader, path, ctx);
        }

        for interaction in PanelManager::render_all_panels(ctx, &mut self.state, &self.loader) {
            self.handle_panel_interaction(interaction, ctx);
        }
    }
}
