//! Application-level coordination and workflow management.
//!
//! Handles high-level application operations like opening and saving sheets,
//! error handling, and keeping the grid engines in step with the loaded sheet.

use crate::app::AppState;
use crate::io::{AsyncLoader, LoadResult};
use anyhow::{Context, Result};
use forecast_grid::{save_sheet, CellCoord, ForecastSheet, SheetKind};
use log::{info, warn};
use std::path::{Path, PathBuf};

/// Number of months in a generated sample sheet.
pub const SAMPLE_MONTHS: usize = 24;

/// Coordinates application-level operations and workflows.
///
/// This struct is responsible for:
/// - Managing sheet loading workflows
/// - Handling loading completion
/// - Saving overrides back to disk
/// - Managing error states
pub struct ApplicationCoordinator;

impl ApplicationCoordinator {
    /// Initiates asynchronous sheet loading.
    ///
    /// Immediately clears the previous sheet to show the loading indicator.
    pub fn open_file(
        state: &mut AppState,
        loader: &mut AsyncLoader,
        path: PathBuf,
        ctx: &egui::Context,
    ) {
        state.sheet.clear();
        state.reset_grid_state();
        state.error_message = None;

        loader.start_file_load(path, ctx);
    }

    /// Checks for loading completion and applies results to application state.
    ///
    /// Called once per frame in the update loop.
    /// Returns true if a load operation completed (success or error).
    pub fn check_loading_completion(state: &mut AppState, loader: &mut AsyncLoader) -> bool {
        match loader.check_completion() {
            LoadResult::Success { sheet, path } => {
                Self::install_sheet(state, sheet, Some(path));
                true
            }
            LoadResult::Error(error_msg) => {
                warn!("{}", error_msg);
                state.error_message = Some(format!("Error loading sheet: {}", error_msg));
                state.sheet.clear();
                state.reset_grid_state();
                true
            }
            LoadResult::None => false,
        }
    }

    /// Generates and loads a sample sheet in-memory.
    pub fn open_sample(state: &mut AppState, kind: SheetKind, seed: u64) {
        let sheet = ForecastSheet::sample(kind, SAMPLE_MONTHS, seed);
        Self::install_sheet(state, sheet, None);
    }

    /// Makes `sheet` current and puts the cursor on its first editable cell.
    fn install_sheet(state: &mut AppState, sheet: ForecastSheet, path: Option<PathBuf>) {
        let kind = sheet.kind;
        info!("opened {} with {} periods", sheet.title, sheet.row_count());

        state.sheet.load(sheet, path);
        state.layout.set_last_kind(kind);
        state.error_message = None;
        state.reset_grid_state();

        let first = (0..state.sheet.row_count())
            .find(|&row| state.sheet.is_editable(row, 0))
            .unwrap_or(0);
        let (navigator, mut host) = state.navigator_and_host();
        navigator.set_active_cell(CellCoord::new(first, 0), &mut host);
    }

    /// Writes the sheet with its pending edits to `path`.
    ///
    /// The edits are committed only once the file is written, so a failed
    /// save keeps them pending.
    pub fn save_to(state: &mut AppState, path: &Path) -> Result<usize> {
        state.host().commit_buffer();

        let (sheet, written) = state.sheet.committed_sheet().context("no sheet is open")?;
        save_sheet(path, &sheet)?;
        state.sheet.commit_edits();
        state.sheet.set_file_path(path.to_path_buf());

        // The buffer now shows a committed value
        let (navigator, mut host) = state.navigator_and_host();
        navigator.refresh_activation(&mut host);

        info!("saved {} overrides to {}", written, path.display());
        Ok(written)
    }

    /// Saves and reports failures through the error message.
    pub fn save(state: &mut AppState, path: PathBuf) {
        match Self::save_to(state, &path) {
            Ok(_) => state.error_message = None,
            Err(e) => state.error_message = Some(format!("Error saving sheet: {:#}", e)),
        }
    }

    /// Drops every override and restores the active cell's text.
    pub fn discard_edits(state: &mut AppState) {
        state.sheet.discard_edits();
        state.edit.reset();
        let (navigator, mut host) = state.navigator_and_host();
        navigator.refresh_activation(&mut host);
    }

    /// Switches comparison (read-only) mode.
    pub fn set_comparison_mode(state: &mut AppState, enabled: bool) {
        if enabled {
            state.host().commit_buffer();
            state.navigator.stop_editing();
        }
        state.sheet.set_comparison_mode(enabled);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use forecast_grid::load_sheet;

    #[test]
    fn test_sample_activates_first_editable_cell() {
        let mut state = AppState::new();
        ApplicationCoordinator::open_sample(&mut state, SheetKind::OtherRevenue, 1);

        assert_eq!(state.navigator.active_cell(), Some(CellCoord::new(3, 0)));
        assert_eq!(state.edit.cell(), Some(CellCoord::new(3, 0)));
        assert_eq!(state.drag_copy.context().period_ids.len(), SAMPLE_MONTHS);
    }

    #[test]
    fn test_save_commits_overrides() -> anyhow::Result<()> {
        let mut state = AppState::new();
        ApplicationCoordinator::open_sample(&mut state, SheetKind::OtherRevenue, 4);
        state.sheet.apply_edit(7, 1, "321");

        let path = std::env::temp_dir().join("forecast_grid_save_test.json");
        let written = ApplicationCoordinator::save_to(&mut state, &path)?;
        assert_eq!(written, 1);
        assert!(!state.sheet.ledger().has_unsaved_changes());

        let reloaded = load_sheet(&path)?;
        assert_eq!(reloaded.figures(7, 1).and_then(|f| f.forecast), Some(321.0));
        std::fs::remove_file(&path).ok();
        Ok(())
    }

    #[test]
    fn test_failed_save_keeps_pending_edits() {
        let mut state = AppState::new();
        ApplicationCoordinator::open_sample(&mut state, SheetKind::OtherRevenue, 4);
        state.sheet.apply_edit(5, 0, "123");
        let before = state.sheet.sheet().cloned();

        let path = std::env::temp_dir()
            .join("forecast_grid_missing_dir")
            .join("nested")
            .join("sheet.json");
        assert!(ApplicationCoordinator::save_to(&mut state, &path).is_err());

        assert_eq!(state.sheet.ledger().len(), 1);
        assert!(state.sheet.ledger().has_unsaved_changes());
        assert_eq!(state.sheet.display_value(5, 0), 123.0);
        assert_eq!(state.sheet.sheet().cloned(), before);
        assert!(state.sheet.file_path().is_none());
    }

    #[test]
    fn test_zero_override_survives_save_and_reload() -> anyhow::Result<()> {
        let mut state = AppState::new();
        ApplicationCoordinator::open_sample(&mut state, SheetKind::OtherRevenue, 6);
        state.sheet.apply_edit(5, 0, "0");
        assert_eq!(state.sheet.display_value(5, 0), 0.0);

        let path = std::env::temp_dir().join("forecast_grid_zero_override.json");
        ApplicationCoordinator::save_to(&mut state, &path)?;
        assert_eq!(state.sheet.display_value(5, 0), 0.0);

        let reloaded = load_sheet(&path)?;
        let figures = reloaded.figures(5, 0).copied().unwrap_or_default();
        assert_eq!(figures.forecast, Some(0.0));
        assert_eq!(figures.shown_value(), 0.0);
        std::fs::remove_file(&path).ok();
        Ok(())
    }

    #[test]
    fn test_new_sheet_kinds_open_on_first_open_period() {
        for kind in [SheetKind::OtherExpenses, SheetKind::Statistics] {
            let mut state = AppState::new();
            ApplicationCoordinator::open_sample(&mut state, kind, 3);

            assert_eq!(state.sheet.kind(), Some(kind));
            assert_eq!(state.sheet.col_count(), kind.columns().len());
            let active = state.navigator.active_cell().unwrap();
            assert!(active.row >= 3);
            assert!(state.sheet.is_editable(active.row, active.col));
        }
    }

    #[test]
    fn test_save_without_sheet_fails() {
        let mut state = AppState::new();
        let path = std::env::temp_dir().join("forecast_grid_nothing.json");
        assert!(ApplicationCoordinator::save_to(&mut state, &path).is_err());
    }

    #[test]
    fn test_discard_restores_active_text() {
        let mut state = AppState::new();
        ApplicationCoordinator::open_sample(&mut state, SheetKind::OtherRevenue, 2);
        state.sheet.apply_edit(3, 0, "1");
        ApplicationCoordinator::discard_edits(&mut state);

        let expected = crate::app::sheet_host::format_figure(state.sheet.original_value(3, 0));
        assert_eq!(state.edit.buffer(), expected);
        assert!(state.sheet.ledger().is_empty());
    }
}
