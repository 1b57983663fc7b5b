//! Loaded sheet and its pending overrides.
//!
//! This module owns the forecast sheet being edited, where it came from, and
//! the overrides that have not been written back yet.

use std::path::{Path, PathBuf};

use forecast_grid::{
    CellCoord, EditLedger, EditOutcome, ForecastSheet, SheetKind, Variance,
};

/// Row and column keys handed to the copy/paste callbacks.
///
/// Overrides are keyed by period id and column name, not by position, so a
/// coordinate is turned into a key through this context.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SheetContext {
    pub period_ids: Vec<String>,
    pub columns: Vec<String>,
}

impl SheetContext {
    pub fn from_sheet(sheet: &ForecastSheet) -> Self {
        Self {
            period_ids: sheet.periods.iter().map(|p| p.id.clone()).collect(),
            columns: sheet.columns.clone(),
        }
    }

    /// Domain key of `cell`, if it is inside the sheet.
    pub fn key(&self, cell: CellCoord) -> Option<(&String, &String)> {
        Some((self.period_ids.get(cell.row)?, self.columns.get(cell.col)?))
    }
}

/// State of the sheet being edited.
///
/// Responsibilities:
/// - Holding the loaded sheet and its file path
/// - Tracking per-cell overrides in an [`EditLedger`]
/// - Answering display and editability queries per cell
#[derive(Debug, Default)]
pub struct SheetState {
    sheet: Option<ForecastSheet>,
    path: Option<PathBuf>,
    ledger: EditLedger<String, String>,
    comparison_mode: bool,
}

impl SheetState {
    pub fn new() -> Self {
        Self::default()
    }

    // ===== Queries =====

    pub fn sheet(&self) -> Option<&ForecastSheet> {
        self.sheet.as_ref()
    }

    pub fn kind(&self) -> Option<SheetKind> {
        self.sheet.as_ref().map(|s| s.kind)
    }

    pub fn file_path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn row_count(&self) -> usize {
        self.sheet.as_ref().map_or(0, ForecastSheet::row_count)
    }

    pub fn col_count(&self) -> usize {
        self.sheet.as_ref().map_or(0, ForecastSheet::col_count)
    }

    pub fn ledger(&self) -> &EditLedger<String, String> {
        &self.ledger
    }

    pub fn comparison_mode(&self) -> bool {
        self.comparison_mode
    }

    pub fn context(&self) -> SheetContext {
        self.sheet.as_ref().map(SheetContext::from_sheet).unwrap_or_default()
    }

    /// Figure a cell shows when it has no override.
    pub fn original_value(&self, row: usize, col: usize) -> f64 {
        self.sheet
            .as_ref()
            .and_then(|s| s.figures(row, col))
            .map_or(0.0, |f| f.shown_value())
    }

    /// Override if there is one, else the original figure.
    pub fn display_value(&self, row: usize, col: usize) -> f64 {
        self.key_of(row, col)
            .and_then(|(period, column)| self.ledger.get(&period, &column))
            .unwrap_or_else(|| self.original_value(row, col))
    }

    pub fn is_overridden(&self, row: usize, col: usize) -> bool {
        self.key_of(row, col)
            .is_some_and(|(period, column)| self.ledger.get(&period, &column).is_some())
    }

    /// Variance of the displayed value against budget.
    pub fn variance(&self, row: usize, col: usize) -> Variance {
        let budget = self
            .sheet
            .as_ref()
            .and_then(|s| s.figures(row, col))
            .and_then(|f| f.budget);
        Variance::between(budget, self.display_value(row, col))
    }

    /// Locked periods, frozen actuals and comparison mode are read-only.
    pub fn is_editable(&self, row: usize, col: usize) -> bool {
        match &self.sheet {
            Some(sheet) => {
                !self.comparison_mode
                    && row < sheet.row_count()
                    && col < sheet.col_count()
                    && !sheet.is_cell_locked(row, col)
            }
            None => false,
        }
    }

    // ===== Mutations =====

    /// Replaces the sheet, dropping all overrides.
    pub fn load(&mut self, sheet: ForecastSheet, path: Option<PathBuf>) {
        self.sheet = Some(sheet);
        self.path = path;
        self.ledger.clear();
    }

    pub fn clear(&mut self) {
        self.sheet = None;
        self.path = None;
        self.ledger.clear();
    }

    pub fn set_file_path(&mut self, path: PathBuf) {
        self.path = Some(path);
    }

    pub fn set_comparison_mode(&mut self, enabled: bool) {
        self.comparison_mode = enabled;
    }

    /// Applies raw input to the cell at `(row, col)` through the ledger.
    pub fn apply_edit(&mut self, row: usize, col: usize, raw: &str) -> EditOutcome {
        if !self.is_editable(row, col) {
            return EditOutcome::Rejected;
        }
        let Some((period, column)) = self.key_of(row, col) else {
            return EditOutcome::Rejected;
        };
        let original = self.original_value(row, col);
        self.ledger.apply(&period, &column, raw, original)
    }

    pub fn discard_edits(&mut self) {
        self.ledger.clear();
    }

    /// A copy of the sheet with every override written into its forecast
    /// figures, and the number of cells written. The ledger is untouched.
    pub fn committed_sheet(&self) -> Option<(ForecastSheet, usize)> {
        let mut sheet = self.sheet.clone()?;
        let written = write_overrides(&mut sheet, &self.ledger);
        Some((sheet, written))
    }

    /// Writes every override into the sheet's forecast figures and clears the
    /// ledger. Returns the number of cells written.
    pub fn commit_edits(&mut self) -> usize {
        let Some(sheet) = self.sheet.as_mut() else {
            return 0;
        };
        let written = write_overrides(sheet, &self.ledger);
        self.ledger.clear();
        written
    }

    fn key_of(&self, row: usize, col: usize) -> Option<(String, String)> {
        let sheet = self.sheet.as_ref()?;
        Some((sheet.periods.get(row)?.id.clone(), sheet.columns.get(col)?.clone()))
    }
}

fn write_overrides(sheet: &mut ForecastSheet, ledger: &EditLedger<String, String>) -> usize {
    let mut written = 0;
    for (period, column, value) in ledger.iter() {
        let row = sheet.periods.iter().position(|p| &p.id == period);
        let col = sheet.columns.iter().position(|c| c == column);
        if let (Some(row), Some(col)) = (row, col) {
            if let Some(figures) = sheet.figures_mut(row, col) {
                figures.set_forecast(value);
                written += 1;
            }
        }
    }
    written
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded() -> SheetState {
        let mut state = SheetState::new();
        state.load(ForecastSheet::sample(SheetKind::OtherRevenue, 6, 11), None);
        state
    }

    #[test]
    fn test_locked_rows_are_read_only() {
        let state = loaded();
        assert!(!state.is_editable(0, 0));
        assert!(state.is_editable(3, 0));
        assert!(!state.is_editable(6, 0));
    }

    #[test]
    fn test_comparison_mode_is_read_only() {
        let mut state = loaded();
        state.set_comparison_mode(true);
        assert!(!state.is_editable(4, 1));
        assert_eq!(state.apply_edit(4, 1, "10"), EditOutcome::Rejected);
    }

    #[test]
    fn test_edit_and_revert() {
        let mut state = loaded();
        let original = state.original_value(4, 1);

        assert_eq!(state.apply_edit(4, 1, "123.45"), EditOutcome::Recorded(123.45));
        assert_eq!(state.display_value(4, 1), 123.45);
        assert!(state.is_overridden(4, 1));

        let back = format!("{:.2}", original);
        assert_eq!(state.apply_edit(4, 1, &back), EditOutcome::Reverted);
        assert!(!state.is_overridden(4, 1));
        assert!(!state.ledger().has_unsaved_changes());
    }

    #[test]
    fn test_commit_writes_forecast() {
        let mut state = loaded();
        state.apply_edit(5, 2, "999");
        assert_eq!(state.commit_edits(), 1);

        let figures = state.sheet().and_then(|s| s.figures(5, 2)).copied();
        assert_eq!(figures.and_then(|f| f.forecast), Some(999.0));
        assert_eq!(state.display_value(5, 2), 999.0);
        assert!(state.ledger().is_empty());
    }

    #[test]
    fn test_committed_zero_override_stays_zero() {
        let mut state = loaded();
        assert!(state.original_value(5, 0) > 0.0);

        assert_eq!(state.apply_edit(5, 0, "0"), EditOutcome::Recorded(0.0));
        state.commit_edits();
        assert_eq!(state.display_value(5, 0), 0.0);
        assert_eq!(state.original_value(5, 0), 0.0);
        assert!(!state.is_overridden(5, 0));
    }

    #[test]
    fn test_committed_sheet_keeps_ledger() {
        let mut state = loaded();
        state.apply_edit(4, 2, "77");

        let (sheet, written) = state.committed_sheet().unwrap();
        assert_eq!(written, 1);
        assert_eq!(sheet.figures(4, 2).and_then(|f| f.forecast), Some(77.0));
        assert_eq!(state.ledger().len(), 1);
        assert!(state.sheet().and_then(|s| s.figures(4, 2)).is_some_and(|f| !f.edited));
    }

    #[test]
    fn test_actualized_expense_cells_are_read_only() {
        let mut sheet = ForecastSheet::sample(SheetKind::OtherExpenses, 6, 3);
        sheet.figures[4][1].actual = Some(50.0);
        sheet.figures[4][2].actual = None;
        let mut state = SheetState::new();
        state.load(sheet, None);

        assert!(!state.is_editable(4, 1));
        assert!(state.is_editable(4, 2));
        assert_eq!(state.apply_edit(4, 1, "10"), EditOutcome::Rejected);
    }

    #[test]
    fn test_context_keys() {
        let state = loaded();
        let context = state.context();
        let (period, column) = context.key(CellCoord::new(1, 0)).unwrap();
        assert_eq!(period, "2026-02");
        assert_eq!(column, "Ancillary Revenue");
        assert!(context.key(CellCoord::new(9, 0)).is_none());
    }
}
