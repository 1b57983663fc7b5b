//! Forecast sheet model, sample data and JSON persistence.
//!
//! A sheet is a table of periods (rows) by categories (columns). Each cell
//! carries the budget, forecast and actual figures for that period.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::overrides::display_fallback;

const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

const REVENUE_CATEGORIES: &[&str] = &[
    "Ancillary Revenue",
    "Validations",
    "Billable Expenses",
    "Credit Card Fees",
    "Client Paid Expenses",
];

const EXPENSE_CATEGORIES: &[&str] = &[
    "Employee Relations",
    "Fuel Vehicles",
    "Loss & Damage Claims",
    "Office Supplies",
    "Outside Services",
    "Rents Parking",
    "Repairs & Maintenance",
    "Repairs & Maintenance Vehicle",
    "Signage",
    "Supplies & Equipment",
    "Tickets & Printed Material",
    "Uniforms",
];

const RATE_CATEGORIES: &[&str] = &["Valet Daily", "Valet Monthly", "Self Daily", "Self Monthly"];

/// Statistics grid layout. The last two columns are ratios, the rest counts.
const STATISTIC_COLUMNS: &[&str] = &[
    "Occupied Rooms",
    "Valet Daily",
    "Valet Monthly",
    "Self Daily",
    "Self Monthly",
    "Self Aggregator",
    "Valet Aggregator",
    "Valet Comps",
    "Self Comps",
    "Drive-In Ratio",
    "Capture Ratio",
];
const STATISTIC_RATIO_COLUMNS: usize = 2;

/// Which forecasting grid a sheet belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SheetKind {
    /// Monthly revenue lines. Pastes fill down a single column.
    #[default]
    OtherRevenue,
    /// Monthly expense lines. Actualized cells are read-only even in open
    /// periods.
    OtherExpenses,
    /// Parking rates per category. Pastes place a tab/newline block.
    ParkingRates,
    /// Site statistics in a fixed eleven-column layout.
    Statistics,
}

impl SheetKind {
    pub const ALL: [SheetKind; 4] = [
        SheetKind::OtherRevenue,
        SheetKind::OtherExpenses,
        SheetKind::ParkingRates,
        SheetKind::Statistics,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SheetKind::OtherRevenue => "Other Revenue",
            SheetKind::OtherExpenses => "Other Expenses",
            SheetKind::ParkingRates => "Parking Rates",
            SheetKind::Statistics => "Statistics",
        }
    }

    pub fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "revenue" | "other-revenue" => Some(SheetKind::OtherRevenue),
            "expenses" | "other-expenses" => Some(SheetKind::OtherExpenses),
            "rates" | "parking-rates" => Some(SheetKind::ParkingRates),
            "stats" | "statistics" => Some(SheetKind::Statistics),
            _ => None,
        }
    }

    /// Column headers of a fresh sheet of this kind.
    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            SheetKind::OtherRevenue => REVENUE_CATEGORIES,
            SheetKind::OtherExpenses => EXPENSE_CATEGORIES,
            SheetKind::ParkingRates => RATE_CATEGORIES,
            SheetKind::Statistics => STATISTIC_COLUMNS,
        }
    }

    /// True if pasting places a 2-D block instead of filling down.
    pub fn uses_block_paste(&self) -> bool {
        matches!(self, SheetKind::ParkingRates)
    }

    /// True if a cell with an actual figure cannot be edited.
    pub fn locks_actualized_cells(&self) -> bool {
        matches!(self, SheetKind::OtherExpenses)
    }
}

/// One row of a sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Period {
    /// Stable key, `YYYY-MM`.
    pub id: String,
    pub label: String,
    /// Past periods are actualized and read-only.
    #[serde(default)]
    pub locked: bool,
}

/// Budget, forecast and actual figures of one cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CellFigures {
    pub budget: Option<f64>,
    pub forecast: Option<f64>,
    pub actual: Option<f64>,
    /// The forecast was entered by hand and is shown as-is, zero included.
    #[serde(default)]
    pub edited: bool,
}

impl CellFigures {
    /// The figure the cell shows.
    pub fn shown_value(&self) -> f64 {
        if self.edited {
            self.forecast.unwrap_or(0.0)
        } else {
            display_fallback(self.forecast, self.budget)
        }
    }

    /// Stores a hand-entered forecast.
    pub fn set_forecast(&mut self, value: f64) {
        self.forecast = Some(value);
        self.edited = true;
    }
}

/// A forecasting table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSheet {
    pub kind: SheetKind,
    pub title: String,
    pub columns: Vec<String>,
    pub periods: Vec<Period>,
    /// `figures[row][col]`, one row per period.
    pub figures: Vec<Vec<CellFigures>>,
}

impl ForecastSheet {
    pub fn row_count(&self) -> usize {
        self.periods.len()
    }

    pub fn col_count(&self) -> usize {
        self.columns.len()
    }

    pub fn figures(&self, row: usize, col: usize) -> Option<&CellFigures> {
        self.figures.get(row)?.get(col)
    }

    pub fn figures_mut(&mut self, row: usize, col: usize) -> Option<&mut CellFigures> {
        self.figures.get_mut(row)?.get_mut(col)
    }

    pub fn is_locked(&self, row: usize) -> bool {
        self.periods.get(row).is_some_and(|p| p.locked)
    }

    /// Locked period, or an actualized cell on sheets that freeze those.
    pub fn is_cell_locked(&self, row: usize, col: usize) -> bool {
        self.is_locked(row)
            || (self.kind.locks_actualized_cells()
                && self.figures(row, col).is_some_and(|f| f.actual.is_some()))
    }

    /// Checks that the figure table matches the period and column lists.
    pub fn validate(&self) -> Result<()> {
        if self.figures.len() != self.periods.len() {
            bail!(
                "sheet '{}' has {} periods but {} figure rows",
                self.title,
                self.periods.len(),
                self.figures.len()
            );
        }
        for (row, cells) in self.figures.iter().enumerate() {
            if cells.len() != self.columns.len() {
                bail!(
                    "sheet '{}' row {} has {} cells, expected {}",
                    self.title,
                    row,
                    cells.len(),
                    self.columns.len()
                );
            }
        }
        Ok(())
    }

    /// Generates a deterministic sample sheet of `months` periods starting in
    /// January 2026. The first quarter is locked.
    pub fn sample(kind: SheetKind, months: usize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let columns: Vec<String> = kind.columns().iter().map(|c| c.to_string()).collect();

        let periods: Vec<Period> = (0..months)
            .map(|i| {
                let year = 2026 + i / 12;
                let month = i % 12;
                Period {
                    id: format!("{}-{:02}", year, month + 1),
                    label: format!("{} {}", MONTH_NAMES[month], year),
                    locked: i < 3,
                }
            })
            .collect();

        let first_open = periods.iter().position(|p| !p.locked);
        let figures = periods
            .iter()
            .enumerate()
            .map(|(row, period)| {
                (0..columns.len())
                    .map(|col| {
                        // Expenses post actuals for part of the current month
                        let actualized = period.locked
                            || (kind.locks_actualized_cells()
                                && Some(row) == first_open
                                && rng.gen_bool(0.3));
                        sample_figures(&mut rng, kind, col, actualized)
                    })
                    .collect()
            })
            .collect();

        Self {
            kind,
            title: kind.label().to_string(),
            columns,
            periods,
            figures,
        }
    }
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn sample_budget(rng: &mut StdRng, kind: SheetKind, col: usize) -> f64 {
    match kind {
        SheetKind::OtherRevenue => round_cents(rng.gen_range(500.0..25_000.0_f64)),
        SheetKind::OtherExpenses => round_cents(rng.gen_range(100.0..8_000.0_f64)),
        SheetKind::ParkingRates => round_cents(rng.gen_range(8.0..60.0_f64)),
        SheetKind::Statistics if col + STATISTIC_RATIO_COLUMNS >= STATISTIC_COLUMNS.len() => {
            round_cents(rng.gen_range(0.05..0.9_f64))
        }
        SheetKind::Statistics => rng.gen_range(20.0..400.0_f64).round(),
    }
}

fn sample_figures(rng: &mut StdRng, kind: SheetKind, col: usize, actualized: bool) -> CellFigures {
    let budget = sample_budget(rng, kind, col);

    // Roughly a third of the cells have a forecast diverging from budget
    let forecast = if rng.gen_bool(0.35) {
        let drift = rng.gen_range(-0.15..0.15_f64);
        Some(round_cents(budget * (1.0 + drift)))
    } else {
        None
    };

    let actual = if actualized {
        let drift = rng.gen_range(-0.1..0.1_f64);
        Some(round_cents(budget * (1.0 + drift)))
    } else {
        None
    };

    CellFigures {
        budget: Some(budget),
        forecast,
        actual,
        edited: false,
    }
}

/// Reads and validates a sheet from a JSON file.
pub fn load_sheet(path: impl AsRef<Path>) -> Result<ForecastSheet> {
    let path = path.as_ref();
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read sheet {}", path.display()))?;
    let sheet: ForecastSheet = serde_json::from_str(&json)
        .with_context(|| format!("failed to parse sheet {}", path.display()))?;
    sheet.validate()?;
    Ok(sheet)
}

/// Writes a sheet as pretty-printed JSON.
pub fn save_sheet(path: impl AsRef<Path>, sheet: &ForecastSheet) -> Result<()> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(sheet)?;
    fs::write(path, json).with_context(|| format!("failed to write sheet {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_is_deterministic() {
        let a = ForecastSheet::sample(SheetKind::OtherRevenue, 12, 7);
        let b = ForecastSheet::sample(SheetKind::OtherRevenue, 12, 7);
        assert_eq!(a, b);
        assert!(a.validate().is_ok());
    }

    #[test]
    fn test_sample_shape() {
        let sheet = ForecastSheet::sample(SheetKind::ParkingRates, 14, 1);
        assert_eq!(sheet.row_count(), 14);
        assert_eq!(sheet.col_count(), RATE_CATEGORIES.len());
        assert_eq!(sheet.periods[0].id, "2026-01");
        assert_eq!(sheet.periods[13].id, "2027-02");
        assert_eq!(sheet.periods[13].label, "Feb 2027");
        assert!(sheet.is_locked(2));
        assert!(!sheet.is_locked(3));
        assert!(sheet.figures(0, 0).and_then(|f| f.actual).is_some());
        assert!(sheet.figures(5, 0).and_then(|f| f.actual).is_none());
    }

    #[test]
    fn test_validate_rejects_ragged_rows() {
        let mut sheet = ForecastSheet::sample(SheetKind::OtherRevenue, 4, 3);
        sheet.figures[2].pop();
        assert!(sheet.validate().is_err());

        sheet.figures.pop();
        assert!(sheet.validate().is_err());
    }

    #[test]
    fn test_sheet_kind_args() {
        assert_eq!(SheetKind::from_arg("rates"), Some(SheetKind::ParkingRates));
        assert_eq!(SheetKind::from_arg("revenue"), Some(SheetKind::OtherRevenue));
        assert_eq!(SheetKind::from_arg("expenses"), Some(SheetKind::OtherExpenses));
        assert_eq!(SheetKind::from_arg("stats"), Some(SheetKind::Statistics));
        assert_eq!(SheetKind::from_arg("payroll"), None);
        assert!(SheetKind::ParkingRates.uses_block_paste());
        assert!(!SheetKind::OtherExpenses.uses_block_paste());
        assert!(!SheetKind::Statistics.uses_block_paste());
    }

    #[test]
    fn test_expenses_lock_actualized_cells() {
        let mut sheet = ForecastSheet::sample(SheetKind::OtherExpenses, 6, 5);
        assert_eq!(sheet.col_count(), EXPENSE_CATEGORIES.len());

        for cells in sheet.figures.iter_mut().skip(3) {
            for figures in cells.iter_mut() {
                figures.actual = None;
            }
        }
        assert!(sheet.is_cell_locked(1, 0));
        assert!(!sheet.is_cell_locked(4, 2));

        sheet.figures[4][2].actual = Some(120.0);
        assert!(sheet.is_cell_locked(4, 2));
        assert!(!sheet.is_cell_locked(4, 3));

        // Other sheets only lock by period
        sheet.kind = SheetKind::OtherRevenue;
        assert!(!sheet.is_cell_locked(4, 2));
    }

    #[test]
    fn test_statistics_layout() {
        let sheet = ForecastSheet::sample(SheetKind::Statistics, 4, 9);
        assert_eq!(sheet.col_count(), 11);
        assert_eq!(sheet.columns[0], "Occupied Rooms");
        assert_eq!(sheet.columns[10], "Capture Ratio");

        for cells in &sheet.figures {
            let count = cells[1].budget.unwrap_or_default();
            assert_eq!(count, count.round());
            let ratio = cells[10].budget.unwrap_or_default();
            assert!(ratio > 0.0 && ratio < 1.0);
        }
        assert!(sheet.is_cell_locked(0, 4));
        assert!(!sheet.is_cell_locked(3, 4));
    }

    #[test]
    fn test_edited_zero_is_shown() {
        let mut figures = CellFigures {
            budget: Some(900.0),
            forecast: Some(0.0),
            ..Default::default()
        };
        assert_eq!(figures.shown_value(), 900.0);

        figures.set_forecast(0.0);
        assert_eq!(figures.shown_value(), 0.0);
    }
}
