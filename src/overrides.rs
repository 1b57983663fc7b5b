//! Forecast edit policy shared by the forecasting grids.
//!
//! Typed or pasted values are kept as overrides on top of the underlying
//! forecast/budget figures. A value that lands back on the original figure is
//! treated as "no edit" and removes the override.

use std::collections::{BTreeMap, HashSet};

use crate::cell::CellCoord;

/// Two values closer than this are the same figure.
pub const REVERT_TOLERANCE: f64 = 0.01;

/// Parses what a user typed or pasted into a cell.
///
/// An empty string is zero. Currency symbols, thousands separators and
/// surrounding whitespace are ignored. Anything else that is not a finite
/// number is rejected.
pub fn parse_cell_input(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| *c != '$' && *c != ',')
        .collect();

    if cleaned.is_empty() {
        return Some(0.0);
    }
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// The figure a cell shows when it has no override: the forecast when it is
/// present and non-zero, else the budget, else zero.
pub fn display_fallback(forecast: Option<f64>, budget: Option<f64>) -> f64 {
    match forecast {
        Some(value) if value != 0.0 => value,
        _ => budget.unwrap_or(0.0),
    }
}

/// True if `value` is within [`REVERT_TOLERANCE`] of `original`.
pub fn is_revert(value: f64, original: f64) -> bool {
    (value - original).abs() < REVERT_TOLERANCE
}

/// Result of applying one edit to an [`EditLedger`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EditOutcome {
    /// The value differs from the original and is now an override.
    Recorded(f64),
    /// The value matches the original; any override was removed.
    Reverted,
    /// The input was not a number; nothing changed.
    Rejected,
}

/// Pending overrides keyed by row key then column key.
///
/// Rows with no remaining overrides are removed, so an empty ledger means
/// there is nothing to save.
#[derive(Debug, Clone, PartialEq)]
pub struct EditLedger<R: Ord, K: Ord> {
    edits: BTreeMap<R, BTreeMap<K, f64>>,
}

impl<R: Ord, K: Ord> Default for EditLedger<R, K> {
    fn default() -> Self {
        Self { edits: BTreeMap::new() }
    }
}

impl<R: Ord + Clone, K: Ord + Clone> EditLedger<R, K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies raw user input against the cell's original figure.
    pub fn apply(&mut self, row: &R, col: &K, raw: &str, original: f64) -> EditOutcome {
        match parse_cell_input(raw) {
            Some(value) => self.apply_value(row, col, value, original),
            None => EditOutcome::Rejected,
        }
    }

    /// Applies an already-parsed value against the cell's original figure.
    pub fn apply_value(&mut self, row: &R, col: &K, value: f64, original: f64) -> EditOutcome {
        if is_revert(value, original) {
            self.remove(row, col);
            EditOutcome::Reverted
        } else {
            self.edits
                .entry(row.clone())
                .or_default()
                .insert(col.clone(), value);
            EditOutcome::Recorded(value)
        }
    }

    /// Drops the override for one cell, and its row if that was the last one.
    pub fn remove(&mut self, row: &R, col: &K) -> Option<f64> {
        let cols = self.edits.get_mut(row)?;
        let removed = cols.remove(col);
        if cols.is_empty() {
            self.edits.remove(row);
        }
        removed
    }

    pub fn get(&self, row: &R, col: &K) -> Option<f64> {
        self.edits.get(row)?.get(col).copied()
    }

    pub fn has_unsaved_changes(&self) -> bool {
        !self.edits.is_empty()
    }

    /// Number of overridden cells.
    pub fn len(&self) -> usize {
        self.edits.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    pub fn clear(&mut self) {
        self.edits.clear();
    }

    /// All overrides in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&R, &K, f64)> {
        self.edits
            .iter()
            .flat_map(|(row, cols)| cols.iter().map(move |(col, value)| (row, col, *value)))
    }
}

/// Replace-on-next-input flags.
///
/// A cell is flagged when it gains focus; the first character typed into it
/// replaces the cell text instead of being appended.
#[derive(Debug, Clone, Default)]
pub struct ReplaceOnInput {
    armed: HashSet<CellCoord>,
}

impl ReplaceOnInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arm(&mut self, cell: CellCoord) {
        self.armed.insert(cell);
    }

    pub fn is_armed(&self, cell: CellCoord) -> bool {
        self.armed.contains(&cell)
    }

    /// Returns true, and disarms, if the next input should replace.
    pub fn take(&mut self, cell: CellCoord) -> bool {
        self.armed.remove(&cell)
    }

    pub fn clear(&mut self) {
        self.armed.clear();
    }
}

/// Forecast-vs-budget variance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Variance {
    /// Rounded to one decimal place.
    pub percent: f64,
    pub dollars: f64,
}

impl Variance {
    pub const ZERO: Self = Self { percent: 0.0, dollars: 0.0 };

    /// Variance of `forecast` against `budget`. Zero when there is no budget.
    pub fn between(budget: Option<f64>, forecast: f64) -> Self {
        let budget = match budget {
            Some(b) if b != 0.0 => b,
            _ => return Self::ZERO,
        };

        let dollars = forecast - budget;
        let percent = (dollars / budget * 100.0 * 10.0).round() / 10.0;
        Self { percent, dollars }
    }

    pub fn tone(&self) -> VarianceTone {
        VarianceTone::from_percent(self.percent)
    }
}

/// Display bucket for a variance percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarianceTone {
    StrongGain,
    Gain,
    SlightLoss,
    Loss,
}

impl VarianceTone {
    pub fn from_percent(percent: f64) -> Self {
        if percent > 5.0 {
            VarianceTone::StrongGain
        } else if percent > 0.0 {
            VarianceTone::Gain
        } else if percent > -5.0 {
            VarianceTone::SlightLoss
        } else {
            VarianceTone::Loss
        }
    }
}
