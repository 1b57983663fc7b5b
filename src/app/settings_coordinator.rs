//! Layout settings persistence.
//!
//! Grid layout preferences are stored in eframe's persistent storage as JSON
//! strings, one key per setting, so a value that fails to parse only resets
//! that one setting.

use serde::{Deserialize, Serialize};

use crate::state::LayoutState;
use forecast_grid::SheetKind;

const LABEL_WIDTH_KEY: &str = "label_width";
const COLUMN_WIDTH_KEY: &str = "column_width";
const LAST_KIND_KEY: &str = "last_sheet_kind";

/// Coordinates settings persistence.
pub struct SettingsCoordinator;

impl SettingsCoordinator {
    /// Restores the grid layout, falling back to defaults per setting.
    pub fn load_layout(storage: Option<&dyn eframe::Storage>) -> LayoutState {
        let defaults = LayoutState::new();
        let label_width = Self::load_setting_or(storage, LABEL_WIDTH_KEY, defaults.label_width());
        let column_width = Self::load_setting_or(storage, COLUMN_WIDTH_KEY, defaults.column_width());
        let last_kind: SheetKind = Self::load_setting_or(storage, LAST_KIND_KEY, defaults.last_kind());

        let mut layout = LayoutState::with_widths(label_width, column_width);
        layout.set_last_kind(last_kind);
        layout
    }

    /// Persists the grid layout.
    pub fn save_layout(storage: &mut dyn eframe::Storage, layout: &LayoutState) {
        Self::save_setting(storage, LABEL_WIDTH_KEY, &layout.label_width());
        Self::save_setting(storage, COLUMN_WIDTH_KEY, &layout.column_width());
        Self::save_setting(storage, LAST_KIND_KEY, &layout.last_kind());
        storage.flush();
    }

    /// Saves one setting as JSON. Serialization failures are skipped.
    pub fn save_setting<T>(storage: &mut dyn eframe::Storage, key: &str, value: &T)
    where
        T: Serialize,
    {
        if let Ok(json_str) = serde_json::to_string(value) {
            storage.set_string(key, json_str);
        }
    }

    /// Loads one setting, or `default` if it is missing or invalid.
    pub fn load_setting_or<T>(storage: Option<&dyn eframe::Storage>, key: &str, default: T) -> T
    where
        T: for<'de> Deserialize<'de>,
    {
        Self::try_load_setting(storage, key).unwrap_or(default)
    }

    /// Attempts to load a setting, returning None if not found or invalid.
    pub fn try_load_setting<T>(storage: Option<&dyn eframe::Storage>, key: &str) -> Option<T>
    where
        T: for<'de> Deserialize<'de>,
    {
        let json_str = storage?.get_string(key)?;
        serde_json::from_str(&json_str).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use eframe::Storage;

    /// Simple mock storage for testing
    #[derive(Default)]
    struct MockStorage {
        data: HashMap<String, String>,
        flushes: usize,
    }

    impl eframe::Storage for MockStorage {
        fn get_string(&self, key: &str) -> Option<String> {
            self.data.get(key).cloned()
        }

        fn set_string(&mut self, key: &str, value: String) {
            self.data.insert(key.to_string(), value);
        }

        fn flush(&mut self) {
            self.flushes += 1;
        }
    }

    #[test]
    fn test_layout_round_trip() {
        let mut storage = MockStorage::default();
        let mut layout = LayoutState::with_widths(90.0, 200.0);
        layout.set_last_kind(SheetKind::ParkingRates);

        SettingsCoordinator::save_layout(&mut storage, &layout);
        assert_eq!(storage.flushes, 1);

        let loaded = SettingsCoordinator::load_layout(Some(&storage));
        assert_eq!(loaded.label_width(), 90.0);
        assert_eq!(loaded.column_width(), 200.0);
        assert_eq!(loaded.last_kind(), SheetKind::ParkingRates);
    }

    #[test]
    fn test_missing_storage_gives_defaults() {
        let loaded = SettingsCoordinator::load_layout(None);
        assert_eq!(loaded.column_width(), LayoutState::new().column_width());
        assert_eq!(loaded.last_kind(), SheetKind::OtherRevenue);
    }

    #[test]
    fn test_invalid_value_resets_only_that_setting() {
        let mut storage = MockStorage::default();
        SettingsCoordinator::save_setting(&mut storage, COLUMN_WIDTH_KEY, &180.0f32);
        storage.set_string(LAST_KIND_KEY, "\"Payroll\"".to_string());

        let loaded = SettingsCoordinator::load_layout(Some(&storage));
        assert_eq!(loaded.column_width(), 180.0);
        assert_eq!(loaded.last_kind(), SheetKind::OtherRevenue);
    }

    #[test]
    fn test_try_load_setting() {
        let mut storage = MockStorage::default();
        let result: Option<i32> = SettingsCoordinator::try_load_setting(Some(&storage), "missing");
        assert_eq!(result, None);

        SettingsCoordinator::save_setting(&mut storage, "test", &123i32);
        let result: Option<i32> = SettingsCoordinator::try_load_setting(Some(&storage), "test");
        assert_eq!(result, Some(123));
    }
}
