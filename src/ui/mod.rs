//! UI panel rendering subsystem
//!
//! This module contains all UI panel rendering logic for the forecast grid editor:
//! - Header panel (file controls, sample sheets, comparison mode)
//! - Grid panel (painted spreadsheet grid, pointer gestures)
//! - Status bar (cursor, selection, pending edits)
//! - Panel manager (panel orchestration and layout)
//! - Input handling (keyboard and clipboard translation)

pub mod header;
pub mod grid_panel;
pub mod status_bar;
pub mod panel_manager;
pub mod input;
