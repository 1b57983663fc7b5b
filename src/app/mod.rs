//! Application-level modules for the forecast grid editor.
//!
//! This module contains the coordinators, the centralized state and the grid
//! host that connects the state to the navigation and clipboard engines.

mod app_state;
mod application_coordinator;
mod grid_coordinator;
mod settings_coordinator;
pub mod sheet_host;

pub use app_state::AppState;
pub use application_coordinator::ApplicationCoordinator;
pub use grid_coordinator::GridCoordinator;
pub use settings_coordinator::SettingsCoordinator;
