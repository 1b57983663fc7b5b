//! Presentation layer for visual styling.
//!
//! This module contains presentation logic separated from the grid state:
//! - Cell fills for locked and overridden cells
//! - Variance colors

pub mod cell_style;
