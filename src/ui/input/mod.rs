//! Input handling subsystem for UI interactions.
//!
//! This module contains all input handling logic:
//! - Grid keyboard translation (named keys, typed text)
//! - Clipboard events (copy, cut, paste)

pub mod grid_input_handler;
