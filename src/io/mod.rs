//! I/O modules for sheet loading and clipboard access.

pub mod async_loader;
pub mod egui_clipboard;

// Re-export commonly used types
pub use async_loader::{AsyncLoader, LoadResult};
pub use egui_clipboard::EguiClipboard;
