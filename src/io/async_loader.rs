//! Asynchronous sheet loading.
//!
//! This module loads forecast sheets in background threads,
//! keeping the GUI responsive during file I/O.

use eframe::egui;
use forecast_grid::{load_sheet, ForecastSheet};
use log::info;
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver};
use std::thread;

/// Result of a completed sheet loading operation.
pub enum LoadResult {
    /// Loading completed successfully
    Success {
        /// The loaded sheet
        sheet: ForecastSheet,
        /// Path to the file that was loaded
        path: PathBuf,
    },
    /// Loading failed with an error
    Error(String),
    /// No loading operation in progress
    None,
}

/// Manages asynchronous loading of sheet files.
///
/// A background thread parses the file and sends the result through a
/// channel that the GUI thread polls once per frame.
pub struct AsyncLoader {
    /// Channel receiver for loading results
    loading_receiver: Option<Receiver<Result<ForecastSheet, String>>>,

    /// Path of the file currently being loaded
    pending_load_path: Option<PathBuf>,
}

impl AsyncLoader {
    /// Creates a new async loader with no active loading operation.
    pub fn new() -> Self {
        Self {
            loading_receiver: None,
            pending_load_path: None,
        }
    }

    /// Checks if a loading operation is currently in progress.
    pub fn is_loading(&self) -> bool {
        self.loading_receiver.is_some()
    }

    /// Starts loading a sheet file asynchronously from the specified path.
    ///
    /// Call `check_completion()` regularly (e.g., once per frame) to check for results.
    ///
    /// # Arguments
    /// * `path` - Path to the sheet file to load
    /// * `ctx` - egui context for requesting repaints when loading completes
    pub fn start_file_load(&mut self, path: PathBuf, ctx: &egui::Context) {
        let (sender, receiver) = channel();
        self.loading_receiver = Some(receiver);
        self.pending_load_path = Some(path.clone());

        let ctx_handle = ctx.clone();
        info!("loading sheet {}", path.display());

        thread::spawn(move || {
            // Keep the full context chain for the status bar
            let result = load_sheet(&path).map_err(|e| format!("{:#}", e));
            let _ = sender.send(result);

            // Notify GUI thread to repaint
            ctx_handle.request_repaint();
        });
    }

    /// Checks if background loading has completed and returns the result if available.
    ///
    /// # Returns
    /// * `LoadResult::Success` - Loading completed successfully
    /// * `LoadResult::Error` - Loading failed with an error
    /// * `LoadResult::None` - No result available (still loading or no operation active)
    pub fn check_completion(&mut self) -> LoadResult {
        let Some(receiver) = &self.loading_receiver else {
            return LoadResult::None;
        };

        let load_result = match receiver.try_recv() {
            Ok(Ok(sheet)) => match self.pending_load_path.take() {
                Some(path) => LoadResult::Success { sheet, path },
                None => LoadResult::Error("load finished without a path".to_string()),
            },
            Ok(Err(error_msg)) => {
                self.pending_load_path = None;
                LoadResult::Error(error_msg)
            }
            Err(std::sync::mpsc::TryRecvError::Empty) => return LoadResult::None,
            Err(std::sync::mpsc::TryRecvError::Disconnected) => {
                self.pending_load_path = None;
                LoadResult::Error("sheet loader stopped unexpectedly".to_string())
            }
        };

        // Clear the receiver after processing
        self.loading_receiver = None;
        load_result
    }
}

impl Default for AsyncLoader {
    fn default() -> Self {
        Self::new()
    }
}
