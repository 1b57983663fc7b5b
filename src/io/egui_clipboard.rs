//! Clipboard backend over egui's platform integration.
//!
//! egui does not expose a clipboard read. Pasted text arrives with the
//! `Paste` event, so the backend is primed with that text before the engine
//! reads it. Writes go out through `Context::copy_text`.

use eframe::egui;
use forecast_grid::{ClipboardBackend, ClipboardError};

pub struct EguiClipboard {
    ctx: egui::Context,
    incoming: Option<String>,
}

impl EguiClipboard {
    pub fn new(ctx: &egui::Context) -> Self {
        Self {
            ctx: ctx.clone(),
            incoming: None,
        }
    }

    /// Backend holding text delivered by a paste event.
    pub fn with_pasted(ctx: &egui::Context, text: String) -> Self {
        Self {
            ctx: ctx.clone(),
            incoming: Some(text),
        }
    }
}

impl ClipboardBackend for EguiClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.ctx.copy_text(text.to_string());
        Ok(())
    }

    fn read_text(&mut self) -> Result<String, ClipboardError> {
        self.incoming
            .take()
            .ok_or_else(|| ClipboardError::Unavailable("no paste event carried text".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pasted_text_is_read_once() {
        let ctx = egui::Context::default();
        let mut clipboard = EguiClipboard::with_pasted(&ctx, "1\n2".to_string());

        assert_eq!(clipboard.read_text(), Ok("1\n2".to_string()));
        assert!(matches!(clipboard.read_text(), Err(ClipboardError::Unavailable(_))));
    }

    #[test]
    fn test_write_succeeds() {
        let ctx = egui::Context::default();
        let mut clipboard = EguiClipboard::new(&ctx);
        assert!(clipboard.write_text("42.00").is_ok());
    }
}
