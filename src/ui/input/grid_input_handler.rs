//! Grid keyboard and clipboard input translation.
//!
//! Converts the egui events of one frame into framework-neutral
//! [`GridInput`] values:
//! - Named keys (arrows, Tab, Enter, Escape, ...) become [`KeyInput`]
//! - Typed text becomes one [`KeyInput`] per character
//! - Copy/Cut/Paste events become clipboard requests
//!
//! Letter keys are not translated from `Event::Key`: egui reports the same
//! keystroke again as `Event::Text`, and clipboard chords arrive as
//! `Event::Copy`/`Event::Paste`.

use eframe::egui;
use forecast_grid::{Key, KeyInput, Modifiers};

/// One grid input of the current frame.
#[derive(Debug, Clone, PartialEq)]
pub enum GridInput {
    Key(KeyInput),
    Copy,
    Paste(String),
}

fn convert_modifiers(modifiers: &egui::Modifiers) -> Modifiers {
    Modifiers {
        shift: modifiers.shift,
        ctrl: modifiers.ctrl,
        alt: modifiers.alt,
        meta: modifiers.mac_cmd,
    }
}

fn convert_key(key: egui::Key) -> Option<Key> {
    let key = match key {
        egui::Key::ArrowUp => Key::ArrowUp,
        egui::Key::ArrowDown => Key::ArrowDown,
        egui::Key::ArrowLeft => Key::ArrowLeft,
        egui::Key::ArrowRight => Key::ArrowRight,
        egui::Key::Tab => Key::Tab,
        egui::Key::Enter => Key::Enter,
        egui::Key::Escape => Key::Escape,
        egui::Key::Space => Key::Space,
        egui::Key::PageUp => Key::PageUp,
        egui::Key::PageDown => Key::PageDown,
        egui::Key::Home => Key::Home,
        egui::Key::End => Key::End,
        egui::Key::Backspace => Key::Backspace,
        egui::Key::Delete => Key::Delete,
        _ => return None,
    };
    Some(key)
}

/// Translates a single egui event.
pub fn translate_event(event: &egui::Event) -> Vec<GridInput> {
    match event {
        egui::Event::Key {
            key,
            pressed: true,
            modifiers,
            ..
        } => convert_key(*key)
            .map(|k| vec![GridInput::Key(KeyInput::new(k, convert_modifiers(modifiers)))])
            .unwrap_or_default(),
        egui::Event::Text(text) => text
            .chars()
            // Space is already reported as a named key
            .filter(|c| *c != ' ' && !c.is_control())
            .map(|c| GridInput::Key(KeyInput::char(c)))
            .collect(),
        egui::Event::Copy | egui::Event::Cut => vec![GridInput::Copy],
        egui::Event::Paste(text) => vec![GridInput::Paste(text.clone())],
        _ => Vec::new(),
    }
}

/// Collects the grid inputs of the current frame.
pub fn collect_grid_input(ctx: &egui::Context) -> Vec<GridInput> {
    ctx.input(|i| i.events.iter().flat_map(translate_event).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key_event(key: egui::Key, modifiers: egui::Modifiers) -> egui::Event {
        egui::Event::Key {
            key,
            physical_key: None,
            pressed: true,
            repeat: false,
            modifiers,
        }
    }

    #[test]
    fn test_named_keys() {
        let inputs = translate_event(&key_event(egui::Key::Tab, egui::Modifiers::SHIFT));
        assert_eq!(inputs, vec![GridInput::Key(KeyInput::new(Key::Tab, Modifiers::SHIFT))]);

        let inputs = translate_event(&key_event(egui::Key::Enter, egui::Modifiers::NONE));
        assert_eq!(inputs, vec![GridInput::Key(KeyInput::plain(Key::Enter))]);
    }

    #[test]
    fn test_letter_keys_come_from_text() {
        assert!(translate_event(&key_event(egui::Key::A, egui::Modifiers::NONE)).is_empty());

        let inputs = translate_event(&egui::Event::Text("4 2".to_string()));
        assert_eq!(
            inputs,
            vec![GridInput::Key(KeyInput::char('4')), GridInput::Key(KeyInput::char('2'))]
        );
    }

    #[test]
    fn test_key_release_is_ignored() {
        let event = egui::Event::Key {
            key: egui::Key::ArrowDown,
            physical_key: None,
            pressed: false,
            repeat: false,
            modifiers: egui::Modifiers::NONE,
        };
        assert!(translate_event(&event).is_empty());
    }

    #[test]
    fn test_clipboard_events() {
        assert_eq!(translate_event(&egui::Event::Copy), vec![GridInput::Copy]);
        assert_eq!(
            translate_event(&egui::Event::Paste("1\t2".to_string())),
            vec![GridInput::Paste("1\t2".to_string())]
        );
    }
}
