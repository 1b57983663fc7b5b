//! Framework-neutral keyboard events.
//!
//! Hosts translate their toolkit's key events into [`KeyInput`] before handing
//! them to the engines, and honour the returned [`KeyOutcome`].

/// A key, reduced to what the grid engines care about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Tab,
    Enter,
    Escape,
    Space,
    PageUp,
    PageDown,
    Home,
    End,
    Backspace,
    Delete,
    /// A single printable character.
    Character(char),
}

/// Modifier keys held during a key press.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    /// Cmd on macOS, Super/Windows elsewhere.
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Self = Self { shift: false, ctrl: false, alt: false, meta: false };
    pub const SHIFT: Self = Self { shift: true, ctrl: false, alt: false, meta: false };
    pub const CTRL: Self = Self { shift: false, ctrl: true, alt: false, meta: false };
    pub const META: Self = Self { shift: false, ctrl: false, alt: false, meta: true };

    /// True when any modifier that turns a character into a shortcut is held.
    pub fn has_command(&self) -> bool {
        self.ctrl || self.alt || self.meta
    }
}

/// One key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyInput {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyInput {
    pub const fn new(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    /// A key press with no modifiers.
    pub const fn plain(key: Key) -> Self {
        Self { key, modifiers: Modifiers::NONE }
    }

    /// A printable character with no modifiers.
    pub const fn char(c: char) -> Self {
        Self::plain(Key::Character(c))
    }

    /// Returns the character if this is an unmodified printable keystroke.
    pub fn printable(&self) -> Option<char> {
        match self.key {
            Key::Character(c) if !self.modifiers.has_command() => Some(c),
            _ => None,
        }
    }
}

/// What the host should do with the original event after an engine saw it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// The engine consumed the key; suppress the host's default handling.
    Handled,
    /// The engine did nothing; the host may handle the key itself.
    Ignored,
}

impl KeyOutcome {
    pub fn is_handled(self) -> bool {
        matches!(self, KeyOutcome::Handled)
    }
}

/// Clipboard chords intercepted at document scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipboardShortcut {
    Copy,
    Paste,
}

impl ClipboardShortcut {
    /// Recognises Ctrl+C / Cmd+C and Ctrl+V / Cmd+V, either case.
    pub fn from_key(input: &KeyInput) -> Option<Self> {
        if !(input.modifiers.ctrl || input.modifiers.meta) {
            return None;
        }
        match input.key {
            Key::Character('c') | Key::Character('C') => Some(Self::Copy),
            Key::Character('v') | Key::Character('V') => Some(Self::Paste),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_printable_requires_no_command_modifier() {
        assert_eq!(KeyInput::char('a').printable(), Some('a'));
        assert_eq!(KeyInput::new(Key::Character('A'), Modifiers::SHIFT).printable(), Some('A'));
        assert_eq!(KeyInput::new(Key::Character('a'), Modifiers::CTRL).printable(), None);
        assert_eq!(KeyInput::plain(Key::Enter).printable(), None);
    }

    #[test]
    fn test_clipboard_shortcuts() {
        let ctrl_c = KeyInput::new(Key::Character('c'), Modifiers::CTRL);
        let cmd_v = KeyInput::new(Key::Character('V'), Modifiers::META);
        assert_eq!(ClipboardShortcut::from_key(&ctrl_c), Some(ClipboardShortcut::Copy));
        assert_eq!(ClipboardShortcut::from_key(&cmd_v), Some(ClipboardShortcut::Paste));
        assert_eq!(ClipboardShortcut::from_key(&KeyInput::char('c')), None);
    }
}
