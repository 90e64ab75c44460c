//! Normalized key event types consumed by the dispatcher.
//!
//! Every physical key press reaching the interpreter is reduced to a
//! [`KeyEvent`]: exactly one of a printable character or a symbolic named key,
//! plus a modifier set. Host adapters (see `core-input`) perform the
//! translation from platform events; nothing in this crate performs I/O.

use std::fmt;

bitflags::bitflags! {
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct KeyModifiers: u8 {
        const CTRL = 0b0000_0001;
        const ALT  = 0b0000_0010;
        const SHIFT= 0b0000_0100;
    }
}

/// Symbolic (non printable) keys surfaced by host adapters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamedKey {
    Enter,
    Esc,
    Backspace,
    Tab,
    F(u8),
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    Insert,
    Delete,
}

impl NamedKey {
    /// Canonical name as used by the `<Name>` key notation.
    pub fn name(&self) -> String {
        match self {
            NamedKey::Enter => "Enter".into(),
            NamedKey::Esc => "Esc".into(),
            NamedKey::Backspace => "BackSpace".into(),
            NamedKey::Tab => "Tab".into(),
            NamedKey::F(n) => format!("F{n}"),
            NamedKey::Up => "Up".into(),
            NamedKey::Down => "Down".into(),
            NamedKey::Left => "Left".into(),
            NamedKey::Right => "Right".into(),
            NamedKey::Home => "Home".into(),
            NamedKey::End => "End".into(),
            NamedKey::PageUp => "PageUp".into(),
            NamedKey::PageDown => "PageDown".into(),
            NamedKey::Insert => "Insert".into(),
            NamedKey::Delete => "Delete".into(),
        }
    }
}

/// Logical key identity: a printable character or a named key, never both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Char(char),
    Named(NamedKey),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub mods: KeyModifiers,
}

impl KeyEvent {
    pub const fn new(code: KeyCode, mods: KeyModifiers) -> Self {
        Self { code, mods }
    }

    /// Unmodified printable character.
    pub const fn char(c: char) -> Self {
        Self::new(KeyCode::Char(c), KeyModifiers::empty())
    }

    /// Control-modified printable character (e.g. `<C-f>`).
    pub const fn ctrl(c: char) -> Self {
        Self::new(KeyCode::Char(c), KeyModifiers::CTRL)
    }

    /// Unmodified named key.
    pub const fn named(key: NamedKey) -> Self {
        Self::new(KeyCode::Named(key), KeyModifiers::empty())
    }

    pub fn is_ctrl(&self) -> bool {
        self.mods.contains(KeyModifiers::CTRL)
    }

    /// Printable character carried by this event, if any.
    pub fn char_value(&self) -> Option<char> {
        match self.code {
            KeyCode::Char(c) => Some(c),
            KeyCode::Named(_) => None,
        }
    }

    /// Decimal value when this is a plain (non Control) digit key.
    pub fn digit(&self) -> Option<u32> {
        if self.is_ctrl() {
            return None;
        }
        self.char_value().and_then(|c| c.to_digit(10))
    }
}

impl fmt::Display for KeyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let base = match self.code {
            KeyCode::Char('<') => "lt".to_string(),
            KeyCode::Char(c) => c.to_string(),
            KeyCode::Named(k) => k.name(),
        };
        let bracketed =
            self.is_ctrl() || matches!(self.code, KeyCode::Named(_) | KeyCode::Char('<'));
        if !bracketed {
            return f.write_str(&base);
        }
        let mut prefix = String::new();
        if self.is_ctrl() {
            prefix.push_str("C-");
        }
        if self.mods.contains(KeyModifiers::ALT) {
            prefix.push_str("A-");
        }
        write!(f, "<{prefix}{base}>")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_event_display() {
        assert_eq!(KeyEvent::char('j').to_string(), "j");
        assert_eq!(KeyEvent::ctrl('f').to_string(), "<C-f>");
        assert_eq!(KeyEvent::named(NamedKey::PageDown).to_string(), "<PageDown>");
        assert_eq!(KeyEvent::char('<').to_string(), "<lt>");
    }

    #[test]
    fn digit_requires_plain_char() {
        assert_eq!(KeyEvent::char('7').digit(), Some(7));
        assert_eq!(KeyEvent::char('0').digit(), Some(0));
        assert_eq!(KeyEvent::ctrl('7').digit(), None);
        assert_eq!(KeyEvent::char('x').digit(), None);
        assert_eq!(KeyEvent::named(NamedKey::Home).digit(), None);
    }

    #[test]
    fn char_value_absent_for_named_keys() {
        assert_eq!(KeyEvent::named(NamedKey::Esc).char_value(), None);
        assert_eq!(KeyEvent::ctrl('d').char_value(), Some('d'));
    }
}
