//! Vim-style key notation: `12j<C-f><Esc><lt>`.
//!
//! Plain characters stand for themselves. A `<...>` group names one key,
//! optionally prefixed by modifiers (`C-`, `A-`/`M-`, `S-`). A literal `<`
//! is written `<lt>`. Names are case-insensitive.

use core_events::{KeyCode, KeyEvent, KeyModifiers, NamedKey};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NotationError {
    #[error("unterminated `<` at offset {offset}")]
    Unterminated { offset: usize },
    #[error("empty key name at offset {offset}")]
    EmptyName { offset: usize },
    #[error("unknown key name `{name}` at offset {offset}")]
    UnknownKey { name: String, offset: usize },
}

pub fn parse_keys(input: &str) -> Result<Vec<KeyEvent>, NotationError> {
    let mut keys = Vec::new();
    let mut rest = input.char_indices();
    while let Some((offset, c)) = rest.next() {
        if c != '<' {
            keys.push(KeyEvent::char(c));
            continue;
        }
        let body_start = offset + 1;
        let Some(len) = input[body_start..].find('>') else {
            return Err(NotationError::Unterminated { offset });
        };
        let body = &input[body_start..body_start + len];
        keys.push(parse_group(body, offset)?);
        // skip the group body and the closing '>'
        for _ in 0..=body.chars().count() {
            rest.next();
        }
    }
    Ok(keys)
}

fn parse_group(body: &str, offset: usize) -> Result<KeyEvent, NotationError> {
    if body.is_empty() {
        return Err(NotationError::EmptyName { offset });
    }
    let mut mods = KeyModifiers::empty();
    let mut name = body;
    // a trailing "-" is the minus key itself, as in <C-->
    while name.len() > 2 && name.as_bytes()[1] == b'-' {
        let bit = match name.as_bytes()[0].to_ascii_lowercase() {
            b'c' => KeyModifiers::CTRL,
            b'a' | b'm' => KeyModifiers::ALT,
            b's' => KeyModifiers::SHIFT,
            _ => break,
        };
        mods |= bit;
        name = &name[2..];
    }
    let code = key_code(name).ok_or_else(|| NotationError::UnknownKey {
        name: body.to_string(),
        offset,
    })?;
    let code = match code {
        // <C-F> and <C-f> are the same chord
        KeyCode::Char(c) if mods.contains(KeyModifiers::CTRL) => {
            KeyCode::Char(c.to_ascii_lowercase())
        }
        other => other,
    };
    Ok(KeyEvent::new(code, mods))
}

fn key_code(name: &str) -> Option<KeyCode> {
    let mut chars = name.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Some(KeyCode::Char(c));
    }
    let named = match name.to_ascii_lowercase().as_str() {
        "lt" => return Some(KeyCode::Char('<')),
        "gt" => return Some(KeyCode::Char('>')),
        "space" => return Some(KeyCode::Char(' ')),
        "bar" => return Some(KeyCode::Char('|')),
        "bslash" => return Some(KeyCode::Char('\\')),
        "cr" | "enter" | "return" => NamedKey::Enter,
        "esc" => NamedKey::Esc,
        "bs" | "backspace" => NamedKey::Backspace,
        "tab" => NamedKey::Tab,
        "up" => NamedKey::Up,
        "down" => NamedKey::Down,
        "left" => NamedKey::Left,
        "right" => NamedKey::Right,
        "home" => NamedKey::Home,
        "end" => NamedKey::End,
        "pageup" => NamedKey::PageUp,
        "pagedown" => NamedKey::PageDown,
        "insert" | "ins" => NamedKey::Insert,
        "del" | "delete" => NamedKey::Delete,
        lower => {
            let n = lower.strip_prefix('f')?.parse::<u8>().ok()?;
            NamedKey::F(n)
        }
    };
    Some(KeyCode::Named(named))
}
