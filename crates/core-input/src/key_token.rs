use core_events::{KeyCode, KeyEvent, KeyModifiers, NamedKey};
use crossterm::event::{
    KeyCode as CKeyCode, KeyEvent as CKeyEvent, KeyEventKind as CKeyEventKind,
    KeyModifiers as CKeyModifiers,
};
use tracing::trace;

/// Map a crossterm key event into a dispatcher [`KeyEvent`].
///
/// Returns `None` for key releases and for key codes the dispatcher has no
/// use for (media keys, lock keys, bare modifiers).
pub fn map_key_event(event: &CKeyEvent) -> Option<KeyEvent> {
    if event.kind == CKeyEventKind::Release {
        return None;
    }
    let mut mods = map_modifiers(event.modifiers);
    let code = match event.code {
        CKeyCode::Char(c) => KeyCode::Char(c),
        CKeyCode::Enter => KeyCode::Named(NamedKey::Enter),
        CKeyCode::Esc => KeyCode::Named(NamedKey::Esc),
        CKeyCode::Backspace => KeyCode::Named(NamedKey::Backspace),
        CKeyCode::Tab => KeyCode::Named(NamedKey::Tab),
        CKeyCode::BackTab => {
            mods |= KeyModifiers::SHIFT;
            KeyCode::Named(NamedKey::Tab)
        }
        CKeyCode::Up => KeyCode::Named(NamedKey::Up),
        CKeyCode::Down => KeyCode::Named(NamedKey::Down),
        CKeyCode::Left => KeyCode::Named(NamedKey::Left),
        CKeyCode::Right => KeyCode::Named(NamedKey::Right),
        CKeyCode::Home => KeyCode::Named(NamedKey::Home),
        CKeyCode::End => KeyCode::Named(NamedKey::End),
        CKeyCode::PageUp => KeyCode::Named(NamedKey::PageUp),
        CKeyCode::PageDown => KeyCode::Named(NamedKey::PageDown),
        CKeyCode::Insert => KeyCode::Named(NamedKey::Insert),
        CKeyCode::Delete => KeyCode::Named(NamedKey::Delete),
        CKeyCode::F(n) => KeyCode::Named(NamedKey::F(n)),
        CKeyCode::Null
        | CKeyCode::CapsLock
        | CKeyCode::ScrollLock
        | CKeyCode::NumLock
        | CKeyCode::PrintScreen
        | CKeyCode::Pause
        | CKeyCode::Menu
        | CKeyCode::KeypadBegin
        | CKeyCode::Media(_)
        | CKeyCode::Modifier(_) => {
            trace!(target: "input.key", code = ?event.code, "unsupported_key");
            return None;
        }
    };
    Some(KeyEvent::new(code, mods))
}

/// Only Control, Alt and Shift survive; Super/Hyper/Meta are dropped.
pub fn map_modifiers(mods: CKeyModifiers) -> KeyModifiers {
    let mut out = KeyModifiers::empty();
    if mods.contains(CKeyModifiers::CONTROL) {
        out |= KeyModifiers::CTRL;
    }
    if mods.contains(CKeyModifiers::ALT) {
        out |= KeyModifiers::ALT;
    }
    if mods.contains(CKeyModifiers::SHIFT) {
        out |= KeyModifiers::SHIFT;
    }
    out
}
