//! Motion contract (Tier 2 bindings) and the built-in caret motions.
//!
//! Built-ins only move the caret through [`EditorSurface`] primitives and
//! always return `true` (reset input after running). A motion returning
//! `false` keeps the dispatcher's buffered keys so it can be called again with
//! more trailing characters.

use core_events::NamedKey;
use core_keymap::KeyChord;
use core_state::EditorSurface;
use tracing::trace;

pub trait Motion {
    /// Run with an effective count (at least 1) and the chars typed after the
    /// motion key. Returns whether accumulated input should be reset.
    fn execute(&self, surface: &mut dyn EditorSurface, count: u32, trailing: &[char]) -> bool;
}

impl<F> Motion for F
where
    F: Fn(&mut dyn EditorSurface, u32, &[char]) -> bool,
{
    fn execute(&self, surface: &mut dyn EditorSurface, count: u32, trailing: &[char]) -> bool {
        self(surface, count, trailing)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinMotion {
    Up,
    Down,
    Left,
    Right,
    /// First non-whitespace column.
    LineStart,
    /// Absolute column 0.
    FirstColumn,
    LineEnd,
    /// Page jumps carry their line distance.
    PageUp(usize),
    PageDown(usize),
}

impl Motion for BuiltinMotion {
    fn execute(&self, surface: &mut dyn EditorSurface, count: u32, _trailing: &[char]) -> bool {
        let before = surface.caret_offset();
        match *self {
            BuiltinMotion::Up => repeat_vertical(surface, count, |s| s.move_up()),
            BuiltinMotion::Down => repeat_vertical(surface, count, |s| s.move_down()),
            BuiltinMotion::Left => {
                for _ in 0..count {
                    if surface.caret_column() == 0 {
                        break;
                    }
                    surface.move_left();
                }
            }
            BuiltinMotion::Right => {
                if let Some(span) = surface.caret_line_span() {
                    let room = span.end_offset.saturating_sub(surface.caret_offset());
                    let steps = (count as usize).min(room.saturating_sub(1));
                    for _ in 0..steps {
                        surface.move_right();
                    }
                }
            }
            BuiltinMotion::LineStart => line_start(surface),
            BuiltinMotion::FirstColumn => surface.set_caret_column(0),
            BuiltinMotion::LineEnd => {
                if let Some(span) = surface.caret_line_span() {
                    surface.set_caret_offset(span.end_offset);
                }
            }
            BuiltinMotion::PageUp(jump) => {
                let line = surface.caret_line();
                page_to(surface, line - (line - 1).min(jump));
            }
            BuiltinMotion::PageDown(jump) => {
                let line = surface.caret_line();
                let below = surface.line_count().saturating_sub(line);
                page_to(surface, line + below.min(jump));
            }
        }
        trace!(
            target: "actions.motion",
            motion = ?self,
            count,
            from = before,
            to = surface.caret_offset(),
            "motion"
        );
        true
    }
}

fn repeat_vertical(
    surface: &mut dyn EditorSurface,
    count: u32,
    step: impl Fn(&mut dyn EditorSurface),
) {
    for _ in 0..count {
        let line = surface.caret_line();
        step(surface);
        if surface.caret_line() == line {
            break;
        }
    }
}

pub(crate) fn line_start(surface: &mut dyn EditorSurface) {
    let Some(span) = surface.caret_line_span() else {
        return;
    };
    let mut offset = span.offset;
    while offset < span.end_offset && surface.char_at(offset).is_some_and(char::is_whitespace) {
        offset += 1;
    }
    surface.set_caret_offset(offset);
}

fn page_to(surface: &mut dyn EditorSurface, line: usize) {
    surface.set_caret_line(line);
    if let Some(span) = surface.caret_line_span() {
        surface.set_caret_offset(span.offset);
    }
    surface.center_to_caret();
}

/// Default motion bindings, including the named-key remaps.
pub fn builtin_motions(page_jump: usize) -> Vec<(KeyChord, BuiltinMotion)> {
    use BuiltinMotion as M;
    use KeyChord as K;
    vec![
        (K::char('k'), M::Up),
        (K::char('j'), M::Down),
        (K::char('h'), M::Left),
        (K::char('l'), M::Right),
        (K::char('^'), M::LineStart),
        (K::char('_'), M::LineStart),
        (K::char('0'), M::FirstColumn),
        (K::char('$'), M::LineEnd),
        (K::ctrl('b'), M::PageUp(page_jump)),
        (K::ctrl('u'), M::PageUp(page_jump)),
        (K::ctrl('f'), M::PageDown(page_jump)),
        (K::ctrl('d'), M::PageDown(page_jump)),
        // remaps
        (K::named(NamedKey::Home), M::FirstColumn),
        (K::named(NamedKey::End), M::LineEnd),
        (K::named(NamedKey::Left), M::Left),
        (K::named(NamedKey::Right), M::Right),
        (K::named(NamedKey::Up), M::Up),
        (K::named(NamedKey::Down), M::Down),
        (K::named(NamedKey::Backspace), M::Left),
        (K::named(NamedKey::PageUp), M::PageUp(page_jump)),
        (K::named(NamedKey::PageDown), M::PageDown(page_jump)),
    ]
}
