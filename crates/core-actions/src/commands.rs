//! Small reference command set registered by
//! [`KeyDispatcher::with_standard_commands`](crate::KeyDispatcher::with_standard_commands).
//!
//! Hosts with their own vocabulary register commands directly instead.

use crate::{Command, FnCommand, motion::line_start, select_lines};
use core_keymap::{KeySequence, seq};
use core_state::{EditorSurface, RequestedMode};
use std::rc::Rc;

pub fn standard_commands() -> Vec<(KeySequence, Rc<dyn Command>)> {
    let mut table: Vec<(KeySequence, Rc<dyn Command>)> = Vec::new();
    let mut bind = |name: &str, command: Rc<dyn Command>| table.push((seq(name), command));
    bind("gg", Rc::new(FnCommand::new(goto_line)));
    bind("i", Rc::new(FnCommand::new(insert_before)));
    bind("a", Rc::new(FnCommand::new(insert_after)));
    bind("I", Rc::new(FnCommand::new(insert_line_start)));
    bind("A", Rc::new(FnCommand::new(insert_line_end)));
    bind("V", Rc::new(FnCommand::new(select_line_range)));
    bind("f", Rc::new(FnCommand::new(find_forward).with_argument()));
    bind("F", Rc::new(FnCommand::new(find_backward).with_argument()));
    table
}

/// `[count]gg`: first non-blank of line `count` (line 1 without a count).
fn goto_line(surface: &mut dyn EditorSurface, count: u32, _: Option<char>) -> RequestedMode {
    surface.set_caret_line(count as usize);
    line_start(surface);
    RequestedMode::None
}

fn insert_before(_: &mut dyn EditorSurface, _: u32, _: Option<char>) -> RequestedMode {
    RequestedMode::Insert
}

fn insert_after(surface: &mut dyn EditorSurface, _: u32, _: Option<char>) -> RequestedMode {
    if let Some(span) = surface.caret_line_span() {
        let next = (surface.caret_offset() + 1).min(span.end_offset);
        surface.set_caret_offset(next);
    }
    RequestedMode::Insert
}

fn insert_line_start(surface: &mut dyn EditorSurface, _: u32, _: Option<char>) -> RequestedMode {
    line_start(surface);
    RequestedMode::Insert
}

fn insert_line_end(surface: &mut dyn EditorSurface, _: u32, _: Option<char>) -> RequestedMode {
    if let Some(span) = surface.caret_line_span() {
        surface.set_caret_offset(span.end_offset);
    }
    RequestedMode::Insert
}

/// `[count]V`: select `count` whole lines starting at the caret line.
fn select_line_range(
    surface: &mut dyn EditorSurface,
    count: u32,
    _: Option<char>,
) -> RequestedMode {
    let line = surface.caret_line();
    select_lines(surface, line, line + count as usize - 1);
    RequestedMode::VisualLine
}

/// `[count]f{c}`: jump to the count-th `c` right of the caret on this line.
fn find_forward(
    surface: &mut dyn EditorSurface,
    count: u32,
    target: Option<char>,
) -> RequestedMode {
    let (Some(target), Some(span)) = (target, surface.caret_line_span()) else {
        return RequestedMode::None;
    };
    let hit = (surface.caret_offset() + 1..span.end_offset)
        .filter(|&o| surface.char_at(o) == Some(target))
        .nth(count as usize - 1);
    if let Some(offset) = hit {
        surface.set_caret_offset(offset);
    }
    RequestedMode::None
}

fn find_backward(
    surface: &mut dyn EditorSurface,
    count: u32,
    target: Option<char>,
) -> RequestedMode {
    let (Some(target), Some(span)) = (target, surface.caret_line_span()) else {
        return RequestedMode::None;
    };
    let hit = (span.offset..surface.caret_offset())
        .rev()
        .filter(|&o| surface.char_at(o) == Some(target))
        .nth(count as usize - 1);
    if let Some(offset) = hit {
        surface.set_caret_offset(offset);
    }
    RequestedMode::None
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_state::EditorState;
    use core_text::Buffer;

    fn state(text: &str) -> EditorState {
        EditorState::new(Buffer::from_str("t", text).unwrap())
    }

    #[test]
    fn table_names_are_unique() {
        let table = standard_commands();
        let mut names: Vec<_> = table.iter().map(|(n, _)| n.clone()).collect();
        names.sort_by_key(|n| format!("{n:?}"));
        names.dedup();
        assert_eq!(names.len(), table.len());
    }

    #[test]
    fn goto_line_lands_on_first_non_blank() {
        let mut s = state("a\n  b\nc");
        assert_eq!(goto_line(&mut s, 2, None), RequestedMode::None);
        assert_eq!(s.caret_position(), (2, 2));
        goto_line(&mut s, 99, None);
        assert_eq!(s.caret_line(), 3);
    }

    #[test]
    fn insert_variants_position_the_caret() {
        let mut s = state("  word\n");
        s.set_caret_column(3);
        assert_eq!(insert_after(&mut s, 1, None), RequestedMode::Insert);
        assert_eq!(s.caret_column(), 4);
        insert_line_end(&mut s, 1, None);
        assert_eq!(s.caret_column(), 6);
        insert_line_start(&mut s, 1, None);
        assert_eq!(s.caret_column(), 2);
    }

    #[test]
    fn find_respects_count_and_line_bounds() {
        let mut s = state("a-b-c-d\n-");
        find_forward(&mut s, 2, Some('-'));
        assert_eq!(s.caret_column(), 3);
        find_forward(&mut s, 5, Some('-'));
        assert_eq!(s.caret_position(), (1, 3), "no match leaves the caret");
        find_backward(&mut s, 1, Some('a'));
        assert_eq!(s.caret_column(), 0);
        find_forward(&mut s, 1, None);
        assert_eq!(s.caret_column(), 0);
    }

    #[test]
    fn visual_line_selects_count_lines() {
        let mut s = state("one\ntwo\nthree\n");
        s.set_caret_line(2);
        assert_eq!(select_line_range(&mut s, 2, None), RequestedMode::VisualLine);
        assert_eq!(s.selection.range, Some(4..14));
    }
}
