//! Caret-off-end-of-line correction.
//!
//! Outside insert-like modes the caret rests on a real character: a caret
//! sitting exactly at the end offset of a non-empty line is moved one left.
//! Empty lines are left alone. Applying the correction twice is the same as
//! applying it once. The column remembered for vertical moves survives.

use core_state::{EditorSurface, RequestedMode};
use tracing::trace;

pub fn caret_off_eol(surface: &mut dyn EditorSurface, mode: RequestedMode) {
    if mode.is_insert_like() {
        return;
    }
    let Some(span) = surface.caret_line_span() else {
        return;
    };
    if !span.is_empty() && surface.caret_offset() == span.end_offset {
        surface.retreat_caret();
        trace!(target: "actions.motion", line = surface.caret_line(), "caret_off_eol");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_state::EditorState;
    use core_text::Buffer;
    use proptest::prelude::*;

    fn state(text: &str) -> EditorState {
        EditorState::new(Buffer::from_str("t", text).unwrap())
    }

    #[test]
    fn end_of_line_moves_left() {
        let mut s = state("abc\n");
        s.set_caret_column(3);
        caret_off_eol(&mut s, RequestedMode::None);
        assert_eq!(s.caret_position(), (1, 2));
    }

    #[test]
    fn insert_mode_keeps_caret_past_end() {
        let mut s = state("abc\n");
        s.set_caret_column(3);
        caret_off_eol(&mut s, RequestedMode::Insert);
        assert_eq!(s.caret_position(), (1, 3));
    }

    #[test]
    fn empty_line_is_untouched() {
        let mut s = state("abc\n\nxyz");
        s.set_caret_line(2);
        caret_off_eol(&mut s, RequestedMode::Normal);
        assert_eq!(s.caret_position(), (2, 0));
    }

    proptest! {
        #[test]
        fn correction_is_idempotent(
            lines in proptest::collection::vec("[a-z ]{0,8}", 1..6),
            line in 1usize..7,
            column in 0usize..10,
            mode in prop_oneof![
                Just(RequestedMode::None),
                Just(RequestedMode::Normal),
                Just(RequestedMode::Visual),
                Just(RequestedMode::VisualLine),
            ],
        ) {
            let mut s = state(&lines.join("\n"));
            s.place_caret(line, column);
            caret_off_eol(&mut s, mode);
            let once = s.caret_offset();
            if let Some(span) = s.caret_line_span() {
                prop_assert!(span.is_empty() || once != span.end_offset);
            }
            caret_off_eol(&mut s, mode);
            prop_assert_eq!(s.caret_offset(), once);
        }
    }
}
