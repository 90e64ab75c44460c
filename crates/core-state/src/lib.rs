//! Editor state: the caret/selection surface the dispatcher drives, and the
//! mode values it produces.
//!
//! The dispatcher never touches text storage directly. Everything it needs
//! from the host is expressed by the [`EditorSurface`] capability trait;
//! [`EditorState`] is the in-memory implementation backed by
//! `core_text::Buffer`, used by the binary and by tests.
//!
//! Coordinates (see `core-text`): lines are 1-based, columns are 0-based char
//! columns, offsets are absolute char offsets.

pub use core_text::LineSpan;

mod editor;
pub use editor::{EditorState, Selection};

/// Mode the enclosing mode controller should switch to after a command ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RequestedMode {
    /// Stay in the current mode.
    #[default]
    None,
    /// Normal command/navigation mode.
    Normal,
    /// Insert text mode. The caret may rest one past the last char.
    Insert,
    /// Character-wise visual selection.
    Visual,
    /// Line-wise visual selection.
    VisualLine,
}

impl RequestedMode {
    /// Insert-like modes allow the caret past the line end and suppress the
    /// off-end-of-line correction.
    pub fn is_insert_like(self) -> bool {
        matches!(self, RequestedMode::Insert)
    }
}

/// Capabilities consumed from the host text view.
///
/// Implementations mutate synchronously; the dispatcher assumes a single
/// writer and performs no locking.
pub trait EditorSurface {
    /// 1-based line holding the caret.
    fn caret_line(&self) -> usize;
    /// Move the caret to `line` (clamped), keeping its column where possible.
    fn set_caret_line(&mut self, line: usize);
    /// 0-based char column of the caret within its line.
    fn caret_column(&self) -> usize;
    fn set_caret_column(&mut self, column: usize);
    /// Absolute char offset of the caret.
    fn caret_offset(&self) -> usize;
    fn set_caret_offset(&mut self, offset: usize);

    fn line_count(&self) -> usize;
    /// Offsets of a 1-based line, `None` when out of range.
    fn line(&self, line: usize) -> Option<LineSpan>;
    fn char_at(&self, offset: usize) -> Option<char>;
    fn text(&self) -> String;

    fn move_up(&mut self);
    fn move_down(&mut self);
    fn move_left(&mut self);
    fn move_right(&mut self);

    /// Step back one char off the line end. Unlike [`move_left`](Self::move_left)
    /// this keeps any remembered column for vertical moves.
    fn retreat_caret(&mut self) {
        self.move_left();
    }

    /// Select the char range `[start, end)`.
    fn set_selection(&mut self, start: usize, end: usize);
    /// Ask the view to scroll so the caret is vertically centered.
    fn center_to_caret(&mut self);

    /// Span of the caret line.
    fn caret_line_span(&self) -> Option<LineSpan> {
        self.line(self.caret_line())
    }
}
