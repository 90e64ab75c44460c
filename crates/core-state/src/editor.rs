//! In-memory [`EditorSurface`] over a rope buffer.

use crate::{EditorSurface, LineSpan};
use core_text::{Buffer, width};
use std::ops::Range;
use tracing::trace;

/// Persistent selection as a half-open char range.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selection {
    pub range: Option<Range<usize>>,
}

impl Selection {
    pub fn set(&mut self, range: Range<usize>) {
        self.range = Some(range);
    }

    pub fn clear(&mut self) {
        self.range = None;
    }

    pub fn is_active(&self) -> bool {
        self.range.is_some()
    }
}

/// Caret, selection and viewport requests over a single buffer.
pub struct EditorState {
    buffer: Buffer,
    caret: usize,
    /// Display column preserved across consecutive vertical moves.
    sticky_col: Option<usize>,
    pub selection: Selection,
    /// Line the view was last asked to center on.
    pub centered_line: Option<usize>,
    pub center_requests: usize,
}

impl EditorState {
    pub fn new(buffer: Buffer) -> Self {
        Self {
            buffer,
            caret: 0,
            sticky_col: None,
            selection: Selection::default(),
            centered_line: None,
            center_requests: 0,
        }
    }

    pub fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    /// Caret as `(line, column)`, handy for assertions and status output.
    pub fn caret_position(&self) -> (usize, usize) {
        (self.caret_line(), self.caret_column())
    }

    /// Place the caret at a 1-based line and 0-based column (both clamped).
    pub fn place_caret(&mut self, line: usize, column: usize) {
        self.set_caret_line(line);
        self.set_caret_column(column);
    }

    fn line_content(&self, line: usize) -> String {
        self.buffer.line_text(line).unwrap_or_default()
    }

    fn vertical_move(&mut self, target_line: usize) {
        let line = self.caret_line();
        let sticky = match self.sticky_col {
            Some(c) => c,
            None => width::display_col(&self.line_content(line), self.caret_column()),
        };
        let Some(span) = self.buffer.line_span(target_line) else {
            return;
        };
        let col = width::col_for_display(&self.line_content(target_line), sticky);
        self.caret = span.offset + col.min(span.len());
        self.sticky_col = Some(sticky);
        trace!(target: "actions.motion", from = line, to = target_line, sticky, "vertical_move");
    }
}

impl EditorSurface for EditorState {
    fn caret_line(&self) -> usize {
        self.buffer.line_of_offset(self.caret)
    }

    fn set_caret_line(&mut self, line: usize) {
        let line = line.clamp(1, self.buffer.line_count().max(1));
        let column = self.caret_column();
        if let Some(span) = self.buffer.line_span(line) {
            self.caret = span.offset + column.min(span.len());
        }
        self.sticky_col = None;
    }

    fn caret_column(&self) -> usize {
        self.caret_line_span()
            .map(|span| self.caret - span.offset)
            .unwrap_or(0)
    }

    fn set_caret_column(&mut self, column: usize) {
        if let Some(span) = self.caret_line_span() {
            self.caret = span.offset + column.min(span.len());
        }
        self.sticky_col = None;
    }

    fn caret_offset(&self) -> usize {
        self.caret
    }

    fn set_caret_offset(&mut self, offset: usize) {
        self.caret = offset.min(self.buffer.len_chars());
        self.sticky_col = None;
    }

    fn line_count(&self) -> usize {
        self.buffer.line_count()
    }

    fn line(&self, line: usize) -> Option<LineSpan> {
        self.buffer.line_span(line)
    }

    fn char_at(&self, offset: usize) -> Option<char> {
        self.buffer.char_at(offset)
    }

    fn text(&self) -> String {
        self.buffer.text()
    }

    fn move_up(&mut self) {
        let line = self.caret_line();
        if line > 1 {
            self.vertical_move(line - 1);
        }
    }

    fn move_down(&mut self) {
        let line = self.caret_line();
        if line < self.buffer.line_count() {
            self.vertical_move(line + 1);
        }
    }

    fn move_left(&mut self) {
        let line = self.caret_line();
        let Some(span) = self.buffer.line_span(line) else {
            return;
        };
        if self.caret > span.offset {
            self.caret -= 1;
        } else if let Some(prev) = self.buffer.line_span(line.wrapping_sub(1)) {
            self.caret = prev.end_offset;
        }
        self.sticky_col = None;
    }

    fn move_right(&mut self) {
        let line = self.caret_line();
        let Some(span) = self.buffer.line_span(line) else {
            return;
        };
        if self.caret < span.end_offset {
            self.caret += 1;
        } else if let Some(next) = self.buffer.line_span(line + 1) {
            self.caret = next.offset;
        }
        self.sticky_col = None;
    }

    fn retreat_caret(&mut self) {
        let sticky = self.sticky_col;
        self.move_left();
        self.sticky_col = sticky;
    }

    fn set_selection(&mut self, start: usize, end: usize) {
        let len = self.buffer.len_chars();
        self.selection.set(start.min(len)..end.min(len));
    }

    fn center_to_caret(&mut self) {
        self.centered_line = Some(self.caret_line());
        self.center_requests += 1;
    }
}
