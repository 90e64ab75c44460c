//! Rope-based text buffer abstraction.
//!
//! Addressing model used throughout the workspace:
//! - lines are 1-based (`1..=line_count()`),
//! - offsets are absolute char indices into the document,
//! - columns are 0-based char indices within a line.

use anyhow::Result;
use ropey::Rope;

pub mod width;

/// Char offsets bounding one document line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineSpan {
    /// Offset of the first char of the line.
    pub offset: usize,
    /// Offset just past the last content char (before any delimiter).
    pub end_offset: usize,
    /// Offset just past the line delimiter (equal to `end_offset` on the last line).
    pub end_offset_including_delimiter: usize,
}

impl LineSpan {
    /// Number of content chars (delimiter excluded).
    pub fn len(&self) -> usize {
        self.end_offset - self.offset
    }

    pub fn is_empty(&self) -> bool {
        self.end_offset == self.offset
    }
}

/// A text buffer backed by a `ropey::Rope`.
#[derive(Clone)]
pub struct Buffer {
    rope: Rope,
    pub name: String,
}

impl Buffer {
    /// Construct a buffer from an in-memory string slice.
    pub fn from_str(name: impl Into<String>, content: &str) -> Result<Self> {
        Ok(Self {
            rope: Rope::from_str(content),
            name: name.into(),
        })
    }

    /// Total number of lines (a trailing newline opens a final empty line).
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    /// Offsets of a 1-based line, or `None` when out of range.
    pub fn line_span(&self, line: usize) -> Option<LineSpan> {
        if line == 0 || line > self.rope.len_lines() {
            return None;
        }
        let idx = line - 1;
        let offset = self.rope.line_to_char(idx);
        let slice = self.rope.line(idx);
        let total = slice.len_chars();
        let mut content = total;
        if content > 0 && slice.char(content - 1) == '\n' {
            content -= 1;
        }
        if content > 0 && slice.char(content - 1) == '\r' {
            content -= 1;
        }
        Some(LineSpan {
            offset,
            end_offset: offset + content,
            end_offset_including_delimiter: offset + total,
        })
    }

    /// Content of a 1-based line without its delimiter.
    pub fn line_text(&self, line: usize) -> Option<String> {
        let span = self.line_span(line)?;
        Some(self.rope.slice(span.offset..span.end_offset).to_string())
    }

    /// 1-based line containing `offset` (clamped to the document).
    pub fn line_of_offset(&self, offset: usize) -> usize {
        let offset = offset.min(self.rope.len_chars());
        self.rope.char_to_line(offset) + 1
    }

    pub fn char_at(&self, offset: usize) -> Option<char> {
        if offset < self.rope.len_chars() {
            Some(self.rope.char(offset))
        } else {
            None
        }
    }

    /// Whole document as an owned `String`.
    pub fn text(&self) -> String {
        self.rope.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_buffer_and_read_line() {
        let b = Buffer::from_str("test", "hello\nworld").unwrap();
        assert_eq!(b.line_count(), 2);
        assert_eq!(b.line_text(1).unwrap(), "hello");
        assert_eq!(b.line_text(2).unwrap(), "world");
        assert!(b.line_text(0).is_none());
        assert!(b.line_text(3).is_none());
    }

    #[test]
    fn line_spans_track_delimiters() {
        let b = Buffer::from_str("t", "ab\n\ncd").unwrap();
        assert_eq!(
            b.line_span(1).unwrap(),
            LineSpan {
                offset: 0,
                end_offset: 2,
                end_offset_including_delimiter: 3
            }
        );
        let empty = b.line_span(2).unwrap();
        assert!(empty.is_empty());
        assert_eq!(empty.end_offset_including_delimiter, 4);
        let last = b.line_span(3).unwrap();
        assert_eq!(last.end_offset, last.end_offset_including_delimiter);
        assert_eq!(last.len(), 2);
    }

    #[test]
    fn crlf_is_a_single_delimiter() {
        let b = Buffer::from_str("t", "ab\r\ncd").unwrap();
        let first = b.line_span(1).unwrap();
        assert_eq!(first.end_offset, 2);
        assert_eq!(first.end_offset_including_delimiter, 4);
        assert_eq!(b.line_span(2).unwrap().offset, 4);
    }

    #[test]
    fn trailing_newline_opens_empty_line() {
        let b = Buffer::from_str("t", "abc\n").unwrap();
        assert_eq!(b.line_count(), 2);
        assert!(b.line_span(2).unwrap().is_empty());
    }

    #[test]
    fn offsets_map_back_to_lines() {
        let b = Buffer::from_str("t", "a😀\nxyz").unwrap();
        assert_eq!(b.line_of_offset(0), 1);
        assert_eq!(b.line_of_offset(1), 1);
        assert_eq!(b.line_of_offset(3), 2);
        assert_eq!(b.line_of_offset(99), 2);
        assert_eq!(b.char_at(1), Some('😀'));
        assert_eq!(b.char_at(6), None);
    }
}
