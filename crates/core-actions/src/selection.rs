//! Line-wise selection helper for commands.

use core_state::EditorSurface;

/// Select whole lines `start..=end` (1-based, either order, clamped to the
/// document), from the first line's start through the last line's delimiter.
pub fn select_lines(surface: &mut dyn EditorSurface, start: usize, end: usize) {
    let count = surface.line_count().max(1);
    let a = start.clamp(1, count);
    let b = end.clamp(1, count);
    let (first, last) = if a <= b { (a, b) } else { (b, a) };
    let (Some(first), Some(last)) = (surface.line(first), surface.line(last)) else {
        return;
    };
    surface.set_selection(first.offset, last.end_offset_including_delimiter);
}
