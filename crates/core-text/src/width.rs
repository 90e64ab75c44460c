//! Display column helpers.
//!
//! Vertical caret motion keeps a sticky *display* column so a caret passing
//! through lines with wide glyphs (CJK, emoji) lands under the same cell.
//! All width decisions go through [`char_width`].

use unicode_width::UnicodeWidthChar;

/// Terminal cell width of one char; control chars count as zero, tabs as one.
pub fn char_width(c: char) -> usize {
    if c == '\t' {
        return 1;
    }
    c.width().unwrap_or(0)
}

/// Display column of char column `col` within `line`.
pub fn display_col(line: &str, col: usize) -> usize {
    line.chars().take(col).map(char_width).sum()
}

/// Char column whose cell contains `target` display column, clamped to the
/// line length.
pub fn col_for_display(line: &str, target: usize) -> usize {
    let mut cells = 0;
    for (i, c) in line.chars().enumerate() {
        let w = char_width(c);
        if cells + w > target {
            return i;
        }
        cells += w;
    }
    line.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_columns_are_identity() {
        assert_eq!(display_col("hello", 3), 3);
        assert_eq!(col_for_display("hello", 3), 3);
    }

    #[test]
    fn wide_glyphs_take_two_cells() {
        let s = "漢字x";
        assert_eq!(display_col(s, 1), 2);
        assert_eq!(display_col(s, 2), 4);
        // cell 3 is the right half of 字
        assert_eq!(col_for_display(s, 3), 1);
        assert_eq!(col_for_display(s, 4), 2);
    }

    #[test]
    fn target_past_end_clamps() {
        assert_eq!(col_for_display("ab", 10), 2);
        assert_eq!(col_for_display("", 4), 0);
    }
}
