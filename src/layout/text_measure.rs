//! Text Measurement
//!
//! Splits text into layout units and measures them in cells.
//!
//! - A unit is one extended grapheme cluster (UAX #29), so combining marks
//!   and emoji sequences stay in one box
//! - Width comes from the East Asian Width tables: CJK ideographs and
//!   fullwidth punctuation are 2 cells, ASCII is 1, control characters 0
//! - Ambiguous-width characters (curly quotes, `…`, `—`) are measured as
//!   wide, the way CJK fonts draw them

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthChar;

/// Split text into layout units (extended grapheme clusters).
///
/// `"\r\n"` stays a single unit.
pub fn text_units(text: &str) -> Vec<&str> {
    text.graphemes(true).collect()
}

/// Display width of a single codepoint in cells, in a CJK context.
#[inline]
pub fn char_width(c: char) -> usize {
    c.width_cjk().unwrap_or(0)
}

/// Display width of one unit in cells.
///
/// A base character followed by combining marks measures as the base.
pub fn unit_width(unit: &str) -> usize {
    let mut chars = unit.chars();
    let Some(first) = chars.next() else {
        return 0;
    };

    // Multi-codepoint emoji sequences render as one wide glyph
    for c in chars {
        match c as u32 {
            0x200D | 0xFE0F | 0x20E3 | 0x1F3FB..=0x1F3FF => return 2,
            _ => {}
        }
    }

    char_width(first)
}

/// Display width of a string in cells.
pub fn string_width(text: &str) -> usize {
    text.graphemes(true).map(unit_width).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_units_cjk() {
        assert_eq!(text_units("中文，好"), vec!["中", "文", "，", "好"]);
        assert!(text_units("").is_empty());
    }

    #[test]
    fn test_text_units_keep_clusters() {
        // e + combining acute
        assert_eq!(text_units("e\u{301}x"), vec!["e\u{301}", "x"]);
        assert_eq!(text_units("a\r\nb"), vec!["a", "\r\n", "b"]);
        assert_eq!(text_units("a\nb"), vec!["a", "\n", "b"]);
    }

    #[test]
    fn test_unit_width() {
        assert_eq!(unit_width("a"), 1);
        assert_eq!(unit_width("中"), 2);
        assert_eq!(unit_width("，"), 2);
        assert_eq!(unit_width("“"), 2);
        assert_eq!(unit_width("…"), 2);
        assert_eq!(unit_width("\n"), 0);
        assert_eq!(unit_width("e\u{301}"), 1);
        assert_eq!(unit_width(""), 0);
    }

    #[test]
    fn test_string_width() {
        assert_eq!(string_width("abc"), 3);
        assert_eq!(string_width("中文"), 4);
        assert_eq!(string_width("中a\n"), 3);
    }
}
