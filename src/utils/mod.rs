// Offset helpers for text widgets that position by column

use std::ops::Range;

use unicode_width::UnicodeWidthChar;

use crate::models::StyledSpan;

/// Number of characters before `byte_offset` in `line`. Offsets past the end
/// or inside a character are clamped down to a character boundary.
pub fn char_column(line: &str, byte_offset: usize) -> usize {
    line[..floor_char_boundary(line, byte_offset)].chars().count()
}

/// Terminal display width of `line` up to `byte_offset`, counting wide
/// characters as two cells.
pub fn display_column(line: &str, byte_offset: usize) -> usize {
    line[..floor_char_boundary(line, byte_offset)]
        .chars()
        .map(|ch| ch.width().unwrap_or(0))
        .sum()
}

/// Character-column range of a span, for widgets indexed by character.
pub fn span_char_range(line: &str, span: &StyledSpan) -> Range<usize> {
    char_column(line, span.start)..char_column(line, span.end())
}

/// Display-column range of a span, for cell-based renderers.
pub fn span_display_range(line: &str, span: &StyledSpan) -> Range<usize> {
    display_column(line, span.start)..display_column(line, span.end())
}

fn floor_char_boundary(line: &str, byte_offset: usize) -> usize {
    let mut offset = byte_offset.min(line.len());
    while !line.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_column() {
        assert_eq!(char_column("abc", 2), 2);
        assert_eq!(char_column("héllo", 3), 2);
        assert_eq!(char_column("héllo", 2), 1);
        assert_eq!(char_column("ab", 10), 2);
    }

    #[test]
    fn test_span_ranges_on_multibyte_line() {
        use crate::highlighter::Highlighter;
        use crate::models::HighlightKind;
        use crate::theme::EditorPalette;

        let line = "'héllo' # ü";
        let highlight = Highlighter::new(EditorPalette::DARK_PLUS)
            .unwrap()
            .highlight(line, Default::default());
        let string = &highlight.spans[0];
        let comment = highlight.spans.last().unwrap();
        assert_eq!(string.kind, HighlightKind::String);
        assert_eq!(comment.kind, HighlightKind::Comment);

        assert_eq!(string.range(), 0..8);
        assert_eq!(span_char_range(line, string), 0..7);
        assert_eq!(span_display_range(line, string), 0..7);
        assert_eq!(comment.range(), 9..13);
        assert_eq!(span_char_range(line, comment), 8..11);
        assert_eq!(span_display_range(line, comment), 8..11);
    }

    #[test]
    fn test_display_column_wide_chars() {
        assert_eq!(display_column("日本x", 6), 4);
        assert_eq!(display_column("日本x", 7), 5);
    }
}
