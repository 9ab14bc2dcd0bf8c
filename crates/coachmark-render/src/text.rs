#![forbid(unsafe_code)]

//! Width-aware text helpers shared by card measurement and rasterization.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Display width in columns.
pub fn display_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

/// Greedy word wrap into lines of at most `max_width` columns.
///
/// Paragraph breaks are kept; an empty paragraph yields an empty line.
/// Words wider than a whole line are split at grapheme boundaries.
pub fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    if max_width == 0 {
        return vec![];
    }

    let mut lines = Vec::new();
    for paragraph in text.lines() {
        if paragraph.trim().is_empty() {
            lines.push(String::new());
            continue;
        }

        let mut current_line = String::new();
        let mut current_width: usize = 0;

        for word in paragraph.split_whitespace() {
            let word_width = display_width(word);

            if word_width > max_width {
                if !current_line.is_empty() {
                    lines.push(std::mem::take(&mut current_line));
                }
                let mut pieces = split_graphemes(word, max_width);
                let last = pieces.pop().unwrap_or_default();
                lines.extend(pieces);
                current_width = display_width(&last);
                current_line = last;
            } else if current_width == 0 {
                current_line = word.to_string();
                current_width = word_width;
            } else if current_width + 1 + word_width <= max_width {
                current_line.push(' ');
                current_line.push_str(word);
                current_width += 1 + word_width;
            } else {
                lines.push(std::mem::replace(&mut current_line, word.to_string()));
                current_width = word_width;
            }
        }

        if !current_line.is_empty() {
            lines.push(current_line);
        }
    }

    lines
}

/// The longest prefix of `text` that fits in `max_width` columns.
pub fn truncate_to_width(text: &str, max_width: usize) -> &str {
    let mut used = 0usize;
    for (idx, grapheme) in text.grapheme_indices(true) {
        let w = display_width(grapheme);
        if used + w > max_width {
            return &text[..idx];
        }
        used += w;
    }
    text
}

fn split_graphemes(word: &str, max_width: usize) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut piece = String::new();
    let mut width = 0usize;
    for grapheme in word.graphemes(true) {
        let w = display_width(grapheme);
        if width + w > max_width && !piece.is_empty() {
            pieces.push(std::mem::take(&mut piece));
            width = 0;
        }
        piece.push_str(grapheme);
        width += w;
    }
    if !piece.is_empty() {
        pieces.push(piece);
    }
    pieces
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_respects_width() {
        let lines = wrap_text("This is a long line that should wrap", 15);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(display_width(line) <= 15, "line too wide: {line:?}");
        }
    }

    #[test]
    fn wrap_empty_and_zero_width() {
        assert!(wrap_text("", 20).is_empty());
        assert!(wrap_text("hello", 0).is_empty());
    }

    #[test]
    fn wrap_keeps_paragraph_breaks() {
        let lines = wrap_text("one\n\ntwo", 20);
        assert_eq!(lines, vec!["one", "", "two"]);
    }

    #[test]
    fn long_word_is_split() {
        let lines = wrap_text("abcdefghij xy", 4);
        assert_eq!(lines, vec!["abcd", "efgh", "ij", "xy"]);
    }

    #[test]
    fn long_word_tail_joins_next_word() {
        let lines = wrap_text("abcdefg h", 4);
        assert_eq!(lines, vec!["abcd", "efg", "h"]);
    }

    #[test]
    fn wide_glyphs_count_double() {
        assert_eq!(display_width("日本"), 4);
        assert_eq!(truncate_to_width("日本語", 5), "日本");
        assert_eq!(truncate_to_width("abc", 10), "abc");
    }
}
