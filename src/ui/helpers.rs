//! Shared rendering utilities and helpers.
//!
//! This module provides low-level rendering utilities used across multiple UI
//! components. It handles text rendering tasks like keyword match highlighting
//! with proper ANSI escape sequence management, and column padding.
//!
//! # Features
//!
//! - **Match Highlighting**: Renders text with highlighted character ranges
//! - **Selection Awareness**: Adjusts highlighting based on selection state
//! - **UTF-8 Safe**: Operates on character indices, not byte indices
//!
//! # Example
//!
//! ```rust
//! use eventscout::ui::helpers::render_highlighted_text;
//! use eventscout::ui::Theme;
//!
//! let theme = Theme::default();
//! let text = "Taylor Swift";
//! let ranges = vec![(0, 3)]; // Highlight "Tay"
//!
//! render_highlighted_text(text, &ranges, &theme, false);
//! ```

use crate::ui::theme::Theme;

/// Positions the cursor at a specific row and column.
///
/// Uses ANSI escape sequence `\u{1b}[{row};{col}H` to move the cursor.
/// Coordinates are 1-indexed (row 1 = first row, col 1 = first column).
///
/// # Parameters
///
/// * `row` - Target row (1-indexed)
/// * `col` - Target column (1-indexed, typically 1 for start of line)
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Number of terminal cells `text` occupies, counting one per character.
#[must_use]
pub fn cell_width(text: &str) -> usize {
    text.chars().count()
}

/// Left-aligns `text` in a column of `width` cells, cutting it when longer.
///
/// # Example
///
/// ```rust
/// use eventscout::ui::helpers::fit;
///
/// assert_eq!(fit("Aug 8", 8), "Aug 8   ");
/// assert_eq!(fit("Miscellaneous", 6), "Miscel");
/// ```
#[must_use]
pub fn fit(text: &str, width: usize) -> String {
    let cut: String = text.chars().take(width).collect();
    let pad = width.saturating_sub(cell_width(&cut));
    format!("{cut}{}", " ".repeat(pad))
}

/// Prints `text` centered in `cols` cells, padding both sides.
pub fn print_centered(text: &str, cols: usize) {
    let len = cell_width(text).min(cols);
    let padding = cols.saturating_sub(len) / 2;
    print!("{}", " ".repeat(padding));
    print!("{}", text.chars().take(cols).collect::<String>());
    print!("{}", " ".repeat(cols.saturating_sub(padding + len)));
}

/// Splits `text` into `(segment, highlighted)` runs.
///
/// `ranges` are `(start, end)` character indices, end exclusive. Ranges that
/// overlap an earlier one or run past the end of `text` are clipped.
#[must_use]
pub fn highlight_segments(text: &str, ranges: &[(usize, usize)]) -> Vec<(String, bool)> {
    let chars: Vec<char> = text.chars().collect();
    let mut segments = Vec::new();
    let mut cursor = 0;

    for &(start, end) in ranges {
        let start = start.clamp(cursor, chars.len());
        let end = end.clamp(start, chars.len());
        if start > cursor {
            segments.push((chars[cursor..start].iter().collect(), false));
            cursor = start;
        }
        if end > start {
            segments.push((chars[start..end].iter().collect(), true));
            cursor = end;
        }
    }
    if cursor < chars.len() {
        segments.push((chars[cursor..].iter().collect(), false));
    }
    segments
}

/// Prints an event name with its keyword matches highlighted.
///
/// A selected row prints plain so the selection background stays intact.
pub fn render_highlighted_text(text: &str, ranges: &[(usize, usize)], theme: &Theme, is_selected: bool) {
    if ranges.is_empty() || is_selected {
        print!("{text}");
        return;
    }

    let highlight = format!(
        "{}{}",
        Theme::fg(&theme.colors.highlight_fg),
        Theme::bg(&theme.colors.highlight_bg)
    );
    let normal = format!("{}{}", Theme::reset(), Theme::fg(&theme.colors.text_normal));
    for (segment, highlighted) in highlight_segments(text, ranges) {
        if highlighted {
            print!("{highlight}{segment}{normal}");
        } else {
            print!("{segment}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_counts_characters() {
        assert_eq!(fit("Café", 6), "Café  ");
        assert_eq!(fit("", 2), "  ");
    }

    #[test]
    fn segments_cover_text_once() {
        let seg = |s: &str, h: bool| (s.to_string(), h);
        assert_eq!(
            highlight_segments("Jazz Night", &[(0, 4), (2, 6), (20, 30)]),
            vec![seg("Jazz", true), seg(" N", true), seg("ight", false)]
        );
        assert_eq!(highlight_segments("abc", &[]), vec![seg("abc", false)]);
        assert_eq!(
            highlight_segments("Opera", &[(9, 12)]),
            vec![seg("Opera", false)]
        );
        assert_eq!(
            highlight_segments("Opera", &[(1, 2), (7, 9)]),
            vec![seg("O", false), seg("p", true), seg("era", false)]
        );
    }

    #[test]
    fn out_of_range_highlights_do_not_panic() {
        let theme = Theme::default();
        render_highlighted_text("abc", &[(1, 10), (20, 30)], &theme, false);
    }
}
