//! Details screen body renderer.

use super::empty::render_empty_state;
use super::tabs::render_tabs;
use crate::ui::helpers::{cell_width, fit, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{DetailsBody, DetailsView, EmptyState};

const LABEL_WIDTH: usize = 16;

/// Renders the event title, tab strip and the active tab's rows.
///
/// Rows that do not fit above `last_row` are dropped. Long values wrap onto
/// continuation lines under the value column.
///
/// # Returns
///
/// The next available row position.
pub fn render_details(row: usize, view: &DetailsView, theme: &Theme, cols: usize, last_row: usize) -> usize {
    let mut current_row = row;

    position_cursor(current_row, 1);
    print!("  ");
    if view.is_favorite {
        print!("{}★ ", Theme::fg(&theme.colors.favorite_fg));
    } else {
        print!("{}☆ ", Theme::fg(&theme.colors.text_dim));
    }
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.text_normal));
    print!("{}", fit(&view.title, cols.saturating_sub(4)));
    print!("{}", Theme::reset());
    current_row += 1;

    current_row = render_tabs(current_row, &view.tabs, false, theme, cols);

    let rows = match &view.body {
        DetailsBody::Loading => {
            let loading = EmptyState { message: "Loading...".to_string(), subtitle: String::new() };
            render_empty_state(current_row, &loading, true, theme, cols);
            return current_row + 2;
        }
        DetailsBody::Message(message) => {
            let empty = EmptyState { message: message.clone(), subtitle: String::new() };
            render_empty_state(current_row, &empty, false, theme, cols);
            return current_row + 2;
        }
        DetailsBody::Rows(rows) => rows,
    };

    current_row += 1;
    let value_width = cols.saturating_sub(LABEL_WIDTH + 4).max(1);
    for detail in rows {
        for (i, line) in wrap(&detail.value, value_width).iter().enumerate() {
            if current_row > last_row {
                return current_row;
            }
            position_cursor(current_row, 1);
            print!("  ");
            print!("{}", Theme::fg(&theme.colors.text_dim));
            let label = if i == 0 { detail.label.as_str() } else { "" };
            print!("{}", fit(label, LABEL_WIDTH));
            print!("{}", Theme::fg(&theme.colors.text_normal));
            print!("{line}");
            print!("{}", " ".repeat(cols.saturating_sub(LABEL_WIDTH + 2 + cell_width(line))));
            print!("{}", Theme::reset());
            current_row += 1;
        }
    }
    current_row
}

/// Splits `text` into lines of at most `width` characters, preferring spaces.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split(' ') {
        let word_len = cell_width(word);
        let line_len = cell_width(&line);
        if line_len > 0 && line_len + 1 + word_len > width {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
        while cell_width(&line) > width {
            let head: String = line.chars().take(width).collect();
            line = line.chars().skip(width).collect();
            lines.push(head);
        }
    }
    if !line.is_empty() || lines.is_empty() {
        lines.push(line);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::wrap;

    #[test]
    fn wraps_on_spaces_and_splits_long_words() {
        assert_eq!(wrap("Arts & Theatre", 20), vec!["Arts & Theatre"]);
        assert_eq!(wrap("one two three", 8), vec!["one two", "three"]);
        assert_eq!(wrap("https://example.com/x", 10), vec!["https://ex", "ample.com/", "x"]);
        assert_eq!(wrap("", 5), vec![""]);
    }
}
