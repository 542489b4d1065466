//! Empty state component renderer.
//!
//! This module renders the message displayed in place of a list that has no
//! rows: no favorites, no search results, or a fetch still in flight.

use crate::ui::helpers::{print_centered, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::EmptyState;

/// Renders the empty state message starting at `row`.
///
/// Displays a centered two-line message. The message uses `loading_fg` while
/// a fetch is in flight and `placeholder_fg` otherwise; the subtitle is dimmed
/// and skipped when blank.
///
/// # Parameters
///
/// * `row` - First row of the message (1-indexed)
/// * `empty` - Empty state information (message and subtitle)
/// * `loading` - Whether the list is waiting on a response
/// * `theme` - Active color theme
/// * `cols` - Terminal width in columns
///
/// # Layout
///
/// ```text
/// [blank line]
/// [left padding] MESSAGE [right padding]
/// [left padding] subtitle [right padding]
/// ```
pub fn render_empty_state(row: usize, empty: &EmptyState, loading: bool, theme: &Theme, cols: usize) {
    let color = if loading { &theme.colors.loading_fg } else { &theme.colors.placeholder_fg };

    position_cursor(row + 1, 1);
    print!("{}", Theme::fg(color));
    print_centered(&empty.message, cols);
    print!("{}", Theme::reset());

    if empty.subtitle.is_empty() {
        return;
    }

    position_cursor(row + 2, 1);
    print!("{}", Theme::dim());
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print_centered(&empty.subtitle, cols);
    print!("{}", Theme::reset());
}
