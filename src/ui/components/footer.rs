//! Footer component renderer.
//!
//! This module renders the footer help bar with centered keybinding hints, or
//! the transient status message when one is set.

use crate::ui::helpers::{print_centered, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::FooterInfo;

/// Renders the footer help bar at the specified row.
///
/// A status message takes the place of the keybinding hints until the next
/// key press clears it.
///
/// # Parameters
///
/// * `row` - Row position to render the footer (1-indexed)
/// * `footer` - Footer information (keybinding text, status)
/// * `theme` - Active color theme
/// * `cols` - Terminal width in columns
///
/// # Returns
///
/// The next available row position (row + 1)
pub fn render_footer(row: usize, footer: &FooterInfo, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);
    match &footer.status {
        Some(status) => {
            print!("{}", Theme::bold());
            print!("{}", Theme::fg(&theme.colors.error_fg));
            print_centered(status, cols);
        }
        None => {
            print!("{}", Theme::fg(&theme.colors.text_dim));
            print_centered(&footer.keybindings, cols);
        }
    }
    print!("{}", Theme::reset());
    row + 1
}
