//! Tab strip renderer, shared by the category tabs and the details tabs.

use crate::ui::helpers::{cell_width, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::TabsInfo;

/// Renders a row of tab labels with the active one highlighted.
///
/// `dimmed` draws inactive labels in the dim color, used when the tab strip
/// is not what the arrow keys currently drive.
///
/// # Returns
///
/// The next available row position (row + 1)
pub fn render_tabs(row: usize, tabs: &TabsInfo, dimmed: bool, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("  ");
    let mut used = 2;

    for (i, label) in tabs.labels.iter().enumerate() {
        let cell = format!(" {label} ");
        if i == tabs.active {
            print!("{}", Theme::bold());
            print!("{}", Theme::fg(&theme.colors.tab_active_fg));
            print!("{}", Theme::bg(&theme.colors.tab_active_bg));
        } else if dimmed {
            print!("{}", Theme::fg(&theme.colors.text_dim));
        } else {
            print!("{}", Theme::fg(&theme.colors.text_normal));
        }
        print!("{cell}");
        print!("{}", Theme::reset());
        print!(" ");
        used += cell_width(&cell) + 1;
    }

    print!("{}", " ".repeat(cols.saturating_sub(used)));
    row + 1
}
