//! Table component renderer.
//!
//! This module renders event lists as a table with a favorite marker and
//! DATE, TIME, NAME, detail and CATEGORY columns. It supports selection
//! highlighting and keyword match highlighting in the name column.

use crate::ui::helpers::{self, fit, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{DisplayItem, ListView};

const STAR_WIDTH: usize = 2;
const DATE_WIDTH: usize = 14;
const TIME_WIDTH: usize = 10;
const DETAIL_WIDTH: usize = 24;
const GAP: usize = 2;

/// Renders the table column headers at the specified row.
///
/// `detail_label` names the fourth column (`VENUE` for search results,
/// `ADDED` for favorites).
///
/// # Returns
///
/// The next available row position (row + 1)
pub fn render_table_headers(row: usize, list: &ListView, detail_label: &str, theme: &Theme) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    print!("{}", " ".repeat(STAR_WIDTH));
    print!("{}", fit("DATE", DATE_WIDTH));
    print!("{}", fit("TIME", TIME_WIDTH));
    print!("{}", fit("NAME", list.name_width + GAP));
    print!("{}", fit(detail_label, DETAIL_WIDTH));
    print!("CATEGORY");
    print!("{}", Theme::reset());
    row + 1
}

/// Renders all table rows starting at the specified row.
///
/// # Parameters
///
/// * `row` - Starting row position for the table (1-indexed)
/// * `list` - Windowed list with display items and column width
/// * `theme` - Active color theme
/// * `cols` - Terminal width in columns (for padding)
///
/// # Returns
///
/// The next available row position (row + number of items)
pub fn render_table_rows(row: usize, list: &ListView, theme: &Theme, cols: usize) -> usize {
    let mut current_row = row;
    for item in &list.items {
        current_row = render_table_row(current_row, item, list.name_width, theme, cols);
    }
    current_row
}

/// Renders a single table row at the specified row position.
///
/// # Styling Precedence
///
/// 1. Selection background (if `is_selected`)
/// 2. Keyword highlights (unless selected)
/// 3. Normal text color
///
/// The favorite star keeps its own color either way. The row is padded to the
/// full terminal width so the selection background spans it.
fn render_table_row(row: usize, item: &DisplayItem, name_width: usize, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);

    let base = || {
        if item.is_selected {
            format!(
                "{}{}",
                Theme::fg(&theme.colors.selection_fg),
                Theme::bg(&theme.colors.selection_bg)
            )
        } else {
            Theme::fg(&theme.colors.text_normal)
        }
    };

    print!("{}", base());
    if item.is_favorite {
        print!("{}★ {}", Theme::fg(&theme.colors.favorite_fg), base());
    } else {
        print!("{}", " ".repeat(STAR_WIDTH));
    }

    print!("{}", fit(&item.date, DATE_WIDTH));
    print!("{}", fit(&item.time, TIME_WIDTH));

    helpers::render_highlighted_text(&item.name, &item.highlight_ranges, theme, item.is_selected);
    print!("{}", " ".repeat((name_width + GAP).saturating_sub(helpers::cell_width(&item.name))));

    print!("{}", fit(&item.detail, DETAIL_WIDTH - GAP));
    print!("{}", " ".repeat(GAP));
    print!("{}", item.category);

    let line_len = STAR_WIDTH
        + DATE_WIDTH
        + TIME_WIDTH
        + name_width
        + GAP
        + DETAIL_WIDTH
        + helpers::cell_width(&item.category);
    print!("{}", " ".repeat(cols.saturating_sub(line_len)));

    print!("{}", Theme::reset());
    row + 1
}
