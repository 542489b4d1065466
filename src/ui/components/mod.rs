//! Composable UI component renderers.
//!
//! This module provides specialized rendering components for different UI
//! elements, following a component-based architecture. Each component is
//! responsible for rendering a specific part of the interface.
//!
//! # Components
//!
//! - [`header`]: Title bar
//! - [`footer`]: Keybinding hints or the status message
//! - [`search`]: Search form box and suggestion dropdown
//! - [`tabs`]: Category and details tab strips
//! - [`table`]: Event list with DATE, TIME, NAME, detail and CATEGORY columns
//! - [`details`]: Event, artist and venue rows
//! - [`empty`]: Empty state message for lists with no rows
//!
//! # Layout Modes
//!
//! One layout function per screen:
//!
//! - [`render_home`]: Header + Table + Footer
//! - [`render_search`]: Header + Form + Tabs + Table (+ Dropdown) + Footer
//! - [`render_details_screen`]: Header + Title + Tabs + Rows + Footer

mod details;
mod empty;
mod footer;
mod header;
mod search;
mod table;
mod tabs;

use crate::app::modes::SearchField;
use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{DetailsView, ListView, SearchView, UIViewModel};

use details::render_details;
use empty::render_empty_state;
use footer::render_footer;
use header::render_header;
use search::{render_dropdown, render_search_form};
use table::{render_table_headers, render_table_rows};
use tabs::render_tabs;

/// Renders a horizontal border line at the specified row.
///
/// Used to separate UI sections (header/body, body/footer).
///
/// # Returns
///
/// The next available row position (row + 1)
fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Header, top border, and the bottom border plus footer.
fn render_chrome(vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) -> usize {
    let mut current_row = 2; // Start at row 2 (skip blank line at row 1)
    current_row = render_header(current_row, &vm.header, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);

    let footer_start = rows.saturating_sub(1);
    let border_row = footer_start.saturating_sub(1);
    render_border(border_row, &theme.colors.border, cols);
    render_footer(footer_start, &vm.footer, theme, cols);

    current_row
}

fn render_list(row: usize, list: &ListView, detail_label: &str, theme: &Theme, cols: usize) {
    if let Some(empty) = &list.empty_state {
        render_empty_state(row, empty, list.loading, theme, cols);
        return;
    }
    let current_row = render_table_headers(row, list, detail_label, theme);
    render_table_rows(current_row, list, theme, cols);
}

/// Renders the home screen: favorites newest-added first.
///
/// Layout structure:
/// ```text
/// [blank line]
/// [Header]
/// [Border]
/// [Table Headers]
/// [Table Rows]
/// [Border]
/// [Footer]
/// ```
pub fn render_home(vm: &UIViewModel, list: &ListView, theme: &Theme, cols: usize, rows: usize) {
    let current_row = render_chrome(vm, theme, cols, rows);
    render_list(current_row, list, "ADDED", theme, cols);
}

/// Renders the search screen.
///
/// Layout structure:
/// ```text
/// [blank line]
/// [Header]
/// [Border]
/// [Search Form - 3 lines]
/// [Category Tabs]
/// [Table Headers]
/// [Table Rows]            ← dropdown overlays this area
/// [Border]
/// [Footer]
/// ```
///
/// # Line Accounting
///
/// Reserves 10 lines for chrome. The dropdown is drawn last so it sits on
/// top of the result rows.
pub fn render_search(vm: &UIViewModel, search: &SearchView, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = render_chrome(vm, theme, cols, rows);
    current_row = render_search_form(current_row, &search.form, theme, cols);
    let dropdown_row = current_row;
    let dimmed = search.form.focus != SearchField::Results;
    current_row = render_tabs(current_row, &search.tabs, dimmed, theme, cols);
    render_list(current_row, &search.list, "VENUE", theme, cols);

    if let Some(dropdown) = &search.dropdown {
        render_dropdown(dropdown_row, dropdown, theme, cols);
    }
}

/// Renders the details screen.
///
/// Layout structure:
/// ```text
/// [blank line]
/// [Header]
/// [Border]
/// [★ Title]
/// [Tabs]
/// [blank line]
/// [Label  Value rows]
/// [Border]
/// [Footer]
/// ```
pub fn render_details_screen(vm: &UIViewModel, view: &DetailsView, theme: &Theme, cols: usize, rows: usize) {
    let current_row = render_chrome(vm, theme, cols, rows);
    let last_row = rows.saturating_sub(3);
    render_details(current_row, view, theme, cols, last_row);
}
