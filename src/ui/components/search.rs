//! Search form component renderer.
//!
//! This module renders the bordered search form (keyword, location and
//! distance fields) and the suggestion dropdown that opens under a text field.

use crate::app::modes::SearchField;
use crate::ui::helpers::{cell_width, fit, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{DropdownInfo, SearchFormInfo};

/// Horizontal margin for the search box (spaces on left and right).
const SEARCH_BOX_MARGIN: usize = 2;

const KEYWORD_WIDTH: usize = 24;
const LOCATION_WIDTH: usize = 22;
const DISTANCE_WIDTH: usize = 4;
const DROPDOWN_WIDTH: usize = 36;

/// Label and column offset inside the box of each text field.
const KEYWORD_LABEL: &str = " Keyword: ";
const LOCATION_LABEL: &str = "  Location: ";
const DISTANCE_LABEL: &str = "  Distance: ";

const SEARCHING: &str = " Searching...";

/// Renders the search form box at the specified row.
///
/// Displays a 3-line bordered box with the three form fields. The focused
/// field is drawn in selection colors with a cursor mark; the location field
/// shows `Searching...` while its indicator is up.
///
/// # Returns
///
/// The next available row position (row + 3)
///
/// # Layout
///
/// ```text
/// [margin] ┌──────────────────────────────────────────────────┐
/// [margin] │ Keyword: [....]  Location: [....]  Distance: [..] mi │
/// [margin] └──────────────────────────────────────────────────┘
/// ```
pub fn render_search_form(row: usize, form: &SearchFormInfo, theme: &Theme, cols: usize) -> usize {
    let box_width = cols.saturating_sub(SEARCH_BOX_MARGIN * 2);
    let inner_width = box_width.saturating_sub(2);
    let border = Theme::fg(&theme.colors.input_border);

    position_cursor(row, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{border}┌{}┐", "─".repeat(inner_width));
    print!("{}", Theme::reset());

    position_cursor(row + 1, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{border}│");

    let mut used = 0;
    used += render_field(KEYWORD_LABEL, &form.keyword, KEYWORD_WIDTH, form.focus == SearchField::Keyword, theme);
    used += render_field(LOCATION_LABEL, &form.location, LOCATION_WIDTH, form.focus == SearchField::Location, theme);
    if form.location_searching {
        print!("{}{SEARCHING}", Theme::fg(&theme.colors.loading_fg));
        used += cell_width(SEARCHING);
    }
    used += render_field(DISTANCE_LABEL, &form.distance, DISTANCE_WIDTH, form.focus == SearchField::Distance, theme);
    print!("{} mi", Theme::fg(&theme.colors.text_dim));
    used += 3;

    print!("{}", " ".repeat(inner_width.saturating_sub(used)));
    print!("{border}│");
    print!("{}", Theme::reset());

    position_cursor(row + 2, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{border}└{}┘", "─".repeat(inner_width));
    print!("{}", Theme::reset());

    row + 3
}

/// Prints `label` and a fixed-width input; returns the cells used.
fn render_field(label: &str, value: &str, width: usize, focused: bool, theme: &Theme) -> usize {
    print!("{}{label}", Theme::fg(&theme.colors.text_dim));
    if focused {
        print!("{}", Theme::fg(&theme.colors.selection_fg));
        print!("{}", Theme::bg(&theme.colors.selection_bg));
        // Keep the tail visible while typing past the field width.
        let shown: String = {
            let chars: Vec<char> = value.chars().collect();
            let keep = width.saturating_sub(1);
            chars[chars.len().saturating_sub(keep)..].iter().collect()
        };
        print!("{}", fit(&format!("{shown}▏"), width));
    } else {
        print!("{}", Theme::fg(&theme.colors.text_normal));
        print!("{}", fit(value, width));
    }
    print!("{}", Theme::reset());
    cell_width(label) + width
}

/// Renders the suggestion dropdown beneath the form, over the list area.
///
/// The dropdown is aligned with the field it belongs to. While suggestions
/// are still loading it shows a single loading line.
pub fn render_dropdown(row: usize, dropdown: &DropdownInfo, theme: &Theme, cols: usize) {
    let offset = match dropdown.field {
        SearchField::Location => cell_width(KEYWORD_LABEL) + KEYWORD_WIDTH + cell_width(LOCATION_LABEL),
        _ => cell_width(KEYWORD_LABEL),
    };
    let col = SEARCH_BOX_MARGIN + 1 + offset;
    let width = DROPDOWN_WIDTH.min(cols.saturating_sub(col));
    let border = Theme::fg(&theme.colors.input_border);

    let lines: Vec<(String, bool)> = if dropdown.loading {
        vec![("Loading suggestions...".to_string(), false)]
    } else {
        dropdown
            .items
            .iter()
            .enumerate()
            .map(|(i, item)| (item.clone(), dropdown.highlighted == Some(i)))
            .collect()
    };

    let mut current_row = row;
    for (text, highlighted) in &lines {
        position_cursor(current_row, col);
        print!("{border}│");
        if *highlighted {
            print!("{}", Theme::fg(&theme.colors.selection_fg));
            print!("{}", Theme::bg(&theme.colors.selection_bg));
        } else if dropdown.loading {
            print!("{}", Theme::fg(&theme.colors.loading_fg));
        } else {
            print!("{}", Theme::fg(&theme.colors.text_normal));
        }
        print!(" {}", fit(text, width.saturating_sub(3)));
        print!("{}", Theme::reset());
        print!("{border}│");
        current_row += 1;
    }

    position_cursor(current_row, col);
    print!("{border}└{}┘", "─".repeat(width.saturating_sub(2)));
    print!("{}", Theme::reset());
}
