//! View model types representing renderable UI state.
//!
//! This module defines immutable view models computed from application state,
//! following the MVVM pattern. View models are optimized for rendering and
//! contain pre-computed display information like highlight ranges, selection
//! state and formatted dates.
//!
//! # Architecture
//!
//! View models are created via `AppState::compute_viewmodel()` and consumed by
//! the renderer. They contain no business logic, only display-ready data.
//!
//! # Example
//!
//! ```
//! use eventscout::ui::viewmodel::{FooterInfo, HeaderInfo, ListView, ScreenView, UIViewModel};
//!
//! let vm = UIViewModel {
//!     header: HeaderInfo { title: " EventScout · Favorites (0) ".to_string() },
//!     footer: FooterInfo { keybindings: "q: quit".to_string(), status: None },
//!     screen: ScreenView::Home(ListView::default()),
//! };
//! assert!(matches!(vm.screen, ScreenView::Home(_)));
//! ```

use crate::app::modes::SearchField;

/// Complete UI view model for rendering.
#[derive(Debug, Clone)]
pub struct UIViewModel {
    /// Header information (title, counts).
    pub header: HeaderInfo,

    /// Footer information (keybindings, status line).
    pub footer: FooterInfo,

    /// Body of the active screen.
    pub screen: ScreenView,
}

/// Body of one screen.
#[derive(Debug, Clone)]
pub enum ScreenView {
    Home(ListView),
    Search(SearchView),
    Details(DetailsView),
}

/// A windowed list of events.
#[derive(Debug, Clone, Default)]
pub struct ListView {
    /// Rows inside the visible window.
    pub items: Vec<DisplayItem>,

    /// Whether a fetch feeding this list is in flight.
    pub loading: bool,

    /// Message shown instead of rows.
    pub empty_state: Option<EmptyState>,

    /// Width of the name column; names are already truncated to fit.
    pub name_width: usize,
}

/// Display information for a single event row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayItem {
    /// Short date, e.g. `Aug 8` (year added when not the current one).
    pub date: String,

    /// 12-hour time, e.g. `7:00 PM`.
    pub time: String,

    /// Event name, truncated to the name column.
    pub name: String,

    /// Venue on search rows, "added ..." age on home rows.
    pub detail: String,

    /// Segment label.
    pub category: String,

    pub is_favorite: bool,

    /// Whether this item is currently selected.
    pub is_selected: bool,

    /// Character ranges to highlight (keyword matches in `name`).
    ///
    /// Each tuple is `(start_index, end_index)` in UTF-8 character indices.
    pub highlight_ranges: Vec<(usize, usize)>,
}

/// Header display information.
#[derive(Debug, Clone)]
pub struct HeaderInfo {
    /// Title text to display in the header.
    pub title: String,
}

/// Footer display information.
#[derive(Debug, Clone)]
pub struct FooterInfo {
    /// Keybinding help text.
    pub keybindings: String,

    /// Transient status, e.g. a failed favorite update.
    pub status: Option<String>,
}

/// Empty state message display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    /// Primary message (e.g., "No events found").
    pub message: String,

    /// Secondary explanatory text.
    pub subtitle: String,
}

/// The search screen: form, category tabs, dropdown and results.
#[derive(Debug, Clone)]
pub struct SearchView {
    pub form: SearchFormInfo,
    pub tabs: TabsInfo,
    pub dropdown: Option<DropdownInfo>,
    pub list: ListView,
}

/// Current values of the search form.
#[derive(Debug, Clone)]
pub struct SearchFormInfo {
    pub keyword: String,
    pub location: String,
    pub distance: String,
    pub focus: SearchField,
    /// Whether the location "Searching..." indicator is up.
    pub location_searching: bool,
}

/// Suggestion dropdown under a text field.
#[derive(Debug, Clone)]
pub struct DropdownInfo {
    /// Field the dropdown belongs to.
    pub field: SearchField,
    pub items: Vec<String>,
    pub highlighted: Option<usize>,
    /// Whether a suggestion request is still in flight.
    pub loading: bool,
}

/// A row of tabs with one active.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabsInfo {
    pub labels: Vec<String>,
    pub active: usize,
}

/// The details screen.
#[derive(Debug, Clone)]
pub struct DetailsView {
    pub title: String,
    pub is_favorite: bool,
    pub tabs: TabsInfo,
    pub body: DetailsBody,
}

/// Content of the active details tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailsBody {
    Loading,
    Message(String),
    Rows(Vec<DetailRow>),
}

/// A labelled value; an empty label continues the previous row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailRow {
    pub label: String,
    pub value: String,
}

impl DetailRow {
    #[must_use]
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self { label: label.into(), value: value.into() }
    }
}
