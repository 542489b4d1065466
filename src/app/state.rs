//! Application state management and view model computation.
//!
//! This module defines [`AppState`], the central state container for the plugin,
//! along with selection management and UI view model generation. It serves as
//! the single source of truth for all transient UI state.
//!
//! # State Components
//!
//! - **Screen and focus**: which screen is up and which search field has focus
//! - **Search form**: the [`SearchQuery`] plus the two suggestion widgets
//! - **Result store**: search results, favorites and their projection
//! - **Favorites reconciler**: optimistic toggles awaiting the backend
//! - **Sequencer**: per-channel request numbers for stale-response rejection
//! - **Details**: the event opened on the details screen and its side loads
//!
//! # View Model Computation
//!
//! [`AppState::compute_viewmodel`] transforms state into a renderable UI
//! representation, handling windowing, keyword match highlighting and the
//! per-tab details layout.

use super::debounce::{Debouncer, MinDisplay, KEYWORD_DEBOUNCE_MS, LOCATION_DEBOUNCE_MS, MIN_SEARCHING_DISPLAY_MS};
use super::modes::{DetailsTab, Screen, SearchField, ViewState, WidgetInput, WidgetPhase};
use super::reconcile::FavoritesReconciler;
use super::sequence::Sequencer;
use super::store::ResultStore;
use crate::api::Endpoints;
use crate::domain::format::{format_date_short, format_time, format_with_commas, time_ago};
use crate::domain::{Album, ArtistProfile, Category, Event, EventDetails, FavoriteEvent, Place, SearchQuery, VenueDetails};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    DetailRow, DetailsBody, DetailsView, DisplayItem, DropdownInfo, EmptyState, FooterInfo, HeaderInfo, ListView,
    ScreenView, SearchFormInfo, SearchView, TabsInfo, UIViewModel,
};
use chrono::{DateTime, Datelike, TimeZone, Utc};
use fuzzy_matcher::skim::SkimMatcherV2;
use std::collections::HashSet;

/// Characters of an event name shown before truncation.
const NAME_WIDTH: usize = 35;

/// Narrowest name column before the table stops shrinking it.
const MIN_NAME_WIDTH: usize = 12;

/// Star, date, time, venue and category columns.
const FIXED_COLUMNS_WIDTH: usize = 60;

/// A text field with a debounced suggestion dropdown.
#[derive(Debug, Clone)]
pub struct SuggestWidget {
    pub phase: WidgetPhase,
    pub suggestions: Vec<String>,
    pub highlighted: Option<usize>,
    pub debouncer: Debouncer,
}

impl SuggestWidget {
    #[must_use]
    pub const fn new(delay_ms: u64) -> Self {
        Self {
            phase: WidgetPhase::Idle,
            suggestions: Vec::new(),
            highlighted: None,
            debouncer: Debouncer::new(delay_ms),
        }
    }

    /// Feeds `input` to the widget's state machine.
    ///
    /// Rejected inputs leave the widget untouched and return `false`. Leaving
    /// the dropdown phases discards the suggestions.
    pub fn apply(&mut self, input: WidgetInput) -> bool {
        let Some(next) = self.phase.transition(input) else {
            tracing::debug!(phase = ?self.phase, input = ?input, "widget input rejected");
            return false;
        };
        self.phase = next;
        if !next.shows_dropdown() {
            self.suggestions.clear();
            self.highlighted = None;
        }
        true
    }

    pub fn set_suggestions(&mut self, suggestions: Vec<String>) {
        self.suggestions = suggestions;
        self.highlighted = None;
    }

    /// Moves the dropdown highlight, wrapping; no-op when closed.
    pub fn move_highlight(&mut self, down: bool) {
        if self.phase != WidgetPhase::Selecting || self.suggestions.is_empty() {
            return;
        }
        let len = self.suggestions.len();
        self.highlighted = Some(match (self.highlighted, down) {
            (None, true) => 0,
            (None, false) => len - 1,
            (Some(i), true) => (i + 1) % len,
            (Some(i), false) => (i + len - 1) % len,
        });
    }

    #[must_use]
    pub fn highlighted_item(&self) -> Option<&str> {
        self.highlighted
            .and_then(|i| self.suggestions.get(i))
            .map(String::as_str)
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.phase == WidgetPhase::Selecting
    }

    /// Cancels pending work and closes the dropdown.
    pub fn reset(&mut self) {
        self.debouncer.cancel();
        self.phase = WidgetPhase::Idle;
        self.suggestions.clear();
        self.highlighted = None;
    }
}

/// A side-loaded piece of the details screen.
#[derive(Debug, Clone, PartialEq)]
pub enum Loadable<T> {
    /// Not requested (not applicable to this event).
    Idle,
    Loading,
    Ready(T),
    /// The backend had nothing for this event.
    Missing,
    Failed(String),
}

impl<T> Loadable<T> {
    #[must_use]
    pub const fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            _ => None,
        }
    }
}

/// The event opened on the details screen.
#[derive(Debug, Clone)]
pub struct DetailsState {
    pub event_id: String,
    /// The list row the screen was opened from, if any.
    pub seed: Option<Event>,
    pub tab: DetailsTab,
    pub details: Loadable<EventDetails>,
    pub artist: Loadable<ArtistProfile>,
    pub albums: Vec<Album>,
    pub venue: Loadable<VenueDetails>,
}

impl DetailsState {
    #[must_use]
    pub const fn new(event_id: String, seed: Option<Event>) -> Self {
        Self {
            event_id,
            seed,
            tab: DetailsTab::Details,
            details: Loadable::Loading,
            artist: Loadable::Idle,
            albums: Vec::new(),
            venue: Loadable::Idle,
        }
    }

    #[must_use]
    pub fn tabs(&self) -> Vec<DetailsTab> {
        DetailsTab::available(self.details.ready().is_some_and(EventDetails::has_artist_tab))
    }

    pub fn cycle_tab(&mut self, forward: bool) {
        let tabs = self.tabs();
        let idx = tabs.iter().position(|t| *t == self.tab).unwrap_or(0);
        let next = if forward {
            (idx + 1) % tabs.len()
        } else {
            (idx + tabs.len() - 1) % tabs.len()
        };
        self.tab = tabs[next];
    }

    #[must_use]
    pub fn title(&self) -> String {
        self.details
            .ready()
            .map(|d| d.name.clone())
            .filter(|n| !n.is_empty())
            .or_else(|| self.seed.as_ref().map(|e| e.name.clone()))
            .unwrap_or_else(|| self.event_id.clone())
    }

    /// The event to favorite from this screen.
    #[must_use]
    pub fn event(&self) -> Option<Event> {
        self.seed
            .clone()
            .or_else(|| self.details.ready().map(Event::from_details))
    }
}

/// Central application state container.
///
/// Mutated by the event handler in response to user input, timers and HTTP
/// completions. View models are computed on-demand from state snapshots.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Color scheme for UI rendering.
    pub theme: Theme,

    /// Backend and geocoder URL table.
    pub endpoints: Endpoints,

    /// Distance used when the distance field is left empty.
    pub default_distance: u32,

    pub screen: Screen,

    /// Screen to return to when leaving details.
    pub return_screen: Screen,

    /// Focused element on the search screen.
    pub focus: SearchField,

    /// Search form values.
    pub query: SearchQuery,

    /// Raw distance field text; parsed on submit.
    pub distance_text: String,

    pub keyword: SuggestWidget,
    pub location: SuggestWidget,

    /// Geocoder matches behind the location dropdown, after its leading
    /// "Current Location" entry.
    pub location_places: Vec<Place>,

    /// The location "Searching..." indicator.
    pub location_indicator: MinDisplay,

    pub store: ResultStore,
    pub favorites: FavoritesReconciler,
    pub sequencer: Sequencer,

    /// Lifecycle of the search screen's list.
    pub search_view: ViewState,

    /// Lifecycle of the home screen's list.
    pub home_view: ViewState,

    /// A search (including its location lookup) is in flight.
    pub search_in_flight: bool,

    /// Category sent with the latest search request, `None` before the first.
    /// Results fetched for a single category cannot be widened locally.
    pub searched_category: Option<Category>,

    /// A favorites fetch is in flight.
    pub favorites_in_flight: bool,

    /// Selection within the search projection.
    pub selected_index: usize,

    /// Selection within the home list.
    pub home_index: usize,

    pub details: Option<DetailsState>,

    /// Favorites with an enrichment request in flight.
    pub enriching: HashSet<String>,

    /// Transient footer message.
    pub status: Option<String>,

    /// Wall clock as of the last event.
    pub now: DateTime<Utc>,
}

impl AppState {
    /// Creates a new application state.
    ///
    /// # Parameters
    ///
    /// * `endpoints` - Backend URL table
    /// * `theme` - Color scheme for UI rendering
    /// * `default_distance` - Search radius in miles when none is typed
    #[must_use]
    pub fn new(endpoints: Endpoints, theme: Theme, default_distance: u32) -> Self {
        Self {
            theme,
            endpoints,
            default_distance,
            screen: Screen::Home,
            return_screen: Screen::Home,
            focus: SearchField::Keyword,
            query: SearchQuery::new(default_distance),
            distance_text: default_distance.to_string(),
            keyword: SuggestWidget::new(KEYWORD_DEBOUNCE_MS),
            location: SuggestWidget::new(LOCATION_DEBOUNCE_MS),
            location_places: Vec::new(),
            location_indicator: MinDisplay::new(MIN_SEARCHING_DISPLAY_MS),
            store: ResultStore::new(),
            favorites: FavoritesReconciler::new(),
            sequencer: Sequencer::new(),
            search_view: ViewState::Empty,
            home_view: ViewState::Empty,
            search_in_flight: false,
            searched_category: None,
            favorites_in_flight: false,
            selected_index: 0,
            home_index: 0,
            details: None,
            enriching: HashSet::new(),
            status: None,
            now: DateTime::<Utc>::default(),
        }
    }

    /// Whether printable keys should be treated as text input.
    #[must_use]
    pub fn is_typing(&self) -> bool {
        self.screen == Screen::Search && self.focus.is_text()
    }

    /// Advances the wall clock to `now_ms` (Unix milliseconds).
    pub fn set_now(&mut self, now_ms: u64) {
        if let Some(now) = i64::try_from(now_ms)
            .ok()
            .and_then(|ms| Utc.timestamp_millis_opt(ms).single())
        {
            self.now = now;
        }
    }

    fn list_len(&self) -> usize {
        match self.screen {
            Screen::Home => self.store.home_favorites().len(),
            Screen::Search => self.store.project().len(),
            Screen::Details => 0,
        }
    }

    fn index_mut(&mut self) -> &mut usize {
        match self.screen {
            Screen::Home => &mut self.home_index,
            Screen::Search | Screen::Details => &mut self.selected_index,
        }
    }

    /// Moves the list selection down by one, wrapping to the top.
    pub fn move_selection_down(&mut self) {
        let len = self.list_len();
        if len == 0 {
            return;
        }
        let index = self.index_mut();
        *index = (*index + 1) % len;
    }

    /// Moves the list selection up by one, wrapping to the bottom.
    pub fn move_selection_up(&mut self) {
        let len = self.list_len();
        if len == 0 {
            return;
        }
        let index = self.index_mut();
        *index = if *index == 0 { len - 1 } else { *index - 1 };
    }

    /// Keeps both selections inside their lists.
    pub fn clamp_selection(&mut self) {
        let search_len = self.store.project().len();
        self.selected_index = self.selected_index.min(search_len.saturating_sub(1));
        let home_len = self.store.home_favorites().len();
        self.home_index = self.home_index.min(home_len.saturating_sub(1));
    }

    #[must_use]
    pub fn selected_event(&self) -> Option<&Event> {
        self.store.project().get(self.selected_index)
    }

    #[must_use]
    pub fn selected_favorite(&self) -> Option<&FavoriteEvent> {
        self.store.home_favorites().get(self.home_index)
    }

    /// Recomputes the search list state after a mutation.
    pub fn settle_search_view(&mut self) {
        self.clamp_selection();
        self.search_view = ViewState::settle(self.search_in_flight, !self.store.project().is_empty());
    }

    /// Recomputes the home list state after a mutation.
    ///
    /// A refresh over an already populated list keeps showing it.
    pub fn settle_home_view(&mut self) {
        self.clamp_selection();
        let has_rows = !self.store.home_favorites().is_empty();
        self.home_view = ViewState::settle(self.favorites_in_flight && !has_rows, has_rows);
    }

    /// Computes a renderable UI view model from current state and terminal dimensions.
    ///
    /// # Parameters
    ///
    /// * `rows` - Terminal height in character cells
    /// * `cols` - Terminal width in character cells
    ///
    /// # Windowing Algorithm
    ///
    /// 1. Calculate available rows after subtracting UI chrome
    /// 2. Center window around selected index
    /// 3. Adjust window if near start/end to maximize visible items
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let name_width = NAME_WIDTH.min(cols.saturating_sub(FIXED_COLUMNS_WIDTH)).max(MIN_NAME_WIDTH);
        let screen = match self.screen {
            Screen::Home => ScreenView::Home(self.compute_home_list(rows.saturating_sub(6), name_width)),
            Screen::Search => ScreenView::Search(self.compute_search_view(rows.saturating_sub(10), name_width)),
            Screen::Details => ScreenView::Details(self.compute_details_view()),
        };

        UIViewModel {
            header: self.compute_header(),
            footer: self.compute_footer(),
            screen,
        }
    }

    fn compute_home_list(&self, available_rows: usize, name_width: usize) -> ListView {
        let favorites = self.store.home_favorites();
        if favorites.is_empty() {
            return ListView {
                items: vec![],
                loading: self.home_view == ViewState::Loading,
                empty_state: Some(match self.home_view {
                    ViewState::Loading => EmptyState {
                        message: "Loading favorites...".to_string(),
                        subtitle: String::new(),
                    },
                    ViewState::Results | ViewState::Empty => EmptyState {
                        message: "No favorites yet".to_string(),
                        subtitle: "Press / to search for events".to_string(),
                    },
                }),
                name_width,
            };
        }

        let (start, end) = visible_window(self.home_index, favorites.len(), available_rows);
        let year = self.now.year();
        let items = favorites[start..end]
            .iter()
            .enumerate()
            .map(|(offset, favorite)| DisplayItem {
                date: format_date_short(&favorite.date, year),
                time: format_time(&favorite.time),
                name: truncate(&favorite.name, name_width),
                detail: favorite
                    .timestamp_added
                    .map(|added| format!("added {}", time_ago(added, self.now)))
                    .unwrap_or_default(),
                category: self
                    .store
                    .find(&favorite.id)
                    .map(|e| e.segment.clone())
                    .unwrap_or_default(),
                is_favorite: true,
                is_selected: start + offset == self.home_index,
                highlight_ranges: vec![],
            })
            .collect();

        ListView { items, loading: self.favorites_in_flight, empty_state: None, name_width }
    }

    fn compute_search_view(&self, available_rows: usize, name_width: usize) -> SearchView {
        let form = SearchFormInfo {
            keyword: self.query.keyword.clone(),
            location: self.query.location_text.clone(),
            distance: self.distance_text.clone(),
            focus: self.focus,
            location_searching: self.location_indicator.is_visible(),
        };

        let tabs = TabsInfo {
            labels: Category::ALL.iter().map(|c| c.label().to_string()).collect(),
            active: Category::ALL
                .iter()
                .position(|c| *c == self.store.category())
                .unwrap_or(0),
        };

        let dropdown = match self.focus {
            SearchField::Keyword => Some(&self.keyword),
            SearchField::Location => Some(&self.location),
            SearchField::Distance | SearchField::Results => None,
        }
        .filter(|widget| widget.phase.shows_dropdown())
        .map(|widget| DropdownInfo {
            field: self.focus,
            items: widget.suggestions.clone(),
            highlighted: widget.highlighted,
            loading: widget.phase == WidgetPhase::Suggesting,
        });

        SearchView { form, tabs, dropdown, list: self.compute_search_list(available_rows, name_width) }
    }

    fn compute_search_list(&self, available_rows: usize, name_width: usize) -> ListView {
        let keyword_active = !self.query.keyword.trim().is_empty();
        let events = self.store.project();

        if self.search_view == ViewState::Loading {
            return ListView {
                items: vec![],
                loading: true,
                empty_state: Some(EmptyState {
                    message: "Searching events...".to_string(),
                    subtitle: String::new(),
                }),
                name_width,
            };
        }
        if events.is_empty() {
            let empty = if keyword_active {
                EmptyState {
                    message: "No events found".to_string(),
                    subtitle: "Try another keyword, location or category".to_string(),
                }
            } else {
                EmptyState {
                    message: "No favorites yet".to_string(),
                    subtitle: "Type a keyword and press Enter to search".to_string(),
                }
            };
            return ListView { items: vec![], loading: false, empty_state: Some(empty), name_width };
        }

        let (start, end) = visible_window(self.selected_index, events.len(), available_rows);
        let matcher = keyword_active.then(SkimMatcherV2::default);
        let list_focused = self.focus == SearchField::Results;
        let year = self.now.year();

        let items = events[start..end]
            .iter()
            .enumerate()
            .map(|(offset, event)| {
                let name = truncate(&event.name, name_width);
                let highlight_ranges = matcher
                    .as_ref()
                    .map(|m| highlight_ranges(&name, self.query.keyword.trim(), m))
                    .unwrap_or_default();
                DisplayItem {
                    date: format_date_short(&event.date, year),
                    time: event.time.clone(),
                    name,
                    detail: event.venue.clone(),
                    category: event.segment.clone(),
                    is_favorite: event.is_favorite,
                    is_selected: list_focused && start + offset == self.selected_index,
                    highlight_ranges,
                }
            })
            .collect();

        ListView { items, loading: false, empty_state: None, name_width }
    }

    fn compute_details_view(&self) -> DetailsView {
        let Some(details) = &self.details else {
            return DetailsView {
                title: String::new(),
                is_favorite: false,
                tabs: TabsInfo { labels: vec![], active: 0 },
                body: DetailsBody::Message("No event selected".to_string()),
            };
        };

        let tabs = details.tabs();
        let body = match details.tab {
            DetailsTab::Details => details_rows(&details.details),
            DetailsTab::Artist => artist_rows(&details.artist, &details.albums),
            DetailsTab::Venue => venue_rows(&details.venue),
        };

        DetailsView {
            title: details.title(),
            is_favorite: self.store.is_liked(&details.event_id),
            tabs: TabsInfo {
                labels: tabs.iter().map(|t| t.label().to_string()).collect(),
                active: tabs.iter().position(|t| *t == details.tab).unwrap_or(0),
            },
            body,
        }
    }

    fn compute_header(&self) -> HeaderInfo {
        let title = match self.screen {
            Screen::Home => format!(" EventScout · Favorites ({}) ", self.store.home_favorites().len()),
            Screen::Search => {
                if self.query.keyword.trim().is_empty() {
                    format!(" EventScout · Search · Favorites ({}) ", self.store.liked_events().len())
                } else {
                    format!(" EventScout · Search ({} results) ", self.store.search_results().len())
                }
            }
            Screen::Details => format!(
                " EventScout · {} ",
                self.details.as_ref().map(DetailsState::title).unwrap_or_default()
            ),
        };
        HeaderInfo { title }
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match (self.screen, self.focus) {
            (Screen::Home, _) => "j/k: navigate  Enter: details  f: unfavorite  /: search  r: refresh  q: quit",
            (Screen::Search, SearchField::Keyword | SearchField::Location)
                if self.keyword.is_open() || self.location.is_open() =>
            {
                "↓/↑: choose  Enter: pick  Esc: dismiss  Type to refine"
            }
            (Screen::Search, SearchField::Results) => {
                "j/k: navigate  ←/→: category  Enter: details  f: favorite  Tab: form  Esc: home"
            }
            (Screen::Search, _) => "Tab: next field  Enter: search  ↓/↑: suggestions  Esc: home",
            (Screen::Details, _) => "←/→: tabs  f: favorite  Esc: back  q: quit",
        };
        FooterInfo { keybindings: keybindings.to_string(), status: self.status.clone() }
    }
}

/// Centers a window of `available` rows on `selected`, clamped to the list.
fn visible_window(selected: usize, len: usize, available: usize) -> (usize, usize) {
    let available = available.max(1);
    let mut start = selected.saturating_sub(available / 2);
    let end = (start + available).min(len);
    if end - start < available && len >= available {
        start = end.saturating_sub(available);
    }
    (start, end)
}

/// Shortens `text` to `max` characters, marking the cut with `...`.
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let kept: String = text.chars().take(max.saturating_sub(3)).collect();
        format!("{kept}...")
    } else {
        text.to_string()
    }
}

/// Character ranges of `query`'s fuzzy match in `text`, with adjacent indices
/// coalesced into `(start, end)` runs.
fn highlight_ranges(text: &str, query: &str, matcher: &SkimMatcherV2) -> Vec<(usize, usize)> {
    use fuzzy_matcher::FuzzyMatcher;

    let Some((_score, indices)) = matcher.fuzzy_indices(text, query) else {
        return vec![];
    };

    let mut ranges: Vec<(usize, usize)> = Vec::new();
    for idx in indices {
        match ranges.last_mut() {
            Some((_, end)) if *end == idx => *end = idx + 1,
            _ => ranges.push((idx, idx + 1)),
        }
    }
    ranges
}

fn details_rows(details: &Loadable<EventDetails>) -> DetailsBody {
    let details = match details {
        Loadable::Ready(details) => details,
        Loadable::Idle | Loadable::Loading => return DetailsBody::Loading,
        Loadable::Missing => return DetailsBody::Message("No details available".to_string()),
        Loadable::Failed(error) => return DetailsBody::Message(format!("Failed to load event details: {error}")),
    };

    let mut rows = vec![DetailRow::new("Date", details.schedule_label())];
    let optional = [
        ("Artist/Team", details.artists.join(" | ")),
        ("Venue", details.venue.clone()),
        ("Genres", details.genre_chain.join(" | ")),
        ("Price Ranges", details.price_ranges.join(", ")),
    ];
    rows.extend(
        optional
            .into_iter()
            .filter(|(_, value)| !value.is_empty())
            .map(|(label, value)| DetailRow::new(label, value)),
    );
    rows.push(DetailRow::new("Ticket Status", details.ticket_status.label()));
    if !details.ticketmaster_url.is_empty() {
        rows.push(DetailRow::new("Buy Tickets At", details.ticketmaster_url.clone()));
    }
    if !details.seatmap_url.is_empty() {
        rows.push(DetailRow::new("Seat Map", details.seatmap_url.clone()));
    }
    DetailsBody::Rows(rows)
}

fn artist_rows(artist: &Loadable<ArtistProfile>, albums: &[Album]) -> DetailsBody {
    let artist = match artist {
        Loadable::Ready(artist) => artist,
        Loadable::Loading => return DetailsBody::Loading,
        Loadable::Idle | Loadable::Missing => return DetailsBody::Message("No artist data".to_string()),
        Loadable::Failed(error) => return DetailsBody::Message(format!("Failed to load artist: {error}")),
    };

    let mut rows = vec![
        DetailRow::new("Artist", artist.name.clone()),
        DetailRow::new("Followers", format_with_commas(artist.followers)),
        DetailRow::new("Popularity", format!("{}%", artist.popularity)),
    ];
    if !artist.genres.is_empty() {
        rows.push(DetailRow::new("Genres", artist.genres.join(", ")));
    }
    if !artist.spotify_url.is_empty() {
        rows.push(DetailRow::new("Spotify", artist.spotify_url.clone()));
    }
    for (i, album) in albums.iter().enumerate() {
        let label = if i == 0 { "Albums" } else { "" };
        let mut line = album.name.clone();
        if !album.release_date.is_empty() {
            line.push_str(&format!(" ({})", album.release_date));
        }
        if album.total_tracks > 0 {
            line.push_str(&format!(" · {} tracks", album.total_tracks));
        }
        rows.push(DetailRow::new(label, line));
    }
    DetailsBody::Rows(rows)
}

fn venue_rows(venue: &Loadable<VenueDetails>) -> DetailsBody {
    let venue = match venue {
        Loadable::Ready(venue) => venue,
        Loadable::Loading => return DetailsBody::Loading,
        Loadable::Idle | Loadable::Missing => return DetailsBody::Message("No venue data".to_string()),
        Loadable::Failed(error) => return DetailsBody::Message(format!("Failed to load venue: {error}")),
    };

    let rows = [
        ("Venue", venue.name.clone()),
        ("Address", venue.formatted_address()),
        ("Website", venue.url.clone()),
        ("Logo", venue.logo_url.clone()),
    ]
    .into_iter()
    .filter(|(_, value)| !value.is_empty())
    .map(|(label, value)| DetailRow::new(label, value))
    .collect();
    DetailsBody::Rows(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::format::format_date;

    fn state() -> AppState {
        let endpoints = Endpoints::new("http://localhost:8080", None).unwrap();
        AppState::new(endpoints, Theme::default(), 10)
    }

    fn event(id: &str, name: &str) -> Event {
        Event {
            id: id.into(),
            name: name.into(),
            venue: "Hall".into(),
            date: "2026-08-08".into(),
            date_formatted: format_date("2026-08-08"),
            time: "7:00 PM".into(),
            time24: "19:00:00".into(),
            image_url: String::new(),
            segment: "Music".into(),
            is_favorite: false,
        }
    }

    #[test]
    fn window_centers_and_clamps() {
        assert_eq!(visible_window(0, 3, 10), (0, 3));
        assert_eq!(visible_window(10, 20, 4), (8, 12));
        assert_eq!(visible_window(19, 20, 4), (16, 20));
    }

    #[test]
    fn ranges_coalesce_adjacent_matches() {
        let matcher = SkimMatcherV2::default();
        assert_eq!(highlight_ranges("Taylor Swift", "tay", &matcher), vec![(0, 3)]);
        assert!(highlight_ranges("Opera", "zz", &matcher).is_empty());
    }

    #[test]
    fn truncation_is_char_safe() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("Beyoncé Renaissance World", 10), "Beyoncé...");
    }

    #[test]
    fn widget_highlight_wraps_only_when_open() {
        let mut widget = SuggestWidget::new(250);
        widget.move_highlight(true);
        assert_eq!(widget.highlighted, None);

        widget.apply(WidgetInput::Edit { empty: false });
        widget.apply(WidgetInput::DebounceFired);
        widget.apply(WidgetInput::Arrived { count: 2 });
        widget.set_suggestions(vec!["a".into(), "b".into()]);
        widget.move_highlight(false);
        assert_eq!(widget.highlighted_item(), Some("b"));
        widget.move_highlight(true);
        assert_eq!(widget.highlighted_item(), Some("a"));

        assert!(widget.apply(WidgetInput::Pick));
        assert!(widget.suggestions.is_empty());
    }

    #[test]
    fn search_list_highlights_keyword() {
        let mut state = state();
        state.screen = Screen::Search;
        state.focus = SearchField::Results;
        state.query.keyword = "swift".into();
        state.store.set_keyword("swift");
        state.store.apply_search_results(vec![event("A", "Taylor Swift"), event("B", "Other")]);
        state.settle_search_view();

        let vm = state.compute_viewmodel(30, 100);
        let ScreenView::Search(search) = vm.screen else {
            panic!("expected search screen");
        };
        assert_eq!(search.list.items.len(), 2);
        assert!(search.list.items[0].is_selected);
        assert_eq!(search.list.items[0].highlight_ranges, vec![(7, 12)]);
        assert!(vm.header.title.contains("2 results"));
    }

    #[test]
    fn empty_states_follow_keyword() {
        let mut state = state();
        state.screen = Screen::Search;
        state.settle_search_view();
        let ScreenView::Search(search) = state.compute_viewmodel(30, 100).screen else {
            panic!("expected search screen");
        };
        assert_eq!(search.list.empty_state.unwrap().message, "No favorites yet");

        state.query.keyword = "nothing".into();
        state.store.set_keyword("nothing");
        let ScreenView::Search(search) = state.compute_viewmodel(30, 100).screen else {
            panic!("expected search screen");
        };
        assert_eq!(search.list.empty_state.unwrap().message, "No events found");
    }

    #[test]
    fn artist_tab_says_when_missing() {
        assert_eq!(
            artist_rows(&Loadable::Missing, &[]),
            DetailsBody::Message("No artist data".to_string())
        );
    }

    #[test]
    fn artist_rows_format_counts() {
        let profile = ArtistProfile {
            name: "Band".into(),
            followers: 1_234_567,
            popularity: 87,
            ..ArtistProfile::default()
        };
        let DetailsBody::Rows(rows) = artist_rows(&Loadable::Ready(profile), &[]) else {
            panic!("expected rows");
        };
        assert_eq!(rows[1], DetailRow::new("Followers", "1,234,567"));
        assert_eq!(rows[2], DetailRow::new("Popularity", "87%"));
    }
}
