//! The result store: the lists the screens draw from, and their projection.
//!
//! Three event lists are kept side by side:
//!
//! - `all_search_results`: the last search response, sorted by schedule
//! - `search_results`: `all_search_results` filtered by the selected category
//! - `liked_events`: the user's favorites, sorted by schedule
//!
//! The search screen shows [`ResultStore::project`]: the filtered search
//! results while a keyword is entered, the favorites otherwise. The home
//! screen shows `home_favorites`, ordered by when each favorite was added.
//!
//! Favorite status is a flag on each row and never a filter criterion: an
//! unfavorited search hit stays in the results, only its star changes.

use crate::domain::event::{sort_by_added_desc, sort_by_schedule, Category, Event, FavoriteEvent};
use crate::domain::details::EventDetails;
use crate::domain::format::{format_date, format_time};
use std::collections::HashSet;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultStore {
    search_results: Vec<Event>,
    all_search_results: Vec<Event>,
    liked_events: Vec<Event>,
    home_favorites: Vec<FavoriteEvent>,
    category: Category,
    keyword_active: bool,
}

impl ResultStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn search_results(&self) -> &[Event] {
        &self.search_results
    }

    #[must_use]
    pub fn all_search_results(&self) -> &[Event] {
        &self.all_search_results
    }

    #[must_use]
    pub fn liked_events(&self) -> &[Event] {
        &self.liked_events
    }

    #[must_use]
    pub fn home_favorites(&self) -> &[FavoriteEvent] {
        &self.home_favorites
    }

    #[must_use]
    pub const fn category(&self) -> Category {
        self.category
    }

    /// Records whether a keyword is entered, which selects the projection.
    pub fn set_keyword(&mut self, keyword: &str) {
        self.keyword_active = !keyword.trim().is_empty();
    }

    /// The rows the search screen displays.
    ///
    /// # Examples
    ///
    /// ```
    /// use eventscout::app::store::ResultStore;
    ///
    /// let mut store = ResultStore::new();
    /// store.set_keyword("");
    /// assert!(store.project().is_empty());
    /// ```
    #[must_use]
    pub fn project(&self) -> &[Event] {
        if self.keyword_active {
            &self.search_results
        } else {
            &self.liked_events
        }
    }

    /// Replaces both search lists with a fresh response.
    ///
    /// Favorite flags are taken from the current favorites, then the selected
    /// category is re-applied.
    pub fn apply_search_results(&mut self, mut events: Vec<Event>) {
        let liked = self.liked_ids();
        for event in &mut events {
            event.is_favorite = liked.contains(event.id.as_str());
        }
        sort_by_schedule(&mut events);
        self.all_search_results = events;
        self.filter_by_category(self.category);
    }

    /// Recomputes `search_results` from `all_search_results`. Idempotent.
    pub fn filter_by_category(&mut self, category: Category) {
        self.category = category;
        self.search_results = self
            .all_search_results
            .iter()
            .filter(|e| category.matches(&e.segment))
            .cloned()
            .collect();
    }

    /// Drops the search lists, e.g. after a failed search.
    pub fn clear_search_results(&mut self) {
        self.all_search_results.clear();
        self.search_results.clear();
    }

    #[must_use]
    pub fn is_liked(&self, id: &str) -> bool {
        self.liked_events.iter().any(|e| e.id == id)
    }

    #[must_use]
    pub fn liked_ids(&self) -> HashSet<&str> {
        self.liked_events.iter().map(|e| e.id.as_str()).collect()
    }

    /// Looks an event up in the search results, then the favorites.
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&Event> {
        self.all_search_results
            .iter()
            .chain(&self.liked_events)
            .find(|e| e.id == id)
    }

    /// Sets the favorite state of `event` everywhere it appears.
    ///
    /// Favoriting inserts a copy into `liked_events` (keeping schedule order);
    /// unfavoriting removes it there and from the home list.
    pub fn set_favorite(&mut self, event: &Event, favorite: bool) {
        for row in self
            .all_search_results
            .iter_mut()
            .chain(self.search_results.iter_mut())
            .filter(|row| row.id == event.id)
        {
            row.is_favorite = favorite;
        }

        if favorite {
            if !self.is_liked(&event.id) {
                let mut liked = event.clone();
                liked.is_favorite = true;
                self.liked_events.push(liked);
                sort_by_schedule(&mut self.liked_events);
            }
        } else {
            self.liked_events.retain(|e| e.id != event.id);
            self.home_favorites.retain(|f| f.id != event.id);
        }
    }

    /// Installs a reconciled favorites state.
    ///
    /// Search-result flags are re-synced against the new favorites, except for
    /// ids in `keep_flags` whose local state is authoritative.
    pub fn replace_favorites(
        &mut self,
        mut liked: Vec<Event>,
        mut home: Vec<FavoriteEvent>,
        keep_flags: &HashSet<String>,
    ) {
        sort_by_schedule(&mut liked);
        sort_by_added_desc(&mut home);
        let ids: HashSet<&str> = liked.iter().map(|e| e.id.as_str()).collect();
        for row in self
            .all_search_results
            .iter_mut()
            .chain(self.search_results.iter_mut())
            .filter(|row| !keep_flags.contains(&row.id))
        {
            row.is_favorite = ids.contains(row.id.as_str());
        }
        self.liked_events = liked;
        self.home_favorites = home;
    }

    /// Empties the home list after its source failed to load.
    pub fn clear_home(&mut self) {
        self.home_favorites.clear();
    }

    /// Fills blanks in the favorite `details.id` from an event-details record.
    ///
    /// Only empty fields are written. Returns whether anything changed.
    pub fn apply_enrichment(&mut self, details: &EventDetails) -> bool {
        let mut changed = false;

        for event in self.liked_events.iter_mut().filter(|e| e.id == details.id) {
            changed |= fill(&mut event.image_url, &details.image_url);
            if fill(&mut event.date, &details.date) {
                event.date_formatted = format_date(&event.date);
                changed = true;
            }
            if fill(&mut event.time24, &details.time) {
                event.time = format_time(&event.time24);
                changed = true;
            }
            if event.segment.is_empty() || event.segment == crate::domain::event::UNKNOWN_SEGMENT {
                changed |= fill_over(&mut event.segment, &details.segment);
            }
        }
        for favorite in self.home_favorites.iter_mut().filter(|f| f.id == details.id) {
            changed |= fill(&mut favorite.image_url, &details.image_url);
            changed |= fill(&mut favorite.date, &details.date);
            changed |= fill(&mut favorite.time, &details.time);
        }

        if changed {
            sort_by_schedule(&mut self.liked_events);
        }
        changed
    }
}

/// Writes `value` into an empty `slot`; reports whether it did.
pub(super) fn fill(slot: &mut String, value: &str) -> bool {
    if slot.is_empty() && !value.is_empty() {
        *slot = value.to_string();
        true
    } else {
        false
    }
}

fn fill_over(slot: &mut String, value: &str) -> bool {
    if value.is_empty() || slot == value {
        false
    } else {
        *slot = value.to_string();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::details::TicketStatus;

    fn event(id: &str, date: &str, segment: &str) -> Event {
        Event {
            id: id.into(),
            name: format!("Event {id}"),
            venue: "Hall".into(),
            date: date.into(),
            date_formatted: format_date(date),
            time: "7:00 PM".into(),
            time24: "19:00:00".into(),
            image_url: String::new(),
            segment: segment.into(),
            is_favorite: false,
        }
    }

    #[test]
    fn projection_follows_keyword() {
        let mut store = ResultStore::new();
        store.apply_search_results(vec![event("A", "2026-01-01", "Music")]);
        store.set_favorite(&event("F", "2026-02-01", "Film"), true);

        store.set_keyword("  ");
        assert_eq!(store.project()[0].id, "F");
        store.set_keyword("jazz");
        assert_eq!(store.project()[0].id, "A");
    }

    #[test]
    fn search_results_are_filtered_all() {
        let mut store = ResultStore::new();
        store.apply_search_results(vec![
            event("M", "2026-01-02", "Music"),
            event("S", "2026-01-01", "Sports"),
        ]);
        store.filter_by_category(Category::Sports);
        let once = store.search_results().to_vec();
        store.filter_by_category(Category::Sports);
        assert_eq!(store.search_results(), once.as_slice());
        assert!(store.search_results().iter().all(|e| store.all_search_results().contains(e)));
        assert_eq!(once.len(), 1);

        store.filter_by_category(Category::All);
        assert_eq!(store.search_results(), store.all_search_results());
    }

    #[test]
    fn category_survives_new_results() {
        let mut store = ResultStore::new();
        store.filter_by_category(Category::Music);
        store.apply_search_results(vec![
            event("M", "2026-01-02", "Music"),
            event("S", "2026-01-01", "Sports"),
        ]);
        assert_eq!(store.search_results().len(), 1);
        assert_eq!(store.category(), Category::Music);
    }

    #[test]
    fn unfavoriting_keeps_search_row() {
        let mut store = ResultStore::new();
        let a = event("A", "2026-01-01", "Music");
        store.set_favorite(&a, true);
        store.apply_search_results(vec![a.clone()]);
        assert!(store.search_results()[0].is_favorite);

        store.set_favorite(&a, false);
        assert_eq!(store.search_results().len(), 1);
        assert!(!store.search_results()[0].is_favorite);
        assert!(store.liked_events().is_empty());
    }

    #[test]
    fn liked_events_stay_sorted() {
        let mut store = ResultStore::new();
        store.set_favorite(&event("late", "2026-09-01", "Music"), true);
        store.set_favorite(&event("early", "2026-01-01", "Music"), true);
        store.set_favorite(&event("early", "2026-01-01", "Music"), true);
        let ids: Vec<&str> = store.liked_events().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["early", "late"]);
    }

    #[test]
    fn replace_respects_kept_flags() {
        let mut store = ResultStore::new();
        store.apply_search_results(vec![event("A", "2026-01-01", "Music"), event("B", "2026-01-02", "Music")]);
        store.set_favorite(&event("B", "2026-01-02", "Music"), true);

        let keep: HashSet<String> = ["B".to_string()].into();
        let mut a = event("A", "2026-01-01", "Music");
        a.is_favorite = true;
        store.replace_favorites(vec![a], vec![], &keep);

        let flags: Vec<bool> = store.all_search_results().iter().map(|e| e.is_favorite).collect();
        assert_eq!(flags, [true, true]);
    }

    #[test]
    fn enrichment_fills_blanks_only() {
        let mut store = ResultStore::new();
        let mut sparse = event("E", "", "");
        sparse.time24.clear();
        sparse.time.clear();
        sparse.image_url = "keep-me".into();
        store.set_favorite(&sparse, true);

        let details = EventDetails {
            id: "E".into(),
            name: "Show".into(),
            date: "2026-08-08".into(),
            time: "19:30:00".into(),
            artists: vec![],
            venue: String::new(),
            venue_id: String::new(),
            genre_chain: vec![],
            price_ranges: vec![],
            ticket_status: TicketStatus::OnSale,
            seatmap_url: String::new(),
            ticketmaster_url: String::new(),
            image_url: "wide".into(),
            segment: "Music".into(),
        };
        assert!(store.apply_enrichment(&details));
        let liked = &store.liked_events()[0];
        assert_eq!(liked.image_url, "keep-me");
        assert_eq!(liked.date_formatted, "Aug 8, 2026");
        assert_eq!(liked.time, "7:30 PM");
        assert_eq!(liked.segment, "Music");
        assert!(!store.apply_enrichment(&details));
    }
}
