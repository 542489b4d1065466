//! Favorites reconciliation and optimistic toggles.
//!
//! Toggling a favorite updates the [`ResultStore`] immediately and records the
//! toggle as pending under a fresh sequence number. The backend response for
//! that number either confirms it or, on failure, reverts it. A newer toggle of
//! the same id supersedes the older one: only the latest response may touch
//! the UI. Pending ids are also shielded from [`FavoritesReconciler::reconcile`],
//! so a favorites list fetched mid-toggle cannot undo the optimistic state.

use super::store::{fill, ResultStore};
use crate::domain::event::{Event, FavoriteEvent, FavoriteRecord};
use std::collections::{HashMap, HashSet};

/// A toggle awaiting its backend response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingToggle {
    pub seq: u64,
    pub desired: bool,
    pub event: Event,
}

/// What the caller must send after [`FavoritesReconciler::begin_toggle`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleIntent {
    pub seq: u64,
    /// `true` to add (POST), `false` to remove (DELETE).
    pub add: bool,
    pub event: Event,
}

/// Result of a toggle response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// A newer toggle of the same id is pending; the response is ignored.
    Superseded,
    /// The backend accepted the latest toggle.
    Confirmed,
    /// The backend rejected the latest toggle; local state was rolled back.
    Reverted,
}

/// Summary of one reconciliation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileOutcome {
    pub added: usize,
    pub removed: usize,
    /// Favorites still missing image, date or time after merging.
    pub needs_enrichment: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct FavoritesReconciler {
    pending: HashMap<String, PendingToggle>,
    next_seq: u64,
}

impl FavoritesReconciler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_pending(&self, id: &str) -> bool {
        self.pending.contains_key(id)
    }

    #[must_use]
    pub fn pending_ids(&self) -> HashSet<String> {
        self.pending.keys().cloned().collect()
    }

    /// Flips the favorite state of `event` optimistically.
    ///
    /// # Returns
    ///
    /// The request the caller must issue, tagged with a new sequence number.
    pub fn begin_toggle(&mut self, store: &mut ResultStore, event: &Event) -> ToggleIntent {
        let add = !store.is_liked(&event.id);
        store.set_favorite(event, add);

        self.next_seq += 1;
        let seq = self.next_seq;
        self.pending.insert(
            event.id.clone(),
            PendingToggle { seq, desired: add, event: event.clone() },
        );
        tracing::debug!(event_id = %event.id, seq, add, "favorite toggled optimistically");

        ToggleIntent { seq, add, event: event.clone() }
    }

    /// Applies the backend's answer to toggle `seq` of `id`.
    pub fn complete(&mut self, store: &mut ResultStore, id: &str, seq: u64, success: bool) -> ToggleOutcome {
        let Some(pending) = self.pending.get(id) else {
            return ToggleOutcome::Superseded;
        };
        if pending.seq != seq {
            tracing::debug!(event_id = %id, seq, latest = pending.seq, "stale favorite response ignored");
            return ToggleOutcome::Superseded;
        }

        let Some(pending) = self.pending.remove(id) else {
            return ToggleOutcome::Superseded;
        };
        if success {
            ToggleOutcome::Confirmed
        } else {
            tracing::warn!(event_id = %id, seq, "favorite update failed, reverting");
            store.set_favorite(&pending.event, !pending.desired);
            ToggleOutcome::Reverted
        }
    }

    /// Merges the backend's favorites list into the store.
    ///
    /// - ids on the server but not local are added
    /// - local ids absent from the server are removed
    /// - pending ids keep their local state either way
    /// - fields the record lacks are kept from what was already known
    pub fn reconcile(&self, store: &mut ResultStore, records: &[FavoriteRecord]) -> ReconcileOutcome {
        let _span = tracing::debug_span!("reconcile_favorites",
            server_count = records.len(),
            pending = self.pending.len()
        )
        .entered();

        let server: HashMap<&str, &FavoriteRecord> = records.iter().map(|r| (r.id.as_str(), r)).collect();
        let previous_home: HashMap<&str, &FavoriteEvent> =
            store.home_favorites().iter().map(|f| (f.id.as_str(), f)).collect();

        let mut outcome = ReconcileOutcome::default();
        let mut liked: Vec<Event> = Vec::new();

        for existing in store.liked_events() {
            match server.get(existing.id.as_str()) {
                Some(record) if !self.is_pending(&existing.id) => liked.push(merge_event(existing, record)),
                _ if self.is_pending(&existing.id) => liked.push(existing.clone()),
                _ => outcome.removed += 1,
            }
        }
        for record in records {
            if self.is_pending(&record.id) || liked.iter().any(|e| e.id == record.id) {
                continue;
            }
            liked.push(Event::from_favorite(record));
            outcome.added += 1;
        }

        let home: Vec<FavoriteEvent> = liked
            .iter()
            .map(|event| {
                let mut favorite = server.get(event.id.as_str()).map_or_else(
                    || FavoriteEvent {
                        id: event.id.clone(),
                        name: event.name.clone(),
                        date: String::new(),
                        time: String::new(),
                        image_url: String::new(),
                        timestamp_added: None,
                    },
                    |record| FavoriteEvent::from_record(record),
                );
                if let Some(known) = previous_home.get(event.id.as_str()) {
                    fill(&mut favorite.image_url, &known.image_url);
                    fill(&mut favorite.date, &known.date);
                    fill(&mut favorite.time, &known.time);
                    favorite.timestamp_added = favorite.timestamp_added.or(known.timestamp_added);
                }
                fill(&mut favorite.image_url, &event.image_url);
                fill(&mut favorite.date, &event.date);
                fill(&mut favorite.time, &event.time24);
                favorite
            })
            .collect();

        outcome.needs_enrichment = home
            .iter()
            .filter(|f| f.image_url.is_empty() || f.date.is_empty() || f.time.is_empty())
            .map(|f| f.id.clone())
            .collect();

        let keep = self.pending_ids();
        store.replace_favorites(liked, home, &keep);

        tracing::debug!(
            added = outcome.added,
            removed = outcome.removed,
            to_enrich = outcome.needs_enrichment.len(),
            "favorites reconciled"
        );
        outcome
    }
}

/// Keeps `existing`'s known fields, filling blanks from the server record.
fn merge_event(existing: &Event, record: &FavoriteRecord) -> Event {
    let fresh = Event::from_favorite(record);
    let mut merged = existing.clone();
    merged.is_favorite = true;
    fill(&mut merged.name, &fresh.name);
    fill(&mut merged.image_url, &fresh.image_url);
    if fill(&mut merged.date, &fresh.date) {
        merged.date_formatted = fresh.date_formatted;
    }
    if fill(&mut merged.time24, &fresh.time24) {
        merged.time = fresh.time;
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::format::parse_timestamp;

    fn event(id: &str, date: &str) -> Event {
        Event {
            id: id.into(),
            name: format!("Event {id}"),
            venue: "Hall".into(),
            date: date.into(),
            date_formatted: String::new(),
            time: "7:00 PM".into(),
            time24: "19:00:00".into(),
            image_url: format!("https://img.example/{id}.jpg"),
            segment: "Music".into(),
            is_favorite: false,
        }
    }

    fn record(id: &str, added: &str) -> FavoriteRecord {
        FavoriteRecord {
            id: id.into(),
            name: format!("Event {id}"),
            venue: "Hall".into(),
            date: "2026-05-01".into(),
            time: "20:00:00".into(),
            image: format!("https://img.example/{id}.jpg"),
            segment: "Music".into(),
            added_at: parse_timestamp(added),
        }
    }

    #[test]
    fn merge_fills_blank_schedule_from_record() {
        let mut sparse = event("A", "");
        sparse.time24.clear();
        sparse.time.clear();
        let merged = merge_event(&sparse, &record("A", "2025-01-01T00:00:00Z"));
        assert!(merged.is_favorite);
        assert_eq!(merged.date, "2026-05-01");
        assert_eq!(merged.date_formatted, "May 1, 2026");
        assert_eq!(merged.time24, "20:00:00");
        assert_eq!(merged.time, "8:00 PM");

        let known = merge_event(&event("A", "2026-01-01"), &record("A", "2025-01-01T00:00:00Z"));
        assert_eq!(known.date, "2026-01-01");
        assert_eq!(known.time24, "19:00:00");
    }

    #[test]
    fn reconcile_adds_and_removes() {
        let mut store = ResultStore::new();
        let mut reconciler = FavoritesReconciler::new();
        store.apply_search_results(vec![event("A", "2026-01-01"), event("B", "2026-01-02")]);
        let a = event("A", "2026-01-01");
        reconciler.begin_toggle(&mut store, &a);
        reconciler.complete(&mut store, "A", 1, true);

        let outcome = reconciler.reconcile(&mut store, &[record("B", "2025-01-01T00:00:00Z")]);
        assert_eq!(outcome, ReconcileOutcome { added: 1, removed: 1, needs_enrichment: vec![] });

        let flags: Vec<(&str, bool)> = store
            .all_search_results()
            .iter()
            .map(|e| (e.id.as_str(), e.is_favorite))
            .collect();
        assert_eq!(flags, [("A", false), ("B", true)]);
        assert_eq!(store.home_favorites()[0].id, "B");
    }

    #[test]
    fn pending_toggle_survives_reconcile() {
        let mut store = ResultStore::new();
        let mut reconciler = FavoritesReconciler::new();
        store.apply_search_results(vec![event("A", "2026-01-01")]);

        reconciler.begin_toggle(&mut store, &event("A", "2026-01-01"));
        reconciler.reconcile(&mut store, &[]);

        assert!(store.is_liked("A"));
        assert!(store.all_search_results()[0].is_favorite);
    }

    #[test]
    fn pending_removal_is_not_readded() {
        let mut store = ResultStore::new();
        let mut reconciler = FavoritesReconciler::new();
        reconciler.reconcile(&mut store, &[record("A", "2025-01-01T00:00:00Z")]);
        assert!(store.is_liked("A"));

        let liked = store.liked_events()[0].clone();
        reconciler.begin_toggle(&mut store, &liked);
        reconciler.reconcile(&mut store, &[record("A", "2025-01-01T00:00:00Z")]);
        assert!(!store.is_liked("A"));
        assert!(store.home_favorites().is_empty());
    }

    #[test]
    fn failed_toggle_reverts() {
        let mut store = ResultStore::new();
        let mut reconciler = FavoritesReconciler::new();
        store.apply_search_results(vec![event("A", "2026-01-01")]);

        let intent = reconciler.begin_toggle(&mut store, &event("A", "2026-01-01"));
        assert!(intent.add);
        assert_eq!(
            reconciler.complete(&mut store, "A", intent.seq, false),
            ToggleOutcome::Reverted
        );
        assert!(!store.is_liked("A"));
        assert!(!store.all_search_results()[0].is_favorite);
        assert!(!reconciler.is_pending("A"));
    }

    #[test]
    fn only_latest_toggle_response_counts() {
        let mut store = ResultStore::new();
        let mut reconciler = FavoritesReconciler::new();
        let a = event("A", "2026-01-01");
        store.apply_search_results(vec![a.clone()]);

        let first = reconciler.begin_toggle(&mut store, &a);
        let second = reconciler.begin_toggle(&mut store, &a);
        assert!(first.add);
        assert!(!second.add);

        assert_eq!(reconciler.complete(&mut store, "A", first.seq, false), ToggleOutcome::Superseded);
        assert!(!store.is_liked("A"));
        assert_eq!(reconciler.complete(&mut store, "A", second.seq, true), ToggleOutcome::Confirmed);
        assert!(!store.is_liked("A"));
    }

    #[test]
    fn incomplete_records_request_enrichment() {
        let mut store = ResultStore::new();
        let reconciler = FavoritesReconciler::new();
        let mut sparse = record("S", "2025-03-01T00:00:00Z");
        sparse.image.clear();
        let outcome = reconciler.reconcile(&mut store, &[sparse, record("C", "2025-04-01T00:00:00Z")]);
        assert_eq!(outcome.needs_enrichment, vec!["S".to_string()]);
        let ids: Vec<&str> = store.home_favorites().iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, ["C", "S"]);
    }

    #[test]
    fn known_fields_survive_sparse_records() {
        let mut store = ResultStore::new();
        let reconciler = FavoritesReconciler::new();
        reconciler.reconcile(&mut store, &[record("A", "2025-01-01T00:00:00Z")]);

        let mut sparse = record("A", "2025-01-01T00:00:00Z");
        sparse.image.clear();
        let outcome = reconciler.reconcile(&mut store, &[sparse]);
        assert!(outcome.needs_enrichment.is_empty());
        assert_eq!(store.home_favorites()[0].image_url, "https://img.example/A.jpg");
    }
}
