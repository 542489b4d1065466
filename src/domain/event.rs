//! Event domain model: search hits, favorites and the category taxonomy.
//!
//! Two wire shapes produce an [`Event`]: the search response
//! (`{_embedded:{events:[...]}}`, nested Discovery-style records) and the flat
//! favorites records stored by the backend. Both are parsed here with
//! [`extract_field`] so missing fields collapse to defaults instead of errors.

use super::details::EventDetails;
use super::extract::{extract_array, extract_field, lookup, widest_image};
use super::format::{format_date, format_time, parse_timestamp};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Venue shown when a search hit carries none.
pub const UNKNOWN_VENUE: &str = "Unknown Venue";

/// Segment shown when a search hit carries no classification.
pub const UNKNOWN_SEGMENT: &str = "Unknown";

/// An event as listed on the search screen.
///
/// Identity is `id`. `date`/`time24` keep the backend's raw values for sorting;
/// `date_formatted`/`time` are the display forms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub name: String,
    pub venue: String,
    pub date: String,
    pub date_formatted: String,
    pub time: String,
    pub time24: String,
    pub image_url: String,
    pub segment: String,
    pub is_favorite: bool,
}

impl Event {
    /// Parses one entry of a search response.
    ///
    /// Returns `None` only when the entry has no `id`, which makes it
    /// unaddressable for favorites and details.
    #[must_use]
    pub fn from_search_json(json: &Value) -> Option<Self> {
        let id = extract_field(json, &["id"]);
        if id.is_empty() {
            return None;
        }

        let date = extract_field(json, &["dates.start.localDate"]);
        let time24 = extract_field(json, &["dates.start.localTime"]);
        let venue = Some(extract_field(json, &["_embedded.venues.0.name"]))
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| UNKNOWN_VENUE.to_string());
        let segment = Some(extract_field(json, &["classifications.0.segment.name"]))
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| UNKNOWN_SEGMENT.to_string());

        Some(Self {
            id,
            name: extract_field(json, &["name"]),
            venue,
            date_formatted: format_date(&date),
            time: format_time(&time24),
            date,
            time24,
            image_url: widest_image(extract_array(json, "images")),
            segment,
            is_favorite: false,
        })
    }

    /// Builds an event from a backend favorites record.
    ///
    /// Favorites are favorites by definition, so `is_favorite` is set.
    #[must_use]
    pub fn from_favorite(record: &FavoriteRecord) -> Self {
        Self {
            id: record.id.clone(),
            name: record.name.clone(),
            venue: if record.venue.is_empty() {
                UNKNOWN_VENUE.to_string()
            } else {
                record.venue.clone()
            },
            date_formatted: format_date(&record.date),
            time: format_time(&record.time),
            date: record.date.clone(),
            time24: record.time.clone(),
            image_url: record.image.clone(),
            segment: if record.segment.is_empty() {
                UNKNOWN_SEGMENT.to_string()
            } else {
                record.segment.clone()
            },
            is_favorite: true,
        }
    }

    /// Builds a listable event from a details record, for favoriting an event
    /// that was opened without a list row (e.g. from a stale favorite).
    #[must_use]
    pub fn from_details(details: &EventDetails) -> Self {
        Self {
            id: details.id.clone(),
            name: details.name.clone(),
            venue: if details.venue.is_empty() {
                UNKNOWN_VENUE.to_string()
            } else {
                details.venue.clone()
            },
            date_formatted: format_date(&details.date),
            time: format_time(&details.time),
            date: details.date.clone(),
            time24: details.time.clone(),
            image_url: details.image_url.clone(),
            segment: if details.segment.is_empty() {
                UNKNOWN_SEGMENT.to_string()
            } else {
                details.segment.clone()
            },
            is_favorite: false,
        }
    }

    /// The request body for `POST /api/favorites`.
    #[must_use]
    pub fn favorite_payload(&self) -> Value {
        serde_json::json!({
            "id": self.id,
            "name": self.name,
            "venue": self.venue,
            "image": self.image_url,
            "date": self.date,
            "time": self.time24,
            "segment": self.segment,
        })
    }
}

/// Parses the `_embedded.events` array of a search response.
///
/// The result is already sorted with [`sort_by_schedule`].
#[must_use]
pub fn parse_search_response(json: &Value) -> Vec<Event> {
    let mut events: Vec<Event> = extract_array(json, "_embedded.events")
        .iter()
        .filter_map(Event::from_search_json)
        .collect();
    sort_by_schedule(&mut events);
    events
}

/// Sorts soonest first by `(date, time24)`.
///
/// The sort is stable: events with equal keys keep their relative order.
pub fn sort_by_schedule(events: &mut [Event]) {
    events.sort_by(|a, b| (&a.date, &a.time24).cmp(&(&b.date, &b.time24)));
}

/// A record from `GET /api/favorites`.
///
/// The added-at marker arrives as `addedAt` or `timestampAdded`, as a number
/// or a string; both collapse into `added_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FavoriteRecord {
    pub id: String,
    pub name: String,
    pub venue: String,
    pub date: String,
    pub time: String,
    pub image: String,
    pub segment: String,
    pub added_at: Option<DateTime<Utc>>,
}

impl FavoriteRecord {
    /// Parses one favorites record; `None` when it has no `id`.
    #[must_use]
    pub fn from_json(json: &Value) -> Option<Self> {
        let id = extract_field(json, &["id"]);
        if id.is_empty() {
            return None;
        }
        Some(Self {
            id,
            name: extract_field(json, &["name"]),
            venue: extract_field(json, &["venue", "_embedded.venues.0.name"]),
            date: extract_field(json, &["date"]),
            time: extract_field(json, &["time"]),
            image: extract_field(json, &["image", "imageUrl"]),
            segment: extract_field(json, &["segment"]),
            added_at: parse_timestamp(&extract_field(json, &["timestampAdded", "addedAt"])),
        })
    }

    /// Whether the record lacks data only the details endpoint can supply.
    #[must_use]
    pub fn is_incomplete(&self) -> bool {
        self.image.is_empty() || self.date.is_empty() || self.time.is_empty()
    }
}

/// Parses the favorites list; a non-array body yields an empty list.
#[must_use]
pub fn parse_favorites_response(json: &Value) -> Vec<FavoriteRecord> {
    json.as_array()
        .map(|items| items.iter().filter_map(FavoriteRecord::from_json).collect())
        .unwrap_or_default()
}

/// A favorite as listed on the home screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FavoriteEvent {
    pub id: String,
    pub name: String,
    pub date: String,
    pub time: String,
    pub image_url: String,
    pub timestamp_added: Option<DateTime<Utc>>,
}

impl FavoriteEvent {
    #[must_use]
    pub fn from_record(record: &FavoriteRecord) -> Self {
        Self {
            id: record.id.clone(),
            name: record.name.clone(),
            date: record.date.clone(),
            time: record.time.clone(),
            image_url: record.image.clone(),
            timestamp_added: record.added_at,
        }
    }

    /// `"Aug 8, 2026, 7:00 PM"`, or whichever half is present.
    #[must_use]
    pub fn schedule_label(&self) -> String {
        let date = format_date(&self.date);
        let time = format_time(&self.time);
        match (date.is_empty(), time.is_empty()) {
            (false, false) => format!("{date}, {time}"),
            (false, true) => date,
            (true, _) => time,
        }
    }
}

/// Sorts newest-added first; records without a timestamp go last.
///
/// Stable, so ties keep the backend's order.
pub fn sort_by_added_desc(favorites: &mut [FavoriteEvent]) {
    favorites.sort_by(|a, b| b.timestamp_added.cmp(&a.timestamp_added));
}

/// Top-level event categories (backend "segments").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Category {
    #[default]
    All,
    Music,
    Sports,
    ArtsTheatre,
    Film,
    Miscellaneous,
}

impl Category {
    /// Tab order on the search screen.
    pub const ALL: [Self; 6] = [
        Self::All,
        Self::Music,
        Self::Sports,
        Self::ArtsTheatre,
        Self::Film,
        Self::Miscellaneous,
    ];

    /// Display label, identical to the backend's segment name.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Music => "Music",
            Self::Sports => "Sports",
            Self::ArtsTheatre => "Arts & Theatre",
            Self::Film => "Film",
            Self::Miscellaneous => "Miscellaneous",
        }
    }

    /// Backend segment id; `None` for `All`, which sends no filter.
    #[must_use]
    pub const fn segment_id(self) -> Option<&'static str> {
        match self {
            Self::All => None,
            Self::Music => Some("KZFzniwnSyZfZ7v7nJ"),
            Self::Sports => Some("KZFzniwnSyZfZ7v7nE"),
            Self::ArtsTheatre => Some("KZFzniwnSyZfZ7v7na"),
            Self::Film => Some("KZFzniwnSyZfZ7v7nn"),
            Self::Miscellaneous => Some("KZFzniwnSyZfZ7v7n1"),
        }
    }

    /// Whether an event with this segment name belongs to the category.
    #[must_use]
    pub fn matches(self, segment: &str) -> bool {
        self == Self::All || self.label().eq_ignore_ascii_case(segment)
    }

    /// Next tab, wrapping.
    #[must_use]
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|c| *c == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Previous tab, wrapping.
    #[must_use]
    pub fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|c| *c == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Placeholder text meaning "use IP autodetection".
pub const CURRENT_LOCATION: &str = "Current Location";

/// Input state for a search, consumed to build the events request.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    pub keyword: String,
    pub location_text: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub distance_miles: u32,
    pub selected_category: Category,
}

impl SearchQuery {
    #[must_use]
    pub fn new(distance_miles: u32) -> Self {
        Self {
            keyword: String::new(),
            location_text: CURRENT_LOCATION.to_string(),
            latitude: None,
            longitude: None,
            distance_miles,
            selected_category: Category::All,
        }
    }

    /// Whether the location should come from IP autodetection.
    #[must_use]
    pub fn uses_current_location(&self) -> bool {
        let text = self.location_text.trim();
        text.is_empty() || text == CURRENT_LOCATION
    }

    /// Resolved coordinates, if the location has been geocoded or detected.
    #[must_use]
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        self.latitude.zip(self.longitude)
    }
}

/// Extracts `suggestions` from `GET /api/suggest`.
#[must_use]
pub fn parse_suggestions(json: &Value) -> Vec<String> {
    extract_array(json, "suggestions")
        .iter()
        .filter_map(|s| s.as_str().map(str::trim).filter(|s| !s.is_empty()))
        .map(String::from)
        .collect()
}

/// Extracts coordinates from `GET /api/autodetect`.
///
/// The backend sends `lat`/`lon` as strings; numbers are accepted too.
#[must_use]
pub fn parse_autodetect(json: &Value) -> Option<(f64, f64)> {
    let coord = |key: &str| match lookup(json, key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    coord("lat").zip(coord("lon"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn hit(id: &str, date: &str, time: &str) -> Value {
        json!({
            "id": id,
            "name": format!("Event {id}"),
            "dates": { "start": { "localDate": date, "localTime": time } }
        })
    }

    #[test]
    fn search_hit_defaults() {
        let event = Event::from_search_json(&hit("A", "2026-08-08", "19:00:00")).unwrap();
        assert_eq!(event.venue, UNKNOWN_VENUE);
        assert_eq!(event.segment, UNKNOWN_SEGMENT);
        assert_eq!(event.date_formatted, "Aug 8, 2026");
        assert_eq!(event.time, "7:00 PM");
        assert!(event.image_url.is_empty());
        assert!(!event.is_favorite);
        assert!(Event::from_search_json(&json!({ "name": "no id" })).is_none());
    }

    #[test]
    fn search_hit_full_shape() {
        let doc = json!({
            "id": "Z1",
            "name": "Taylor Swift",
            "dates": { "start": { "localDate": "2026-03-01", "localTime": "20:00:00" } },
            "_embedded": { "venues": [{ "name": "SoFi Stadium" }] },
            "classifications": [{ "segment": { "name": "Music" } }],
            "images": [{ "url": "a", "width": 300 }, { "url": "b", "width": 1024 }]
        });
        let event = Event::from_search_json(&doc).unwrap();
        assert_eq!(event.venue, "SoFi Stadium");
        assert_eq!(event.segment, "Music");
        assert_eq!(event.image_url, "b");
        assert_eq!(event.time24, "20:00:00");
        assert_eq!(event.time, "8:00 PM");
        assert_eq!(event.favorite_payload()["time"], "20:00:00");
    }

    #[test]
    fn sort_is_stable_on_schedule() {
        let doc = json!({ "_embedded": { "events": [
            hit("first", "2025-01-02", "10:00"),
            hit("second", "2025-01-01", "09:00"),
            hit("third", "2025-01-02", "09:00"),
        ]}});
        let keys: Vec<(String, String)> = parse_search_response(&doc)
            .into_iter()
            .map(|e| (e.date, e.time24))
            .collect();
        assert_eq!(
            keys,
            vec![
                ("2025-01-01".to_string(), "09:00".to_string()),
                ("2025-01-02".to_string(), "09:00".to_string()),
                ("2025-01-02".to_string(), "10:00".to_string()),
            ]
        );
    }

    #[test]
    fn equal_keys_keep_insertion_order() {
        let doc = json!({ "_embedded": { "events": [
            hit("x", "2025-05-05", "18:00"),
            hit("y", "2025-05-05", "18:00"),
        ]}});
        let ids: Vec<String> = parse_search_response(&doc).into_iter().map(|e| e.id).collect();
        assert_eq!(ids, ["x", "y"]);
    }

    #[test]
    fn missing_embedded_is_empty() {
        assert!(parse_search_response(&json!({})).is_empty());
        assert!(parse_search_response(&json!({ "page": { "totalElements": 0 } })).is_empty());
    }

    #[test]
    fn favorite_records_accept_both_timestamp_keys() {
        let doc = json!([
            { "id": "A", "name": "a", "addedAt": "2025-01-01T10:00:00.000Z" },
            { "id": "B", "name": "b", "timestampAdded": 1_735_725_600_000_i64 },
            { "name": "no id" }
        ]);
        let records = parse_favorites_response(&doc);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].added_at, records[1].added_at);
        assert!(records[0].is_incomplete());
        assert!(parse_favorites_response(&json!({ "error": "x" })).is_empty());
    }

    #[test]
    fn home_sort_newest_first_undated_last() {
        let at = |s: &str| parse_timestamp(s);
        let mk = |id: &str, ts: Option<DateTime<Utc>>| FavoriteEvent {
            id: id.into(),
            name: id.into(),
            date: String::new(),
            time: String::new(),
            image_url: String::new(),
            timestamp_added: ts,
        };
        let mut list = vec![
            mk("old", at("2025-01-01T00:00:00.000Z")),
            mk("none", None),
            mk("new", at("2025-06-01T00:00:00.000Z")),
        ];
        sort_by_added_desc(&mut list);
        let ids: Vec<&str> = list.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, ["new", "old", "none"]);
    }

    #[test]
    fn schedule_label_joins_halves() {
        let fav = FavoriteEvent {
            id: "E1".into(),
            name: "Show".into(),
            date: "2026-08-08".into(),
            time: "19:00:00".into(),
            image_url: String::new(),
            timestamp_added: None,
        };
        assert_eq!(fav.schedule_label(), "Aug 8, 2026, 7:00 PM");
        let no_time = FavoriteEvent { time: String::new(), ..fav };
        assert_eq!(no_time.schedule_label(), "Aug 8, 2026");
    }

    #[test]
    fn categories_cycle_and_match() {
        assert_eq!(Category::Miscellaneous.next(), Category::All);
        assert_eq!(Category::All.prev(), Category::Miscellaneous);
        assert!(Category::All.matches("Anything"));
        assert!(Category::ArtsTheatre.matches("Arts & Theatre"));
        assert!(!Category::Film.matches("Music"));
        assert_eq!(Category::All.segment_id(), None);
        assert_eq!(Category::Music.segment_id(), Some("KZFzniwnSyZfZ7v7nJ"));
    }

    #[test]
    fn autodetect_accepts_strings_and_numbers() {
        assert_eq!(parse_autodetect(&json!({ "lat": "34.05", "lon": "-118.24" })), Some((34.05, -118.24)));
        assert_eq!(parse_autodetect(&json!({ "lat": 1.5, "lon": 2 })), Some((1.5, 2.0)));
        assert_eq!(parse_autodetect(&json!({ "lat": "x", "lon": "1" })), None);
    }

    #[test]
    fn suggestions_skip_blanks() {
        let doc = json!({ "suggestions": ["Paris Hilton", "", "  ", 7, "Paris Texas"] });
        assert_eq!(parse_suggestions(&doc), vec!["Paris Hilton", "Paris Texas"]);
        assert!(parse_suggestions(&json!([])).is_empty());
    }
}
