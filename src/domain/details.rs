//! Detail-data assembly for the event details screen.
//!
//! Turns the `/api/eventdetails` blob into a canonical [`EventDetails`] record.
//! Every field goes through an ordered fallback chain; nothing here can fail.

use super::extract::{extract_array, extract_f64, extract_field, widest_image};
use super::format::{format_date, format_time};
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::fmt;

/// Sale state of an event's tickets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketStatus {
    OnSale,
    OffSale,
    Canceled,
    Postponed,
    Rescheduled,
}

impl TicketStatus {
    /// Maps `dates.status.code`. Unknown codes read as on sale.
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_ascii_lowercase().as_str() {
            "offsale" => Self::OffSale,
            "cancelled" | "canceled" => Self::Canceled,
            "postponed" => Self::Postponed,
            "rescheduled" => Self::Rescheduled,
            _ => Self::OnSale,
        }
    }

    /// Derives the status for an event document at instant `now`.
    ///
    /// The status code wins whenever present. Only without one is the public
    /// sales window consulted: before its start or after its end the event is
    /// off sale. Missing or unparseable window bounds are treated as open.
    #[must_use]
    pub fn derive(json: &Value, now: DateTime<Utc>) -> Self {
        let code = extract_field(json, &["dates.status.code"]);
        if !code.is_empty() {
            return Self::from_code(&code);
        }

        let bound = |path: &str| {
            DateTime::parse_from_rfc3339(&extract_field(json, &[path]))
                .ok()
                .map(|dt| dt.with_timezone(&Utc))
        };
        let not_started = bound("sales.public.startDateTime").is_some_and(|start| now < start);
        let ended = bound("sales.public.endDateTime").is_some_and(|end| now > end);

        if not_started || ended {
            Self::OffSale
        } else {
            Self::OnSale
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::OnSale => "On Sale",
            Self::OffSale => "Off Sale",
            Self::Canceled => "Canceled",
            Self::Postponed => "Postponed",
            Self::Rescheduled => "Rescheduled",
        }
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Canonical event details record.
#[derive(Debug, Clone, PartialEq)]
pub struct EventDetails {
    pub id: String,
    pub name: String,
    /// Raw `localDate`, kept for enrichment of favorites.
    pub date: String,
    /// Raw `localTime`, kept for enrichment of favorites.
    pub time: String,
    pub artists: Vec<String>,
    pub venue: String,
    pub venue_id: String,
    pub genre_chain: Vec<String>,
    pub price_ranges: Vec<String>,
    pub ticket_status: TicketStatus,
    pub seatmap_url: String,
    pub ticketmaster_url: String,
    pub image_url: String,
    pub segment: String,
}

impl EventDetails {
    /// Assembles the record from an event-details document.
    #[must_use]
    pub fn from_json(json: &Value, now: DateTime<Utc>) -> Self {
        let artists = extract_array(json, "_embedded.attractions")
            .iter()
            .map(|a| extract_field(a, &["name"]))
            .filter(|name| !name.is_empty())
            .collect();

        Self {
            id: extract_field(json, &["id"]),
            name: extract_field(json, &["name"]),
            date: extract_field(json, &["dates.start.localDate"]),
            time: extract_field(json, &["dates.start.localTime"]),
            artists,
            venue: extract_field(json, &["_embedded.venues.0.name"]),
            venue_id: extract_field(json, &["_embedded.venues.0.id"]),
            genre_chain: genre_chain(json),
            price_ranges: price_ranges(json),
            ticket_status: TicketStatus::derive(json, now),
            seatmap_url: extract_field(json, &["seatmap.staticUrl", "seatmap.url", "seatmap.imageUrl"]),
            ticketmaster_url: extract_field(json, &["url"]),
            image_url: widest_image(extract_array(json, "images")),
            segment: extract_field(json, &["classifications.0.segment.name"]),
        }
    }

    /// `"Aug 8, 2026 7:00 PM"` with whichever halves are known.
    #[must_use]
    pub fn schedule_label(&self) -> String {
        [format_date(&self.date), format_time(&self.time)]
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Whether the artist tab applies (music events with a named attraction).
    #[must_use]
    pub fn has_artist_tab(&self) -> bool {
        self.segment.eq_ignore_ascii_case("Music") && !self.artists.is_empty()
    }
}

/// Segment → genre → subGenre → type → subType names, de-duplicated in order.
fn genre_chain(json: &Value) -> Vec<String> {
    let mut chain: Vec<String> = Vec::new();
    for key in ["segment", "genre", "subGenre", "type", "subType"] {
        let path = format!("classifications.0.{key}.name");
        let name = extract_field(json, &[path.as_str()]);
        if !name.is_empty() && name != "Undefined" && !chain.contains(&name) {
            chain.push(name);
        }
    }
    chain
}

/// Formats every price range that has a positive minimum.
fn price_ranges(json: &Value) -> Vec<String> {
    extract_array(json, "priceRanges")
        .iter()
        .filter_map(|range| {
            let min = extract_f64(range, &["min"]);
            let max = extract_f64(range, &["max"]);
            let currency = Some(extract_field(range, &["currency"]))
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| "USD".to_string());
            if min > 0.0 && max > 0.0 {
                Some(format!("{currency} {min:.2} - {max:.2}"))
            } else if min > 0.0 {
                Some(format!("{currency} {min:.2}+"))
            } else {
                None
            }
        })
        .collect()
}
