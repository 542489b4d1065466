//! Venue record from `GET /api/venue`.
//!
//! Venue documents are the least consistent shape the backend produces: the
//! address can live under `address`, `location` or at the top level, and city,
//! state and country can each be a plain string or an object. Each logical
//! field is one [`extract_field`] chain, ordered `address` → `location` → top.

use super::extract::{extract_array, extract_f64, extract_field};
use serde_json::Value;

const LINE1: &[&str] = &["address.line1", "location.address"];

const CITY: &[&str] = &[
    "address.city",
    "address.city.name",
    "location.city",
    "location.city.name",
    "city",
    "city.name",
];

const STATE: &[&str] = &[
    "address.stateCode",
    "address.state",
    "address.state.code",
    "address.state.name",
    "location.stateCode",
    "location.state",
    "location.state.code",
    "location.state.name",
    "stateCode",
    "state",
    "state.stateCode",
    "state.code",
    "state.name",
];

const COUNTRY: &[&str] = &[
    "address.countryCode",
    "address.country",
    "address.country.code",
    "address.country.name",
    "location.countryCode",
    "location.country",
    "location.country.code",
    "location.country.name",
    "countryCode",
    "country",
    "country.countryCode",
    "country.code",
    "country.name",
];

/// Canonical venue record.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VenueDetails {
    pub name: String,
    pub logo_url: String,
    pub line1: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub url: String,
}

impl VenueDetails {
    #[must_use]
    pub fn from_json(json: &Value) -> Self {
        Self {
            name: extract_field(json, &["name"]),
            logo_url: logo(extract_array(json, "images")),
            line1: extract_field(json, LINE1),
            city: extract_field(json, CITY),
            state: extract_field(json, STATE),
            country: extract_field(json, COUNTRY),
            url: extract_field(json, &["url"]),
        }
    }

    /// `"line1, City, ST, CC"`, skipping absent parts.
    ///
    /// State and country are shortened to two uppercase letters.
    ///
    /// # Examples
    ///
    /// ```
    /// use eventscout::domain::venue::VenueDetails;
    /// use serde_json::json;
    ///
    /// let venue = VenueDetails::from_json(&json!({
    ///     "address": { "line1": "3900 W Manchester Blvd" },
    ///     "city": { "name": "Inglewood" },
    ///     "state": { "stateCode": "ca" },
    ///     "country": { "countryCode": "US" }
    /// }));
    /// assert_eq!(venue.formatted_address(), "3900 W Manchester Blvd, Inglewood, CA, US");
    /// ```
    #[must_use]
    pub fn formatted_address(&self) -> String {
        let short = |s: &str| s.chars().take(2).collect::<String>().to_uppercase();
        [
            self.line1.clone(),
            self.city.clone(),
            short(&self.state),
            short(&self.country),
        ]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
    }
}

/// First square or portrait image, else the first image.
fn logo(images: &[Value]) -> String {
    images
        .iter()
        .find(|img| {
            let width = extract_f64(img, &["width"]);
            let height = extract_f64(img, &["height"]);
            width > 0.0 && height >= width
        })
        .or_else(|| images.first())
        .map(|img| extract_field(img, &["url"]))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn location_shape_fills_gaps() {
        let venue = VenueDetails::from_json(&json!({
            "name": "Hall",
            "address": { "line1": "" },
            "location": {
                "address": "1 Plaza",
                "city": "Springfield",
                "state": { "name": "illinois" },
                "country": "United States"
            }
        }));
        assert_eq!(venue.line1, "1 Plaza");
        assert_eq!(venue.city, "Springfield");
        assert_eq!(venue.formatted_address(), "1 Plaza, Springfield, IL, UN");
    }

    #[test]
    fn address_shape_wins_over_top_level() {
        let venue = VenueDetails::from_json(&json!({
            "address": { "line1": "5 Road", "city": { "name": "Austin" }, "stateCode": "TX", "countryCode": "US" },
            "city": "Elsewhere"
        }));
        assert_eq!(venue.formatted_address(), "5 Road, Austin, TX, US");
    }

    #[test]
    fn empty_document_is_blank() {
        let venue = VenueDetails::from_json(&json!({}));
        assert_eq!(venue, VenueDetails::default());
        assert_eq!(venue.formatted_address(), "");
    }

    #[test]
    fn logo_prefers_portrait() {
        let images = json!([
            { "url": "wide", "width": 1024, "height": 576 },
            { "url": "square", "width": 200, "height": 200 }
        ]);
        assert_eq!(logo(images.as_array().unwrap()), "square");
        let landscape_only = json!([{ "url": "wide", "width": 1024, "height": 576 }]);
        assert_eq!(logo(landscape_only.as_array().unwrap()), "wide");
    }
}
