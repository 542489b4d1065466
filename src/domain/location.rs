//! Free-text location lookup results.
//!
//! The geocoder reports its own `status` field alongside an HTTP 200, so a
//! successful transfer can still be a failed lookup. [`parse_geocode`] folds the
//! three documented outcomes into a `Result`.

use super::error::{EventScoutError, Result};
use super::extract::{extract_array, extract_f64, extract_field, lookup};
use serde_json::Value;

/// Coordinates used when neither geocoding nor IP autodetection succeeds.
pub const FALLBACK_COORDINATES: (f64, f64) = (34.0522, -118.2437);

/// Maximum number of geocoder suggestions shown under the location field.
pub const MAX_LOCATION_SUGGESTIONS: usize = 5;

/// One geocoder match.
#[derive(Debug, Clone, PartialEq)]
pub struct Place {
    pub label: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Parses a geocoding response.
///
/// `OK` yields the matches (possibly truncated), `ZERO_RESULTS` an empty list,
/// and any other status an [`EventScoutError::Geocoding`] carrying the status and
/// the geocoder's `error_message` when present.
///
/// # Errors
///
/// Returns `Geocoding` for statuses other than `OK` and `ZERO_RESULTS`.
pub fn parse_geocode(json: &Value) -> Result<Vec<Place>> {
    let status = extract_field(json, &["status"]);
    match status.as_str() {
        "OK" => Ok(extract_array(json, "results")
            .iter()
            .filter(|r| lookup(r, "geometry.location").is_some())
            .map(|r| Place {
                label: extract_field(r, &["formatted_address"]),
                latitude: extract_f64(r, &["geometry.location.lat"]),
                longitude: extract_f64(r, &["geometry.location.lng"]),
            })
            .filter(|p| !p.label.is_empty())
            .take(MAX_LOCATION_SUGGESTIONS)
            .collect()),
        "ZERO_RESULTS" => Ok(Vec::new()),
        other => {
            let message = extract_field(json, &["error_message"]);
            Err(EventScoutError::Geocoding(if message.is_empty() {
                other.to_string()
            } else {
                format!("{other}: {message}")
            }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn ok_status_yields_places() {
        let doc = json!({
            "status": "OK",
            "results": [
                { "formatted_address": "Paris, France", "geometry": { "location": { "lat": 48.85, "lng": 2.35 } } },
                { "formatted_address": "Paris, TX, USA", "geometry": { "location": { "lat": 33.66, "lng": -95.55 } } }
            ]
        });
        let places = parse_geocode(&doc).unwrap();
        assert_eq!(places.len(), 2);
        assert_eq!(places[0].label, "Paris, France");
        assert!((places[1].longitude + 95.55).abs() < 1e-9);
    }

    #[test]
    fn zero_results_is_empty_not_error() {
        assert!(parse_geocode(&json!({ "status": "ZERO_RESULTS", "results": [] })).unwrap().is_empty());
    }

    #[test]
    fn other_status_is_error() {
        let err = parse_geocode(&json!({ "status": "REQUEST_DENIED", "error_message": "bad key" })).unwrap_err();
        assert_eq!(err.to_string(), "Geocoding error: REQUEST_DENIED: bad key");
        assert!(parse_geocode(&json!({})).is_err());
    }
}
