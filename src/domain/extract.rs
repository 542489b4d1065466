//! Defensive field extraction over loosely-shaped JSON.
//!
//! The backend's event and venue documents put the same logical field under
//! different keys depending on region and source. Every parser in the crate goes
//! through [`extract_field`] and friends: an ordered list of dotted paths is tried
//! until one resolves to something usable, and total failure yields an empty
//! value instead of an error.
//!
//! Path syntax: segments separated by `.`; a segment that parses as an integer
//! indexes into an array (`_embedded.venues.0.name`).

use serde_json::Value;

/// Resolves a single dotted path.
///
/// Returns `None` as soon as a segment is missing or the value being walked is
/// neither an object nor an array.
#[must_use]
pub fn lookup<'a>(json: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').filter(|s| !s.is_empty()).try_fold(json, |current, segment| {
        match current {
            Value::Object(map) => map.get(segment),
            Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        }
    })
}

/// Renders a leaf as text: non-blank strings (trimmed) and numbers qualify.
fn leaf_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Returns the first path that resolves to a non-empty string or a number.
///
/// # Examples
///
/// ```
/// use eventscout::domain::extract::extract_field;
/// use serde_json::json;
///
/// let venue = json!({ "city": { "name": "Los Angeles" } });
/// assert_eq!(extract_field(&venue, &["address.city", "city", "city.name"]), "Los Angeles");
/// assert_eq!(extract_field(&venue, &["postalCode"]), "");
/// ```
#[must_use]
pub fn extract_field(json: &Value, paths: &[&str]) -> String {
    paths
        .iter()
        .find_map(|path| lookup(json, path).and_then(leaf_text))
        .unwrap_or_default()
}

/// Like [`extract_field`] but yields `None` instead of an empty string.
#[must_use]
pub fn extract_opt(json: &Value, paths: &[&str]) -> Option<String> {
    Some(extract_field(json, paths)).filter(|s| !s.is_empty())
}

/// Returns the first path holding a number, or a string that parses as one.
///
/// Thousands separators in strings (`"1,234"`) are ignored. Defaults to `0.0`.
#[must_use]
pub fn extract_f64(json: &Value, paths: &[&str]) -> f64 {
    paths
        .iter()
        .find_map(|path| match lookup(json, path)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.replace(',', "").trim().parse::<f64>().ok(),
            _ => None,
        })
        .unwrap_or(0.0)
}

/// Returns the array at `path`, or an empty slice when absent or mistyped.
#[must_use]
pub fn extract_array<'a>(json: &'a Value, path: &str) -> &'a [Value] {
    lookup(json, path)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

/// Picks the widest image URL from an `images` array.
///
/// Entries without a positive width lose to any entry that has one; when no
/// entry carries a width the first image with a URL wins.
#[must_use]
pub fn widest_image(images: &[Value]) -> String {
    let mut best: Option<(f64, String)> = None;
    for image in images {
        let Some(url) = extract_opt(image, &["url"]) else {
            continue;
        };
        let width = extract_f64(image, &["width"]);
        match &best {
            Some((best_width, _)) if width <= *best_width => {}
            _ => best = Some((width, url)),
        }
    }
    best.map(|(_, url)| url).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn falls_through_to_later_paths() {
        let doc = json!({
            "address": { "line1": "" },
            "location": { "address": "123 Main St" }
        });
        assert_eq!(extract_field(&doc, &["address.line1", "location.address"]), "123 Main St");
    }

    #[test]
    fn indexes_into_arrays() {
        let doc = json!({ "_embedded": { "venues": [{ "name": "The Forum" }] } });
        assert_eq!(extract_field(&doc, &["_embedded.venues.0.name"]), "The Forum");
        assert_eq!(extract_field(&doc, &["_embedded.venues.1.name"]), "");
    }

    #[test]
    fn objects_are_not_leaves() {
        let doc = json!({ "state": { "code": "CA" } });
        assert_eq!(extract_field(&doc, &["state", "state.code"]), "CA");
    }

    #[test]
    fn numbers_render_as_text() {
        let doc = json!({ "popularity": 87 });
        assert_eq!(extract_field(&doc, &["popularity"]), "87");
    }

    #[test]
    fn numeric_strings_parse_with_separators() {
        let doc = json!({ "followers": "1,234,567", "bad": "n/a" });
        assert!((extract_f64(&doc, &["followers"]) - 1_234_567.0).abs() < f64::EPSILON);
        assert!(extract_f64(&doc, &["bad", "missing"]).abs() < f64::EPSILON);
    }

    #[test]
    fn widest_image_prefers_width_then_first() {
        let images = json!([
            { "url": "small", "width": 100 },
            { "url": "large", "width": 1200 },
            { "url": "medium", "width": 640 }
        ]);
        assert_eq!(widest_image(images.as_array().unwrap()), "large");

        let unsized_images = json!([{ "url": "first" }, { "url": "second" }]);
        assert_eq!(widest_image(unsized_images.as_array().unwrap()), "first");
        assert_eq!(widest_image(&[]), "");
    }
}
