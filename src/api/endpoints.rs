//! URL construction for the backend contract and the geocoder.
//!
//! All query strings are built with `url`'s form encoder, so keywords and
//! addresses with spaces, ampersands or non-ASCII text are encoded correctly.

use crate::domain::error::{EventScoutError, Result};
use crate::domain::event::SearchQuery;
use url::Url;

/// Third-party geocoding endpoint.
pub const GEOCODE_URL: &str = "https://maps.googleapis.com/maps/api/geocode/json";

/// Endpoint table bound to one backend base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    base: Url,
    geocoding_key: Option<String>,
}

impl Endpoints {
    /// Binds the table to `base`.
    ///
    /// A path on the base is kept (`https://host/prefix` serves
    /// `https://host/prefix/api/...`).
    ///
    /// # Errors
    ///
    /// Returns `Url` for unparseable input and `Config` for bases that cannot
    /// carry a path (`mailto:` and friends).
    pub fn new(base: &str, geocoding_key: Option<String>) -> Result<Self> {
        let mut base = Url::parse(base.trim())?;
        if base.cannot_be_a_base() {
            return Err(EventScoutError::Config(format!("`{base}` cannot be used as a backend URL")));
        }
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(Self {
            base,
            geocoding_key: geocoding_key.filter(|k| !k.trim().is_empty()),
        })
    }

    #[must_use]
    pub const fn base(&self) -> &Url {
        &self.base
    }

    /// Whether free-text location lookup is available.
    #[must_use]
    pub const fn has_geocoder(&self) -> bool {
        self.geocoding_key.is_some()
    }

    fn api(&self, path: &str, params: &[(&str, &str)]) -> Result<Url> {
        let mut url = self.base.join(path)?;
        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(params);
        }
        Ok(url)
    }

    /// `GET /api/events?keyword=&lat=&lon=&radius=&unit=miles[&segmentId=]`
    ///
    /// # Errors
    ///
    /// Propagates URL join failures.
    pub fn events(&self, query: &SearchQuery, latitude: f64, longitude: f64) -> Result<Url> {
        let lat = latitude.to_string();
        let lon = longitude.to_string();
        let radius = query.distance_miles.to_string();
        let mut params = vec![
            ("keyword", query.keyword.trim()),
            ("lat", lat.as_str()),
            ("lon", lon.as_str()),
            ("radius", radius.as_str()),
            ("unit", "miles"),
        ];
        if let Some(segment_id) = query.selected_category.segment_id() {
            params.push(("segmentId", segment_id));
        }
        self.api("api/events", &params)
    }

    /// `GET /api/eventdetails?id=`
    ///
    /// # Errors
    ///
    /// Propagates URL join failures.
    pub fn event_details(&self, id: &str) -> Result<Url> {
        self.api("api/eventdetails", &[("id", id)])
    }

    /// `GET /api/suggest?keyword=`
    ///
    /// # Errors
    ///
    /// Propagates URL join failures.
    pub fn suggest(&self, keyword: &str) -> Result<Url> {
        self.api("api/suggest", &[("keyword", keyword.trim())])
    }

    /// `GET|POST /api/favorites`
    ///
    /// # Errors
    ///
    /// Propagates URL join failures.
    pub fn favorites(&self) -> Result<Url> {
        self.api("api/favorites", &[])
    }

    /// `DELETE /api/favorites/{id}`, with `id` percent-encoded as one segment.
    ///
    /// # Errors
    ///
    /// Propagates URL join failures.
    pub fn favorite(&self, id: &str) -> Result<Url> {
        let mut url = self.api("api/favorites", &[])?;
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(id);
        }
        Ok(url)
    }

    /// `GET /api/artist?artist=`
    ///
    /// # Errors
    ///
    /// Propagates URL join failures.
    pub fn artist(&self, name: &str) -> Result<Url> {
        self.api("api/artist", &[("artist", name)])
    }

    /// `GET /api/albums?id=`
    ///
    /// # Errors
    ///
    /// Propagates URL join failures.
    pub fn albums(&self, spotify_id: &str) -> Result<Url> {
        self.api("api/albums", &[("id", spotify_id)])
    }

    /// `GET /api/venue?id=`
    ///
    /// # Errors
    ///
    /// Propagates URL join failures.
    pub fn venue(&self, id: &str) -> Result<Url> {
        self.api("api/venue", &[("id", id)])
    }

    /// `GET /api/autodetect`
    ///
    /// # Errors
    ///
    /// Propagates URL join failures.
    pub fn autodetect(&self) -> Result<Url> {
        self.api("api/autodetect", &[])
    }

    /// Geocoder lookup for `address`; `None` when no API key is configured.
    ///
    /// # Errors
    ///
    /// Propagates URL parse failures.
    pub fn geocode(&self, address: &str) -> Result<Option<Url>> {
        let Some(key) = &self.geocoding_key else {
            return Ok(None);
        };
        let url = Url::parse_with_params(GEOCODE_URL, &[("address", address.trim()), ("key", key.as_str())])?;
        Ok(Some(url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::event::Category;

    fn endpoints() -> Endpoints {
        Endpoints::new("http://localhost:8080", Some("KEY".into())).unwrap()
    }

    #[test]
    fn events_url_omits_segment_for_all() {
        let mut query = SearchQuery::new(10);
        query.keyword = " taylor swift ".into();
        let url = endpoints().events(&query, 34.0522, -118.2437).unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8080/api/events?keyword=taylor+swift&lat=34.0522&lon=-118.2437&radius=10&unit=miles"
        );

        query.selected_category = Category::Sports;
        let url = endpoints().events(&query, 1.0, 2.0).unwrap();
        assert!(url.as_str().ends_with("&segmentId=KZFzniwnSyZfZ7v7nE"));
    }

    #[test]
    fn base_path_is_preserved() {
        let endpoints = Endpoints::new("https://example.com/backend", None).unwrap();
        assert_eq!(
            endpoints.suggest("R&B").unwrap().as_str(),
            "https://example.com/backend/api/suggest?keyword=R%26B"
        );
    }

    #[test]
    fn favorite_id_is_a_single_segment() {
        assert_eq!(
            endpoints().favorite("a/b c").unwrap().as_str(),
            "http://localhost:8080/api/favorites/a%2Fb%20c"
        );
        assert_eq!(endpoints().favorites().unwrap().as_str(), "http://localhost:8080/api/favorites");
    }

    #[test]
    fn geocoder_requires_key() {
        let url = endpoints().geocode("Los Angeles").unwrap().unwrap();
        assert_eq!(
            url.as_str(),
            "https://maps.googleapis.com/maps/api/geocode/json?address=Los+Angeles&key=KEY"
        );
        let keyless = Endpoints::new("http://localhost:8080", Some("  ".into())).unwrap();
        assert!(!keyless.has_geocoder());
        assert!(keyless.geocode("Paris").unwrap().is_none());
    }

    #[test]
    fn rejects_unusable_bases() {
        assert!(Endpoints::new("not a url", None).is_err());
        assert!(Endpoints::new("mailto:someone@example.com", None).is_err());
    }
}
