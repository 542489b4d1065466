//! Outgoing requests and the tags that route their responses back.
//!
//! The host delivers every HTTP completion as a single event type, carrying the
//! string map the request was issued with. Each [`ApiRequest`] serializes its
//! [`RequestTag`] into that map, so the handler can tell what a response is for
//! and whether it is still current (`seq` fields) without holding callbacks.

use crate::domain::error::{EventScoutError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use url::Url;

/// Context-map key holding the serialized tag.
pub const TAG_KEY: &str = "eventscout_tag";

/// Context-map key holding the request URL, for error reporting.
pub const URL_KEY: &str = "eventscout_url";

/// HTTP verbs the backend contract needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Delete,
}

/// Why a geocoding lookup was issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GeocodePurpose {
    /// Populate the location dropdown.
    Suggestions,
    /// Resolve coordinates for a submitted search.
    Search,
}

/// Identifies what a response belongs to.
///
/// `seq` values come from per-channel counters in the application state; a
/// response whose `seq` is no longer the latest for its channel is stale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RequestTag {
    Suggest { seq: u64, query: String },
    Geocode { seq: u64, query: String, purpose: GeocodePurpose },
    Autodetect { seq: u64 },
    Search { seq: u64 },
    Favorites { seq: u64 },
    FavoriteAdd { id: String, seq: u64 },
    FavoriteRemove { id: String, seq: u64 },
    Enrich { id: String },
    Details { id: String, seq: u64 },
    Artist { seq: u64 },
    Albums { seq: u64 },
    Venue { seq: u64 },
}

impl RequestTag {
    /// Short name for logs and span fields.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Suggest { .. } => "suggest",
            Self::Geocode { .. } => "geocode",
            Self::Autodetect { .. } => "autodetect",
            Self::Search { .. } => "search",
            Self::Favorites { .. } => "favorites",
            Self::FavoriteAdd { .. } => "favorite_add",
            Self::FavoriteRemove { .. } => "favorite_remove",
            Self::Enrich { .. } => "enrich",
            Self::Details { .. } => "details",
            Self::Artist { .. } => "artist",
            Self::Albums { .. } => "albums",
            Self::Venue { .. } => "venue",
        }
    }

    /// Recovers the tag from a completion's context map.
    ///
    /// # Errors
    ///
    /// Returns `Config` when the key is missing and `Json` when it does not decode.
    pub fn from_context(context: &BTreeMap<String, String>) -> Result<Self> {
        let raw = context
            .get(TAG_KEY)
            .ok_or_else(|| EventScoutError::Config(format!("response context lacks `{TAG_KEY}`")))?;
        Ok(serde_json::from_str(raw)?)
    }
}

/// A request ready for the host's HTTP facility.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: HttpMethod,
    pub url: Url,
    pub body: Option<Value>,
    pub tag: RequestTag,
}

impl ApiRequest {
    #[must_use]
    pub const fn get(url: Url, tag: RequestTag) -> Self {
        Self { method: HttpMethod::Get, url, body: None, tag }
    }

    #[must_use]
    pub const fn post_json(url: Url, body: Value, tag: RequestTag) -> Self {
        Self { method: HttpMethod::Post, url, body: Some(body), tag }
    }

    #[must_use]
    pub const fn delete(url: Url, tag: RequestTag) -> Self {
        Self { method: HttpMethod::Delete, url, body: None, tag }
    }

    /// Request headers; JSON bodies get a content type.
    #[must_use]
    pub fn headers(&self) -> BTreeMap<String, String> {
        let mut headers = BTreeMap::new();
        headers.insert("Accept".to_string(), "application/json".to_string());
        if self.body.is_some() {
            headers.insert("Content-Type".to_string(), "application/json".to_string());
        }
        headers
    }

    /// Serialized body bytes (empty for bodiless requests).
    #[must_use]
    pub fn body_bytes(&self) -> Vec<u8> {
        self.body
            .as_ref()
            .map(|b| b.to_string().into_bytes())
            .unwrap_or_default()
    }

    /// The context map echoed back with the completion.
    ///
    /// # Errors
    ///
    /// Returns `Json` if the tag cannot be serialized.
    pub fn context(&self) -> Result<BTreeMap<String, String>> {
        let mut context = BTreeMap::new();
        context.insert(TAG_KEY.to_string(), serde_json::to_string(&self.tag)?);
        context.insert(URL_KEY.to_string(), self.url.to_string());
        Ok(context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_survives_context_round_trip() {
        let url = Url::parse("http://localhost:8080/api/suggest?keyword=par").unwrap();
        let request = ApiRequest::get(url, RequestTag::Suggest { seq: 7, query: "par".into() });
        let context = request.context().unwrap();
        assert_eq!(
            RequestTag::from_context(&context).unwrap(),
            RequestTag::Suggest { seq: 7, query: "par".into() }
        );
        assert_eq!(context[URL_KEY], "http://localhost:8080/api/suggest?keyword=par");
    }

    #[test]
    fn missing_or_garbled_tag_is_an_error() {
        assert!(RequestTag::from_context(&BTreeMap::new()).is_err());
        let mut context = BTreeMap::new();
        context.insert(TAG_KEY.to_string(), "{not json".to_string());
        assert!(RequestTag::from_context(&context).is_err());
    }

    #[test]
    fn json_body_sets_content_type() {
        let url = Url::parse("http://localhost:8080/api/favorites").unwrap();
        let post = ApiRequest::post_json(
            url.clone(),
            serde_json::json!({ "id": "E1" }),
            RequestTag::FavoriteAdd { id: "E1".into(), seq: 1 },
        );
        assert_eq!(post.headers()["Content-Type"], "application/json");
        assert_eq!(post.body_bytes(), br#"{"id":"E1"}"#.to_vec());

        let get = ApiRequest::get(url, RequestTag::Favorites { seq: 1 });
        assert!(!get.headers().contains_key("Content-Type"));
        assert!(get.body_bytes().is_empty());
    }
}
