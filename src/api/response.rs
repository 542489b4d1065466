//! Decoding of HTTP completions delivered by the host.

use super::request::{ApiRequest, RequestTag, URL_KEY};
use crate::domain::error::{EventScoutError, Result};
use serde_json::Value;
use std::collections::BTreeMap;

/// A completed request as reported by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Vec<u8>,
    pub tag: RequestTag,
    pub url: String,
}

impl ApiResponse {
    /// Pairs a raw completion with its tag.
    ///
    /// # Errors
    ///
    /// Fails when the context map carries no decodable tag.
    pub fn from_host(status: u16, body: Vec<u8>, context: &BTreeMap<String, String>) -> Result<Self> {
        Ok(Self {
            status,
            body,
            tag: RequestTag::from_context(context)?,
            url: context.get(URL_KEY).cloned().unwrap_or_default(),
        })
    }

    /// A completion for a request that never reached the host.
    ///
    /// Decodes as [`EventScoutError::Transport`], so the request's channel
    /// settles exactly as it would after a network failure.
    #[must_use]
    pub fn transport_failure(request: &ApiRequest, reason: &str) -> Self {
        Self {
            status: 0,
            body: reason.as_bytes().to_vec(),
            tag: request.tag.clone(),
            url: request.url.to_string(),
        }
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// The body as JSON.
    ///
    /// An empty 2xx body decodes as `null`, which every parser treats as
    /// "nothing there".
    ///
    /// # Errors
    ///
    /// - `Transport` for status 0 (the host could not reach the server)
    /// - `Http` for any other non-2xx status
    /// - `Json` for a body that is not JSON
    pub fn json(&self) -> Result<Value> {
        if self.status == 0 {
            return Err(EventScoutError::Transport(
                String::from_utf8_lossy(&self.body).into_owned(),
            ));
        }
        if !self.is_success() {
            return Err(EventScoutError::Http { status: self.status, url: self.url.clone() });
        }
        if self.body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_slice(&self.body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16, body: &str) -> ApiResponse {
        ApiResponse {
            status,
            body: body.as_bytes().to_vec(),
            tag: RequestTag::Favorites { seq: 1 },
            url: "http://localhost:8080/api/favorites".into(),
        }
    }

    #[test]
    fn success_decodes_json() {
        assert_eq!(response(200, r#"[{"id":"E1"}]"#).json().unwrap()[0]["id"], "E1");
        assert_eq!(response(204, "").json().unwrap(), Value::Null);
    }

    #[test]
    fn failures_map_to_taxonomy() {
        assert!(matches!(response(500, "oops").json(), Err(EventScoutError::Http { status: 500, .. })));
        assert!(matches!(response(0, "connection refused").json(), Err(EventScoutError::Transport(_))));
        assert!(matches!(response(200, "<html>").json(), Err(EventScoutError::Json(_))));
    }
}
