//! Error types for the EventScout plugin.
//!
//! This module defines the centralized error type [`EventScoutError`] and a type alias
//! [`Result`] used throughout the plugin. Network failures, malformed bodies and
//! configuration problems all funnel through here; empty result sets and stale
//! responses are deliberately *not* errors and never reach this type.

use thiserror::Error;

/// The main error type for EventScout operations.
///
/// # Examples
///
/// ```
/// use eventscout::EventScoutError;
///
/// let err = EventScoutError::Http { status: 503, url: "http://localhost/api/events".into() };
/// assert_eq!(err.to_string(), "HTTP 503 from http://localhost/api/events");
/// ```
#[derive(Debug, Error)]
pub enum EventScoutError {
    /// The backend answered with a non-2xx status.
    #[error("HTTP {status} from {url}")]
    Http {
        /// Status code reported by the host.
        status: u16,
        /// Request URL, for logging.
        url: String,
    },

    /// The request never produced a response (offline, DNS, refused).
    #[error("Transport error: {0}")]
    Transport(String),

    /// The response body was not valid JSON.
    ///
    /// Automatically converts from `serde_json::Error`.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// An endpoint URL could not be built from the configured base.
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// The geocoder returned a status other than `OK` or `ZERO_RESULTS`.
    #[error("Geocoding error: {0}")]
    Geocoding(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Theme parsing or loading failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// A specialized `Result` type for EventScout operations.
pub type Result<T> = std::result::Result<T, EventScoutError>;
