//! EventScout: a Zellij plugin for discovering ticketed events.
//!
//! EventScout is a terminal multiplexer plugin that provides:
//! - Keyword search with debounced autocomplete suggestions
//! - Location entry with IP autodetection and geocoder suggestions
//! - Category tabs that filter results locally without refetching
//! - Server-backed favorites with optimistic toggles and reconciliation
//! - An event details screen with artist and venue tabs
//!
//! # Architecture
//!
//! The crate follows a layered architecture pattern:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Entry point
//! │  - web_request / set_timeout / key mapping          │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling, debouncing, stale rejection      │
//! │  - Result store and favorites reconciliation        │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                                        │
//! ┌───────────────┐                       ┌───────────────┐
//! │ UI Layer      │                       │ API Layer     │
//! │ (ui/)         │                       │ (api/)        │
//! │ - Rendering   │                       │ - Endpoints   │
//! │ - Theming     │                       │ - Tagged reqs │
//! │ - Components  │                       │ - Responses   │
//! └───────────────┘                       └───────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain & Infrastructure Layers                     │
//! │  - Events, favorites, details, venues, artists      │
//! │  - JSON extraction and date/time formatting         │
//! │  - Error types, sandbox paths                       │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │  ← Optional
//! │  - OpenTelemetry tracing to a local OTLP file       │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! The plugin is configured via Zellij's plugin configuration:
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/eventscout.wasm" {
//!         backend_url "http://localhost:8080"
//!         geocoding_key "..."
//!         distance "10"
//!         theme "catppuccin-mocha"
//!         trace_level "info"
//!     }
//! }
//! ```
//!
//! # Request Flow
//!
//! 1. A key press or timer becomes an [`AppEvent`].
//! 2. [`handle_event`] mutates [`AppState`] and returns [`Action`]s.
//! 3. The shim turns `Action::Http` into `web_request`, with the request's
//!    tag serialized into the context map.
//! 4. The completion comes back as `AppEvent::HttpCompleted`; its tag is
//!    checked against the latest sequence number for its channel and stale
//!    responses are dropped.
//!
//! # Example
//!
//! ```rust
//! use eventscout::{handle_event, initialize, AppEvent, Config};
//!
//! let mut state = initialize(&Config::default())?;
//! for event in [AppEvent::OpenSearch, AppEvent::Char('j'), AppEvent::Char('a')] {
//!     let (_render, actions) = handle_event(&mut state, &event, 0)?;
//!     // Execute actions...
//!     # let _ = actions;
//! }
//! assert_eq!(state.query.keyword, "ja");
//! # Ok::<(), eventscout::EventScoutError>(())
//! ```

#![allow(clippy::multiple_crate_versions)]

pub mod api;
pub mod app;
pub mod domain;
pub mod infrastructure;

pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, AppEvent, AppState};
pub use domain::{EventScoutError, Result};
pub use ui::Theme;

use api::Endpoints;
use infrastructure::to_sandbox_path;
use std::collections::BTreeMap;

/// Backend used when `backend_url` is absent or invalid.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8080";

/// Search radius used when `distance` is absent or invalid.
pub const DEFAULT_DISTANCE_MILES: u32 = 10;

/// Plugin configuration parsed from Zellij's configuration system.
///
/// # Example
///
/// ```kdl
/// plugin location="file:/path/to/eventscout.wasm" {
///     backend_url "https://events.example.com"
///     geocoding_key "AIza..."
///     distance "25"
///     theme "catppuccin-latte"
///     theme_file "~/.config/eventscout/theme.toml"
///     trace_level "debug"
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the events backend. Default: `http://localhost:8080`
    pub backend_url: String,

    /// API key for the geocoder.
    ///
    /// Without it, location suggestions only offer "Current Location" and
    /// typed locations fall back to default coordinates.
    pub geocoding_key: Option<String>,

    /// Search radius in miles when the distance field is blank. Default: 10
    pub default_distance: u32,

    /// Built-in theme name to use.
    ///
    /// Options: `catppuccin-mocha`, `catppuccin-latte`, `catppuccin-frappe`,
    /// `catppuccin-macchiato`. Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file.
    ///
    /// Takes precedence over `theme_name`. See [`ui::theme`] for format.
    pub theme_file: Option<String>,

    /// `EnvFilter` directive for tracing. Default: `"info"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            geocoding_key: None,
            default_distance: DEFAULT_DISTANCE_MILES,
            theme_name: None,
            theme_file: None,
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses configuration from Zellij's configuration map.
    ///
    /// # Parsing Rules
    ///
    /// - `backend_url`: trimmed; blank falls back to the default
    /// - `geocoding_key`: blank is treated as absent
    /// - `distance`: positive `u32`, falls back to 10
    /// - `theme`, `theme_file`, `trace_level`: taken as given
    ///
    /// The backend URL is validated later, by [`initialize`].
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use eventscout::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("backend_url".to_string(), "https://events.example.com".to_string());
    /// map.insert("distance".to_string(), "25".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.backend_url, "https://events.example.com");
    /// assert_eq!(config.default_distance, 25);
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let non_blank = |key: &str| {
            config
                .get(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let default_distance = non_blank("distance")
            .and_then(|s| s.parse::<u32>().ok())
            .filter(|d| *d > 0)
            .unwrap_or(DEFAULT_DISTANCE_MILES);

        Self {
            backend_url: non_blank("backend_url").unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string()),
            geocoding_key: non_blank("geocoding_key"),
            default_distance,
            theme_name: non_blank("theme"),
            theme_file: non_blank("theme_file"),
            trace_level: non_blank("trace_level"),
        }
    }
}

/// Initializes the plugin with configuration.
///
/// Loads the theme (file, then name, then default) and binds the endpoint
/// table. An invalid `backend_url` is logged and replaced by the default.
///
/// # Errors
///
/// Returns an error only if the default backend URL itself is rejected.
pub fn initialize(config: &Config) -> Result<AppState> {
    tracing::debug!("initializing eventscout plugin");

    let theme = config.theme_file.as_ref().map_or_else(
        || {
            config.theme_name.as_ref().map_or_else(Theme::default, |theme_name| {
                Theme::from_name(theme_name).unwrap_or_else(|| {
                    tracing::warn!(theme_name = %theme_name, "unknown theme, using default");
                    Theme::default()
                })
            })
        },
        |theme_file| {
            Theme::from_file(to_sandbox_path(theme_file)).unwrap_or_else(|e| {
                tracing::warn!(theme_file = %theme_file, error = %e, "failed to load theme from file, using default");
                Theme::default()
            })
        },
    );

    let endpoints = match Endpoints::new(&config.backend_url, config.geocoding_key.clone()) {
        Ok(endpoints) => endpoints,
        Err(e) => {
            tracing::warn!(backend_url = %config.backend_url, error = %e, "invalid backend_url, using default");
            Endpoints::new(DEFAULT_BACKEND_URL, config.geocoding_key.clone())?
        }
    };
    tracing::info!(
        backend = %endpoints.base(),
        geocoder = endpoints.has_geocoder(),
        distance = config.default_distance,
        "eventscout configured"
    );

    Ok(AppState::new(endpoints, theme, config.default_distance))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect()
    }

    #[test]
    fn defaults_for_missing_and_bad_values() {
        let config = Config::from_zellij(&map(&[("distance", "-3"), ("geocoding_key", "  ")]));
        assert_eq!(config.backend_url, DEFAULT_BACKEND_URL);
        assert_eq!(config.default_distance, DEFAULT_DISTANCE_MILES);
        assert!(config.geocoding_key.is_none());

        let config = Config::from_zellij(&map(&[("distance", "0")]));
        assert_eq!(config.default_distance, DEFAULT_DISTANCE_MILES);
    }

    #[test]
    fn invalid_backend_falls_back() {
        let config = Config::from_zellij(&map(&[("backend_url", "not a url")]));
        let state = initialize(&config).unwrap();
        assert_eq!(state.endpoints.base().as_str(), "http://localhost:8080/");
    }

    #[test]
    fn geocoder_and_theme_are_wired() {
        let config = Config::from_zellij(&map(&[
            ("backend_url", "https://events.example.com/v1"),
            ("geocoding_key", "KEY"),
            ("theme", "catppuccin-latte"),
            ("distance", "25"),
        ]));
        let state = initialize(&config).unwrap();
        assert!(state.endpoints.has_geocoder());
        assert_eq!(state.endpoints.base().as_str(), "https://events.example.com/v1/");
        assert_eq!(state.theme.name, "catppuccin-latte");
        assert_eq!(state.default_distance, 25);
    }

    #[test]
    fn unknown_theme_uses_default() {
        let config = Config { theme_name: Some("neon".to_string()), ..Config::default() };
        assert_eq!(initialize(&config).unwrap().theme.name, "catppuccin-mocha");
    }
}
