//! Domain layer for the EventScout plugin.
//!
//! This module contains the core domain types and parsing rules for the
//! plugin, independent of Zellij-specific APIs. Every parser here is total over
//! its input: the backend's documents are inconsistently shaped, so missing or
//! malformed fields default to empty values instead of raising errors.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`extract`]: Fallback-chain JSON field extraction
//! - [`event`]: Search hits, favorites, categories and the search query
//! - [`details`]: Event details assembly and ticket status derivation
//! - [`venue`]: Venue records and address formatting
//! - [`artist`]: Artist profiles and albums
//! - [`location`]: Geocoder results
//! - [`format`]: Date, time, relative-age and count formatting

pub mod artist;
pub mod details;
pub mod error;
pub mod event;
pub mod extract;
pub mod format;
pub mod location;
pub mod venue;

pub use artist::{Album, ArtistProfile};
pub use details::{EventDetails, TicketStatus};
pub use error::{EventScoutError, Result};
pub use event::{Category, Event, FavoriteEvent, FavoriteRecord, SearchQuery};
pub use location::Place;
pub use venue::VenueDetails;
