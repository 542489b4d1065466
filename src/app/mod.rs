//! Application layer coordinating state, events, and actions.
//!
//! This module defines the core application logic layer, sitting between the
//! plugin runtime (main.rs) and the domain/api layers. It implements the
//! event-driven architecture that powers the interactive UI.
//!
//! # Architecture
//!
//! The application layer follows a unidirectional data flow pattern:
//!
//! ```text
//! User Input → Events → Event Handler → State Mutations → Actions → Side Effects
//!                           ↑                                  ↓
//!                           └──── HTTP completions, timers ────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`debounce`]: Debouncers, the timer queue and minimum-display windows
//! - [`handler`]: Event processing logic and state transition coordinator
//! - [`modes`]: Screen, focus and suggestion-widget state machine types
//! - [`reconcile`]: Optimistic favorite toggles and server reconciliation
//! - [`sequence`]: Per-channel sequence numbers for stale-response rejection
//! - [`state`]: Central application state container and view model computation
//! - [`store`]: Search results, favorites and the filtered projection
//!
//! # Example
//!
//! ```rust
//! use eventscout::api::Endpoints;
//! use eventscout::app::{handle_event, AppEvent, AppState};
//! use eventscout::ui::Theme;
//!
//! let endpoints = Endpoints::new("http://localhost:8080", None)?;
//! let mut state = AppState::new(endpoints, Theme::default(), 10);
//! let (_render, actions) = handle_event(&mut state, &AppEvent::OpenSearch, 0)?;
//! assert!(actions.is_empty());
//! # Ok::<(), eventscout::EventScoutError>(())
//! ```

pub mod actions;
pub mod debounce;
pub mod handler;
pub mod modes;
pub mod reconcile;
pub mod sequence;
pub mod state;
pub mod store;

pub use actions::Action;
pub use debounce::{TimerQueue, TimerToken};
pub use handler::{handle_event, AppEvent};
pub use modes::{DetailsTab, Screen, SearchField, ViewState};
pub use state::AppState;
