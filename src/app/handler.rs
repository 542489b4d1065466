//! Event handling and state transition logic.
//!
//! This module implements the core event handler that processes user input,
//! timer expirations and HTTP completions, translating them into state changes
//! and action sequences. It serves as the primary control flow coordinator
//! for the application.
//!
//! # Architecture
//!
//! The handler follows a unidirectional data flow pattern:
//! 1. Events arrive from the plugin runtime (keys, timers, HTTP results)
//! 2. [`handle_event`] pattern-matches the event type
//! 3. State mutations occur via `AppState` methods
//! 4. Actions (requests, timers) are collected and returned for execution
//!
//! # Stale responses
//!
//! Every request carries a sequence number from its [`Channel`]. A completion
//! whose number is no longer the latest on its channel is dropped without
//! touching state; suggestion responses must additionally match the text
//! currently in their field.
//!
//! # Example
//!
//! ```
//! use eventscout::api::Endpoints;
//! use eventscout::app::{handle_event, AppEvent, AppState};
//! use eventscout::ui::Theme;
//!
//! let endpoints = Endpoints::new("http://localhost:8080", None)?;
//! let mut state = AppState::new(endpoints, Theme::default(), 10);
//! let (render, actions) = handle_event(&mut state, &AppEvent::Start, 0)?;
//! assert!(render);
//! assert_eq!(actions.len(), 1); // favorites load
//! # Ok::<(), eventscout::EventScoutError>(())
//! ```

use super::debounce::TimerToken;
use super::modes::{Screen, SearchField, ViewState, WidgetInput, WidgetPhase};
use super::reconcile::ToggleOutcome;
use super::sequence::Channel;
use super::state::{DetailsState, Loadable};
use crate::api::{ApiRequest, ApiResponse, GeocodePurpose, RequestTag};
use crate::app::{Action, AppState};
use crate::domain::artist::parse_albums;
use crate::domain::error::Result;
use crate::domain::event::{parse_autodetect, parse_favorites_response, parse_search_response, parse_suggestions, CURRENT_LOCATION};
use crate::domain::location::{parse_geocode, FALLBACK_COORDINATES};
use crate::domain::{ArtistProfile, Category, Event, EventDetails, Place, VenueDetails};

/// Longest distance the distance field accepts, in digits.
const MAX_DISTANCE_DIGITS: usize = 4;

/// Events triggered by user input, timers or HTTP completions.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// The plugin is ready to talk to the network.
    Start,
    /// The plugin pane became visible again.
    Resumed,

    /// Moves the list selection (or dropdown highlight) down.
    MoveDown,
    /// Moves the list selection (or dropdown highlight) up.
    MoveUp,
    /// Focuses the next search form element.
    NextField,
    /// Focuses the previous search form element.
    PrevField,
    /// Next category (search) or tab (details).
    NextTab,
    /// Previous category (search) or tab (details).
    PrevTab,
    /// Picks a suggestion, submits the search or opens details.
    Submit,
    /// Dismisses a dropdown or leaves the current screen.
    Back,
    /// Appends a character to the focused field.
    Char(char),
    /// Removes the last character from the focused field.
    Backspace,
    /// Favorites or unfavorites the selected event.
    ToggleFavorite,
    /// Opens the search screen with the keyword focused.
    OpenSearch,
    /// Reloads whatever the current screen shows.
    Refresh,
    /// Closes the floating pane and hides the plugin UI.
    CloseFocus,

    /// A scheduled timer became due.
    TimerFired(TimerToken),
    /// An HTTP request completed.
    HttpCompleted(ApiResponse),
}

impl AppEvent {
    /// Whether the event comes from the keyboard.
    #[must_use]
    pub const fn is_input(&self) -> bool {
        !matches!(
            self,
            Self::Start | Self::Resumed | Self::TimerFired(_) | Self::HttpCompleted(_)
        )
    }
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// # Parameters
///
/// * `state` - Mutable reference to application state
/// * `event` - Event to process
/// * `now_ms` - Wall clock in Unix milliseconds, used for timers and relative dates
///
/// # Returns
///
/// Whether the UI needs a re-render, and the actions to execute in sequence.
///
/// # Errors
///
/// Returns errors from URL construction or tag serialization. Network and
/// parsing failures are absorbed into state (empty lists, reverted toggles)
/// and never surface here.
#[allow(clippy::cognitive_complexity, clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &AppEvent, now_ms: u64) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = %event_name(event)).entered();

    state.set_now(now_ms);
    if event.is_input() {
        state.status = None;
    }

    match event {
        AppEvent::Start | AppEvent::Resumed => Ok((true, load_favorites(state)?)),
        AppEvent::CloseFocus => Ok((false, vec![Action::CloseFocus])),
        AppEvent::MoveDown | AppEvent::MoveUp => {
            let down = matches!(event, AppEvent::MoveDown);
            match (state.screen, state.focus) {
                (Screen::Search, SearchField::Keyword) => state.keyword.move_highlight(down),
                (Screen::Search, SearchField::Location) => state.location.move_highlight(down),
                (Screen::Search, SearchField::Distance) | (Screen::Details, _) => return Ok((false, vec![])),
                (Screen::Search, SearchField::Results) | (Screen::Home, _) => {
                    if down {
                        state.move_selection_down();
                    } else {
                        state.move_selection_up();
                    }
                }
            }
            Ok((true, vec![]))
        }
        AppEvent::NextField | AppEvent::PrevField => {
            if state.screen != Screen::Search {
                return Ok((false, vec![]));
            }
            close_dropdowns(state);
            state.focus = if matches!(event, AppEvent::NextField) {
                state.focus.next()
            } else {
                state.focus.prev()
            };
            Ok((true, vec![]))
        }
        AppEvent::NextTab | AppEvent::PrevTab => {
            let forward = matches!(event, AppEvent::NextTab);
            match state.screen {
                Screen::Search if state.focus == SearchField::Results => {
                    let current = state.store.category();
                    let category = if forward { current.next() } else { current.prev() };
                    Ok((true, select_category(state, category)?))
                }
                Screen::Details => {
                    if let Some(details) = state.details.as_mut() {
                        details.cycle_tab(forward);
                    }
                    Ok((true, vec![]))
                }
                Screen::Search | Screen::Home => Ok((false, vec![])),
            }
        }
        AppEvent::Char(c) => {
            if state.screen != Screen::Search {
                return Ok((false, vec![]));
            }
            match state.focus {
                SearchField::Keyword => {
                    state.query.keyword.push(*c);
                    Ok((true, keyword_edited(state)))
                }
                SearchField::Location => {
                    state.query.location_text.push(*c);
                    Ok((true, location_edited(state)))
                }
                SearchField::Distance => {
                    if c.is_ascii_digit() && state.distance_text.len() < MAX_DISTANCE_DIGITS {
                        state.distance_text.push(*c);
                        Ok((true, vec![]))
                    } else {
                        Ok((false, vec![]))
                    }
                }
                SearchField::Results => Ok((false, vec![])),
            }
        }
        AppEvent::Backspace => {
            if state.screen != Screen::Search {
                return Ok((false, vec![]));
            }
            match state.focus {
                SearchField::Keyword => {
                    if state.query.keyword.pop().is_none() {
                        return Ok((false, vec![]));
                    }
                    Ok((true, keyword_edited(state)))
                }
                SearchField::Location => {
                    if state.query.location_text.pop().is_none() {
                        return Ok((false, vec![]));
                    }
                    Ok((true, location_edited(state)))
                }
                SearchField::Distance => Ok((state.distance_text.pop().is_some(), vec![])),
                SearchField::Results => Ok((false, vec![])),
            }
        }
        AppEvent::Submit => match state.screen {
            Screen::Home => {
                let Some(favorite) = state.selected_favorite() else {
                    tracing::debug!("no favorite selected");
                    return Ok((false, vec![]));
                };
                let id = favorite.id.clone();
                let seed = state.store.find(&id).cloned();
                Ok((true, open_details(state, id, seed)?))
            }
            Screen::Search => match state.focus {
                SearchField::Keyword if state.keyword.highlighted_item().is_some() => {
                    pick_keyword(state);
                    Ok((true, vec![]))
                }
                SearchField::Location if state.location.highlighted_item().is_some() => {
                    pick_location(state);
                    Ok((true, vec![]))
                }
                SearchField::Results => {
                    let Some(event) = state.selected_event().cloned() else {
                        tracing::debug!("no event selected");
                        return Ok((false, vec![]));
                    };
                    Ok((true, open_details(state, event.id.clone(), Some(event))?))
                }
                SearchField::Keyword | SearchField::Location | SearchField::Distance => {
                    Ok((true, submit_search(state)?))
                }
            },
            Screen::Details => Ok((false, vec![])),
        },
        AppEvent::Back => match state.screen {
            Screen::Home => Ok((false, vec![Action::CloseFocus])),
            Screen::Search => {
                if close_dropdowns(state) {
                    return Ok((true, vec![]));
                }
                tracing::debug!("leaving search screen");
                state.screen = Screen::Home;
                Ok((true, load_favorites(state)?))
            }
            Screen::Details => {
                tracing::debug!(return_to = ?state.return_screen, "leaving details screen");
                state.screen = state.return_screen;
                state.details = None;
                for channel in [Channel::Details, Channel::Artist, Channel::Albums, Channel::Venue] {
                    state.sequencer.invalidate(channel);
                }
                state.settle_search_view();
                Ok((true, load_favorites(state)?))
            }
        },
        AppEvent::ToggleFavorite => {
            let event = match state.screen {
                Screen::Home => state
                    .selected_favorite()
                    .and_then(|f| state.store.find(&f.id))
                    .cloned(),
                Screen::Search if state.focus == SearchField::Results => state.selected_event().cloned(),
                Screen::Search => None,
                Screen::Details => state.details.as_ref().and_then(DetailsState::event),
            };
            let Some(event) = event else {
                return Ok((false, vec![]));
            };
            Ok((true, toggle_favorite(state, &event)?))
        }
        AppEvent::OpenSearch => {
            if state.screen == Screen::Details {
                return Ok((false, vec![]));
            }
            state.screen = Screen::Search;
            state.focus = SearchField::Keyword;
            state.settle_search_view();
            Ok((true, vec![]))
        }
        AppEvent::Refresh => match state.screen {
            Screen::Home => Ok((true, load_favorites(state)?)),
            Screen::Search => Ok((true, submit_search(state)?)),
            Screen::Details => {
                let Some(details) = state.details.as_ref() else {
                    return Ok((false, vec![]));
                };
                let (id, seed) = (details.event_id.clone(), details.seed.clone());
                Ok((true, open_details(state, id, seed)?))
            }
        },
        AppEvent::TimerFired(token) => handle_timer(state, *token, now_ms),
        AppEvent::HttpCompleted(response) => handle_response(state, response, now_ms),
    }
}

/// Returns a short name for an event, for spans and logs.
#[must_use]
pub const fn event_name(event: &AppEvent) -> &'static str {
    match event {
        AppEvent::Start => "Start",
        AppEvent::Resumed => "Resumed",
        AppEvent::MoveDown => "MoveDown",
        AppEvent::MoveUp => "MoveUp",
        AppEvent::NextField => "NextField",
        AppEvent::PrevField => "PrevField",
        AppEvent::NextTab => "NextTab",
        AppEvent::PrevTab => "PrevTab",
        AppEvent::Submit => "Submit",
        AppEvent::Back => "Back",
        AppEvent::Char(_) => "Char",
        AppEvent::Backspace => "Backspace",
        AppEvent::ToggleFavorite => "ToggleFavorite",
        AppEvent::OpenSearch => "OpenSearch",
        AppEvent::Refresh => "Refresh",
        AppEvent::CloseFocus => "CloseFocus",
        AppEvent::TimerFired(_) => "TimerFired",
        AppEvent::HttpCompleted(_) => "HttpCompleted",
    }
}

fn handle_timer(state: &mut AppState, token: TimerToken, now_ms: u64) -> Result<(bool, Vec<Action>)> {
    match token {
        TimerToken::KeywordSuggest { generation } => {
            if !state.keyword.debouncer.is_current(generation) || !state.keyword.apply(WidgetInput::DebounceFired) {
                return Ok((false, vec![]));
            }
            let query = state.query.keyword.trim().to_string();
            let seq = state.sequencer.issue(Channel::Suggest);
            tracing::debug!(query = %query, seq, "fetching keyword suggestions");
            let url = state.endpoints.suggest(&query)?;
            Ok((true, vec![Action::Http(ApiRequest::get(url, RequestTag::Suggest { seq, query }))]))
        }
        TimerToken::LocationSuggest { generation } => {
            if !state.location.debouncer.is_current(generation) || !state.location.apply(WidgetInput::DebounceFired) {
                return Ok((false, vec![]));
            }
            let query = state.query.location_text.trim().to_string();
            let Some(url) = state.endpoints.geocode(&query)? else {
                // Without a geocoder the only option is autodetection.
                return Ok((true, show_location_options(state, Vec::new(), now_ms)));
            };
            let seq = state.sequencer.issue(Channel::Geocode);
            state.location_indicator.start(now_ms);
            tracing::debug!(query = %query, seq, "geocoding location");
            let tag = RequestTag::Geocode { seq, query, purpose: GeocodePurpose::Suggestions };
            Ok((true, vec![Action::Http(ApiRequest::get(url, tag))]))
        }
        TimerToken::SearchingIndicator { generation } => Ok((state.location_indicator.hide(generation), vec![])),
    }
}

#[allow(clippy::too_many_lines)]
fn handle_response(state: &mut AppState, response: &ApiResponse, now_ms: u64) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("http_response",
        kind = response.tag.kind(),
        status = response.status
    )
    .entered();

    match &response.tag {
        RequestTag::Suggest { seq, query } => {
            if !state.sequencer.is_latest(Channel::Suggest, *seq) || query != state.query.keyword.trim() {
                return Ok(stale(&response.tag));
            }
            match response.json() {
                Ok(json) => {
                    let suggestions = parse_suggestions(&json);
                    if state.keyword.apply(WidgetInput::Arrived { count: suggestions.len() }) {
                        state.keyword.set_suggestions(suggestions);
                    }
                }
                Err(e) => {
                    tracing::warn!(error = %e, "keyword suggestions failed");
                    state.keyword.apply(WidgetInput::Failed);
                }
            }
            Ok((true, vec![]))
        }
        RequestTag::Geocode { seq, query, purpose: GeocodePurpose::Suggestions } => {
            if !state.sequencer.is_latest(Channel::Geocode, *seq) || query != state.query.location_text.trim() {
                return Ok(stale(&response.tag));
            }
            match response.json().and_then(|json| parse_geocode(&json)) {
                Ok(places) => Ok((true, show_location_options(state, places, now_ms))),
                Err(e) => {
                    tracing::warn!(error = %e, "location suggestions failed");
                    state.location.apply(WidgetInput::Failed);
                    Ok((true, finish_indicator(state, now_ms)))
                }
            }
        }
        RequestTag::Geocode { seq, purpose: GeocodePurpose::Search, .. } | RequestTag::Autodetect { seq } => {
            if !state.sequencer.is_latest(Channel::Locate, *seq) {
                return Ok(stale(&response.tag));
            }
            let resolved = match &response.tag {
                RequestTag::Autodetect { .. } => response
                    .json()
                    .map(|json| parse_autodetect(&json)),
                _ => response
                    .json()
                    .and_then(|json| parse_geocode(&json))
                    .map(|places| places.first().map(|p| (p.latitude, p.longitude))),
            };
            let (latitude, longitude) = match resolved {
                Ok(Some(coordinates)) => coordinates,
                Ok(None) => {
                    tracing::warn!(kind = response.tag.kind(), "no coordinates, using fallback");
                    FALLBACK_COORDINATES
                }
                Err(e) => {
                    tracing::warn!(kind = response.tag.kind(), error = %e, "location lookup failed, using fallback");
                    FALLBACK_COORDINATES
                }
            };
            state.query.latitude = Some(latitude);
            state.query.longitude = Some(longitude);
            Ok((false, vec![issue_search(state, latitude, longitude)?]))
        }
        RequestTag::Search { seq } => {
            if !state.sequencer.is_latest(Channel::Search, *seq) {
                return Ok(stale(&response.tag));
            }
            state.search_in_flight = false;
            match response.json() {
                Ok(json) => {
                    let events = parse_search_response(&json);
                    tracing::info!(count = events.len(), "search results received");
                    state.store.apply_search_results(events);
                }
                Err(e) => {
                    tracing::warn!(error = %e, "search failed");
                    state.store.clear_search_results();
                }
            }
            state.selected_index = 0;
            state.settle_search_view();
            Ok((true, load_favorites(state)?))
        }
        RequestTag::Favorites { seq } => {
            if !state.sequencer.is_latest(Channel::Favorites, *seq) {
                return Ok(stale(&response.tag));
            }
            state.favorites_in_flight = false;
            let mut actions = vec![];
            match response.json() {
                Ok(json) => {
                    let records = parse_favorites_response(&json);
                    let outcome = state.favorites.reconcile(&mut state.store, &records);
                    for id in outcome.needs_enrichment {
                        if state.enriching.insert(id.clone()) {
                            let url = state.endpoints.event_details(&id)?;
                            actions.push(Action::Http(ApiRequest::get(url, RequestTag::Enrich { id })));
                        }
                    }
                }
                Err(e) => {
                    tracing::warn!(error = %e, "favorites load failed");
                    state.store.clear_home();
                }
            }
            state.settle_home_view();
            state.settle_search_view();
            Ok((true, actions))
        }
        RequestTag::Enrich { id } => {
            state.enriching.remove(id);
            match response.json() {
                Ok(json) => {
                    let mut details = EventDetails::from_json(&json, state.now);
                    if details.id.is_empty() {
                        details.id.clone_from(id);
                    }
                    Ok((state.store.apply_enrichment(&details), vec![]))
                }
                Err(e) => {
                    tracing::warn!(event_id = %id, error = %e, "favorite enrichment failed");
                    Ok((false, vec![]))
                }
            }
        }
        RequestTag::FavoriteAdd { id, seq } | RequestTag::FavoriteRemove { id, seq } => {
            let success = match response.json() {
                Ok(_) => true,
                Err(e) => {
                    tracing::warn!(event_id = %id, error = %e, "favorite update failed");
                    false
                }
            };
            match state.favorites.complete(&mut state.store, id, *seq, success) {
                ToggleOutcome::Superseded => Ok((false, vec![])),
                ToggleOutcome::Confirmed => Ok((false, load_favorites(state)?)),
                ToggleOutcome::Reverted => {
                    state.status = Some("Could not update favorites".to_string());
                    state.settle_search_view();
                    state.settle_home_view();
                    Ok((true, vec![]))
                }
            }
        }
        RequestTag::Details { id, seq } => {
            let current = state.details.as_ref().is_some_and(|d| &d.event_id == id);
            if !current || !state.sequencer.is_latest(Channel::Details, *seq) {
                return Ok(stale(&response.tag));
            }
            let mut actions = vec![];
            let loaded = match response.json() {
                Ok(json) => {
                    let mut details = EventDetails::from_json(&json, state.now);
                    if details.id.is_empty() {
                        details.id.clone_from(id);
                    }
                    Loadable::Ready(details)
                }
                Err(e) => {
                    tracing::warn!(event_id = %id, error = %e, "event details failed");
                    Loadable::Failed(e.to_string())
                }
            };

            let (artist, venue) = match loaded.ready() {
                Some(details) => {
                    state.store.apply_enrichment(details);
                    let artist = if details.has_artist_tab() {
                        let seq = state.sequencer.issue(Channel::Artist);
                        let url = state.endpoints.artist(&details.artists[0])?;
                        actions.push(Action::Http(ApiRequest::get(url, RequestTag::Artist { seq })));
                        Loadable::Loading
                    } else {
                        Loadable::Idle
                    };
                    let venue = if details.venue_id.is_empty() {
                        Loadable::Missing
                    } else {
                        let seq = state.sequencer.issue(Channel::Venue);
                        let url = state.endpoints.venue(&details.venue_id)?;
                        actions.push(Action::Http(ApiRequest::get(url, RequestTag::Venue { seq })));
                        Loadable::Loading
                    };
                    (artist, venue)
                }
                None => (Loadable::Idle, Loadable::Missing),
            };

            if let Some(view) = state.details.as_mut() {
                view.details = loaded;
                view.artist = artist;
                view.venue = venue;
            }
            Ok((true, actions))
        }
        RequestTag::Artist { seq } => {
            if !state.sequencer.is_latest(Channel::Artist, *seq) {
                return Ok(stale(&response.tag));
            }
            let profile = match response.json() {
                Ok(json) => ArtistProfile::from_json(&json),
                Err(e) => {
                    tracing::warn!(error = %e, "artist lookup failed");
                    None
                }
            };
            let mut actions = vec![];
            if let Some(spotify_id) = profile.as_ref().and_then(ArtistProfile::spotify_id) {
                let seq = state.sequencer.issue(Channel::Albums);
                let url = state.endpoints.albums(spotify_id)?;
                actions.push(Action::Http(ApiRequest::get(url, RequestTag::Albums { seq })));
            }
            if let Some(view) = state.details.as_mut() {
                view.artist = profile.map_or(Loadable::Missing, Loadable::Ready);
            }
            Ok((true, actions))
        }
        RequestTag::Albums { seq } => {
            if !state.sequencer.is_latest(Channel::Albums, *seq) {
                return Ok(stale(&response.tag));
            }
            let albums = match response.json() {
                Ok(json) => parse_albums(&json),
                Err(e) => {
                    tracing::warn!(error = %e, "albums lookup failed");
                    vec![]
                }
            };
            if let Some(view) = state.details.as_mut() {
                view.albums = albums;
            }
            Ok((true, vec![]))
        }
        RequestTag::Venue { seq } => {
            if !state.sequencer.is_latest(Channel::Venue, *seq) {
                return Ok(stale(&response.tag));
            }
            let venue = match response.json() {
                Ok(json) => Some(VenueDetails::from_json(&json)).filter(|v| !v.name.is_empty()),
                Err(e) => {
                    tracing::warn!(error = %e, "venue lookup failed");
                    None
                }
            };
            if let Some(view) = state.details.as_mut() {
                view.venue = venue.map_or(Loadable::Missing, Loadable::Ready);
            }
            Ok((true, vec![]))
        }
    }
}

fn stale(tag: &RequestTag) -> (bool, Vec<Action>) {
    tracing::debug!(kind = tag.kind(), "stale response dropped");
    (false, vec![])
}

/// Starts a favorites fetch; reconciliation happens when it lands.
fn load_favorites(state: &mut AppState) -> Result<Vec<Action>> {
    let seq = state.sequencer.issue(Channel::Favorites);
    state.favorites_in_flight = true;
    state.settle_home_view();
    let url = state.endpoints.favorites()?;
    Ok(vec![Action::Http(ApiRequest::get(url, RequestTag::Favorites { seq }))])
}

fn keyword_edited(state: &mut AppState) -> Vec<Action> {
    state.store.set_keyword(&state.query.keyword);
    state.selected_index = 0;
    state.settle_search_view();
    state.sequencer.invalidate(Channel::Suggest);

    let empty = state.query.keyword.trim().is_empty();
    state.keyword.apply(WidgetInput::Edit { empty });
    if empty {
        state.keyword.debouncer.cancel();
        return vec![];
    }
    let generation = state.keyword.debouncer.bump();
    vec![Action::ScheduleTimer {
        token: TimerToken::KeywordSuggest { generation },
        delay_ms: state.keyword.debouncer.delay_ms(),
    }]
}

fn location_edited(state: &mut AppState) -> Vec<Action> {
    state.query.latitude = None;
    state.query.longitude = None;
    state.sequencer.invalidate(Channel::Geocode);

    let empty = state.query.location_text.trim().is_empty();
    state.location.apply(WidgetInput::Edit { empty });
    if empty {
        state.location.debouncer.cancel();
        state.location_indicator.reset();
        return vec![];
    }
    let generation = state.location.debouncer.bump();
    vec![Action::ScheduleTimer {
        token: TimerToken::LocationSuggest { generation },
        delay_ms: state.location.debouncer.delay_ms(),
    }]
}

/// Fills the location dropdown: autodetection first, then geocoder matches.
fn show_location_options(state: &mut AppState, places: Vec<Place>, now_ms: u64) -> Vec<Action> {
    let mut options = vec![CURRENT_LOCATION.to_string()];
    options.extend(places.iter().map(|p| p.label.clone()));
    if state.location.apply(WidgetInput::Arrived { count: options.len() }) {
        state.location.set_suggestions(options);
        state.location_places = places;
    }
    finish_indicator(state, now_ms)
}

/// Hides the "Searching..." indicator, or schedules its hiding once the
/// minimum display time has passed.
fn finish_indicator(state: &mut AppState, now_ms: u64) -> Vec<Action> {
    match state.location_indicator.finish(now_ms) {
        Some(remaining) => vec![Action::ScheduleTimer {
            token: TimerToken::SearchingIndicator { generation: state.location_indicator.generation() },
            delay_ms: remaining,
        }],
        None => vec![],
    }
}

fn pick_keyword(state: &mut AppState) {
    let Some(picked) = state.keyword.highlighted_item().map(String::from) else {
        return;
    };
    if !state.keyword.apply(WidgetInput::Pick) {
        return;
    }
    tracing::debug!(keyword = %picked, "keyword suggestion picked");
    state.keyword.debouncer.cancel();
    state.sequencer.invalidate(Channel::Suggest);
    state.query.keyword = picked;
    state.store.set_keyword(&state.query.keyword);
    state.settle_search_view();
}

fn pick_location(state: &mut AppState) {
    let Some(index) = state.location.highlighted else {
        return;
    };
    if !state.location.apply(WidgetInput::Pick) {
        return;
    }
    state.location.debouncer.cancel();
    state.sequencer.invalidate(Channel::Geocode);
    state.location_indicator.reset();

    match index.checked_sub(1).and_then(|i| state.location_places.get(i)) {
        Some(place) => {
            tracing::debug!(location = %place.label, "location suggestion picked");
            state.query.location_text.clone_from(&place.label);
            state.query.latitude = Some(place.latitude);
            state.query.longitude = Some(place.longitude);
        }
        None => {
            state.query.location_text = CURRENT_LOCATION.to_string();
            state.query.latitude = None;
            state.query.longitude = None;
        }
    }
    state.location_places.clear();
}

/// Closes any open or pending dropdown. Returns whether one was open.
fn close_dropdowns(state: &mut AppState) -> bool {
    let mut closed = false;
    for widget in [&mut state.keyword, &mut state.location] {
        if widget.phase != WidgetPhase::Idle {
            widget.apply(WidgetInput::Dismiss);
            widget.reset();
            closed = true;
        }
    }
    if closed {
        state.sequencer.invalidate(Channel::Suggest);
        state.sequencer.invalidate(Channel::Geocode);
        state.location_indicator.reset();
    }
    closed
}

/// Filters the held results by `category`.
///
/// Results of an `All` search cover every category and are filtered locally.
/// Results fetched for one segment do not, so switching away from that
/// segment searches again.
fn select_category(state: &mut AppState, category: Category) -> Result<Vec<Action>> {
    tracing::debug!(category = category.label(), "category selected");
    state.query.selected_category = category;
    state.store.filter_by_category(category);
    state.selected_index = 0;

    let narrowed = state
        .searched_category
        .is_some_and(|searched| searched != Category::All && searched != category);
    if narrowed && !state.query.keyword.trim().is_empty() {
        tracing::debug!(category = category.label(), "held results are segment-filtered, searching again");
        return submit_search(state);
    }
    state.settle_search_view();
    Ok(vec![])
}

/// Validates the form and starts the search, resolving coordinates first when
/// they are not known yet.
fn submit_search(state: &mut AppState) -> Result<Vec<Action>> {
    if state.query.keyword.trim().is_empty() {
        state.status = Some("Enter a keyword to search".to_string());
        return Ok(vec![]);
    }
    close_dropdowns(state);

    let distance = state
        .distance_text
        .trim()
        .parse::<u32>()
        .ok()
        .filter(|d| *d > 0)
        .unwrap_or(state.default_distance);
    state.query.distance_miles = distance;
    state.distance_text = distance.to_string();

    state.search_in_flight = true;
    state.search_view = ViewState::Loading;
    state.focus = SearchField::Results;
    state.selected_index = 0;
    state.sequencer.invalidate(Channel::Search);

    let _span = tracing::info_span!("submit_search",
        keyword = %state.query.keyword.trim(),
        location = %state.query.location_text,
        distance,
        category = state.query.selected_category.label()
    )
    .entered();

    if let Some((latitude, longitude)) = state.query.coordinates() {
        return Ok(vec![issue_search(state, latitude, longitude)?]);
    }

    if state.query.uses_current_location() {
        let seq = state.sequencer.issue(Channel::Locate);
        let url = state.endpoints.autodetect()?;
        return Ok(vec![Action::Http(ApiRequest::get(url, RequestTag::Autodetect { seq }))]);
    }

    let query = state.query.location_text.trim().to_string();
    if let Some(url) = state.endpoints.geocode(&query)? {
        let seq = state.sequencer.issue(Channel::Locate);
        let tag = RequestTag::Geocode { seq, query, purpose: GeocodePurpose::Search };
        return Ok(vec![Action::Http(ApiRequest::get(url, tag))]);
    }

    tracing::warn!(location = %query, "no geocoder configured, using fallback coordinates");
    let (latitude, longitude) = FALLBACK_COORDINATES;
    Ok(vec![issue_search(state, latitude, longitude)?])
}

fn issue_search(state: &mut AppState, latitude: f64, longitude: f64) -> Result<Action> {
    let seq = state.sequencer.issue(Channel::Search);
    state.searched_category = Some(state.query.selected_category);
    tracing::debug!(seq, latitude, longitude, "issuing event search");
    let url = state.endpoints.events(&state.query, latitude, longitude)?;
    Ok(Action::Http(ApiRequest::get(url, RequestTag::Search { seq })))
}

/// Flips the favorite optimistically and emits the matching backend request.
fn toggle_favorite(state: &mut AppState, event: &Event) -> Result<Vec<Action>> {
    let intent = state.favorites.begin_toggle(&mut state.store, event);
    let id = intent.event.id.clone();
    let request = if intent.add {
        ApiRequest::post_json(
            state.endpoints.favorites()?,
            intent.event.favorite_payload(),
            RequestTag::FavoriteAdd { id, seq: intent.seq },
        )
    } else {
        ApiRequest::delete(
            state.endpoints.favorite(&id)?,
            RequestTag::FavoriteRemove { id, seq: intent.seq },
        )
    };
    state.settle_search_view();
    state.settle_home_view();
    Ok(vec![Action::Http(request)])
}

/// Switches to the details screen and requests the event's details.
fn open_details(state: &mut AppState, id: String, seed: Option<Event>) -> Result<Vec<Action>> {
    if state.screen != Screen::Details {
        state.return_screen = state.screen;
    }
    tracing::debug!(event_id = %id, "opening details");
    state.screen = Screen::Details;
    for channel in [Channel::Artist, Channel::Albums, Channel::Venue] {
        state.sequencer.invalidate(channel);
    }
    let seq = state.sequencer.issue(Channel::Details);
    let url = state.endpoints.event_details(&id)?;
    state.details = Some(DetailsState::new(id.clone(), seed));
    Ok(vec![Action::Http(ApiRequest::get(url, RequestTag::Details { id, seq }))])
}
