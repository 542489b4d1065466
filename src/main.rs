//! Zellij plugin wrapper and entry point.
//!
//! This module is the thin integration layer between the EventScout library
//! and the Zellij plugin system. It implements `ZellijPlugin`, translates
//! host events into [`AppEvent`]s and executes the returned [`Action`]s.
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: Parse config, initialize tracing, create `AppState`
//! 2. **Subscribe**: Register for Key, `WebRequestResult`, `Timer`, `Visible` events
//! 3. **Start**: Once `WebAccess` is granted, load favorites
//! 4. **Update**: Handle events, delegate to library layer
//! 5. **Render**: Call library render function
//!
//! # Host Effects
//!
//! - `Action::Http` → `web_request`, with the request tag in the context map
//! - `Action::ScheduleTimer` → `set_timeout`; the token waits in a [`TimerQueue`]
//!   until a `Timer` event finds it due
//! - `Action::CloseFocus` → `hide_self`
//!
//! # Keybindings
//!
//! Global:
//! - `Ctrl+n`/`Down`: Move down
//! - `Ctrl+p`/`Up`: Move up
//! - `Tab`/`Shift+Tab`: Next/previous search field
//! - `Left`/`Right`: Previous/next category or details tab
//! - `Enter`: Pick suggestion, search, or open details
//! - `Esc`: Dismiss dropdown or go back
//!
//! Outside text fields:
//! - `j`/`k`: Move down/up
//! - `h`/`l`: Previous/next category or details tab
//! - `f`: Toggle favorite
//! - `/`: Open search
//! - `r`: Refresh
//! - `q`: Close plugin
//!
//! In text fields every printable key is typed.

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use std::time::{SystemTime, UNIX_EPOCH};
use zellij_tile::prelude::*;

use eventscout::api::{ApiRequest, ApiResponse, HttpMethod};
use eventscout::app::TimerQueue;
use eventscout::{handle_event, Action, AppEvent, AppState, Config};

register_plugin!(State);

/// Plugin state wrapper.
///
/// Wraps the library's `AppState` with Zellij-specific concerns: host timers
/// and permission tracking.
#[derive(Default)]
struct State {
    /// Core application state; `None` until `load` runs.
    app: Option<AppState>,

    /// Tokens waiting on host timers.
    timers: TimerQueue,

    /// `WebAccess` has been granted and favorites were requested.
    started: bool,
}

impl ZellijPlugin for State {
    /// Initializes the plugin on load.
    ///
    /// # Permissions
    ///
    /// - `WebAccess`: Backend and geocoder requests
    /// - `ChangeApplicationState`: Hiding the plugin pane
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        eventscout::observability::init_tracing(&config);

        let span = tracing::debug_span!("plugin_load");
        let _guard = span.entered();

        tracing::debug!(backend_url = %config.backend_url, "parsed configuration");
        match eventscout::initialize(&config) {
            Ok(app) => self.app = Some(app),
            Err(e) => tracing::error!(error = %e, "failed to initialize app state"),
        }

        request_permission(&[
            PermissionType::WebAccess,
            PermissionType::ChangeApplicationState,
        ]);

        subscribe(&[
            EventType::Key,
            EventType::WebRequestResult,
            EventType::Timer,
            EventType::Visible,
            EventType::PermissionRequestResult,
        ]);

        tracing::debug!("plugin load complete - waiting for permissions");
    }

    /// Handles incoming Zellij events.
    ///
    /// Returns `true` if the UI should re-render.
    fn update(&mut self, event: Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let span = tracing::debug_span!("plugin_update_event", event_type = %event_name);
        let _guard = span.entered();

        let now_ms = now_ms();
        let our_events = match event {
            Event::Key(ref key) => match self.map_key_event(key) {
                Some(event) => vec![event],
                None => return false,
            },
            Event::WebRequestResult(status, _headers, body, context) => {
                match ApiResponse::from_host(status, body, &context) {
                    Ok(response) => vec![AppEvent::HttpCompleted(response)],
                    Err(e) => {
                        tracing::warn!(status, error = %e, "dropping untagged web response");
                        return false;
                    }
                }
            }
            Event::Timer(_elapsed) => self
                .timers
                .drain_due(now_ms)
                .into_iter()
                .map(AppEvent::TimerFired)
                .collect(),
            Event::Visible(true) if self.started => vec![AppEvent::Resumed],
            Event::PermissionRequestResult(status) => match self.handle_permission_result(status) {
                Some(event) => vec![event],
                None => return true,
            },
            _ => return false,
        };

        let mut should_render = false;
        for our_event in &our_events {
            should_render |= self.dispatch(our_event, now_ms);
        }
        should_render
    }

    /// Renders the plugin UI.
    fn render(&mut self, rows: usize, cols: usize) {
        if let Some(app) = &self.app {
            eventscout::ui::render(app, rows, cols);
        }
    }
}

impl State {
    /// Runs one event through the library and executes its actions.
    ///
    /// Requests the host never received come back as transport failures and
    /// are handled before returning.
    fn dispatch(&mut self, event: &AppEvent, now_ms: u64) -> bool {
        let mut pending = vec![event.clone()];
        let mut should_render = false;
        while let Some(event) = pending.pop() {
            let Some(app) = self.app.as_mut() else {
                return false;
            };
            match handle_event(app, &event, now_ms) {
                Ok((render, actions)) => {
                    tracing::debug!(
                        event = eventscout::app::handler::event_name(&event),
                        action_count = actions.len(),
                        should_render = render,
                        "event handled successfully"
                    );
                    should_render |= render;
                    for action in &actions {
                        pending.extend(self.execute_action(action, now_ms));
                    }
                }
                Err(e) => tracing::warn!(error = %e, "error handling event"),
            }
        }
        should_render
    }

    /// Gets a string name for a Zellij event for logging purposes.
    fn get_event_name(event: &Event) -> String {
        match event {
            Event::Key(key) => format!("Key({:?})", key.bare_key),
            Event::WebRequestResult(status, ..) => format!("WebRequestResult({status})"),
            Event::Timer(..) => "Timer".to_string(),
            Event::Visible(visible) => format!("Visible({visible})"),
            Event::PermissionRequestResult(..) => "PermissionRequestResult".to_string(),
            _ => "Other".to_string(),
        }
    }

    /// Maps keyboard events to application events.
    fn map_key_event(&self, key: &KeyWithModifier) -> Option<AppEvent> {
        tracing::debug!(bare_key = ?key.bare_key, "key event");
        let typing = self.app.as_ref().is_some_and(AppState::is_typing);

        if key.has_modifiers(&[KeyModifier::Ctrl]) {
            return match key.bare_key {
                BareKey::Char('n') => Some(AppEvent::MoveDown),
                BareKey::Char('p') => Some(AppEvent::MoveUp),
                _ => None,
            };
        }

        Some(match key.bare_key {
            BareKey::Down => AppEvent::MoveDown,
            BareKey::Up => AppEvent::MoveUp,
            BareKey::Tab if key.has_modifiers(&[KeyModifier::Shift]) => AppEvent::PrevField,
            BareKey::Tab => AppEvent::NextField,
            BareKey::Left => AppEvent::PrevTab,
            BareKey::Right => AppEvent::NextTab,
            BareKey::Enter => AppEvent::Submit,
            BareKey::Esc => AppEvent::Back,
            BareKey::Backspace => AppEvent::Backspace,
            BareKey::Char(c) if typing => AppEvent::Char(c),
            BareKey::Char('j') => AppEvent::MoveDown,
            BareKey::Char('k') => AppEvent::MoveUp,
            BareKey::Char('h') => AppEvent::PrevTab,
            BareKey::Char('l') => AppEvent::NextTab,
            BareKey::Char('f') => AppEvent::ToggleFavorite,
            BareKey::Char('/') => AppEvent::OpenSearch,
            BareKey::Char('r') => AppEvent::Refresh,
            BareKey::Char('q') => AppEvent::CloseFocus,
            _ => return None,
        })
    }

    /// Handles permission request results.
    ///
    /// Returns the start event on the first grant.
    fn handle_permission_result(&mut self, status: PermissionStatus) -> Option<AppEvent> {
        match status {
            PermissionStatus::Granted => {
                tracing::debug!("permissions granted - loading favorites");
                if self.started {
                    return None;
                }
                self.started = true;
                Some(AppEvent::Start)
            }
            PermissionStatus::Denied => {
                tracing::warn!("permissions denied - plugin cannot reach the backend");
                if let Some(app) = self.app.as_mut() {
                    app.status = Some("Web access denied".to_string());
                }
                None
            }
        }
    }

    /// Executes an action returned from event handling.
    ///
    /// Returns the completion of a request that could not be sent.
    #[tracing::instrument(level = "debug", skip(self))]
    fn execute_action(&mut self, action: &Action, now_ms: u64) -> Option<AppEvent> {
        match action {
            Action::CloseFocus => {
                tracing::debug!("closing plugin focus");
                hide_self();
            }
            Action::Http(request) => {
                if let Err(e) = Self::send_request(request) {
                    tracing::warn!(url = %request.url, error = %e, "failed to tag request");
                    let failure = ApiResponse::transport_failure(request, &e.to_string());
                    return Some(AppEvent::HttpCompleted(failure));
                }
            }
            Action::ScheduleTimer { token, delay_ms } => {
                let secs = self.timers.schedule(*token, now_ms, *delay_ms);
                set_timeout(secs);
            }
        }
        None
    }

    /// Hands a request to the host; the completion arrives as `WebRequestResult`.
    fn send_request(request: &ApiRequest) -> eventscout::Result<()> {
        let context = request.context()?;
        let verb = match request.method {
            HttpMethod::Get => HttpVerb::Get,
            HttpMethod::Post => HttpVerb::Post,
            HttpMethod::Delete => HttpVerb::Delete,
        };
        tracing::debug!(method = ?request.method, url = %request.url, "sending web request");
        web_request(
            request.url.as_str(),
            verb,
            request.headers(),
            request.body_bytes(),
            context,
        );
        Ok(())
    }
}

/// Wall clock in Unix milliseconds.
fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
}
