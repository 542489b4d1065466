//! Actions representing side effects to be executed by the plugin runtime.
//!
//! This module defines the [`Action`] type, which represents imperative commands
//! produced by the event handler after processing user input, timers or HTTP
//! completions. Actions bridge pure state transformations and effectful
//! operations like network requests and host timers.
//!
//! # Architecture
//!
//! The event handler returns a `Vec<Action>` after processing each event, allowing
//! multiple side effects to be queued atomically. The plugin runtime executes
//! these actions in sequence.
//!
//! # Example
//!
//! ```
//! use eventscout::app::debounce::TimerToken;
//! use eventscout::app::Action;
//!
//! let actions = vec![Action::ScheduleTimer {
//!     token: TimerToken::KeywordSuggest { generation: 1 },
//!     delay_ms: 250,
//! }];
//! assert_eq!(actions.len(), 1);
//! ```

use super::debounce::TimerToken;
use crate::api::ApiRequest;

/// Commands representing side effects to be executed by the plugin runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Closes the focused floating pane, hiding the plugin UI.
    CloseFocus,

    /// Issues an HTTP request through the host.
    ///
    /// The completion comes back as an HTTP event whose context carries the
    /// request's tag.
    Http(ApiRequest),

    /// Arms a host timer.
    ScheduleTimer {
        /// What the timer is for; fed back as a timer event when due.
        token: TimerToken,
        /// Delay in milliseconds.
        delay_ms: u64,
    },
}
