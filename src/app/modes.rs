//! Screen, focus and widget state machines.
//!
//! These types determine which keybindings are active and how input is routed.
//! The text widgets (keyword and location) each run an explicit
//! [`WidgetPhase`] machine: stray events such as a late debounce tick or a pick
//! with no dropdown open are rejected by [`WidgetPhase::transition`] rather
//! than guarded by ad-hoc flags.
//!
//! ```text
//!            edit                fire              arrived(n>0)
//!   Idle ──────────▶ Editing ──────────▶ Suggesting ──────────▶ Selecting
//!    ▲                 ▲  │ edit(empty)     │ arrived(0)/failed    │ pick/dismiss
//!    └─────────────────┼──┴─────────────────┴──────────────────────┘
//!                      └───────────── edit (from Suggesting/Selecting)
//! ```

/// Top-level screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    /// Favorites list, newest added first.
    #[default]
    Home,
    /// Search form and results.
    Search,
    /// Details of one event.
    Details,
}

/// Focused element on the search screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchField {
    #[default]
    Keyword,
    Location,
    Distance,
    Results,
}

impl SearchField {
    /// Tab order.
    const ORDER: [Self; 4] = [Self::Keyword, Self::Location, Self::Distance, Self::Results];

    #[must_use]
    pub fn next(self) -> Self {
        let idx = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(idx + 1) % Self::ORDER.len()]
    }

    #[must_use]
    pub fn prev(self) -> Self {
        let idx = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(idx + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }

    /// Whether printable keys edit text in this field.
    #[must_use]
    pub const fn is_text(self) -> bool {
        matches!(self, Self::Keyword | Self::Location | Self::Distance)
    }
}

/// Tab on the details screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DetailsTab {
    #[default]
    Details,
    Artist,
    Venue,
}

impl DetailsTab {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Details => "Details",
            Self::Artist => "Artist",
            Self::Venue => "Venue",
        }
    }

    /// Tabs available for an event; the artist tab only exists for music.
    #[must_use]
    pub fn available(with_artist: bool) -> Vec<Self> {
        if with_artist {
            vec![Self::Details, Self::Artist, Self::Venue]
        } else {
            vec![Self::Details, Self::Venue]
        }
    }
}

/// List rendering state driven by the fetch lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewState {
    /// A fetch feeding this list is in flight.
    Loading,
    /// The projection has rows.
    Results,
    /// The projection is empty, or the last fetch failed.
    #[default]
    Empty,
}

impl ViewState {
    /// State after a mutation that did not start a fetch.
    #[must_use]
    pub const fn settle(in_flight: bool, has_rows: bool) -> Self {
        if in_flight {
            Self::Loading
        } else if has_rows {
            Self::Results
        } else {
            Self::Empty
        }
    }
}

/// Lifecycle of a text widget with a suggestion dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WidgetPhase {
    /// Nothing pending, dropdown closed.
    #[default]
    Idle,
    /// Text changed, debounce timer running.
    Editing,
    /// Suggestion request in flight.
    Suggesting,
    /// Dropdown open, user can pick.
    Selecting,
}

/// Inputs accepted by [`WidgetPhase::transition`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetInput {
    /// Text edited; `empty` when the field is now blank.
    Edit { empty: bool },
    /// The debounce timer for the current text fired.
    DebounceFired,
    /// Suggestions for the current text arrived.
    Arrived { count: usize },
    /// The suggestion request failed.
    Failed,
    /// A suggestion was chosen.
    Pick,
    /// Dropdown dismissed without choosing.
    Dismiss,
}

impl WidgetPhase {
    /// Next phase, or `None` when `input` is not valid in this phase.
    ///
    /// # Examples
    ///
    /// ```
    /// use eventscout::app::modes::{WidgetInput, WidgetPhase};
    ///
    /// let phase = WidgetPhase::Idle.transition(WidgetInput::Edit { empty: false });
    /// assert_eq!(phase, Some(WidgetPhase::Editing));
    /// assert_eq!(WidgetPhase::Idle.transition(WidgetInput::Pick), None);
    /// ```
    #[must_use]
    pub const fn transition(self, input: WidgetInput) -> Option<Self> {
        use WidgetInput as I;
        match (self, input) {
            (_, I::Edit { empty: true }) => Some(Self::Idle),
            (_, I::Edit { empty: false }) => Some(Self::Editing),
            (Self::Editing, I::DebounceFired) => Some(Self::Suggesting),
            (Self::Suggesting, I::Arrived { count: 0 } | I::Failed) => Some(Self::Idle),
            (Self::Suggesting, I::Arrived { .. }) => Some(Self::Selecting),
            (Self::Selecting, I::Pick | I::Dismiss) => Some(Self::Idle),
            (Self::Editing | Self::Suggesting, I::Dismiss) => Some(Self::Idle),
            _ => None,
        }
    }

    /// Whether the dropdown should be drawn.
    #[must_use]
    pub const fn shows_dropdown(self) -> bool {
        matches!(self, Self::Suggesting | Self::Selecting)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn happy_path_round_trip() {
        let phase = WidgetPhase::Idle;
        let phase = phase.transition(WidgetInput::Edit { empty: false }).unwrap();
        let phase = phase.transition(WidgetInput::DebounceFired).unwrap();
        let phase = phase.transition(WidgetInput::Arrived { count: 3 }).unwrap();
        assert_eq!(phase, WidgetPhase::Selecting);
        assert_eq!(phase.transition(WidgetInput::Pick), Some(WidgetPhase::Idle));
    }

    #[test]
    fn edits_supersede_in_flight_rounds() {
        assert_eq!(
            WidgetPhase::Suggesting.transition(WidgetInput::Edit { empty: false }),
            Some(WidgetPhase::Editing)
        );
        assert_eq!(
            WidgetPhase::Selecting.transition(WidgetInput::Edit { empty: true }),
            Some(WidgetPhase::Idle)
        );
    }

    #[test]
    fn stray_inputs_are_rejected() {
        assert_eq!(WidgetPhase::Idle.transition(WidgetInput::DebounceFired), None);
        assert_eq!(WidgetPhase::Editing.transition(WidgetInput::Arrived { count: 2 }), None);
        assert_eq!(WidgetPhase::Suggesting.transition(WidgetInput::Pick), None);
        assert_eq!(WidgetPhase::Idle.transition(WidgetInput::Dismiss), None);
    }

    #[test]
    fn empty_or_failed_round_closes() {
        assert_eq!(WidgetPhase::Suggesting.transition(WidgetInput::Arrived { count: 0 }), Some(WidgetPhase::Idle));
        assert_eq!(WidgetPhase::Suggesting.transition(WidgetInput::Failed), Some(WidgetPhase::Idle));
    }

    #[test]
    fn field_cycle_wraps() {
        assert_eq!(SearchField::Results.next(), SearchField::Keyword);
        assert_eq!(SearchField::Keyword.prev(), SearchField::Results);
        assert!(!SearchField::Results.is_text());
    }

    #[test]
    fn settle_prefers_loading_while_in_flight() {
        assert_eq!(ViewState::settle(true, true), ViewState::Loading);
        assert_eq!(ViewState::settle(false, true), ViewState::Results);
        assert_eq!(ViewState::settle(false, false), ViewState::Empty);
    }
}
