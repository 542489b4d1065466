//! Timers: input debouncing, the host timer queue and minimum-display windows.
//!
//! The host's timer facility only reports "a timer elapsed", with no way to say
//! which. Every timer the application wants is therefore a [`TimerToken`]
//! scheduled into a [`TimerQueue`] owned by the plugin shell; when the host
//! fires, the shell drains the tokens that are due and feeds each back as an
//! event. Tokens carry a generation so that superseded timers are recognized
//! and dropped instead of being cancelled.

use std::fmt;

/// Quiet period after the last keyword keystroke before suggestions are fetched.
pub const KEYWORD_DEBOUNCE_MS: u64 = 250;

/// Quiet period after the last location keystroke before geocoding.
pub const LOCATION_DEBOUNCE_MS: u64 = 250;

/// Minimum time the location "Searching..." indicator stays visible.
pub const MIN_SEARCHING_DISPLAY_MS: u64 = 1500;

/// Host timers may fire marginally early relative to our clock readings.
const TIMER_SLACK_MS: u64 = 5;

/// Identifies what a timer was scheduled for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerToken {
    /// Keyword suggestion debounce.
    KeywordSuggest { generation: u64 },
    /// Location suggestion debounce.
    LocationSuggest { generation: u64 },
    /// End of the location indicator's minimum display window.
    SearchingIndicator { generation: u64 },
}

impl fmt::Display for TimerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::KeywordSuggest { generation } => write!(f, "keyword_suggest#{generation}"),
            Self::LocationSuggest { generation } => write!(f, "location_suggest#{generation}"),
            Self::SearchingIndicator { generation } => write!(f, "searching_indicator#{generation}"),
        }
    }
}

/// Trailing-edge debouncer.
///
/// Each input bumps the generation; only a timer carrying the latest
/// generation is allowed to act. Bumping without scheduling cancels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Debouncer {
    delay_ms: u64,
    generation: u64,
}

impl Debouncer {
    #[must_use]
    pub const fn new(delay_ms: u64) -> Self {
        Self { delay_ms, generation: 0 }
    }

    #[must_use]
    pub const fn delay_ms(&self) -> u64 {
        self.delay_ms
    }

    /// Registers an input and returns the generation its timer must carry.
    pub fn bump(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    /// Invalidates any timer already scheduled.
    pub fn cancel(&mut self) {
        self.generation += 1;
    }

    /// Whether a timer with `generation` is still the latest.
    #[must_use]
    pub const fn is_current(&self, generation: u64) -> bool {
        self.generation == generation
    }
}

/// Pending timers keyed by their due instant in milliseconds.
#[derive(Debug, Clone, Default)]
pub struct TimerQueue {
    entries: Vec<(u64, TimerToken)>,
}

impl TimerQueue {
    #[must_use]
    pub const fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Queues `token` to fire `delay_ms` after `now_ms`.
    ///
    /// # Returns
    ///
    /// The delay in seconds, ready to hand to the host timer.
    #[allow(clippy::cast_precision_loss)]
    pub fn schedule(&mut self, token: TimerToken, now_ms: u64, delay_ms: u64) -> f64 {
        self.entries.push((now_ms.saturating_add(delay_ms), token));
        delay_ms as f64 / 1000.0
    }

    /// Removes and returns every token due at `now_ms`, earliest first.
    pub fn drain_due(&mut self, now_ms: u64) -> Vec<TimerToken> {
        let horizon = now_ms.saturating_add(TIMER_SLACK_MS);
        let (mut due, pending): (Vec<_>, Vec<_>) =
            self.entries.drain(..).partition(|(at, _)| *at <= horizon);
        self.entries = pending;
        due.sort_by_key(|(at, _)| *at);
        due.into_iter().map(|(_, token)| token).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A visibility window that, once opened, stays open for a minimum duration.
///
/// `finish` reports how long the caller must still wait before hiding; the
/// caller schedules a [`TimerToken::SearchingIndicator`] for that delay and
/// hides on its arrival if the generation still matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MinDisplay {
    min_ms: u64,
    started_at: Option<u64>,
    generation: u64,
}

impl MinDisplay {
    #[must_use]
    pub const fn new(min_ms: u64) -> Self {
        Self { min_ms, started_at: None, generation: 0 }
    }

    /// Opens (or restarts) the window at `now_ms`.
    pub fn start(&mut self, now_ms: u64) -> u64 {
        self.started_at = Some(now_ms);
        self.generation += 1;
        self.generation
    }

    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.started_at.is_some()
    }

    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Requests that the window close at `now_ms`.
    ///
    /// Closes immediately and returns `None` once the minimum has elapsed;
    /// otherwise returns the remaining milliseconds and leaves it open.
    pub fn finish(&mut self, now_ms: u64) -> Option<u64> {
        let started = self.started_at?;
        let elapsed = now_ms.saturating_sub(started);
        if elapsed >= self.min_ms {
            self.started_at = None;
            None
        } else {
            Some(self.min_ms - elapsed)
        }
    }

    /// Closes the window if `generation` is still the latest start.
    pub fn hide(&mut self, generation: u64) -> bool {
        if generation == self.generation && self.started_at.is_some() {
            self.started_at = None;
            true
        } else {
            false
        }
    }

    /// Closes the window unconditionally.
    pub fn reset(&mut self) {
        self.started_at = None;
        self.generation += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_latest_generation_is_current() {
        let mut debouncer = Debouncer::new(KEYWORD_DEBOUNCE_MS);
        let first = debouncer.bump();
        let second = debouncer.bump();
        assert!(!debouncer.is_current(first));
        assert!(debouncer.is_current(second));
        debouncer.cancel();
        assert!(!debouncer.is_current(second));
    }

    #[test]
    fn burst_yields_one_live_timer() {
        // "p", "pa", "par" typed 100ms apart: three timers, one survivor.
        let mut debouncer = Debouncer::new(KEYWORD_DEBOUNCE_MS);
        let mut queue = TimerQueue::new();
        for (i, now) in [0_u64, 100, 200].into_iter().enumerate() {
            let generation = debouncer.bump();
            assert_eq!(generation, i as u64 + 1);
            queue.schedule(TimerToken::KeywordSuggest { generation }, now, debouncer.delay_ms());
        }

        let live: Vec<_> = queue
            .drain_due(450)
            .into_iter()
            .filter(|t| matches!(t, TimerToken::KeywordSuggest { generation } if debouncer.is_current(*generation)))
            .collect();
        assert_eq!(live, vec![TimerToken::KeywordSuggest { generation: 3 }]);
        assert!(queue.is_empty());
    }

    #[test]
    fn drain_keeps_future_timers() {
        let mut queue = TimerQueue::new();
        let secs = queue.schedule(TimerToken::LocationSuggest { generation: 1 }, 1_000, 250);
        assert!((secs - 0.25).abs() < f64::EPSILON);
        queue.schedule(TimerToken::SearchingIndicator { generation: 1 }, 1_000, 1_500);

        assert!(queue.drain_due(1_100).is_empty());
        assert_eq!(queue.drain_due(1_248), vec![TimerToken::LocationSuggest { generation: 1 }]);
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn indicator_honors_minimum_window() {
        let mut indicator = MinDisplay::new(MIN_SEARCHING_DISPLAY_MS);
        let generation = indicator.start(10_000);
        assert!(indicator.is_visible());

        assert_eq!(indicator.finish(10_400), Some(1_100));
        assert!(indicator.is_visible());
        assert!(indicator.hide(generation));
        assert!(!indicator.is_visible());

        indicator.start(20_000);
        assert_eq!(indicator.finish(21_600), None);
        assert!(!indicator.is_visible());
    }

    #[test]
    fn restarted_indicator_ignores_old_hide() {
        let mut indicator = MinDisplay::new(MIN_SEARCHING_DISPLAY_MS);
        let old = indicator.start(0);
        let _new = indicator.start(1_000);
        assert!(!indicator.hide(old));
        assert!(indicator.is_visible());
    }
}
