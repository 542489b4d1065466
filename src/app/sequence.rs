//! Per-channel request sequence numbers for stale-response rejection.

/// A stream of requests where only the newest response matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Suggest,
    /// Geocoder lookups feeding the location dropdown.
    Geocode,
    /// Coordinate resolution for a submitted search (autodetect or geocode).
    Locate,
    Search,
    Favorites,
    Details,
    Artist,
    Albums,
    Venue,
}

impl Channel {
    const COUNT: usize = 9;

    const fn index(self) -> usize {
        self as usize
    }
}

/// Monotonic counters, one per [`Channel`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sequencer {
    latest: [u64; Channel::COUNT],
}

impl Sequencer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates the next number on `channel`, superseding earlier ones.
    pub fn issue(&mut self, channel: Channel) -> u64 {
        let slot = &mut self.latest[channel.index()];
        *slot += 1;
        *slot
    }

    /// Supersedes everything in flight on `channel` without issuing.
    pub fn invalidate(&mut self, channel: Channel) {
        self.latest[channel.index()] += 1;
    }

    #[must_use]
    pub const fn is_latest(&self, channel: Channel, seq: u64) -> bool {
        self.latest[channel.index()] == seq
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channels_are_independent() {
        let mut seq = Sequencer::new();
        let search = seq.issue(Channel::Search);
        let suggest = seq.issue(Channel::Suggest);
        seq.issue(Channel::Suggest);
        assert!(seq.is_latest(Channel::Search, search));
        assert!(!seq.is_latest(Channel::Suggest, suggest));
    }

    #[test]
    fn invalidate_rejects_in_flight() {
        let mut seq = Sequencer::new();
        let details = seq.issue(Channel::Details);
        seq.invalidate(Channel::Details);
        assert!(!seq.is_latest(Channel::Details, details));
    }
}
