//! Sequence ids for outgoing prediction requests.
//!
//! Issuing a new id immediately makes every older id stale, regardless of
//! the order in which their responses arrive.

/// Process-lifetime request sequence number. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(u64);

impl RequestId {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Default)]
pub struct RequestRaceGuard {
    latest: u64,
}

impl RequestRaceGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue the next id. Ids start at 1.
    pub fn next_id(&mut self) -> RequestId {
        self.latest += 1;
        RequestId(self.latest)
    }

    /// Whether `id` is the latest id issued.
    pub fn is_current(&self, id: RequestId) -> bool {
        self.latest != 0 && id.0 == self.latest
    }

    /// Make every issued id stale without issuing a new request.
    pub fn invalidate(&mut self) {
        self.latest += 1;
    }
}
