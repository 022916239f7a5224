//! Trailing-edge debouncer driven by explicit timestamps.
//!
//! The debouncer holds a single resettable deadline. Callers report the
//! current time through [`Debouncer::poll`]; the pending action fires once
//! when the deadline has passed with no intervening [`Debouncer::schedule`].
//! The action itself is not stored: whoever polls re-derives its input from
//! current state at fire time.

use std::time::{Duration, Instant};

#[derive(Debug)]
pub struct Debouncer {
    window: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            deadline: None,
        }
    }

    /// (Re)start the quiet window. A pending fire is replaced, not run.
    pub fn schedule(&mut self, now: Instant) {
        self.deadline = Some(now + self.window);
    }

    /// Returns true exactly once per quiet window that has elapsed.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Drop the pending fire, if any.
    pub fn clear(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }
}
