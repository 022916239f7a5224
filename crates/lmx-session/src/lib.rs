//! Interaction controller for the text-continuation explorer.
//!
//! `ExplorerSession` owns the sentence state and is the only thing that
//! mutates it. Every user action is applied synchronously; network results
//! come back later through `receive_prediction` and are gated on the request
//! id being the latest one issued.

mod fetch;
mod navigation;
mod types;

#[cfg(test)]
mod tests;

use std::time::Instant;

use tracing::{debug, debug_span};

use lmx_core::text::has_prefix;
use lmx_core::{Debouncer, HistorySync, RequestId, RequestRaceGuard};

pub use types::{
    FetchOutcome, NavigationObserver, PredictionService, SentenceState, SessionConfig,
    TracingObserver,
};

use types::InFlight;

pub struct ExplorerSession {
    state: SentenceState,
    config: SessionConfig,

    guard: RequestRaceGuard,
    debounce: Debouncer,
    history: HistorySync,
    service: Box<dyn PredictionService>,
    observer: Option<Box<dyn NavigationObserver>>,

    /// The one request whose result may still be applied.
    in_flight: Option<InFlight>,
    /// Text came from a deep link, so the initial fetch must not push it again.
    seeded_from_url: bool,
}

impl ExplorerSession {
    /// Create a session seeded from the URL's `text` parameter, or the
    /// configured default sentence when there is none.
    pub fn new(
        config: SessionConfig,
        history: HistorySync,
        service: Box<dyn PredictionService>,
    ) -> Self {
        let deep_link = history.read_from_url();
        let seeded_from_url = deep_link.is_some();
        let text = deep_link.unwrap_or_else(|| config.default_text.clone());
        debug!(%text, seeded_from_url, "session created");
        Self {
            state: SentenceState::new(text),
            debounce: Debouncer::new(config.debounce),
            config,
            guard: RequestRaceGuard::new(),
            history,
            service,
            observer: None,
            in_flight: None,
            seeded_from_url,
        }
    }

    pub fn set_observer(&mut self, observer: Box<dyn NavigationObserver>) {
        self.observer = Some(observer);
    }

    pub fn state(&self) -> &SentenceState {
        &self.state
    }

    pub fn text(&self) -> &str {
        &self.state.text
    }

    pub fn is_loading(&self) -> bool {
        self.state.loading
    }

    pub fn has_error(&self) -> bool {
        self.state.error
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Id of the request whose result would still be applied.
    pub fn pending_request(&self) -> Option<RequestId> {
        self.in_flight.as_ref().map(|f| f.id)
    }

    pub fn debounce_deadline(&self) -> Option<Instant> {
        self.debounce.deadline()
    }

    /// Nothing outstanding: no debounced refresh and no live request.
    pub fn is_settled(&self) -> bool {
        !self.debounce.is_pending() && self.in_flight.is_none()
    }

    pub fn history(&self) -> &HistorySync {
        &self.history
    }

    /// Used by the host to subscribe to, and signal, back/forward navigation.
    pub fn history_mut(&mut self) -> &mut HistorySync {
        &mut self.history
    }

    /// Replace the sentence with typed text. Predictions refresh once typing
    /// pauses for the debounce window.
    pub fn edit_text(&mut self, text: impl Into<String>) {
        self.edit_text_at(text, Instant::now());
    }

    pub fn edit_text_at(&mut self, text: impl Into<String>, now: Instant) {
        let text = text.into();
        let _span = debug_span!("edit_text", len = text.len()).entered();
        let loading = has_prefix(&text);
        self.replace_text(text);
        self.state.loading = loading;
        self.debounce.schedule(now);
    }

    /// Fire the debounced refresh if its quiet window has elapsed.
    /// The refresh reads the text as it is now, not as it was when scheduled.
    pub fn tick(&mut self, now: Instant) -> Option<RequestId> {
        if !self.debounce.poll(now) {
            return None;
        }
        debug!("debounce fired");
        self.choose(None)
    }

    /// Set new text from a user action or navigation. Any request still in
    /// flight was for the old text, so it is invalidated along with the
    /// candidates.
    fn replace_text(&mut self, text: String) {
        self.state.text = text;
        self.state.candidates = None;
        if let Some(stale) = self.in_flight.take() {
            debug!(id = %stale.id, "in-flight request invalidated");
            self.guard.invalidate();
        }
    }
}
