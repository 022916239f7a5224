use std::time::Duration;

use lmx_core::settings::Settings;
use lmx_core::{Candidate, PredictionRequest, RequestId, DEFAULT_TEXT};

/// Visible sentence state, read by the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub struct SentenceState {
    pub text: String,
    /// Only meaningful while `loading` is false. Cleared whenever the text
    /// changes, until a fresh response arrives.
    pub candidates: Option<Vec<Candidate>>,
    pub loading: bool,
    pub error: bool,
}

impl SentenceState {
    pub(crate) fn new(text: String) -> Self {
        Self {
            text,
            candidates: None,
            loading: false,
            error: false,
        }
    }

    /// Candidates to render, hidden while a request is outstanding.
    pub fn visible_candidates(&self) -> &[Candidate] {
        match (&self.candidates, self.loading) {
            (Some(c), false) => c,
            _ => &[],
        }
    }
}

#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub debounce: Duration,
    pub default_text: String,
    pub top_k: Option<u32>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(1000),
            default_text: DEFAULT_TEXT.to_string(),
            top_k: None,
        }
    }
}

impl From<&Settings> for SessionConfig {
    fn from(s: &Settings) -> Self {
        Self {
            debounce: s.session.debounce(),
            default_text: s.session.default_text.clone(),
            top_k: s.prediction.top_k,
        }
    }
}

/// What happened to a completed request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Result merged into the visible state.
    Applied,
    /// A newer request was issued (or the text was edited) first; dropped silently.
    Superseded,
    /// Current request failed; `error` is set.
    Failed,
}

/// Non-blocking request dispatch. Completions come back through
/// `ExplorerSession::receive_prediction` with the same id.
pub trait PredictionService: Send {
    fn submit(&mut self, id: RequestId, request: PredictionRequest);
}

/// External analytics/config hook notified whenever a request is issued.
pub trait NavigationObserver: Send {
    fn page_view(&mut self, location: &str);
}

/// Records page views as tracing events.
#[derive(Debug, Default)]
pub struct TracingObserver;

impl NavigationObserver for TracingObserver {
    fn page_view(&mut self, location: &str) {
        tracing::info!(location, "page view");
    }
}

pub(crate) struct InFlight {
    pub id: RequestId,
    pub chosen: Option<String>,
}
