//! Host-facing explorer: the session wired to a background prediction
//! worker and an in-process navigation history.
//!
//! Everything runs on the caller's thread except the blocking HTTP call.
//! Completions and navigation events queue up on channels and are applied
//! to the session in `poll`.

mod types;

pub use types::ExplorerError;

use std::path::Path;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::{Duration, Instant};

use tracing::debug;

use lmx_core::settings::{parse_settings_toml, Settings};
use lmx_core::{HistoryBackend, HistorySync, MemoryHistory};
use lmx_session::{
    ExplorerSession, FetchOutcome, NavigationObserver, SentenceState, SessionConfig,
    TracingObserver,
};

use crate::async_worker::{self, PredictResult};
use crate::client::{HttpPredictor, Predictor};

const POLL_INTERVAL: Duration = Duration::from_millis(10);

// ---------------------------------------------------------------------------
// Top-level functions
// ---------------------------------------------------------------------------

pub fn engine_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Read and validate a settings file.
pub fn load_settings(path: &Path) -> Result<Settings, ExplorerError> {
    let content = std::fs::read_to_string(path).map_err(|e| ExplorerError::Io {
        msg: format!("{}: {e}", path.display()),
    })?;
    Ok(parse_settings_toml(&content)?)
}

// ---------------------------------------------------------------------------
// Explorer
// ---------------------------------------------------------------------------

pub struct Explorer {
    session: ExplorerSession,
    results: mpsc::Receiver<PredictResult>,
    navigations: mpsc::Receiver<Option<String>>,
    history: MemoryHistory,
}

impl Explorer {
    /// Explorer talking to the configured prediction service over HTTP.
    /// `initial_location` is the query string of the deep link, if any.
    pub fn new(settings: &Settings, initial_location: &str) -> Self {
        let predictor = Arc::new(HttpPredictor::from_settings(&settings.service));
        Self::with_predictor(
            predictor,
            SessionConfig::from(settings),
            MemoryHistory::new(initial_location),
        )
    }

    pub fn with_predictor(
        predictor: Arc<dyn Predictor>,
        config: SessionConfig,
        history: MemoryHistory,
    ) -> Self {
        let (handle, results) = async_worker::spawn(predictor);
        let mut session =
            ExplorerSession::new(config, HistorySync::new(history.clone()), Box::new(handle));
        session.set_observer(Box::new(TracingObserver));

        let (nav_tx, navigations) = mpsc::channel();
        session.history_mut().subscribe(move |text| {
            let _ = nav_tx.send(text);
        });

        Self {
            session,
            results,
            navigations,
            history,
        }
    }

    pub fn set_observer(&mut self, observer: Box<dyn NavigationObserver>) {
        self.session.set_observer(observer);
    }

    pub fn state(&self) -> &SentenceState {
        self.session.state()
    }

    pub fn is_settled(&self) -> bool {
        self.session.is_settled()
    }

    /// Query string of the current history entry.
    pub fn location(&self) -> String {
        self.history.location()
    }

    pub fn start(&mut self) {
        self.session.start();
    }

    pub fn edit_text(&mut self, text: impl Into<String>) {
        self.session.edit_text(text);
    }

    pub fn choose(&mut self, token: Option<&str>) {
        self.session.choose(token);
    }

    /// Choose the visible candidate at `index`.
    pub fn choose_index(&mut self, index: usize) -> Result<(), ExplorerError> {
        let visible = self.session.state().visible_candidates();
        let token = visible
            .get(index)
            .map(|c| c.token.clone())
            .ok_or(ExplorerError::NoSuchCandidate {
                index,
                available: visible.len(),
            })?;
        self.session.choose(Some(&token));
        Ok(())
    }

    pub fn undo(&mut self) {
        self.session.undo();
    }

    /// Navigate one history entry back. Returns false at the oldest entry.
    pub fn back(&mut self) -> bool {
        if !self.history.back() {
            return false;
        }
        self.session.history_mut().notify_navigated();
        true
    }

    /// Navigate one history entry forward. Returns false at the newest entry.
    pub fn forward(&mut self) -> bool {
        if !self.history.forward() {
            return false;
        }
        self.session.history_mut().notify_navigated();
        true
    }

    /// Apply pending navigation events, fire the debouncer if due, and
    /// deliver finished requests. Returns true if the visible state may
    /// have changed.
    pub fn poll(&mut self) -> bool {
        let mut changed = false;

        while let Ok(text) = self.navigations.try_recv() {
            self.session.on_external_navigate(text);
            changed = true;
        }

        if self.session.tick(Instant::now()).is_some() {
            changed = true;
        }

        while let Ok(done) = self.results.try_recv() {
            let outcome = self.session.receive_prediction(done.id, done.result);
            debug!(id = %done.id, ?outcome, "completion delivered");
            changed |= outcome != FetchOutcome::Superseded;
        }

        changed
    }

    /// Poll until nothing is outstanding or `timeout` passes.
    /// Returns whether the explorer settled.
    pub fn wait_settled(&mut self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        loop {
            self.poll();
            if self.session.is_settled() {
                return true;
            }
            let now = Instant::now();
            if now >= deadline {
                return false;
            }
            let wake = self
                .session
                .debounce_deadline()
                .map_or(POLL_INTERVAL, |d| d.saturating_duration_since(now))
                .clamp(Duration::from_millis(1), POLL_INTERVAL);
            thread::sleep(wake.min(deadline - now));
        }
    }
}
