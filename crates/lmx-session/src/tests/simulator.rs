use std::time::{Duration, Instant};

use lmx_core::{HistoryBackend, PredictError, PredictionResponse};

use super::*;
use crate::FetchOutcome;

type Responder = Box<dyn Fn(&PredictionRequest) -> Result<PredictionResponse, PredictError>>;

/// Headless explorer for end-to-end tests.
///
/// Wraps `ExplorerSession` with a fake service and a virtual clock, and
/// provides helpers that drive the full act → submit → complete cycle the
/// way a UI host would.
pub(super) struct HeadlessExplorer {
    pub session: ExplorerSession,
    pub service: FakeService,
    pub history: MemoryHistory,
    responder: Responder,
    delivered: usize,
    now: Instant,
}

impl HeadlessExplorer {
    pub fn new(location: &str) -> Self {
        let (session, service, history) = make_session(location);
        Self {
            session,
            service,
            history,
            responder: Box::new(|req| Ok(echo(req))),
            delivered: 0,
            now: Instant::now(),
        }
    }

    pub fn with_responder(
        mut self,
        responder: impl Fn(&PredictionRequest) -> Result<PredictionResponse, PredictError> + 'static,
    ) -> Self {
        self.responder = Box::new(responder);
        self
    }

    /// Complete every request sent since the last call, in issue order.
    pub fn resolve_all(&mut self) -> Vec<FetchOutcome> {
        let sent = self.service.sent();
        let mut outcomes = Vec::new();
        for (id, request) in &sent[self.delivered..] {
            let result = (self.responder)(request);
            outcomes.push(self.session.receive_prediction(*id, result));
        }
        self.delivered = sent.len();
        outcomes
    }

    /// Type text, let the debounce window pass, and resolve.
    pub fn type_and_wait(&mut self, text: &str) {
        self.session.edit_text_at(text, self.now);
        self.now += self.session.config().debounce;
        self.session.tick(self.now);
        self.resolve_all();
    }

    /// Click the candidate at `index` and resolve.
    pub fn pick(&mut self, index: usize) {
        let token = self.session.state().visible_candidates()[index].token.clone();
        self.session.choose(Some(&token));
        self.resolve_all();
    }

    pub fn undo(&mut self) {
        self.session.undo();
        self.resolve_all();
    }

    pub fn go_back(&mut self) {
        if self.history.back() {
            let text = self.session.history().read_from_url();
            self.session.on_external_navigate(text);
            self.resolve_all();
        }
    }

    pub fn advance(&mut self, by: Duration) {
        self.now += by;
        self.session.tick(self.now);
    }
}

#[test]
fn test_sim_pick_undo_cycle() {
    let mut sim = HeadlessExplorer::new("");
    sim.session.start();
    sim.resolve_all();
    assert_eq!(sim.session.state().visible_candidates().len(), 3);

    sim.pick(0);
    assert_eq!(sim.session.text(), "Joel is next");
    sim.pick(1);
    assert_eq!(sim.session.text(), "Joel is next more");

    sim.undo();
    assert_eq!(sim.session.text(), "Joel is next");
    assert!(!sim.session.is_loading());
    assert!(sim.session.is_settled());

    assert_eq!(
        sim.history.entries(),
        [
            "",
            "?text=Joel%20is",
            "?text=Joel%20is%20next",
            "?text=Joel%20is%20next%20more",
            "?text=Joel%20is%20next",
        ]
    );
}

#[test]
fn test_sim_typing_then_back() {
    let mut sim = HeadlessExplorer::new("");
    sim.session.start();
    sim.resolve_all();
    sim.type_and_wait("The cat");
    assert_eq!(sim.session.text(), "The cat");
    assert_eq!(sim.history.location(), "?text=The%20cat");

    sim.go_back();
    assert_eq!(sim.session.text(), "Joel is");
    assert!(!sim.session.is_loading());
    assert_eq!(sim.session.state().visible_candidates()[0].token, " next");
}

#[test]
fn test_sim_typing_during_request() {
    let mut sim = HeadlessExplorer::new("");
    sim.session.start();
    // The user keeps typing before the initial response arrives.
    sim.session.edit_text_at("Joel is a", sim.now);
    let outcomes = sim.resolve_all();
    assert_eq!(outcomes, [FetchOutcome::Superseded]);
    assert!(sim.session.is_loading());
    assert!(sim.session.state().candidates.is_none());

    sim.advance(Duration::from_millis(1000));
    assert_eq!(sim.resolve_all(), [FetchOutcome::Applied]);
    assert_eq!(sim.session.text(), "Joel is a");
}

#[test]
fn test_sim_failure_then_recovery() {
    let mut sim = HeadlessExplorer::new("").with_responder(|req| {
        if req.chosen_token.as_deref() == Some("\n") {
            Err(PredictError::Network {
                status: Some(500),
                message: "model crashed".to_string(),
            })
        } else {
            Ok(echo(req))
        }
    });
    sim.session.start();
    sim.resolve_all();
    sim.pick(2);
    assert!(sim.session.has_error());
    assert_eq!(sim.session.text(), "Joel is");
    assert_eq!(sim.session.state().visible_candidates().len(), 3);

    sim.pick(0);
    assert!(!sim.session.has_error());
    assert_eq!(sim.session.text(), "Joel is next");
}
