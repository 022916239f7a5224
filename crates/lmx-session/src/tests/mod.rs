mod simulator;

use std::sync::{Arc, Mutex};

use lmx_core::{HistorySync, MemoryHistory, PredictionRequest, PredictionResponse, RequestId};

use super::{ExplorerSession, PredictionService, SessionConfig};

/// Records submitted requests; the test decides when and how they complete.
#[derive(Clone, Default)]
pub(super) struct FakeService {
    sent: Arc<Mutex<Vec<(RequestId, PredictionRequest)>>>,
}

impl PredictionService for FakeService {
    fn submit(&mut self, id: RequestId, request: PredictionRequest) {
        self.sent.lock().unwrap().push((id, request));
    }
}

impl FakeService {
    pub fn sent(&self) -> Vec<(RequestId, PredictionRequest)> {
        self.sent.lock().unwrap().clone()
    }

    pub fn count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }

    pub fn last(&self) -> (RequestId, PredictionRequest) {
        self.sent
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no request was sent")
    }
}

pub(super) fn make_session(location: &str) -> (ExplorerSession, FakeService, MemoryHistory) {
    make_session_with(location, SessionConfig::default())
}

pub(super) fn make_session_with(
    location: &str,
    config: SessionConfig,
) -> (ExplorerSession, FakeService, MemoryHistory) {
    let service = FakeService::default();
    let history = MemoryHistory::new(location);
    let session = ExplorerSession::new(
        config,
        HistorySync::new(history.clone()),
        Box::new(service.clone()),
    );
    (session, service, history)
}

/// Build a response from `(token, score, probability)` triples.
pub(super) fn response(output: &str, candidates: &[(&str, f64, f64)]) -> PredictionResponse {
    PredictionResponse {
        output_text: output.to_string(),
        candidate_tokens: candidates.iter().map(|c| c.0.to_string()).collect(),
        candidate_scores: candidates.iter().map(|c| c.1).collect(),
        candidate_probabilities: candidates.iter().map(|c| c.2).collect(),
    }
}

/// What a well-behaved service answers for `request`.
pub(super) fn echo(request: &PredictionRequest) -> PredictionResponse {
    let output = format!(
        "{}{}",
        request.previous_text,
        request.chosen_token.as_deref().unwrap_or("")
    );
    response(&output, &[(" next", 2.0, 0.6), (" more", 1.0, 0.3), ("\n", 0.1, 0.1)])
}
