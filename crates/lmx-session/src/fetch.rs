use tracing::{debug, debug_span, warn};

use lmx_core::text::trim_right;
use lmx_core::{PredictError, PredictionRequest, PredictionResponse, RequestId};

use super::types::{FetchOutcome, InFlight};
use super::ExplorerSession;

/// Whether an issued request records the sentence in the navigation history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum UrlUpdate {
    Push,
    Suppress,
}

impl ExplorerSession {
    /// Extend the sentence with `token`, or with `None` just refresh the
    /// candidates for the current text.
    ///
    /// Returns the id of the issued request; `None` when the trimmed text is
    /// empty, in which case nothing is sent.
    pub fn choose(&mut self, token: Option<&str>) -> Option<RequestId> {
        let _span = debug_span!("choose", token).entered();
        self.fetch(token.map(str::to_owned), UrlUpdate::Push)
    }

    pub(crate) fn fetch(&mut self, chosen: Option<String>, url: UrlUpdate) -> Option<RequestId> {
        let previous = trim_right(&self.state.text).to_string();
        if previous.is_empty() {
            debug!("empty prefix, no request");
            self.state.loading = false;
            return None;
        }

        self.state.loading = true;
        if url == UrlUpdate::Push {
            self.history.push_state(&self.state.text, chosen.as_deref());
        }
        if let Some(observer) = self.observer.as_mut() {
            let location = self.history.location().unwrap_or_default();
            observer.page_view(&location);
        }

        let request = PredictionRequest::new(previous, chosen.clone()).with_top_k(self.config.top_k);
        let id = self.guard.next_id();
        debug!(%id, previous = %request.previous_text, "prediction issued");
        self.in_flight = Some(InFlight { id, chosen });
        self.service.submit(id, request);
        Some(id)
    }

    /// Deliver the completion of request `id`.
    ///
    /// Only the latest issued request is applied. On success the candidate
    /// list is replaced; the text is replaced by the service's output only
    /// when a token was chosen, so text typed by the user is never
    /// overwritten by the echo. Failures set `error` and keep text and
    /// candidates as they were.
    pub fn receive_prediction(
        &mut self,
        id: RequestId,
        result: Result<PredictionResponse, PredictError>,
    ) -> FetchOutcome {
        let _span = debug_span!("receive_prediction", %id).entered();
        if !self.guard.is_current(id) {
            debug!("superseded");
            return FetchOutcome::Superseded;
        }
        let in_flight = match self.in_flight.take() {
            Some(f) if f.id == id => f,
            other => {
                // Already completed once.
                self.in_flight = other;
                debug!("duplicate completion");
                return FetchOutcome::Superseded;
            }
        };

        match result {
            Ok(response) => {
                if in_flight.chosen.is_some() {
                    self.state.text = response.output_text.clone();
                }
                let candidates = response.candidates();
                debug!(count = candidates.len(), "prediction applied");
                self.state.candidates = Some(candidates);
                self.state.loading = false;
                self.state.error = false;
                FetchOutcome::Applied
            }
            Err(e) => {
                warn!(kind = e.kind().as_str(), error = %e, "prediction failed");
                self.state.loading = false;
                self.state.error = true;
                FetchOutcome::Failed
            }
        }
    }
}
