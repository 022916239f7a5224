use std::sync::{mpsc, Arc};
use std::thread;

use tracing::{debug, warn};

use lmx_core::{PredictError, PredictionRequest, PredictionResponse, RequestId};
use lmx_session::PredictionService;

use crate::client::Predictor;

// ---------------------------------------------------------------------------
// Work / Result types
// ---------------------------------------------------------------------------

pub(crate) struct PredictWork {
    pub id: RequestId,
    pub request: PredictionRequest,
}

pub(crate) struct PredictResult {
    pub id: RequestId,
    pub result: Result<PredictionResponse, PredictError>,
}

// ---------------------------------------------------------------------------
// Worker handle
// ---------------------------------------------------------------------------

/// Submission side of the prediction worker, owned by the session.
pub(crate) struct WorkerHandle {
    tx: mpsc::Sender<PredictWork>,
}

impl PredictionService for WorkerHandle {
    fn submit(&mut self, id: RequestId, request: PredictionRequest) {
        if self.tx.send(PredictWork { id, request }).is_err() {
            warn!(%id, "prediction worker has exited");
        }
    }
}

/// Spawn the worker thread. Results arrive on the returned receiver.
pub(crate) fn spawn(predictor: Arc<dyn Predictor>) -> (WorkerHandle, mpsc::Receiver<PredictResult>) {
    let (work_tx, work_rx) = mpsc::channel::<PredictWork>();
    let (result_tx, result_rx) = mpsc::channel::<PredictResult>();
    thread::Builder::new()
        .name("lmx-predict".into())
        .spawn(move || predict_worker(work_rx, result_tx, predictor))
        .expect("failed to spawn prediction worker");
    (WorkerHandle { tx: work_tx }, result_rx)
}

// ---------------------------------------------------------------------------
// Worker thread
// ---------------------------------------------------------------------------

fn predict_worker(
    rx: mpsc::Receiver<PredictWork>,
    tx: mpsc::Sender<PredictResult>,
    predictor: Arc<dyn Predictor>,
) {
    while let Ok(work) = rx.recv() {
        // Drain: a newer submission supersedes anything queued before it
        let mut latest = work;
        while let Ok(newer) = rx.try_recv() {
            debug!(skipped = %latest.id, "superseded before start");
            latest = newer;
        }

        let result = predictor.predict(&latest.request);
        if tx
            .send(PredictResult {
                id: latest.id,
                result,
            })
            .is_err()
        {
            break;
        }
    }
}
