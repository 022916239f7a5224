//! Pure building blocks for the text-continuation explorer.
//!
//! Nothing in this crate performs I/O: the wire codec, URL deep-link codec,
//! request race guard and debouncer are all driven by the session layer.

pub mod codec;
pub mod debounce;
pub mod history;
pub mod race_guard;
pub mod settings;
pub mod text;

pub use codec::{
    Candidate, DecodeError, ErrorKind, PredictError, PredictionRequest, PredictionResponse,
    NUM_STEPS,
};
pub use debounce::Debouncer;
pub use history::{HistoryBackend, HistorySync, MemoryHistory};
pub use race_guard::{RequestId, RequestRaceGuard};
pub use text::DEFAULT_TEXT;
