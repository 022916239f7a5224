//! Wire codec for the `/predict` endpoint.
//!
//! Request:  `{ "previous": str, "next": str?, "numsteps": 5, "topk": int? }`
//! Response: `{ "output": str, "words": [str], "logits": [num], "probabilities": [num] }`
//!
//! The three response arrays are aligned by index and must have equal length.

use serde::{Deserialize, Serialize};

/// Fixed protocol parameter sent with every prediction request.
pub const NUM_STEPS: u32 = 5;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DecodeError {
    #[error("malformed response: {0}")]
    Malformed(String),
    #[error(
        "misaligned candidate arrays: {words} words, {logits} logits, {probabilities} probabilities"
    )]
    LengthMismatch {
        words: usize,
        logits: usize,
        probabilities: usize,
    },
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PredictError {
    #[error("network error{}: {message}", .status.map(|s| format!(" (status {s})")).unwrap_or_default())]
    Network {
        status: Option<u16>,
        message: String,
    },
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// Coarse failure class, kept for diagnostics only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Network,
    Decode,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Network => "network",
            ErrorKind::Decode => "decode",
        }
    }
}

impl PredictError {
    pub fn network(message: impl Into<String>) -> Self {
        PredictError::Network {
            status: None,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            PredictError::Network { .. } => ErrorKind::Network,
            PredictError::Decode(_) => ErrorKind::Decode,
        }
    }
}

// ---------------------------------------------------------------------------
// Typed request / response
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct PredictionRequest {
    /// Sentence prefix, already stripped of trailing whitespace.
    pub previous_text: String,
    pub chosen_token: Option<String>,
    pub step_count: u32,
    /// Number of candidates to ask for; the service default applies when absent.
    pub top_k: Option<u32>,
}

impl PredictionRequest {
    pub fn new(previous_text: impl Into<String>, chosen_token: Option<String>) -> Self {
        Self {
            previous_text: previous_text.into(),
            chosen_token,
            step_count: NUM_STEPS,
            top_k: None,
        }
    }

    pub fn with_top_k(mut self, top_k: Option<u32>) -> Self {
        self.top_k = top_k;
        self
    }
}

/// A single next-token suggestion.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    /// Raw token text. May contain a literal newline.
    pub token: String,
    /// Unnormalized log-score, display-only.
    pub score: f64,
    /// Probability in [0, 1].
    pub probability: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PredictionResponse {
    pub output_text: String,
    pub candidate_tokens: Vec<String>,
    pub candidate_scores: Vec<f64>,
    pub candidate_probabilities: Vec<f64>,
}

impl PredictionResponse {
    /// Candidates in the order the service ranked them.
    pub fn candidates(&self) -> Vec<Candidate> {
        self.candidate_tokens
            .iter()
            .zip(&self.candidate_scores)
            .zip(&self.candidate_probabilities)
            .map(|((token, &score), &probability)| Candidate {
                token: token.clone(),
                score,
                probability,
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Wire format
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct WireRequest<'a> {
    previous: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    next: Option<&'a str>,
    numsteps: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    topk: Option<u32>,
}

#[derive(Deserialize)]
struct WireResponse {
    output: String,
    words: Vec<String>,
    logits: Vec<f64>,
    probabilities: Vec<f64>,
}

/// Error body the service returns alongside a non-success status.
#[derive(Deserialize)]
struct WireError {
    message: String,
}

/// Serialize a request to the JSON body posted to `/predict`.
pub fn encode(request: &PredictionRequest) -> String {
    let wire = WireRequest {
        previous: &request.previous_text,
        next: request.chosen_token.as_deref(),
        numsteps: request.step_count,
        topk: request.top_k,
    };
    // Only strings and integers: serialization cannot fail.
    serde_json::to_string(&wire).unwrap_or_default()
}

/// Parse a `/predict` response body.
pub fn decode(body: &str) -> Result<PredictionResponse, DecodeError> {
    let wire: WireResponse =
        serde_json::from_str(body).map_err(|e| DecodeError::Malformed(e.to_string()))?;

    let (words, logits, probabilities) =
        (wire.words.len(), wire.logits.len(), wire.probabilities.len());
    if words != logits || words != probabilities {
        return Err(DecodeError::LengthMismatch {
            words,
            logits,
            probabilities,
        });
    }

    Ok(PredictionResponse {
        output_text: wire.output,
        candidate_tokens: wire.words,
        candidate_scores: wire.logits,
        candidate_probabilities: wire.probabilities,
    })
}

/// Extract the `message` field from a service error body, if there is one.
pub fn decode_error_message(body: &str) -> Option<String> {
    serde_json::from_str::<WireError>(body)
        .ok()
        .map(|e| e.message)
}
