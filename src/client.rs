//! Blocking HTTP transport for the `/predict` endpoint.

use std::time::Duration;

use tracing::debug;

use lmx_core::codec;
use lmx_core::settings::ServiceSettings;
use lmx_core::{PredictError, PredictionRequest, PredictionResponse};

/// Something that can answer a prediction request, blocking until it does.
pub trait Predictor: Send + Sync {
    fn predict(&self, request: &PredictionRequest) -> Result<PredictionResponse, PredictError>;
}

pub struct HttpPredictor {
    agent: ureq::Agent,
    url: String,
}

impl HttpPredictor {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        let config = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build();
        Self {
            agent: ureq::Agent::new_with_config(config),
            url: url.into(),
        }
    }

    pub fn from_settings(service: &ServiceSettings) -> Self {
        Self::new(service.predict_url(), service.timeout())
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Predictor for HttpPredictor {
    fn predict(&self, request: &PredictionRequest) -> Result<PredictionResponse, PredictError> {
        let body = codec::encode(request);
        debug!(url = %self.url, %body, "POST");

        let response = self
            .agent
            .post(&self.url)
            .header("Content-Type", "application/json")
            .send(body.as_str())
            .map_err(|e| PredictError::network(format!("{}: {e}", self.url)))?;

        let status = response.status().as_u16();
        let text = response
            .into_body()
            .read_to_string()
            .map_err(|e| PredictError::Network {
                status: Some(status),
                message: format!("reading body: {e}"),
            })?;

        if !(200..300).contains(&status) {
            let message =
                codec::decode_error_message(&text).unwrap_or_else(|| format!("HTTP {status}"));
            return Err(PredictError::Network {
                status: Some(status),
                message,
            });
        }

        Ok(codec::decode(&text)?)
    }
}
