//! HttpPredictor against a mock `/predict` service.

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use lmx_core::{DecodeError, ErrorKind, PredictError, PredictionRequest, PredictionResponse};
use lmx_engine::{HttpPredictor, Predictor};

async fn predict(
    server: &MockServer,
    request: PredictionRequest,
) -> Result<PredictionResponse, PredictError> {
    let predictor = HttpPredictor::new(format!("{}/predict", server.uri()), Duration::from_secs(5));
    tokio::task::spawn_blocking(move || predictor.predict(&request))
        .await
        .unwrap()
}

#[tokio::test(flavor = "multi_thread")]
async fn posts_request_and_decodes_candidates() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/predict"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "previous": "Joel is",
            "next": " happy",
            "numsteps": 5,
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "output": "Joel is happy",
            "words": [" and", ".", "\n"],
            "logits": [3.2, 2.0, 1.1],
            "probabilities": [0.6, 0.3, 0.1],
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = predict(
        &server,
        PredictionRequest::new("Joel is", Some(" happy".to_string())),
    )
    .await
    .unwrap();

    assert_eq!(response.output_text, "Joel is happy");
    let tokens: Vec<String> = response.candidates().into_iter().map(|c| c.token).collect();
    assert_eq!(tokens, [" and", ".", "\n"]);
}

#[tokio::test(flavor = "multi_thread")]
async fn sends_top_k_when_configured() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/predict"))
        .and(body_json(json!({ "previous": "Joel is", "numsteps": 5, "topk": 3 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "output": "Joel is",
            "words": [],
            "logits": [],
            "probabilities": [],
        })))
        .expect(1)
        .mount(&server)
        .await;

    let request = PredictionRequest::new("Joel is", None).with_top_k(Some(3));
    let response = predict(&server, request).await.unwrap();
    assert!(response.candidates().is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn server_error_carries_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/predict"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({ "message": "model not loaded" })),
        )
        .mount(&server)
        .await;

    let err = predict(&server, PredictionRequest::new("Joel is", None))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        PredictError::Network {
            status: Some(500),
            message: "model not loaded".to_string(),
        }
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn server_error_without_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let err = predict(&server, PredictionRequest::new("Joel is", None))
        .await
        .unwrap_err();
    match err {
        PredictError::Network { status, .. } => assert_eq!(status, Some(502)),
        other => panic!("expected network error, got {other:?}"),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn malformed_body_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "output": "Joel is",
            "words": ["a", "b"],
            "logits": [1.0],
            "probabilities": [0.5, 0.5],
        })))
        .mount(&server)
        .await;

    let err = predict(&server, PredictionRequest::new("Joel is", None))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Decode);
    assert!(matches!(
        err,
        PredictError::Decode(DecodeError::LengthMismatch { words: 2, .. })
    ));
}

#[test]
fn unreachable_service_is_network_error() {
    let predictor = HttpPredictor::new("http://127.0.0.1:1/predict", Duration::from_secs(2));
    assert_eq!(predictor.url(), "http://127.0.0.1:1/predict");
    let err = predictor
        .predict(&PredictionRequest::new("Joel is", None))
        .unwrap_err();
    assert!(matches!(err, PredictError::Network { status: None, .. }));
}
