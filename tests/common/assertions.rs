//! Assertion helpers for tests.

use axum::http::StatusCode;
use base64::Engine;
use pretty_assertions::assert_eq;

use super::app::TestResponse;

/// Assert response has expected status code
pub fn assert_status(response: &TestResponse, expected: StatusCode) {
    assert_eq!(
        response.status, expected,
        "Expected status {}, got {}. Body: {}",
        expected,
        response.status,
        response.text()
    );
}

/// Assert response is OK (200)
pub fn assert_ok(response: &TestResponse) {
    assert_status(response, StatusCode::OK);
}

/// Assert an error response with the expected status and error code
pub fn assert_error(response: &TestResponse, expected: StatusCode, code: &str) {
    assert_status(response, expected);
    let json: serde_json::Value = response.json();

    assert_eq!(json["status"].as_u64(), Some(expected.as_u16() as u64));
    assert_eq!(json["code"], code);
    assert!(json["error"].is_string(), "Expected error message");
}

/// Assert a successful classification and return the predicted label
pub fn assert_valid_classification(response: &TestResponse) -> u64 {
    assert_ok(response);
    let json: serde_json::Value = response.json();

    assert_eq!(json["status"], 200);
    let probabilities = json["probabilities"]
        .as_array()
        .expect("Expected probabilities array");
    assert_eq!(probabilities.len(), 10);
    let total: f64 = probabilities.iter().filter_map(|p| p.as_f64()).sum();
    assert!((total - 1.0).abs() < 1e-3, "Probabilities sum to {total}");

    let label = json["label"].as_u64().expect("Expected numeric label");
    assert!(label <= 9);
    let confidence = json["confidence"].as_f64().expect("Expected confidence");
    assert_eq!(
        probabilities[label as usize].as_f64(),
        Some(confidence),
        "Confidence must be the label's probability"
    );

    let message = json["message"].as_str().expect("Expected message");
    assert!(
        message.starts_with(&format!("Prediction: {label} (confidence: ")),
        "Unexpected message: {message}"
    );

    let preview = json["preview_png"].as_str().expect("Expected preview_png");
    let png = base64::engine::general_purpose::STANDARD
        .decode(preview)
        .expect("preview_png must be base64");
    assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");

    label
}
