//! Integration tests for incremental drawing sessions.

mod common;

use axum::http::StatusCode;
use common::{assert_error, assert_ok, assert_status, assert_valid_classification, fixtures, TestApp};
use inkdigit::models::{AppConfig, SessionId};
use inkdigit::services::{MlpClassifier, SessionRegistry, UnavailableClassifier};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;

#[tokio::test]
async fn test_create_session() {
    let app = TestApp::new();
    let response = app.post("/api/sessions").await;

    assert_status(&response, StatusCode::CREATED);
    let json: serde_json::Value = response.json();
    assert!(json["id"].as_str().unwrap().parse::<uuid::Uuid>().is_ok());
    assert_eq!(json["canvas_size"], 300);
    assert_eq!(json["stroke_width"], 25.0);
    assert_eq!(json["tap_radius"], 7.0);
    assert_eq!(app.sessions.len().await, 1);
}

#[tokio::test]
async fn test_create_session_reports_configured_canvas() {
    let mut config = AppConfig::default();
    config.canvas.size = 200;
    config.canvas.stroke_width = 16.0;
    config.canvas.tap_radius = 5.0;
    let app = TestApp::with_classifier(
        config,
        Arc::new(UnavailableClassifier::new("no model in test")),
    );

    let response = app.post("/api/sessions").await;
    assert_status(&response, StatusCode::CREATED);
    let json: serde_json::Value = response.json();
    assert_eq!(json["canvas_size"], 200);
    assert_eq!(json["stroke_width"], 16.0);
    assert_eq!(json["tap_radius"], 5.0);

    // Events are clamped to the configured canvas, not the default one.
    let id = json["id"].as_str().unwrap();
    app.post_json(
        &format!("/api/sessions/{id}/events"),
        &json!({ "events": [{ "type": "start", "x": 250, "y": 10 }, { "type": "end" }] }),
    )
    .await;
    let snapshot = app
        .sessions
        .snapshot(&SessionId::from(id.parse::<uuid::Uuid>().unwrap()))
        .await
        .unwrap();
    assert_eq!(snapshot.strokes()[0].points()[0].x, 200.0);
}

#[tokio::test]
async fn test_draw_and_classify() {
    let app = TestApp::new();
    let id = app.create_session().await;

    let response = app
        .post_json(
            &format!("/api/sessions/{id}/events"),
            &json!({ "events": fixtures::vertical_bar_events() }),
        )
        .await;
    assert_ok(&response);
    let summary: serde_json::Value = response.json();
    assert_eq!(
        summary,
        json!({ "strokes": 1, "points": 3, "drawing": false, "changed": true })
    );

    let response = app.post(&format!("/api/sessions/{id}/classify")).await;
    assert_eq!(assert_valid_classification(&response), 1);
}

#[tokio::test]
async fn test_session_matches_stateless_classify() {
    let app = TestApp::new();
    let id = app.create_session().await;
    app.post_json(
        &format!("/api/sessions/{id}/events"),
        &json!({ "events": fixtures::vertical_bar_events() }),
    )
    .await;

    let from_session: serde_json::Value = app
        .post(&format!("/api/sessions/{id}/classify"))
        .await
        .json();
    let stateless: serde_json::Value = app
        .post_json(
            "/api/classify",
            &json!({ "strokes": [[[150, 40], [150, 150], [150, 260]]] }),
        )
        .await
        .json();

    assert_eq!(from_session, stateless);
}

#[tokio::test]
async fn test_events_across_batches() {
    let app = TestApp::new();
    let id = app.create_session().await;
    let path = format!("/api/sessions/{id}/events");

    let first = app
        .post_json(
            &path,
            &json!({ "events": [
                { "type": "start", "x": 150, "y": 40 },
                { "type": "point", "x": 150, "y": 120 },
            ]}),
        )
        .await;
    let summary: serde_json::Value = first.json();
    assert_eq!(
        summary,
        json!({ "strokes": 0, "points": 0, "drawing": true, "changed": true })
    );

    let second = app
        .post_json(
            &path,
            &json!({ "events": [
                { "type": "point", "x": 150, "y": 260 },
                { "type": "end" },
            ]}),
        )
        .await;
    let summary: serde_json::Value = second.json();
    assert_eq!(
        summary,
        json!({ "strokes": 1, "points": 3, "drawing": false, "changed": true })
    );
}

#[tokio::test]
async fn test_unfinished_stroke_is_not_classified() {
    let app = TestApp::new();
    let id = app.create_session().await;
    app.post_json(
        &format!("/api/sessions/{id}/events"),
        &json!({ "events": [
            { "type": "start", "x": 150, "y": 40 },
            { "type": "point", "x": 150, "y": 260 },
        ]}),
    )
    .await;

    let response = app.post(&format!("/api/sessions/{id}/classify")).await;
    assert_error(&response, StatusCode::UNPROCESSABLE_ENTITY, "empty_drawing");
}

#[tokio::test]
async fn test_clear_session() {
    let app = TestApp::new();
    let id = app.create_session().await;
    app.post_json(
        &format!("/api/sessions/{id}/events"),
        &json!({ "events": fixtures::vertical_bar_events() }),
    )
    .await;

    let response = app.post(&format!("/api/sessions/{id}/clear")).await;
    assert_ok(&response);
    let summary: serde_json::Value = response.json();
    assert_eq!(summary["strokes"], 0);

    let response = app.post(&format!("/api/sessions/{id}/classify")).await;
    assert_error(&response, StatusCode::UNPROCESSABLE_ENTITY, "empty_drawing");
}

#[tokio::test]
async fn test_delete_session() {
    let app = TestApp::new();
    let id = app.create_session().await;

    let response = app.delete(&format!("/api/sessions/{id}")).await;
    assert_status(&response, StatusCode::NO_CONTENT);
    assert!(app.sessions.is_empty().await);

    let response = app.delete(&format!("/api/sessions/{id}")).await;
    assert_error(&response, StatusCode::NOT_FOUND, "session_not_found");
}

#[tokio::test]
async fn test_unknown_session() {
    let app = TestApp::new();
    let id = SessionId::new();

    let response = app.post(&format!("/api/sessions/{id}/classify")).await;
    assert_error(&response, StatusCode::NOT_FOUND, "session_not_found");

    let response = app
        .post_json(
            &format!("/api/sessions/{id}/events"),
            &json!({ "events": [] }),
        )
        .await;
    assert_error(&response, StatusCode::NOT_FOUND, "session_not_found");
}

#[tokio::test]
async fn test_invalid_session_id() {
    let app = TestApp::new();
    let response = app.post("/api/sessions/not-a-uuid/classify").await;

    assert_status(&response, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_session_limit_evicts_oldest() {
    let mut config = AppConfig::default();
    config.sessions.max = 2;
    let classifier = MlpClassifier::from_json_str(&fixtures::model_json().to_string()).unwrap();
    let app = TestApp::with_classifier(config, Arc::new(classifier));

    let first = app.create_session().await;
    tokio::time::sleep(std::time::Duration::from_millis(2)).await;
    app.create_session().await;
    tokio::time::sleep(std::time::Duration::from_millis(2)).await;
    app.create_session().await;

    assert_eq!(app.sessions.len().await, 2);
    let response = app.post(&format!("/api/sessions/{first}/clear")).await;
    assert_error(&response, StatusCode::NOT_FOUND, "session_not_found");
}

#[tokio::test]
async fn test_out_of_canvas_points_are_clamped() {
    let app = TestApp::new();
    let id = app.create_session().await;
    app.post_json(
        &format!("/api/sessions/{id}/events"),
        &json!({ "events": [
            { "type": "start", "x": -50, "y": 900 },
            { "type": "end" },
        ]}),
    )
    .await;

    let snapshot = app
        .sessions
        .snapshot(&SessionId::from(id.parse::<uuid::Uuid>().unwrap()))
        .await
        .unwrap();
    let point = snapshot.strokes()[0].points()[0];
    assert_eq!((point.x, point.y), (0.0, 300.0));
}

#[tokio::test]
async fn test_evicted_drawing_replays_into_new_session() {
    let mut config = AppConfig::default();
    config.sessions.max = 1;
    let classifier = MlpClassifier::from_json_str(&fixtures::model_json().to_string()).unwrap();
    let app = TestApp::with_classifier(config, Arc::new(classifier));

    let evicted = app.create_session().await;
    let events = fixtures::vertical_bar_events();
    app.post_json(
        &format!("/api/sessions/{evicted}/events"),
        &json!({ "events": events }),
    )
    .await;
    app.create_session().await;

    let response = app
        .post_json(
            &format!("/api/sessions/{evicted}/events"),
            &json!({ "events": [] }),
        )
        .await;
    assert_error(&response, StatusCode::NOT_FOUND, "session_not_found");

    // Everything sent so far is replayed in one batch.
    let restored = app.create_session().await;
    let response = app
        .post_json(
            &format!("/api/sessions/{restored}/events"),
            &json!({ "events": events }),
        )
        .await;
    assert_ok(&response);

    let response = app.post(&format!("/api/sessions/{restored}/classify")).await;
    assert_eq!(assert_valid_classification(&response), 1);
}
