//! Test application factory for integration tests.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use std::sync::Arc;
use tower::ServiceExt;

use inkdigit::assets::AssetLoader;
use inkdigit::models::AppConfig;
use inkdigit::server::{build_router, create_app_state, create_app_state_with_classifier, AppState};
use inkdigit::services::{Classifier, InMemorySessionRegistry, MlpClassifier, UnavailableClassifier};

use super::fixtures;

/// Test application with router and direct access to services
pub struct TestApp {
    router: axum::Router,
    pub sessions: Arc<InMemorySessionRegistry>,
}

impl TestApp {
    /// Create a test application with the fixture model loaded
    pub fn new() -> Self {
        let classifier = MlpClassifier::from_json_str(&fixtures::model_json().to_string())
            .expect("Fixture model must load");
        Self::with_classifier(AppConfig::default(), Arc::new(classifier))
    }

    /// Create a test application without a model
    pub fn without_model() -> Self {
        Self::with_classifier(
            AppConfig::default(),
            Arc::new(UnavailableClassifier::new("no model in test")),
        )
    }

    /// Create a test application with a custom config and classifier
    pub fn with_classifier(config: AppConfig, classifier: Arc<dyn Classifier>) -> Self {
        let assets = Arc::new(AssetLoader::new(None));
        Self::from_state(create_app_state_with_classifier(assets, config, classifier))
    }

    /// Create a test application that loads its model the way production does
    pub fn from_config(config: AppConfig) -> Self {
        let assets = Arc::new(AssetLoader::new(None));
        Self::from_state(create_app_state(assets, config))
    }

    fn from_state(state: AppState) -> Self {
        // Keep references for test assertions
        let sessions = state.sessions.clone();

        // Build router using shared server module (same as production)
        let router = build_router(state);

        Self { router, sessions }
    }

    /// Make a GET request to the given path
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request(Request::get(path).body(Body::empty()).unwrap())
            .await
    }

    /// Make a POST request with JSON body
    pub async fn post_json(&self, path: &str, body: &serde_json::Value) -> TestResponse {
        let request = Request::post(path)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.request(request).await
    }

    /// Make a POST request without a body
    pub async fn post(&self, path: &str) -> TestResponse {
        self.request(Request::post(path).body(Body::empty()).unwrap())
            .await
    }

    /// Make a DELETE request
    pub async fn delete(&self, path: &str) -> TestResponse {
        self.request(Request::delete(path).body(Body::empty()).unwrap())
            .await
    }

    /// Send a request to the router
    async fn request(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Request failed");

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes()
            .to_vec();

        TestResponse {
            status,
            headers,
            body,
        }
    }

    /// Open a drawing session and return its id
    pub async fn create_session(&self) -> String {
        let response = self.post("/api/sessions").await;
        assert_eq!(response.status, StatusCode::CREATED);

        let json: serde_json::Value = response.json();
        json["id"].as_str().unwrap().to_string()
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

/// Test response with convenience methods
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    /// Parse body as JSON
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> T {
        serde_json::from_slice(&self.body).expect("Failed to parse JSON response")
    }

    /// Get body as string
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).to_string()
    }

    /// Get raw body bytes
    pub fn bytes(&self) -> &[u8] {
        &self.body
    }
}
