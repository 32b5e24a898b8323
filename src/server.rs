//! HTTP server setup and configuration.
//!
//! This module provides the router and application state used by both
//! the production server and integration tests.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::api::{self, ClassifyRequest, EventsRequest};
use crate::assets::AssetLoader;
use crate::error::ApiError;
use crate::models::AppConfig;
use crate::services::{load_classifier, Classifier, InMemorySessionRegistry, Recognizer};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub assets: Arc<AssetLoader>,
    pub recognizer: Arc<Recognizer>,
    pub sessions: Arc<InMemorySessionRegistry>,
}

/// Create application state, loading the classifier named in the config.
///
/// A missing or broken model does not fail startup: classification requests
/// then answer with "model unavailable".
pub fn create_app_state(assets: Arc<AssetLoader>, config: AppConfig) -> AppState {
    let classifier = load_classifier(config.model.path.as_deref());
    create_app_state_with_classifier(assets, config, classifier)
}

/// Create application state around an already constructed classifier.
pub fn create_app_state_with_classifier(
    assets: Arc<AssetLoader>,
    config: AppConfig,
    classifier: Arc<dyn Classifier>,
) -> AppState {
    let recognizer = Arc::new(Recognizer::new(config.pipeline(), classifier));
    let sessions = Arc::new(InMemorySessionRegistry::new(
        config.canvas.size,
        config.sessions.max,
    ));

    AppState {
        config: Arc::new(config),
        assets,
        recognizer,
        sessions,
    }
}

/// Build the API router with all endpoints and middleware.
///
/// This is the core router used by both production and tests.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Drawing page
        .route("/", get(handle_index))
        // Classification
        .route("/api/model", get(handle_model_status))
        .route("/api/classify", post(handle_classify))
        // Drawing sessions
        .route("/api/sessions", post(handle_create_session))
        .route("/api/sessions/:id", axum::routing::delete(handle_delete_session))
        .route("/api/sessions/:id/events", post(handle_session_events))
        .route("/api/sessions/:id/clear", post(handle_clear_session))
        .route("/api/sessions/:id/classify", post(handle_classify_session))
        // Health check
        .route("/health", get(|| async { "OK" }))
        // Add state and tracing
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

// Wrapper handlers to extract state components for the underlying API handlers

async fn handle_index(State(state): State<AppState>) -> Result<Response, ApiError> {
    api::handle_index(State(state.assets)).await
}

async fn handle_model_status(State(state): State<AppState>) -> impl IntoResponse {
    api::handle_model_status(State(state.config), State(state.recognizer)).await
}

async fn handle_classify(
    State(state): State<AppState>,
    body: Json<ClassifyRequest>,
) -> Result<impl IntoResponse, ApiError> {
    api::handle_classify(State(state.config), State(state.recognizer), body).await
}

async fn handle_create_session(State(state): State<AppState>) -> impl IntoResponse {
    api::handle_create_session(State(state.config), State(state.sessions)).await
}

async fn handle_session_events(
    State(state): State<AppState>,
    path: Path<Uuid>,
    body: Json<EventsRequest>,
) -> Result<impl IntoResponse, ApiError> {
    api::handle_session_events(State(state.sessions), path, body).await
}

async fn handle_clear_session(
    State(state): State<AppState>,
    path: Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    api::handle_clear_session(State(state.sessions), path).await
}

async fn handle_classify_session(
    State(state): State<AppState>,
    path: Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    api::handle_classify_session(
        State(state.config),
        State(state.sessions),
        State(state.recognizer),
        path,
    )
    .await
}

async fn handle_delete_session(
    State(state): State<AppState>,
    path: Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    api::handle_delete_session(State(state.sessions), path).await
}
