use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    Json as JsonExtractor,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use super::classify::{ClassifyResponse, ErrorResponse};
use crate::error::ApiError;
use crate::models::{AppConfig, DrawingSummary, SessionId, StrokeEvent};
use crate::services::{Recognizer, SessionRegistry};

/// A newly created drawing session
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SessionCreated {
    /// Session identifier for the other session endpoints
    #[schema(value_type = String, format = Uuid)]
    pub id: SessionId,
    /// Edge length of the canvas events are expected in
    pub canvas_size: u32,
    /// Pen width the server rasterizes dragged strokes with
    pub stroke_width: f32,
    /// Disc radius the server rasterizes taps with
    pub tap_radius: f32,
}

/// A batch of pointer events, applied in order
#[derive(Debug, Deserialize, ToSchema)]
pub struct EventsRequest {
    pub events: Vec<StrokeEvent>,
}

/// Open a drawing session
#[utoipa::path(
    post,
    path = "/api/sessions",
    responses(
        (status = 201, description = "Session created", body = SessionCreated),
    ),
    tag = "Sessions"
)]
pub async fn handle_create_session<R: SessionRegistry>(
    State(config): State<Arc<AppConfig>>,
    State(registry): State<Arc<R>>,
) -> impl IntoResponse {
    let id = registry.create().await;
    (
        StatusCode::CREATED,
        Json(SessionCreated {
            id,
            canvas_size: config.canvas.size,
            stroke_width: config.canvas.stroke_width,
            tap_radius: config.canvas.tap_radius,
        }),
    )
}

/// Apply pointer events to a session
///
/// A `start` event begins a stroke (discarding one that was never ended),
/// `point` extends it and `end` commits it. Coordinates outside the canvas
/// are clamped to its edges.
#[utoipa::path(
    post,
    path = "/api/sessions/{id}/events",
    request_body = EventsRequest,
    responses(
        (status = 200, description = "Events applied", body = DrawingSummary),
        (status = 404, description = "Unknown session", body = ErrorResponse),
    ),
    params(("id" = String, Path, description = "Session identifier")),
    tag = "Sessions"
)]
pub async fn handle_session_events<R: SessionRegistry>(
    State(registry): State<Arc<R>>,
    Path(id): Path<Uuid>,
    JsonExtractor(request): JsonExtractor<EventsRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let summary = registry.apply(&SessionId::from(id), &request.events).await?;
    tracing::trace!(session = %id, events = request.events.len(), "Applied stroke events");
    Ok(Json(summary))
}

/// Erase everything drawn in a session
#[utoipa::path(
    post,
    path = "/api/sessions/{id}/clear",
    responses(
        (status = 200, description = "Drawing cleared", body = DrawingSummary),
        (status = 404, description = "Unknown session", body = ErrorResponse),
    ),
    params(("id" = String, Path, description = "Session identifier")),
    tag = "Sessions"
)]
pub async fn handle_clear_session<R: SessionRegistry>(
    State(registry): State<Arc<R>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(registry.clear(&SessionId::from(id)).await?))
}

/// Classify the strokes committed so far
///
/// A stroke still being drawn is not included.
#[utoipa::path(
    post,
    path = "/api/sessions/{id}/classify",
    responses(
        (status = 200, description = "Digit recognized", body = ClassifyResponse),
        (status = 404, description = "Unknown session", body = ErrorResponse),
        (status = 422, description = "Nothing has been drawn", body = ErrorResponse),
        (status = 503, description = "No model loaded", body = ErrorResponse),
        (status = 500, description = "Inference failed", body = ErrorResponse),
    ),
    params(("id" = String, Path, description = "Session identifier")),
    tag = "Sessions"
)]
pub async fn handle_classify_session<R: SessionRegistry>(
    State(config): State<Arc<AppConfig>>,
    State(registry): State<Arc<R>>,
    State(recognizer): State<Arc<Recognizer>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let snapshot = registry.snapshot(&SessionId::from(id)).await?;
    tracing::info!(session = %id, strokes = snapshot.len(), "Session classify request");

    let recognition = recognizer.recognize_snapshot(snapshot).await?;
    Ok(Json(ClassifyResponse::from_recognition(
        &recognition,
        config.preview.scale,
    )?))
}

/// Close a drawing session
#[utoipa::path(
    delete,
    path = "/api/sessions/{id}",
    responses(
        (status = 204, description = "Session closed"),
        (status = 404, description = "Unknown session", body = ErrorResponse),
    ),
    params(("id" = String, Path, description = "Session identifier")),
    tag = "Sessions"
)]
pub async fn handle_delete_session<R: SessionRegistry>(
    State(registry): State<Arc<R>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    registry.remove(&SessionId::from(id)).await?;
    tracing::debug!(session = %id, "Closed drawing session");
    Ok(StatusCode::NO_CONTENT)
}
