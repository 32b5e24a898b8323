use axum::{
    extract::State,
    response::{IntoResponse, Json},
    Json as JsonExtractor,
};
use ink_raster::{Stroke, StrokeSet};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::models::{AppConfig, Recognition};
use crate::rendering::preview_base64;
use crate::services::Recognizer;

/// Error body returned by all API endpoints
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// HTTP status code
    pub status: u16,
    /// User-facing message
    pub error: String,
    /// Machine-readable error code (e.g. `empty_drawing`)
    pub code: String,
}

/// Strokes to classify in one request
#[derive(Debug, Deserialize, ToSchema)]
pub struct ClassifyRequest {
    /// Strokes in drawing order, each a list of `[x, y]` canvas coordinates
    #[schema(value_type = Vec<Vec<Vec<f32>>>, example = json!([[[150, 40], [150, 260]]]))]
    pub strokes: Vec<Vec<[f32; 2]>>,
}

impl ClassifyRequest {
    pub fn to_stroke_set(&self) -> StrokeSet {
        self.strokes
            .iter()
            .map(|points| points.iter().copied().collect::<Stroke>())
            .collect()
    }
}

/// A successful classification
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ClassifyResponse {
    /// Status code (200 = success)
    pub status: u16,
    /// Predicted digit
    pub label: u8,
    /// Probability of the predicted digit, 0.0-1.0
    pub confidence: f32,
    /// Probability per digit 0-9
    pub probabilities: Vec<f32>,
    /// Formatted result, e.g. "Prediction: 7 (confidence: 99.0%)"
    pub message: String,
    /// Base64 PNG of the 28x28 image the model saw
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview_png: Option<String>,
}

impl ClassifyResponse {
    pub fn from_recognition(
        recognition: &Recognition,
        preview_scale: u32,
    ) -> Result<Self, ApiError> {
        let prediction = &recognition.prediction;
        Ok(Self {
            status: 200,
            label: prediction.label,
            confidence: prediction.confidence(),
            probabilities: prediction.probabilities.to_vec(),
            message: prediction.summary(),
            preview_png: Some(preview_base64(&recognition.preview, preview_scale)?),
        })
    }
}

/// Model status
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ModelStatusResponse {
    /// Whether a classifier model is loaded
    pub loaded: bool,
    /// Configured model path, if any
    #[schema(value_type = Option<String>)]
    pub path: Option<PathBuf>,
    /// Edge length of the canvas strokes are expected in
    pub canvas_size: u32,
}

/// Classify a complete drawing
///
/// Stateless: the posted strokes are rasterized, normalized to 28x28 and
/// fed to the classifier.
#[utoipa::path(
    post,
    path = "/api/classify",
    request_body = ClassifyRequest,
    responses(
        (status = 200, description = "Digit recognized", body = ClassifyResponse),
        (status = 422, description = "Nothing has been drawn", body = ErrorResponse),
        (status = 503, description = "No model loaded", body = ErrorResponse),
        (status = 500, description = "Inference failed", body = ErrorResponse),
    ),
    tag = "Classification"
)]
pub async fn handle_classify(
    State(config): State<Arc<AppConfig>>,
    State(recognizer): State<Arc<Recognizer>>,
    JsonExtractor(request): JsonExtractor<ClassifyRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let strokes = request.to_stroke_set();
    tracing::info!(
        strokes = strokes.len(),
        points = strokes.point_count(),
        "Classify request received"
    );

    let recognition = recognizer.recognize_snapshot(strokes).await?;
    Ok(Json(ClassifyResponse::from_recognition(
        &recognition,
        config.preview.scale,
    )?))
}

/// Report whether a model is loaded
#[utoipa::path(
    get,
    path = "/api/model",
    responses(
        (status = 200, description = "Model status", body = ModelStatusResponse),
    ),
    tag = "Classification"
)]
pub async fn handle_model_status(
    State(config): State<Arc<AppConfig>>,
    State(recognizer): State<Arc<Recognizer>>,
) -> impl IntoResponse {
    Json(ModelStatusResponse {
        loaded: recognizer.model_loaded(),
        path: config.model.path.clone(),
        canvas_size: config.canvas.size,
    })
}
