use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Session not found")]
    SessionNotFound,

    #[error("Not found")]
    NotFound,

    #[error("{0}")]
    Recognize(#[from] RecognizeError),

    #[error("Rendering error: {0}")]
    Render(#[from] RenderError),
}

impl ApiError {
    /// Stable machine-readable error code for clients.
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::SessionNotFound => "session_not_found",
            ApiError::NotFound => "not_found",
            ApiError::Recognize(RecognizeError::EmptyDrawing) => "empty_drawing",
            ApiError::Recognize(RecognizeError::ModelUnavailable) => "model_unavailable",
            ApiError::Recognize(RecognizeError::Inference(_)) => "inference_error",
            ApiError::Render(_) => "render_error",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            ApiError::SessionNotFound | ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Recognize(RecognizeError::EmptyDrawing) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Recognize(RecognizeError::ModelUnavailable) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            ApiError::Recognize(RecognizeError::Inference(_)) | ApiError::Render(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

/// Failure at the classifier boundary.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClassifyError {
    #[error("Model is not available")]
    ModelUnavailable,

    #[error("Inference failed: {0}")]
    Inference(String),
}

/// Outcome of a recognition attempt that produced no prediction.
///
/// The `Display` text is the user-facing message.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecognizeError {
    #[error("Nothing has been drawn yet")]
    EmptyDrawing,

    #[error("Model is not available")]
    ModelUnavailable,

    #[error("Error: {0}")]
    Inference(String),
}

impl From<ink_raster::EmptyDrawing> for RecognizeError {
    fn from(_: ink_raster::EmptyDrawing) -> Self {
        RecognizeError::EmptyDrawing
    }
}

impl From<ClassifyError> for RecognizeError {
    fn from(e: ClassifyError) -> Self {
        match e {
            ClassifyError::ModelUnavailable => RecognizeError::ModelUnavailable,
            ClassifyError::Inference(message) => RecognizeError::Inference(message),
        }
    }
}

/// Failure to load a model artifact.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Model file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Model parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid model: {0}")]
    Invalid(String),
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Invalid image dimensions: {width}x{height} for {len} bytes")]
    InvalidDimensions { width: u32, height: u32, len: usize },

    #[error("PNG encode error: {0}")]
    PngEncode(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            ApiError::Recognize(RecognizeError::EmptyDrawing) => {
                tracing::debug!(error = %self, "Rejected request")
            }
            _ if status.is_server_error() => tracing::warn!(error = %self, "Request failed"),
            _ => {}
        }

        let body = Json(json!({
            "status": status.as_u16(),
            "error": self.to_string(),
            "code": self.code(),
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recognize_error_messages() {
        assert_eq!(
            RecognizeError::EmptyDrawing.to_string(),
            "Nothing has been drawn yet"
        );
        assert_eq!(
            RecognizeError::ModelUnavailable.to_string(),
            "Model is not available"
        );
        assert_eq!(
            RecognizeError::Inference("shape mismatch".to_string()).to_string(),
            "Error: shape mismatch"
        );
    }

    #[test]
    fn test_classify_error_maps_to_recognize_error() {
        assert_eq!(
            RecognizeError::from(ClassifyError::ModelUnavailable),
            RecognizeError::ModelUnavailable
        );
        assert_eq!(
            RecognizeError::from(ClassifyError::Inference("boom".into())),
            RecognizeError::Inference("boom".into())
        );
    }

    #[test]
    fn test_empty_drawing_maps_to_recognize_error() {
        assert_eq!(
            RecognizeError::from(ink_raster::EmptyDrawing),
            RecognizeError::EmptyDrawing
        );
    }

    #[test]
    fn test_model_error_not_found_shows_path() {
        let error = ModelError::NotFound(PathBuf::from("assets/missing.json"));
        assert_eq!(error.to_string(), "Model file not found: assets/missing.json");
    }

    #[test]
    fn test_render_error_invalid_dimensions() {
        let error = RenderError::InvalidDimensions {
            width: 28,
            height: 28,
            len: 10,
        };
        assert_eq!(
            error.to_string(),
            "Invalid image dimensions: 28x28 for 10 bytes"
        );
    }

    #[test]
    fn test_api_error_codes() {
        assert_eq!(ApiError::SessionNotFound.code(), "session_not_found");
        assert_eq!(
            ApiError::Recognize(RecognizeError::EmptyDrawing).code(),
            "empty_drawing"
        );
        assert_eq!(
            ApiError::Recognize(RecognizeError::ModelUnavailable).code(),
            "model_unavailable"
        );
        assert_eq!(
            ApiError::Recognize(RecognizeError::Inference("x".into())).code(),
            "inference_error"
        );
    }

    #[test]
    fn test_api_error_into_response_status_codes() {
        let response = ApiError::SessionNotFound.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = ApiError::NotFound.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = ApiError::Recognize(RecognizeError::EmptyDrawing).into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let response = ApiError::Recognize(RecognizeError::ModelUnavailable).into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let response =
            ApiError::Recognize(RecognizeError::Inference("bad".into())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = ApiError::Render(RenderError::PngEncode("x".into())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
