use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use crate::assets::AssetLoader;
use crate::error::ApiError;

/// Serve the drawing page
pub async fn handle_index(State(assets): State<Arc<AssetLoader>>) -> Result<Response, ApiError> {
    let page = assets.read_web("index.html").ok_or(ApiError::NotFound)?;
    Ok((
        [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
        page.into_owned(),
    )
        .into_response())
}
