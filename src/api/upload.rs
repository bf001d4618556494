use axum::{
    body::Bytes,
    extract::State,
    http::{header::CONTENT_TYPE, HeaderMap},
    Json,
};
use serde::Serialize;

use crate::{error::Result, models::ApiResponse};

use super::AppState;

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub url: String,
}

/// POST /api/v1/upload
///
/// Raw image bytes in the body, MIME type in `Content-Type`.
pub async fn upload_image(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<ApiResponse<UploadResponse>>> {
    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();
    let url = state.uploader.upload(&body, content_type).await?;
    Ok(Json(ApiResponse::success(UploadResponse { url })))
}
