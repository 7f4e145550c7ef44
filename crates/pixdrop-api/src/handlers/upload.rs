use crate::error::{HttpAppError, ValidatedJson};
use crate::state::AppState;
use axum::{extract::State, response::IntoResponse, Json};
use pixdrop_core::UploadRequest;
use std::sync::Arc;

/// `POST /upload`: transform (optionally) and store one image, returning its public URL
#[tracing::instrument(skip(state, request), fields(destination_path = %request.destination_path))]
pub async fn upload(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<UploadRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    let response = state.upload_service.upload(request).await?;
    Ok(Json(response))
}
