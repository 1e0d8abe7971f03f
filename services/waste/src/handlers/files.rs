use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};

use crate::domain::repository::ImageStore as _;
use crate::error::WasteServiceError;
use crate::infra::storage::PUBLIC_PREFIX;
use crate::state::AppState;

// ── GET /api/uploads/{filename} ──────────────────────────────────────────────

pub async fn get_upload(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<Response, WasteServiceError> {
    let file = state
        .store
        .fetch(&format!("{PUBLIC_PREFIX}{filename}"))
        .await?
        .ok_or(WasteServiceError::FileNotFound)?;
    Ok((
        [(header::CONTENT_TYPE, file.content_type)],
        file.bytes,
    )
        .into_response())
}
