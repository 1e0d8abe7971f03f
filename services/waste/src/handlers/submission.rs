use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Serialize;
use uuid::Uuid;

use pilah_auth_types::identity::IdentityHeaders;

use crate::error::WasteServiceError;
use crate::state::AppState;
use crate::usecase::submission::{DeleteSubmissionUseCase, GetSubmissionUseCase};

// ── GET /api/submissions/{id} ────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageDetail {
    pub id: String,
    pub image_url: String,
    pub status: String,
    pub result: Option<String>,
    pub confidence: Option<f64>,
    pub waste_count: Option<i32>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionDetailResponse {
    pub id: String,
    pub username: String,
    #[serde(serialize_with = "pilah_core::serde::to_rfc3339_ms")]
    pub uploaded_at: chrono::DateTime<chrono::Utc>,
    pub images: Vec<ImageDetail>,
}

pub async fn get_submission(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SubmissionDetailResponse>, WasteServiceError> {
    let usecase = GetSubmissionUseCase {
        submissions: state.submission_repo(),
        images: state.image_repo(),
        classifications: state.classification_repo(),
    };
    let detail = usecase
        .execute(id, identity.user_id, identity.user_role)
        .await?;

    Ok(Json(SubmissionDetailResponse {
        id: detail.submission.id.to_string(),
        username: detail.submission.username,
        uploaded_at: detail.submission.uploaded_at,
        images: detail
            .images
            .into_iter()
            .map(|(image, classification)| ImageDetail {
                id: image.id.to_string(),
                image_url: image.image_url,
                status: image.status.to_string(),
                result: classification.as_ref().map(|c| c.result.to_string()),
                confidence: classification.as_ref().map(|c| c.confidence),
                waste_count: classification.as_ref().and_then(|c| c.waste_count),
            })
            .collect(),
    }))
}

// ── DELETE /api/submissions/{id} ─────────────────────────────────────────────

pub async fn delete_submission(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, WasteServiceError> {
    let usecase = DeleteSubmissionUseCase {
        submissions: state.submission_repo(),
        images: state.image_repo(),
        store: state.store.clone(),
    };
    usecase
        .execute(id, identity.user_id, identity.user_role)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
