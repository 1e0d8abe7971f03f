use std::collections::HashMap;

use axum::{Json, extract::State};
use serde::Serialize;

use pilah_auth_types::identity::IdentityHeaders;

use crate::error::WasteServiceError;
use crate::state::AppState;
use crate::usecase::status::SubmissionsStatusUseCase;

// ── GET /api/submissions ─────────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRow {
    pub id: String,
    pub username: String,
    #[serde(serialize_with = "pilah_core::serde::to_rfc3339_ms")]
    pub uploaded_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewEntry {
    pub image_url: String,
    pub status: String,
    pub result: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub submissions: Vec<SubmissionRow>,
    pub preview_map: HashMap<String, PreviewEntry>,
    pub image_count_map: HashMap<String, u64>,
}

pub async fn get_submissions(
    identity: IdentityHeaders,
    State(state): State<AppState>,
) -> Result<Json<StatusResponse>, WasteServiceError> {
    let usecase = SubmissionsStatusUseCase {
        submissions: state.submission_repo(),
        images: state.image_repo(),
        classifications: state.classification_repo(),
    };
    let projection = usecase.execute(identity.user_id, identity.user_role).await?;

    Ok(Json(StatusResponse {
        submissions: projection
            .submissions
            .into_iter()
            .map(|s| SubmissionRow {
                id: s.id.to_string(),
                username: s.username,
                uploaded_at: s.uploaded_at,
            })
            .collect(),
        preview_map: projection
            .previews
            .into_iter()
            .map(|(id, p)| {
                (
                    id.to_string(),
                    PreviewEntry {
                        image_url: p.image_url,
                        status: p.status.to_string(),
                        result: p.result.map(|c| c.to_string()),
                    },
                )
            })
            .collect(),
        image_count_map: projection
            .image_counts
            .into_iter()
            .map(|(id, n)| (id.to_string(), n))
            .collect(),
    }))
}
