use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use pilah_auth_types::identity::IdentityHeaders;

use crate::error::WasteServiceError;
use crate::state::AppState;
use crate::usecase::classify::ClassifyImageUseCase;

// ── POST /api/classify ───────────────────────────────────────────────────────

/// Body mirrors the upload response so a client can re-request
/// classification for an image it already knows about. All three fields
/// must match the stored row; a stale reference gets 404.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifyRequest {
    pub image_id: Option<Uuid>,
    pub image_url: Option<String>,
    pub submission_id: Option<Uuid>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifyResponse {
    pub image_id: String,
    pub status: String,
    pub attempts: u32,
}

/// Classify one image synchronously. Unlike the upload path this waits for
/// the classifier, so the caller sees the terminal status in the response.
pub async fn classify_image(
    _identity: IdentityHeaders,
    State(state): State<AppState>,
    Json(body): Json<ClassifyRequest>,
) -> Result<Json<ClassifyResponse>, WasteServiceError> {
    let (Some(image_id), Some(image_url), Some(submission_id)) =
        (body.image_id, body.image_url, body.submission_id)
    else {
        return Err(WasteServiceError::MissingData);
    };

    let usecase = ClassifyImageUseCase {
        images: state.image_repo(),
        classifications: state.classification_repo(),
        classifier: state.classifier.clone(),
        store: state.store.clone(),
        policy: state.dispatcher.policy(),
    };
    let outcome = usecase
        .execute_verified(image_id, &image_url, submission_id)
        .await?;
    Ok(Json(ClassifyResponse {
        image_id: outcome.image_id.to_string(),
        status: outcome.status.to_string(),
        attempts: outcome.attempts,
    }))
}
