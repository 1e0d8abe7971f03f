use axum::{Json, extract::Multipart, extract::State, http::StatusCode};
use serde::Serialize;

use pilah_auth_types::identity::IdentityHeaders;

use crate::domain::types::UploadFile;
use crate::error::WasteServiceError;
use crate::state::AppState;
use crate::usecase::classify::ClassifyImageUseCase;
use crate::usecase::upload::UploadImagesUseCase;

// ── POST /api/upload ─────────────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub submission_id: String,
    pub image_ids: Vec<String>,
}

pub async fn upload_images(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<UploadResponse>), WasteServiceError> {
    let mut files = Vec::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| WasteServiceError::InvalidUpload)?
    {
        if field.name() != Some("images") {
            continue;
        }
        let file_name = field
            .file_name()
            .unwrap_or("upload")
            .to_owned();
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_owned();
        let bytes = field
            .bytes()
            .await
            .map_err(|_| WasteServiceError::InvalidUpload)?;
        if bytes.is_empty() {
            continue;
        }
        files.push(UploadFile {
            file_name,
            content_type,
            bytes: bytes.to_vec(),
        });
    }

    let usecase = UploadImagesUseCase {
        users: state.user_repo(),
        submissions: state.submission_repo(),
        images: state.image_repo(),
        store: state.store.clone(),
    };
    let outcome = usecase.execute(identity.user_id, files).await?;

    // Classification runs in the background; the response only confirms
    // the rows were created.
    for image_id in &outcome.image_ids {
        let work = ClassifyImageUseCase {
            images: state.image_repo(),
            classifications: state.classification_repo(),
            classifier: state.classifier.clone(),
            store: state.store.clone(),
            policy: state.dispatcher.policy(),
        };
        let image_id = *image_id;
        state
            .dispatcher
            .spawn(image_id, async move { work.execute(image_id).await });
    }

    Ok((
        StatusCode::CREATED,
        Json(UploadResponse {
            submission_id: outcome.submission_id.to_string(),
            image_ids: outcome.image_ids.iter().map(|id| id.to_string()).collect(),
        }),
    ))
}
