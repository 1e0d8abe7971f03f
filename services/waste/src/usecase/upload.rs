use chrono::Utc;
use uuid::Uuid;

use pilah_domain::status::ImageStatus;

use crate::domain::repository::{ImageRepository, ImageStore, SubmissionRepository, UserRepository};
use crate::domain::types::{Submission, SubmissionImage, UploadFile};
use crate::error::WasteServiceError;

/// One submission's worth of uploaded images, stored and queued as `Pending`.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadOutcome {
    pub submission_id: Uuid,
    pub image_ids: Vec<Uuid>,
}

pub struct UploadImagesUseCase<U, S, I, F> {
    pub users: U,
    pub submissions: S,
    pub images: I,
    pub store: F,
}

impl<U, S, I, F> UploadImagesUseCase<U, S, I, F>
where
    U: UserRepository,
    S: SubmissionRepository,
    I: ImageRepository,
    F: ImageStore,
{
    pub async fn execute(
        &self,
        user_id: Uuid,
        files: Vec<UploadFile>,
    ) -> Result<UploadOutcome, WasteServiceError> {
        if files.is_empty() {
            return Err(WasteServiceError::EmptyUpload);
        }
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(WasteServiceError::InvalidSession)?;

        let submission = Submission {
            id: Uuid::now_v7(),
            user_id: user.id,
            username: user.name.clone(),
            uploaded_at: Utc::now(),
        };
        self.submissions.create(&submission).await?;

        let mut image_ids = Vec::with_capacity(files.len());
        for file in &files {
            let image_url = match self.store.put(file).await {
                Ok(url) => url,
                Err(err) => {
                    // A single bad file must not sink the rest of the batch.
                    tracing::warn!(file_name = %file.file_name, %err, "store upload failed; skipping file");
                    continue;
                }
            };
            let image = SubmissionImage {
                id: Uuid::now_v7(),
                submission_id: submission.id,
                image_url,
                status: ImageStatus::Pending,
                updated_at: Utc::now(),
            };
            self.images.create(&image).await?;
            image_ids.push(image.id);
        }

        if image_ids.is_empty() {
            // Every file was rejected by the store; nothing to classify.
            return Err(WasteServiceError::InvalidUpload);
        }

        Ok(UploadOutcome {
            submission_id: submission.id,
            image_ids,
        })
    }
}
