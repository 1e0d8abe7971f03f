use uuid::Uuid;

use pilah_domain::user::UserRole;

use crate::domain::repository::{
    ClassificationRepository, ImageRepository, ImageStore, SubmissionRepository,
};
use crate::domain::types::{Classification, Submission, SubmissionImage};
use crate::error::WasteServiceError;

/// Full view of one submission: every image with its classification, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionDetail {
    pub submission: Submission,
    pub images: Vec<(SubmissionImage, Option<Classification>)>,
}

fn authorize(submission: &Submission, user_id: Uuid, role: UserRole) -> Result<(), WasteServiceError> {
    if submission.user_id == user_id || role.is_admin() {
        Ok(())
    } else {
        Err(WasteServiceError::Forbidden)
    }
}

pub struct GetSubmissionUseCase<S, I, C> {
    pub submissions: S,
    pub images: I,
    pub classifications: C,
}

impl<S, I, C> GetSubmissionUseCase<S, I, C>
where
    S: SubmissionRepository,
    I: ImageRepository,
    C: ClassificationRepository,
{
    pub async fn execute(
        &self,
        submission_id: Uuid,
        user_id: Uuid,
        role: UserRole,
    ) -> Result<SubmissionDetail, WasteServiceError> {
        let submission = self
            .submissions
            .find_by_id(submission_id)
            .await?
            .ok_or(WasteServiceError::SubmissionNotFound)?;
        authorize(&submission, user_id, role)?;

        let images = self.images.list_by_submissions(&[submission.id]).await?;
        let image_ids: Vec<Uuid> = images.iter().map(|i| i.id).collect();
        let classifications = self.classifications.list_by_images(&image_ids).await?;

        let images = images
            .into_iter()
            .map(|image| {
                let classification = classifications
                    .iter()
                    .find(|c| c.image_id == image.id)
                    .cloned();
                (image, classification)
            })
            .collect();
        Ok(SubmissionDetail { submission, images })
    }
}

pub struct DeleteSubmissionUseCase<S, I, F> {
    pub submissions: S,
    pub images: I,
    pub store: F,
}

impl<S, I, F> DeleteSubmissionUseCase<S, I, F>
where
    S: SubmissionRepository,
    I: ImageRepository,
    F: ImageStore,
{
    pub async fn execute(
        &self,
        submission_id: Uuid,
        user_id: Uuid,
        role: UserRole,
    ) -> Result<(), WasteServiceError> {
        let submission = self
            .submissions
            .find_by_id(submission_id)
            .await?
            .ok_or(WasteServiceError::SubmissionNotFound)?;
        authorize(&submission, user_id, role)?;

        let images = self.images.list_by_submissions(&[submission.id]).await?;
        self.submissions.delete_cascade(submission.id).await?;

        // Rows are gone; file removal is best effort.
        for image in &images {
            if let Err(err) = self.store.remove(&image.image_url).await {
                tracing::warn!(url = %image.image_url, %err, "failed to remove stored file");
            }
        }
        Ok(())
    }
}
