use anyhow::Context as _;
use chrono::Utc;
use uuid::Uuid;

use pilah_domain::status::ImageStatus;

use crate::domain::repository::{ClassificationRepository, ClassifierPort, ImageRepository, ImageStore};
use crate::domain::types::{Classification, ClassifyPolicy, Verdict};
use crate::error::WasteServiceError;

/// Final state of one image's classification run.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationOutcome {
    pub image_id: Uuid,
    pub status: ImageStatus,
    pub attempts: u32,
    pub verdict: Option<Verdict>,
}

/// Drives a single image from `Pending` to a terminal status: claim it as
/// `Processing`, call the classifier with a per-call timeout, and persist
/// either the verdict or a `Failed` marker. Never leaves the image in
/// `Processing` on a classifier failure.
pub struct ClassifyImageUseCase<I, C, S, P> {
    pub images: I,
    pub classifications: C,
    pub classifier: S,
    pub store: P,
    pub policy: ClassifyPolicy,
}

impl<I, C, S, P> ClassifyImageUseCase<I, C, S, P>
where
    I: ImageRepository,
    C: ClassificationRepository,
    S: ClassifierPort,
    P: ImageStore,
{
    /// Like [`execute`](Self::execute), but first checks that the caller's
    /// url and submission reference match the stored row. A stale or
    /// mismatched reference is treated the same as an unknown image.
    pub async fn execute_verified(
        &self,
        image_id: Uuid,
        image_url: &str,
        submission_id: Uuid,
    ) -> Result<ClassificationOutcome, WasteServiceError> {
        let image = self
            .images
            .find_by_id(image_id)
            .await?
            .ok_or(WasteServiceError::ImageNotFound)?;
        if image.image_url != image_url || image.submission_id != submission_id {
            return Err(WasteServiceError::ImageNotFound);
        }
        self.execute(image_id).await
    }

    pub async fn execute(&self, image_id: Uuid) -> Result<ClassificationOutcome, WasteServiceError> {
        let image = self
            .images
            .find_by_id(image_id)
            .await?
            .ok_or(WasteServiceError::ImageNotFound)?;

        image
            .status
            .transition(ImageStatus::Processing)
            .map_err(|_| WasteServiceError::IllegalTransition)?;
        self.images
            .set_status(image.id, ImageStatus::Processing)
            .await?;

        let Some(file) = self.store.fetch(&image.image_url).await? else {
            tracing::warn!(image_id = %image.id, url = %image.image_url, "stored file missing; failing image");
            self.images.set_status(image.id, ImageStatus::Failed).await?;
            return Ok(ClassificationOutcome {
                image_id: image.id,
                status: ImageStatus::Failed,
                attempts: 0,
                verdict: None,
            });
        };

        let mut attempts = 0;
        let verdict = loop {
            attempts += 1;
            let call = self.classifier.classify(&file.bytes, &file.content_type);
            match tokio::time::timeout(self.policy.call_timeout, call).await {
                Ok(Ok(verdict)) => break Some(verdict),
                Ok(Err(err)) => {
                    tracing::warn!(image_id = %image.id, attempts, %err, "classifier call failed");
                }
                Err(_) => {
                    tracing::warn!(image_id = %image.id, attempts, "classifier call timed out");
                }
            }
            if attempts >= self.policy.max_attempts {
                break None;
            }
        };

        match verdict {
            Some(verdict) => {
                let classification = Classification {
                    id: Uuid::now_v7(),
                    image_id: image.id,
                    result: verdict.category,
                    confidence: verdict.confidence,
                    waste_count: verdict.count,
                    created_at: Utc::now(),
                };
                self.classifications
                    .create(&classification)
                    .await
                    .context("persist classification")
                    .map_err(WasteServiceError::Internal)?;
                self.images
                    .set_status(image.id, ImageStatus::Completed)
                    .await?;
                Ok(ClassificationOutcome {
                    image_id: image.id,
                    status: ImageStatus::Completed,
                    attempts,
                    verdict: Some(verdict),
                })
            }
            None => {
                self.images.set_status(image.id, ImageStatus::Failed).await?;
                Ok(ClassificationOutcome {
                    image_id: image.id,
                    status: ImageStatus::Failed,
                    attempts,
                    verdict: None,
                })
            }
        }
    }
}
