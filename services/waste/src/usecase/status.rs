use std::collections::HashMap;

use uuid::Uuid;

use pilah_domain::category::WasteCategory;
use pilah_domain::status::ImageStatus;
use pilah_domain::user::UserRole;

use crate::domain::repository::{ClassificationRepository, ImageRepository, SubmissionRepository};
use crate::domain::types::{Classification, Submission, SubmissionImage};
use crate::error::WasteServiceError;

/// Preview of a submission's first image for the history list.
#[derive(Debug, Clone, PartialEq)]
pub struct Preview {
    pub image_url: String,
    pub status: ImageStatus,
    /// Verdict when `Completed`; the failure sentinel when `Failed`; `None`
    /// while still in flight.
    pub result: Option<WasteCategory>,
}

/// Read model for the submission history view.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusProjection {
    /// Visible submissions, newest first.
    pub submissions: Vec<Submission>,
    /// First-image preview keyed by submission id. Submissions without
    /// images have no entry.
    pub previews: HashMap<Uuid, Preview>,
    /// Image count keyed by submission id.
    pub image_counts: HashMap<Uuid, u64>,
}

/// Assembles the polling view: admins see every submission, other callers
/// only their own.
pub struct SubmissionsStatusUseCase<S, I, C> {
    pub submissions: S,
    pub images: I,
    pub classifications: C,
}

impl<S, I, C> SubmissionsStatusUseCase<S, I, C>
where
    S: SubmissionRepository,
    I: ImageRepository,
    C: ClassificationRepository,
{
    pub async fn execute(
        &self,
        user_id: Uuid,
        role: UserRole,
    ) -> Result<StatusProjection, WasteServiceError> {
        let submissions = if role.is_admin() {
            self.submissions.list_all().await?
        } else {
            self.submissions.list_by_user(user_id).await?
        };
        let submission_ids: Vec<Uuid> = submissions.iter().map(|s| s.id).collect();
        let images = self.images.list_by_submissions(&submission_ids).await?;
        let image_ids: Vec<Uuid> = images.iter().map(|i| i.id).collect();
        let classifications = self.classifications.list_by_images(&image_ids).await?;
        Ok(assemble(submissions, &images, &classifications))
    }
}

/// Builds the projection from already-loaded rows. Deterministic: the same
/// inputs always yield the same projection.
pub fn assemble(
    submissions: Vec<Submission>,
    images: &[SubmissionImage],
    classifications: &[Classification],
) -> StatusProjection {
    let verdicts: HashMap<Uuid, WasteCategory> = classifications
        .iter()
        .map(|c| (c.image_id, c.result))
        .collect();

    // First image per submission; `id` is a v7 uuid so ordering by id is
    // upload order.
    let mut first_image: HashMap<Uuid, &SubmissionImage> = HashMap::new();
    let mut image_counts: HashMap<Uuid, u64> = HashMap::new();
    for image in images {
        *image_counts.entry(image.submission_id).or_default() += 1;
        first_image
            .entry(image.submission_id)
            .and_modify(|current| {
                if image.id < current.id {
                    *current = image;
                }
            })
            .or_insert(image);
    }

    let previews = first_image
        .into_iter()
        .map(|(submission_id, image)| {
            let result = match image.status {
                ImageStatus::Completed => verdicts.get(&image.id).copied(),
                ImageStatus::Failed => Some(WasteCategory::GagalKlasifikasi),
                ImageStatus::Pending | ImageStatus::Processing => None,
            };
            (
                submission_id,
                Preview {
                    image_url: image.image_url.clone(),
                    status: image.status,
                    result,
                },
            )
        })
        .collect();

    StatusProjection {
        submissions,
        previews,
        image_counts,
    }
}
