#![allow(async_fn_in_trait)]

use chrono::{DateTime, Utc};
use uuid::Uuid;

use pilah_domain::status::ImageStatus;

use crate::domain::types::{
    Classification, ClassifiedImage, StoredFile, Submission, SubmissionImage, UploadFile, User,
    Verdict,
};
use crate::error::WasteServiceError;

/// Repository for registered users.
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, WasteServiceError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, WasteServiceError>;
    async fn create(&self, user: &User) -> Result<(), WasteServiceError>;
    async fn list(&self) -> Result<Vec<User>, WasteServiceError>;
    async fn count(&self) -> Result<u64, WasteServiceError>;
}

/// Repository for upload batches.
pub trait SubmissionRepository: Send + Sync {
    async fn create(&self, submission: &Submission) -> Result<(), WasteServiceError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Submission>, WasteServiceError>;
    /// All submissions, newest first.
    async fn list_all(&self) -> Result<Vec<Submission>, WasteServiceError>;
    /// One user's submissions, newest first.
    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Submission>, WasteServiceError>;
    async fn latest(&self, limit: u64) -> Result<Vec<Submission>, WasteServiceError>;
    async fn count(&self) -> Result<u64, WasteServiceError>;
    /// Submission count per user id.
    async fn count_by_user(&self) -> Result<Vec<(Uuid, u64)>, WasteServiceError>;
    /// Delete the submission, its images, and their classifications in one
    /// transaction. Stored files are the caller's concern.
    async fn delete_cascade(&self, id: Uuid) -> Result<(), WasteServiceError>;
}

/// Repository for per-image records.
pub trait ImageRepository: Send + Sync {
    async fn create(&self, image: &SubmissionImage) -> Result<(), WasteServiceError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<SubmissionImage>, WasteServiceError>;
    async fn list_by_submissions(
        &self,
        submission_ids: &[Uuid],
    ) -> Result<Vec<SubmissionImage>, WasteServiceError>;
    /// Image count per submission id.
    async fn count_by_submission(
        &self,
        submission_ids: &[Uuid],
    ) -> Result<Vec<(Uuid, u64)>, WasteServiceError>;
    /// Write a new status and bump `updated_at`.
    async fn set_status(&self, id: Uuid, status: ImageStatus) -> Result<(), WasteServiceError>;
    /// Mark `Processing` rows older than `cutoff` as `Failed`; returns the
    /// number of reclaimed rows. Desugared: the reclaim sweep awaits this
    /// inside a spawned task, so the future has to be `Send`.
    fn reclaim_stale(
        &self,
        cutoff: DateTime<Utc>,
    ) -> impl Future<Output = Result<u64, WasteServiceError>> + Send;
}

/// Repository for classification results.
pub trait ClassificationRepository: Send + Sync {
    async fn create(&self, classification: &Classification) -> Result<(), WasteServiceError>;
    async fn list_by_images(
        &self,
        image_ids: &[Uuid],
    ) -> Result<Vec<Classification>, WasteServiceError>;
    /// All classifications of `Completed` images joined with their image
    /// and submission context.
    async fn list_completed(&self) -> Result<Vec<ClassifiedImage>, WasteServiceError>;
}

/// Port for durable image file storage.
pub trait ImageStore: Send + Sync {
    /// Persist `bytes` under a fresh storage name derived from the original
    /// file name; returns the public URL.
    async fn put(&self, file: &UploadFile) -> Result<String, WasteServiceError>;
    /// Fetch a stored file by its public URL. `None` when absent.
    async fn fetch(&self, image_url: &str) -> Result<Option<StoredFile>, WasteServiceError>;
    /// Remove a stored file; absent files are not an error.
    async fn remove(&self, image_url: &str) -> Result<(), WasteServiceError>;
}

/// Port for the external image classifier.
pub trait ClassifierPort: Send + Sync {
    async fn classify(
        &self,
        image: &[u8],
        content_type: &str,
    ) -> Result<Verdict, WasteServiceError>;
}
