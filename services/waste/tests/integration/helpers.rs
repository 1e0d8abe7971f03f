use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use pilah_domain::category::WasteCategory;
use pilah_domain::status::ImageStatus;
use pilah_domain::user::UserRole;
use pilah_waste::domain::repository::{
    ClassificationRepository, ClassifierPort, ImageRepository, ImageStore, SubmissionRepository,
    UserRepository,
};
use pilah_waste::domain::types::{
    Classification, ClassifiedImage, StoredFile, Submission, SubmissionImage, UploadFile, User,
    Verdict,
};
use pilah_waste::error::WasteServiceError;

// ── MemoryDb ─────────────────────────────────────────────────────────────────

/// In-memory stand-in for the database. Clones share state, so the same
/// instance can serve every repository port of a use case pipeline.
#[derive(Clone, Default)]
pub struct MemoryDb {
    pub users: Arc<Mutex<Vec<User>>>,
    pub submissions: Arc<Mutex<Vec<Submission>>>,
    pub images: Arc<Mutex<Vec<SubmissionImage>>>,
    pub classifications: Arc<Mutex<Vec<Classification>>>,
}

impl MemoryDb {
    pub fn with_user(user: User) -> Self {
        let db = Self::default();
        db.users.lock().unwrap().push(user);
        db
    }
}

impl UserRepository for MemoryDb {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, WasteServiceError> {
        Ok(self.users.lock().unwrap().iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, WasteServiceError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn create(&self, user: &User) -> Result<(), WasteServiceError> {
        self.users.lock().unwrap().push(user.clone());
        Ok(())
    }

    async fn list(&self) -> Result<Vec<User>, WasteServiceError> {
        Ok(self.users.lock().unwrap().clone())
    }

    async fn count(&self) -> Result<u64, WasteServiceError> {
        Ok(self.users.lock().unwrap().len() as u64)
    }
}

impl SubmissionRepository for MemoryDb {
    async fn create(&self, submission: &Submission) -> Result<(), WasteServiceError> {
        self.submissions.lock().unwrap().push(submission.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Submission>, WasteServiceError> {
        Ok(self
            .submissions
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.id == id)
            .cloned())
    }

    async fn list_all(&self) -> Result<Vec<Submission>, WasteServiceError> {
        let mut rows = self.submissions.lock().unwrap().clone();
        rows.sort_by(|a, b| b.uploaded_at.cmp(&a.uploaded_at));
        Ok(rows)
    }

    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Submission>, WasteServiceError> {
        let mut rows: Vec<Submission> = self
            .submissions
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.user_id == user_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.uploaded_at.cmp(&a.uploaded_at));
        Ok(rows)
    }

    async fn latest(&self, limit: u64) -> Result<Vec<Submission>, WasteServiceError> {
        let mut rows = self.submissions.lock().unwrap().clone();
        rows.sort_by(|a, b| b.uploaded_at.cmp(&a.uploaded_at));
        rows.truncate(limit as usize);
        Ok(rows)
    }

    async fn count(&self) -> Result<u64, WasteServiceError> {
        Ok(self.submissions.lock().unwrap().len() as u64)
    }

    async fn count_by_user(&self) -> Result<Vec<(Uuid, u64)>, WasteServiceError> {
        let mut counts: HashMap<Uuid, u64> = HashMap::new();
        for s in self.submissions.lock().unwrap().iter() {
            *counts.entry(s.user_id).or_default() += 1;
        }
        Ok(counts.into_iter().collect())
    }

    async fn delete_cascade(&self, id: Uuid) -> Result<(), WasteServiceError> {
        let image_ids: Vec<Uuid> = self
            .images
            .lock()
            .unwrap()
            .iter()
            .filter(|i| i.submission_id == id)
            .map(|i| i.id)
            .collect();
        self.classifications
            .lock()
            .unwrap()
            .retain(|c| !image_ids.contains(&c.image_id));
        self.images
            .lock()
            .unwrap()
            .retain(|i| i.submission_id != id);
        self.submissions.lock().unwrap().retain(|s| s.id != id);
        Ok(())
    }
}

impl ImageRepository for MemoryDb {
    async fn create(&self, image: &SubmissionImage) -> Result<(), WasteServiceError> {
        self.images.lock().unwrap().push(image.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<SubmissionImage>, WasteServiceError> {
        Ok(self
            .images
            .lock()
            .unwrap()
            .iter()
            .find(|i| i.id == id)
            .cloned())
    }

    async fn list_by_submissions(
        &self,
        submission_ids: &[Uuid],
    ) -> Result<Vec<SubmissionImage>, WasteServiceError> {
        let mut rows: Vec<SubmissionImage> = self
            .images
            .lock()
            .unwrap()
            .iter()
            .filter(|i| submission_ids.contains(&i.submission_id))
            .cloned()
            .collect();
        rows.sort_by_key(|i| i.id);
        Ok(rows)
    }

    async fn count_by_submission(
        &self,
        submission_ids: &[Uuid],
    ) -> Result<Vec<(Uuid, u64)>, WasteServiceError> {
        let mut counts: HashMap<Uuid, u64> = HashMap::new();
        for i in self.images.lock().unwrap().iter() {
            if submission_ids.contains(&i.submission_id) {
                *counts.entry(i.submission_id).or_default() += 1;
            }
        }
        Ok(counts.into_iter().collect())
    }

    async fn set_status(&self, id: Uuid, status: ImageStatus) -> Result<(), WasteServiceError> {
        for image in self.images.lock().unwrap().iter_mut() {
            if image.id == id {
                image.status = status;
                image.updated_at = Utc::now();
            }
        }
        Ok(())
    }

    async fn reclaim_stale(&self, cutoff: DateTime<Utc>) -> Result<u64, WasteServiceError> {
        let mut reclaimed = 0;
        for image in self.images.lock().unwrap().iter_mut() {
            if image.status == ImageStatus::Processing && image.updated_at < cutoff {
                image.status = ImageStatus::Failed;
                image.updated_at = Utc::now();
                reclaimed += 1;
            }
        }
        Ok(reclaimed)
    }
}

impl ClassificationRepository for MemoryDb {
    async fn create(&self, classification: &Classification) -> Result<(), WasteServiceError> {
        self.classifications
            .lock()
            .unwrap()
            .push(classification.clone());
        Ok(())
    }

    async fn list_by_images(
        &self,
        image_ids: &[Uuid],
    ) -> Result<Vec<Classification>, WasteServiceError> {
        Ok(self
            .classifications
            .lock()
            .unwrap()
            .iter()
            .filter(|c| image_ids.contains(&c.image_id))
            .cloned()
            .collect())
    }

    async fn list_completed(&self) -> Result<Vec<ClassifiedImage>, WasteServiceError> {
        let images = self.images.lock().unwrap().clone();
        let submissions = self.submissions.lock().unwrap().clone();
        Ok(self
            .classifications
            .lock()
            .unwrap()
            .iter()
            .filter_map(|c| {
                let image = images
                    .iter()
                    .find(|i| i.id == c.image_id && i.status == ImageStatus::Completed)?;
                let submission = submissions.iter().find(|s| s.id == image.submission_id)?;
                Some(ClassifiedImage {
                    classification: c.clone(),
                    image_url: image.image_url.clone(),
                    submission_id: submission.id,
                    username: submission.username.clone(),
                })
            })
            .collect())
    }
}

// ── MemoryStore ──────────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MemoryStore {
    pub files: Arc<Mutex<HashMap<String, StoredFile>>>,
}

impl ImageStore for MemoryStore {
    async fn put(&self, file: &UploadFile) -> Result<String, WasteServiceError> {
        let url = format!("/api/uploads/{}-{}", Uuid::new_v4(), file.file_name);
        self.files.lock().unwrap().insert(
            url.clone(),
            StoredFile {
                bytes: file.bytes.clone(),
                content_type: file.content_type.clone(),
            },
        );
        Ok(url)
    }

    async fn fetch(&self, image_url: &str) -> Result<Option<StoredFile>, WasteServiceError> {
        Ok(self.files.lock().unwrap().get(image_url).cloned())
    }

    async fn remove(&self, image_url: &str) -> Result<(), WasteServiceError> {
        self.files.lock().unwrap().remove(image_url);
        Ok(())
    }
}

// ── Classifier stubs ─────────────────────────────────────────────────────────

/// Always returns the given verdict.
#[derive(Clone)]
pub struct StubClassifier {
    pub verdict: Verdict,
}

impl ClassifierPort for StubClassifier {
    async fn classify(
        &self,
        _image: &[u8],
        _content_type: &str,
    ) -> Result<Verdict, WasteServiceError> {
        Ok(self.verdict.clone())
    }
}

/// Always fails, as if the upstream service were down.
#[derive(Clone)]
pub struct BrokenClassifier;

impl ClassifierPort for BrokenClassifier {
    async fn classify(
        &self,
        _image: &[u8],
        _content_type: &str,
    ) -> Result<Verdict, WasteServiceError> {
        Err(WasteServiceError::Internal(anyhow::anyhow!("upstream 503")))
    }
}

// ── Fixtures ─────────────────────────────────────────────────────────────────

pub fn test_user() -> User {
    User {
        id: Uuid::now_v7(),
        name: "siti".to_owned(),
        email: "siti@example.com".to_owned(),
        password_hash: "$argon2id$stub".to_owned(),
        role: UserRole::User,
        created_at: Utc::now(),
    }
}

pub fn organik_verdict() -> Verdict {
    Verdict {
        category: WasteCategory::Organik,
        confidence: 0.92,
        count: Some(1),
    }
}

pub fn jpeg(name: &str) -> UploadFile {
    UploadFile {
        file_name: name.to_owned(),
        content_type: "image/jpeg".to_owned(),
        bytes: vec![0xff, 0xd8, 0xff, 0xe0],
    }
}
