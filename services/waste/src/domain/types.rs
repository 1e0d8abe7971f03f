use std::time::Duration;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use pilah_domain::category::WasteCategory;
use pilah_domain::status::ImageStatus;
use pilah_domain::user::UserRole;

#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub id: Uuid,
    pub user_id: Uuid,
    pub username: String,
    pub uploaded_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionImage {
    pub id: Uuid,
    pub submission_id: Uuid,
    pub image_url: String,
    pub status: ImageStatus,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub id: Uuid,
    pub image_id: Uuid,
    pub result: WasteCategory,
    pub confidence: f64,
    pub waste_count: Option<i32>,
    pub created_at: DateTime<Utc>,
}

/// Parsed classifier verdict, constrained to the closed category set with
/// confidence clamped into [0, 1].
#[derive(Debug, Clone, PartialEq)]
pub struct Verdict {
    pub category: WasteCategory,
    pub confidence: f64,
    pub count: Option<i32>,
}

/// One file received in a multipart upload.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// File contents returned by the image store.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredFile {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

/// Classification joined with its image and submission context, for the
/// admin category report.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedImage {
    pub classification: Classification,
    pub image_url: String,
    pub submission_id: Uuid,
    pub username: String,
}

/// Timeout/retry policy applied to each image's classification attempt.
#[derive(Debug, Clone, Copy)]
pub struct ClassifyPolicy {
    /// Per-call timeout for the external classifier.
    pub call_timeout: Duration,
    /// Attempts per image including the first call.
    pub max_attempts: u32,
}

impl Default for ClassifyPolicy {
    fn default() -> Self {
        Self {
            call_timeout: Duration::from_secs(60),
            max_attempts: 2,
        }
    }
}
