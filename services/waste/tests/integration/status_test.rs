use std::time::Duration;

use pilah_domain::category::WasteCategory;
use pilah_domain::status::ImageStatus;
use pilah_domain::user::UserRole;
use pilah_waste::domain::types::ClassifyPolicy;
use pilah_waste::usecase::classify::ClassifyImageUseCase;
use pilah_waste::usecase::status::SubmissionsStatusUseCase;
use pilah_waste::usecase::upload::UploadImagesUseCase;
use uuid::Uuid;

use crate::helpers::{MemoryDb, MemoryStore, StubClassifier, jpeg, organik_verdict, test_user};

#[tokio::test]
async fn should_project_the_whole_pipeline() {
    let user = test_user();
    let db = MemoryDb::with_user(user.clone());
    let store = MemoryStore::default();

    let upload = UploadImagesUseCase {
        users: db.clone(),
        submissions: db.clone(),
        images: db.clone(),
        store: store.clone(),
    };
    let outcome = upload
        .execute(user.id, vec![jpeg("a.jpg"), jpeg("b.jpg")])
        .await
        .unwrap();

    let status = SubmissionsStatusUseCase {
        submissions: db.clone(),
        images: db.clone(),
        classifications: db.clone(),
    };

    // Right after upload the preview exists but carries no result yet.
    let projection = status.execute(user.id, UserRole::User).await.unwrap();
    assert_eq!(projection.submissions.len(), 1);
    let preview = &projection.previews[&outcome.submission_id];
    assert_eq!(preview.status, ImageStatus::Pending);
    assert_eq!(preview.result, None);
    assert_eq!(projection.image_counts[&outcome.submission_id], 2);

    let classify = ClassifyImageUseCase {
        images: db.clone(),
        classifications: db.clone(),
        classifier: StubClassifier {
            verdict: organik_verdict(),
        },
        store: store.clone(),
        policy: ClassifyPolicy {
            call_timeout: Duration::from_secs(5),
            max_attempts: 2,
        },
    };
    for image_id in &outcome.image_ids {
        classify.execute(*image_id).await.unwrap();
    }

    let projection = status.execute(user.id, UserRole::User).await.unwrap();
    let preview = &projection.previews[&outcome.submission_id];
    assert_eq!(preview.status, ImageStatus::Completed);
    assert_eq!(preview.result, Some(WasteCategory::Organik));

    // No writes in between, so polling again returns the same projection.
    let again = status.execute(user.id, UserRole::User).await.unwrap();
    assert_eq!(projection, again);
}

#[tokio::test]
async fn should_scope_submissions_by_role() {
    let alice = test_user();
    let mut bob = test_user();
    bob.id = Uuid::now_v7();
    bob.email = "bob@example.com".to_owned();
    bob.name = "bob".to_owned();

    let db = MemoryDb::with_user(alice.clone());
    db.users.lock().unwrap().push(bob.clone());
    let store = MemoryStore::default();

    let upload = UploadImagesUseCase {
        users: db.clone(),
        submissions: db.clone(),
        images: db.clone(),
        store: store.clone(),
    };
    upload.execute(alice.id, vec![jpeg("a.jpg")]).await.unwrap();
    upload.execute(bob.id, vec![jpeg("b.jpg")]).await.unwrap();

    let status = SubmissionsStatusUseCase {
        submissions: db.clone(),
        images: db.clone(),
        classifications: db.clone(),
    };

    let own = status.execute(alice.id, UserRole::User).await.unwrap();
    assert_eq!(own.submissions.len(), 1);
    assert!(own.submissions.iter().all(|s| s.user_id == alice.id));

    let all = status.execute(alice.id, UserRole::Admin).await.unwrap();
    assert_eq!(all.submissions.len(), 2);
}
