use std::time::Duration;

use pilah_domain::status::ImageStatus;
use pilah_domain::user::UserRole;
use pilah_waste::domain::types::ClassifyPolicy;
use pilah_waste::error::WasteServiceError;
use pilah_waste::usecase::classify::ClassifyImageUseCase;
use pilah_waste::usecase::submission::{DeleteSubmissionUseCase, GetSubmissionUseCase};
use pilah_waste::usecase::upload::UploadImagesUseCase;
use uuid::Uuid;

use crate::helpers::{MemoryDb, MemoryStore, StubClassifier, jpeg, organik_verdict, test_user};

async fn seeded_submission(
    db: &MemoryDb,
    store: &MemoryStore,
    user_id: Uuid,
) -> (Uuid, Vec<Uuid>) {
    let upload = UploadImagesUseCase {
        users: db.clone(),
        submissions: db.clone(),
        images: db.clone(),
        store: store.clone(),
    };
    let outcome = upload
        .execute(user_id, vec![jpeg("a.jpg"), jpeg("b.jpg")])
        .await
        .unwrap();
    (outcome.submission_id, outcome.image_ids)
}

#[tokio::test]
async fn should_show_detail_with_mixed_statuses() {
    let user = test_user();
    let db = MemoryDb::with_user(user.clone());
    let store = MemoryStore::default();
    let (submission_id, image_ids) = seeded_submission(&db, &store, user.id).await;

    // Classify only the first image.
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
    classify.execute(image_ids[0]).await.unwrap();

    let detail = GetSubmissionUseCase {
        submissions: db.clone(),
        images: db.clone(),
        classifications: db.clone(),
    }
    .execute(submission_id, user.id, UserRole::User)
    .await
    .unwrap();

    assert_eq!(detail.images.len(), 2);
    let (first, first_cls) = &detail.images[0];
    assert_eq!(first.status, ImageStatus::Completed);
    assert!(first_cls.is_some());
    let (second, second_cls) = &detail.images[1];
    assert_eq!(second.status, ImageStatus::Pending);
    assert!(second_cls.is_none());
}

#[tokio::test]
async fn should_forbid_detail_for_strangers_but_not_admins() {
    let user = test_user();
    let db = MemoryDb::with_user(user.clone());
    let store = MemoryStore::default();
    let (submission_id, _) = seeded_submission(&db, &store, user.id).await;

    let get = GetSubmissionUseCase {
        submissions: db.clone(),
        images: db.clone(),
        classifications: db.clone(),
    };
    let stranger = Uuid::now_v7();
    let result = get.execute(submission_id, stranger, UserRole::User).await;
    assert!(matches!(result, Err(WasteServiceError::Forbidden)));

    let result = get.execute(submission_id, stranger, UserRole::Admin).await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn should_delete_submission_rows_and_stored_files() {
    let user = test_user();
    let db = MemoryDb::with_user(user.clone());
    let store = MemoryStore::default();
    let (submission_id, _) = seeded_submission(&db, &store, user.id).await;
    assert_eq!(store.files.lock().unwrap().len(), 2);

    DeleteSubmissionUseCase {
        submissions: db.clone(),
        images: db.clone(),
        store: store.clone(),
    }
    .execute(submission_id, user.id, UserRole::User)
    .await
    .unwrap();

    assert!(db.submissions.lock().unwrap().is_empty());
    assert!(db.images.lock().unwrap().is_empty());
    assert!(db.classifications.lock().unwrap().is_empty());
    assert!(store.files.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_forbid_deleting_someone_elses_submission() {
    let user = test_user();
    let db = MemoryDb::with_user(user.clone());
    let store = MemoryStore::default();
    let (submission_id, _) = seeded_submission(&db, &store, user.id).await;

    let result = DeleteSubmissionUseCase {
        submissions: db.clone(),
        images: db.clone(),
        store: store.clone(),
    }
    .execute(submission_id, Uuid::now_v7(), UserRole::User)
    .await;

    assert!(matches!(result, Err(WasteServiceError::Forbidden)));
    assert_eq!(db.submissions.lock().unwrap().len(), 1);
    assert_eq!(store.files.lock().unwrap().len(), 2);
}
