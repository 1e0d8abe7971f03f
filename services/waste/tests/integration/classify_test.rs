use std::time::Duration;

use chrono::Utc;
use pilah_domain::category::WasteCategory;
use pilah_domain::status::ImageStatus;
use pilah_waste::domain::types::ClassifyPolicy;
use pilah_waste::usecase::classify::ClassifyImageUseCase;
use pilah_waste::usecase::upload::UploadImagesUseCase;

use crate::helpers::{
    BrokenClassifier, MemoryDb, MemoryStore, StubClassifier, jpeg, organik_verdict, test_user,
};

fn policy() -> ClassifyPolicy {
    ClassifyPolicy {
        call_timeout: Duration::from_secs(5),
        max_attempts: 2,
    }
}

#[tokio::test]
async fn should_drive_uploaded_images_to_completed() {
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

    let classify = ClassifyImageUseCase {
        images: db.clone(),
        classifications: db.clone(),
        classifier: StubClassifier {
            verdict: organik_verdict(),
        },
        store: store.clone(),
        policy: policy(),
    };
    for image_id in &outcome.image_ids {
        let result = classify.execute(*image_id).await.unwrap();
        assert_eq!(result.status, ImageStatus::Completed);
    }

    // Classification row exists if and only if the image is Completed.
    let images = db.images.lock().unwrap();
    let classifications = db.classifications.lock().unwrap();
    for image in images.iter() {
        let rows = classifications
            .iter()
            .filter(|c| c.image_id == image.id)
            .count();
        assert_eq!(image.status, ImageStatus::Completed);
        assert_eq!(rows, 1);
        let row = classifications
            .iter()
            .find(|c| c.image_id == image.id)
            .unwrap();
        assert_eq!(row.result, WasteCategory::Organik);
    }
}

#[tokio::test]
async fn should_fail_image_without_writing_a_classification_row() {
    let user = test_user();
    let db = MemoryDb::with_user(user.clone());
    let store = MemoryStore::default();

    let upload = UploadImagesUseCase {
        users: db.clone(),
        submissions: db.clone(),
        images: db.clone(),
        store: store.clone(),
    };
    let outcome = upload.execute(user.id, vec![jpeg("a.jpg")]).await.unwrap();

    let classify = ClassifyImageUseCase {
        images: db.clone(),
        classifications: db.clone(),
        classifier: BrokenClassifier,
        store: store.clone(),
        policy: policy(),
    };
    let result = classify.execute(outcome.image_ids[0]).await.unwrap();
    assert_eq!(result.status, ImageStatus::Failed);
    assert_eq!(result.attempts, 2);
    assert!(db.classifications.lock().unwrap().is_empty());
    assert_eq!(
        db.images.lock().unwrap()[0].status,
        ImageStatus::Failed
    );
}

#[tokio::test]
async fn should_reclaim_stale_processing_images() {
    use pilah_waste::domain::repository::ImageRepository as _;

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

    // First image's worker died mid-flight five minutes ago.
    {
        let mut images = db.images.lock().unwrap();
        images[0].status = ImageStatus::Processing;
        images[0].updated_at = Utc::now() - chrono::Duration::seconds(600);
    }

    let reclaimed = db
        .reclaim_stale(Utc::now() - chrono::Duration::seconds(300))
        .await
        .unwrap();
    assert_eq!(reclaimed, 1);

    let images = db.images.lock().unwrap();
    let first = images.iter().find(|i| i.id == outcome.image_ids[0]).unwrap();
    let second = images.iter().find(|i| i.id == outcome.image_ids[1]).unwrap();
    assert_eq!(first.status, ImageStatus::Failed);
    assert_eq!(second.status, ImageStatus::Pending);
}
