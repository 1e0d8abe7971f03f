use pilah_domain::status::ImageStatus;
use pilah_waste::error::WasteServiceError;
use pilah_waste::usecase::upload::UploadImagesUseCase;
use uuid::Uuid;

use crate::helpers::{MemoryDb, MemoryStore, jpeg, test_user};

#[tokio::test]
async fn should_store_files_and_create_pending_rows() {
    let user = test_user();
    let db = MemoryDb::with_user(user.clone());
    let store = MemoryStore::default();

    let uc = UploadImagesUseCase {
        users: db.clone(),
        submissions: db.clone(),
        images: db.clone(),
        store: store.clone(),
    };
    let outcome = uc
        .execute(user.id, vec![jpeg("a.jpg"), jpeg("b.jpg")])
        .await
        .unwrap();

    assert_eq!(outcome.image_ids.len(), 2);
    assert_eq!(store.files.lock().unwrap().len(), 2);

    let submissions = db.submissions.lock().unwrap();
    assert_eq!(submissions.len(), 1);
    assert_eq!(submissions[0].id, outcome.submission_id);
    assert_eq!(submissions[0].user_id, user.id);
    assert_eq!(submissions[0].username, user.name);

    let images = db.images.lock().unwrap();
    assert_eq!(images.len(), 2);
    for image in images.iter() {
        assert_eq!(image.status, ImageStatus::Pending);
        assert!(store.files.lock().unwrap().contains_key(&image.image_url));
    }
}

#[tokio::test]
async fn should_reject_upload_without_files() {
    let user = test_user();
    let db = MemoryDb::with_user(user.clone());
    let uc = UploadImagesUseCase {
        users: db.clone(),
        submissions: db.clone(),
        images: db.clone(),
        store: MemoryStore::default(),
    };
    let result = uc.execute(user.id, vec![]).await;
    assert!(matches!(result, Err(WasteServiceError::EmptyUpload)));
    assert!(db.submissions.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_reject_upload_from_unknown_session() {
    let db = MemoryDb::default();
    let uc = UploadImagesUseCase {
        users: db.clone(),
        submissions: db.clone(),
        images: db.clone(),
        store: MemoryStore::default(),
    };
    let result = uc.execute(Uuid::now_v7(), vec![jpeg("a.jpg")]).await;
    assert!(matches!(result, Err(WasteServiceError::InvalidSession)));
}
