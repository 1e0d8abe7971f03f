use sea_orm::DatabaseConnection;

use crate::infra::classifier::GeminiClassifier;
use crate::infra::db::{
    DbClassificationRepository, DbImageRepository, DbSubmissionRepository, DbUserRepository,
};
use crate::infra::dispatch::ClassificationDispatcher;
use crate::infra::storage::LocalImageStore;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub store: LocalImageStore,
    pub classifier: GeminiClassifier,
    pub dispatcher: ClassificationDispatcher,
}

impl AppState {
    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    pub fn submission_repo(&self) -> DbSubmissionRepository {
        DbSubmissionRepository {
            db: self.db.clone(),
        }
    }

    pub fn image_repo(&self) -> DbImageRepository {
        DbImageRepository {
            db: self.db.clone(),
        }
    }

    pub fn classification_repo(&self) -> DbClassificationRepository {
        DbClassificationRepository {
            db: self.db.clone(),
        }
    }
}
