use anyhow::Context as _;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection,
    EntityTrait, FromQueryResult, QueryFilter, QueryOrder, QuerySelect, Statement,
    TransactionTrait,
};
use uuid::Uuid;

use pilah_domain::category::WasteCategory;
use pilah_domain::status::ImageStatus;
use pilah_domain::user::UserRole;
use pilah_waste_schema::{classifications, submission_images, submissions, users};

use crate::domain::repository::{
    ClassificationRepository, ImageRepository, SubmissionRepository, UserRepository,
};
use crate::domain::types::{
    Classification, ClassifiedImage, Submission, SubmissionImage, User,
};
use crate::error::WasteServiceError;

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, WasteServiceError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user by id")?;
        model.map(user_from_model).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, WasteServiceError> {
        let model = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
            .context("find user by email")?;
        model.map(user_from_model).transpose()
    }

    async fn create(&self, user: &User) -> Result<(), WasteServiceError> {
        users::ActiveModel {
            id: Set(user.id),
            name: Set(user.name.clone()),
            email: Set(user.email.clone()),
            password_hash: Set(user.password_hash.clone()),
            role: Set(user.role.as_u8() as i16),
            created_at: Set(user.created_at),
        }
        .insert(&self.db)
        .await
        .context("create user")?;
        Ok(())
    }

    async fn list(&self) -> Result<Vec<User>, WasteServiceError> {
        let models = users::Entity::find()
            .order_by_asc(users::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list users")?;
        models.into_iter().map(user_from_model).collect()
    }

    async fn count(&self) -> Result<u64, WasteServiceError> {
        use sea_orm::PaginatorTrait as _;
        let count = users::Entity::find()
            .count(&self.db)
            .await
            .context("count users")?;
        Ok(count)
    }
}

fn user_from_model(model: users::Model) -> Result<User, WasteServiceError> {
    let role = UserRole::from_u8(model.role as u8)
        .with_context(|| format!("user {} has unknown role {}", model.id, model.role))?;
    Ok(User {
        id: model.id,
        name: model.name,
        email: model.email,
        password_hash: model.password_hash,
        role,
        created_at: model.created_at,
    })
}

// ── Submission repository ────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbSubmissionRepository {
    pub db: DatabaseConnection,
}

impl SubmissionRepository for DbSubmissionRepository {
    async fn create(&self, submission: &Submission) -> Result<(), WasteServiceError> {
        submissions::ActiveModel {
            id: Set(submission.id),
            user_id: Set(submission.user_id),
            username: Set(submission.username.clone()),
            uploaded_at: Set(submission.uploaded_at),
        }
        .insert(&self.db)
        .await
        .context("create submission")?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Submission>, WasteServiceError> {
        let model = submissions::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find submission by id")?;
        Ok(model.map(submission_from_model))
    }

    async fn list_all(&self) -> Result<Vec<Submission>, WasteServiceError> {
        let models = submissions::Entity::find()
            .order_by_desc(submissions::Column::UploadedAt)
            .all(&self.db)
            .await
            .context("list submissions")?;
        Ok(models.into_iter().map(submission_from_model).collect())
    }

    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Submission>, WasteServiceError> {
        let models = submissions::Entity::find()
            .filter(submissions::Column::UserId.eq(user_id))
            .order_by_desc(submissions::Column::UploadedAt)
            .all(&self.db)
            .await
            .context("list submissions by user")?;
        Ok(models.into_iter().map(submission_from_model).collect())
    }

    async fn latest(&self, limit: u64) -> Result<Vec<Submission>, WasteServiceError> {
        let models = submissions::Entity::find()
            .order_by_desc(submissions::Column::UploadedAt)
            .limit(limit)
            .all(&self.db)
            .await
            .context("list latest submissions")?;
        Ok(models.into_iter().map(submission_from_model).collect())
    }

    async fn count(&self) -> Result<u64, WasteServiceError> {
        use sea_orm::PaginatorTrait as _;
        let count = submissions::Entity::find()
            .count(&self.db)
            .await
            .context("count submissions")?;
        Ok(count)
    }

    async fn count_by_user(&self) -> Result<Vec<(Uuid, u64)>, WasteServiceError> {
        let rows: Vec<(Uuid, i64)> = submissions::Entity::find()
            .select_only()
            .column(submissions::Column::UserId)
            .column_as(submissions::Column::Id.count(), "count")
            .group_by(submissions::Column::UserId)
            .into_tuple()
            .all(&self.db)
            .await
            .context("count submissions by user")?;
        Ok(rows.into_iter().map(|(id, n)| (id, n as u64)).collect())
    }

    async fn delete_cascade(&self, id: Uuid) -> Result<(), WasteServiceError> {
        let txn = self.db.begin().await.context("begin delete transaction")?;

        let image_ids: Vec<Uuid> = submission_images::Entity::find()
            .filter(submission_images::Column::SubmissionId.eq(id))
            .select_only()
            .column(submission_images::Column::Id)
            .into_tuple()
            .all(&txn)
            .await
            .context("list image ids for delete")?;

        classifications::Entity::delete_many()
            .filter(classifications::Column::ImageId.is_in(image_ids))
            .exec(&txn)
            .await
            .context("delete classifications")?;
        submission_images::Entity::delete_many()
            .filter(submission_images::Column::SubmissionId.eq(id))
            .exec(&txn)
            .await
            .context("delete submission images")?;
        submissions::Entity::delete_by_id(id)
            .exec(&txn)
            .await
            .context("delete submission")?;

        txn.commit().await.context("commit delete transaction")?;
        Ok(())
    }
}

fn submission_from_model(model: submissions::Model) -> Submission {
    Submission {
        id: model.id,
        user_id: model.user_id,
        username: model.username,
        uploaded_at: model.uploaded_at,
    }
}

// ── Image repository ─────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbImageRepository {
    pub db: DatabaseConnection,
}

impl ImageRepository for DbImageRepository {
    async fn create(&self, image: &SubmissionImage) -> Result<(), WasteServiceError> {
        submission_images::ActiveModel {
            id: Set(image.id),
            submission_id: Set(image.submission_id),
            image_url: Set(image.image_url.clone()),
            status: Set(image.status.as_str().to_owned()),
            updated_at: Set(image.updated_at),
        }
        .insert(&self.db)
        .await
        .context("create submission image")?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<SubmissionImage>, WasteServiceError> {
        let model = submission_images::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find image by id")?;
        model.map(image_from_model).transpose()
    }

    async fn list_by_submissions(
        &self,
        submission_ids: &[Uuid],
    ) -> Result<Vec<SubmissionImage>, WasteServiceError> {
        if submission_ids.is_empty() {
            return Ok(vec![]);
        }
        let models = submission_images::Entity::find()
            .filter(submission_images::Column::SubmissionId.is_in(submission_ids.iter().copied()))
            .order_by_asc(submission_images::Column::Id)
            .all(&self.db)
            .await
            .context("list images by submissions")?;
        models.into_iter().map(image_from_model).collect()
    }

    async fn count_by_submission(
        &self,
        submission_ids: &[Uuid],
    ) -> Result<Vec<(Uuid, u64)>, WasteServiceError> {
        if submission_ids.is_empty() {
            return Ok(vec![]);
        }
        let rows: Vec<(Uuid, i64)> = submission_images::Entity::find()
            .filter(submission_images::Column::SubmissionId.is_in(submission_ids.iter().copied()))
            .select_only()
            .column(submission_images::Column::SubmissionId)
            .column_as(submission_images::Column::Id.count(), "count")
            .group_by(submission_images::Column::SubmissionId)
            .into_tuple()
            .all(&self.db)
            .await
            .context("count images by submission")?;
        Ok(rows.into_iter().map(|(id, n)| (id, n as u64)).collect())
    }

    async fn set_status(&self, id: Uuid, status: ImageStatus) -> Result<(), WasteServiceError> {
        submission_images::Entity::update_many()
            .col_expr(
                submission_images::Column::Status,
                status.as_str().into(),
            )
            .col_expr(submission_images::Column::UpdatedAt, Utc::now().into())
            .filter(submission_images::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .context("set image status")?;
        Ok(())
    }

    async fn reclaim_stale(&self, cutoff: DateTime<Utc>) -> Result<u64, WasteServiceError> {
        let result = submission_images::Entity::update_many()
            .col_expr(
                submission_images::Column::Status,
                ImageStatus::Failed.as_str().into(),
            )
            .col_expr(submission_images::Column::UpdatedAt, Utc::now().into())
            .filter(submission_images::Column::Status.eq(ImageStatus::Processing.as_str()))
            .filter(submission_images::Column::UpdatedAt.lt(cutoff))
            .exec(&self.db)
            .await
            .context("reclaim stale processing images")?;
        Ok(result.rows_affected)
    }
}

fn image_from_model(model: submission_images::Model) -> Result<SubmissionImage, WasteServiceError> {
    let status = ImageStatus::parse(&model.status)
        .with_context(|| format!("image {} has unknown status {:?}", model.id, model.status))?;
    Ok(SubmissionImage {
        id: model.id,
        submission_id: model.submission_id,
        image_url: model.image_url,
        status,
        updated_at: model.updated_at,
    })
}

// ── Classification repository ────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbClassificationRepository {
    pub db: DatabaseConnection,
}

impl ClassificationRepository for DbClassificationRepository {
    async fn create(&self, classification: &Classification) -> Result<(), WasteServiceError> {
        classifications::ActiveModel {
            id: Set(classification.id),
            image_id: Set(classification.image_id),
            result: Set(classification.result.as_str().to_owned()),
            confidence: Set(classification.confidence),
            waste_count: Set(classification.waste_count),
            created_at: Set(classification.created_at),
        }
        .insert(&self.db)
        .await
        .context("create classification")?;
        Ok(())
    }

    async fn list_by_images(
        &self,
        image_ids: &[Uuid],
    ) -> Result<Vec<Classification>, WasteServiceError> {
        if image_ids.is_empty() {
            return Ok(vec![]);
        }
        let models = classifications::Entity::find()
            .filter(classifications::Column::ImageId.is_in(image_ids.iter().copied()))
            .all(&self.db)
            .await
            .context("list classifications by images")?;
        Ok(models.into_iter().map(classification_from_model).collect())
    }

    async fn list_completed(&self) -> Result<Vec<ClassifiedImage>, WasteServiceError> {
        #[derive(FromQueryResult)]
        struct Row {
            id: Uuid,
            image_id: Uuid,
            result: String,
            confidence: f64,
            waste_count: Option<i32>,
            created_at: DateTime<Utc>,
            image_url: String,
            submission_id: Uuid,
            username: String,
        }

        let rows = Row::find_by_statement(Statement::from_string(
            self.db.get_database_backend(),
            r#"
            SELECT c.id, c.image_id, c.result, c.confidence, c.waste_count, c.created_at,
                   i.image_url, i.submission_id, s.username
            FROM classifications c
            JOIN submission_images i ON i.id = c.image_id
            JOIN submissions s ON s.id = i.submission_id
            WHERE i.status = 'Completed'
            ORDER BY c.created_at DESC
            "#,
        ))
        .all(&self.db)
        .await
        .context("list completed classifications")?;

        Ok(rows
            .into_iter()
            .map(|row| ClassifiedImage {
                classification: Classification {
                    id: row.id,
                    image_id: row.image_id,
                    result: WasteCategory::from_label(&row.result),
                    confidence: row.confidence,
                    waste_count: row.waste_count,
                    created_at: row.created_at,
                },
                image_url: row.image_url,
                submission_id: row.submission_id,
                username: row.username,
            })
            .collect())
    }
}

fn classification_from_model(model: classifications::Model) -> Classification {
    Classification {
        id: model.id,
        image_id: model.image_id,
        // Rows are written from the closed set; stray values degrade to the
        // unknown sentinel instead of failing the whole query.
        result: WasteCategory::from_label(&model.result),
        confidence: model.confidence,
        waste_count: model.waste_count,
        created_at: model.created_at,
    }
}
