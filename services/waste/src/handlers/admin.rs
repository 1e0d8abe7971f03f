use axum::{Json, extract::State};
use serde::Serialize;

use pilah_auth_types::identity::IdentityHeaders;

use crate::error::WasteServiceError;
use crate::state::AppState;
use crate::usecase::report::{AdminDashboardUseCase, CategoryReportUseCase, ListUsersUseCase};

fn require_admin(identity: &IdentityHeaders) -> Result<(), WasteServiceError> {
    if identity.user_role.is_admin() {
        Ok(())
    } else {
        Err(WasteServiceError::Forbidden)
    }
}

// ── GET /api/admin/dashboard ─────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSubmission {
    pub id: String,
    pub username: String,
    #[serde(serialize_with = "pilah_core::serde::to_rfc3339_ms")]
    pub uploaded_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub user_count: u64,
    pub submission_count: u64,
    pub latest_submissions: Vec<DashboardSubmission>,
}

pub async fn get_dashboard(
    identity: IdentityHeaders,
    State(state): State<AppState>,
) -> Result<Json<DashboardResponse>, WasteServiceError> {
    require_admin(&identity)?;
    let usecase = AdminDashboardUseCase {
        users: state.user_repo(),
        submissions: state.submission_repo(),
    };
    let report = usecase.execute().await?;
    Ok(Json(DashboardResponse {
        user_count: report.user_count,
        submission_count: report.submission_count,
        latest_submissions: report
            .latest_submissions
            .into_iter()
            .map(|s| DashboardSubmission {
                id: s.id.to_string(),
                username: s.username,
                uploaded_at: s.uploaded_at,
            })
            .collect(),
    }))
}

// ── GET /api/admin/users ─────────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminUserRow {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: u8,
    #[serde(serialize_with = "pilah_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub submission_count: u64,
}

pub async fn get_users(
    identity: IdentityHeaders,
    State(state): State<AppState>,
) -> Result<Json<Vec<AdminUserRow>>, WasteServiceError> {
    require_admin(&identity)?;
    let usecase = ListUsersUseCase {
        users: state.user_repo(),
        submissions: state.submission_repo(),
    };
    let users = usecase.execute().await?;
    Ok(Json(
        users
            .into_iter()
            .map(|row| AdminUserRow {
                id: row.user.id.to_string(),
                name: row.user.name,
                email: row.user.email,
                role: row.user.role.as_u8(),
                created_at: row.user.created_at,
                submission_count: row.submission_count,
            })
            .collect(),
    ))
}

// ── GET /api/admin/classification ────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifiedRow {
    pub id: String,
    pub image_url: String,
    pub submission_id: String,
    pub username: String,
    pub confidence: f64,
    pub waste_count: Option<i32>,
    #[serde(serialize_with = "pilah_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryGroup {
    pub category: String,
    pub total: usize,
    pub items: Vec<ClassifiedRow>,
}

pub async fn get_classification_report(
    identity: IdentityHeaders,
    State(state): State<AppState>,
) -> Result<Json<Vec<CategoryGroup>>, WasteServiceError> {
    require_admin(&identity)?;
    let usecase = CategoryReportUseCase {
        classifications: state.classification_repo(),
    };
    let report = usecase.execute().await?;
    Ok(Json(
        report
            .groups
            .into_iter()
            .map(|(category, items)| CategoryGroup {
                category: category.to_string(),
                total: items.len(),
                items: items
                    .into_iter()
                    .map(|item| ClassifiedRow {
                        id: item.classification.id.to_string(),
                        image_url: item.image_url,
                        submission_id: item.submission_id.to_string(),
                        username: item.username,
                        confidence: item.classification.confidence,
                        waste_count: item.classification.waste_count,
                        created_at: item.classification.created_at,
                    })
                    .collect(),
            })
            .collect(),
    ))
}
