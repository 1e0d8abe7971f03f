use axum::{
    Router,
    routing::{delete, get, post},
};
use tower_http::trace::TraceLayer;

use pilah_core::health::{healthz, readyz};
use pilah_core::middleware::request_id_layer;

use crate::handlers::{
    admin::{get_classification_report, get_dashboard, get_users},
    classify::classify_image,
    files::get_upload,
    status::get_submissions,
    submission::{delete_submission, get_submission},
    upload::upload_images,
    user::register,
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Users
        .route("/api/register", post(register))
        // Uploads and classification
        .route("/api/upload", post(upload_images))
        .route("/api/classify", post(classify_image))
        .route("/api/uploads/{filename}", get(get_upload))
        // Submissions
        .route("/api/submissions", get(get_submissions))
        .route("/api/submissions/{id}", get(get_submission))
        .route("/api/submissions/{id}", delete(delete_submission))
        // Admin
        .route("/api/admin/dashboard", get(get_dashboard))
        .route("/api/admin/users", get(get_users))
        .route("/api/admin/classification", get(get_classification_report))
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
        .with_state(state)
}
