use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Waste service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum WasteServiceError {
    #[error("user not found")]
    UserNotFound,
    #[error("submission not found")]
    SubmissionNotFound,
    #[error("image not found")]
    ImageNotFound,
    #[error("file not found")]
    FileNotFound,
    #[error("email already registered")]
    EmailAlreadyRegistered,
    #[error("no image files provided")]
    EmptyUpload,
    #[error("invalid multipart payload")]
    InvalidUpload,
    #[error("session user no longer exists")]
    InvalidSession,
    #[error("missing data")]
    MissingData,
    #[error("forbidden")]
    Forbidden,
    #[error("illegal status transition")]
    IllegalTransition,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl WasteServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::SubmissionNotFound => "SUBMISSION_NOT_FOUND",
            Self::ImageNotFound => "IMAGE_NOT_FOUND",
            Self::FileNotFound => "FILE_NOT_FOUND",
            Self::EmailAlreadyRegistered => "EMAIL_ALREADY_REGISTERED",
            Self::EmptyUpload => "EMPTY_UPLOAD",
            Self::InvalidUpload => "INVALID_UPLOAD",
            Self::InvalidSession => "INVALID_SESSION",
            Self::MissingData => "MISSING_DATA",
            Self::Forbidden => "FORBIDDEN",
            Self::IllegalTransition => "ILLEGAL_TRANSITION",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for WasteServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::UserNotFound | Self::SubmissionNotFound | Self::ImageNotFound
            | Self::FileNotFound => StatusCode::NOT_FOUND,
            Self::EmailAlreadyRegistered | Self::IllegalTransition => StatusCode::CONFLICT,
            Self::EmptyUpload | Self::InvalidUpload | Self::InvalidSession | Self::MissingData => {
                StatusCode::BAD_REQUEST
            }
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        // Log 500s only — tower-http TraceLayer already records method/uri/status for all
        // requests. 4xx are expected client errors; logging them here would be noise.
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %e, kind = "INTERNAL", "internal error");
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
