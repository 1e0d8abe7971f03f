use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use crate::error::WasteServiceError;
use crate::state::AppState;
use crate::usecase::register::{RegisterUserInput, RegisterUserUseCase};

// ── POST /api/register ───────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Serialize)]
pub struct RegisterResponse {
    pub id: String,
}

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), WasteServiceError> {
    let (Some(name), Some(email), Some(password)) = (body.name, body.email, body.password) else {
        return Err(WasteServiceError::MissingData);
    };
    let usecase = RegisterUserUseCase {
        users: state.user_repo(),
    };
    let id = usecase
        .execute(RegisterUserInput {
            name,
            email,
            password,
        })
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse { id: id.to_string() }),
    ))
}
