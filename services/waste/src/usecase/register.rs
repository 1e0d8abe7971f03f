use anyhow::Context as _;
use argon2::Argon2;
use argon2::password_hash::{PasswordHasher as _, SaltString, rand_core::OsRng};
use chrono::Utc;
use uuid::Uuid;

use pilah_domain::user::UserRole;

use crate::domain::repository::UserRepository;
use crate::domain::types::User;
use crate::error::WasteServiceError;

// ── RegisterUser ─────────────────────────────────────────────────────────────

pub struct RegisterUserInput {
    pub name: String,
    pub email: String,
    pub password: String,
}

pub struct RegisterUserUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> RegisterUserUseCase<U> {
    pub async fn execute(&self, input: RegisterUserInput) -> Result<Uuid, WasteServiceError> {
        if input.name.trim().is_empty()
            || input.email.trim().is_empty()
            || input.password.is_empty()
        {
            return Err(WasteServiceError::MissingData);
        }
        if self.users.find_by_email(&input.email).await?.is_some() {
            return Err(WasteServiceError::EmailAlreadyRegistered);
        }

        let salt = SaltString::generate(&mut OsRng);
        let password_hash = Argon2::default()
            .hash_password(input.password.as_bytes(), &salt)
            .context("hash password")
            .map_err(WasteServiceError::Internal)?
            .to_string();

        let user = User {
            id: Uuid::now_v7(),
            name: input.name,
            email: input.email,
            password_hash,
            role: UserRole::User,
            created_at: Utc::now(),
        };
        self.users.create(&user).await?;
        Ok(user.id)
    }
}
