//! Auth API handlers

use argon2::password_hash::{PasswordHasher, SaltString, rand_core::OsRng};
use argon2::{Argon2, PasswordHash, PasswordVerifier};
use axum::{Json, extract::State};
use shared::models::{LoginRequest, LoginResponse};

use crate::core::ServerState;
use crate::db::repository::user;
use crate::utils::{AppError, AppResult};

/// POST /api/auth/login
///
/// Missing users and wrong passwords produce the same error so usernames
/// cannot be probed; the unknown-username branch burns the same argon2
/// work as a real verification to keep response timing uniform.
pub async fn login(
    State(state): State<ServerState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let Some(account) = user::find_by_username(&state.pool, &payload.username).await? else {
        let salt = SaltString::generate(&mut OsRng);
        let _ = Argon2::default().hash_password(payload.password.as_bytes(), &salt);
        return Err(AppError::invalid_credentials());
    };

    let parsed_hash = PasswordHash::new(&account.password_hash)
        .map_err(|e| AppError::internal(format!("Stored password hash is invalid: {e}")))?;
    if Argon2::default()
        .verify_password(payload.password.as_bytes(), &parsed_hash)
        .is_err()
    {
        return Err(AppError::invalid_credentials());
    }

    let token = state
        .jwt_service
        .generate_token(&account)
        .map_err(|e| AppError::internal(format!("Token generation failed: {e}")))?;

    tracing::info!(target: "auth", username = %account.username, "Login succeeded");

    Ok(Json(LoginResponse {
        token,
        user: account.into(),
    }))
}
