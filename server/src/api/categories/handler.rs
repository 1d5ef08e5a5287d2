//! Category API handlers

use axum::{Json, extract::State, http::StatusCode};
use shared::models::{Category, CategoryCreate};

use crate::auth::{CurrentUser, require_role};
use crate::core::ServerState;
use crate::db::repository::category;
use crate::utils::AppResult;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, validate_optional_text, validate_required_text,
};

/// GET /api/categories
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Category>>> {
    Ok(Json(category::find_all(&state.pool).await?))
}

/// POST /api/categories
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<CategoryCreate>,
) -> AppResult<(StatusCode, Json<Category>)> {
    require_role(&user, &["manager"])?;
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.description, "description", MAX_NOTE_LEN)?;

    let created = category::create(&state.pool, payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}
