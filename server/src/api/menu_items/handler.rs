//! Menu item API handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use shared::models::{
    MenuItem, MenuItemCreate, MenuItemDetail, MenuItemOption, MenuItemOptionCreate, MenuItemUpdate,
};

use crate::auth::{CurrentUser, require_role};
use crate::core::ServerState;
use crate::db::repository::{menu_item, menu_item_option};
use crate::utils::{AppError, AppResult};
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, MAX_URL_LEN, validate_optional_text, validate_required_text,
};

#[derive(Deserialize)]
pub struct ListQuery {
    pub category_id: Option<i64>,
    /// Storefront listings omit unavailable items; admin views pass true
    #[serde(default)]
    pub include_unavailable: bool,
}

/// GET /api/menu-items
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<MenuItem>>> {
    let items =
        menu_item::find_all(&state.pool, query.category_id, !query.include_unavailable).await?;
    Ok(Json(items))
}

/// GET /api/menu-items/{id} - item with its options
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<MenuItemDetail>> {
    let item = menu_item::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Menu item {id} not found")))?;
    let options = menu_item_option::find_by_item(&state.pool, id).await?;
    Ok(Json(MenuItemDetail { item, options }))
}

/// POST /api/menu-items
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<MenuItemCreate>,
) -> AppResult<(StatusCode, Json<MenuItem>)> {
    require_role(&user, &["manager"])?;
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.description, "description", MAX_NOTE_LEN)?;
    validate_optional_text(&payload.image_url, "image_url", MAX_URL_LEN)?;

    let created = menu_item::create(&state.pool, payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /api/menu-items/{id} - partial update; omitted fields keep their
/// stored values
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<MenuItemUpdate>,
) -> AppResult<Json<MenuItem>> {
    require_role(&user, &["manager"])?;
    if let Some(name) = &payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    validate_optional_text(&payload.description, "description", MAX_NOTE_LEN)?;
    validate_optional_text(&payload.image_url, "image_url", MAX_URL_LEN)?;

    let updated = menu_item::update(&state.pool, id, payload).await?;
    Ok(Json(updated))
}

/// POST /api/menu-items/{id}/options
///
/// A duplicate (group, name) pair under the same item is a 409.
pub async fn create_option(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<MenuItemOptionCreate>,
) -> AppResult<(StatusCode, Json<MenuItemOption>)> {
    require_role(&user, &["manager"])?;
    validate_required_text(&payload.group_name, "group_name", MAX_NAME_LEN)?;
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;

    // 404 on the parent item beats a foreign key error from the insert
    menu_item::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Menu item {id} not found")))?;

    let created = menu_item_option::create(&state.pool, id, payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[derive(Deserialize)]
pub struct AvailabilityUpdate {
    pub is_available: bool,
}

/// PATCH /api/menu-items/{id}/availability - staff can 86 an item without
/// touching the rest of the record
pub async fn set_availability(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<AvailabilityUpdate>,
) -> AppResult<Json<MenuItem>> {
    require_role(&user, &["staff", "manager"])?;
    let updated = menu_item::set_availability(&state.pool, id, payload.is_available).await?;
    Ok(Json(updated))
}
