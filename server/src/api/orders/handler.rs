//! Order API handlers
//!
//! Thin layer over [`OrderService`]: parse, authorize, delegate. All
//! pricing and state rules live in the engine.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use shared::models::{OrderCreateRequest, OrderDetail, OrderStatus, StatusUpdateRequest};

use crate::auth::{CurrentUser, require_role};
use crate::core::ServerState;
use crate::utils::{AppError, AppResult};

/// POST /api/orders
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<OrderCreateRequest>,
) -> AppResult<(StatusCode, Json<OrderDetail>)> {
    let detail = state.orders.create_order(payload).await?;
    Ok((StatusCode::CREATED, Json(detail)))
}

#[derive(Deserialize)]
pub struct ListQuery {
    /// Optional status filter, e.g. `?status=pending_approval`
    pub status: Option<String>,
}

/// GET /api/orders
pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<OrderDetail>>> {
    require_role(&user, &["staff", "manager"])?;
    let status = query.status.as_deref().map(parse_status).transpose()?;
    Ok(Json(state.orders.list_orders(status).await?))
}

/// GET /api/orders/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<OrderDetail>> {
    require_role(&user, &["staff", "manager"])?;
    Ok(Json(state.orders.get_order(id).await?))
}

/// PUT /api/orders/{id}/status
pub async fn update_status(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<StatusUpdateRequest>,
) -> AppResult<Json<OrderDetail>> {
    require_role(&user, &["staff", "manager"])?;
    let status = parse_status(&payload.status)?;
    Ok(Json(state.orders.update_status(id, status).await?))
}

/// Unknown status strings are a 400 listing the accepted values.
fn parse_status(raw: &str) -> AppResult<OrderStatus> {
    raw.parse().map_err(|_| {
        let allowed: Vec<&str> = OrderStatus::ALL.iter().map(|s| s.as_str()).collect();
        AppError::validation(format!(
            "Unknown order status '{raw}', expected one of: {}",
            allowed.join(", ")
        ))
    })
}
