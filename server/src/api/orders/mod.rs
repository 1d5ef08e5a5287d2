//! Order API module
//!
//! | Path | Method | Auth |
//! |------------------------|--------|-------|
//! | /api/orders | POST | none |
//! | /api/orders | GET | staff |
//! | /api/orders/{id} | GET | staff |
//! | /api/orders/{id}/status| PUT | staff |
//!
//! Creation is unauthenticated: customers order from table-side devices
//! that never log in. Everything else is staff-facing.

mod handler;

use axum::{
    Router,
    routing::{get, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/orders", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}/status", put(handler::update_status))
}
