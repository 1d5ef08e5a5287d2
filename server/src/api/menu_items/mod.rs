//! Menu item API module
//!
//! | Path | Method | Auth |
//! |----------------------------------|--------|---------|
//! | /api/menu-items | GET | none |
//! | /api/menu-items/{id} | GET | none |
//! | /api/menu-items | POST | manager |
//! | /api/menu-items/{id} | PUT | manager |
//! | /api/menu-items/{id}/options | POST | manager |
//! | /api/menu-items/{id}/availability| PATCH | staff |

mod handler;

use axum::{
    Router,
    routing::{get, patch, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/menu-items", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/{id}", get(handler::get_by_id).put(handler::update))
        .route("/{id}/options", post(handler::create_option))
        .route("/{id}/availability", patch(handler::set_availability))
}
