//! Category API module
//!
//! | Path | Method | Auth |
//! |---------------------|--------|---------|
//! | /api/categories | GET | none |
//! | /api/categories | POST | manager |

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/categories", get(handler::list).post(handler::create))
}
