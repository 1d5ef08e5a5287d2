//! API routes
//!
//! One module per resource, each exposing `router()`; [`build_app`] merges
//! them and applies the shared middleware stack.
//!
//! | Module | Paths | Auth |
//! |----------------|-----------------------------|---------------------|
//! | [`health`] | /health | none |
//! | [`auth`] | /api/auth/login | none |
//! | [`categories`] | /api/categories | writes: manager |
//! | [`menu_items`] | /api/menu-items | writes: manager |
//! | [`orders`] | /api/orders | reads/status: staff |
//! | [`events`] | /api/events (WebSocket) | staff |

use axum::Router;
use axum::http::HeaderValue;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::core::ServerState;

pub mod auth;
pub mod categories;
pub mod events;
pub mod health;
pub mod menu_items;
pub mod orders;

pub use crate::utils::{AppResponse, AppResult};

/// Assemble the full application router with state and middleware.
pub fn build_app(state: ServerState) -> Router {
    let cors = cors_layer(&state.config.allowed_origins);

    Router::new()
        .merge(health::router())
        .merge(auth::router())
        .merge(categories::router())
        .merge(menu_items::router())
        .merge(orders::router())
        .merge(events::router())
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// An empty allowlist means any origin (development default).
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    if allowed_origins.is_empty() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|o| o.parse().ok())
        .collect();
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(tower_http::cors::Any)
        .allow_headers(tower_http::cors::Any)
}
