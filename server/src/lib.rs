//! Order Server - restaurant ordering backend
//!
//! Customers place orders from table-side devices; staff approve, track
//! and complete them. The core is a transactional order engine that
//! prices every order server-side from the catalog and enforces the
//! order status machine.
//!
//! # Module structure
//!
//! ```text
//! server/src/
//! ├── core/      # config, state, server lifecycle
//! ├── auth/      # JWT authentication, role checks
//! ├── api/       # HTTP routes and handlers
//! ├── orders/    # order engine: creation transaction, status machine
//! ├── notify/    # order event publishing
//! ├── db/        # SQLite pool, migrations, repositories
//! └── utils/     # errors, logging, validation
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod notify;
pub mod orders;
pub mod utils;

pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use notify::{BroadcastPublisher, NotificationPublisher};
pub use orders::OrderService;
pub use utils::{AppError, AppResponse, AppResult};

pub use utils::logger::{init_logger, init_logger_with_file};
