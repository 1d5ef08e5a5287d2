//! Shared server state
//!
//! [`ServerState`] holds the handles every request needs. All fields are
//! cheap to clone (`Arc` or pool handles), so axum clones the whole state
//! into each handler.

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::auth::JwtService;
use crate::core::Config;
use crate::db::DbService;
use crate::notify::BroadcastPublisher;
use crate::orders::OrderService;

#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub pool: SqlitePool,
    /// Order engine: transactional creation plus the status machine
    pub orders: OrderService,
    /// Fan-out channel behind the order engine's notifications
    pub publisher: Arc<BroadcastPublisher>,
    pub jwt_service: Arc<JwtService>,
}

impl ServerState {
    /// Open the database, run migrations and wire up the services.
    pub async fn initialize(config: Config) -> anyhow::Result<Self> {
        let db = DbService::new(&config.database_path).await?;
        Ok(Self::with_db(config, db))
    }

    /// Build state over an already-open database. Tests use this with an
    /// in-memory store.
    pub fn with_db(config: Config, db: DbService) -> Self {
        let publisher = Arc::new(BroadcastPublisher::new());
        let orders = OrderService::new(db.pool.clone(), publisher.clone());
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));

        Self {
            config,
            pool: db.pool,
            orders,
            publisher,
            jwt_service,
        }
    }
}
