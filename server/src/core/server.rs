//! HTTP server lifecycle

use crate::api;
use crate::core::{Config, ServerState};

pub struct Server {
    state: ServerState,
}

impl Server {
    pub fn with_state(state: ServerState) -> Self {
        Self { state }
    }

    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let state = ServerState::initialize(config).await?;
        Ok(Self { state })
    }

    /// Serve until SIGINT.
    pub async fn run(self) -> anyhow::Result<()> {
        if self.state.config.is_production() && self.state.config.allowed_origins.is_empty() {
            tracing::warn!("CORS_ALLOWED_ORIGINS is empty in production, any origin is accepted");
        }

        let addr = std::net::SocketAddr::from(([0, 0, 0, 0], self.state.config.http_port));
        let app = api::build_app(self.state);

        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("Order server listening on {addr}");

        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = tokio::signal::ctrl_c().await;
                tracing::info!("Shutting down");
            })
            .await?;

        Ok(())
    }
}
