use order_server::{Config, Server, init_logger, init_logger_with_file};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let config = Config::from_env()?;

    match config.log_dir.as_deref() {
        Some(dir) => init_logger_with_file(None, Some(dir)),
        None => init_logger(),
    }

    tracing::info!(
        environment = %config.environment,
        port = config.http_port,
        "Order server starting"
    );

    let server = Server::new(config).await?;
    server.run().await
}
