use hello_mvc::config::{ConfigService, ServerConfig};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Starting hello-mvc...");

    let config = ServerConfig::from_config(&ConfigService::from_env())?;
    hello_mvc::server::run(config).await?;

    tracing::info!("Server stopped");
    Ok(())
}
