// Ward Reports - Web Server

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use ward_reports::{router, AppState, Config, Database};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    let db = Database::open(&config.database_path)?;
    tracing::info!(path = %config.database_path.display(), "Database opened");

    let app = router(AppState { db });

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Server listening on http://{}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
