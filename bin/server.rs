// IE Bank - Web Server
// REST API over the accounts table with Axum

use anyhow::{Context, Result};
use iebank::api::{app_router, AppState};
use iebank::{open_database, telemetry, AccountService, Config};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;
    telemetry::init_tracing(config.log_format);

    let conn = open_database(&config.db_path)?;
    tracing::info!(db_path = %config.db_path, version = iebank::VERSION, "database opened");

    let state = AppState::new(AccountService::new(conn));
    let app = app_router(state);

    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", config.listen_addr))?;

    tracing::info!("Listening on http://{}", config.listen_addr);

    axum::serve(listener, app)
        .await
        .context("Server stopped unexpectedly")?;

    Ok(())
}
