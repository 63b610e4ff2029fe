use std::path::Path;

use anyhow::Context;
use podium_server::config::AppConfig;
use podium_server::database::init_db;
use podium_server::seed::{ensure_indexes, seed_entries};
use podium_server::state::AppState;
use podium_server::build_router;
use tracing::{Level, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let config = AppConfig::load().context("Failed to load configuration")?;

    let db = init_db(&config.database)
        .await
        .context("Failed to connect to database")?;
    info!("Database schema synced");

    ensure_indexes(&db).await.context("Failed to create indexes")?;

    if let Some(path) = &config.contest.entries_file {
        seed_entries(&db, Path::new(path))
            .await
            .with_context(|| format!("Failed to seed entries from {path}"))?;
    }

    info!(admin_name = %config.contest.admin_name, "Admin identity name");

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let app = build_router(AppState::new(db, config));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Server running at http://{}", addr);
    info!("API docs at http://{}/swagger-ui", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
