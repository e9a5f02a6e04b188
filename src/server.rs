//! HTTP server for the read API.

use crate::api::{AppState, app};
use crate::config::Settings;
use crate::errors::Result;
use sea_orm::DatabaseConnection;

/// Binds `settings.bind_addr` and serves the API until the process stops.
pub async fn start_server(settings: &Settings, database: DatabaseConnection) -> Result<()> {
    let app = app(AppState::new(database, settings));

    tracing::info!("Starting read API on http://{}", settings.bind_addr);
    tracing::info!(
        "Serving media from {} under {}",
        settings.media_root.display(),
        settings.media_url
    );

    let listener = tokio::net::TcpListener::bind(settings.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
