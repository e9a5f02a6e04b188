//! Read API - product listing and detail endpoints over axum.
//!
//! There are no write endpoints; products are written through [`crate::core`].
//! Uploaded media is served from the media root when `MEDIA_URL` is a local path.

mod error;
mod routes;
mod serializers;

pub use error::{ApiError, api_error_status};
pub use routes::API_PREFIX;
pub use serializers::{ImageRecord, ProductRecord, format_price, serialize_product, strip_extension};

use crate::config::Settings;
use crate::media::{FormatMatch, MediaStorage};
use axum::Router;
use sea_orm::DatabaseConnection;
use tower_http::services::ServeDir;

/// Shared state of the API handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// Database connection
    pub database: DatabaseConnection,
    /// Image storage
    pub storage: MediaStorage,
    /// How image formats are matched when serializing
    pub format_match: FormatMatch,
}

impl AppState {
    /// Creates the state from a connection and the runtime settings.
    #[must_use]
    pub fn new(database: DatabaseConnection, settings: &Settings) -> Self {
        Self {
            database,
            storage: settings.storage(),
            format_match: settings.format_match,
        }
    }
}

/// Builds the complete application router.
pub fn app(state: AppState) -> Router {
    let media_prefix = state.storage.url_prefix().trim_end_matches('/').to_string();
    let media_root = state.storage.root().to_path_buf();

    let mut app = Router::new()
        .merge(routes::product_routes())
        .with_state(state)
        .merge(routes::health_routes());

    if media_prefix.starts_with('/') && media_prefix.len() > 1 {
        app = app.nest_service(&media_prefix, ServeDir::new(media_root));
    }
    app
}
