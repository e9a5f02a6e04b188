//! Read-only product endpoints.

use super::{AppState, ApiError, ProductRecord, serialize_product};
use crate::{core::product, errors::Error};
use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use serde_json::{Value, json};

/// Prefix of every versioned endpoint
pub const API_PREFIX: &str = "/api/v1";

/// Product endpoints under [`API_PREFIX`]
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route(&format!("{API_PREFIX}/"), get(api_root))
        .route(&format!("{API_PREFIX}/product/"), get(list_products))
        .route(&format!("{API_PREFIX}/product/{{id}}/"), get(retrieve_product))
}

/// Liveness endpoint
pub fn health_routes() -> Router {
    Router::new().route("/health", get(health_check))
}

async fn api_root() -> Json<Value> {
    Json(json!({ "product": format!("{API_PREFIX}/product/") }))
}

async fn list_products(State(state): State<AppState>) -> Result<Json<Vec<ProductRecord>>, ApiError> {
    let products = product::list_products(&state.database).await?;

    let mut records = Vec::with_capacity(products.len());
    for product in products {
        records.push(serialize_product(&state.storage, state.format_match, product).await?);
    }
    Ok(Json(records))
}

async fn retrieve_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ProductRecord>, ApiError> {
    let product = product::get_product_by_id(&state.database, id)
        .await?
        .ok_or(Error::ProductNotFound { id })?;

    Ok(Json(
        serialize_product(&state.storage, state.format_match, product).await?,
    ))
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": "shop-catalog"
    }))
}
