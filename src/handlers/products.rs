use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::get,
    Router,
};

use crate::{
    errors::ApiError,
    handlers::common::success_response,
    AppState,
};

/// Catalog read endpoints.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_products))
        .route("/:id", get(get_product))
}

async fn list_products(
    State(state): State<Arc<AppState>>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    Ok(success_response(state.store.all_products()))
}

async fn get_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let product = state
        .store
        .product(&id)
        .ok_or_else(|| ApiError::NotFound(format!("Product {} not found", id)))?;
    Ok(success_response(product))
}
