use std::sync::Arc;

use axum::{
    extract::{Json, Path, Query, State},
    routing::{delete, get, patch, post},
    Router,
};
use serde::Deserialize;
use validator::Validate;

use crate::{
    errors::ApiError,
    handlers::common::{
        created_response, map_service_error, no_content_response, success_response, validate_input,
    },
    AppState,
};

/// Cart management endpoints.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(get_cart).post(add_to_cart))
        .route("/:id", patch(update_cart_item))
        .route("/:id", delete(remove_cart_item))
}

#[derive(Debug, Deserialize)]
struct CartQuery {
    user_id: String,
}

#[derive(Debug, Deserialize, Validate)]
struct AddCartItemRequest {
    #[validate(length(min = 1, message = "user_id is required"))]
    user_id: String,
    #[validate(length(min = 1, message = "product_id is required"))]
    product_id: String,
    #[serde(default = "default_quantity")]
    #[validate(range(min = 1))]
    quantity: i32,
}

fn default_quantity() -> i32 {
    1
}

#[derive(Debug, Deserialize, Validate)]
struct UpdateQuantityRequest {
    #[validate(range(min = 1))]
    quantity: i32,
}

/// Aggregated cart view: joined lines plus subtotal.
async fn get_cart(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CartQuery>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    Ok(success_response(
        state.services.cart.cart_with_totals(&query.user_id),
    ))
}

async fn add_to_cart(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<AddCartItemRequest>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    validate_input(&payload)?;

    let item = state
        .services
        .cart
        .add_item(&payload.user_id, &payload.product_id, payload.quantity)
        .map_err(map_service_error)?;

    Ok(created_response(item))
}

async fn update_cart_item(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateQuantityRequest>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    validate_input(&payload)?;

    let item = state
        .services
        .cart
        .update_quantity(&id, payload.quantity)
        .map_err(map_service_error)?;

    Ok(success_response(item))
}

async fn remove_cart_item(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    state
        .services
        .cart
        .remove_item(&id)
        .map_err(map_service_error)?;

    Ok(no_content_response())
}
