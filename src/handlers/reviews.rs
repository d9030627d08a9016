use std::sync::Arc;

use axum::{
    extract::{Json, Path, State},
    middleware,
    routing::{get, patch, post},
    Router,
};
use serde::Deserialize;
use validator::Validate;

use crate::{
    auth::require_admin,
    errors::ApiError,
    handlers::common::{created_response, no_content_response, success_response, validate_input},
    AppState,
};

/// Review endpoints: public submission and per-product listing, admin-only
/// moderation (visibility toggling, deletion) and full listing.
pub fn routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    let admin = Router::new()
        .route("/", get(list_all_reviews))
        .route("/:id", patch(update_review).delete(delete_review))
        .route_layer(middleware::from_fn_with_state(state, require_admin));

    Router::new()
        .route("/", post(create_review))
        .route("/product/:product_id", get(list_product_reviews))
        .merge(admin)
}

#[derive(Debug, Deserialize, Validate)]
struct CreateReviewRequest {
    #[validate(length(min = 1, message = "product_id is required"))]
    product_id: String,
    #[validate(range(min = 1, max = 5))]
    rating: i32,
    #[validate(length(min = 10, message = "Review must be at least 10 characters"))]
    comment: String,
    #[validate(length(min = 2, message = "Name must be at least 2 characters"))]
    author_name: String,
}

#[derive(Debug, Deserialize)]
struct UpdateReviewRequest {
    visible: Option<bool>,
}

/// Publicly visible reviews for a product.
async fn list_product_reviews(
    State(state): State<Arc<AppState>>,
    Path(product_id): Path<String>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    Ok(success_response(
        state.store.visible_reviews_for_product(&product_id),
    ))
}

async fn create_review(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateReviewRequest>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    validate_input(&payload)?;

    let review = state.store.create_review(
        &payload.product_id,
        payload.rating,
        &payload.comment,
        &payload.author_name,
    );
    Ok(created_response(review))
}

/// Moderation listing: includes hidden reviews.
async fn list_all_reviews(
    State(state): State<Arc<AppState>>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    Ok(success_response(state.store.all_reviews()))
}

async fn update_review(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateReviewRequest>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let review = state
        .store
        .update_review(&id, payload.visible)
        .ok_or_else(|| ApiError::NotFound(format!("Review {} not found", id)))?;
    Ok(success_response(review))
}

async fn delete_review(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    if !state.store.delete_review(&id) {
        return Err(ApiError::NotFound(format!("Review {} not found", id)));
    }
    Ok(no_content_response())
}
