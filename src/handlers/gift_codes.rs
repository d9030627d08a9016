use std::sync::Arc;

use axum::{
    extract::{Json, Path, State},
    middleware,
    routing::{get, patch, post},
    Router,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use validator::Validate;

use crate::{
    auth::require_admin,
    errors::ApiError,
    handlers::common::{
        created_response, map_service_error, no_content_response, success_response, validate_input,
    },
    AppState,
};

/// Gift code endpoints: public redemption plus admin-only management.
pub fn routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    let admin = Router::new()
        .route("/", get(list_gift_codes).post(create_gift_code))
        .route("/generate", post(generate_gift_code))
        .route("/:id", patch(update_gift_code).delete(delete_gift_code))
        .route_layer(middleware::from_fn_with_state(state, require_admin));

    Router::new()
        .route("/redeem", post(redeem_gift_code))
        .merge(admin)
}

#[derive(Debug, Deserialize, Validate)]
struct RedeemRequest {
    #[validate(length(min = 1, message = "code is required"))]
    code: String,
    #[validate(length(min = 1, message = "user_id is required"))]
    user_id: String,
}

#[derive(Debug, Deserialize, Validate)]
struct CreateGiftCodeRequest {
    #[validate(length(min = 3, message = "Gift code must be at least 3 characters"))]
    code: String,
    amount: Decimal,
}

#[derive(Debug, Deserialize)]
struct GenerateGiftCodeRequest {
    amount: Decimal,
}

#[derive(Debug, Deserialize)]
struct UpdateGiftCodeRequest {
    amount: Option<Decimal>,
    active: Option<bool>,
}

async fn redeem_gift_code(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RedeemRequest>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    validate_input(&payload)?;

    let receipt = state
        .services
        .gift_codes
        .redeem(&payload.code, &payload.user_id)
        .await
        .map_err(map_service_error)?;

    Ok(success_response(json!({
        "amount_added": receipt.amount_added,
        "new_balance": receipt.new_balance,
        "message": format!("Successfully added {} to your wallet", receipt.amount_added),
    })))
}

async fn list_gift_codes(
    State(state): State<Arc<AppState>>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    Ok(success_response(state.store.all_gift_codes()))
}

async fn create_gift_code(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateGiftCodeRequest>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    validate_input(&payload)?;

    let gift = state
        .services
        .gift_codes
        .create(&payload.code, payload.amount)
        .map_err(map_service_error)?;

    Ok(created_response(gift))
}

async fn generate_gift_code(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<GenerateGiftCodeRequest>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let gift = state
        .services
        .gift_codes
        .generate(payload.amount)
        .map_err(map_service_error)?;

    Ok(created_response(gift))
}

async fn update_gift_code(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateGiftCodeRequest>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let gift = state
        .store
        .update_gift_code(&id, payload.amount, payload.active)
        .ok_or_else(|| ApiError::NotFound(format!("Gift code {} not found", id)))?;

    Ok(success_response(gift))
}

async fn delete_gift_code(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    if !state.store.delete_gift_code(&id) {
        return Err(ApiError::NotFound(format!("Gift code {} not found", id)));
    }
    Ok(no_content_response())
}
