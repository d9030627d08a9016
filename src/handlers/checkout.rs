use std::sync::Arc;

use axum::{
    extract::{Json, State},
    routing::post,
    Router,
};
use serde::Deserialize;
use serde_json::json;
use validator::Validate;

use crate::{
    errors::ApiError,
    handlers::common::{map_service_error, success_response, validate_input},
    AppState,
};

/// Checkout endpoint.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/", post(checkout))
}

#[derive(Debug, Deserialize, Validate)]
struct CheckoutRequest {
    #[validate(length(min = 1, message = "user_id is required"))]
    user_id: String,
    promo_code: Option<String>,
}

async fn checkout(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CheckoutRequest>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    validate_input(&payload)?;

    let summary = state
        .services
        .checkout
        .checkout(&payload.user_id, payload.promo_code.as_deref())
        .await
        .map_err(map_service_error)?;

    Ok(success_response(json!({
        "message": "Order placed successfully",
        "order_details": summary,
    })))
}
