use std::sync::Arc;

use axum::{
    extract::{Json, Path, State},
    middleware,
    routing::{get, patch, post},
    Router,
};
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

/// Promo code endpoints: public validation plus admin-only management.
pub fn routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    let admin = Router::new()
        .route("/", get(list_promo_codes).post(create_promo_code))
        .route("/:id", patch(update_promo_code).delete(delete_promo_code))
        .route_layer(middleware::from_fn_with_state(state, require_admin));

    Router::new()
        .route("/validate", post(validate_promo_code))
        .merge(admin)
}

#[derive(Debug, Deserialize, Validate)]
struct ValidateCodeRequest {
    #[validate(length(min = 1, message = "code is required"))]
    code: String,
}

#[derive(Debug, Deserialize, Validate)]
struct CreatePromoCodeRequest {
    #[validate(length(min = 3, message = "Promo code must be at least 3 characters"))]
    code: String,
    #[validate(range(min = 1, max = 100))]
    discount: i32,
}

#[derive(Debug, Deserialize, Validate)]
struct UpdatePromoCodeRequest {
    #[validate(range(min = 1, max = 100))]
    discount: Option<i32>,
    active: Option<bool>,
}

/// Resolve a code for the storefront. Inactive and unknown codes both 404.
async fn validate_promo_code(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ValidateCodeRequest>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    validate_input(&payload)?;

    let promo = state
        .services
        .promotions
        .resolve_required(&payload.code)
        .map_err(map_service_error)?;

    Ok(success_response(json!({
        "code": promo.code,
        "discount": promo.discount,
    })))
}

async fn list_promo_codes(
    State(state): State<Arc<AppState>>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    Ok(success_response(state.store.all_promo_codes()))
}

async fn create_promo_code(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreatePromoCodeRequest>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    validate_input(&payload)?;

    // Deactivated codes still hold their code string; creating a second
    // record with the same code would make reactivation ambiguous.
    if state.store.promo_code_by_code(&payload.code).is_some() {
        return Err(ApiError::ValidationError(format!(
            "Promo code {} already exists",
            payload.code.to_uppercase()
        )));
    }

    let promo = state
        .store
        .create_promo_code(&payload.code, payload.discount);
    Ok(created_response(promo))
}

async fn update_promo_code(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(payload): Json<UpdatePromoCodeRequest>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    validate_input(&payload)?;

    let promo = state
        .store
        .update_promo_code(&id, payload.discount, payload.active)
        .ok_or_else(|| ApiError::NotFound(format!("Promo code {} not found", id)))?;

    Ok(success_response(promo))
}

async fn delete_promo_code(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    if !state.store.delete_promo_code(&id) {
        return Err(ApiError::NotFound(format!("Promo code {} not found", id)));
    }
    Ok(no_content_response())
}
