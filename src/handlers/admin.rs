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
    auth,
    errors::ApiError,
    handlers::common::{map_service_error, success_response, validate_input},
    AppState,
};

/// Admin session endpoints.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/login", post(login))
}

#[derive(Debug, Deserialize, Validate)]
struct LoginRequest {
    #[validate(email(message = "A valid email address is required"))]
    email: String,
    #[validate(length(min = 1, message = "password is required"))]
    password: String,
}

async fn login(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    validate_input(&payload)?;

    let (admin, token) =
        auth::login(&state, &payload.email, &payload.password).map_err(map_service_error)?;

    Ok(success_response(json!({
        "token": token,
        "admin": admin,
    })))
}
