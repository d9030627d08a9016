use std::sync::Arc;

use axum::{
    extract::{Json, State},
    routing::post,
    Router,
};
use serde::Deserialize;
use validator::Validate;

use crate::{
    errors::ApiError,
    handlers::common::{created_response, validate_input},
    AppState,
};

/// Contact form submission endpoint.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/", post(create_contact_message))
}

#[derive(Debug, Deserialize, Validate)]
struct ContactRequest {
    #[validate(length(min = 2, message = "Name must be at least 2 characters"))]
    name: String,
    #[validate(email(message = "A valid email address is required"))]
    email: String,
    #[validate(length(min = 10, message = "Message must be at least 10 characters"))]
    message: String,
}

async fn create_contact_message(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ContactRequest>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    validate_input(&payload)?;

    let message = state
        .store
        .create_contact_message(&payload.name, &payload.email, &payload.message);
    Ok(created_response(message))
}
