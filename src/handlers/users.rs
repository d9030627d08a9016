use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::get,
    Router,
};

use crate::{errors::ApiError, handlers::common::success_response, AppState};

/// Wallet balance read endpoint.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/:id", get(get_user))
}

async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let user = state
        .store
        .user(&id)
        .ok_or_else(|| ApiError::NotFound(format!("User {} not found", id)))?;
    Ok(success_response(user))
}
