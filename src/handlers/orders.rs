use std::sync::Arc;

use axum::{extract::State, middleware, routing::get, Router};

use crate::{
    auth::require_admin,
    errors::ApiError,
    handlers::common::success_response,
    AppState,
};

/// Admin-only order listing.
pub fn routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_orders))
        .route_layer(middleware::from_fn_with_state(state, require_admin))
}

async fn list_orders(
    State(state): State<Arc<AppState>>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    Ok(success_response(state.store.all_orders()))
}
