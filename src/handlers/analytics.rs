use std::sync::Arc;

use axum::{extract::State, middleware, routing::get, Router};

use crate::{
    auth::require_admin,
    errors::ApiError,
    handlers::common::success_response,
    AppState,
};

/// Admin-only analytics endpoints backing the back-office dashboard.
pub fn routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/summary", get(summary))
        .route("/sales-trend", get(sales_trend))
        .route("/top-products", get(top_products))
        .route("/category-revenue", get(category_revenue))
        .route_layer(middleware::from_fn_with_state(state, require_admin))
}

async fn summary(
    State(state): State<Arc<AppState>>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    Ok(success_response(state.services.analytics.summary()))
}

async fn sales_trend(
    State(state): State<Arc<AppState>>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    Ok(success_response(state.services.analytics.sales_trend()))
}

async fn top_products(
    State(state): State<Arc<AppState>>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    Ok(success_response(state.services.analytics.top_products()))
}

async fn category_revenue(
    State(state): State<Arc<AppState>>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    Ok(success_response(state.services.analytics.category_revenue()))
}
