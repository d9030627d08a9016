//! Storefront API Library
//!
//! This crate provides the core functionality for the storefront API: the
//! public catalog, cart and checkout flow, wallet credits, and the
//! back-office surface used by administrators.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

pub mod auth;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod services;
pub mod store;

use std::sync::Arc;

use axum::{response::Json, routing::get, Router};
use chrono::Utc;
use serde_json::{json, Value};

use crate::store::Store;

// App state definition
#[derive(Clone)]
pub struct AppState {
    pub config: config::AppConfig,
    pub store: Arc<Store>,
    pub services: services::AppServices,
}

impl AppState {
    pub fn new(config: config::AppConfig, store: Arc<Store>) -> Self {
        let services = services::AppServices::new(store.clone());
        Self {
            config,
            store,
            services,
        }
    }
}

/// Build the full application router.
///
/// All storefront and back-office endpoints live under `/api`; admin-only
/// sub-routers carry their own bearer-token guard.
pub fn app(state: Arc<AppState>) -> Router {
    let api = Router::new()
        .nest("/products", handlers::products::routes())
        .nest("/cart", handlers::cart::routes())
        .nest("/promo-codes", handlers::promo_codes::routes(state.clone()))
        .nest("/gift-codes", handlers::gift_codes::routes(state.clone()))
        .nest("/checkout", handlers::checkout::routes())
        .nest("/user", handlers::users::routes())
        .nest("/reviews", handlers::reviews::routes(state.clone()))
        .nest("/contact", handlers::contact::routes())
        .nest("/orders", handlers::orders::routes(state.clone()))
        .nest("/analytics", handlers::analytics::routes(state.clone()))
        .nest("/admin", handlers::admin::routes());

    Router::new()
        .route("/", get(|| async { "storefront-api up" }))
        .route("/health", get(health_check))
        .nest("/api", api)
        .with_state(state)
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": Utc::now().to_rfc3339(),
    }))
}
