// Not every test binary exercises every helper.
#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Method, Request},
    Router,
};
use serde_json::Value;
use storefront_api::{
    auth::{admin_token, password_digest},
    config::AppConfig,
    models::Product,
    store::Store,
    AppState,
};
use tower::ServiceExt;

pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const ADMIN_PASSWORD: &str = "test-admin-password";

/// Helper harness for spinning up an application backed by a fresh seeded
/// in-memory store.
pub struct TestApp {
    router: Router,
    pub state: Arc<AppState>,
    token: String,
}

impl TestApp {
    /// Construct a new test application with fresh store state.
    pub fn new() -> Self {
        let cfg = AppConfig {
            admin_email: ADMIN_EMAIL.to_string(),
            admin_password: ADMIN_PASSWORD.to_string(),
            admin_token_secret: "test_secret_key_for_testing_purposes_only_32chars".to_string(),
            ..AppConfig::default()
        };

        let store = Arc::new(Store::seeded(
            &cfg.admin_email,
            &password_digest(&cfg.admin_password),
        ));

        let admin = store
            .admin_by_email(ADMIN_EMAIL)
            .expect("seeded admin exists");
        let token =
            admin_token(&cfg.admin_token_secret, &admin.id).expect("derive admin test token");

        let state = Arc::new(AppState::new(cfg, store));
        let router = storefront_api::app(state.clone());

        Self {
            router,
            state,
            token,
        }
    }

    /// Access the bearer token for the seeded administrator.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Send a request against the router with an optional bearer token.
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> axum::response::Response {
        let mut builder = Request::builder().method(method).uri(uri);

        if let Some(tok) = token {
            builder = builder.header("authorization", format!("Bearer {}", tok));
        }

        let body = if let Some(json) = body {
            builder = builder.header("content-type", "application/json");
            Body::from(serde_json::to_vec(&json).expect("failed to serialize json request body"))
        } else {
            Body::empty()
        };

        let request = builder.body(body).expect("failed to build request");
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router error during test request")
    }

    /// Convenience helper for admin-authenticated JSON requests.
    pub async fn request_authenticated(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> axum::response::Response {
        self.request(method, uri, body, Some(self.token())).await
    }

    /// Cheapest product in the seeded catalog, handy for wallet-sized carts.
    pub fn cheapest_product(&self) -> Product {
        self.state
            .store
            .all_products()
            .into_iter()
            .min_by_key(|p| p.price)
            .expect("seeded catalog is non-empty")
    }
}

/// Read a response body as JSON.
pub async fn response_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read response body");
    serde_json::from_slice(&bytes).expect("parse response body as json")
}
