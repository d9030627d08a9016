mod common;

use axum::http::{Method, StatusCode};
use rust_decimal::Decimal;
use serde_json::json;
use storefront_api::{services::wallet::round_currency, store::GUEST_USER_ID};

use common::{response_json, TestApp};

async fn add_to_cart(app: &TestApp, product_id: &str, quantity: i32) {
    let response = app
        .request(
            Method::POST,
            "/api/cart",
            Some(json!({
                "user_id": GUEST_USER_ID,
                "product_id": product_id,
                "quantity": quantity
            })),
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn checkout_with_promo_debits_wallet_and_clears_cart() {
    let app = TestApp::new();
    let product = app.cheapest_product();
    add_to_cart(&app, &product.id, 1).await;

    let response = app
        .request(
            Method::POST,
            "/api/checkout",
            Some(json!({
                "user_id": GUEST_USER_ID,
                "promo_code": "SAVE20"
            })),
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["message"], "Order placed successfully");

    let subtotal = round_currency(product.price);
    let discount = round_currency(product.price * Decimal::from(20) / Decimal::from(100));
    let total = round_currency(subtotal - discount);
    let remaining = round_currency(Decimal::from(50_000) - total);

    let details = &body["order_details"];
    assert_eq!(details["subtotal"], json!(subtotal.to_string()));
    assert_eq!(details["discount"], json!(discount.to_string()));
    assert_eq!(details["total"], json!(total.to_string()));
    assert_eq!(details["remaining_balance"], json!(remaining.to_string()));
    assert_eq!(details["order_count"], 1);

    // Wallet reflects the debit.
    let response = app
        .request(
            Method::GET,
            &format!("/api/user/{}", GUEST_USER_ID),
            None,
            None,
        )
        .await;
    let user = response_json(response).await;
    assert_eq!(user["wallet_balance"], json!(remaining.to_string()));

    // Cart is emptied by the purchase.
    let response = app
        .request(
            Method::GET,
            &format!("/api/cart?user_id={}", GUEST_USER_ID),
            None,
            None,
        )
        .await;
    let cart = response_json(response).await;
    assert!(cart["lines"].as_array().expect("cart lines").is_empty());

    // The recorded order carries the discounted price.
    let orders = app.state.store.all_orders();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].total_price, total);
}

#[tokio::test]
async fn checkout_with_unknown_promo_still_succeeds_at_full_price() {
    let app = TestApp::new();
    let product = app.cheapest_product();
    add_to_cart(&app, &product.id, 1).await;

    let response = app
        .request(
            Method::POST,
            "/api/checkout",
            Some(json!({
                "user_id": GUEST_USER_ID,
                "promo_code": "NOT-A-CODE"
            })),
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["order_details"]["discount"], json!("0.00"));
}

#[tokio::test]
async fn checkout_with_empty_cart_is_rejected() {
    let app = TestApp::new();

    let response = app
        .request(
            Method::POST,
            "/api/checkout",
            Some(json!({ "user_id": GUEST_USER_ID })),
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert!(body["message"]
        .as_str()
        .expect("error message")
        .contains("Cart is empty"));
}

#[tokio::test]
async fn insufficient_balance_rejects_without_charging() {
    let app = TestApp::new();
    let pricey = app
        .state
        .store
        .all_products()
        .into_iter()
        .max_by_key(|p| p.price)
        .expect("seeded catalog is non-empty");
    assert!(pricey.price > Decimal::from(50_000));
    add_to_cart(&app, &pricey.id, 1).await;

    let response = app
        .request(
            Method::POST,
            "/api/checkout",
            Some(json!({ "user_id": GUEST_USER_ID })),
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert_eq!(body["required"], json!(pricey.price.to_string()));
    assert_eq!(body["available"], json!("50000.00"));

    // No debit, no order, cart untouched.
    let user = app.state.store.user(GUEST_USER_ID).expect("demo user");
    assert_eq!(user.wallet_balance, Decimal::from(50_000));
    assert!(app.state.store.all_orders().is_empty());
    assert_eq!(app.state.store.cart_items_for_user(GUEST_USER_ID).len(), 1);
}

#[tokio::test]
async fn checkout_for_unknown_user_is_not_found() {
    let app = TestApp::new();

    let response = app
        .request(
            Method::POST,
            "/api/checkout",
            Some(json!({ "user_id": "nobody" })),
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
