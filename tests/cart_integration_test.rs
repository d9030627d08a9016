mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;
use storefront_api::store::GUEST_USER_ID;

use common::{response_json, TestApp};

#[tokio::test]
async fn catalog_lists_seeded_products_and_serves_details() {
    let app = TestApp::new();

    let response = app.request(Method::GET, "/api/products", None, None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let products = response_json(response).await;
    let products = products.as_array().expect("product list");
    assert!(products.len() >= 9);

    let id = products[0]["id"].as_str().expect("product id");
    let response = app
        .request(Method::GET, &format!("/api/products/{}", id), None, None)
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .request(Method::GET, "/api/products/no-such-product", None, None)
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn adding_the_same_product_twice_merges_into_one_line() {
    let app = TestApp::new();
    let product = app.cheapest_product();

    for _ in 0..2 {
        let response = app
            .request(
                Method::POST,
                "/api/cart",
                Some(json!({
                    "user_id": GUEST_USER_ID,
                    "product_id": product.id,
                    "quantity": 1
                })),
                None,
            )
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = app
        .request(
            Method::GET,
            &format!("/api/cart?user_id={}", GUEST_USER_ID),
            None,
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let cart = response_json(response).await;

    let lines = cart["lines"].as_array().expect("cart lines");
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["item"]["quantity"], 2);

    let expected_subtotal = (product.price * rust_decimal::Decimal::from(2)).to_string();
    assert_eq!(cart["subtotal"], json!(expected_subtotal));
}

#[tokio::test]
async fn cart_lines_can_be_updated_and_removed() {
    let app = TestApp::new();
    let product = app.cheapest_product();

    let response = app
        .request(
            Method::POST,
            "/api/cart",
            Some(json!({
                "user_id": GUEST_USER_ID,
                "product_id": product.id,
                "quantity": 1
            })),
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let item = response_json(response).await;
    let item_id = item["id"].as_str().expect("cart item id");

    let response = app
        .request(
            Method::PATCH,
            &format!("/api/cart/{}", item_id),
            Some(json!({ "quantity": 3 })),
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = response_json(response).await;
    assert_eq!(updated["quantity"], 3);

    let response = app
        .request(
            Method::DELETE,
            &format!("/api/cart/{}", item_id),
            None,
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

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
}

#[tokio::test]
async fn zero_quantity_is_rejected() {
    let app = TestApp::new();
    let product = app.cheapest_product();

    let response = app
        .request(
            Method::POST,
            "/api/cart",
            Some(json!({
                "user_id": GUEST_USER_ID,
                "product_id": product.id,
                "quantity": 0
            })),
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
