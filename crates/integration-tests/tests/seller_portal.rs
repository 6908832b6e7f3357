//! Seller portal flows driven through the router.

use axum::http::StatusCode;
use hotslice_core::catalog::Catalog;
use hotslice_core::{OrderId, OrderStatus, ProductId};
use hotslice_integration_tests::TestClient;
use hotslice_seller::config::SellerConfig;
use hotslice_seller::inventory::{ADD_PRODUCT_INCOMPLETE, ADD_PRODUCT_SUCCESS};
use hotslice_seller::state::AppState;

fn portal() -> (AppState, TestClient) {
    let state = AppState::new(SellerConfig::default(), Catalog::demo().expect("demo catalog"));
    let client = TestClient::new(hotslice_seller::app(state.clone()));
    (state, client)
}

async fn stock_of(state: &AppState, id: i64) -> Option<u32> {
    state
        .inventory()
        .read()
        .await
        .product(ProductId::new(id))
        .map(hotslice_core::catalog::Product::stock)
}

#[tokio::test]
async fn test_product_listing() {
    let (_, mut client) = portal();

    assert_eq!(client.get("/").await.location(), Some("/products"));

    let page = client.get("/products").await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("Margherita Pizza"));
    // Another shop's product.
    assert!(!page.body.contains("Smash Burger"));
}

#[tokio::test]
async fn test_stock_floor() {
    let (state, mut client) = portal();

    // Hawaiian Pizza starts sold out.
    let response = client
        .post_form("/products/3/stock", &[("op", "remove")])
        .await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(stock_of(&state, 3).await, Some(0));

    client.post_form("/products/3/stock", &[("op", "add")]).await;
    assert_eq!(stock_of(&state, 3).await, Some(1));

    let missing = client
        .post_form("/products/999/stock", &[("op", "add")])
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_remove_product() {
    let (state, mut client) = portal();

    let response = client.post_form("/products/2/remove", &[]).await;
    assert_eq!(response.location(), Some("/products"));
    assert_eq!(stock_of(&state, 2).await, None);

    let again = client.post_form("/products/2/remove", &[]).await;
    assert_eq!(again.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_add_product() {
    let (state, mut client) = portal();

    let rejected = client
        .post_form("/products", &[("name", "Calzone"), ("category", "1")])
        .await;
    assert_eq!(rejected.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(rejected.body.contains(ADD_PRODUCT_INCOMPLETE));
    // What was typed is kept.
    assert!(rejected.body.contains("value=\"Calzone\""));

    let added = client
        .post_form(
            "/products",
            &[
                ("name", "Calzone"),
                ("price", "289.50"),
                ("description", "Folded+and+baked"),
                ("stock", "6"),
                ("category", "other"),
                ("new_category_name", "Rice+Bowls"),
                ("new_category_icon", "bento"),
            ],
        )
        .await;
    assert_eq!(added.status, StatusCode::OK);
    assert!(added.body.contains(ADD_PRODUCT_SUCCESS));
    assert!(added.body.contains("Rice Bowls"));
    assert_eq!(stock_of(&state, 15).await, Some(6));

    assert!(client.get("/products").await.body.contains("Calzone"));
}

#[tokio::test]
async fn test_order_status_change() {
    let (state, mut client) = portal();

    let response = client
        .post_form("/orders/1003/status", &[("status", "out_for_delivery")])
        .await;
    assert_eq!(response.location(), Some("/orders"));

    let orders = state
        .board()
        .read()
        .await
        .orders(state.catalog(), state.config().seller_id);
    let order = orders
        .iter()
        .find(|order| order.order_id == OrderId::new(1003))
        .expect("order 1003 on the board");
    assert_eq!(order.status, OrderStatus::OutForDelivery);

    // Order 1002 is fulfilled by another shop.
    let foreign = client
        .post_form("/orders/1002/status", &[("status", "delivered")])
        .await;
    assert_eq!(foreign.status, StatusCode::NOT_FOUND);

    let invalid = client
        .post_form("/orders/1003/status", &[("status", "shipped")])
        .await;
    assert!(invalid.status.is_client_error());

    let page = client.get("/orders").await;
    assert!(page.body.contains("Order #1003"));
    assert!(page.body.contains("Juan Dela Cruz"));
}

#[tokio::test]
async fn test_analytics_json() {
    let (_, mut client) = portal();
    let report = client.get("/api/analytics").await.json();

    assert_eq!(report["top_products"]["entries"][0]["label"], "Iced Tea Pitcher");
    assert_eq!(report["top_products"]["total"], "14");
    assert_eq!(report["combos"][0]["count"], 3);
    assert_eq!(
        report["charts"]["categories"]["colors"],
        serde_json::json!(["#c47b08", "#ffb52e", "#ffd182", "#ffe6a7"])
    );
    assert_eq!(report["recent_orders"].as_array().map(Vec::len), Some(5));

    let page = client.get("/analytics").await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("Frequent Combos"));
}

#[tokio::test]
async fn test_unbundled_product_photo_uses_placeholder() {
    let (_, mut client) = portal();

    let image = client.get("/static/assets/pepperoni.png").await;
    assert_eq!(image.status, StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(
        image.location(),
        Some("https://via.placeholder.com/160x160?text=Product")
    );
}
