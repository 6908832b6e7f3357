//! Storefront flows driven through the router with a session cookie.

use axum::http::StatusCode;
use hotslice_core::catalog::Catalog;
use hotslice_integration_tests::TestClient;
use hotslice_storefront::config::StorefrontConfig;
use hotslice_storefront::routes::auth::LOGIN_INCOMPLETE;
use hotslice_storefront::routes::cart::{CHECKOUT_EMPTY, CHECKOUT_SUCCESS};
use hotslice_storefront::state::AppState;
use serde_json::Value;

fn client() -> TestClient {
    let config = StorefrontConfig::from_lookup(|_| None).expect("default config");
    let catalog = Catalog::demo().expect("demo catalog");
    TestClient::new(hotslice_storefront::app(AppState::new(config, catalog)))
}

/// `(product_id, quantity)` of every line in the cart JSON.
fn lines(cart: &Value) -> Vec<(i64, i64)> {
    cart["groups"]
        .as_array()
        .into_iter()
        .flatten()
        .flat_map(|group| group["items"].as_array().into_iter().flatten())
        .map(|item| {
            (
                item["product_id"].as_i64().unwrap_or_default(),
                item["quantity"].as_i64().unwrap_or_default(),
            )
        })
        .collect()
}

#[tokio::test]
async fn test_health_and_headers() {
    let mut client = client();
    let response = client.get("/health").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, "ok");
    assert!(response.headers.contains_key("x-request-id"));
    assert_eq!(response.headers["x-frame-options"], "DENY");
}

#[tokio::test]
async fn test_new_visitor_gets_seeded_cart() {
    let mut client = client();
    let cart = client.get("/api/cart").await.json();

    let groups = cart["groups"].as_array().expect("groups");
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0]["seller_name"], "Slice Republic");
    assert_eq!(groups[1]["seller_name"], "Sweet Crumbs Bakery");
    assert_eq!(lines(&cart), [(2, 1), (9, 2)]);
}

#[tokio::test]
async fn test_add_update_checkout() {
    let mut client = client();

    // Spicy Dan Dan Noodles has 5 in stock.
    let response = client
        .post_form(
            "/cart/add",
            &[("product_id", "7"), ("quantity", "10"), ("return_to", "/menu")],
        )
        .await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), Some("/menu"));

    let cart = client.get("/api/cart").await.json();
    assert_eq!(lines(&cart), [(2, 1), (9, 2), (7, 5)]);
    assert_eq!(cart["groups"].as_array().map(Vec::len), Some(3));

    let response = client
        .post_form("/cart/update", &[("product_id", "9"), ("quantity", "0")])
        .await;
    assert_eq!(response.location(), Some("/cart"));
    assert_eq!(lines(&client.get("/api/cart").await.json()), [(2, 1), (7, 5)]);

    let receipt = client.post_form("/checkout", &[]).await;
    assert_eq!(receipt.status, StatusCode::OK);
    assert!(receipt.body.contains(CHECKOUT_SUCCESS));
    assert!(receipt.body.contains("Spicy Dan Dan Noodles"));

    // The cart stays empty rather than re-seeding.
    let cart = client.get("/api/cart").await.json();
    assert!(lines(&cart).is_empty());

    let response = client.post_form("/checkout", &[]).await;
    assert_eq!(response.location(), Some("/cart"));
    assert!(client.get("/cart").await.body.contains(CHECKOUT_EMPTY));
}

#[tokio::test]
async fn test_sold_out_product_is_not_added() {
    let mut client = client();
    client
        .post_form("/cart/add", &[("product_id", "3"), ("return_to", "/menu")])
        .await;

    let cart = client.get("/api/cart").await.json();
    assert!(lines(&cart).iter().all(|(product, _)| *product != 3));
}

#[tokio::test]
async fn test_cart_count_fragment() {
    let mut client = client();
    let response = client.get("/cart/count").await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains(">3</span>"));
}

#[tokio::test]
async fn test_incomplete_login_shows_notice() {
    let mut client = client();
    let response = client
        .post_form("/login", &[("username", "juandc"), ("password", "")])
        .await;
    assert_eq!(response.location(), Some("/"));

    let page = client.get("/").await;
    assert!(page.body.contains(LOGIN_INCOMPLETE));

    // The notice is shown once.
    assert!(!client.get("/").await.body.contains(LOGIN_INCOMPLETE));
}

#[tokio::test]
async fn test_login_then_order_history() {
    let mut client = client();
    let response = client
        .post_form("/login", &[("username", "juandc"), ("password", "demo")])
        .await;
    assert_eq!(response.location(), Some("/menu"));

    let history = client.get("/orders").await;
    assert_eq!(history.status, StatusCode::OK);
    assert!(history.body.contains("juandc"));
    assert!(history.body.contains("Order #1003"));
    // Order 1002 belongs to another buyer.
    assert!(!history.body.contains("Order #1002"));
}

#[tokio::test]
async fn test_seller_pages() {
    let mut client = client();

    let shop = client.get("/sellers/1").await;
    assert_eq!(shop.status, StatusCode::OK);
    assert!(shop.body.contains("Slice Republic"));

    assert_eq!(client.get("/sellers/999").await.status, StatusCode::NOT_FOUND);
    // Buyers are not shops.
    assert_eq!(client.get("/sellers/5").await.status, StatusCode::NOT_FOUND);

    let list = client.get("/sellers?page=1").await;
    assert_eq!(list.status, StatusCode::OK);
    assert!(list.body.contains("Grill Theory"));
}

#[tokio::test]
async fn test_menu_category_filter() {
    let mut client = client();
    let menu = client.get("/menu?category=3&index=1").await;

    assert_eq!(menu.status, StatusCode::OK);
    assert!(menu.body.contains("Calamansi Juice"));
    assert!(menu.body.contains("Top 2 Best Seller"));
}

#[tokio::test]
async fn test_malformed_cart_quantities_are_ignored() {
    let mut client = client();

    // An emptied or garbled quantity box adds a single unit.
    for quantity in ["", "abc"] {
        let response = client
            .post_form("/cart/add", &[("product_id", "7"), ("quantity", quantity)])
            .await;
        assert_eq!(response.status, StatusCode::SEE_OTHER);
        assert_eq!(response.location(), Some("/cart"));
    }
    let cart = client.get("/api/cart").await.json();
    assert!(lines(&cart).contains(&(7, 2)));

    for quantity in ["", "abc", "1.5"] {
        let response = client
            .post_form("/cart/update", &[("product_id", "9"), ("quantity", quantity)])
            .await;
        assert_eq!(response.status, StatusCode::SEE_OTHER);
    }
    let response = client
        .post_form("/cart/add", &[("product_id", "pizza"), ("quantity", "2")])
        .await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);

    let cart = client.get("/api/cart").await.json();
    let mut current = lines(&cart);
    current.sort_unstable();
    assert_eq!(current, [(2, 1), (7, 2), (9, 2)]);
}

#[tokio::test]
async fn test_malformed_browse_queries_fall_back() {
    let mut client = client();

    let menu = client.get("/menu?index=-1&direction=sideways&category=x").await;
    assert_eq!(menu.status, StatusCode::OK);
    assert!(menu.body.contains("Top 1 Best Seller"));

    let list = client.get("/sellers?page=abc").await;
    assert_eq!(list.status, StatusCode::OK);
    assert!(list.body.contains("Slice Republic"));
}

#[tokio::test]
async fn test_unbundled_images_use_placeholder() {
    let mut client = client();

    let image = client.get("/static/assets/margherita.png").await;
    assert_eq!(image.status, StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(
        image.location(),
        Some("https://via.placeholder.com/600x400?text=Food")
    );

    let other = client.get("/static/missing.js").await;
    assert_eq!(other.status, StatusCode::NOT_FOUND);
}
