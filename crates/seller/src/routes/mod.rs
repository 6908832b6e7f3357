//! HTTP route handlers for the seller portal.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Health check
//! GET  /                       - Redirect to the product listing
//!
//! # Products
//! GET  /products               - My products
//! GET  /products/new           - Add product form
//! POST /products               - Add a product
//! POST /products/{id}/stock    - Stock +1 / -1 (op=add|remove)
//! POST /products/{id}/remove   - Drop a product from the listing
//!
//! # Orders
//! GET  /orders                 - Shop orders
//! POST /orders/{id}/status     - Change an order's status
//!
//! # Analytics
//! GET  /analytics              - Analytics dashboard
//! GET  /api/analytics          - Dashboard data as JSON
//! ```

pub mod analytics;
pub mod orders;
pub mod products;

use askama::Template;
use axum::{
    Router,
    response::{Html, Redirect},
    routing::{get, post},
};

use hotslice_core::catalog::UNKNOWN_SELLER;

use crate::state::AppState;

/// Values every page needs for the navigation bar.
#[derive(Debug, Clone)]
pub struct ShopChrome {
    pub shop_name: String,
    pub current_path: &'static str,
}

impl ShopChrome {
    #[must_use]
    pub fn new(state: &AppState, current_path: &'static str) -> Self {
        Self {
            shop_name: state
                .seller()
                .map_or(UNKNOWN_SELLER, |seller| seller.shop_name_or_default())
                .to_string(),
            current_path,
        }
    }

    /// Whether a nav link points at the current page.
    #[must_use]
    pub fn is_current(&self, path: &str) -> bool {
        self.current_path == path
    }
}

/// A notice shown above a re-rendered form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub is_error: bool,
}

impl Notice {
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            is_error: false,
        }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            is_error: true,
        }
    }

    #[must_use]
    pub const fn css_class(&self) -> &'static str {
        if self.is_error {
            "notice notice--error"
        } else {
            "notice notice--success"
        }
    }
}

/// Render a template, logging failures instead of surfacing them.
pub fn render(template: &impl Template) -> Html<String> {
    Html(template.render().unwrap_or_else(|e| {
        tracing::error!("Template render error: {e}");
        "Internal Server Error".to_string()
    }))
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index).post(products::create))
        .route("/new", get(products::new_form))
        .route("/{id}/stock", post(products::adjust_stock))
        .route("/{id}/remove", post(products::remove))
}

/// Create all routes for the seller portal.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(|| async { Redirect::to("/products") }))
        // Products
        .nest("/products", product_routes())
        // Orders
        .route("/orders", get(orders::index))
        .route("/orders/{id}/status", post(orders::set_status))
        // Analytics
        .route("/analytics", get(analytics::index))
        .route("/api/analytics", get(analytics::api))
}
