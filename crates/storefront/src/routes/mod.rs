//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Login page
//! POST /login                  - Simulated sign-in
//! GET  /register               - Register page
//! POST /register               - Simulated registration
//! POST /logout                 - Sign out
//!
//! # Browsing
//! GET  /menu                   - Carousel over every shop's products
//! GET  /sellers                - Seller list (?page=N)
//! GET  /sellers/{id}           - Carousel over one shop's products
//!
//! # Cart
//! GET  /cart                   - Cart page grouped by shop
//! POST /cart/add               - Add to cart, then back to `return_to`
//! POST /cart/update            - Set a line's quantity (0 removes it)
//! POST /cart/clear             - Empty the cart
//! GET  /cart/count             - Cart count badge (fragment)
//! GET  /api/cart               - Cart view as JSON
//! POST /checkout               - Place the demo order and show the receipt
//!
//! # Orders
//! GET  /orders                 - Order history
//! ```

pub mod auth;
pub mod cart;
pub mod menu;
pub mod orders;

use axum::{
    Router,
    routing::{get, post},
};
use tower_sessions::Session;

use hotslice_core::catalog::Catalog;

use crate::error::Result;
use crate::models::Flash;
use crate::models::session::{current_shopper, load_cart};
use crate::state::AppState;

/// Values every full page needs for the navigation bar.
#[derive(Debug, Clone, Default)]
pub struct PageChrome {
    /// Units in the visitor's cart.
    pub cart_count: u32,
    pub username: Option<String>,
    /// Notice queued by the previous request, consumed on render.
    pub flash: Option<Flash>,
}

impl PageChrome {
    /// Read the chrome from the session, consuming any queued notice.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Session` if the session store fails.
    pub async fn load(session: &Session, catalog: &Catalog) -> Result<Self> {
        let cart = load_cart(session, catalog).await?;
        let shopper = current_shopper(session).await?;
        let flash = Flash::take(session).await?;

        Ok(Self {
            cart_count: cart.view(catalog).item_count(),
            username: shopper.map(|shopper| shopper.username),
            flash,
        })
    }
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/clear", post(cart::clear))
        .route("/count", get(cart::count))
}

/// Create the seller browsing routes router.
pub fn seller_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(menu::sellers))
        .route("/{id}", get(menu::seller_menu))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Auth
        .route("/", get(auth::login_page))
        .route("/login", post(auth::login))
        .route("/register", get(auth::register_page).post(auth::register))
        .route("/logout", post(auth::logout))
        // Browsing
        .route("/menu", get(menu::menu))
        .nest("/sellers", seller_routes())
        // Cart
        .nest("/cart", cart_routes())
        .route("/api/cart", get(cart::api_cart))
        .route("/checkout", post(cart::checkout))
        // Orders
        .route("/orders", get(orders::index))
}
