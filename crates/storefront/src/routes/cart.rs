//! Cart route handlers.
//!
//! The cart lives in the visitor's session. Each handler loads it, applies
//! one operation and writes it back before responding.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form, Json,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use hotslice_core::cart::{CartView, CartViewItem, Receipt, SellerGroup};
use hotslice_core::{Placeholder, ProductId, resolve_image};

use crate::error::{Result, add_breadcrumb};
use crate::forms::lenient;
use crate::models::Flash;
use crate::models::session::{load_cart, save_cart};
use crate::routes::PageChrome;
use crate::state::AppState;

/// Notice shown on the receipt page.
pub const CHECKOUT_SUCCESS: &str = "Checkout successful! (Demo data only)";

/// Notice shown after checking out an empty cart.
pub const CHECKOUT_EMPTY: &str = "Your cart is empty.";

// =============================================================================
// View Types
// =============================================================================

/// Cart line display data for templates.
#[derive(Debug, Clone)]
pub struct LineView {
    pub product_id: i64,
    pub name: String,
    pub image: String,
    pub price: String,
    pub line_total: String,
    pub quantity: u32,
    /// Quantity submitted by the minus button.
    pub decrement: u32,
    /// Quantity submitted by the plus button.
    pub increment: u32,
    pub at_stock_limit: bool,
}

impl From<&CartViewItem> for LineView {
    fn from(item: &CartViewItem) -> Self {
        Self {
            product_id: item.product_id.as_i64(),
            name: item.product_name.clone(),
            image: resolve_image(item.image.as_ref(), Placeholder::Item),
            price: item.price.display(),
            line_total: item.line_total().display(),
            quantity: item.quantity,
            decrement: item.quantity.saturating_sub(1),
            increment: item.quantity.saturating_add(1),
            at_stock_limit: item.quantity >= item.stock,
        }
    }
}

/// Seller group display data for templates.
#[derive(Debug, Clone)]
pub struct GroupView {
    pub seller_name: String,
    pub subtotal: String,
    pub lines: Vec<LineView>,
}

impl From<&SellerGroup> for GroupView {
    fn from(group: &SellerGroup) -> Self {
        Self {
            seller_name: group.seller_name.clone(),
            subtotal: group.subtotal().display(),
            lines: group.items.iter().map(LineView::from).collect(),
        }
    }
}

/// Cart page data: groups for the cards, flat lines for the receipt panel.
#[derive(Debug, Clone)]
pub struct CartPageView {
    pub groups: Vec<GroupView>,
    pub grand_total: String,
    pub item_count: u32,
}

impl From<&CartView> for CartPageView {
    fn from(view: &CartView) -> Self {
        Self {
            groups: view.groups.iter().map(GroupView::from).collect(),
            grand_total: view.grand_total().display(),
            item_count: view.item_count(),
        }
    }
}

impl CartPageView {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Every line across groups, for the receipt panel.
    #[must_use]
    pub fn receipt_lines(&self) -> Vec<&LineView> {
        self.groups.iter().flat_map(|group| &group.lines).collect()
    }
}

// =============================================================================
// Form Types
// =============================================================================

/// Add to cart form data.
///
/// A quantity box left empty or holding text adds one unit.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    #[serde(default, deserialize_with = "lenient")]
    pub product_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub quantity: Option<i64>,
    /// Page to go back to after adding.
    pub return_to: Option<String>,
}

/// Update cart form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    #[serde(default, deserialize_with = "lenient")]
    pub product_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub quantity: Option<i64>,
}

// =============================================================================
// Templates
// =============================================================================

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart.html")]
pub struct CartShowTemplate {
    pub chrome: PageChrome,
    pub cart: CartPageView,
}

/// Receipt page template.
#[derive(Template, WebTemplate)]
#[template(path = "receipt.html")]
pub struct ReceiptTemplate {
    pub chrome: PageChrome,
    pub receipt_id: String,
    pub placed_at: String,
    pub cart: CartPageView,
}

/// Cart count badge fragment template.
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u32,
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the cart page.
#[instrument(skip(state, session))]
pub async fn show(State(state): State<AppState>, session: Session) -> Result<Response> {
    let cart = load_cart(&session, state.catalog()).await?;
    // Persist the seeded cart so later requests see the same line ids.
    save_cart(&session, &cart).await?;
    let chrome = PageChrome::load(&session, state.catalog()).await?;

    Ok(CartShowTemplate {
        chrome,
        cart: CartPageView::from(&cart.view(state.catalog())),
    }
    .into_response())
}

/// Add a product to the cart.
///
/// Unknown products and non-positive quantities are ignored; the quantity is
/// clamped to the product's stock.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<AddToCartForm>,
) -> Result<Redirect> {
    let back = Redirect::to(safe_return_path(form.return_to.as_deref()));
    let Some(product_id) = form.product_id.map(ProductId::new) else {
        return Ok(back);
    };
    let catalog = state.catalog();
    let mut cart = load_cart(&session, catalog).await?;
    let quantity = form.quantity.unwrap_or(1);

    let before = cart.quantity_of(product_id);
    cart.add_by_id(catalog, product_id, quantity);
    let after = cart.quantity_of(product_id);
    save_cart(&session, &cart).await?;

    if after > before {
        if let Some(product) = catalog.product(product_id) {
            Flash::success(format!("Added {} to your cart.", product.product_name))
                .push(&session)
                .await?;
        }
    }
    let product_ref = product_id.to_string();
    add_breadcrumb("cart", "Added to cart", Some(&[("product_id", product_ref.as_str())]));
    tracing::debug!(%product_id, before, after, "Cart add");

    Ok(back)
}

/// Set a line's quantity; zero or less removes the line.
///
/// A missing product or quantity leaves the cart untouched.
#[instrument(skip(state, session))]
pub async fn update(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<UpdateCartForm>,
) -> Result<Redirect> {
    let (Some(product_id), Some(quantity)) = (form.product_id, form.quantity) else {
        tracing::debug!(?form, "Cart update ignored");
        return Ok(Redirect::to("/cart"));
    };
    let mut cart = load_cart(&session, state.catalog()).await?;
    cart.update_quantity(state.catalog(), ProductId::new(product_id), quantity);
    save_cart(&session, &cart).await?;

    Ok(Redirect::to("/cart"))
}

/// Remove every line.
#[instrument(skip(state, session))]
pub async fn clear(State(state): State<AppState>, session: Session) -> Result<Redirect> {
    let mut cart = load_cart(&session, state.catalog()).await?;
    cart.clear();
    save_cart(&session, &cart).await?;

    Ok(Redirect::to("/cart"))
}

/// Cart count badge fragment.
#[instrument(skip(state, session))]
pub async fn count(State(state): State<AppState>, session: Session) -> Result<CartCountTemplate> {
    let cart = load_cart(&session, state.catalog()).await?;
    Ok(CartCountTemplate {
        count: cart.view(state.catalog()).item_count(),
    })
}

/// The grouped cart as JSON.
#[instrument(skip(state, session))]
pub async fn api_cart(State(state): State<AppState>, session: Session) -> Result<Json<CartView>> {
    let cart = load_cart(&session, state.catalog()).await?;
    Ok(Json(cart.view(state.catalog())))
}

/// Place the demo order: snapshot the cart into a receipt and empty it.
#[instrument(skip(state, session))]
pub async fn checkout(State(state): State<AppState>, session: Session) -> Result<Response> {
    let mut cart = load_cart(&session, state.catalog()).await?;
    if cart.view(state.catalog()).is_empty() {
        Flash::error(CHECKOUT_EMPTY).push(&session).await?;
        return Ok(Redirect::to("/cart").into_response());
    }

    let receipt: Receipt = cart.checkout(state.catalog());
    save_cart(&session, &cart).await?;

    Flash::success(CHECKOUT_SUCCESS).push(&session).await?;
    let chrome = PageChrome::load(&session, state.catalog()).await?;

    let view = CartView {
        groups: receipt.groups,
    };

    Ok(ReceiptTemplate {
        chrome,
        receipt_id: receipt.receipt_id.to_string(),
        placed_at: receipt.placed_at.format("%b %-d, %Y %H:%M UTC").to_string(),
        cart: CartPageView::from(&view),
    }
    .into_response())
}

/// Only same-site absolute paths are followed after adding to the cart.
fn safe_return_path(return_to: Option<&str>) -> &str {
    match return_to {
        Some(path) if path.starts_with('/') && !path.starts_with("//") => path,
        _ => "/cart",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_return_path_is_same_site() {
        assert_eq!(safe_return_path(Some("/menu?category=1&index=2")), "/menu?category=1&index=2");
        assert_eq!(safe_return_path(Some("//evil.example")), "/cart");
        assert_eq!(safe_return_path(Some("https://evil.example")), "/cart");
        assert_eq!(safe_return_path(None), "/cart");
    }
}
