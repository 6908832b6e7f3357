//! Product listing and add-product handlers.

use askama::Template;
use axum::{
    Form,
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::instrument;

use hotslice_core::ProductId;

use crate::error::Result;
use crate::inventory::{
    ADD_PRODUCT_SUCCESS, CategoryChoice, ICONS, InventoryError, ListingRow, NewProduct, StockOp,
};
use crate::routes::{Notice, ShopChrome, render};
use crate::state::AppState;

// =============================================================================
// View Types
// =============================================================================

/// Product card display data for templates.
#[derive(Debug, Clone)]
pub struct ProductCard {
    pub product_id: i64,
    pub name: String,
    pub category_name: String,
    pub image: String,
    pub price: String,
    pub stock: u32,
}

impl From<ListingRow> for ProductCard {
    fn from(row: ListingRow) -> Self {
        Self {
            product_id: row.product_id.as_i64(),
            name: row.name,
            category_name: row.category_name,
            image: row.image,
            price: row.price.display(),
            stock: row.stock,
        }
    }
}

// =============================================================================
// Templates
// =============================================================================

/// "My Products" page template.
#[derive(Template)]
#[template(path = "products.html")]
pub struct ProductsTemplate {
    pub chrome: ShopChrome,
    pub products: Vec<ProductCard>,
}

/// Add product page template.
#[derive(Template)]
#[template(path = "product_new.html")]
pub struct NewProductTemplate {
    pub chrome: ShopChrome,
    pub notice: Option<Notice>,
    pub choices: Vec<CategoryChoice>,
    pub icons: &'static [&'static str],
    /// Values to refill the form with after a failed submit.
    pub form: NewProduct,
}

impl NewProductTemplate {
    /// Whether `value` is the pre-selected category choice.
    #[must_use]
    pub fn is_selected(&self, value: &str) -> bool {
        if self.form.category.is_empty() {
            self.choices.first().is_some_and(|choice| choice.value == value)
        } else {
            self.form.category == value
        }
    }

    /// Whether `icon` is the icon picked for the new category.
    #[must_use]
    pub fn is_icon_selected(&self, icon: &str) -> bool {
        self.form.new_category_icon == icon
    }
}

/// Stock change form data.
#[derive(Debug, Deserialize)]
pub struct StockForm {
    pub op: StockOp,
}

// =============================================================================
// Handlers
// =============================================================================

/// The shop's products.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Html<String> {
    let products = state
        .inventory()
        .read()
        .await
        .listing()
        .into_iter()
        .map(ProductCard::from)
        .collect();

    render(&ProductsTemplate {
        chrome: ShopChrome::new(&state, "/products"),
        products,
    })
}

/// Change a product's stock by one unit.
#[instrument(skip(state))]
pub async fn adjust_stock(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Form(form): Form<StockForm>,
) -> Result<Redirect> {
    let product_id = ProductId::new(id);
    let stock = state
        .inventory()
        .write()
        .await
        .adjust_stock(product_id, form.op)?;
    tracing::debug!(%product_id, stock, "Stock adjusted");

    Ok(Redirect::to("/products"))
}

/// Drop a product from the listing.
#[instrument(skip(state))]
pub async fn remove(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Redirect> {
    let removed = state.inventory().write().await.remove(ProductId::new(id))?;
    tracing::info!(product_id = id, name = %removed.product_name, "Product removed");

    Ok(Redirect::to("/products"))
}

/// Empty add product form.
#[instrument(skip(state))]
pub async fn new_form(State(state): State<AppState>) -> Html<String> {
    let choices = state.inventory().read().await.category_choices();
    render(&NewProductTemplate {
        chrome: ShopChrome::new(&state, "/products/new"),
        notice: None,
        choices,
        icons: &ICONS,
        form: NewProduct::default(),
    })
}

/// Add a product, then show the form again with the outcome.
///
/// A successful add clears the form; a failed one keeps what was typed and
/// responds with 422.
#[instrument(skip(state, form))]
pub async fn create(
    State(state): State<AppState>,
    Form(form): Form<NewProduct>,
) -> Result<Response> {
    let mut inventory = state.inventory().write().await;
    let outcome = inventory
        .add_product(&form)
        .map(|product| product.product_id);
    let choices = inventory.category_choices();
    drop(inventory);

    let (status, notice, form) = match outcome {
        Ok(product_id) => {
            tracing::info!(%product_id, name = %form.name, "Product added");
            (StatusCode::OK, Notice::success(ADD_PRODUCT_SUCCESS), NewProduct::default())
        }
        Err(err @ InventoryError::Incomplete) => {
            tracing::debug!(name = %form.name, "Add product rejected");
            (StatusCode::UNPROCESSABLE_ENTITY, Notice::error(err.to_string()), form)
        }
        Err(err) => return Err(err.into()),
    };

    let page = render(&NewProductTemplate {
        chrome: ShopChrome::new(&state, "/products/new"),
        notice: Some(notice),
        choices,
        icons: &ICONS,
        form,
    });
    Ok((status, page).into_response())
}
