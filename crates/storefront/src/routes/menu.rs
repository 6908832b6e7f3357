//! Menu carousel and seller list handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use hotslice_core::cart::CartStore;
use hotslice_core::catalog::{Catalog, Product};
use hotslice_core::{Placeholder, UserId, resolve_image};

use crate::browse::{
    self, Carousel, DEFAULT_TAGLINE, Direction, MenuQuery, add_button, headline, stock_left,
};
use crate::error::{AppError, Result};
use crate::forms::lenient;
use crate::models::session::load_cart;
use crate::routes::PageChrome;
use crate::state::AppState;

// =============================================================================
// View Types
// =============================================================================

/// A category tab under the carousel.
#[derive(Debug, Clone)]
pub struct CategoryTab {
    pub href: String,
    pub icon: String,
    pub name: String,
    pub is_active: bool,
}

/// A preview card or dot linking to a carousel position.
#[derive(Debug, Clone)]
pub struct PreviewCard {
    pub href: String,
    pub image: String,
    pub name: String,
    pub is_active: bool,
}

/// Everything shown for the active product.
#[derive(Debug, Clone)]
pub struct SlideView {
    pub product_id: i64,
    pub image: String,
    pub rank_label: String,
    pub title: String,
    pub label: String,
    pub name: String,
    pub description: String,
    pub price: String,
    pub stock_left: u32,
    pub button_label: &'static str,
    pub button_disabled: bool,
    pub prev_href: String,
    pub next_href: String,
    pub return_to: String,
    pub previews: Vec<PreviewCard>,
    pub dots: Vec<PreviewCard>,
    pub categories: Vec<CategoryTab>,
}

impl SlideView {
    fn build(base_path: &str, carousel: &Carousel<'_>, product: &Product, cart: &CartStore) -> Self {
        let href = |index: usize| {
            format!(
                "{base_path}?category={}&index={index}",
                carousel.category_id
            )
        };
        let card = |(index, product): (usize, &Product)| PreviewCard {
            href: href(index),
            image: resolve_image(product.product_img.as_ref(), Placeholder::Food),
            name: product.product_name.clone(),
            is_active: index == carousel.active,
        };
        let (title, label) = headline(&product.product_name);
        let button = add_button(product, cart);

        Self {
            product_id: product.product_id.as_i64(),
            image: resolve_image(product.product_img.as_ref(), Placeholder::Food),
            rank_label: format!("Top {} Best Seller", carousel.active + 1),
            title: title.to_string(),
            label: label.to_string(),
            name: product.product_name.clone(),
            description: product.product_desc.clone(),
            price: product.unit_price().display(),
            stock_left: stock_left(product, cart),
            button_label: button.label(),
            button_disabled: button.is_disabled(),
            prev_href: href(carousel.neighbour(Direction::Prev)),
            next_href: href(carousel.neighbour(Direction::Next)),
            return_to: href(carousel.active),
            previews: carousel.preview().into_iter().map(&card).collect(),
            dots: carousel.items.iter().copied().enumerate().map(&card).collect(),
            categories: carousel
                .categories
                .iter()
                .map(|category| CategoryTab {
                    href: format!("{base_path}?category={}", category.category_id),
                    icon: category.icon().to_string(),
                    name: category.category_name.clone(),
                    is_active: category.category_id == carousel.category_id,
                })
                .collect(),
        }
    }
}

/// A seller card on the seller list.
#[derive(Debug, Clone)]
pub struct SellerCard {
    pub href: String,
    pub logo: String,
    pub shop_name: String,
    pub tagline: String,
}

// =============================================================================
// Templates
// =============================================================================

/// Menu carousel page template.
#[derive(Template, WebTemplate)]
#[template(path = "menu.html")]
pub struct MenuTemplate {
    pub chrome: PageChrome,
    pub heading: String,
    /// `None` renders the empty state.
    pub slide: Option<SlideView>,
}

/// Seller list page template.
#[derive(Template, WebTemplate)]
#[template(path = "sellers.html")]
pub struct SellersTemplate {
    pub chrome: PageChrome,
    pub sellers: Vec<SellerCard>,
    pub page: usize,
    pub total_pages: usize,
    pub prev_href: Option<String>,
    pub next_href: Option<String>,
}

/// Seller list query.
#[derive(Debug, Default, Deserialize)]
pub struct SellerListQuery {
    #[serde(default, deserialize_with = "lenient")]
    pub page: Option<usize>,
}

// =============================================================================
// Handlers
// =============================================================================

/// Carousel over every shop's products.
#[instrument(skip(state, session))]
pub async fn menu(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<MenuQuery>,
) -> Result<Response> {
    render_menu(&state, &session, None, "/menu", "All Shops".to_string(), &query).await
}

/// Carousel over one shop's products.
#[instrument(skip(state, session))]
pub async fn seller_menu(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i64>,
    Query(query): Query<MenuQuery>,
) -> Result<Response> {
    let seller_id = UserId::new(id);
    let seller = state
        .catalog()
        .seller(seller_id)
        .ok_or(AppError::SellerNotFound(seller_id))?;
    let heading = seller.shop_name_or_default().to_string();
    let base_path = format!("/sellers/{id}");

    render_menu(&state, &session, Some(seller_id), &base_path, heading, &query).await
}

/// Paginated seller list.
#[instrument(skip(state, session))]
pub async fn sellers(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<SellerListQuery>,
) -> Result<Response> {
    let chrome = PageChrome::load(&session, state.catalog()).await?;
    let page = browse::seller_page(state.catalog(), query.page.unwrap_or(0));

    let sellers = page
        .sellers
        .iter()
        .map(|seller| SellerCard {
            href: format!("/sellers/{}", seller.user_id),
            logo: resolve_image(seller.logo.as_ref(), Placeholder::Seller),
            shop_name: seller.shop_name_or_default().to_string(),
            tagline: seller
                .shop_tagline
                .as_deref()
                .filter(|tagline| !tagline.trim().is_empty())
                .unwrap_or(DEFAULT_TAGLINE)
                .to_string(),
        })
        .collect();

    Ok(SellersTemplate {
        chrome,
        sellers,
        page: page.page,
        total_pages: page.total_pages,
        prev_href: page
            .has_prev()
            .then(|| format!("/sellers?page={}", page.page - 1)),
        next_href: page
            .has_next()
            .then(|| format!("/sellers?page={}", page.page + 1)),
    }
    .into_response())
}

async fn render_menu(
    state: &AppState,
    session: &Session,
    seller: Option<UserId>,
    base_path: &str,
    heading: String,
    query: &MenuQuery,
) -> Result<Response> {
    let catalog: &Catalog = state.catalog();
    let chrome = PageChrome::load(session, catalog).await?;
    let cart = load_cart(session, catalog).await?;

    let products = browse::listed_products(catalog, seller);
    let slide = Carousel::resolve(catalog, &products, query).and_then(|carousel| {
        carousel
            .current()
            .map(|product| SlideView::build(base_path, &carousel, product, &cart))
    });

    Ok(MenuTemplate {
        chrome,
        heading,
        slide,
    }
    .into_response())
}
