//! Menu carousel and seller list state.
//!
//! The carousel is stateless on the server: every request carries the
//! selected category, the active index and an optional step direction, and
//! the page is derived from those plus the visitor's cart.

use std::str::FromStr;

use serde::Deserialize;

use hotslice_core::cart::CartStore;
use hotslice_core::catalog::{Catalog, Category, Product, User};
use hotslice_core::{CategoryId, UserId};

use crate::forms::lenient;

/// Number of preview cards shown under the carousel.
pub const PREVIEW_WINDOW: usize = 5;

/// Sellers shown per page on the seller list.
pub const SELLERS_PER_PAGE: usize = 3;

/// Tagline shown for shops that have none.
pub const DEFAULT_TAGLINE: &str = "Great food, great mood.";

/// Step requested by the carousel arrows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Next,
    Prev,
}

impl FromStr for Direction {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "next" => Ok(Self::Next),
            "prev" => Ok(Self::Prev),
            _ => Err(()),
        }
    }
}

/// Query string of the menu pages.
///
/// Values that do not parse are treated as absent.
#[derive(Debug, Default, Deserialize)]
pub struct MenuQuery {
    #[serde(default, deserialize_with = "lenient")]
    pub category: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub index: Option<usize>,
    #[serde(default, deserialize_with = "lenient")]
    pub direction: Option<Direction>,
}

/// State of the add-to-cart button for the active product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddButton {
    Enabled,
    OutOfStock,
    AlreadyInCart,
}

impl AddButton {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Enabled => "Add to Cart",
            Self::OutOfStock => "Out of Stock",
            Self::AlreadyInCart => "Already in Cart",
        }
    }

    #[must_use]
    pub const fn is_disabled(self) -> bool {
        !matches!(self, Self::Enabled)
    }
}

/// The resolved carousel for one request.
#[derive(Debug, Clone)]
pub struct Carousel<'a> {
    /// Categories that have at least one listed product, in catalog order.
    pub categories: Vec<&'a Category>,
    pub category_id: CategoryId,
    /// Products of the selected category.
    pub items: Vec<&'a Product>,
    pub active: usize,
}

impl<'a> Carousel<'a> {
    /// Resolve the carousel for `products`.
    ///
    /// Returns `None` when no category has products, which the page renders
    /// as the empty state.
    #[must_use]
    pub fn resolve(catalog: &'a Catalog, products: &[&'a Product], query: &MenuQuery) -> Option<Self> {
        let categories: Vec<&Category> = catalog
            .categories()
            .iter()
            .filter(|category| {
                products
                    .iter()
                    .any(|product| product.category_id == category.category_id)
            })
            .collect();

        let requested = query.category.map(CategoryId::new);
        let category_id = requested
            .filter(|id| categories.iter().any(|c| c.category_id == *id))
            .or_else(|| categories.first().map(|c| c.category_id))?;

        let items: Vec<&Product> = products
            .iter()
            .copied()
            .filter(|product| product.category_id == category_id)
            .collect();

        let active = step(query.index.unwrap_or(0), items.len(), query.direction);

        Some(Self {
            categories,
            category_id,
            items,
            active,
        })
    }

    /// The product on the main slide.
    #[must_use]
    pub fn current(&self) -> Option<&'a Product> {
        self.items.get(self.active).copied()
    }

    /// First index of the preview strip. The strip always contains the
    /// active item.
    #[must_use]
    pub const fn window_start(&self) -> usize {
        self.active.saturating_sub(PREVIEW_WINDOW - 1)
    }

    /// Products in the preview strip with their carousel index.
    #[must_use]
    pub fn preview(&self) -> Vec<(usize, &'a Product)> {
        self.items
            .iter()
            .copied()
            .enumerate()
            .skip(self.window_start())
            .take(PREVIEW_WINDOW)
            .collect()
    }

    /// Index reached by one step in `direction`.
    #[must_use]
    pub fn neighbour(&self, direction: Direction) -> usize {
        step(self.active, self.items.len(), Some(direction))
    }
}

/// Wrap `index` into `0..len`, then apply one step.
///
/// An out-of-range index resets to 0. Steps wrap around, and are ignored
/// when there is nothing to move to.
#[must_use]
pub const fn step(index: usize, len: usize, direction: Option<Direction>) -> usize {
    if len == 0 {
        return 0;
    }
    let index = if index < len { index } else { 0 };
    if len <= 1 {
        return index;
    }
    match direction {
        Some(Direction::Next) => (index + 1) % len,
        Some(Direction::Prev) => (index + len - 1) % len,
        None => index,
    }
}

/// Units still available to add: stock minus what the cart already holds.
#[must_use]
pub fn stock_left(product: &Product, cart: &CartStore) -> u32 {
    product
        .stock()
        .saturating_sub(cart.quantity_of(product.product_id))
}

/// Button state for a product given the visitor's cart.
#[must_use]
pub fn add_button(product: &Product, cart: &CartStore) -> AddButton {
    if product.stock() == 0 {
        AddButton::OutOfStock
    } else if cart.quantity_of(product.product_id) > 0 {
        AddButton::AlreadyInCart
    } else {
        AddButton::Enabled
    }
}

/// Big title and accent label derived from a product name.
///
/// The title is the first word, the label the second (or the first again for
/// one-word names).
#[must_use]
pub fn headline(name: &str) -> (&str, &str) {
    let mut words = name.split_whitespace();
    let title = words.next().unwrap_or("");
    let label = words.next().unwrap_or(title);
    (title, label)
}

/// One page of the seller list.
#[derive(Debug, Clone)]
pub struct SellerPage<'a> {
    pub sellers: Vec<&'a User>,
    pub page: usize,
    pub total_pages: usize,
}

impl SellerPage<'_> {
    #[must_use]
    pub const fn has_prev(&self) -> bool {
        self.page > 0
    }

    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.page + 1 < self.total_pages
    }
}

/// Slice the sellers into pages of [`SELLERS_PER_PAGE`], clamping `page`
/// into range. There is always at least one (possibly empty) page.
#[must_use]
pub fn seller_page(catalog: &Catalog, page: usize) -> SellerPage<'_> {
    let sellers: Vec<&User> = catalog.sellers().collect();
    let total_pages = sellers.len().div_ceil(SELLERS_PER_PAGE).max(1);
    let page = page.min(total_pages - 1);

    SellerPage {
        sellers: sellers
            .into_iter()
            .skip(page * SELLERS_PER_PAGE)
            .take(SELLERS_PER_PAGE)
            .collect(),
        page,
        total_pages,
    }
}

/// Products listed on a menu page, optionally for one seller only.
#[must_use]
pub fn listed_products(catalog: &Catalog, seller: Option<UserId>) -> Vec<&Product> {
    catalog
        .products()
        .iter()
        .filter(|product| seller.is_none_or(|id| product.seller_id == id))
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn demo() -> Catalog {
        Catalog::demo().unwrap()
    }

    #[test]
    fn test_step_wraps_both_ways() {
        assert_eq!(step(2, 3, Some(Direction::Next)), 0);
        assert_eq!(step(0, 3, Some(Direction::Prev)), 2);
        assert_eq!(step(1, 3, None), 1);
    }

    #[test]
    fn test_step_resets_out_of_range_index() {
        assert_eq!(step(7, 3, None), 0);
        assert_eq!(step(7, 3, Some(Direction::Next)), 1);
        assert_eq!(step(4, 0, Some(Direction::Next)), 0);
    }

    #[test]
    fn test_step_ignored_for_single_item() {
        assert_eq!(step(0, 1, Some(Direction::Next)), 0);
        assert_eq!(step(0, 1, Some(Direction::Prev)), 0);
    }

    #[test]
    fn test_categories_without_products_are_hidden() {
        let catalog = demo();
        let products = listed_products(&catalog, Some(UserId::new(3)));
        let carousel = Carousel::resolve(&catalog, &products, &MenuQuery::default()).unwrap();

        let names: Vec<&str> = carousel
            .categories
            .iter()
            .map(|c| c.category_name.as_str())
            .collect();
        assert_eq!(names, ["Drinks", "Desserts"]);
        // Falls back to the first available category.
        assert_eq!(carousel.category_id, CategoryId::new(3));
    }

    #[test]
    fn test_invalid_category_falls_back() {
        let catalog = demo();
        let products = listed_products(&catalog, None);
        let query = MenuQuery {
            category: Some(99),
            ..MenuQuery::default()
        };
        let carousel = Carousel::resolve(&catalog, &products, &query).unwrap();
        assert_eq!(carousel.category_id, CategoryId::new(1));
        assert_eq!(carousel.current().unwrap().product_name, "Margherita Pizza");
    }

    #[test]
    fn test_no_products_has_no_carousel() {
        let catalog = demo();
        let products = listed_products(&catalog, Some(UserId::new(5)));
        assert!(Carousel::resolve(&catalog, &products, &MenuQuery::default()).is_none());
    }

    #[test]
    fn test_preview_window_contains_active() {
        let catalog = demo();
        let products = listed_products(&catalog, None);
        let query = MenuQuery {
            category: Some(3),
            index: Some(3),
            direction: Some(Direction::Next),
        };
        let carousel = Carousel::resolve(&catalog, &products, &query).unwrap();

        // Drinks: products 5, 8, 11, 14; index 3 + next wraps to 0.
        assert_eq!(carousel.items.len(), 4);
        assert_eq!(carousel.active, 0);
        assert_eq!(carousel.window_start(), 0);
        assert_eq!(carousel.preview().len(), 4);
        assert_eq!(carousel.neighbour(Direction::Prev), 3);
    }

    #[test]
    fn test_window_slides_past_five_items() {
        let catalog = demo();
        let products: Vec<&Product> = catalog.products().iter().collect();
        let carousel = Carousel {
            categories: Vec::new(),
            category_id: CategoryId::new(1),
            items: products,
            active: 6,
        };
        assert_eq!(carousel.window_start(), 2);
        let preview = carousel.preview();
        assert_eq!(preview.len(), PREVIEW_WINDOW);
        assert_eq!(preview.last().unwrap().0, 6);
    }

    #[test]
    fn test_button_and_stock_left() {
        let catalog = demo();
        let cart = CartStore::seeded(&catalog);

        let sold_out = catalog.product(hotslice_core::ProductId::new(3)).unwrap();
        assert_eq!(add_button(sold_out, &cart), AddButton::OutOfStock);

        let in_cart = catalog.product(hotslice_core::ProductId::new(9)).unwrap();
        assert_eq!(add_button(in_cart, &cart), AddButton::AlreadyInCart);
        assert_eq!(stock_left(in_cart, &cart), 8);

        let fresh = catalog.product(hotslice_core::ProductId::new(1)).unwrap();
        assert_eq!(add_button(fresh, &cart), AddButton::Enabled);
        assert!(!AddButton::Enabled.is_disabled());
        assert_eq!(AddButton::OutOfStock.label(), "Out of Stock");
    }

    #[test]
    fn test_headline() {
        assert_eq!(headline("Margherita Pizza"), ("Margherita", "Pizza"));
        assert_eq!(headline("Lasagna"), ("Lasagna", "Lasagna"));
        assert_eq!(headline(""), ("", ""));
    }

    #[test]
    fn test_seller_pages_are_clamped() {
        let catalog = demo();
        let first = seller_page(&catalog, 0);
        assert_eq!(first.total_pages, 2);
        assert_eq!(first.sellers.len(), 3);
        assert!(!first.has_prev());
        assert!(first.has_next());

        let last = seller_page(&catalog, 10);
        assert_eq!(last.page, 1);
        assert_eq!(last.sellers.len(), 1);
        assert_eq!(last.sellers[0].shop_name_or_default(), "Grill Theory");
        assert!(!last.has_next());
    }
}
