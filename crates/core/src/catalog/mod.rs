//! In-memory mock dataset standing in for a database.
//!
//! The dataset is embedded at compile time and parsed once into a
//! [`Catalog`], which keeps id indexes for the tables that are looked up by
//! key. A catalog never changes after construction; servers share it behind
//! an `Arc`.

mod records;
mod validate;

use std::collections::HashMap;
use std::hash::Hash;

pub use records::{
    Cart, CartItem, Category, Dataset, Order, OrderItem, OrderSeller, Product, UNKNOWN_CUSTOMER,
    UNKNOWN_SELLER, User,
};
pub use validate::IntegrityIssue;

use crate::types::{CartId, CategoryId, OrderId, ProductId, UserId};

/// The dataset bundled with the crate.
const DEMO_DATASET: &str = include_str!("../../data/mock_data.json");

/// Errors that can occur while loading a dataset.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The dataset is not valid JSON of the expected shape.
    #[error("invalid dataset: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Read-only view over the dataset tables with id lookups.
#[derive(Debug, Clone)]
pub struct Catalog {
    data: Dataset,
    users: HashMap<UserId, usize>,
    products: HashMap<ProductId, usize>,
    categories: HashMap<CategoryId, usize>,
}

impl Catalog {
    /// Load the bundled demo dataset.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Parse` if the embedded JSON is malformed.
    pub fn demo() -> Result<Self, CatalogError> {
        Self::from_json(DEMO_DATASET)
    }

    /// Parse a dataset from JSON.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Parse` if the input is not a dataset.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let data: Dataset = serde_json::from_str(json)?;
        Ok(Self::from_dataset(data))
    }

    /// Build a catalog from already-parsed tables.
    ///
    /// When ids repeat, lookups resolve to the first row.
    #[must_use]
    pub fn from_dataset(data: Dataset) -> Self {
        let users = index_by(&data.users, |u| u.user_id);
        let products = index_by(&data.products, |p| p.product_id);
        let categories = index_by(&data.categories, |c| c.category_id);

        tracing::debug!(
            users = data.users.len(),
            products = data.products.len(),
            orders = data.orders.len(),
            "Catalog loaded"
        );

        Self {
            data,
            users,
            products,
            categories,
        }
    }

    /// The raw tables.
    #[must_use]
    pub const fn dataset(&self) -> &Dataset {
        &self.data
    }

    /// Look up a product.
    #[must_use]
    pub fn product(&self, id: ProductId) -> Option<&Product> {
        self.products.get(&id).and_then(|&i| self.data.products.get(i))
    }

    /// All products, in dataset order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.data.products
    }

    /// Products listed by one seller, in dataset order.
    pub fn products_by_seller(&self, seller_id: UserId) -> impl Iterator<Item = &Product> {
        self.data
            .products
            .iter()
            .filter(move |p| p.seller_id == seller_id)
    }

    /// Look up any user.
    #[must_use]
    pub fn user(&self, id: UserId) -> Option<&User> {
        self.users.get(&id).and_then(|&i| self.data.users.get(i))
    }

    /// Look up a user that has the seller role.
    #[must_use]
    pub fn seller(&self, id: UserId) -> Option<&User> {
        self.user(id).filter(|u| u.is_seller())
    }

    /// All sellers, in dataset order.
    pub fn sellers(&self) -> impl Iterator<Item = &User> {
        self.data.users.iter().filter(|u| u.is_seller())
    }

    /// Look up a category.
    #[must_use]
    pub fn category(&self, id: CategoryId) -> Option<&Category> {
        self.categories
            .get(&id)
            .and_then(|&i| self.data.categories.get(i))
    }

    /// All categories, in dataset order.
    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.data.categories
    }

    /// All orders, in dataset order.
    #[must_use]
    pub fn orders(&self) -> &[Order] {
        &self.data.orders
    }

    /// Lines of one order.
    pub fn order_items(&self, order_id: OrderId) -> impl Iterator<Item = &OrderItem> {
        self.data
            .order_items
            .iter()
            .filter(move |item| item.order_id == order_id)
    }

    /// Per-seller slices of one order.
    pub fn order_sellers(&self, order_id: OrderId) -> impl Iterator<Item = &OrderSeller> {
        self.data
            .order_sellers
            .iter()
            .filter(move |entry| entry.order_id == order_id)
    }

    /// The cart new visitors start from: the first cart row, or id 0.
    #[must_use]
    pub fn default_cart_id(&self) -> CartId {
        self.data
            .carts
            .first()
            .map_or(CartId::new(0), |cart| cart.cart_id)
    }

    /// Saved lines of one cart.
    pub fn cart_items(&self, cart_id: CartId) -> impl Iterator<Item = &CartItem> {
        self.data
            .cart_items
            .iter()
            .filter(move |item| item.cart_id == cart_id)
    }

    /// Check referential integrity of the tables.
    #[must_use]
    pub fn validate(&self) -> Vec<IntegrityIssue> {
        validate::check(self)
    }
}

/// Map each key to the position of its first row.
fn index_by<T, K, F>(rows: &[T], key: F) -> HashMap<K, usize>
where
    K: Eq + Hash,
    F: Fn(&T) -> K,
{
    let mut index = HashMap::with_capacity(rows.len());
    for (i, row) in rows.iter().enumerate() {
        index.entry(key(row)).or_insert(i);
    }
    index
}
