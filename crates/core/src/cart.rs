//! Cart state container and its per-seller projection.
//!
//! A [`CartStore`] owns the raw line items. Everything shown to the buyer is
//! derived from it through [`CartStore::view`], which groups lines by the
//! owning seller and resolves product details from the [`Catalog`]. The view
//! is never mutated; it is rebuilt after every change.
//!
//! Every operation is total: invalid input is ignored rather than reported.
//!
//! # Invariants
//!
//! - A stored line always has `quantity >= 1`; anything that would leave a
//!   line at zero removes it instead.
//! - At most one line exists per product.
//! - Quantities never exceed the product's stock at the time of the change.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::{Catalog, Product, UNKNOWN_SELLER, User};
use crate::types::{CartId, CartItemId, ImageRef, Price, ProductId, UserId};

/// One buyer-selected product and quantity pending checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub cart_item_id: CartItemId,
    pub cart_id: CartId,
    pub product_id: ProductId,
    pub quantity: u32,
}

/// Holds the cart's line items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartStore {
    cart_id: CartId,
    lines: Vec<CartLine>,
    next_line_id: i64,
}

impl CartStore {
    /// An empty cart.
    #[must_use]
    pub const fn new(cart_id: CartId) -> Self {
        Self {
            cart_id,
            lines: Vec::new(),
            next_line_id: 1,
        }
    }

    /// A cart pre-filled with the catalog's default cart lines.
    ///
    /// Saved rows for the same product merge into the first one, and every
    /// line is clamped to the product's stock. Lines left at zero are skipped.
    #[must_use]
    pub fn seeded(catalog: &Catalog) -> Self {
        let cart_id = catalog.default_cart_id();
        let mut lines: Vec<CartLine> = Vec::new();

        for item in catalog.cart_items(cart_id) {
            if let Some(line) = lines
                .iter_mut()
                .find(|line| line.product_id == item.product_id)
            {
                line.quantity = line.quantity.saturating_add(item.quantity);
            } else {
                lines.push(CartLine {
                    cart_item_id: item.cart_item_id,
                    cart_id,
                    product_id: item.product_id,
                    quantity: item.quantity,
                });
            }
        }

        for line in &mut lines {
            if let Some(product) = catalog.product(line.product_id) {
                line.quantity = line.quantity.min(product.stock());
            }
        }
        lines.retain(|line| line.quantity > 0);

        let next_line_id = lines
            .iter()
            .map(|line| line.cart_item_id.as_i64())
            .max()
            .unwrap_or(0)
            + 1;

        Self {
            cart_id,
            lines,
            next_line_id,
        }
    }

    /// The cart these lines belong to.
    #[must_use]
    pub const fn cart_id(&self) -> CartId {
        self.cart_id
    }

    /// Raw lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Quantity held for a product, 0 when it has no line.
    #[must_use]
    pub fn quantity_of(&self, product_id: ProductId) -> u32 {
        self.lines
            .iter()
            .find(|line| line.product_id == product_id)
            .map_or(0, |line| line.quantity)
    }

    /// Add `quantity` of `product`, clamped to its available stock.
    ///
    /// No-op when `quantity <= 0`. An existing line is incremented; otherwise
    /// a new line is appended.
    pub fn add(&mut self, product: &Product, quantity: i64) {
        if quantity <= 0 {
            return;
        }

        let cap = product.stock();
        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);

        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.product_id == product.product_id)
        {
            line.quantity = line.quantity.saturating_add(quantity).min(cap);
        } else {
            let line = CartLine {
                cart_item_id: CartItemId::new(self.next_line_id),
                cart_id: self.cart_id,
                product_id: product.product_id,
                quantity: quantity.min(cap),
            };
            self.next_line_id += 1;
            self.lines.push(line);
        }

        self.drop_empty_lines();
    }

    /// Add by product id. No-op when the product is not in the catalog.
    pub fn add_by_id(&mut self, catalog: &Catalog, product_id: ProductId, quantity: i64) {
        if let Some(product) = catalog.product(product_id) {
            self.add(product, quantity);
        }
    }

    /// Set a line's quantity, clamped to the product's current stock.
    ///
    /// No-op when the product has no line. A quantity `<= 0` removes the
    /// line. Products missing from the catalog are not clamped.
    pub fn update_quantity(&mut self, catalog: &Catalog, product_id: ProductId, quantity: i64) {
        if !self.lines.iter().any(|line| line.product_id == product_id) {
            return;
        }

        if quantity <= 0 {
            self.lines.retain(|line| line.product_id != product_id);
            return;
        }

        let requested = u32::try_from(quantity).unwrap_or(u32::MAX);
        let quantity = catalog
            .product(product_id)
            .map_or(requested, |product| requested.min(product.stock()));

        for line in &mut self.lines {
            if line.product_id == product_id {
                line.quantity = quantity;
            }
        }

        self.drop_empty_lines();
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Project the lines into per-seller groups.
    ///
    /// Groups appear in the order their first line was added. Lines whose
    /// product is missing from the catalog are dropped.
    #[must_use]
    pub fn view(&self, catalog: &Catalog) -> CartView {
        let mut groups: Vec<SellerGroup> = Vec::new();

        for line in &self.lines {
            let Some(product) = catalog.product(line.product_id) else {
                continue;
            };

            let seller_name = catalog
                .seller(product.seller_id)
                .map_or(UNKNOWN_SELLER, User::shop_name_or_default);
            let item = CartViewItem {
                product_id: product.product_id,
                product_name: product.product_name.clone(),
                image: product.product_img.clone(),
                price: product.unit_price(),
                quantity: line.quantity,
                seller_id: product.seller_id,
                seller_name: seller_name.to_string(),
                stock: product.stock(),
            };

            match groups
                .iter_mut()
                .find(|group| group.seller_id == product.seller_id)
            {
                Some(group) => group.items.push(item),
                None => groups.push(SellerGroup {
                    seller_id: product.seller_id,
                    seller_name: seller_name.to_string(),
                    items: vec![item],
                }),
            }
        }

        CartView { groups }
    }

    /// Snapshot the cart into a receipt and empty it.
    pub fn checkout(&mut self, catalog: &Catalog) -> Receipt {
        let view = self.view(catalog);
        let total = view.grand_total();
        self.clear();

        let receipt = Receipt {
            receipt_id: Uuid::new_v4(),
            placed_at: Utc::now(),
            groups: view.groups,
            total,
        };

        tracing::info!(
            receipt_id = %receipt.receipt_id,
            total = %receipt.total,
            "Cart checked out"
        );

        receipt
    }

    fn drop_empty_lines(&mut self) {
        self.lines.retain(|line| line.quantity > 0);
    }
}

/// A cart line with resolved product and seller details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartViewItem {
    pub product_id: ProductId,
    pub product_name: String,
    pub image: Option<ImageRef>,
    pub price: Price,
    pub quantity: u32,
    pub seller_id: UserId,
    pub seller_name: String,
    pub stock: u32,
}

impl CartViewItem {
    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price.times(self.quantity)
    }
}

/// Cart lines owned by one seller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SellerGroup {
    pub seller_id: UserId,
    pub seller_name: String,
    pub items: Vec<CartViewItem>,
}

impl SellerGroup {
    /// Sum of this seller's line totals.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.items.iter().map(CartViewItem::line_total).sum()
    }
}

/// The cart grouped by seller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CartView {
    pub groups: Vec<SellerGroup>,
}

impl CartView {
    /// Whether there are no seller groups.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// All items across groups, group by group.
    pub fn items(&self) -> impl Iterator<Item = &CartViewItem> {
        self.groups.iter().flat_map(|group| group.items.iter())
    }

    /// Number of lines shown.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.groups.iter().map(|group| group.items.len()).sum()
    }

    /// Total units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items().map(|item| item.quantity).sum()
    }

    /// Whether a product has a line.
    #[must_use]
    pub fn contains(&self, product_id: ProductId) -> bool {
        self.items().any(|item| item.product_id == product_id)
    }

    /// Sum of every line total.
    #[must_use]
    pub fn grand_total(&self) -> Price {
        self.groups.iter().map(SellerGroup::subtotal).sum()
    }
}

/// What was bought at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Receipt {
    pub receipt_id: Uuid,
    pub placed_at: DateTime<Utc>,
    pub groups: Vec<SellerGroup>,
    pub total: Price,
}
