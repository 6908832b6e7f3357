//! The shop's in-memory product listing.
//!
//! Seeded from the seller's catalog products at startup. Stock changes,
//! removals and new products live only as long as the process.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

use hotslice_core::catalog::{Catalog, Category, Product};
use hotslice_core::{CategoryId, ImageRef, Placeholder, Price, ProductId, UserId, resolve_image};

/// Category name shown when a product's category is unknown.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Notice shown when the add-product form is incomplete or invalid.
pub const ADD_PRODUCT_INCOMPLETE: &str = "Please complete all fields before adding a product.";

/// Notice shown after a product is added.
pub const ADD_PRODUCT_SUCCESS: &str = "Product added successfully! (demo)";

/// Icon given to a custom category when none is picked.
pub const DEFAULT_ICON: &str = "more_horiz";

/// Form value of the `Other` category choice.
pub const OTHER_CHOICE: &str = "other";

/// Catalog categories offered before any custom ones.
const BASE_CHOICES: usize = 4;

/// Material Symbols icons a custom category may use.
pub const ICONS: [&str; 23] = [
    "local_pizza",
    "local_cafe",
    "fork_spoon",
    "dinner_dining",
    "icecream",
    "lunch_dining",
    "cookie",
    "local_bar",
    "bakery_dining",
    "kebab_dining",
    "skillet",
    "room_service",
    "soup_kitchen",
    "stockpot",
    "egg_alt",
    "grocery",
    "blender",
    "bento",
    "outdoor_grill",
    "restaurant",
    "tapas",
    "nutrition",
    "brunch_dining",
];

/// Errors from inventory operations.
#[derive(Debug, Error)]
pub enum InventoryError {
    #[error("product {0} not found")]
    ProductNotFound(ProductId),

    #[error("{ADD_PRODUCT_INCOMPLETE}")]
    Incomplete,
}

/// Direction of a one-unit stock change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StockOp {
    Add,
    Remove,
}

/// One row of the "My Products" listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingRow {
    pub product_id: ProductId,
    pub name: String,
    pub category_name: String,
    pub image: String,
    pub price: Price,
    pub stock: u32,
}

/// A category offered on the add-product form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryChoice {
    /// Form value: a category id, or [`OTHER_CHOICE`].
    pub value: String,
    pub name: String,
    pub icon: String,
}

/// Raw add-product form input. Every field arrives as text.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct NewProduct {
    pub name: String,
    pub price: String,
    pub description: String,
    pub stock: String,
    /// Selected category choice value.
    pub category: String,
    /// Custom category typed in the `Other` dialog.
    pub new_category_name: String,
    pub new_category_icon: String,
    /// Image file name or URL.
    pub image: String,
}

/// The seller's product listing plus the categories it can file under.
#[derive(Debug, Clone)]
pub struct Inventory {
    seller_id: UserId,
    products: Vec<Product>,
    categories: Vec<Category>,
    /// Categories created from the add-product form, in creation order.
    custom: Vec<CategoryId>,
    next_product_id: i64,
    next_category_id: i64,
}

impl Inventory {
    /// Seed from the seller's catalog products.
    #[must_use]
    pub fn from_catalog(catalog: &Catalog, seller_id: UserId) -> Self {
        let next_product_id = catalog
            .products()
            .iter()
            .map(|product| product.product_id.as_i64())
            .max()
            .unwrap_or(0)
            + 1;
        let next_category_id = catalog
            .categories()
            .iter()
            .map(|category| category.category_id.as_i64())
            .max()
            .unwrap_or(0)
            + 1;

        Self {
            seller_id,
            products: catalog.products_by_seller(seller_id).cloned().collect(),
            categories: catalog.categories().to_vec(),
            custom: Vec::new(),
            next_product_id,
            next_category_id,
        }
    }

    #[must_use]
    pub const fn seller_id(&self) -> UserId {
        self.seller_id
    }

    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub fn product(&self, product_id: ProductId) -> Option<&Product> {
        self.products
            .iter()
            .find(|product| product.product_id == product_id)
    }

    /// Listing rows in listing order.
    #[must_use]
    pub fn listing(&self) -> Vec<ListingRow> {
        self.products
            .iter()
            .map(|product| ListingRow {
                product_id: product.product_id,
                name: product.product_name.clone(),
                category_name: self
                    .category(product.category_id)
                    .map_or_else(|| UNCATEGORIZED.to_string(), |c| c.category_name.clone()),
                image: resolve_image(product.product_img.as_ref(), Placeholder::Product),
                price: product.unit_price(),
                stock: product.stock(),
            })
            .collect()
    }

    /// Change a product's stock by one unit, never going below zero.
    ///
    /// # Errors
    ///
    /// Returns `InventoryError::ProductNotFound` if the product is not listed.
    pub fn adjust_stock(&mut self, product_id: ProductId, op: StockOp) -> Result<u32, InventoryError> {
        let product = self
            .products
            .iter_mut()
            .find(|product| product.product_id == product_id)
            .ok_or(InventoryError::ProductNotFound(product_id))?;

        product.avail_stocks = match op {
            StockOp::Add => product.avail_stocks.max(0).saturating_add(1),
            StockOp::Remove => (product.avail_stocks - 1).max(0),
        };
        Ok(product.stock())
    }

    /// Drop a product from the listing.
    ///
    /// # Errors
    ///
    /// Returns `InventoryError::ProductNotFound` if the product is not listed.
    pub fn remove(&mut self, product_id: ProductId) -> Result<Product, InventoryError> {
        let index = self
            .products
            .iter()
            .position(|product| product.product_id == product_id)
            .ok_or(InventoryError::ProductNotFound(product_id))?;
        Ok(self.products.remove(index))
    }

    /// Choices for the add-product form: the first catalog categories, then
    /// custom ones, then `Other`.
    #[must_use]
    pub fn category_choices(&self) -> Vec<CategoryChoice> {
        let mut choices: Vec<CategoryChoice> = self
            .categories
            .iter()
            .take(BASE_CHOICES)
            .chain(self.custom.iter().filter_map(|id| self.category(*id)))
            .map(|category| CategoryChoice {
                value: category.category_id.to_string(),
                name: category.category_name.clone(),
                icon: category.icon().to_string(),
            })
            .collect();
        choices.push(CategoryChoice {
            value: OTHER_CHOICE.to_string(),
            name: "Other".to_string(),
            icon: "add".to_string(),
        });
        choices
    }

    /// Validate the form and list the new product.
    ///
    /// A custom category name wins over the selected choice. It reuses an
    /// offered category with the same name (ignoring case) or creates one.
    ///
    /// # Errors
    ///
    /// Returns `InventoryError::Incomplete` if a field is missing or invalid,
    /// or no category could be resolved. Nothing changes in that case.
    pub fn add_product(&mut self, form: &NewProduct) -> Result<&Product, InventoryError> {
        let name = required(&form.name)?;
        let description = required(&form.description)?;
        let price = Decimal::from_str(required(&form.price)?)
            .ok()
            .filter(|price| !price.is_sign_negative())
            .ok_or(InventoryError::Incomplete)?;
        let stock = required(&form.stock)?
            .parse::<u32>()
            .map_err(|_| InventoryError::Incomplete)?;
        let category_id = self.resolve_category(form)?;

        let product_id = ProductId::new(self.next_product_id);
        self.next_product_id += 1;

        self.products.push(Product {
            product_id,
            seller_id: self.seller_id,
            category_id,
            product_name: name.to_string(),
            product_desc: description.to_string(),
            price,
            product_img: Some(form.image.trim())
                .filter(|image| !image.is_empty())
                .map(ImageRef::new),
            avail_stocks: i64::from(stock),
        });
        tracing::info!(%product_id, %category_id, "Product listed");

        self.products.last().ok_or(InventoryError::Incomplete)
    }

    fn category(&self, category_id: CategoryId) -> Option<&Category> {
        self.categories
            .iter()
            .find(|category| category.category_id == category_id)
    }

    fn resolve_category(&mut self, form: &NewProduct) -> Result<CategoryId, InventoryError> {
        let custom_name = form.new_category_name.trim();
        if !custom_name.is_empty() {
            let existing = self
                .category_choices()
                .into_iter()
                .find(|choice| choice.name.eq_ignore_ascii_case(custom_name))
                .and_then(|choice| choice.value.parse::<CategoryId>().ok());
            return Ok(existing.unwrap_or_else(|| self.create_category(custom_name, &form.new_category_icon)));
        }

        // `Other` without a name resolves to nothing.
        let selected = form
            .category
            .parse::<CategoryId>()
            .map_err(|_| InventoryError::Incomplete)?;
        self.category_choices()
            .iter()
            .any(|choice| choice.value == selected.to_string())
            .then_some(selected)
            .ok_or(InventoryError::Incomplete)
    }

    fn create_category(&mut self, name: &str, icon: &str) -> CategoryId {
        let icon = icon.trim();
        let icon = if ICONS.contains(&icon) { icon } else { DEFAULT_ICON };

        let category_id = CategoryId::new(self.next_category_id);
        self.next_category_id += 1;
        self.categories.push(Category {
            category_id,
            category_name: name.to_string(),
            icon_name: Some(icon.to_string()),
        });
        self.custom.push(category_id);
        tracing::info!(%category_id, name, icon, "Category created");
        category_id
    }
}

fn required(value: &str) -> Result<&str, InventoryError> {
    let value = value.trim();
    if value.is_empty() {
        Err(InventoryError::Incomplete)
    } else {
        Ok(value)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn slice_republic() -> Inventory {
        Inventory::from_catalog(&Catalog::demo().unwrap(), UserId::new(1))
    }

    fn form(category: &str) -> NewProduct {
        NewProduct {
            name: "Calzone".to_string(),
            price: "289.50".to_string(),
            description: "Folded and baked".to_string(),
            stock: "6".to_string(),
            category: category.to_string(),
            ..NewProduct::default()
        }
    }

    #[test]
    fn test_seeded_with_own_products_only() {
        let inventory = slice_republic();
        assert_eq!(inventory.products().len(), 5);
        assert!(inventory.products().iter().all(|p| p.seller_id == UserId::new(1)));
    }

    #[test]
    fn test_stock_floors_at_zero() {
        let mut inventory = slice_republic();
        let sold_out = ProductId::new(3);
        assert_eq!(inventory.adjust_stock(sold_out, StockOp::Remove).unwrap(), 0);
        assert_eq!(inventory.adjust_stock(sold_out, StockOp::Add).unwrap(), 1);
        assert_eq!(inventory.adjust_stock(sold_out, StockOp::Remove).unwrap(), 0);
        assert_eq!(inventory.adjust_stock(sold_out, StockOp::Remove).unwrap(), 0);
    }

    #[test]
    fn test_unknown_product_is_not_found() {
        let mut inventory = slice_republic();
        // Product 6 belongs to another shop.
        assert!(matches!(
            inventory.adjust_stock(ProductId::new(6), StockOp::Add),
            Err(InventoryError::ProductNotFound(_))
        ));
        assert!(inventory.remove(ProductId::new(999)).is_err());
    }

    #[test]
    fn test_remove_drops_listing_row() {
        let mut inventory = slice_republic();
        let removed = inventory.remove(ProductId::new(2)).unwrap();
        assert_eq!(removed.product_id, ProductId::new(2));
        assert!(inventory.listing().iter().all(|row| row.product_id != removed.product_id));
    }

    #[test]
    fn test_listing_falls_back_to_uncategorized() {
        let mut inventory = slice_republic();
        inventory.products[0].category_id = CategoryId::new(404);
        assert_eq!(inventory.listing()[0].category_name, UNCATEGORIZED);
    }

    #[test]
    fn test_choices_end_with_other() {
        let choices = slice_republic().category_choices();
        let names: Vec<&str> = choices.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Pizza", "Pasta", "Drinks", "Desserts", "Other"]);
        assert_eq!(choices[4].value, OTHER_CHOICE);
    }

    #[test]
    fn test_add_product_with_selected_category() {
        let mut inventory = slice_republic();
        let product = inventory.add_product(&form("2")).unwrap();
        assert_eq!(product.product_id, ProductId::new(15));
        assert_eq!(product.category_id, CategoryId::new(2));
        assert_eq!(product.avail_stocks, 6);
        assert!(product.product_img.is_none());
        assert_eq!(inventory.products().len(), 6);
    }

    #[test]
    fn test_add_product_rejects_incomplete_or_invalid() {
        let mut inventory = slice_republic();
        for broken in [
            NewProduct { name: "  ".to_string(), ..form("1") },
            NewProduct { price: "-1".to_string(), ..form("1") },
            NewProduct { price: "cheap".to_string(), ..form("1") },
            NewProduct { stock: "2.5".to_string(), ..form("1") },
            NewProduct { stock: "-3".to_string(), ..form("1") },
            form(OTHER_CHOICE),
            // Burgers exists in the catalog but is not offered.
            form("5"),
        ] {
            assert!(matches!(
                inventory.add_product(&broken),
                Err(InventoryError::Incomplete)
            ));
        }
        assert_eq!(inventory.products().len(), 5);
    }

    #[test]
    fn test_custom_category_inserted_before_other() {
        let mut inventory = slice_republic();
        let new = NewProduct {
            new_category_name: "Rice Bowls".to_string(),
            new_category_icon: "bento".to_string(),
            ..form(OTHER_CHOICE)
        };
        let category_id = inventory.add_product(&new).unwrap().category_id;
        assert_eq!(category_id, CategoryId::new(7));

        let choices = inventory.category_choices();
        assert_eq!(choices.len(), 6);
        assert_eq!(choices[4].name, "Rice Bowls");
        assert_eq!(choices[4].icon, "bento");
        assert_eq!(choices[5].value, OTHER_CHOICE);
    }

    #[test]
    fn test_custom_category_matches_existing_ignoring_case() {
        let mut inventory = slice_republic();
        let new = NewProduct {
            new_category_name: " pasta ".to_string(),
            ..form(OTHER_CHOICE)
        };
        assert_eq!(inventory.add_product(&new).unwrap().category_id, CategoryId::new(2));
        assert_eq!(inventory.category_choices().len(), 5);
    }

    #[test]
    fn test_unknown_icon_falls_back_to_default() {
        let mut inventory = slice_republic();
        let new = NewProduct {
            new_category_name: "Soups".to_string(),
            new_category_icon: "rocket".to_string(),
            ..form("1")
        };
        inventory.add_product(&new).unwrap();
        assert_eq!(inventory.category_choices()[4].icon, DEFAULT_ICON);
    }
}
