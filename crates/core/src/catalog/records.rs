//! Row types of the mock dataset.
//!
//! Field names follow the dataset's JSON columns.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{
    CartId, CartItemId, CategoryId, ImageRef, OrderId, OrderItemId, OrderStatus, Price, ProductId,
    UserId, UserRole,
};

/// Shop name used when a product's seller is missing from the dataset.
pub const UNKNOWN_SELLER: &str = "Unknown Seller";

/// Buyer name used when an order's buyer is missing from the dataset.
pub const UNKNOWN_CUSTOMER: &str = "Unknown Customer";

/// A marketplace user. Sellers carry shop details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub user_id: UserId,
    pub username: String,
    pub full_name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub contact_number: String,
    pub email_address: Option<String>,
    pub role: UserRole,
    pub shop_name: Option<String>,
    pub shop_tagline: Option<String>,
    pub logo: Option<ImageRef>,
}

impl User {
    /// Whether the user has the seller role.
    #[must_use]
    pub fn is_seller(&self) -> bool {
        self.role == UserRole::Seller
    }

    /// Shop name, or the unknown-seller placeholder when unset.
    #[must_use]
    pub fn shop_name_or_default(&self) -> &str {
        self.shop_name.as_deref().unwrap_or(UNKNOWN_SELLER)
    }
}

/// A product category with its Material Symbols icon name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub category_id: CategoryId,
    pub category_name: String,
    pub icon_name: Option<String>,
}

impl Category {
    /// Icon name, `more_horiz` when unset.
    #[must_use]
    pub fn icon(&self) -> &str {
        self.icon_name.as_deref().unwrap_or("more_horiz")
    }
}

/// A product listed by a seller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub product_id: ProductId,
    pub seller_id: UserId,
    pub category_id: CategoryId,
    pub product_name: String,
    #[serde(default)]
    pub product_desc: String,
    pub price: Decimal,
    pub product_img: Option<ImageRef>,
    pub avail_stocks: i64,
}

impl Product {
    /// Unit price in the store currency.
    #[must_use]
    pub const fn unit_price(&self) -> Price {
        Price::from_amount(self.price)
    }

    /// Available stock, treating negative dataset values as none.
    #[must_use]
    pub fn stock(&self) -> u32 {
        u32::try_from(self.avail_stocks.max(0)).unwrap_or(u32::MAX)
    }
}

/// A placed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub order_id: OrderId,
    pub buyer_id: UserId,
    pub status: OrderStatus,
    pub ordered_at: Option<DateTime<Utc>>,
}

/// One product line of an order. `price_each` is the price paid, when recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub order_item_id: OrderItemId,
    pub order_id: OrderId,
    pub product_id: ProductId,
    pub quantity: u32,
    pub price_each: Option<Decimal>,
}

/// A seller's slice of an order, with its own fulfilment status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSeller {
    pub order_id: OrderId,
    pub seller_id: UserId,
    pub status: OrderStatus,
}

/// A buyer's saved cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    pub cart_id: CartId,
    pub buyer_id: UserId,
}

/// A saved cart line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub cart_item_id: CartItemId,
    pub cart_id: CartId,
    pub product_id: ProductId,
    pub quantity: u32,
}

/// All dataset tables as parsed from JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub orders: Vec<Order>,
    #[serde(default)]
    pub order_items: Vec<OrderItem>,
    #[serde(default)]
    pub order_sellers: Vec<OrderSeller>,
    #[serde(default)]
    pub carts: Vec<Cart>,
    #[serde(default)]
    pub cart_items: Vec<CartItem>,
}
