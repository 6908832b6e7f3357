//! Read-side projections of placed orders.
//!
//! Buyers see each order split into the shops that fulfil it; sellers see
//! only their own slice of each order they take part in.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::catalog::{Catalog, OrderItem, UNKNOWN_CUSTOMER, UNKNOWN_SELLER, User};
use crate::types::{ImageRef, OrderId, OrderStatus, Price, ProductId, UserId};

/// Shown in place of a date for orders the dataset has no timestamp for.
pub const UNDATED: &str = "Date unavailable";

/// One product line of a projected order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderLine {
    pub product_id: ProductId,
    pub product_name: String,
    pub image: Option<ImageRef>,
    pub quantity: u32,
    pub price_each: Price,
}

impl OrderLine {
    /// Price paid times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price_each.times(self.quantity)
    }
}

/// The part of an order fulfilled by one shop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderShop {
    pub seller_id: UserId,
    pub seller_name: String,
    pub status: OrderStatus,
    pub items: Vec<OrderLine>,
}

impl OrderShop {
    /// Sum of this shop's line totals.
    #[must_use]
    pub fn total(&self) -> Price {
        self.items.iter().map(OrderLine::line_total).sum()
    }
}

/// An order as shown in a buyer's order history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuyerOrder {
    pub order_id: OrderId,
    pub buyer_id: UserId,
    /// `None` when the dataset has no timestamp for the order.
    pub ordered_at: Option<DateTime<Utc>>,
    pub overall_status: OrderStatus,
    pub shops: Vec<OrderShop>,
}

impl BuyerOrder {
    /// Sum over all shops.
    #[must_use]
    pub fn total(&self) -> Price {
        self.shops.iter().map(OrderShop::total).sum()
    }
}

/// A seller's slice of an order, as shown on the shop's order board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SellerOrder {
    pub order_id: OrderId,
    pub ordered_at: Option<DateTime<Utc>>,
    pub status: OrderStatus,
    pub customer_name: String,
    pub items: Vec<OrderLine>,
}

impl SellerOrder {
    /// Sum of the seller's lines.
    #[must_use]
    pub fn total(&self) -> Price {
        self.items.iter().map(OrderLine::line_total).sum()
    }
}

/// Order history, newest first, optionally limited to one buyer.
///
/// Shops come from the order's per-seller links. An order without links is
/// split by the sellers of its items instead, each carrying the order's own
/// status. Lines whose product no longer exists are dropped.
#[must_use]
pub fn buyer_order_history(catalog: &Catalog, buyer: Option<UserId>) -> Vec<BuyerOrder> {
    let mut history: Vec<BuyerOrder> = catalog
        .orders()
        .iter()
        .filter(|order| buyer.is_none_or(|buyer| order.buyer_id == buyer))
        .map(|order| {
            let by_seller = lines_by_seller(catalog, catalog.order_items(order.order_id));

            let mut shops: Vec<OrderShop> = catalog
                .order_sellers(order.order_id)
                .map(|entry| OrderShop {
                    seller_id: entry.seller_id,
                    seller_name: seller_name(catalog, entry.seller_id),
                    status: entry.status,
                    items: by_seller
                        .iter()
                        .find(|(seller_id, _)| *seller_id == entry.seller_id)
                        .map(|(_, lines)| lines.clone())
                        .unwrap_or_default(),
                })
                .collect();

            if shops.is_empty() {
                shops = by_seller
                    .into_iter()
                    .map(|(seller_id, items)| OrderShop {
                        seller_id,
                        seller_name: seller_name(catalog, seller_id),
                        status: order.status,
                        items,
                    })
                    .collect();
            }

            BuyerOrder {
                order_id: order.order_id,
                buyer_id: order.buyer_id,
                ordered_at: order.ordered_at,
                overall_status: order.status,
                shops,
            }
        })
        .collect();

    history.sort_by(|a, b| newest_first(a.ordered_at, a.order_id, b.ordered_at, b.order_id));
    history
}

/// Orders a seller takes part in, one entry per per-seller link, with lines
/// restricted to that seller's products.
#[must_use]
pub fn seller_orders(catalog: &Catalog, seller_id: UserId) -> Vec<SellerOrder> {
    catalog
        .dataset()
        .order_sellers
        .iter()
        .filter(|entry| entry.seller_id == seller_id)
        .map(|entry| {
            let order = catalog
                .orders()
                .iter()
                .find(|order| order.order_id == entry.order_id);
            let customer_name = order
                .and_then(|order| catalog.user(order.buyer_id))
                .map_or_else(|| UNKNOWN_CUSTOMER.to_string(), |u| u.full_name.clone());

            let items = catalog
                .order_items(entry.order_id)
                .filter(|item| {
                    catalog
                        .product(item.product_id)
                        .is_some_and(|product| product.seller_id == seller_id)
                })
                .filter_map(|item| order_line(catalog, item))
                .collect();

            SellerOrder {
                order_id: entry.order_id,
                ordered_at: order.and_then(|order| order.ordered_at),
                status: entry.status,
                customer_name,
                items,
            }
        })
        .collect()
}

/// Newest first with undated orders last; equal dates fall back to the
/// higher order id.
#[must_use]
pub fn newest_first(
    a_at: Option<DateTime<Utc>>,
    a_id: OrderId,
    b_at: Option<DateTime<Utc>>,
    b_id: OrderId,
) -> Ordering {
    // `None` orders below every date, so the reversed comparison puts it last.
    b_at.cmp(&a_at).then_with(|| b_id.cmp(&a_id))
}

/// Group resolvable lines by their product's seller, in first-appearance order.
fn lines_by_seller<'a>(
    catalog: &Catalog,
    items: impl Iterator<Item = &'a OrderItem>,
) -> Vec<(UserId, Vec<OrderLine>)> {
    let mut groups: Vec<(UserId, Vec<OrderLine>)> = Vec::new();
    for item in items {
        let Some(product) = catalog.product(item.product_id) else {
            continue;
        };
        let Some(line) = order_line(catalog, item) else {
            continue;
        };
        match groups.iter_mut().find(|(id, _)| *id == product.seller_id) {
            Some((_, lines)) => lines.push(line),
            None => groups.push((product.seller_id, vec![line])),
        }
    }
    groups
}

/// Resolve an order item; the recorded price wins over the current one.
fn order_line(catalog: &Catalog, item: &OrderItem) -> Option<OrderLine> {
    let product = catalog.product(item.product_id)?;
    Some(OrderLine {
        product_id: product.product_id,
        product_name: product.product_name.clone(),
        image: product.product_img.clone(),
        quantity: item.quantity,
        price_each: Price::from_amount(item.price_each.unwrap_or(product.price)),
    })
}

fn seller_name(catalog: &Catalog, seller_id: UserId) -> String {
    catalog
        .user(seller_id)
        .map_or(UNKNOWN_SELLER, User::shop_name_or_default)
        .to_string()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    fn catalog() -> Catalog {
        Catalog::from_json(
            r#"{
                "users": [
                    {"user_id": 1, "username": "a", "full_name": "A", "role": "seller", "shop_name": "Alpha Pizza"},
                    {"user_id": 2, "username": "b", "full_name": "B", "role": "seller", "shop_name": "Beta Tea"},
                    {"user_id": 5, "username": "juan", "full_name": "Juan Dela Cruz", "role": "buyer"}
                ],
                "products": [
                    {"product_id": 10, "seller_id": 1, "category_id": 1, "product_name": "Pizza", "price": "300.00", "avail_stocks": 5},
                    {"product_id": 20, "seller_id": 2, "category_id": 1, "product_name": "Tea", "price": "100.00", "avail_stocks": 5}
                ],
                "orders": [
                    {"order_id": 1, "buyer_id": 5, "status": "delivered", "ordered_at": "2025-09-01T10:00:00Z"},
                    {"order_id": 2, "buyer_id": 5, "status": "pending", "ordered_at": "2025-09-05T10:00:00Z"},
                    {"order_id": 3, "buyer_id": 9, "status": "preparing", "ordered_at": "2025-09-03T10:00:00Z"}
                ],
                "order_items": [
                    {"order_item_id": 1, "order_id": 1, "product_id": 10, "quantity": 2, "price_each": "250.00"},
                    {"order_item_id": 2, "order_id": 1, "product_id": 20, "quantity": 1},
                    {"order_item_id": 3, "order_id": 2, "product_id": 20, "quantity": 3},
                    {"order_item_id": 4, "order_id": 2, "product_id": 10, "quantity": 1},
                    {"order_item_id": 5, "order_id": 2, "product_id": 404, "quantity": 1},
                    {"order_item_id": 6, "order_id": 3, "product_id": 10, "quantity": 1}
                ],
                "order_sellers": [
                    {"order_id": 1, "seller_id": 1, "status": "delivered"},
                    {"order_id": 1, "seller_id": 2, "status": "cancelled"},
                    {"order_id": 3, "seller_id": 1, "status": "preparing"}
                ]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_history_is_newest_first() {
        let history = buyer_order_history(&catalog(), None);
        let ids: Vec<i64> = history.iter().map(|o| o.order_id.as_i64()).collect();
        assert_eq!(ids, [2, 3, 1]);
    }

    #[test]
    fn test_undated_orders_sort_last() {
        let mut data = catalog().dataset().clone();
        for order in &mut data.orders {
            if order.order_id == OrderId::new(2) {
                order.ordered_at = None;
            }
        }
        let catalog = Catalog::from_dataset(data);

        let history = buyer_order_history(&catalog, None);
        let ids: Vec<i64> = history.iter().map(|o| o.order_id.as_i64()).collect();
        assert_eq!(ids, [3, 1, 2]);
        assert_eq!(history[2].ordered_at, None);

        // Sorting does not depend on when it runs.
        assert_eq!(buyer_order_history(&catalog, None), history);
    }

    #[test]
    fn test_history_filters_by_buyer() {
        let history = buyer_order_history(&catalog(), Some(UserId::new(5)));
        assert_eq!(history.len(), 2);
        assert!(history.iter().all(|o| o.buyer_id == UserId::new(5)));
    }

    #[test]
    fn test_shops_come_from_seller_links() {
        let history = buyer_order_history(&catalog(), None);
        let order = history.iter().find(|o| o.order_id == OrderId::new(1)).unwrap();

        assert_eq!(order.shops.len(), 2);
        assert_eq!(order.shops[0].seller_name, "Alpha Pizza");
        assert_eq!(order.shops[1].status, OrderStatus::Cancelled);
        // Recorded price wins over the current product price.
        assert_eq!(order.shops[0].items[0].price_each.amount, Decimal::new(250, 0));
        // No recorded price: falls back to the product price.
        assert_eq!(order.shops[1].items[0].price_each.amount, Decimal::new(100, 0));
        assert_eq!(order.total().amount, Decimal::new(600, 0));
    }

    #[test]
    fn test_unlinked_order_splits_by_item_seller() {
        let history = buyer_order_history(&catalog(), None);
        let order = history.iter().find(|o| o.order_id == OrderId::new(2)).unwrap();

        let names: Vec<&str> = order.shops.iter().map(|s| s.seller_name.as_str()).collect();
        assert_eq!(names, ["Beta Tea", "Alpha Pizza"]);
        assert!(order.shops.iter().all(|s| s.status == OrderStatus::Pending));
        // The line for the missing product is dropped.
        let lines: usize = order.shops.iter().map(|s| s.items.len()).sum();
        assert_eq!(lines, 2);
    }

    #[test]
    fn test_seller_orders_only_show_own_lines() {
        let orders = seller_orders(&catalog(), UserId::new(1));
        assert_eq!(orders.len(), 2);

        let first = &orders[0];
        assert_eq!(first.order_id, OrderId::new(1));
        assert_eq!(first.customer_name, "Juan Dela Cruz");
        assert_eq!(first.items.len(), 1);
        assert_eq!(first.total().amount, Decimal::new(500, 0));

        let second = &orders[1];
        assert_eq!(second.customer_name, UNKNOWN_CUSTOMER);
        assert_eq!(second.status, OrderStatus::Preparing);
    }
}
