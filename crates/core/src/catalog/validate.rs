//! Referential integrity checks over the dataset tables.

use std::collections::HashSet;

use super::Catalog;
use crate::types::{CartId, CategoryId, OrderId, ProductId, UserId};

/// A broken invariant found in the dataset.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IntegrityIssue {
    #[error("duplicate {table} id {id}")]
    DuplicateId { table: &'static str, id: i64 },
    #[error("product {product} references unknown seller {seller}")]
    UnknownSeller { product: ProductId, seller: UserId },
    #[error("product {product} references unknown category {category}")]
    UnknownCategory {
        product: ProductId,
        category: CategoryId,
    },
    #[error("product {product} has negative stock {stock}")]
    NegativeStock { product: ProductId, stock: i64 },
    #[error("order {order} references unknown buyer {buyer}")]
    UnknownBuyer { order: OrderId, buyer: UserId },
    #[error("order item references unknown order {order}")]
    OrphanOrderItem { order: OrderId },
    #[error("order {order} references unknown product {product}")]
    UnknownOrderProduct { order: OrderId, product: ProductId },
    #[error("cart item references unknown cart {cart}")]
    OrphanCartItem { cart: CartId },
    #[error("cart {cart} references unknown product {product}")]
    UnknownCartProduct { cart: CartId, product: ProductId },
    #[error("cart {cart} lists product {product} more than once")]
    DuplicateCartLine { cart: CartId, product: ProductId },
}

pub(super) fn check(catalog: &Catalog) -> Vec<IntegrityIssue> {
    let data = catalog.dataset();
    let mut issues = Vec::new();

    duplicates(&mut issues, "user", data.users.iter().map(|u| u.user_id.as_i64()));
    duplicates(
        &mut issues,
        "product",
        data.products.iter().map(|p| p.product_id.as_i64()),
    );
    duplicates(
        &mut issues,
        "category",
        data.categories.iter().map(|c| c.category_id.as_i64()),
    );
    duplicates(&mut issues, "order", data.orders.iter().map(|o| o.order_id.as_i64()));
    duplicates(&mut issues, "cart", data.carts.iter().map(|c| c.cart_id.as_i64()));

    for product in &data.products {
        if catalog.seller(product.seller_id).is_none() {
            issues.push(IntegrityIssue::UnknownSeller {
                product: product.product_id,
                seller: product.seller_id,
            });
        }
        if catalog.category(product.category_id).is_none() {
            issues.push(IntegrityIssue::UnknownCategory {
                product: product.product_id,
                category: product.category_id,
            });
        }
        if product.avail_stocks < 0 {
            issues.push(IntegrityIssue::NegativeStock {
                product: product.product_id,
                stock: product.avail_stocks,
            });
        }
    }

    let orders: HashSet<OrderId> = data.orders.iter().map(|o| o.order_id).collect();
    for order in &data.orders {
        if catalog.user(order.buyer_id).is_none() {
            issues.push(IntegrityIssue::UnknownBuyer {
                order: order.order_id,
                buyer: order.buyer_id,
            });
        }
    }
    for item in &data.order_items {
        if !orders.contains(&item.order_id) {
            issues.push(IntegrityIssue::OrphanOrderItem {
                order: item.order_id,
            });
        }
        if catalog.product(item.product_id).is_none() {
            issues.push(IntegrityIssue::UnknownOrderProduct {
                order: item.order_id,
                product: item.product_id,
            });
        }
    }

    let carts: HashSet<CartId> = data.carts.iter().map(|c| c.cart_id).collect();
    let mut cart_lines = HashSet::new();
    for item in &data.cart_items {
        if !cart_lines.insert((item.cart_id, item.product_id)) {
            issues.push(IntegrityIssue::DuplicateCartLine {
                cart: item.cart_id,
                product: item.product_id,
            });
        }
        if !carts.contains(&item.cart_id) {
            issues.push(IntegrityIssue::OrphanCartItem { cart: item.cart_id });
        }
        if catalog.product(item.product_id).is_none() {
            issues.push(IntegrityIssue::UnknownCartProduct {
                cart: item.cart_id,
                product: item.product_id,
            });
        }
    }

    issues
}

fn duplicates<K>(issues: &mut Vec<IntegrityIssue>, table: &'static str, ids: K)
where
    K: Iterator<Item = i64>,
{
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            issues.push(IntegrityIssue::DuplicateId { table, id });
        }
    }
}
