//! Shop order board: the seller's slice of each order, with status changes
//! held in memory on top of the dataset.

use std::collections::HashMap;

use thiserror::Error;

use hotslice_core::catalog::Catalog;
use hotslice_core::orders::{SellerOrder, newest_first, seller_orders};
use hotslice_core::{OrderId, OrderStatus, UserId};

/// Errors from order board operations.
#[derive(Debug, Error)]
pub enum BoardError {
    #[error("order {0} not found")]
    OrderNotFound(OrderId),
}

/// Status overrides for one shop's orders.
#[derive(Debug, Clone, Default)]
pub struct OrderBoard {
    overrides: HashMap<OrderId, OrderStatus>,
}

impl OrderBoard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The shop's orders, newest first, with overridden statuses applied.
    #[must_use]
    pub fn orders(&self, catalog: &Catalog, seller_id: UserId) -> Vec<SellerOrder> {
        let mut orders = seller_orders(catalog, seller_id);
        for order in &mut orders {
            if let Some(status) = self.overrides.get(&order.order_id) {
                order.status = *status;
            }
        }
        orders.sort_by(|a, b| newest_first(a.ordered_at, a.order_id, b.ordered_at, b.order_id));
        orders
    }

    /// Move one of the shop's orders to `status`.
    ///
    /// # Errors
    ///
    /// Returns `BoardError::OrderNotFound` if the shop has no part in the order.
    pub fn set_status(
        &mut self,
        catalog: &Catalog,
        seller_id: UserId,
        order_id: OrderId,
        status: OrderStatus,
    ) -> Result<OrderStatus, BoardError> {
        let linked = catalog
            .order_sellers(order_id)
            .any(|entry| entry.seller_id == seller_id);
        if !linked {
            return Err(BoardError::OrderNotFound(order_id));
        }

        let previous = self.overrides.insert(order_id, status);
        tracing::info!(%order_id, ?previous, status = status.as_str(), "Order status changed");
        Ok(status)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn status_of(board: &OrderBoard, catalog: &Catalog, order_id: OrderId) -> OrderStatus {
        board
            .orders(catalog, UserId::new(1))
            .into_iter()
            .find(|order| order.order_id == order_id)
            .unwrap()
            .status
    }

    #[test]
    fn test_orders_are_newest_first() {
        let catalog = Catalog::demo().unwrap();
        let orders = OrderBoard::new().orders(&catalog, UserId::new(1));
        assert!(!orders.is_empty());
        assert!(orders.windows(2).all(|pair| pair[0].ordered_at >= pair[1].ordered_at));
    }

    #[test]
    fn test_status_change_is_applied() {
        let catalog = Catalog::demo().unwrap();
        let mut board = OrderBoard::new();
        let order_id = board.orders(&catalog, UserId::new(1))[0].order_id;

        board
            .set_status(&catalog, UserId::new(1), order_id, OrderStatus::Delivered)
            .unwrap();
        assert_eq!(status_of(&board, &catalog, order_id), OrderStatus::Delivered);
    }

    #[test]
    fn test_status_change_requires_link() {
        let catalog = Catalog::demo().unwrap();
        let mut board = OrderBoard::new();
        // Order 1004 has no seller links at all.
        assert!(matches!(
            board.set_status(&catalog, UserId::new(1), OrderId::new(1004), OrderStatus::Preparing),
            Err(BoardError::OrderNotFound(_))
        ));
        assert!(
            board
                .set_status(&catalog, UserId::new(1), OrderId::new(42), OrderStatus::Preparing)
                .is_err()
        );
    }
}
