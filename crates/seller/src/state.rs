//! Application state shared across handlers.

use std::sync::Arc;

use tokio::sync::RwLock;

use hotslice_core::catalog::{Catalog, User};

use crate::board::OrderBoard;
use crate::config::SellerConfig;
use crate::inventory::Inventory;

/// Application state shared across all handlers.
///
/// The catalog is read-only; the shop's inventory and order board are
/// mutable and each sit behind their own lock.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: SellerConfig,
    catalog: Catalog,
    inventory: RwLock<Inventory>,
    board: RwLock<OrderBoard>,
}

impl AppState {
    /// Create a new application state, seeding the inventory from the
    /// configured seller's catalog products.
    #[must_use]
    pub fn new(config: SellerConfig, catalog: Catalog) -> Self {
        let inventory = Inventory::from_catalog(&catalog, config.seller_id);
        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                inventory: RwLock::new(inventory),
                board: RwLock::new(OrderBoard::new()),
            }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &SellerConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// The seller this portal acts for, if the dataset has them.
    #[must_use]
    pub fn seller(&self) -> Option<&User> {
        self.inner.catalog.seller(self.inner.config.seller_id)
    }

    #[must_use]
    pub fn inventory(&self) -> &RwLock<Inventory> {
        &self.inner.inventory
    }

    #[must_use]
    pub fn board(&self) -> &RwLock<OrderBoard> {
        &self.inner.board
    }
}
