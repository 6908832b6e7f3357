//! Order history handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use tower_sessions::Session;
use tracing::instrument;

use hotslice_core::orders::{BuyerOrder, OrderLine, OrderShop, UNDATED, buyer_order_history};
use hotslice_core::{Placeholder, resolve_image};

use crate::error::Result;
use crate::models::session::current_shopper;
use crate::routes::PageChrome;
use crate::state::AppState;

/// An order line as shown in the history.
#[derive(Debug, Clone)]
pub struct HistoryLine {
    pub name: String,
    pub image: String,
    pub quantity: u32,
    pub price_each: String,
    pub line_total: String,
}

impl From<&OrderLine> for HistoryLine {
    fn from(line: &OrderLine) -> Self {
        Self {
            name: line.product_name.clone(),
            image: resolve_image(line.image.as_ref(), Placeholder::Thumbnail),
            quantity: line.quantity,
            price_each: line.price_each.display(),
            line_total: line.line_total().display(),
        }
    }
}

/// One shop card inside an order.
#[derive(Debug, Clone)]
pub struct HistoryShop {
    pub seller_name: String,
    pub status: String,
    pub status_class: &'static str,
    pub total: String,
    pub lines: Vec<HistoryLine>,
}

impl From<&OrderShop> for HistoryShop {
    fn from(shop: &OrderShop) -> Self {
        Self {
            seller_name: shop.seller_name.clone(),
            status: shop.status.label().to_string(),
            status_class: shop.status.as_str(),
            total: shop.total().display(),
            lines: shop.items.iter().map(HistoryLine::from).collect(),
        }
    }
}

/// One order in the history.
#[derive(Debug, Clone)]
pub struct HistoryOrder {
    pub order_id: i64,
    pub date: String,
    pub status: String,
    pub status_class: &'static str,
    pub total: String,
    pub shops: Vec<HistoryShop>,
}

impl From<&BuyerOrder> for HistoryOrder {
    fn from(order: &BuyerOrder) -> Self {
        Self {
            order_id: order.order_id.as_i64(),
            date: order
                .ordered_at
                .map_or_else(|| UNDATED.to_string(), |at| at.format("%b %-d, %Y").to_string()),
            status: order.overall_status.label().to_string(),
            status_class: order.overall_status.as_str(),
            total: order.total().display(),
            shops: order.shops.iter().map(HistoryShop::from).collect(),
        }
    }
}

/// Order history page template.
#[derive(Template, WebTemplate)]
#[template(path = "orders.html")]
pub struct OrdersTemplate {
    pub chrome: PageChrome,
    pub orders: Vec<HistoryOrder>,
}

/// Order history, newest first.
///
/// A shopper signed in as a dataset buyer sees their own orders; everyone
/// else sees the whole demo history.
#[instrument(skip(state, session))]
pub async fn index(State(state): State<AppState>, session: Session) -> Result<Response> {
    let chrome = PageChrome::load(&session, state.catalog()).await?;
    let buyer = current_shopper(&session)
        .await?
        .and_then(|shopper| shopper.buyer_id);

    let orders = buyer_order_history(state.catalog(), buyer)
        .iter()
        .map(HistoryOrder::from)
        .collect();

    Ok(OrdersTemplate { chrome, orders }.into_response())
}
