//! Shop order board handlers.

use askama::Template;
use axum::{
    Form,
    extract::{Path, State},
    response::{Html, Redirect},
};
use serde::Deserialize;
use tracing::instrument;

use hotslice_core::orders::{SellerOrder, UNDATED};
use hotslice_core::{OrderId, OrderStatus, Placeholder, resolve_image};

use crate::error::Result;
use crate::routes::{ShopChrome, render};
use crate::state::AppState;

/// A status option in the per-order dropdown.
#[derive(Debug, Clone)]
pub struct StatusOption {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

/// One order line on the board.
#[derive(Debug, Clone)]
pub struct BoardLine {
    pub name: String,
    pub image: String,
    pub quantity: u32,
    pub line_total: String,
}

/// One order card on the board.
#[derive(Debug, Clone)]
pub struct BoardOrder {
    pub order_id: i64,
    pub date: String,
    pub customer_name: String,
    pub status: &'static str,
    pub status_class: &'static str,
    pub total: String,
    pub lines: Vec<BoardLine>,
    pub options: Vec<StatusOption>,
}

impl From<&SellerOrder> for BoardOrder {
    fn from(order: &SellerOrder) -> Self {
        Self {
            order_id: order.order_id.as_i64(),
            date: order.ordered_at.map_or_else(
                || UNDATED.to_string(),
                |at| at.format("%b %-d, %Y %H:%M").to_string(),
            ),
            customer_name: order.customer_name.clone(),
            status: order.status.label(),
            status_class: order.status.as_str(),
            total: order.total().display(),
            lines: order
                .items
                .iter()
                .map(|line| BoardLine {
                    name: line.product_name.clone(),
                    image: resolve_image(line.image.as_ref(), Placeholder::Thumbnail),
                    quantity: line.quantity,
                    line_total: line.line_total().display(),
                })
                .collect(),
            options: OrderStatus::ALL
                .into_iter()
                .map(|status| StatusOption {
                    value: status.as_str(),
                    label: status.label(),
                    selected: status == order.status,
                })
                .collect(),
        }
    }
}

/// Shop orders page template.
#[derive(Template)]
#[template(path = "orders.html")]
pub struct OrdersTemplate {
    pub chrome: ShopChrome,
    pub orders: Vec<BoardOrder>,
}

/// Status change form data.
#[derive(Debug, Deserialize)]
pub struct StatusForm {
    pub status: OrderStatus,
}

/// The shop's orders, newest first.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Html<String> {
    let orders = state
        .board()
        .read()
        .await
        .orders(state.catalog(), state.config().seller_id)
        .iter()
        .map(BoardOrder::from)
        .collect();

    render(&OrdersTemplate {
        chrome: ShopChrome::new(&state, "/orders"),
        orders,
    })
}

/// Move an order to a new status.
#[instrument(skip(state))]
pub async fn set_status(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Form(form): Form<StatusForm>,
) -> Result<Redirect> {
    state.board().write().await.set_status(
        state.catalog(),
        state.config().seller_id,
        OrderId::new(id),
        form.status,
    )?;

    Ok(Redirect::to("/orders"))
}
