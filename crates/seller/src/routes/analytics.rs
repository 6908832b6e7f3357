//! Analytics dashboard handlers.

use askama::Template;
use axum::{Json, extract::State, response::Html};
use rust_decimal::Decimal;
use tracing::instrument;

use hotslice_core::Price;

use crate::analytics::{Charts, Combo, PALETTE, Ranking, Report};
use crate::routes::{ShopChrome, render};
use crate::state::AppState;

/// A legend row under a donut or bar chart.
#[derive(Debug, Clone)]
pub struct LegendItem {
    pub label: String,
    pub value: String,
    pub color: &'static str,
}

fn legend(ranking: &Ranking, format: impl Fn(&Decimal) -> String) -> Vec<LegendItem> {
    ranking
        .entries
        .iter()
        .zip(PALETTE.iter().cycle())
        .map(|(entry, &color)| LegendItem {
            label: entry.label.clone(),
            value: format(&entry.value),
            color,
        })
        .collect()
}

fn peso(amount: &Decimal) -> String {
    Price::from_amount(*amount).display()
}

/// A recent order row.
#[derive(Debug, Clone)]
pub struct RecentRow {
    pub order_id: i64,
    pub date: String,
    pub customer_name: String,
    pub product_name: String,
    pub image: String,
    pub units: u32,
    pub total: String,
}

/// Analytics dashboard template.
#[derive(Template)]
#[template(path = "analytics.html")]
pub struct AnalyticsTemplate {
    pub chrome: ShopChrome,
    pub units_sold: String,
    pub products: Vec<LegendItem>,
    pub category_revenue: String,
    pub categories: Vec<LegendItem>,
    pub customers: Vec<LegendItem>,
    pub combos: Vec<Combo>,
    pub recent: Vec<RecentRow>,
    pub charts: Charts,
}

impl AnalyticsTemplate {
    fn build(chrome: ShopChrome, report: Report) -> Self {
        Self {
            chrome,
            units_sold: report.top_products.total.to_string(),
            products: legend(&report.top_products, ToString::to_string),
            category_revenue: peso(&report.top_categories.total),
            categories: legend(&report.top_categories, peso),
            customers: legend(&report.top_customers, peso),
            recent: report
                .recent_orders
                .iter()
                .map(|order| RecentRow {
                    order_id: order.order_id.as_i64(),
                    date: order
                        .ordered_at
                        .map(|at| at.format("%b %-d, %Y").to_string())
                        .unwrap_or_default(),
                    customer_name: order.customer_name.clone(),
                    product_name: order.product_name.clone(),
                    image: order.image.clone(),
                    units: order.units,
                    total: order.total.display(),
                })
                .collect(),
            combos: report.combos,
            charts: report.charts,
        }
    }
}

/// Analytics dashboard.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Html<String> {
    let report = Report::compute(state.catalog());
    render(&AnalyticsTemplate::build(
        ShopChrome::new(&state, "/analytics"),
        report,
    ))
}

/// Dashboard data as JSON.
#[instrument(skip(state))]
pub async fn api(State(state): State<AppState>) -> Json<Report> {
    Json(Report::compute(state.catalog()))
}
