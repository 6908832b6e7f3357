//! Marketplace sales analytics computed from the dataset's orders.
//!
//! Cancelled orders are left out of every figure. Order items whose product
//! is missing are skipped; items without a recorded price count at the
//! product's current price.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use hotslice_core::catalog::{Catalog, Order, OrderItem, Product, UNKNOWN_CUSTOMER};
use hotslice_core::orders::newest_first;
use hotslice_core::{
    CategoryId, OrderId, OrderStatus, Placeholder, Price, ProductId, UserId, resolve_image,
};

use crate::inventory::UNCATEGORIZED;

/// Entries kept per ranking.
pub const TOP_N: usize = 4;

/// Orders listed under "Recent Orders".
pub const RECENT_ORDERS: usize = 5;

/// Longest combo label line, in characters.
pub const LABEL_WIDTH: usize = 20;

/// Chart colours, reused in order when a chart has more entries.
pub const PALETTE: [&str; 4] = ["#c47b08", "#ffb52e", "#ffd182", "#ffe6a7"];

/// One ranked label and its figure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ranked {
    pub label: String,
    pub value: Decimal,
}

/// The top entries of a ranking and the sum of those entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ranking {
    pub entries: Vec<Ranked>,
    pub total: Decimal,
}

impl Ranking {
    /// Keep the `TOP_N` largest values. The sort is stable, so ties keep
    /// the input order.
    fn top(mut entries: Vec<Ranked>) -> Self {
        entries.sort_by(|a, b| b.value.cmp(&a.value));
        entries.truncate(TOP_N);
        let total = entries.iter().map(|entry| entry.value).sum();
        Self { entries, total }
    }

    #[must_use]
    pub fn chart(&self) -> ChartData {
        ChartData::new(
            self.entries.iter().map(|entry| vec![entry.label.clone()]).collect(),
            self.entries.iter().map(|entry| entry.value).collect(),
        )
    }
}

/// Two products bought in the same order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Combo {
    pub first: String,
    pub second: String,
    /// Orders containing both.
    pub count: u32,
    pub label_lines: Vec<String>,
}

/// A recent order with its lead product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecentOrder {
    pub order_id: OrderId,
    pub ordered_at: Option<DateTime<Utc>>,
    pub customer_name: String,
    pub product_name: String,
    pub image: String,
    pub units: u32,
    pub total: Price,
}

/// A chart dataset. Labels are lists of lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartData {
    pub labels: Vec<Vec<String>>,
    pub values: Vec<Decimal>,
    pub colors: Vec<&'static str>,
}

impl ChartData {
    fn new(labels: Vec<Vec<String>>, values: Vec<Decimal>) -> Self {
        let colors = PALETTE.iter().copied().cycle().take(values.len()).collect();
        Self {
            labels,
            values,
            colors,
        }
    }
}

/// Chart datasets for the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Charts {
    pub products: ChartData,
    pub categories: ChartData,
    pub customers: ChartData,
    pub combos: ChartData,
}

/// Everything on the analytics dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    /// Units sold per product.
    pub top_products: Ranking,
    /// Revenue per category.
    pub top_categories: Ranking,
    /// Amount spent per customer.
    pub top_customers: Ranking,
    pub combos: Vec<Combo>,
    pub recent_orders: Vec<RecentOrder>,
    pub charts: Charts,
}

impl Report {
    #[must_use]
    pub fn compute(catalog: &Catalog) -> Self {
        let top_products = top_products(catalog);
        let top_categories = top_categories(catalog);
        let top_customers = top_customers(catalog);
        let combos = combos(catalog);

        let charts = Charts {
            products: top_products.chart(),
            categories: top_categories.chart(),
            customers: top_customers.chart(),
            combos: ChartData::new(
                combos.iter().map(|combo| combo.label_lines.clone()).collect(),
                combos.iter().map(|combo| Decimal::from(combo.count)).collect(),
            ),
        };

        Self {
            top_products,
            top_categories,
            top_customers,
            combos,
            recent_orders: recent_orders(catalog),
            charts,
        }
    }
}

/// Word-wrap `text` into lines of at most `width` characters. A word longer
/// than `width` gets a line of its own.
#[must_use]
pub fn wrap_label(text: &str, width: usize) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        if line.is_empty() {
            line.push_str(word);
        } else if line.chars().count() + 1 + word.chars().count() <= width {
            line.push(' ');
            line.push_str(word);
        } else {
            lines.push(std::mem::take(&mut line));
            line.push_str(word);
        }
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

fn counted_orders(catalog: &Catalog) -> impl Iterator<Item = &Order> {
    catalog
        .orders()
        .iter()
        .filter(|order| order.status != OrderStatus::Cancelled)
}

/// Counted items with their products.
fn sold_items(catalog: &Catalog) -> impl Iterator<Item = (&Order, &OrderItem, &Product)> {
    counted_orders(catalog).flat_map(move |order| {
        catalog.order_items(order.order_id).filter_map(move |item| {
            catalog
                .product(item.product_id)
                .map(|product| (order, item, product))
        })
    })
}

fn revenue(item: &OrderItem, product: &Product) -> Decimal {
    item.price_each.unwrap_or(product.price) * Decimal::from(item.quantity)
}

fn ranked<K: Ord>(totals: BTreeMap<K, (String, Decimal)>) -> Ranking {
    Ranking::top(
        totals
            .into_values()
            .map(|(label, value)| Ranked { label, value })
            .collect(),
    )
}

fn top_products(catalog: &Catalog) -> Ranking {
    let mut units: BTreeMap<ProductId, (String, Decimal)> = BTreeMap::new();
    for (_, item, product) in sold_items(catalog) {
        units
            .entry(product.product_id)
            .or_insert_with(|| (product.product_name.clone(), Decimal::ZERO))
            .1 += Decimal::from(item.quantity);
    }
    ranked(units)
}

fn top_categories(catalog: &Catalog) -> Ranking {
    let mut totals: BTreeMap<CategoryId, (String, Decimal)> = BTreeMap::new();
    for (_, item, product) in sold_items(catalog) {
        let name = catalog
            .category(product.category_id)
            .map_or_else(|| UNCATEGORIZED.to_string(), |c| c.category_name.clone());
        totals
            .entry(product.category_id)
            .or_insert_with(|| (name, Decimal::ZERO))
            .1 += revenue(item, product);
    }
    ranked(totals)
}

fn top_customers(catalog: &Catalog) -> Ranking {
    let mut spent: BTreeMap<UserId, (String, Decimal)> = BTreeMap::new();
    for (order, item, product) in sold_items(catalog) {
        let name = catalog
            .user(order.buyer_id)
            .map_or_else(|| UNKNOWN_CUSTOMER.to_string(), |u| u.full_name.clone());
        spent
            .entry(order.buyer_id)
            .or_insert_with(|| (name, Decimal::ZERO))
            .1 += revenue(item, product);
    }
    ranked(spent)
}

fn combos(catalog: &Catalog) -> Vec<Combo> {
    let mut pairs: BTreeMap<(ProductId, ProductId), u32> = BTreeMap::new();
    for order in counted_orders(catalog) {
        let mut products: Vec<ProductId> = catalog
            .order_items(order.order_id)
            .map(|item| item.product_id)
            .filter(|id| catalog.product(*id).is_some())
            .collect();
        products.sort_unstable();
        products.dedup();

        for (i, first) in products.iter().enumerate() {
            for second in &products[i + 1..] {
                *pairs.entry((*first, *second)).or_default() += 1;
            }
        }
    }

    let mut ranked: Vec<((ProductId, ProductId), u32)> = pairs.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked
        .into_iter()
        .take(TOP_N)
        .filter_map(|((first, second), count)| {
            let first = catalog.product(first)?.product_name.clone();
            let second = catalog.product(second)?.product_name.clone();
            let label_lines = wrap_label(&format!("{first} & {second}"), LABEL_WIDTH);
            Some(Combo {
                first,
                second,
                count,
                label_lines,
            })
        })
        .collect()
}

fn recent_orders(catalog: &Catalog) -> Vec<RecentOrder> {
    let mut orders: Vec<&Order> = counted_orders(catalog).collect();
    orders.sort_by(|a, b| newest_first(a.ordered_at, a.order_id, b.ordered_at, b.order_id));

    orders
        .into_iter()
        .take(RECENT_ORDERS)
        .map(|order| {
            let lines: Vec<(&OrderItem, &Product)> = catalog
                .order_items(order.order_id)
                .filter_map(|item| catalog.product(item.product_id).map(|p| (item, p)))
                .collect();
            let lead = lines.first().map(|(_, product)| *product);

            RecentOrder {
                order_id: order.order_id,
                ordered_at: order.ordered_at,
                customer_name: catalog
                    .user(order.buyer_id)
                    .map_or_else(|| UNKNOWN_CUSTOMER.to_string(), |u| u.full_name.clone()),
                product_name: lead.map(|p| p.product_name.clone()).unwrap_or_default(),
                image: resolve_image(
                    lead.and_then(|p| p.product_img.as_ref()),
                    Placeholder::Thumbnail,
                ),
                units: lines.iter().map(|(item, _)| item.quantity).sum(),
                total: Price::from_amount(
                    lines.iter().map(|(item, product)| revenue(item, product)).sum(),
                ),
            }
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn dec(value: &str) -> Decimal {
        value.parse().unwrap()
    }

    fn report() -> Report {
        Report::compute(&Catalog::demo().unwrap())
    }

    fn labels(ranking: &Ranking) -> Vec<&str> {
        ranking.entries.iter().map(|entry| entry.label.as_str()).collect()
    }

    #[test]
    fn test_top_products_by_units() {
        let report = report();
        assert_eq!(
            labels(&report.top_products),
            ["Iced Tea Pitcher", "Margherita Pizza", "Leche Flan", "Carbonara Pasta"]
        );
        assert_eq!(report.top_products.total, dec("14"));
    }

    #[test]
    fn test_top_categories_by_revenue() {
        let report = report();
        assert_eq!(
            labels(&report.top_categories),
            ["Pizza", "Drinks", "Pasta", "Desserts"]
        );
        // Order 1004 has no recorded prices and counts at current prices.
        assert_eq!(report.top_categories.entries[0].value, dec("1795.00"));
        assert_eq!(report.top_categories.total, dec("3768.00"));
    }

    #[test]
    fn test_cancelled_orders_are_ignored() {
        let report = report();
        assert_eq!(
            labels(&report.top_customers),
            ["Juan Dela Cruz", "Paolo Reyes", "Maria Santos", "Ana Lim"]
        );
        // Maria's cancelled order 1006 is not counted.
        assert_eq!(report.top_customers.entries[2].value, dec("610.00"));
        assert!(report.recent_orders.iter().all(|o| o.order_id != OrderId::new(1006)));
    }

    #[test]
    fn test_combos_counted_per_order() {
        let report = report();
        assert_eq!(report.combos.len(), TOP_N);
        let top = &report.combos[0];
        assert_eq!(top.first, "Margherita Pizza");
        assert_eq!(top.second, "Iced Tea Pitcher");
        assert_eq!(top.count, 3);
        assert_eq!(top.label_lines, ["Margherita Pizza &", "Iced Tea Pitcher"]);
        assert!(report.combos[1..].iter().all(|combo| combo.count == 1));
    }

    #[test]
    fn test_recent_orders_newest_first() {
        let report = report();
        let ids: Vec<i64> = report.recent_orders.iter().map(|o| o.order_id.as_i64()).collect();
        assert_eq!(ids, [1007, 1005, 1004, 1003, 1002]);

        let latest = &report.recent_orders[0];
        assert_eq!(latest.customer_name, "Paolo Reyes");
        assert_eq!(latest.product_name, "Margherita Pizza");
        assert_eq!(latest.units, 4);
        assert_eq!(latest.total.display(), "₱987.00");
    }

    #[test]
    fn test_chart_colors_cycle() {
        let chart = ChartData::new(vec![Vec::new(); 6], vec![Decimal::ONE; 6]);
        assert_eq!(chart.colors, [PALETTE[0], PALETTE[1], PALETTE[2], PALETTE[3], PALETTE[0], PALETTE[1]]);
        assert_eq!(report().charts.products.values.len(), TOP_N);
    }

    #[test]
    fn test_wrap_label() {
        assert_eq!(wrap_label("Leche Flan & Hot Chocolate", 20), ["Leche Flan & Hot", "Chocolate"]);
        assert_eq!(
            wrap_label("Supercalifragilisticexpialidocious Pie", 20),
            ["Supercalifragilisticexpialidocious", "Pie"]
        );
        assert!(wrap_label("   ", 20).is_empty());
    }
}
