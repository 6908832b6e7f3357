//! Analytics report command.

use std::fmt::Write as _;

use hotslice_core::Price;
use hotslice_core::catalog::Catalog;
use hotslice_seller::analytics::{Ranking, Report};

/// The report as pretty JSON.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn json(catalog: &Catalog) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&Report::compute(catalog))
}

/// The report as aligned text.
#[must_use]
pub fn text(catalog: &Catalog) -> String {
    let report = Report::compute(catalog);
    let mut out = String::new();

    ranking(&mut out, "Top products (units sold)", &report.top_products, |v| v.to_string());
    ranking(&mut out, "Top categories (revenue)", &report.top_categories, peso);
    ranking(&mut out, "Top customers (spent)", &report.top_customers, peso);

    let _ = writeln!(out, "Frequent combos");
    for combo in &report.combos {
        let _ = writeln!(out, "  {:>3}x  {} & {}", combo.count, combo.first, combo.second);
    }

    let _ = write!(out, "\nRecent orders");
    for order in &report.recent_orders {
        let date = order
            .ordered_at
            .map(|at| at.format("%Y-%m-%d").to_string())
            .unwrap_or_default();
        let _ = write!(
            out,
            "\n  #{} {date}  {:<20} {:<24} {:>3} units  {}",
            order.order_id,
            order.customer_name,
            order.product_name,
            order.units,
            order.total
        );
    }
    out
}

fn peso(amount: &rust_decimal::Decimal) -> String {
    Price::from_amount(*amount).display()
}

fn ranking(
    out: &mut String,
    title: &str,
    ranking: &Ranking,
    format: impl Fn(&rust_decimal::Decimal) -> String,
) {
    let _ = writeln!(out, "{title}");
    for (rank, entry) in ranking.entries.iter().enumerate() {
        let _ = writeln!(out, "  {}. {:<28} {}", rank + 1, entry.label, format(&entry.value));
    }
    let _ = writeln!(out, "     {:<28} {}\n", "Total", format(&ranking.total));
}
