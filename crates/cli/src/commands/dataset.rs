//! Dataset inspection commands.
//!
//! # Usage
//!
//! ```bash
//! hotslice-cli dataset check [--file PATH]
//! hotslice-cli dataset summary [--file PATH]
//! ```

use std::fmt::Write as _;
use std::path::Path;

use hotslice_core::OrderStatus;
use hotslice_core::catalog::{Catalog, CatalogError, IntegrityIssue};
use thiserror::Error;

/// Errors that can occur during dataset commands.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// The dataset file could not be read.
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    /// The dataset is not valid JSON of the expected shape.
    #[error(transparent)]
    Parse(#[from] CatalogError),

    /// Validation found broken references.
    #[error("{}", list_issues(.0))]
    Invalid(Vec<IntegrityIssue>),
}

fn list_issues(issues: &[IntegrityIssue]) -> String {
    let mut out = format!("{} integrity issue(s) found:", issues.len());
    for issue in issues {
        let _ = write!(out, "\n  - {issue}");
    }
    out
}

/// Load the dataset from `path`, or the embedded one.
///
/// # Errors
///
/// Returns `DatasetError` if the file cannot be read or parsed.
pub fn load(path: Option<&Path>) -> Result<Catalog, DatasetError> {
    let Some(path) = path else {
        return Ok(Catalog::demo()?);
    };

    tracing::info!(path = %path.display(), "Loading dataset from file");
    let json = std::fs::read_to_string(path).map_err(|source| DatasetError::Read {
        path: path.display().to_string(),
        source,
    })?;
    Ok(Catalog::from_json(&json)?)
}

/// Validate the dataset.
///
/// # Errors
///
/// Returns `DatasetError::Invalid` listing every issue found.
pub fn check(catalog: &Catalog) -> Result<String, DatasetError> {
    let issues = catalog.validate();
    if issues.is_empty() {
        Ok("Dataset OK: no integrity issues found.".to_string())
    } else {
        Err(DatasetError::Invalid(issues))
    }
}

/// Table counts and orders per status.
#[must_use]
pub fn summary(catalog: &Catalog) -> String {
    let data = catalog.dataset();
    let sellers = data.users.iter().filter(|user| user.is_seller()).count();

    let mut out = String::new();
    let _ = writeln!(
        out,
        "Users:       {} ({} sellers, {} buyers)",
        data.users.len(),
        sellers,
        data.users.len() - sellers
    );
    let _ = writeln!(out, "Categories:  {}", data.categories.len());
    let _ = writeln!(out, "Products:    {}", data.products.len());
    let _ = writeln!(out, "Order items: {}", data.order_items.len());
    let _ = writeln!(out, "Carts:       {}", data.carts.len());
    let _ = write!(out, "Orders:      {}", data.orders.len());
    for status in OrderStatus::ALL {
        let count = data
            .orders
            .iter()
            .filter(|order| order.status == status)
            .count();
        if count > 0 {
            let _ = write!(out, "\n  {:<17}{count}", status.label());
        }
    }
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_dataset_passes_check() {
        let catalog = load(None).unwrap();
        assert!(check(&catalog).unwrap().starts_with("Dataset OK"));
    }

    #[test]
    fn test_broken_dataset_lists_issues() {
        let mut data = load(None).unwrap().dataset().clone();
        data.products[0].category_id = hotslice_core::CategoryId::new(99);
        data.products[1].avail_stocks = -2;

        let err = check(&Catalog::from_dataset(data)).unwrap_err();
        let message = err.to_string();
        assert!(message.starts_with("2 integrity issue(s) found:"));
        assert!(message.contains("unknown category 99"));
        assert!(message.contains("negative stock -2"));
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let err = load(Some(Path::new("/nonexistent/mock_data.json"))).unwrap_err();
        assert!(matches!(err, DatasetError::Read { .. }));
    }

    #[test]
    fn test_summary_counts() {
        let out = summary(&load(None).unwrap());
        assert!(out.contains("Users:       8 (4 sellers, 4 buyers)"));
        assert!(out.contains("Products:    14"));
        assert!(out.contains("Cancelled"));
    }
}
