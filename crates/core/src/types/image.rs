//! Image references from the dataset and their resolution to URLs.

use serde::{Deserialize, Serialize};

/// Path under which bundled dataset images are served.
pub const ASSET_PREFIX: &str = "/static/assets";

/// Placeholder shown when an entity has no image, sized per usage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    /// Large carousel slide.
    Food,
    /// Cart line thumbnail.
    Item,
    /// Seller inventory card.
    Product,
    /// Seller logo on the seller list.
    Seller,
    /// Order history thumbnail.
    Thumbnail,
}

impl Placeholder {
    /// Placeholder image URL.
    #[must_use]
    pub const fn url(self) -> &'static str {
        match self {
            Self::Food => "https://via.placeholder.com/600x400?text=Food",
            Self::Item => "https://via.placeholder.com/120x120?text=Item",
            Self::Product => "https://via.placeholder.com/160x160?text=Product",
            Self::Seller => "https://via.placeholder.com/200x200?text=Seller",
            Self::Thumbnail => "https://via.placeholder.com/64x64?text=Food",
        }
    }
}

/// An image file name or absolute URL as stored in the dataset.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageRef(String);

impl ImageRef {
    /// Wrap a raw dataset value.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The raw dataset value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Resolve to a URL: absolute URLs pass through, bare file names are
    /// served from [`ASSET_PREFIX`].
    #[must_use]
    pub fn url(&self) -> String {
        let value = self.0.trim();
        if value.starts_with("http://") || value.starts_with("https://") {
            value.to_string()
        } else {
            format!("{ASSET_PREFIX}/{}", value.trim_start_matches('/'))
        }
    }
}

/// Resolve an optional image, falling back to `placeholder` when absent or blank.
#[must_use]
pub fn resolve_image(image: Option<&ImageRef>, placeholder: Placeholder) -> String {
    match image {
        Some(image) if !image.as_str().trim().is_empty() => image.url(),
        _ => placeholder.url().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_file_served_from_assets() {
        let image = ImageRef::new("margherita.png");
        assert_eq!(image.url(), "/static/assets/margherita.png");

        let image = ImageRef::new("/margherita.png");
        assert_eq!(image.url(), "/static/assets/margherita.png");
    }

    #[test]
    fn test_absolute_url_passes_through() {
        let image = ImageRef::new("https://cdn.example.com/a.png");
        assert_eq!(image.url(), "https://cdn.example.com/a.png");
    }

    #[test]
    fn test_missing_image_uses_placeholder() {
        assert_eq!(
            resolve_image(None, Placeholder::Seller),
            Placeholder::Seller.url()
        );
        let blank = ImageRef::new("  ");
        assert_eq!(
            resolve_image(Some(&blank), Placeholder::Item),
            Placeholder::Item.url()
        );
    }
}
