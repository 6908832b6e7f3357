//! Session-related types.
//!
//! The session holds who is browsing, their cart and a one-shot notice for
//! the next rendered page.

use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use hotslice_core::UserId;
use hotslice_core::cart::CartStore;
use hotslice_core::catalog::Catalog;

/// Session-stored shopper identity.
///
/// Sign-in is simulated: any username is accepted, and it is matched against
/// the dataset only to personalise the order history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentShopper {
    pub username: String,
    /// Dataset buyer with the same username, if any.
    pub buyer_id: Option<UserId>,
}

impl CurrentShopper {
    /// Build a shopper, linking it to a dataset buyer when the username matches.
    #[must_use]
    pub fn sign_in(catalog: &Catalog, username: &str) -> Self {
        let buyer_id = catalog
            .dataset()
            .users
            .iter()
            .find(|user| !user.is_seller() && user.username.eq_ignore_ascii_case(username))
            .map(|user| user.user_id);

        Self {
            username: username.to_string(),
            buyer_id,
        }
    }
}

/// Kind of one-shot notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlashKind {
    Success,
    Error,
}

/// A notice shown once on the next rendered page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub kind: FlashKind,
    pub message: String,
}

impl Flash {
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Success,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Error,
            message: message.into(),
        }
    }

    /// CSS modifier for the notice banner.
    #[must_use]
    pub const fn css_class(&self) -> &'static str {
        match self.kind {
            FlashKind::Success => "notice notice--success",
            FlashKind::Error => "notice notice--error",
        }
    }

    /// Queue a notice for the next page.
    ///
    /// # Errors
    ///
    /// Returns the session store error if the write fails.
    pub async fn push(self, session: &Session) -> Result<(), tower_sessions::session::Error> {
        session.insert(keys::FLASH, self).await
    }

    /// Take the queued notice, if any.
    ///
    /// # Errors
    ///
    /// Returns the session store error if the read fails.
    pub async fn take(session: &Session) -> Result<Option<Self>, tower_sessions::session::Error> {
        session.remove(keys::FLASH).await
    }
}

/// Load the visitor's cart, seeding it from the demo cart on first use.
///
/// # Errors
///
/// Returns the session store error if the read fails.
pub async fn load_cart(
    session: &Session,
    catalog: &Catalog,
) -> Result<CartStore, tower_sessions::session::Error> {
    Ok(session
        .get::<CartStore>(keys::CART)
        .await?
        .unwrap_or_else(|| CartStore::seeded(catalog)))
}

/// Write the visitor's cart back.
///
/// # Errors
///
/// Returns the session store error if the write fails.
pub async fn save_cart(
    session: &Session,
    cart: &CartStore,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(keys::CART, cart).await
}

/// Read the signed-in shopper.
///
/// # Errors
///
/// Returns the session store error if the read fails.
pub async fn current_shopper(
    session: &Session,
) -> Result<Option<CurrentShopper>, tower_sessions::session::Error> {
    session.get(keys::SHOPPER).await
}

/// Session keys.
pub mod keys {
    /// Key for the visitor's cart lines.
    pub const CART: &str = "cart";

    /// Key for the signed-in shopper.
    pub const SHOPPER: &str = "shopper";

    /// Key for the one-shot notice.
    pub const FLASH: &str = "flash";
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_in_links_dataset_buyer() {
        let catalog = Catalog::demo().unwrap();

        let shopper = CurrentShopper::sign_in(&catalog, "JuanDC");
        assert_eq!(shopper.buyer_id, Some(UserId::new(5)));
        assert_eq!(shopper.username, "JuanDC");

        // Sellers and strangers are not linked.
        assert_eq!(CurrentShopper::sign_in(&catalog, "mamalu").buyer_id, None);
        assert_eq!(CurrentShopper::sign_in(&catalog, "guest").buyer_id, None);
    }

    #[test]
    fn test_flash_classes() {
        assert_eq!(Flash::success("ok").css_class(), "notice notice--success");
        assert_eq!(Flash::error("no").kind, FlashKind::Error);
    }
}
