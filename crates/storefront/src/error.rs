//! Storefront errors and Sentry helpers.
//!
//! Handlers return [`Result`]; server-side failures are captured to Sentry
//! and answered with a generic message.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use hotslice_core::UserId;

/// Errors a storefront handler can fail with.
#[derive(Debug, Error)]
pub enum AppError {
    /// Cart, flash or shopper could not be read from or written to the session.
    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    /// `/sellers/{id}` named a user who does not run a shop.
    #[error("No shop for seller {0}")]
    SellerNotFound(UserId),
}

impl AppError {
    const fn status(&self) -> StatusCode {
        match self {
            Self::Session(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::SellerNotFound(_) => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(error = %self, sentry_event_id = %event_id, "Storefront request error");
            return (status, "Internal server error").into_response();
        }

        (status, self.to_string()).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Record a shopper action for later Sentry reports.
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    for (key, value) in data.unwrap_or_default() {
        breadcrumb
            .data
            .insert((*key).to_string(), serde_json::Value::from(*value));
    }

    sentry::add_breadcrumb(breadcrumb);
}

/// Tag Sentry events with the signed-in shopper.
pub fn set_sentry_user(username: &str) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            username: Some(username.to_string()),
            ..Default::default()
        }));
    });
}

/// Stop associating Sentry events with a shopper.
pub fn clear_sentry_user() {
    sentry::configure_scope(|scope| scope.set_user(None));
}
