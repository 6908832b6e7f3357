//! Hotslice Seller library.
//!
//! The seller portal as a library, so the router can be exercised without
//! binding a socket.
//!
//! The portal acts for one configured seller. Its inventory and order board
//! are in memory; analytics are computed from the dataset on each request.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod analytics;
pub mod board;
pub mod config;
pub mod error;
pub mod inventory;
pub mod middleware;
pub mod routes;
pub mod state;

use axum::{
    Router,
    handler::HandlerWithoutStateExt,
    http::{StatusCode, Uri},
    middleware::from_fn,
    response::{IntoResponse, Redirect, Response},
    routing::get,
};
use hotslice_core::Placeholder;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the seller router with its middleware stack.
pub fn app(state: AppState) -> Router {
    let static_dir =
        ServeDir::new(&state.config().static_dir).fallback(missing_static_file.into_service());

    Router::new()
        .route("/health", get(health))
        .merge(routes::routes())
        .nest_service("/static", static_dir)
        .layer(from_fn(middleware::request_id_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::extract::Request| {
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = tracing::field::Empty,
                )
            }),
        )
        .with_state(state)
}

/// Product photos that were not bundled fall back to the placeholder.
async fn missing_static_file(uri: Uri) -> Response {
    if uri.path().starts_with("/assets/") {
        Redirect::temporary(Placeholder::Product.url()).into_response()
    } else {
        StatusCode::NOT_FOUND.into_response()
    }
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}
