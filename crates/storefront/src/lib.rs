//! Hotslice Storefront library.
//!
//! The buyer-facing site as a library, so the router can be exercised
//! without binding a socket.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod browse;
pub mod config;
pub mod error;
pub mod forms;
pub mod middleware;
pub mod models;
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

/// Build the storefront router with its middleware stack.
///
/// Sentry layers are added by the binary so tests stay free of a client.
pub fn app(state: AppState) -> Router {
    let session_layer = middleware::create_session_layer(state.config());
    let static_dir =
        ServeDir::new(&state.config().static_dir).fallback(missing_static_file.into_service());

    Router::new()
        .route("/health", get(health))
        .merge(routes::routes())
        .nest_service("/static", static_dir)
        .layer(session_layer)
        .layer(from_fn(middleware::security_headers_middleware))
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

/// Dataset images that were not bundled fall back to the placeholder.
async fn missing_static_file(uri: Uri) -> Response {
    if uri.path().starts_with("/assets/") {
        Redirect::temporary(Placeholder::Food.url()).into_response()
    } else {
        StatusCode::NOT_FOUND.into_response()
    }
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}
