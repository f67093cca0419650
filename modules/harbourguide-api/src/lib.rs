//! HTTP surface of the Hong Kong travel assistant.

pub mod chat;
pub mod fallback;
pub mod prompt;
pub mod rest;

use std::sync::Arc;

use axum::{
    http::{header, HeaderValue},
    routing::{get, post},
    Router,
};
use tower_http::set_header::SetResponseHeaderLayer;

use ai_client::CompletionAgent;
use harbourguide_catalog::{Catalog, Gazetteer};

/// Shared, read-only per-process state. Handlers only ever borrow from it.
pub struct AppState {
    pub catalog: Catalog,
    pub gazetteer: Gazetteer,
    /// `None` when no API key is configured; every reply is then the fallback.
    pub assistant: Option<Arc<dyn CompletionAgent>>,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health check
        .route("/", get(rest::health))
        // REST API
        .route("/api/chat", post(rest::api_chat))
        .route("/api/places/near", get(rest::api_places_near))
        .with_state(state)
        // CORS: the browser client is served from another origin
        .layer(
            tower_http::cors::CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods(tower_http::cors::Any)
                .allow_headers(tower_http::cors::Any),
        )
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        // Logging layer: method + path only
        .layer(
            tower_http::trace::TraceLayer::new_for_http().make_span_with(
                |request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        path = %request.uri().path(),
                    )
                },
            ),
        )
}
