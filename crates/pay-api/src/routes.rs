//! # Routes
//!
//! Axum router configuration for the charge relay.

use crate::handlers;
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    routing::{on, MethodFilter},
    Router,
};
use tower_http::trace::TraceLayer;

/// Create the main application router
///
/// Routes:
/// - GET /health - Health check
/// - any other request, on any path - method dispatch:
///   - POST    - validate and forward a charge
///   - OPTIONS - CORS preflight
///   - other   - `{"error":"Unsupported request method: ..."}`
///
/// Bodies over `MAX_BODY_BYTES` are answered with an `{"error": ...}` envelope.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check, GET only (not HEAD); other methods still reach the dispatcher
        .route(
            "/health",
            on(MethodFilter::GET, handlers::health).fallback(handlers::dispatch),
        )
        // Everything else is dispatched by method, regardless of path
        .fallback(handlers::dispatch)
        // Middleware
        .layer(DefaultBodyLimit::max(handlers::MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        // State
        .with_state(state)
}
