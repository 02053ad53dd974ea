//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - REST API routes (upload, report creation, report sharing, catalog)
//! - Shared application state
//! - Static hosting for the closing-checklist form

pub mod routes;

use std::sync::Arc;

use axum::Router;
use closeout_core::store::{StoreClient, TokenProvider};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Application state shared across handlers.
///
/// There is no shared mutable state: handlers fetch their own bearer token
/// per request and run a strictly sequential chain of store calls.
#[derive(Clone)]
pub struct AppState {
    /// Storage provider client.
    pub store: Arc<StoreClient>,
    /// OAuth2 token provider.
    pub tokens: Arc<TokenProvider>,
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes())
        .fallback_service(ServeDir::new("static"))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
