//! arriba-api - Browser-facing REST API for the Instant On portal
//!
//! Exposes the aggregation service over HTTP. Every route except login,
//! refresh, logout and the metadata endpoints needs an
//! `Authorization: Bearer <token>` header carrying a vendor access token.
//!
//! # Usage
//!
//! ```ignore
//! use std::sync::Arc;
//! use arriba_api::{create_router, AppState};
//! use arriba_client::InstantOnClient;
//!
//! let client = InstantOnClient::new()?;
//! let state = AppState::new(Arc::new(client));
//! let router = create_router(state);
//! ```

pub mod auth;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod state;

pub use auth::{credential_from_header, BearerCredential};
pub use error::ApiError;
pub use extract::{ApiJson, ApiQuery};
pub use state::AppState;

use axum::routing::{get, patch, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Create the portal REST API router with the given application state
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/health", get(handlers::app::health))
        // Auth routes
        .route("/api/auth/login", post(handlers::auth::login))
        .route("/api/auth/refresh", post(handlers::auth::refresh))
        .route("/api/auth/logout", post(handlers::auth::logout))
        .route("/api/auth/me", get(handlers::auth::me))
        // Site routes
        .route("/api/sites", get(handlers::sites::list_sites))
        .route("/api/sites/{site_id}", get(handlers::sites::get_site))
        .route(
            "/api/sites/{site_id}/devices",
            get(handlers::sites::list_devices),
        )
        .route(
            "/api/sites/{site_id}/devices/{device_id}",
            get(handlers::sites::get_device),
        )
        // Radio routes
        .route(
            "/api/sites/{site_id}/devices/{device_id}/radios",
            get(handlers::radios::list_radios),
        )
        .route(
            "/api/sites/{site_id}/devices/{device_id}/radios/{radio_id}",
            patch(handlers::radios::update_radio),
        )
        .route(
            "/api/sites/{site_id}/devices/{device_id}/radios/{radio_id}/toggle",
            post(handlers::radios::toggle_radio),
        )
        // App metadata
        .route("/api/app/version", get(handlers::app::version))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
