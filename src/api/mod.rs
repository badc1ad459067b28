//! API layer - HTTP handlers and routing
//!
//! This module contains all HTTP API endpoints for newsdesk:
//! - Auth API endpoints
//! - News API endpoints
//! - Category API endpoints
//! - Dashboard API endpoint

pub mod auth;
pub mod categories;
pub mod dashboard;
pub mod middleware;
pub mod news;

use axum::{
    http::{header, HeaderValue, Method},
    middleware as axum_middleware,
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub use middleware::{ApiError, AppState};

/// Build the API router (mounted under `/api`)
pub fn build_api_router(state: AppState) -> Router<AppState> {
    // Protected routes (need a valid token)
    let protected_routes = Router::new()
        .nest("/auth", auth::protected_router())
        .nest("/news", news::protected_router())
        .nest("/categories", categories::protected_router())
        .nest("/dashboard", dashboard::router())
        .route_layer(axum_middleware::from_fn_with_state(
            state,
            middleware::require_auth,
        ));

    // Public routes
    Router::new()
        .nest("/auth", auth::public_router())
        .nest("/news", news::public_router())
        .nest("/categories", categories::public_router())
        .merge(protected_routes)
}

/// Build the complete router with middleware
pub fn build_router(state: AppState, cors_origin: &str) -> Router {
    let mut cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::COOKIE])
        .allow_credentials(true);
    match cors_origin.parse::<HeaderValue>() {
        Ok(origin) => cors = cors.allow_origin(origin),
        Err(_) => tracing::warn!(
            "Invalid CORS origin {:?}, cross-origin requests disabled",
            cors_origin
        ),
    }

    Router::new()
        .nest("/api", build_api_router(state.clone()))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}
