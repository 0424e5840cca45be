pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod models;
pub mod rate_limit;
pub mod state;

use std::sync::Arc;

use axum::{
    Router,
    http::{HeaderValue, header},
    middleware,
    routing::get,
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    set_header::SetResponseHeaderLayer,
};

use crate::config::Config;
use crate::models::Role;
use crate::state::AppState;

const ADMIN_ONLY: &[Role] = &[Role::Admin];

/// Assembles the full router. Request flow on API paths: security headers →
/// CORS → rate-limit gate → auth (protected routes) → role gate (admin
/// routes) → handler. Non-API paths fall back to the SPA entry point.
pub fn app(state: Arc<AppState>) -> Router {
    let admin = Router::new()
        .route("/admin/users", get(handlers::admin_users))
        .layer(middleware::from_fn(
            |req: axum::extract::Request, next: middleware::Next| {
                auth::require_role(ADMIN_ONLY, req, next)
            },
        ));

    let protected = Router::new()
        .route("/profile", get(handlers::profile))
        .route(
            "/projects",
            get(handlers::list_projects).post(handlers::create_project),
        )
        .merge(admin)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::authenticate,
        ));

    let api = Router::new()
        .route("/health", get(handlers::api_health))
        .route("/status", get(handlers::status))
        .merge(protected)
        .fallback(handlers::api_not_found)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit::gate,
        ))
        .layer(cors_layer(&state.config));

    // unmatched non-API routes serve the SPA so client routing can take over
    let spa = ServeDir::new(&state.config.static_dir)
        .not_found_service(ServeFile::new(state.config.static_dir.join("index.html")));

    Router::new()
        .route("/health", get(handlers::health))
        .route("/metrics", get(metrics::metrics_handler))
        .nest("/api", api)
        .fallback_service(spa)
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(middleware::from_fn(metrics::track_requests))
        .with_state(state)
}

fn cors_layer(config: &Config) -> CorsLayer {
    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if config.cors_origin == "*" {
        return cors.allow_origin(Any);
    }

    match config.cors_origin.parse::<HeaderValue>() {
        Ok(origin) => cors.allow_origin(origin),
        Err(_) => {
            tracing::warn!(origin = %config.cors_origin, "invalid CORS_ORIGIN, allowing any origin");
            cors.allow_origin(Any)
        }
    }
}
