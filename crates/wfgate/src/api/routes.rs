//! API route definitions.

use axum::http::{header, HeaderValue, Method};
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;

use super::handlers;
use super::state::AppState;
use crate::auth::auth_middleware;

/// Create the application router.
///
/// The trigger and identity endpoints sit behind the auth gate; the login,
/// exec, and health endpoints are public. The two dispatch endpoints share
/// their handler shape and differ only in which group they are routed in.
pub fn create_router(state: AppState, allowed_origins: &[String]) -> Router {
    let cors = build_cors_layer(allowed_origins);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_request(DefaultOnRequest::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    let auth_state = state.auth.clone();

    // Protected routes (require a valid bearer token)
    let protected_routes = Router::new()
        .route("/users/me/", get(handlers::me))
        .route("/trigger", post(handlers::trigger))
        .layer(middleware::from_fn_with_state(auth_state, auth_middleware));

    // Public routes
    let public_routes = Router::new()
        .route("/token", post(handlers::login))
        .route("/exec", post(handlers::exec))
        .route("/health", get(handlers::health));

    Router::new()
        .merge(protected_routes)
        .merge(public_routes)
        .layer(cors)
        .layer(trace_layer)
        .with_state(state)
}

/// Build the CORS layer from the configured origins.
///
/// With no origins configured, cross-origin access stays disabled.
fn build_cors_layer(allowed_origins: &[String]) -> CorsLayer {
    if allowed_origins.is_empty() {
        return CorsLayer::new();
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| {
            let parsed = origin.parse::<HeaderValue>().ok();
            if parsed.is_none() {
                tracing::warn!("CORS: invalid origin in config: {}", origin);
            }
            parsed
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT,
        ])
}
