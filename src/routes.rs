//! Router Construction
//! Mission: Wire public, auth, and protected routes into one application

use crate::auth::{api, require_auth, AuthState};
use crate::middleware::request_logging;
use axum::{
    middleware,
    routing::{get, post, put},
    Json, Router,
};
use serde::Serialize;
use tower_http::cors::CorsLayer;

/// Create the application router.
pub fn create_router(state: AuthState) -> Router {
    // Registration and token issuance require no bearer token.
    let auth_routes = Router::new()
        .route("/user/register", post(api::register))
        .route("/user/jwt", post(api::issue_token))
        .with_state(state.clone());

    // Everything here runs behind the authorization middleware, which
    // resolves the current user before the handler sees the request.
    let protected_routes = Router::new()
        .route(
            "/user/favorite_cake",
            get(api::get_cake).put(api::update_cake),
        )
        .route("/user/email", put(api::update_email))
        .route("/user/password", put(api::update_password))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth))
        .with_state(state);

    let public_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .merge(public_routes)
        .merge(auth_routes)
        .merge(protected_routes)
        .layer(middleware::from_fn(request_logging))
        .layer(CorsLayer::permissive())
}

/// Health check endpoint
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}
