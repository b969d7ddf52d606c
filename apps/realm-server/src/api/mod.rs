//! REST surface of the realm server.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::{Extension, Router};
use realm_gateway_sdk::RealmGatewayClient;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;

pub mod dto;
pub mod handlers;
pub mod problem;

/// Build the router with all routes and middleware.
#[must_use]
pub fn router(gateway: Arc<dyn RealmGatewayClient>, cfg: &ServerConfig) -> Router {
    Router::new()
        .route("/v1/login", post(handlers::login))
        .route("/v1/realm", get(handlers::realm_info))
        .route("/health", get(handlers::health))
        .layer(Extension(gateway))
        .layer(RequestBodyLimitLayer::new(cfg.body_limit_bytes))
        .layer(TraceLayer::new_for_http())
}
