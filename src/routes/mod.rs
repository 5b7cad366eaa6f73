pub mod dashboard;
pub mod snapshot;

use axum::{routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use crate::state::AppState;

pub fn create_router() -> Router<AppState> {
    Router::new()
        .merge(dashboard::routes())
        .merge(snapshot::routes())
}

/// Full application: resource routes plus banner, health check and middleware.
pub fn build_app(state: AppState) -> Router {
    create_router()
        .route("/", get(|| async { "KPI Dashboard API" }))
        .route("/health", get(health_check))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
