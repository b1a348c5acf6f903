//! HTTP API surface: router assembly and middleware.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::main_lib::AppState;

mod health;
mod weather;

pub fn app_router(state: Arc<AppState>) -> Router {
    let api = Router::new().merge(health::router()).merge(weather::router());

    Router::new()
        .nest("/api/v1", api)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(60)))
        .with_state(state)
}
