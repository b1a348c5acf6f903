use std::sync::Arc;

use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::main_lib::AppState;

#[derive(Serialize)]
struct HealthResponse {
    message: &'static str,
}

/// Liveness probe.
async fn get_health() -> Json<HealthResponse> {
    Json(HealthResponse { message: "OK" })
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(get_health))
}
