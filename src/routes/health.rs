//! Health check endpoint

use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

pub const SERVICE_NAME: &str = "voicelegal-backend";

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    /// Unix time in seconds
    pub timestamp: f64,
}

pub async fn health_check() -> Json<HealthResponse> {
    let timestamp = chrono::Utc::now().timestamp_millis() as f64 / 1000.0;

    Json(HealthResponse {
        status: "healthy",
        service: SERVICE_NAME,
        timestamp,
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
