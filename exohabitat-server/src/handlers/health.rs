//! Health check handler

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    model_loaded: bool,
    artifact_version: Option<String>,
    total_planets: usize,
    timestamp: i64,
}

pub async fn check(State(state): State<AppState>) -> Json<HealthResponse> {
    let artifact = state.artifacts.active();
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        model_loaded: artifact.is_some(),
        artifact_version: artifact.map(|a| a.version().to_string()),
        total_planets: state.planets.len(),
        timestamp: chrono::Utc::now().timestamp(),
    })
}
