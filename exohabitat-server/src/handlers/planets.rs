//! Planet store handlers

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use exohabitat_core::schema::validate;
use exohabitat_core::RawObservation;

use crate::error::AppError;
use crate::{AppResult, AppState};

use super::predict::PredictResponse;

#[derive(Debug, Serialize)]
pub struct StoredPlanetSummary {
    pub id: Uuid,
    pub name: String,
    pub added_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct AddPlanetResponse {
    pub success: bool,
    pub planet: StoredPlanetSummary,
    pub prediction: PredictResponse,
}

/// POST /add_planet - predict and persist to the ranking store.
/// Requires an explicit planet name; duplicates are rejected with 409.
pub async fn add_planet(
    State(state): State<AppState>,
    Json(raw): Json<RawObservation>,
) -> AppResult<Json<AddPlanetResponse>> {
    let name = raw
        .planet_name
        .as_deref()
        .filter(|n| !n.trim().is_empty())
        .ok_or_else(|| AppError::Validation("missing required field: planet_name".to_string()))?
        .to_string();

    let record = validate(&raw)?;
    let predictor = state.predictor()?;
    let result = predictor.predict(&record)?;

    let stored = state.planets.add(&name, record, result.clone())?;
    tracing::info!("planet added: {} (score {:.4})", stored.name, result.score);

    Ok(Json(AddPlanetResponse {
        success: true,
        planet: StoredPlanetSummary {
            id: stored.id,
            name: stored.name,
            added_at: stored.added_at,
        },
        prediction: PredictResponse::from_result(&name, result),
    }))
}
