//! Prediction handlers

use std::collections::BTreeMap;

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use exohabitat_core::{Classification, PredictionResult, Probabilities, RawObservation};

use crate::{AppResult, AppState};

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub success: bool,
    pub planet_name: String,
    /// 0-100 scale, two decimals
    pub habitability_score: f64,
    pub classification: Classification,
    pub confidence: f64,
    pub probabilities: Probabilities,
    pub contributing_factors: BTreeMap<String, f64>,
}

impl PredictResponse {
    pub fn from_result(name: &str, result: PredictionResult) -> Self {
        Self {
            success: true,
            planet_name: name.to_string(),
            habitability_score: result.score_percent(),
            classification: result.classification,
            confidence: result.confidence,
            probabilities: result.probabilities,
            contributing_factors: result.contributing_factors,
        }
    }
}

/// POST /predict - score one observation
pub async fn predict(
    State(state): State<AppState>,
    Json(raw): Json<RawObservation>,
) -> AppResult<Json<PredictResponse>> {
    let predictor = state.predictor()?;
    let result = predictor.predict_raw(&raw)?;
    tracing::debug!(
        "prediction for {}: score {:.4}, {}",
        raw.name(),
        result.score,
        result.classification
    );
    Ok(Json(PredictResponse::from_result(raw.name(), result)))
}

#[derive(Debug, Deserialize)]
pub struct BatchRequest {
    pub records: Vec<RawObservation>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum BatchRow {
    Ok {
        success: bool,
        index: usize,
        planet_name: String,
        habitability_score: f64,
        classification: Classification,
        confidence: f64,
    },
    Failed {
        success: bool,
        index: usize,
        error: String,
    },
}

#[derive(Debug, Serialize)]
pub struct BatchResponse {
    pub success: bool,
    pub processed: usize,
    pub skipped: usize,
    pub results: Vec<BatchRow>,
}

/// POST /predict_batch - per-row outcomes, input order preserved. A bad
/// row becomes a typed failure entry; it never fails the batch.
pub async fn predict_batch(
    State(state): State<AppState>,
    Json(request): Json<BatchRequest>,
) -> AppResult<Json<BatchResponse>> {
    let predictor = state.predictor()?;
    let outcomes = predictor.predict_batch_raw(&request.records);

    let mut processed = 0;
    let mut skipped = 0;
    let results: Vec<BatchRow> = outcomes
        .into_iter()
        .enumerate()
        .map(|(index, outcome)| match outcome {
            Ok(result) => {
                processed += 1;
                BatchRow::Ok {
                    success: true,
                    index,
                    planet_name: request.records[index].name().to_string(),
                    habitability_score: result.score_percent(),
                    classification: result.classification,
                    confidence: result.confidence,
                }
            }
            Err(e) => {
                skipped += 1;
                BatchRow::Failed {
                    success: false,
                    index,
                    error: e.to_string(),
                }
            }
        })
        .collect();

    Ok(Json(BatchResponse {
        success: true,
        processed,
        skipped,
        results,
    }))
}
