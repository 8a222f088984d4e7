//! Model metadata handlers (read-only, no side effects)

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;

use exohabitat_core::features::feature_label;
use exohabitat_core::model::EvalMetrics;

use crate::error::AppError;
use crate::{AppResult, AppState};

#[derive(Debug, Serialize)]
pub struct ModelInfoResponse {
    pub success: bool,
    pub model_type: String,
    pub artifact_version: String,
    pub trained_at: DateTime<Utc>,
    pub metrics: EvalMetrics,
    pub feature_count: usize,
    pub features: Vec<String>,
}

/// GET /model-info - the active artifact's metadata and feature list.
pub async fn model_info(State(state): State<AppState>) -> AppResult<Json<ModelInfoResponse>> {
    let artifact = state.artifacts.active().ok_or(AppError::ModelNotLoaded)?;
    Ok(Json(ModelInfoResponse {
        success: true,
        model_type: artifact.model.family.as_str().to_string(),
        artifact_version: artifact.version().to_string(),
        trained_at: artifact.model.trained_at,
        metrics: artifact.model.metrics,
        feature_count: artifact.feature_names.len(),
        features: artifact.feature_names.clone(),
    }))
}

#[derive(Debug, Serialize)]
pub struct ImportanceRow {
    pub feature: String,
    pub feature_label: &'static str,
    pub importance: f64,
}

#[derive(Debug, Serialize)]
pub struct ImportanceResponse {
    pub success: bool,
    pub data: Vec<ImportanceRow>,
}

/// GET /feature-importance - per-feature weights of the active model,
/// sorted descending for display.
pub async fn feature_importance(
    State(state): State<AppState>,
) -> AppResult<Json<ImportanceResponse>> {
    let artifact = state.artifacts.active().ok_or(AppError::ModelNotLoaded)?;

    let mut data: Vec<ImportanceRow> = artifact
        .feature_names
        .iter()
        .zip(artifact.model.feature_importances())
        .map(|(name, importance)| ImportanceRow {
            feature: name.clone(),
            feature_label: feature_label(name),
            importance,
        })
        .collect();
    data.sort_by(|a, b| b.importance.total_cmp(&a.importance));

    Ok(Json(ImportanceResponse {
        success: true,
        data,
    }))
}
