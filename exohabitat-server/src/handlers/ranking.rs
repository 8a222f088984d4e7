//! Ranking and statistics handlers

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use exohabitat_core::Classification;

use crate::{AppResult, AppState};

#[derive(Debug, Deserialize)]
pub struct RankQuery {
    pub top: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct RankedRow {
    pub rank: usize,
    pub planet_name: String,
    /// 0-100 scale
    pub habitability_score: f64,
    pub classification: Classification,
    pub confidence: f64,
}

#[derive(Debug, Serialize)]
pub struct RankResponse {
    pub success: bool,
    pub data: Vec<RankedRow>,
}

/// GET /rank?top=N - planets descending by stored score, ties in
/// insertion order.
pub async fn rank(
    State(state): State<AppState>,
    Query(query): Query<RankQuery>,
) -> AppResult<Json<RankResponse>> {
    let top = query.top.unwrap_or(20);
    let data = state
        .planets
        .rank(top)
        .into_iter()
        .map(|p| RankedRow {
            rank: p.rank,
            planet_name: p.name,
            habitability_score: (p.score * 10_000.0).round() / 100.0,
            classification: p.classification,
            confidence: p.confidence,
        })
        .collect();

    Ok(Json(RankResponse {
        success: true,
        data,
    }))
}

#[derive(Debug, Serialize)]
pub struct DistributionResponse {
    pub highly_habitable: usize,
    pub moderately_habitable: usize,
    pub low_habitability: usize,
}

#[derive(Debug, Serialize)]
pub struct StatisticsResponse {
    pub success: bool,
    pub total_planets: usize,
    /// Mean score on the 0-100 scale
    pub average_habitability: f64,
    pub habitability_distribution: DistributionResponse,
}

/// GET /statistics - totals plus the band distribution. Band counts sum
/// exactly to total_planets.
pub async fn statistics(State(state): State<AppState>) -> AppResult<Json<StatisticsResponse>> {
    let stats = state.planets.statistics();
    Ok(Json(StatisticsResponse {
        success: true,
        total_planets: stats.total,
        average_habitability: (stats.average_score * 10_000.0).round() / 100.0,
        habitability_distribution: DistributionResponse {
            highly_habitable: stats.distribution.highly_habitable,
            moderately_habitable: stats.distribution.moderately_habitable,
            low_habitability: stats.distribution.low_habitability,
        },
    }))
}
