//! Prediction output types

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::features::Classification;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Probabilities {
    pub habitable: f64,
    pub not_habitable: f64,
}

/// One prediction. Created per call; persisted only when the caller
/// stores it (e.g. adding a planet to the ranking store).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Model probability of the habitable class, 0-1
    pub score: f64,
    pub classification: Classification,
    /// Class-probability margin: max(p, 1 - p)
    pub confidence: f64,
    pub probabilities: Probabilities,
    /// Normalized per-feature importance, keyed by feature name
    pub contributing_factors: BTreeMap<String, f64>,
}

impl PredictionResult {
    /// Score on the 0-100 wire scale.
    pub fn score_percent(&self) -> f64 {
        (self.score * 100.0 * 100.0).round() / 100.0
    }
}
