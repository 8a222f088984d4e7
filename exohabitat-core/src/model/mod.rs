//! Model Trainer & Selector
//!
//! The fixed classifier roster, the fitted-parameter representation that
//! persists in artifacts, and the deterministic selection rule.

pub mod boosting;
pub mod forest;
pub mod logistic;
pub mod metrics;
pub mod trainer;
pub mod tree;


use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use boosting::{BoostingParams, GradientBoosting};
pub use forest::{ForestParams, RandomForest};
pub use logistic::{LogisticParams, LogisticRegression};
pub use metrics::{evaluate, roc_auc, EvalMetrics};
pub use trainer::{train, FamilyReport, TrainingOutcome};

/// A single model family failed to fit. The trainer tolerates these until
/// every family has failed.
#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct FitError(pub String);

/// The fixed roster, in preference order (simplest first). Ties in the
/// selection rule resolve toward the earlier entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModelFamily {
    LogisticRegression,
    RandomForest,
    GradientBoosting,
}

impl ModelFamily {
    pub const ROSTER: [ModelFamily; 3] = [
        ModelFamily::LogisticRegression,
        ModelFamily::RandomForest,
        ModelFamily::GradientBoosting,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LogisticRegression => "Logistic Regression",
            Self::RandomForest => "Random Forest",
            Self::GradientBoosting => "Gradient Boosting",
        }
    }

    pub fn roster_position(&self) -> usize {
        Self::ROSTER.iter().position(|f| f == self).unwrap_or(usize::MAX)
    }
}

impl std::fmt::Display for ModelFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fitted parameters, opaque to callers, serializable for artifacts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelParams {
    Logistic(LogisticRegression),
    Forest(RandomForest),
    Boosted(GradientBoosting),
}

impl ModelParams {
    pub fn predict_proba(&self, scaled_row: &[f64]) -> f64 {
        match self {
            Self::Logistic(m) => m.predict_proba(scaled_row),
            Self::Forest(m) => m.predict_proba(scaled_row),
            Self::Boosted(m) => m.predict_proba(scaled_row),
        }
    }

    pub fn importances(&self) -> Vec<f64> {
        match self {
            Self::Logistic(m) => m.importances(),
            Self::Forest(m) => m.importances.clone(),
            Self::Boosted(m) => m.importances.clone(),
        }
    }

    pub fn n_parameters(&self) -> usize {
        match self {
            Self::Logistic(m) => m.n_parameters(),
            Self::Forest(m) => m.n_parameters(),
            Self::Boosted(m) => m.n_parameters(),
        }
    }
}

/// The selected model and everything needed to serve it. Immutable after
/// training; retraining publishes a new artifact version instead of
/// mutating this one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainedModel {
    pub family: ModelFamily,
    pub params: ModelParams,
    /// Exact ordered feature-name list the model expects
    pub feature_names: Vec<String>,
    pub layout_version: u8,
    pub layout_hash: u32,
    pub metrics: EvalMetrics,
    pub seed: u64,
    pub trained_at: DateTime<Utc>,
}

impl TrainedModel {
    pub fn predict_proba(&self, scaled_row: &[f64]) -> f64 {
        self.params.predict_proba(scaled_row)
    }

    pub fn feature_importances(&self) -> Vec<f64> {
        self.params.importances()
    }

    pub fn n_parameters(&self) -> usize {
        self.params.n_parameters()
    }
}
