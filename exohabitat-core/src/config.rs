//! Pipeline Configuration
//!
//! Knobs for one training/serving run. All fields have defaults matching
//! the published behavior; operators override via the `train` CLI or the
//! server config.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::constants::DEFAULT_HABITABLE_THRESHOLD;

/// Missing-value policy applied by the batch resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ImputePolicy {
    /// Reject any row with a missing required field.
    DropRow,
    /// Fill with the column mean over available values.
    MeanImpute,
    /// Fill with the column median over available values.
    #[default]
    MedianImpute,
    /// Weighted blend of the column mean and a lightweight regression
    /// against the best-correlated available column, weighted by the
    /// column's correlation with the habitability label.
    ImportanceWeighted,
}

impl ImputePolicy {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "drop-row" | "drop" => Some(Self::DropRow),
            "mean-impute" | "mean" => Some(Self::MeanImpute),
            "median-impute" | "median" => Some(Self::MedianImpute),
            "importance-weighted-impute" | "importance" => Some(Self::ImportanceWeighted),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Missing-value policy for batch ingestion
    pub impute_policy: ImputePolicy,

    /// Label threshold for `is_potentially_habitable` (0-1 scale)
    pub habitable_threshold: f64,

    /// Held-out fraction for the test partition
    pub test_fraction: f64,

    /// Seed for every stochastic step (split shuffle, bagging)
    pub seed: u64,

    /// Root directory for versioned artifact triples
    pub artifact_dir: PathBuf,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            impute_policy: ImputePolicy::default(),
            habitable_threshold: DEFAULT_HABITABLE_THRESHOLD,
            test_fraction: 0.2,
            seed: 42,
            artifact_dir: default_artifact_dir(),
        }
    }
}

/// Default artifact root under the platform data directory
pub fn default_artifact_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("exohabitat")
        .join("artifacts")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_impute_policy_parse() {
        assert_eq!(ImputePolicy::parse("drop-row"), Some(ImputePolicy::DropRow));
        assert_eq!(ImputePolicy::parse("median"), Some(ImputePolicy::MedianImpute));
        assert_eq!(
            ImputePolicy::parse("importance"),
            Some(ImputePolicy::ImportanceWeighted)
        );
        assert_eq!(ImputePolicy::parse("bogus"), None);
    }

    #[test]
    fn test_defaults() {
        let cfg = PipelineConfig::default();
        assert_eq!(cfg.test_fraction, 0.2);
        assert_eq!(cfg.seed, 42);
        assert_eq!(cfg.habitable_threshold, 0.5);
    }
}
