//! Ranking & Statistics Service
//!
//! Append-only store of predictions keyed by planet identity, with
//! deterministic ranking and band statistics over the stored scores.

pub mod store;

#[cfg(test)]
mod tests;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::features::Classification;
use crate::predict::PredictionResult;
use crate::schema::ExoplanetRecord;

pub use store::PlanetStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("planet \"{0}\" already exists")]
    DuplicateName(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("snapshot error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// One stored planet with its prediction at insertion time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredPlanet {
    pub id: Uuid,
    pub name: String,
    pub record: ExoplanetRecord,
    pub prediction: PredictionResult,
    pub added_at: DateTime<Utc>,
}

/// One row of a ranking response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedPlanet {
    pub rank: usize,
    pub id: Uuid,
    pub name: String,
    /// 0-1 scale
    pub score: f64,
    pub classification: Classification,
    pub confidence: f64,
}

/// Score counts per classification band. The three counts always sum to
/// the store total: every score falls in exactly one band.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BandDistribution {
    pub highly_habitable: usize,
    pub moderately_habitable: usize,
    pub low_habitability: usize,
}

impl BandDistribution {
    pub fn count(&mut self, classification: Classification) {
        match classification {
            Classification::HighlyHabitable => self.highly_habitable += 1,
            Classification::PotentiallyHabitable => self.moderately_habitable += 1,
            Classification::NonHabitable => self.low_habitability += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.highly_habitable + self.moderately_habitable + self.low_habitability
    }
}

/// Aggregate summary over the stored predictions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct StoreStatistics {
    pub total: usize,
    /// Mean score on the 0-1 scale; 0.0 for an empty store
    pub average_score: f64,
    pub distribution: BandDistribution,
}
