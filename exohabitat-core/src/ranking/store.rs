//! Planet store
//!
//! In-memory append-only vec behind a RwLock, with an optional JSON
//! snapshot file loaded on open and rewritten on every mutation. Insertion
//! order is the tie-break for ranking, so the vec order is authoritative.

use std::fs;
use std::path::PathBuf;

use chrono::Utc;
use parking_lot::RwLock;
use uuid::Uuid;

use crate::features::Classification;
use crate::predict::PredictionResult;
use crate::schema::ExoplanetRecord;

use super::{BandDistribution, RankedPlanet, StoreError, StoreStatistics, StoredPlanet};

pub struct PlanetStore {
    planets: RwLock<Vec<StoredPlanet>>,
    snapshot_path: Option<PathBuf>,
}

impl PlanetStore {
    /// Volatile store, nothing persisted.
    pub fn in_memory() -> Self {
        Self {
            planets: RwLock::new(Vec::new()),
            snapshot_path: None,
        }
    }

    /// Store backed by a JSON snapshot file. An existing snapshot is
    /// loaded; a missing one starts the store empty.
    pub fn with_snapshot(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let planets = if path.exists() {
            serde_json::from_slice(&fs::read(&path)?)?
        } else {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            Vec::new()
        };
        log::info!(
            "planet store opened with {} planets ({})",
            planets.len(),
            path.display()
        );
        Ok(Self {
            planets: RwLock::new(planets),
            snapshot_path: Some(path),
        })
    }

    pub fn len(&self) -> usize {
        self.planets.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.planets.read().is_empty()
    }

    /// Append a planet with its prediction. Names are identities here:
    /// duplicates are rejected rather than silently re-ranked.
    pub fn add(
        &self,
        name: &str,
        record: ExoplanetRecord,
        prediction: PredictionResult,
    ) -> Result<StoredPlanet, StoreError> {
        let mut planets = self.planets.write();
        if planets.iter().any(|p| p.name == name) {
            return Err(StoreError::DuplicateName(name.to_string()));
        }

        let planet = StoredPlanet {
            id: Uuid::new_v4(),
            name: name.to_string(),
            record,
            prediction,
            added_at: Utc::now(),
        };
        planets.push(planet.clone());
        self.save_snapshot(&planets)?;
        Ok(planet)
    }

    /// Top-N planets, descending by score. The sort is stable, so equal
    /// scores keep insertion order and repeated calls on unchanged data
    /// return identical rankings.
    pub fn rank(&self, top_n: usize) -> Vec<RankedPlanet> {
        let planets = self.planets.read();
        let mut ordered: Vec<&StoredPlanet> = planets.iter().collect();
        ordered.sort_by(|a, b| b.prediction.score.total_cmp(&a.prediction.score));

        ordered
            .into_iter()
            .take(top_n)
            .enumerate()
            .map(|(i, p)| RankedPlanet {
                rank: i + 1,
                id: p.id,
                name: p.name.clone(),
                score: p.prediction.score,
                classification: p.prediction.classification,
                confidence: p.prediction.confidence,
            })
            .collect()
    }

    /// Aggregate statistics. Every stored score lands in exactly one band,
    /// so the distribution counts sum to `total`.
    pub fn statistics(&self) -> StoreStatistics {
        let planets = self.planets.read();
        let total = planets.len();

        let mut distribution = BandDistribution::default();
        let mut score_sum = 0.0;
        for p in planets.iter() {
            score_sum += p.prediction.score;
            distribution.count(Classification::from_score(p.prediction.score));
        }

        StoreStatistics {
            total,
            average_score: if total > 0 { score_sum / total as f64 } else { 0.0 },
            distribution,
        }
    }

    /// All stored planets in insertion order.
    pub fn all(&self) -> Vec<StoredPlanet> {
        self.planets.read().clone()
    }

    fn save_snapshot(&self, planets: &[StoredPlanet]) -> Result<(), StoreError> {
        if let Some(path) = &self.snapshot_path {
            fs::write(path, serde_json::to_vec_pretty(planets)?)?;
        }
        Ok(())
    }
}
