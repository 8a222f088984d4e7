//! Predictor
//!
//! Serves single and batch predictions against one immutable loaded
//! artifact. Stateless after construction: safe to share across threads
//! and to call concurrently while the store publishes a new version.

pub mod result;


use std::collections::BTreeMap;
use std::sync::Arc;

use rayon::prelude::*;

use crate::artifacts::LoadedArtifact;
use crate::error::PredictError;
use crate::features::{engineer, Classification, FEATURE_LAYOUT};
use crate::schema::{validate, ExoplanetRecord, RawObservation};

pub use result::{Probabilities, PredictionResult};

pub struct Predictor {
    artifact: Arc<LoadedArtifact>,
    /// Importances are fixed per artifact; computed once at construction.
    contributing_factors: BTreeMap<String, f64>,
}

impl Predictor {
    /// Bind a predictor to a loaded artifact.
    ///
    /// Fails with `SchemaMismatch` when the artifact's feature list cannot
    /// be reconstructed from the live layout (renamed, reordered or
    /// missing columns).
    pub fn new(artifact: Arc<LoadedArtifact>) -> Result<Self, PredictError> {
        let live: Vec<&str> = FEATURE_LAYOUT.to_vec();
        let stored: Vec<&str> = artifact.feature_names.iter().map(String::as_str).collect();
        if stored != live {
            return Err(PredictError::SchemaMismatch(format!(
                "artifact expects features {stored:?}, live layout provides {live:?}"
            )));
        }
        if artifact.scaler.n_features() != FEATURE_LAYOUT.len() {
            return Err(PredictError::SchemaMismatch(format!(
                "scaler covers {} features, layout has {}",
                artifact.scaler.n_features(),
                FEATURE_LAYOUT.len()
            )));
        }

        let contributing_factors = artifact
            .feature_names
            .iter()
            .cloned()
            .zip(artifact.model.feature_importances())
            .collect();

        Ok(Self {
            artifact,
            contributing_factors,
        })
    }

    pub fn artifact(&self) -> &LoadedArtifact {
        &self.artifact
    }

    /// Predict one validated record.
    pub fn predict(&self, record: &ExoplanetRecord) -> Result<PredictionResult, PredictError> {
        let engineered = engineer(record)?;
        let scaled = self.artifact.scaler.transform_row(&engineered.vector.values);
        let p = self.artifact.model.predict_proba(&scaled).clamp(0.0, 1.0);

        Ok(PredictionResult {
            score: p,
            classification: Classification::from_score(p),
            confidence: p.max(1.0 - p),
            probabilities: Probabilities {
                habitable: p,
                not_habitable: 1.0 - p,
            },
            contributing_factors: self.contributing_factors.clone(),
        })
    }

    /// Validate then predict one raw observation.
    pub fn predict_raw(&self, raw: &RawObservation) -> Result<PredictionResult, PredictError> {
        let record = validate(raw)?;
        self.predict(&record)
    }

    /// Batch prediction over validated records. Parallel across rows,
    /// output order matches input order, per-row outcomes.
    pub fn predict_batch(
        &self,
        records: &[ExoplanetRecord],
    ) -> Vec<Result<PredictionResult, PredictError>> {
        records.par_iter().map(|r| self.predict(r)).collect()
    }

    /// Batch prediction over raw observations: each row is validated and
    /// predicted independently, so one bad row yields one typed failure,
    /// not a failed batch.
    pub fn predict_batch_raw(
        &self,
        raws: &[RawObservation],
    ) -> Vec<Result<PredictionResult, PredictError>> {
        raws.par_iter().map(|raw| self.predict_raw(raw)).collect()
    }
}
