//! ExoHabitat Core - Habitability Prediction Pipeline
//!
//! Deterministic feature-engineering and model-selection pipeline for
//! tabular exoplanet observations:
//!
//! ```text
//! raw records -> validator -> feature engineer -> dataset preparer
//!             -> model trainer -> versioned artifact (model, scaler,
//!                feature list) -> predictor -> ranking / statistics
//! ```
//!
//! Training is an offline batch job (see the `train` binary); serving is
//! stateless reads against an immutable loaded artifact, so predictions
//! run concurrently without locks.

pub mod artifacts;
pub mod config;
pub mod constants;
pub mod dataset;
pub mod error;
pub mod features;
pub mod model;
pub mod predict;
pub mod ranking;
pub mod schema;

pub use artifacts::{ArtifactStore, LoadedArtifact};
pub use config::{ImputePolicy, PipelineConfig};
pub use error::{ArtifactError, FeatureError, PredictError, TrainingError, ValidationError};
pub use features::{Classification, EngineeredRecord, FeatureVector};
pub use model::{ModelFamily, TrainedModel};
pub use predict::{PredictionResult, Predictor, Probabilities};
pub use ranking::{PlanetStore, RankedPlanet, StoreStatistics, StoredPlanet};
pub use schema::{ExoplanetRecord, RawObservation};

use dataset::TrainingDataset;
use model::TrainingOutcome;

/// Run the full offline pipeline over raw observations: resolve missing
/// values, engineer features, prepare the stratified split, and train the
/// roster. Returns the selection outcome and the dataset whose scaler
/// belongs with the selected model.
pub fn run_training(
    raws: &[RawObservation],
    config: &PipelineConfig,
) -> Result<(TrainingOutcome, TrainingDataset), TrainingError> {
    let (records, skipped) = schema::resolve(raws, config.impute_policy);
    if !skipped.is_empty() {
        log::info!("resolver skipped {} of {} rows", skipped.len(), raws.len());
    }

    let mut engineered = Vec::with_capacity(records.len());
    for record in &records {
        match features::engineer_with_threshold(record, config.habitable_threshold) {
            Ok(e) => engineered.push(e),
            Err(e) => log::warn!("skipping {}: {}", record.name, e),
        }
    }

    let dataset = dataset::prepare(&engineered, config.test_fraction, config.seed)?;
    let outcome = model::train(&dataset)?;
    Ok((outcome, dataset))
}
