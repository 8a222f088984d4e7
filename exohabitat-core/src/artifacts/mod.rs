//! Versioned model artifacts
//!
//! A training run publishes a matched triple (model, scaler, feature list)
//! plus a manifest with sha256 checksums. Versions are never overwritten,
//! so rollback is a pointer move. Serving reads go through an
//! `Arc<LoadedArtifact>` swapped atomically on reload.

pub mod store;


use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::dataset::RobustScaler;
use crate::model::{EvalMetrics, TrainedModel};

pub use store::ArtifactStore;

pub const MODEL_FILE: &str = "model.json";
pub const SCALER_FILE: &str = "scaler.json";
pub const FEATURES_FILE: &str = "features.json";
pub const MANIFEST_FILE: &str = "manifest.json";
pub const CURRENT_FILE: &str = "CURRENT";

/// Integrity and provenance record for one published version.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactManifest {
    pub version: String,
    pub created_at: DateTime<Utc>,
    pub model_family: String,
    pub metrics: EvalMetrics,
    pub layout_version: u8,
    pub layout_hash: u32,
    /// file name -> sha256 hex digest
    pub checksums: BTreeMap<String, String>,
}

/// A fully loaded, checksum-verified artifact triple. Immutable for the
/// lifetime of the serving session that holds it.
#[derive(Debug, Clone)]
pub struct LoadedArtifact {
    pub manifest: ArtifactManifest,
    pub model: TrainedModel,
    pub scaler: RobustScaler,
    pub feature_names: Vec<String>,
}

impl LoadedArtifact {
    pub fn version(&self) -> &str {
        &self.manifest.version
    }
}
