//! Artifact store
//!
//! File layout under the store root:
//!
//! ```text
//! v0001/  model.json  scaler.json  features.json  manifest.json
//! v0002/  ...
//! CURRENT             # name of the active version
//! ```
//!
//! Publication stages a directory, renames it into place, then replaces
//! CURRENT via temp-file + rename, so a crash mid-publish leaves the old
//! version in service and never a partial one.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Utc;
use parking_lot::RwLock;
use sha2::{Digest, Sha256};

use crate::dataset::RobustScaler;
use crate::error::ArtifactError;
use crate::features::layout::{layout_hash, FEATURE_VERSION};
use crate::model::TrainedModel;

use super::{
    ArtifactManifest, LoadedArtifact, CURRENT_FILE, FEATURES_FILE, MANIFEST_FILE, MODEL_FILE,
    SCALER_FILE,
};

pub struct ArtifactStore {
    root: PathBuf,
    active: RwLock<Option<Arc<LoadedArtifact>>>,
}

impl ArtifactStore {
    /// Open (and create if needed) a store rooted at `root`.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, ArtifactError> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self {
            root,
            active: RwLock::new(None),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Published version names, ascending.
    pub fn versions(&self) -> Result<Vec<String>, ArtifactError> {
        let mut versions = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if entry.path().is_dir() && is_version_name(&name) {
                versions.push(name);
            }
        }
        versions.sort();
        Ok(versions)
    }

    /// Name recorded in CURRENT.
    pub fn current_version(&self) -> Result<String, ArtifactError> {
        let path = self.root.join(CURRENT_FILE);
        if !path.exists() {
            return Err(ArtifactError::NoCurrentVersion);
        }
        Ok(fs::read_to_string(path)?.trim().to_string())
    }

    /// Publish a new version of the (model, scaler, feature list) triple.
    /// Returns the version name. Does not change the loaded artifact;
    /// call `reload` to serve it.
    pub fn publish(
        &self,
        model: &TrainedModel,
        scaler: &RobustScaler,
    ) -> Result<String, ArtifactError> {
        let next = match self.versions()?.last() {
            Some(latest) => version_number(latest) + 1,
            None => 1,
        };
        let version = format!("v{next:04}");

        let staging = self.root.join(format!(".staging-{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&staging)?;

        let model_json = serde_json::to_vec_pretty(model)?;
        let scaler_json = serde_json::to_vec_pretty(scaler)?;
        let features_json = serde_json::to_vec_pretty(&model.feature_names)?;

        fs::write(staging.join(MODEL_FILE), &model_json)?;
        fs::write(staging.join(SCALER_FILE), &scaler_json)?;
        fs::write(staging.join(FEATURES_FILE), &features_json)?;

        let mut checksums = std::collections::BTreeMap::new();
        checksums.insert(MODEL_FILE.to_string(), sha256_hex(&model_json));
        checksums.insert(SCALER_FILE.to_string(), sha256_hex(&scaler_json));
        checksums.insert(FEATURES_FILE.to_string(), sha256_hex(&features_json));

        let manifest = ArtifactManifest {
            version: version.clone(),
            created_at: Utc::now(),
            model_family: model.family.as_str().to_string(),
            metrics: model.metrics,
            layout_version: model.layout_version,
            layout_hash: model.layout_hash,
            checksums,
        };
        fs::write(
            staging.join(MANIFEST_FILE),
            serde_json::to_vec_pretty(&manifest)?,
        )?;

        fs::rename(&staging, self.root.join(&version))?;
        self.set_current(&version)?;

        log::info!("published artifact {version} ({})", model.family.as_str());
        Ok(version)
    }

    /// Point CURRENT at an existing version (publish does this; rollback
    /// calls it directly).
    pub fn set_current(&self, version: &str) -> Result<(), ArtifactError> {
        if !self.root.join(version).is_dir() {
            return Err(ArtifactError::NoCurrentVersion);
        }
        let tmp = self.root.join(format!("{CURRENT_FILE}.tmp"));
        fs::write(&tmp, version)?;
        fs::rename(&tmp, self.root.join(CURRENT_FILE))?;
        Ok(())
    }

    /// Load a version from disk, verifying checksums and layout.
    pub fn load_version(&self, version: &str) -> Result<LoadedArtifact, ArtifactError> {
        let dir = self.root.join(version);
        let manifest: ArtifactManifest =
            serde_json::from_slice(&fs::read(dir.join(MANIFEST_FILE))?)?;

        let mut payloads = std::collections::BTreeMap::new();
        for file in [MODEL_FILE, SCALER_FILE, FEATURES_FILE] {
            let bytes = fs::read(dir.join(file))?;
            match manifest.checksums.get(file) {
                Some(expected) if *expected == sha256_hex(&bytes) => {}
                _ => {
                    return Err(ArtifactError::ChecksumMismatch {
                        file: file.to_string(),
                    })
                }
            }
            payloads.insert(file, bytes);
        }

        let model: TrainedModel = serde_json::from_slice(&payloads[MODEL_FILE])?;
        let scaler: RobustScaler = serde_json::from_slice(&payloads[SCALER_FILE])?;
        let feature_names: Vec<String> = serde_json::from_slice(&payloads[FEATURES_FILE])?;

        if model.layout_version != FEATURE_VERSION || model.layout_hash != layout_hash() {
            return Err(ArtifactError::LayoutMismatch(format!(
                "artifact {version} was trained against feature layout v{} (hash {:08x})",
                model.layout_version, model.layout_hash
            )));
        }
        if feature_names != model.feature_names {
            return Err(ArtifactError::LayoutMismatch(format!(
                "artifact {version} feature list disagrees with its model"
            )));
        }

        Ok(LoadedArtifact {
            manifest,
            model,
            scaler,
            feature_names,
        })
    }

    /// Load CURRENT and swap it in as the active artifact.
    pub fn reload(&self) -> Result<Arc<LoadedArtifact>, ArtifactError> {
        let version = self.current_version()?;
        let loaded = Arc::new(self.load_version(&version)?);
        *self.active.write() = Some(loaded.clone());
        log::info!("active artifact is now {version}");
        Ok(loaded)
    }

    /// The currently served artifact, if any. Readers clone the Arc and
    /// keep serving it even across a concurrent reload.
    pub fn active(&self) -> Option<Arc<LoadedArtifact>> {
        self.active.read().clone()
    }
}

fn is_version_name(name: &str) -> bool {
    name.len() == 5 && name.starts_with('v') && name[1..].chars().all(|c| c.is_ascii_digit())
}

fn version_number(name: &str) -> u32 {
    name[1..].parse().unwrap_or(0)
}

fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}
