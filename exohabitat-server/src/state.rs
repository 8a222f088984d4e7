//! Shared application state

use std::sync::Arc;

use exohabitat_core::{ArtifactStore, PlanetStore, Predictor};

use crate::error::AppError;

#[derive(Clone)]
pub struct AppState {
    pub artifacts: Arc<ArtifactStore>,
    pub planets: Arc<PlanetStore>,
}

impl AppState {
    pub fn new(artifacts: Arc<ArtifactStore>, planets: Arc<PlanetStore>) -> Self {
        Self { artifacts, planets }
    }

    /// Bind a predictor to the currently active artifact. The Arc clone
    /// means a concurrent reload never swaps the model out from under a
    /// request in flight.
    pub fn predictor(&self) -> Result<Predictor, AppError> {
        let artifact = self.artifacts.active().ok_or(AppError::ModelNotLoaded)?;
        Predictor::new(artifact).map_err(AppError::from)
    }
}
