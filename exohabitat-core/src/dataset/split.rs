//! Stratified train/test preparation
//!
//! Splits engineered records by the habitability label so both partitions
//! keep the class ratio, then fits the scaler on the training rows only.

use ndarray::{Array1, Array2};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::error::TrainingError;
use crate::features::{EngineeredRecord, FEATURE_COUNT, FEATURE_LAYOUT};

use super::scaler::RobustScaler;

/// Prepared, scaled partitions plus everything needed to reproduce them.
#[derive(Debug, Clone)]
pub struct TrainingDataset {
    pub x_train: Array2<f64>,
    pub y_train: Array1<f64>,
    pub x_test: Array2<f64>,
    pub y_test: Array1<f64>,
    /// Ordered feature names the matrices follow
    pub feature_names: Vec<String>,
    /// Scaler fitted on the training partition only
    pub scaler: RobustScaler,
    pub seed: u64,
    pub test_fraction: f64,
}

impl TrainingDataset {
    pub fn n_train(&self) -> usize {
        self.x_train.nrows()
    }

    pub fn n_test(&self) -> usize {
        self.x_test.nrows()
    }
}

/// Deterministic stratified split over the label vector.
///
/// Returns (train_indices, test_indices), both ascending. Each class group
/// is shuffled with the seeded RNG and contributes `round(n * fraction)`
/// test samples (capped so no class empties its training side), keeping
/// the class ratio within one sample of the global fraction.
pub fn stratified_split(labels: &[bool], test_fraction: f64, seed: u64) -> (Vec<usize>, Vec<usize>) {
    let mut rng = StdRng::seed_from_u64(seed);

    // Fixed class order keeps RNG consumption deterministic.
    let mut train = Vec::new();
    let mut test = Vec::new();
    for class in [false, true] {
        let mut indices: Vec<usize> = labels
            .iter()
            .enumerate()
            .filter(|(_, &l)| l == class)
            .map(|(i, _)| i)
            .collect();
        if indices.is_empty() {
            continue;
        }
        indices.shuffle(&mut rng);

        let mut n_test = (indices.len() as f64 * test_fraction).round() as usize;
        n_test = n_test.min(indices.len().saturating_sub(1));

        test.extend_from_slice(&indices[..n_test]);
        train.extend_from_slice(&indices[n_test..]);
    }

    train.sort_unstable();
    test.sort_unstable();
    (train, test)
}

/// Prepare a training dataset from engineered records.
///
/// Records with a non-finite or layout-incompatible vector are excluded
/// with a logged reason; they never poison the scaler.
pub fn prepare(
    engineered: &[EngineeredRecord],
    test_fraction: f64,
    seed: u64,
) -> Result<TrainingDataset, TrainingError> {
    let mut rows: Vec<&EngineeredRecord> = Vec::with_capacity(engineered.len());
    for (i, record) in engineered.iter().enumerate() {
        if !record.vector.is_compatible() {
            log::warn!("excluding row {i}: feature layout mismatch");
            continue;
        }
        if !record.vector.is_finite() {
            log::warn!("excluding row {i}: non-finite feature value");
            continue;
        }
        rows.push(record);
    }

    if rows.len() < 4 {
        return Err(TrainingError::EmptyDataset);
    }

    let labels: Vec<bool> = rows.iter().map(|r| r.is_potentially_habitable).collect();
    let (train_idx, test_idx) = stratified_split(&labels, test_fraction, seed);
    if train_idx.is_empty() || test_idx.is_empty() {
        return Err(TrainingError::EmptyDataset);
    }

    let matrix = |indices: &[usize]| -> Array2<f64> {
        Array2::from_shape_fn((indices.len(), FEATURE_COUNT), |(i, j)| {
            rows[indices[i]].vector.values[j]
        })
    };
    let label_vec = |indices: &[usize]| -> Array1<f64> {
        Array1::from_iter(indices.iter().map(|&i| if labels[i] { 1.0 } else { 0.0 }))
    };

    let x_train_raw = matrix(&train_idx);
    let x_test_raw = matrix(&test_idx);

    // Fit on train only; fitting on test data would leak the held-out
    // distribution into the model.
    let scaler = RobustScaler::fit(x_train_raw.view());
    let x_train = scaler.transform(x_train_raw.view());
    let x_test = scaler.transform(x_test_raw.view());

    log::info!(
        "prepared dataset: {} train / {} test rows, {} features (seed {seed})",
        train_idx.len(),
        test_idx.len(),
        FEATURE_COUNT,
    );

    Ok(TrainingDataset {
        x_train,
        y_train: label_vec(&train_idx),
        x_test,
        y_test: label_vec(&test_idx),
        feature_names: FEATURE_LAYOUT.iter().map(|s| s.to_string()).collect(),
        scaler,
        seed,
        test_fraction,
    })
}
