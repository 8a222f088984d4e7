//! Dataset Preparer
//!
//! Feature selection, deterministic stratified splitting, and robust
//! scaling. The scaler is fitted on the training partition only; the
//! fitted parameters travel with the model artifact.

pub mod scaler;
pub mod split;


pub use scaler::RobustScaler;
pub use split::{prepare, stratified_split, TrainingDataset};
