//! Features Module - Feature Engineering
//!
//! Derived physical quantities, the versioned model vector, and the
//! rule-based habitability score.

pub mod engineer;
pub mod layout;
pub mod score;
pub mod vector;

#[cfg(test)]
mod tests;

// Re-export common types
pub use engineer::{engineer, engineer_with_threshold, EngineeredRecord};
pub use layout::{feature_index, feature_label, feature_name, LayoutInfo, FEATURE_COUNT, FEATURE_LAYOUT, FEATURE_VERSION};
pub use score::{habitability_score, stellar_compatibility, Classification};
pub use vector::FeatureVector;
