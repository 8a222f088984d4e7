//! Feature Vector - Core data structure for model input
//!
//! Versioned feature vector with layout validation. Produced only by the
//! feature engineer; never build one from an unchecked `Vec<f64>` in
//! pipeline code.

use serde::{Deserialize, Serialize};

use super::layout::{
    layout_hash, validate_layout, LayoutMismatchError, FEATURE_COUNT, FEATURE_LAYOUT,
    FEATURE_VERSION,
};

/// Versioned feature vector with layout metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    /// Feature layout version
    pub version: u8,
    /// CRC32 hash of the feature layout (for mismatch detection)
    pub layout_hash: u32,
    /// Feature values in the order defined by FEATURE_LAYOUT
    pub values: [f64; FEATURE_COUNT],
}

impl FeatureVector {
    /// Create from values in layout order, stamped with the current version.
    pub fn from_values(values: [f64; FEATURE_COUNT]) -> Self {
        Self {
            version: FEATURE_VERSION,
            layout_hash: layout_hash(),
            values,
        }
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Get feature by index.
    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    /// Get feature by name.
    pub fn get_by_name(&self, name: &str) -> Option<f64> {
        super::layout::feature_index(name).and_then(|i| self.get(i))
    }

    /// Validate that this vector is compatible with the current layout.
    pub fn validate(&self) -> Result<(), LayoutMismatchError> {
        validate_layout(self.version, self.layout_hash)
    }

    pub fn is_compatible(&self) -> bool {
        self.validate().is_ok()
    }

    /// True when every value is finite.
    pub fn is_finite(&self) -> bool {
        self.values.iter().all(|v| v.is_finite())
    }

    pub fn feature_names(&self) -> &'static [&'static str] {
        FEATURE_LAYOUT
    }
}
