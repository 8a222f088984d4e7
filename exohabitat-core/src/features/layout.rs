//! Feature Layout - Centralized Feature Definition
//!
//! This file controls the model feature schema.
//!
//! ## Rules (NEVER break these):
//! 1. Add feature -> increment FEATURE_VERSION
//! 2. Change order -> increment FEATURE_VERSION
//! 3. Remove feature -> increment FEATURE_VERSION
//!
//! Versioning keeps persisted artifacts, training data and live inputs
//! compatible: a model trained against one layout refuses to score
//! vectors from another.

use crc32fast::Hasher;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Current feature layout version.
/// MUST be incremented when the layout changes.
pub const FEATURE_VERSION: u8 = 1;

/// Feature names in the exact order they appear in the vector.
/// This is the SINGLE SOURCE OF TRUTH for feature layout.
pub const FEATURE_LAYOUT: &[&str] = &[
    // === Planet (0-4) ===
    "pl_rade",     // 0: Planet radius (Earth radii)
    "pl_bmasse",   // 1: Planet mass (Earth masses)
    "pl_orbper",   // 2: Orbital period (days)
    "pl_orbsmax",  // 3: Semi-major axis (AU)
    "pl_eqt",      // 4: Equilibrium temperature (K)

    // === Host star (5-8) ===
    "st_teff",     // 5: Stellar effective temperature (K)
    "st_rad",      // 6: Stellar radius (Solar radii)
    "st_mass",     // 7: Stellar mass (Solar masses)
    "sy_dist",     // 8: System distance (parsecs)

    // === Derived / supplemental (9-12) ===
    "pl_dens",     // 9: Bulk density (kg/m^3), derived
    "pl_insol",    // 10: Insolation flux (Earth = 1.0), derived
    "st_met",      // 11: Stellar metallicity (dex)
    "pl_orbeccen", // 12: Orbital eccentricity
];

/// Total number of model features.
/// IMPORTANT: must match FEATURE_LAYOUT.len()
pub const FEATURE_COUNT: usize = 13;

/// Display labels for UI-facing endpoints.
pub fn feature_label(name: &str) -> &'static str {
    match name {
        "pl_rade" => "Planet Radius",
        "pl_bmasse" => "Planet Mass",
        "pl_orbper" => "Orbital Period",
        "pl_orbsmax" => "Semi-Major Axis",
        "pl_eqt" => "Equilibrium Temperature",
        "st_teff" => "Stellar Temperature",
        "st_rad" => "Stellar Radius",
        "st_mass" => "Stellar Mass",
        "sy_dist" => "System Distance",
        "pl_dens" => "Planet Density",
        "pl_insol" => "Insolation Flux",
        "st_met" => "Stellar Metallicity",
        "pl_orbeccen" => "Orbital Eccentricity",
        _ => "Unknown Feature",
    }
}

// ============================================================================
// LAYOUT HASH
// ============================================================================

/// CRC32 hash of the feature layout; detects mismatches at runtime.
pub fn compute_layout_hash() -> u32 {
    let mut hasher = Hasher::new();
    hasher.update(&[FEATURE_VERSION]);
    for name in FEATURE_LAYOUT {
        hasher.update(name.as_bytes());
        hasher.update(&[0]); // separator
    }
    hasher.finalize()
}

static LAYOUT_HASH: Lazy<u32> = Lazy::new(compute_layout_hash);

/// Get layout hash (cached; inputs are const, so this is stable per build).
pub fn layout_hash() -> u32 {
    *LAYOUT_HASH
}

// ============================================================================
// LAYOUT INFO
// ============================================================================

/// Complete layout information for serialization/logging.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutInfo {
    pub version: u8,
    pub hash: u32,
    pub feature_count: usize,
    pub feature_names: Vec<String>,
}

impl LayoutInfo {
    pub fn current() -> Self {
        Self {
            version: FEATURE_VERSION,
            hash: layout_hash(),
            feature_count: FEATURE_COUNT,
            feature_names: FEATURE_LAYOUT.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Default for LayoutInfo {
    fn default() -> Self {
        Self::current()
    }
}

// ============================================================================
// LAYOUT VALIDATION
// ============================================================================

/// Error when a feature layout doesn't match the current one.
#[derive(Debug, Clone)]
pub struct LayoutMismatchError {
    pub expected_version: u8,
    pub expected_hash: u32,
    pub actual_version: u8,
    pub actual_hash: u32,
}

impl std::fmt::Display for LayoutMismatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "feature layout mismatch: expected v{} (hash: {:08x}), got v{} (hash: {:08x})",
            self.expected_version, self.expected_hash, self.actual_version, self.actual_hash
        )
    }
}

impl std::error::Error for LayoutMismatchError {}

/// Validate that incoming data matches the current layout.
pub fn validate_layout(incoming_version: u8, incoming_hash: u32) -> Result<(), LayoutMismatchError> {
    let current_hash = layout_hash();
    if incoming_version != FEATURE_VERSION || incoming_hash != current_hash {
        return Err(LayoutMismatchError {
            expected_version: FEATURE_VERSION,
            expected_hash: current_hash,
            actual_version: incoming_version,
            actual_hash: incoming_hash,
        });
    }
    Ok(())
}

// ============================================================================
// FEATURE INDEX LOOKUP
// ============================================================================

/// Get feature index by name (O(n) but features are few).
pub fn feature_index(name: &str) -> Option<usize> {
    FEATURE_LAYOUT.iter().position(|&n| n == name)
}

/// Get feature name by index.
pub fn feature_name(index: usize) -> Option<&'static str> {
    FEATURE_LAYOUT.get(index).copied()
}
