//! Derived-quantity computation
//!
//! Turns a validated record into the versioned model vector plus the
//! derived physical summary. Deterministic: same record and constants,
//! same output, bit for bit.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_HABITABLE_THRESHOLD, EARTH_MASS_KG, EARTH_RADIUS_M};
use crate::error::FeatureError;
use crate::schema::ExoplanetRecord;

use super::layout::FEATURE_COUNT;
use super::score::{habitability_score, stellar_compatibility};
use super::vector::FeatureVector;

/// Engineered view of one observation. Immutable once computed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineeredRecord {
    /// Model input vector in layout order
    pub vector: FeatureVector,
    /// Bulk density (kg/m^3)
    pub density: f64,
    /// Insolation flux relative to Earth (= 1.0)
    pub insolation: f64,
    /// Stellar compatibility index [0, 1]
    pub stellar_compat: f64,
    /// Rule-based habitability score [0, 1]
    pub habitability_score: f64,
    /// Label: habitability_score >= threshold
    pub is_potentially_habitable: bool,
}

/// Bulk density from Earth-unit mass and radius, in kg/m^3.
/// Earth comes out at ~5513.
pub fn density_kg_m3(mass_earth: f64, radius_earth: f64) -> f64 {
    let mass_kg = mass_earth * EARTH_MASS_KG;
    let radius_m = radius_earth * EARTH_RADIUS_M;
    let volume_m3 = (4.0 / 3.0) * std::f64::consts::PI * radius_m.powi(3);
    mass_kg / volume_m3
}

/// Insolation flux in Earth units: `L / a^2` with L in Solar luminosities
/// and a in AU.
pub fn insolation_flux(luminosity: f64, semi_major_axis: f64) -> f64 {
    luminosity / semi_major_axis.powi(2)
}

/// Engineer with the default label threshold.
pub fn engineer(record: &ExoplanetRecord) -> Result<EngineeredRecord, FeatureError> {
    engineer_with_threshold(record, DEFAULT_HABITABLE_THRESHOLD)
}

/// Engineer a validated record into its feature vector and derived summary.
///
/// Fails with `InvalidPhysics` when density or insolation would be
/// non-finite; the validator already excludes zero radius and semi-major
/// axis, so this guards against values that squeeze past as subnormals.
pub fn engineer_with_threshold(
    record: &ExoplanetRecord,
    habitable_threshold: f64,
) -> Result<EngineeredRecord, FeatureError> {
    let density = density_kg_m3(record.mass, record.radius);
    if !density.is_finite() || density <= 0.0 {
        return Err(FeatureError::InvalidPhysics("non-finite bulk density"));
    }

    let insolation = insolation_flux(record.luminosity, record.semi_major_axis);
    if !insolation.is_finite() || insolation < 0.0 {
        return Err(FeatureError::InvalidPhysics("non-finite insolation flux"));
    }

    let stellar_compat = stellar_compatibility(record);
    let score = habitability_score(record);

    let values: [f64; FEATURE_COUNT] = [
        record.radius,
        record.mass,
        record.orbital_period,
        record.semi_major_axis,
        record.equilibrium_temp,
        record.stellar_teff,
        record.stellar_radius,
        record.stellar_mass,
        record.system_distance,
        density,
        insolation,
        record.metallicity,
        record.eccentricity,
    ];

    Ok(EngineeredRecord {
        vector: FeatureVector::from_values(values),
        density,
        insolation,
        stellar_compat,
        habitability_score: score,
        is_potentially_habitable: score >= habitable_threshold,
    })
}
