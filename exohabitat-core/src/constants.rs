//! Central Physical Constants & Scoring Parameters
//!
//! Single source of truth for unit conversions and the rule-based
//! habitability scoring weights. Front-ends and the API layer never
//! duplicate these values.

/// Earth mass in kilograms
pub const EARTH_MASS_KG: f64 = 5.972e24;

/// Earth radius in meters
pub const EARTH_RADIUS_M: f64 = 6.371e6;

/// Solar effective temperature (Kelvin)
pub const SOLAR_TEFF_K: f64 = 5778.0;

/// Optimal equilibrium temperature for liquid water (Kelvin)
pub const OPTIMAL_EQ_TEMP_K: f64 = 275.0;

/// Tolerance of the temperature score term (Kelvin).
/// The term reaches zero at this deviation and goes negative beyond it.
pub const EQ_TEMP_TOLERANCE_K: f64 = 200.0;

/// Earth-like radius band (Earth radii)
pub const RADIUS_BAND_LO: f64 = 0.8;
pub const RADIUS_BAND_HI: f64 = 1.5;

/// Earth's orbital period (days), reference for the period score term
pub const EARTH_PERIOD_DAYS: f64 = 365.0;

/// Stellar similarity tolerances: teff (K), mass (M_sun), metallicity (dex)
pub const STELLAR_TEFF_TOLERANCE_K: f64 = 3000.0;
pub const STELLAR_MASS_TOLERANCE: f64 = 1.0;
pub const METALLICITY_TOLERANCE_DEX: f64 = 1.0;

// ============================================
// Habitability score weights (0-100 scale)
// ============================================

pub const WEIGHT_TEMPERATURE: f64 = 40.0;
pub const WEIGHT_RADIUS: f64 = 30.0;
pub const WEIGHT_STELLAR: f64 = 15.0;
pub const WEIGHT_PERIOD: f64 = 10.0;
pub const WEIGHT_ECCENTRICITY: f64 = 5.0;

/// Classification bands on the 0-1 scale
pub const HIGHLY_HABITABLE_THRESHOLD: f64 = 0.70;
pub const POTENTIALLY_HABITABLE_THRESHOLD: f64 = 0.50;

/// Default label threshold for `is_potentially_habitable`
pub const DEFAULT_HABITABLE_THRESHOLD: f64 = 0.50;

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// App name
pub const APP_NAME: &str = "ExoHabitat";
