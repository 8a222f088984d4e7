//! Rule-based habitability scoring
//!
//! The single source of truth for the weighted habitability formula and the
//! classification bands. Display clients consume these numbers over the
//! API; nothing else recomputes them.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::schema::ExoplanetRecord;

/// Classification bands. Boundaries on the 0-100 scale: >= 70 highly,
/// 50-69 potentially, < 50 non-habitable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Classification {
    #[serde(rename = "Highly Habitable")]
    HighlyHabitable,
    #[serde(rename = "Potentially Habitable")]
    PotentiallyHabitable,
    #[serde(rename = "Non-Habitable")]
    NonHabitable,
}

impl Classification {
    /// Band for a score on the 0-1 scale.
    pub fn from_score(score: f64) -> Self {
        if score >= HIGHLY_HABITABLE_THRESHOLD {
            Self::HighlyHabitable
        } else if score >= POTENTIALLY_HABITABLE_THRESHOLD {
            Self::PotentiallyHabitable
        } else {
            Self::NonHabitable
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HighlyHabitable => "Highly Habitable",
            Self::PotentiallyHabitable => "Potentially Habitable",
            Self::NonHabitable => "Non-Habitable",
        }
    }
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stellar compatibility index in [0, 1]: mean of three tolerance-mapped
/// deviations from solar values (effective temperature, mass, metallicity).
pub fn stellar_compatibility(record: &ExoplanetRecord) -> f64 {
    let teff = tolerance_factor(record.stellar_teff - SOLAR_TEFF_K, STELLAR_TEFF_TOLERANCE_K);
    let mass = tolerance_factor(record.stellar_mass - 1.0, STELLAR_MASS_TOLERANCE);
    let met = tolerance_factor(record.metallicity, METALLICITY_TOLERANCE_DEX);
    (teff + mass + met) / 3.0
}

fn tolerance_factor(deviation: f64, tolerance: f64) -> f64 {
    (1.0 - deviation.abs() / tolerance).max(0.0)
}

/// Rule-based habitability score on the 0-1 scale.
///
/// Weighted component sum on 0-100, clamped, then normalized. The
/// temperature term is deliberately not floored at zero: a planet far
/// outside the liquid-water window sinks the total no matter how Earth-like
/// the rest of its parameters are.
pub fn habitability_score(record: &ExoplanetRecord) -> f64 {
    let temp = temperature_component(record.equilibrium_temp);
    let radius = radius_component(record.radius);
    let stellar = WEIGHT_STELLAR * stellar_compatibility(record);
    let period = WEIGHT_PERIOD * period_factor(record.orbital_period);
    let ecc = WEIGHT_ECCENTRICITY * eccentricity_factor(record.eccentricity);

    let raw = temp + radius + stellar + period + ecc;
    raw.clamp(0.0, 100.0) / 100.0
}

/// 40 at 275 K, zero at +/-200 K, negative beyond.
fn temperature_component(eq_temp: f64) -> f64 {
    let slope = WEIGHT_TEMPERATURE / EQ_TEMP_TOLERANCE_K;
    WEIGHT_TEMPERATURE - slope * (eq_temp - OPTIMAL_EQ_TEMP_K).abs()
}

/// Full weight inside the Earth-like band, linear falloff outside.
fn radius_component(radius: f64) -> f64 {
    if (RADIUS_BAND_LO..=RADIUS_BAND_HI).contains(&radius) {
        WEIGHT_RADIUS
    } else {
        (WEIGHT_RADIUS - (radius - 1.0).abs() * 15.0).max(0.0)
    }
}

/// Log-distance from Earth's orbital period, two decades to zero.
fn period_factor(period_days: f64) -> f64 {
    let dev = ((period_days + 1.0).log10() - (EARTH_PERIOD_DAYS + 1.0).log10()).abs();
    (1.0 - dev / 2.0).max(0.0)
}

/// Eccentricity bands: near-circular orbits hold stable climates.
fn eccentricity_factor(e: f64) -> f64 {
    if e < 0.1 {
        1.0
    } else if e < 0.25 {
        0.6
    } else if e < 0.5 {
        0.3
    } else {
        0.0
    }
}
