//! Range validation
//!
//! Pure function from raw payload to validated record. Documented physical
//! bounds; anything non-finite is out of range by definition.

use crate::constants::SOLAR_TEFF_K;
use crate::error::ValidationError;
use super::record::{ExoplanetRecord, RawObservation};

fn require(field: &'static str, value: Option<f64>) -> Result<f64, ValidationError> {
    value.ok_or(ValidationError::MissingField(field))
}

fn within(
    field: &'static str,
    value: f64,
    min: f64,
    max: f64,
    min_exclusive: bool,
) -> Result<f64, ValidationError> {
    let below = if min_exclusive { value <= min } else { value < min };
    if !value.is_finite() || below || value > max {
        return Err(ValidationError::OutOfRange { field, value });
    }
    Ok(value)
}

/// Derive stellar luminosity from radius and effective temperature when the
/// catalog omits it: `L = R^2 * (T / T_sun)^4` (Solar units).
pub fn derive_luminosity(raw: &RawObservation) -> Option<f64> {
    match (raw.st_lum, raw.st_rad, raw.st_teff) {
        (Some(l), _, _) => Some(l),
        (None, Some(r), Some(t)) if r > 0.0 && t > 0.0 => {
            Some(r.powi(2) * (t / SOLAR_TEFF_K).powi(4))
        }
        _ => None,
    }
}

/// Validate one raw observation into a complete `ExoplanetRecord`.
///
/// Rejects with `MissingField` on any absent required column (the batch
/// resolver fills columns first when an imputation policy is configured)
/// and with `OutOfRange` on bound violations or non-finite values.
pub fn validate(raw: &RawObservation) -> Result<ExoplanetRecord, ValidationError> {
    let luminosity = derive_luminosity(raw);

    Ok(ExoplanetRecord {
        name: raw.name().to_string(),
        radius: within("pl_rade", require("pl_rade", raw.pl_rade)?, 0.0, 100.0, true)?,
        mass: within("pl_bmasse", require("pl_bmasse", raw.pl_bmasse)?, 0.0, 10_000.0, true)?,
        equilibrium_temp: within("pl_eqt", require("pl_eqt", raw.pl_eqt)?, 0.0, 10_000.0, true)?,
        orbital_period: within(
            "pl_orbper",
            require("pl_orbper", raw.pl_orbper)?,
            0.0,
            1.0e6,
            true,
        )?,
        semi_major_axis: within(
            "pl_orbsmax",
            require("pl_orbsmax", raw.pl_orbsmax)?,
            0.0,
            10_000.0,
            true,
        )?,
        eccentricity: {
            let e = within(
                "pl_orbeccen",
                require("pl_orbeccen", raw.pl_orbeccen)?,
                0.0,
                1.0,
                false,
            )?;
            // e = 1.0 is unbound, not an orbit
            if e >= 1.0 {
                return Err(ValidationError::OutOfRange {
                    field: "pl_orbeccen",
                    value: e,
                });
            }
            e
        },
        stellar_teff: within("st_teff", require("st_teff", raw.st_teff)?, 0.0, 60_000.0, true)?,
        stellar_radius: within("st_rad", require("st_rad", raw.st_rad)?, 0.0, 2_000.0, true)?,
        stellar_mass: within("st_mass", require("st_mass", raw.st_mass)?, 0.0, 300.0, true)?,
        metallicity: within("st_met", require("st_met", raw.st_met)?, -5.0, 2.0, false)?,
        luminosity: within("st_lum", require("st_lum", luminosity)?, 0.0, 1.0e7, true)?,
        system_distance: within("sy_dist", require("sy_dist", raw.sy_dist)?, 0.0, 1.0e6, false)?,
    })
}
