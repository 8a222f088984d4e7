//! Observation records
//!
//! `RawObservation` is the wire shape: every field optional, named by the
//! canonical archive columns. `ExoplanetRecord` is the validated shape the
//! rest of the pipeline consumes.

use serde::{Deserialize, Serialize};

/// Raw ingress payload. Field names follow the archive column convention
/// used by every collaborator (forms, CSV headers, the REST API).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawObservation {
    #[serde(default, alias = "name", alias = "pl_name")]
    pub planet_name: Option<String>,

    /// Planet radius (Earth radii)
    pub pl_rade: Option<f64>,
    /// Planet mass (Earth masses)
    pub pl_bmasse: Option<f64>,
    /// Equilibrium temperature (Kelvin)
    pub pl_eqt: Option<f64>,
    /// Orbital period (days)
    pub pl_orbper: Option<f64>,
    /// Semi-major axis (AU)
    pub pl_orbsmax: Option<f64>,
    /// Orbital eccentricity
    pub pl_orbeccen: Option<f64>,
    /// Stellar effective temperature (Kelvin)
    pub st_teff: Option<f64>,
    /// Stellar radius (Solar radii)
    pub st_rad: Option<f64>,
    /// Stellar mass (Solar masses)
    pub st_mass: Option<f64>,
    /// Stellar metallicity (dex)
    pub st_met: Option<f64>,
    /// Stellar luminosity (Solar luminosities)
    pub st_lum: Option<f64>,
    /// System distance (parsecs)
    pub sy_dist: Option<f64>,
}

/// Imputable numeric columns, in a fixed order shared by the resolver.
pub const RAW_COLUMNS: &[&str] = &[
    "pl_rade",
    "pl_bmasse",
    "pl_eqt",
    "pl_orbper",
    "pl_orbsmax",
    "pl_orbeccen",
    "st_teff",
    "st_rad",
    "st_mass",
    "st_met",
    "st_lum",
    "sy_dist",
];

impl RawObservation {
    /// Read a column by its `RAW_COLUMNS` index.
    pub fn column(&self, index: usize) -> Option<f64> {
        match index {
            0 => self.pl_rade,
            1 => self.pl_bmasse,
            2 => self.pl_eqt,
            3 => self.pl_orbper,
            4 => self.pl_orbsmax,
            5 => self.pl_orbeccen,
            6 => self.st_teff,
            7 => self.st_rad,
            8 => self.st_mass,
            9 => self.st_met,
            10 => self.st_lum,
            11 => self.sy_dist,
            _ => None,
        }
    }

    /// Write a column by its `RAW_COLUMNS` index.
    pub fn set_column(&mut self, index: usize, value: f64) {
        let slot = match index {
            0 => &mut self.pl_rade,
            1 => &mut self.pl_bmasse,
            2 => &mut self.pl_eqt,
            3 => &mut self.pl_orbper,
            4 => &mut self.pl_orbsmax,
            5 => &mut self.pl_orbeccen,
            6 => &mut self.st_teff,
            7 => &mut self.st_rad,
            8 => &mut self.st_mass,
            9 => &mut self.st_met,
            10 => &mut self.st_lum,
            11 => &mut self.sy_dist,
            _ => return,
        };
        *slot = Some(value);
    }

    pub fn name(&self) -> &str {
        self.planet_name.as_deref().unwrap_or("Unknown")
    }
}

/// Validated observation. Every field finite and in range; missing values
/// never survive into this type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExoplanetRecord {
    pub name: String,
    /// Earth radii, > 0
    pub radius: f64,
    /// Earth masses, > 0
    pub mass: f64,
    /// Kelvin, > 0
    pub equilibrium_temp: f64,
    /// days, > 0
    pub orbital_period: f64,
    /// AU, > 0
    pub semi_major_axis: f64,
    /// 0 <= e < 1
    pub eccentricity: f64,
    /// Kelvin, > 0
    pub stellar_teff: f64,
    /// Solar radii, > 0
    pub stellar_radius: f64,
    /// Solar masses, > 0
    pub stellar_mass: f64,
    /// dex
    pub metallicity: f64,
    /// Solar luminosities, > 0
    pub luminosity: f64,
    /// parsecs, >= 0
    pub system_distance: f64,
}
