use crate::config::ImputePolicy;
use crate::error::ValidationError;

use super::record::RawObservation;
use super::{resolve, validate};

pub fn earth_raw() -> RawObservation {
    RawObservation {
        planet_name: Some("Earth".to_string()),
        pl_rade: Some(1.0),
        pl_bmasse: Some(1.0),
        pl_eqt: Some(288.0),
        pl_orbper: Some(365.25),
        pl_orbsmax: Some(1.0),
        pl_orbeccen: Some(0.0167),
        st_teff: Some(5778.0),
        st_rad: Some(1.0),
        st_mass: Some(1.0),
        st_met: Some(0.0),
        st_lum: Some(1.0),
        sy_dist: Some(0.0),
    }
}

#[test]
fn test_validate_earth() {
    let record = validate(&earth_raw()).unwrap();
    assert_eq!(record.name, "Earth");
    assert_eq!(record.radius, 1.0);
    assert_eq!(record.luminosity, 1.0);
}

#[test]
fn test_missing_field_rejected() {
    let mut raw = earth_raw();
    raw.pl_bmasse = None;
    assert_eq!(
        validate(&raw).unwrap_err(),
        ValidationError::MissingField("pl_bmasse")
    );
}

#[test]
fn test_negative_radius_rejected() {
    let mut raw = earth_raw();
    raw.pl_rade = Some(-1.0);
    assert!(matches!(
        validate(&raw).unwrap_err(),
        ValidationError::OutOfRange { field: "pl_rade", .. }
    ));
}

#[test]
fn test_unbound_eccentricity_rejected() {
    let mut raw = earth_raw();
    raw.pl_orbeccen = Some(1.0);
    assert!(matches!(
        validate(&raw).unwrap_err(),
        ValidationError::OutOfRange { field: "pl_orbeccen", .. }
    ));
}

#[test]
fn test_non_finite_rejected() {
    let mut raw = earth_raw();
    raw.pl_eqt = Some(f64::NAN);
    assert!(matches!(
        validate(&raw).unwrap_err(),
        ValidationError::OutOfRange { field: "pl_eqt", .. }
    ));
}

#[test]
fn test_luminosity_derived_from_star() {
    let mut raw = earth_raw();
    raw.st_lum = None;
    let record = validate(&raw).unwrap();
    // R = 1, T = T_sun  =>  L = 1
    assert!((record.luminosity - 1.0).abs() < 1e-9);
}

#[test]
fn test_drop_row_batch() {
    let mut missing = earth_raw();
    missing.planet_name = Some("Incomplete".to_string());
    missing.pl_eqt = None;

    let batch = vec![earth_raw(), missing, earth_raw()];
    let (records, skipped) = resolve(&batch, ImputePolicy::DropRow);

    assert_eq!(records.len(), 2);
    assert_eq!(skipped.len(), 1);
    assert_eq!(skipped[0].index, 1);
    assert_eq!(skipped[0].name, "Incomplete");
    assert_eq!(skipped[0].error, ValidationError::MissingField("pl_eqt"));
}

#[test]
fn test_median_impute_fills_missing() {
    let mut a = earth_raw();
    a.pl_orbeccen = Some(0.1);
    let mut b = earth_raw();
    b.pl_orbeccen = Some(0.3);
    let mut c = earth_raw();
    c.pl_orbeccen = None;

    let (records, skipped) = resolve(&[a, b, c], ImputePolicy::MedianImpute);
    assert!(skipped.is_empty());
    assert_eq!(records.len(), 3);
    // median of [0.1, 0.3]
    assert!((records[2].eccentricity - 0.2).abs() < 1e-12);
}

#[test]
fn test_mean_impute_fills_missing() {
    let mut a = earth_raw();
    a.pl_bmasse = Some(2.0);
    let mut b = earth_raw();
    b.pl_bmasse = Some(4.0);
    let mut c = earth_raw();
    c.pl_bmasse = None;

    let (records, skipped) = resolve(&[a, b, c], ImputePolicy::MeanImpute);
    assert!(skipped.is_empty());
    assert!((records[2].mass - 3.0).abs() < 1e-12);
}

#[test]
fn test_importance_impute_resolves_all_rows() {
    // Enough complete rows to fit the regression, one row missing a column.
    let mut batch: Vec<RawObservation> = Vec::new();
    for i in 0..6 {
        let mut row = earth_raw();
        row.planet_name = Some(format!("planet-{i}"));
        row.pl_rade = Some(0.9 + 0.1 * i as f64);
        row.pl_bmasse = Some(0.8 + 0.2 * i as f64);
        row.pl_eqt = Some(250.0 + 20.0 * i as f64);
        batch.push(row);
    }
    batch[3].pl_bmasse = None;

    let (records, skipped) = resolve(&batch, ImputePolicy::ImportanceWeighted);
    assert!(skipped.is_empty());
    assert_eq!(records.len(), 6);
    let imputed = records[3].mass;
    assert!(imputed.is_finite() && imputed > 0.0);
    // Blend of the column mean and a regression prediction stays within the
    // observed column range.
    assert!(imputed >= 0.8 && imputed <= 2.0);
}

#[test]
fn test_impute_skips_out_of_range_rows() {
    let mut bad = earth_raw();
    bad.st_teff = Some(-10.0);
    let (records, skipped) = resolve(&[earth_raw(), bad], ImputePolicy::MedianImpute);
    assert_eq!(records.len(), 1);
    assert_eq!(skipped.len(), 1);
    assert!(matches!(
        skipped[0].error,
        ValidationError::OutOfRange { field: "st_teff", .. }
    ));
}
