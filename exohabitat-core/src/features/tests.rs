use crate::schema::ExoplanetRecord;

use super::engineer::{density_kg_m3, engineer, insolation_flux};
use super::layout::{
    compute_layout_hash, feature_index, feature_name, layout_hash, validate_layout, LayoutInfo,
    FEATURE_COUNT, FEATURE_LAYOUT, FEATURE_VERSION,
};
use super::score::{habitability_score, stellar_compatibility, Classification};

pub fn earth() -> ExoplanetRecord {
    ExoplanetRecord {
        name: "Earth".to_string(),
        radius: 1.0,
        mass: 1.0,
        equilibrium_temp: 288.0,
        orbital_period: 365.25,
        semi_major_axis: 1.0,
        eccentricity: 0.0167,
        stellar_teff: 5778.0,
        stellar_radius: 1.0,
        stellar_mass: 1.0,
        metallicity: 0.0,
        luminosity: 1.0,
        system_distance: 0.0,
    }
}

// ============================================================================
// LAYOUT
// ============================================================================

#[test]
fn test_feature_count() {
    assert_eq!(FEATURE_COUNT, 13);
    assert_eq!(FEATURE_LAYOUT.len(), FEATURE_COUNT);
}

#[test]
fn test_layout_hash_consistency() {
    assert_eq!(compute_layout_hash(), compute_layout_hash());
    assert_ne!(layout_hash(), 0);
}

#[test]
fn test_validate_layout() {
    assert!(validate_layout(FEATURE_VERSION, layout_hash()).is_ok());
    assert!(validate_layout(FEATURE_VERSION + 1, layout_hash()).is_err());
    assert!(validate_layout(FEATURE_VERSION, layout_hash() ^ 1).is_err());
}

#[test]
fn test_feature_lookup() {
    assert_eq!(feature_index("pl_rade"), Some(0));
    assert_eq!(feature_index("pl_dens"), Some(9));
    assert_eq!(feature_index("nonexistent"), None);
    assert_eq!(feature_name(0), Some("pl_rade"));
    assert_eq!(feature_name(100), None);
}

#[test]
fn test_layout_info() {
    let info = LayoutInfo::current();
    assert_eq!(info.version, FEATURE_VERSION);
    assert_eq!(info.feature_names.len(), FEATURE_COUNT);
}

// ============================================================================
// DERIVED QUANTITIES
// ============================================================================

#[test]
fn test_earth_density() {
    let d = density_kg_m3(1.0, 1.0);
    // Earth bulk density ~5513 kg/m^3
    assert!((d - 5513.0).abs() < 5.0, "density {d}");
}

#[test]
fn test_earth_insolation() {
    assert!((insolation_flux(1.0, 1.0) - 1.0).abs() < 1e-12);
    // Twice the distance, a quarter of the flux
    assert!((insolation_flux(1.0, 2.0) - 0.25).abs() < 1e-12);
}

#[test]
fn test_earth_stellar_compatibility_is_perfect() {
    assert!((stellar_compatibility(&earth()) - 1.0).abs() < 1e-12);
}

#[test]
fn test_engineer_vector_matches_layout() {
    let eng = engineer(&earth()).unwrap();
    assert!(eng.vector.is_compatible());
    assert_eq!(eng.vector.get_by_name("pl_rade"), Some(1.0));
    assert_eq!(eng.vector.get_by_name("pl_eqt"), Some(288.0));
    assert_eq!(eng.vector.get_by_name("pl_dens"), Some(eng.density));
    assert_eq!(eng.vector.get_by_name("pl_insol"), Some(eng.insolation));
}

#[test]
fn test_engineer_deterministic() {
    let a = engineer(&earth()).unwrap();
    let b = engineer(&earth()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_invalid_physics_zero_axis() {
    let mut record = earth();
    record.semi_major_axis = 0.0;
    assert!(engineer(&record).is_err());
}

#[test]
fn test_invalid_physics_zero_radius() {
    let mut record = earth();
    record.radius = 0.0;
    assert!(engineer(&record).is_err());
}

// ============================================================================
// SCORING
// ============================================================================

#[test]
fn test_earth_is_highly_habitable() {
    let score = habitability_score(&earth());
    assert!(score >= 0.70, "Earth scored {score}");
    assert_eq!(Classification::from_score(score), Classification::HighlyHabitable);
    assert!(engineer(&earth()).unwrap().is_potentially_habitable);
}

#[test]
fn test_scorching_planet_is_non_habitable() {
    // Earth-like in everything except equilibrium temperature
    let mut record = earth();
    record.equilibrium_temp = 3000.0;
    let score = habitability_score(&record);
    assert!(score < 0.50, "hot planet scored {score}");
    assert_eq!(Classification::from_score(score), Classification::NonHabitable);
}

#[test]
fn test_cold_planet_scores_low() {
    let mut record = earth();
    record.equilibrium_temp = 10.0;
    assert!(habitability_score(&record) < 0.50);
}

#[test]
fn test_giant_radius_penalized() {
    let mut record = earth();
    record.radius = 11.2; // Jupiter
    record.mass = 317.8;
    let earth_score = habitability_score(&earth());
    assert!(habitability_score(&record) < earth_score);
}

#[test]
fn test_high_eccentricity_penalized() {
    let mut record = earth();
    record.eccentricity = 0.8;
    assert!(habitability_score(&record) < habitability_score(&earth()));
}

#[test]
fn test_score_clamped_to_unit_interval() {
    let mut record = earth();
    record.equilibrium_temp = 275.0; // optimal everything
    record.eccentricity = 0.0;
    record.orbital_period = 365.0;
    let score = habitability_score(&record);
    assert!((0.0..=1.0).contains(&score));

    record.equilibrium_temp = 9000.0;
    let score = habitability_score(&record);
    assert_eq!(score, 0.0);
}

#[test]
fn test_classification_bands() {
    assert_eq!(Classification::from_score(0.95), Classification::HighlyHabitable);
    assert_eq!(Classification::from_score(0.70), Classification::HighlyHabitable);
    assert_eq!(Classification::from_score(0.60), Classification::PotentiallyHabitable);
    assert_eq!(Classification::from_score(0.50), Classification::PotentiallyHabitable);
    assert_eq!(Classification::from_score(0.49), Classification::NonHabitable);
}
