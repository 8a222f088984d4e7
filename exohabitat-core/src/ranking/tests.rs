use std::collections::BTreeMap;

use tempfile::TempDir;

use crate::features::Classification;
use crate::predict::{PredictionResult, Probabilities};
use crate::schema::ExoplanetRecord;

use super::store::PlanetStore;
use super::StoreError;

fn record(name: &str) -> ExoplanetRecord {
    ExoplanetRecord {
        name: name.to_string(),
        radius: 1.0,
        mass: 1.0,
        equilibrium_temp: 288.0,
        orbital_period: 365.25,
        semi_major_axis: 1.0,
        eccentricity: 0.02,
        stellar_teff: 5778.0,
        stellar_radius: 1.0,
        stellar_mass: 1.0,
        metallicity: 0.0,
        luminosity: 1.0,
        system_distance: 10.0,
    }
}

fn prediction(score: f64) -> PredictionResult {
    PredictionResult {
        score,
        classification: Classification::from_score(score),
        confidence: score.max(1.0 - score),
        probabilities: Probabilities {
            habitable: score,
            not_habitable: 1.0 - score,
        },
        contributing_factors: BTreeMap::new(),
    }
}

#[test]
fn test_rank_orders_by_score() {
    let store = PlanetStore::in_memory();
    store.add("low", record("low"), prediction(0.3)).unwrap();
    store.add("high", record("high"), prediction(0.9)).unwrap();
    store.add("mid", record("mid"), prediction(0.6)).unwrap();

    let top = store.rank(2);
    assert_eq!(top.len(), 2);
    assert_eq!(top[0].name, "high");
    assert_eq!(top[0].rank, 1);
    assert_eq!(top[1].name, "mid");
    assert_eq!(top[1].rank, 2);
}

#[test]
fn test_rank_ties_keep_insertion_order() {
    let store = PlanetStore::in_memory();
    store.add("first", record("first"), prediction(0.5)).unwrap();
    store.add("second", record("second"), prediction(0.5)).unwrap();
    store.add("third", record("third"), prediction(0.5)).unwrap();

    let a = store.rank(10);
    let b = store.rank(10);
    let names: Vec<&str> = a.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["first", "second", "third"]);
    // Repeated calls on unchanged data return identical ordering.
    for (x, y) in a.iter().zip(b.iter()) {
        assert_eq!(x.id, y.id);
        assert_eq!(x.rank, y.rank);
    }
}

#[test]
fn test_duplicate_name_rejected() {
    let store = PlanetStore::in_memory();
    store.add("Kepler-22b", record("Kepler-22b"), prediction(0.8)).unwrap();
    match store.add("Kepler-22b", record("Kepler-22b"), prediction(0.7)) {
        Err(StoreError::DuplicateName(name)) => assert_eq!(name, "Kepler-22b"),
        other => panic!("expected duplicate rejection, got {other:?}"),
    }
    assert_eq!(store.len(), 1);
}

#[test]
fn test_band_counts_sum_to_total() {
    let store = PlanetStore::in_memory();
    let scores = [0.95, 0.82, 0.70, 0.69, 0.50, 0.49, 0.10, 0.0];
    for (i, &s) in scores.iter().enumerate() {
        store.add(&format!("p{i}"), record("p"), prediction(s)).unwrap();
    }

    let stats = store.statistics();
    assert_eq!(stats.total, scores.len());
    assert_eq!(stats.distribution.total(), stats.total);
    assert_eq!(stats.distribution.highly_habitable, 3);
    assert_eq!(stats.distribution.moderately_habitable, 2);
    assert_eq!(stats.distribution.low_habitability, 3);

    let expected_avg = scores.iter().sum::<f64>() / scores.len() as f64;
    assert!((stats.average_score - expected_avg).abs() < 1e-12);
}

#[test]
fn test_empty_store_statistics() {
    let store = PlanetStore::in_memory();
    let stats = store.statistics();
    assert_eq!(stats.total, 0);
    assert_eq!(stats.average_score, 0.0);
    assert_eq!(stats.distribution.total(), 0);
}

#[test]
fn test_snapshot_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("planets.json");

    {
        let store = PlanetStore::with_snapshot(&path).unwrap();
        store.add("alpha", record("alpha"), prediction(0.9)).unwrap();
        store.add("beta", record("beta"), prediction(0.4)).unwrap();
    }

    let reopened = PlanetStore::with_snapshot(&path).unwrap();
    assert_eq!(reopened.len(), 2);
    let top = reopened.rank(1);
    assert_eq!(top[0].name, "alpha");
}
