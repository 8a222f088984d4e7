use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use exohabitat_core::{
    ArtifactStore, ImputePolicy, PipelineConfig, PlanetStore, RawObservation,
};

use crate::{create_router, AppState};

fn observation(name: &str, radius: f64, eq_temp: f64) -> RawObservation {
    RawObservation {
        planet_name: Some(name.to_string()),
        pl_rade: Some(radius),
        pl_bmasse: Some(radius.powi(3)),
        pl_eqt: Some(eq_temp),
        pl_orbper: Some(365.25),
        pl_orbsmax: Some(1.0),
        pl_orbeccen: Some(0.02),
        st_teff: Some(5778.0),
        st_rad: Some(1.0),
        st_mass: Some(1.0),
        st_met: Some(0.0),
        st_lum: Some(1.0),
        sy_dist: Some(50.0),
    }
}

/// Train a small model into a temp artifact store and build the router.
fn test_app() -> (Router, TempDir) {
    let dir = TempDir::new().unwrap();
    let config = PipelineConfig {
        impute_policy: ImputePolicy::MedianImpute,
        artifact_dir: dir.path().to_path_buf(),
        ..PipelineConfig::default()
    };

    let mut catalog = Vec::new();
    for i in 0..15 {
        catalog.push(observation(
            &format!("temperate-{i}"),
            0.85 + 0.04 * i as f64,
            255.0 + 4.0 * i as f64,
        ));
    }
    for i in 0..15 {
        catalog.push(observation(
            &format!("scorched-{i}"),
            1.6 + 0.4 * i as f64,
            1200.0 + 120.0 * i as f64,
        ));
    }

    let (outcome, dataset) = exohabitat_core::run_training(&catalog, &config).unwrap();
    let artifacts = Arc::new(ArtifactStore::open(&config.artifact_dir).unwrap());
    artifacts.publish(&outcome.model, &dataset.scaler).unwrap();
    artifacts.reload().unwrap();

    let state = AppState::new(artifacts, Arc::new(PlanetStore::in_memory()));
    (create_router(state), dir)
}

fn post(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn earth_body() -> Value {
    json!({
        "planet_name": "Earth 2.0",
        "pl_rade": 1.0, "pl_bmasse": 1.0, "pl_eqt": 288.0,
        "pl_orbper": 365.25, "pl_orbsmax": 1.0, "pl_orbeccen": 0.02,
        "st_teff": 5778.0, "st_rad": 1.0, "st_mass": 1.0,
        "st_met": 0.0, "st_lum": 1.0, "sy_dist": 50.0
    })
}

#[tokio::test]
async fn health_reports_loaded_model() {
    let (app, _dir) = test_app();
    let response = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["model_loaded"], true);
    assert_eq!(body["artifact_version"], "v0001");
}

#[tokio::test]
async fn predict_returns_contract_shape() {
    let (app, _dir) = test_app();
    let response = app.oneshot(post("/predict", earth_body())).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["planet_name"], "Earth 2.0");

    let score = body["habitability_score"].as_f64().unwrap();
    assert!((0.0..=100.0).contains(&score));
    assert!(body["classification"].is_string());

    let probs = &body["probabilities"];
    let sum = probs["habitable"].as_f64().unwrap() + probs["not_habitable"].as_f64().unwrap();
    assert!((sum - 1.0).abs() < 1e-9);
    assert!(body["contributing_factors"]["pl_eqt"].is_number());
}

#[tokio::test]
async fn predict_missing_field_is_structured_error() {
    let (app, _dir) = test_app();
    let mut body = earth_body();
    body.as_object_mut().unwrap().remove("pl_bmasse");

    let response = app.oneshot(post("/predict", body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains("pl_bmasse"));
}

#[tokio::test]
async fn batch_reports_per_row_outcomes() {
    let (app, _dir) = test_app();
    let mut bad = earth_body();
    bad.as_object_mut().unwrap().remove("pl_eqt");
    bad["planet_name"] = json!("broken");

    let request = json!({ "records": [earth_body(), bad, earth_body()] });
    let response = app.oneshot(post("/predict_batch", request)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["processed"], 2);
    assert_eq!(body["skipped"], 1);
    let rows = body["results"].as_array().unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0]["success"], true);
    assert_eq!(rows[1]["success"], false);
    assert_eq!(rows[1]["index"], 1);
    assert_eq!(rows[2]["success"], true);
}

#[tokio::test]
async fn add_rank_and_statistics_flow() {
    let (app, _dir) = test_app();

    let mut hot = earth_body();
    hot["planet_name"] = json!("Furnace");
    hot["pl_eqt"] = json!(2400.0);

    let mut ok = earth_body();
    ok["planet_name"] = json!("Candidate");

    for body in [ok.clone(), hot] {
        let response = app.clone().oneshot(post("/add_planet", body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    // Duplicate name -> 409
    let response = app.clone().oneshot(post("/add_planet", ok)).await.unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = app.clone().oneshot(get("/rank?top=1")).await.unwrap();
    let body = body_json(response).await;
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["rank"], 1);
    assert_eq!(data[0]["planet_name"], "Candidate");

    let response = app.oneshot(get("/statistics")).await.unwrap();
    let body = body_json(response).await;
    assert_eq!(body["total_planets"], 2);
    let dist = &body["habitability_distribution"];
    let sum = dist["highly_habitable"].as_u64().unwrap()
        + dist["moderately_habitable"].as_u64().unwrap()
        + dist["low_habitability"].as_u64().unwrap();
    assert_eq!(sum, 2);
}

#[tokio::test]
async fn model_info_and_importance_are_read_only() {
    let (app, _dir) = test_app();

    let response = app.clone().oneshot(get("/model-info")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["feature_count"], body["features"].as_array().unwrap().len());
    assert!(body["metrics"]["f1"].is_number());

    let response = app.oneshot(get("/feature-importance")).await.unwrap();
    let body = body_json(response).await;
    let data = body["data"].as_array().unwrap();
    assert!(!data.is_empty());
    // Sorted descending
    let first = data[0]["importance"].as_f64().unwrap();
    let last = data[data.len() - 1]["importance"].as_f64().unwrap();
    assert!(first >= last);
}

#[tokio::test]
async fn no_model_returns_service_unavailable() {
    let dir = TempDir::new().unwrap();
    let artifacts = Arc::new(ArtifactStore::open(dir.path()).unwrap());
    let state = AppState::new(artifacts, Arc::new(PlanetStore::in_memory()));
    let app = create_router(state);

    let response = app.oneshot(post("/predict", earth_body())).await.unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}
