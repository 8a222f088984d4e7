//! ExoHabitat API Server
//!
//! Thin REST layer over the habitability pipeline core. The server owns
//! no pipeline logic: it validates payloads, calls into the predictor and
//! the planet store, and shapes the JSON the dashboards read.
//!
//! ```text
//! POST /predict            one observation -> prediction
//! POST /predict_batch      per-row outcomes, order preserved
//! POST /add_planet         predict + persist to the ranking store
//! GET  /rank?top=N         descending by score
//! GET  /statistics         totals + band distribution
//! GET  /model-info         active artifact metadata
//! GET  /feature-importance sorted importance weights
//! GET  /health             liveness + artifact state
//! ```

mod config;
mod error;
mod handlers;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use exohabitat_core::{ArtifactStore, PlanetStore};

pub use error::{AppError, AppResult};
pub use state::AppState;

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "exohabitat_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env();

    tracing::info!("ExoHabitat API server starting...");
    tracing::info!("Artifact root: {}", config.artifact_dir.display());

    // Open the artifact store and load the current model if one exists.
    let artifacts = Arc::new(
        ArtifactStore::open(&config.artifact_dir).expect("failed to open artifact store"),
    );
    match artifacts.reload() {
        Ok(artifact) => tracing::info!(
            "serving artifact {} ({})",
            artifact.version(),
            artifact.manifest.model_family
        ),
        Err(e) => tracing::warn!("no artifact loaded yet: {e}"),
    }

    // Open the planet store.
    let planets = Arc::new(match &config.planet_store {
        Some(path) => PlanetStore::with_snapshot(path).expect("failed to open planet store"),
        None => PlanetStore::in_memory(),
    });
    tracing::info!("planet store holds {} planets", planets.len());

    let state = AppState::new(artifacts, planets);
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::check))
        .route("/predict", post(handlers::predict::predict))
        .route("/predict_batch", post(handlers::predict::predict_batch))
        .route("/add_planet", post(handlers::planets::add_planet))
        .route("/rank", get(handlers::ranking::rank))
        .route("/statistics", get(handlers::ranking::statistics))
        .route("/model-info", get(handlers::model_info::model_info))
        .route(
            "/feature-importance",
            get(handlers::model_info::feature_importance),
        )
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
